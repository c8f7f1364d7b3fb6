use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

/// Seeded randomness for spawn and food placement. The same seed replays the
/// same placements.
pub struct SessionRng {
    rng: StdRng,
    seed: u64,
}

impl SessionRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    pub fn from_random() -> Self {
        let seed: u64 = rand::rng().random();
        Self::new(seed)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform pick from an inclusive range.
    pub fn random_inclusive(&mut self, low: usize, high: usize) -> usize {
        self.rng.random_range(low..=high)
    }

    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(&mut self.rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_choose_from_empty_slice() {
        let mut rng = SessionRng::new(7);
        let items: [u32; 0] = [];
        assert_eq!(rng.choose(&items), None);
    }

    #[test]
    fn test_same_seed_replays_choices() {
        let items: Vec<usize> = (0..100).collect();
        let mut first = SessionRng::new(42);
        let mut second = SessionRng::new(42);
        for _ in 0..20 {
            let picked = first.choose(&items);
            assert!(picked.is_some());
            assert_eq!(picked, second.choose(&items));
        }
        assert_eq!(first.seed(), 42);
    }
}

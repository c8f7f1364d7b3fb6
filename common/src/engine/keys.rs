use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use super::Direction;
use crate::config::Validate;

pub const ESCAPE_KEY: &str = "Escape";
pub const ENTER_KEY: &str = "Enter";

/// Keys handled by the session itself rather than by a player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlKey {
    Enter,
    Escape,
}

impl ControlKey {
    pub fn from_name(key_name: &str) -> Option<ControlKey> {
        match key_name {
            ENTER_KEY => Some(ControlKey::Enter),
            ESCAPE_KEY => Some(ControlKey::Escape),
            _ => None,
        }
    }
}

/// Four physical keys bound to the four directions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeySet {
    pub up: String,
    pub down: String,
    pub left: String,
    pub right: String,
}

impl KeySet {
    pub fn new(up: &str, down: &str, left: &str, right: &str) -> Self {
        Self {
            up: up.to_string(),
            down: down.to_string(),
            left: left.to_string(),
            right: right.to_string(),
        }
    }

    pub fn arrows() -> Self {
        Self::new("ArrowUp", "ArrowDown", "ArrowLeft", "ArrowRight")
    }

    pub fn wasd() -> Self {
        Self::new("w", "s", "a", "d")
    }

    /// Arrow keys for the first player, WASD for the second.
    pub fn defaults() -> Vec<KeySet> {
        vec![Self::arrows(), Self::wasd()]
    }

    pub fn key_for(&self, direction: Direction) -> &str {
        match direction {
            Direction::Up => &self.up,
            Direction::Down => &self.down,
            Direction::Left => &self.left,
            Direction::Right => &self.right,
        }
    }

    pub fn get(&self, key_name: &str) -> Option<Direction> {
        Direction::ALL
            .into_iter()
            .find(|direction| self.key_for(*direction) == key_name)
    }

    pub fn has(&self, key_name: &str) -> bool {
        self.get(key_name).is_some()
    }

    /// The key bound to the direction opposite to `key_name`'s.
    pub fn opposite_of(&self, key_name: &str) -> Option<&str> {
        self.get(key_name)
            .map(|direction| self.key_for(direction.opposite()))
    }

    pub fn keys(&self) -> [&str; 4] {
        [&self.up, &self.down, &self.left, &self.right]
    }
}

impl Validate for KeySet {
    fn validate(&self) -> Result<(), String> {
        let keys = self.keys();
        for (index, key) in keys.iter().enumerate() {
            if key.is_empty() {
                return Err("key names must not be empty".to_string());
            }
            if keys[index + 1..].contains(key) {
                return Err(format!("key \"{}\" is bound to two directions", key));
            }
        }
        Ok(())
    }
}

/// Accepts at most one key event per `min_gap`.
#[derive(Clone, Debug)]
pub struct KeyThrottle {
    min_gap: Duration,
    last_accepted: Option<Instant>,
}

impl KeyThrottle {
    pub fn new(min_gap: Duration) -> Self {
        Self {
            min_gap,
            last_accepted: None,
        }
    }

    pub fn accept(&mut self, at: Instant) -> bool {
        if let Some(last) = self.last_accepted
            && at.saturating_duration_since(last) < self.min_gap
        {
            return false;
        }
        self.last_accepted = Some(at);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_key_name() {
        let arrows = KeySet::arrows();
        assert_eq!(arrows.get("ArrowLeft"), Some(Direction::Left));
        assert!(arrows.has("ArrowDown"));
        assert!(!arrows.has("w"));
        assert_eq!(arrows.get("w"), None);
    }

    #[test]
    fn test_opposite_key() {
        let wasd = KeySet::wasd();
        assert_eq!(wasd.opposite_of("w"), Some("s"));
        assert_eq!(wasd.opposite_of("a"), Some("d"));
        assert_eq!(wasd.opposite_of("x"), None);
    }

    #[test]
    fn test_default_key_sets_are_valid_and_disjoint() {
        let sets = KeySet::defaults();
        assert_eq!(sets.len(), 2);
        for set in &sets {
            assert!(set.validate().is_ok());
        }
        assert!(sets[0].keys().iter().all(|key| !sets[1].has(key)));
    }

    #[test]
    fn test_duplicate_binding_is_invalid() {
        let set = KeySet::new("w", "w", "a", "d");
        assert!(set.validate().is_err());
    }

    #[test]
    fn test_control_keys() {
        assert_eq!(ControlKey::from_name("Escape"), Some(ControlKey::Escape));
        assert_eq!(ControlKey::from_name("Enter"), Some(ControlKey::Enter));
        assert_eq!(ControlKey::from_name("ArrowUp"), None);
    }

    #[test]
    fn test_throttle_drops_events_inside_gap() {
        let start = Instant::now();
        let mut throttle = KeyThrottle::new(Duration::from_millis(50));
        assert!(throttle.accept(start));
        assert!(!throttle.accept(start + Duration::from_millis(20)));
        assert!(!throttle.accept(start + Duration::from_millis(49)));
        assert!(throttle.accept(start + Duration::from_millis(50)));
        assert!(!throttle.accept(start + Duration::from_millis(60)));
    }
}

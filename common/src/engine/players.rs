use std::fmt;

use super::player::Player;
use crate::PlayerId;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum JoinError {
    Full { max: usize },
    EmptyName,
    DuplicateName(PlayerId),
    /// No free cell left for the snake head.
    NoSpace,
}

impl fmt::Display for JoinError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JoinError::Full { max } => write!(f, "Game is full ({} players max)", max),
            JoinError::EmptyName => write!(f, "Username must not be empty"),
            JoinError::DuplicateName(name) => write!(f, "Username \"{}\" is already taken", name),
            JoinError::NoSpace => write!(f, "No free cell to spawn a snake"),
        }
    }
}

impl std::error::Error for JoinError {}

/// Joined players in join order, bounded by `max_players`.
pub struct Players {
    players: Vec<Player>,
    max_players: usize,
}

impl Players {
    pub fn new(max_players: usize) -> Self {
        Self {
            players: Vec::with_capacity(max_players),
            max_players,
        }
    }

    pub fn max_players(&self) -> usize {
        self.max_players
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.players.len() >= self.max_players
    }

    pub fn contains(&self, username: &PlayerId) -> bool {
        self.find(username).is_some()
    }

    /// Checks whether `username` could join right now.
    pub fn check_join(&self, username: &PlayerId) -> Result<(), JoinError> {
        if username.as_str().trim().is_empty() {
            return Err(JoinError::EmptyName);
        }
        if self.is_full() {
            return Err(JoinError::Full {
                max: self.max_players,
            });
        }
        if self.contains(username) {
            return Err(JoinError::DuplicateName(username.clone()));
        }
        Ok(())
    }

    pub fn push(&mut self, player: Player) -> Result<(), JoinError> {
        self.check_join(player.username())?;
        self.players.push(player);
        Ok(())
    }

    pub fn remove(&mut self, username: &PlayerId) -> Option<Player> {
        let index = self
            .players
            .iter()
            .position(|player| player.username() == username)?;
        Some(self.players.remove(index))
    }

    pub fn find(&self, username: &PlayerId) -> Option<&Player> {
        self.players.iter().find(|player| player.username() == username)
    }

    pub fn get(&self, index: usize) -> Option<&Player> {
        self.players.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.players.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Player> {
        self.players.iter_mut()
    }

    /// Lowest key set index not held by a current player.
    pub fn free_key_set(&self, key_set_count: usize) -> Option<usize> {
        (0..key_set_count).find(|index| {
            !self
                .players
                .iter()
                .any(|player| player.key_set_index() == *index)
        })
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::engine::{Direction, Grid, GridCoord, KeySet, Snake};

    fn player(grid: &mut Grid, name: &str, x: usize, key_set_index: usize) -> Player {
        let snake = Snake::spawn(grid, PlayerId::new(name), GridCoord::new(x, 4), Direction::Up);
        Player::new(
            PlayerId::new(name),
            snake,
            Direction::Up,
            key_set_index,
            KeySet::defaults()[key_set_index].clone(),
            None,
            3,
            Duration::from_millis(50),
        )
    }

    #[test]
    fn test_join_rules() {
        let mut grid = Grid::new(10, 10);
        let mut players = Players::new(2);

        assert_eq!(
            players.check_join(&PlayerId::new("  ")),
            Err(JoinError::EmptyName)
        );

        players.push(player(&mut grid, "alice", 2, 0)).unwrap();
        assert_eq!(
            players.check_join(&PlayerId::new("alice")),
            Err(JoinError::DuplicateName(PlayerId::new("alice")))
        );

        players.push(player(&mut grid, "bob", 6, 1)).unwrap();
        assert!(players.is_full());
        assert_eq!(
            players.check_join(&PlayerId::new("carol")),
            Err(JoinError::Full { max: 2 })
        );
    }

    #[test]
    fn test_free_key_set_reuses_released_slot() {
        let mut grid = Grid::new(10, 10);
        let mut players = Players::new(2);
        players.push(player(&mut grid, "alice", 2, 0)).unwrap();
        players.push(player(&mut grid, "bob", 6, 1)).unwrap();
        assert_eq!(players.free_key_set(2), None);

        let removed = players.remove(&PlayerId::new("alice"));
        assert!(removed.is_some());
        assert_eq!(players.free_key_set(2), Some(0));
        assert_eq!(players.get(0).map(|p| p.username().as_str()), Some("bob"));
    }

    #[test]
    fn test_join_error_messages() {
        assert_eq!(
            JoinError::Full { max: 2 }.to_string(),
            "Game is full (2 players max)"
        );
        assert_eq!(
            JoinError::DuplicateName(PlayerId::new("bob")).to_string(),
            "Username \"bob\" is already taken"
        );
    }
}

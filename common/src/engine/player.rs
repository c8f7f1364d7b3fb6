use std::time::{Duration, Instant};

use super::movement::MoveOutcome;
use super::score::{Score, ScoreBump};
use super::snake::Snake;
use super::{Direction, Grid, KeySet, KeyThrottle};
use crate::PlayerId;

pub struct Player {
    username: PlayerId,
    snake: Snake,
    score: Score,
    direction: Direction,
    moved: Direction,
    key_set_index: usize,
    key_set: KeySet,
    lives: u32,
    throttle: KeyThrottle,
}

impl Player {
    pub fn new(
        username: PlayerId,
        snake: Snake,
        direction: Direction,
        key_set_index: usize,
        key_set: KeySet,
        max_score: Option<u32>,
        lives: u32,
        key_debounce: Duration,
    ) -> Self {
        Self {
            username,
            snake,
            score: Score::new(max_score),
            direction,
            moved: direction,
            key_set_index,
            key_set,
            lives,
            throttle: KeyThrottle::new(key_debounce),
        }
    }

    pub fn username(&self) -> &PlayerId {
        &self.username
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn score(&self) -> &Score {
        &self.score
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn key_set(&self) -> &KeySet {
        &self.key_set
    }

    pub fn key_set_index(&self) -> usize {
        self.key_set_index
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    /// Compares against the direction of the last move, not the committed
    /// one, so two turns between ticks cannot fold the head onto the body.
    pub fn is_trying_180(&self, direction: Direction) -> bool {
        direction.is_opposite(&self.moved)
    }

    /// Commits `direction` for the next move unless it reverses the last move.
    pub fn try_turn(&mut self, direction: Direction) -> bool {
        if self.is_trying_180(direction) {
            return false;
        }
        self.direction = direction;
        true
    }

    /// Applies a key press from this player's key set. Returns the newly
    /// committed direction, or `None` when the key is foreign, throttled or a
    /// reversal.
    pub fn handle_key(&mut self, key_name: &str, at: Instant) -> Option<Direction> {
        let direction = self.key_set.get(key_name)?;
        if !self.throttle.accept(at) {
            return None;
        }
        self.try_turn(direction).then_some(direction)
    }

    pub fn advance(&mut self, grid: &mut Grid) -> MoveOutcome {
        let outcome = self.snake.advance(grid, self.direction);
        if !matches!(outcome, MoveOutcome::Bumped(_)) {
            self.moved = self.direction;
        }
        outcome
    }

    /// Bumps the score; a successful bump also lets the snake grow.
    pub fn eat(&mut self) -> ScoreBump {
        let bump = self.score.bump();
        if let ScoreBump::Increased(_) = bump {
            self.snake.grow();
        }
        bump
    }

    pub fn lose_life(&mut self) {
        self.lives = self.lives.saturating_sub(1);
    }

    pub fn is_out(&self) -> bool {
        self.lives == 0
    }

    pub fn remove_from(&mut self, grid: &mut Grid) {
        self.snake.clear(grid);
    }
}

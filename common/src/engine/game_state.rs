use std::time::{Duration, Instant};

use super::events::GameEvent;
use super::movement::{MoveOutcome, MoveTarget, move_entity};
use super::player::Player;
use super::players::{JoinError, Players};
use super::score::ScoreBump;
use super::snake::{INITIAL_MAX_SIZE, Snake};
use super::{Direction, Entity, Grid, GridCoord, KeySet, Renderer, Scales, ScoreLine, SessionRng};
use crate::config::GameConfig;
use crate::{PlayerId, debug_log, log};

/// The gameplay part of [`GameConfig`].
#[derive(Clone, Debug)]
pub struct Rules {
    pub max_players: usize,
    pub max_score: Option<u32>,
    pub lives: u32,
    pub key_debounce: Duration,
    pub key_sets: Vec<KeySet>,
}

impl From<&GameConfig> for Rules {
    fn from(config: &GameConfig) -> Self {
        Self {
            max_players: config.max_players,
            max_score: config.max_score,
            lives: config.lives,
            key_debounce: config.key_debounce(),
            key_sets: config.key_sets.clone(),
        }
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self::from(&GameConfig::default())
    }
}

pub struct GameState {
    grid: Grid,
    players: Players,
    food: Option<GridCoord>,
    rng: SessionRng,
    rules: Rules,
}

impl GameState {
    pub fn new(config: &GameConfig, rng: SessionRng) -> Self {
        Self::with_grid(config.grid_width(), config.grid_height(), Rules::from(config), rng)
    }

    pub fn with_grid(width: usize, height: usize, rules: Rules, rng: SessionRng) -> Self {
        Self {
            grid: Grid::new(width, height),
            players: Players::new(rules.max_players),
            food: None,
            rng,
            rules,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn players(&self) -> &Players {
        &self.players
    }

    pub fn player(&self, username: &PlayerId) -> Option<&Player> {
        self.players.find(username)
    }

    pub fn food(&self) -> Option<GridCoord> {
        self.food
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// Spawns a snake head for `username` at a random free cell.
    pub fn join(&mut self, username: impl Into<PlayerId>) -> Result<GameEvent, JoinError> {
        let username = username.into();
        self.players.check_join(&username)?;
        let head = self
            .grid
            .random_free_coord(&mut self.rng)
            .ok_or(JoinError::NoSpace)?;
        self.join_at(username, head)
    }

    pub fn join_at(
        &mut self,
        username: impl Into<PlayerId>,
        head: GridCoord,
    ) -> Result<GameEvent, JoinError> {
        self.join_with_snake(username, &[head], Direction::Up, INITIAL_MAX_SIZE)
    }

    /// Joins with a pre-built snake occupying `segments` (head first).
    pub fn join_with_snake(
        &mut self,
        username: impl Into<PlayerId>,
        segments: &[GridCoord],
        facing: Direction,
        max_size: usize,
    ) -> Result<GameEvent, JoinError> {
        let username = username.into();
        self.players.check_join(&username)?;
        if segments.iter().any(|coord| !self.grid.get(*coord).is_empty()) {
            return Err(JoinError::NoSpace);
        }
        let key_set_index = self
            .players
            .free_key_set(self.rules.key_sets.len())
            .ok_or(JoinError::Full {
                max: self.players.max_players(),
            })?;

        let snake =
            Snake::from_segments(&mut self.grid, username.clone(), segments, facing, max_size);
        let player = Player::new(
            username.clone(),
            snake,
            facing,
            key_set_index,
            self.rules.key_sets[key_set_index].clone(),
            self.rules.max_score,
            self.rules.lives,
            self.rules.key_debounce,
        );
        self.players.push(player)?;

        log!(
            "[{}] joined at {} with key set {}",
            username,
            segments[0],
            key_set_index
        );

        if self.food.is_none() {
            self.place_food();
        }

        Ok(GameEvent::PlayerJoined { player: username })
    }

    /// Removes the player and wipes its snake off the grid.
    pub fn remove_player(&mut self, username: &PlayerId) -> Option<Player> {
        let mut player = self.players.remove(username)?;
        player.remove_from(&mut self.grid);
        log!("[{}] removed", username);
        Some(player)
    }

    /// Moves the food to a random free cell, creating it if needed.
    pub fn place_food(&mut self) -> Option<GridCoord> {
        let Some(coord) = self.grid.random_free_coord(&mut self.rng) else {
            log!("No free cell left for food");
            self.food = None;
            return None;
        };
        self.place_food_at(coord);
        Some(coord)
    }

    pub fn place_food_at(&mut self, coord: GridCoord) {
        if let Some(current) = self.food
            && self.grid.get(current).is_food()
        {
            if current != coord {
                assert!(
                    self.grid.get(coord).is_empty(),
                    "cannot place food on {}",
                    self.grid.get(coord)
                );
                move_entity(&mut self.grid, current, MoveTarget::Coord(coord));
            }
        } else {
            assert!(
                self.grid.get(coord).is_empty(),
                "cannot place food on {}",
                self.grid.get(coord)
            );
            self.grid.set(Entity::food(coord));
        }
        debug_log!("Food placed at {}", coord);
        self.food = Some(coord);
    }

    /// Routes a direction key to the player owning it.
    pub fn handle_key(&mut self, key_name: &str, at: Instant) -> Option<Direction> {
        let player = self
            .players
            .iter_mut()
            .find(|player| player.key_set().has(key_name))?;
        let direction = player.handle_key(key_name, at)?;
        debug_log!("[{}] turned {}", player.username(), direction);
        Some(direction)
    }

    /// Moves every snake one step in its committed direction.
    pub fn tick(&mut self) -> Vec<GameEvent> {
        let mut events = Vec::new();
        let mut food_eaten = false;

        for player in self.players.iter_mut() {
            match player.advance(&mut self.grid) {
                MoveOutcome::Moved(_) => {}
                MoveOutcome::AteFood(at) => {
                    food_eaten = true;
                    events.push(GameEvent::AteFood {
                        player: player.username().clone(),
                        at,
                    });
                    match player.eat() {
                        ScoreBump::Increased(score) => events.push(GameEvent::ScoreBumped {
                            player: player.username().clone(),
                            score,
                        }),
                        ScoreBump::MaxReached(max_score) => events.push(GameEvent::MaxScore {
                            player: player.username().clone(),
                            max_score,
                        }),
                    }
                }
                MoveOutcome::Bumped(entity) => {
                    debug_log!("[{}] bumped into {}", player.username(), entity);
                    events.push(GameEvent::Bump {
                        player: player.username().clone(),
                        entity,
                    });
                    player.lose_life();
                    if player.is_out() {
                        events.push(GameEvent::PlayerLost {
                            player: player.username().clone(),
                        });
                    }
                }
            }
        }

        if food_eaten {
            self.place_food();
        }

        events
    }

    pub fn scores(&self) -> Vec<ScoreLine> {
        self.players
            .iter()
            .map(|player| ScoreLine {
                player: player.username().clone(),
                score: player.score().current(),
                lives: player.lives(),
            })
            .collect()
    }

    pub fn redraw_all(&mut self) {
        self.grid.redraw_all();
    }

    pub fn flush(&mut self, renderer: &mut dyn Renderer, scales: &Scales, ui_height: u32) -> usize {
        self.grid.flush(renderer, scales, ui_height)
    }
}

use std::collections::HashSet;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::Validate;
use crate::engine::{ControlKey, KeySet, Scales};

/// Smallest canvas height that still leaves room for the score band and a playable grid.
pub const MIN_CANVAS_HEIGHT: u32 = 300;

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone, Copy)]
pub struct CanvasConfig {
    pub width: u32,
    pub height: u32,
    /// Height of the band at the top of the canvas reserved for scores.
    pub ui_height: u32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            ui_height: 50,
        }
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct GameConfig {
    pub canvas: CanvasConfig,
    pub scales: Scales,
    pub tick_interval_ms: u64,
    pub start_delay_secs: u64,
    pub key_debounce_ms: u64,
    pub max_players: usize,
    pub max_score: Option<u32>,
    pub lives: u32,
    #[serde(default)]
    pub debug: bool,
    pub key_sets: Vec<KeySet>,
}

impl GameConfig {
    pub fn grid_width(&self) -> usize {
        (self.canvas.width / self.scales.grid) as usize
    }

    pub fn grid_height(&self) -> usize {
        ((self.canvas.height - self.canvas.ui_height) / self.scales.grid) as usize
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn key_debounce(&self) -> Duration {
        Duration::from_millis(self.key_debounce_ms)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            canvas: CanvasConfig::default(),
            scales: Scales::default(),
            tick_interval_ms: 75,
            start_delay_secs: 0,
            key_debounce_ms: 50,
            max_players: 2,
            max_score: None,
            lives: 3,
            debug: false,
            key_sets: KeySet::defaults(),
        }
    }
}

impl Validate for GameConfig {
    fn validate(&self) -> Result<(), String> {
        self.scales.validate()?;

        let grid = self.scales.grid;
        if self.canvas.width % grid != 0 {
            return Err(format!("canvas width must be a multiple of {}", grid));
        }
        if self.canvas.height % grid != 0 {
            return Err(format!("canvas height must be a multiple of {}", grid));
        }
        if self.canvas.height <= MIN_CANVAS_HEIGHT {
            return Err(format!("canvas height must be greater than {}", MIN_CANVAS_HEIGHT));
        }
        if self.canvas.ui_height >= self.canvas.height {
            return Err("ui_height must be smaller than the canvas height".to_string());
        }
        if (self.canvas.height - self.canvas.ui_height) % grid != 0 {
            return Err(format!(
                "canvas height minus ui_height must be a multiple of {}",
                grid
            ));
        }
        if self.grid_width() < 4 || self.grid_height() < 4 {
            return Err("grid must be at least 4x4 cells".to_string());
        }
        if !(10..=1000).contains(&self.tick_interval_ms) {
            return Err("tick_interval_ms must be between 10 and 1000".to_string());
        }
        if self.start_delay_secs > 10 {
            return Err("start_delay_secs must not exceed 10".to_string());
        }
        if self.key_debounce_ms > 1000 {
            return Err("key_debounce_ms must not exceed 1000".to_string());
        }
        if self.lives == 0 {
            return Err("lives must be at least 1".to_string());
        }
        if self.max_score == Some(0) {
            return Err("max_score must be at least 1 when set".to_string());
        }
        if self.max_players == 0 {
            return Err("max_players must be greater than 0".to_string());
        }
        if self.max_players > self.key_sets.len() {
            return Err(format!(
                "max_players ({}) exceeds the number of key sets ({})",
                self.max_players,
                self.key_sets.len()
            ));
        }

        let mut seen = HashSet::new();
        for key_set in &self.key_sets {
            key_set.validate()?;
            for key in key_set.keys() {
                if ControlKey::from_name(key).is_some() {
                    return Err(format!("key \"{}\" is reserved", key));
                }
                if !seen.insert(key) {
                    return Err(format!("key \"{}\" is bound more than once", key));
                }
            }
        }

        Ok(())
    }
}

//! # Settings
//!
//! Runtime configuration, loaded from JSON. Every field falls back to the
//! defaults in [`crate::config`] when absent.

use crate::{config, LevelMoverError, LevelMoverResult};
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// One level of the sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelEntry {
    /// Record store key
    pub id: String,
    /// Level text file, relative to the data directory
    pub layout: PathBuf,
    /// Trajectory files, the i-th for the i-th hazard
    #[serde(default)]
    pub trajectories: Vec<PathBuf>,
}

impl LevelEntry {
    pub fn new(id: impl Into<String>, layout: impl Into<PathBuf>) -> Self {
        Self {
            id: id.into(),
            layout: layout.into(),
            trajectories: Vec::new(),
        }
    }

    pub fn with_trajectory(mut self, path: impl Into<PathBuf>) -> Self {
        self.trajectories.push(path.into());
        self
    }
}

/// Game configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub tile_size: i32,
    pub board_width: u32,
    pub board_height: u32,
    pub inventory_slots: usize,
    /// Pixels per tick
    pub hazard_speed: f32,
    /// Seconds on the clock at level start
    pub level_time: u32,
    pub ticks_per_second: u32,
    pub base_score: u32,
    pub time_bonus: u32,
    pub data_dir: PathBuf,
    pub record_file: PathBuf,
    /// Played in order; the last one wins the game
    pub levels: Vec<LevelEntry>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tile_size: config::TILE_SIZE,
            board_width: config::BOARD_WIDTH,
            board_height: config::BOARD_HEIGHT,
            inventory_slots: config::INVENTORY_SLOTS,
            hazard_speed: config::HAZARD_SPEED,
            level_time: config::LEVEL_TIME,
            ticks_per_second: config::TICKS_PER_SECOND,
            base_score: config::BASE_SCORE,
            time_bonus: config::TIME_BONUS,
            data_dir: PathBuf::from("data"),
            record_file: PathBuf::from("records.json"),
            levels: vec![
                LevelEntry::new("1", "levels/1.txt").with_trajectory("trajectories/1_0.txt"),
                LevelEntry::new("2", "levels/2.txt")
                    .with_trajectory("trajectories/2_0.txt")
                    .with_trajectory("trajectories/2_1.txt"),
            ],
        }
    }
}

impl GameConfig {
    /// Loads and validates a JSON configuration file.
    ///
    /// Relative `data_dir` and `record_file` paths are taken relative to the
    /// file's directory.
    pub fn load(path: impl AsRef<Path>) -> LevelMoverResult<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let mut config: GameConfig = serde_json::from_str(&json)?;

        if let Some(parent) = path.parent() {
            if config.data_dir.is_relative() {
                config.data_dir = parent.join(&config.data_dir);
            }
            if config.record_file.is_relative() {
                config.record_file = parent.join(&config.record_file);
            }
        }

        config.validate()?;
        info!(
            "Loaded configuration from {} ({} levels)",
            path.display(),
            config.levels.len()
        );
        Ok(config)
    }

    /// Checks that the configuration can run a game.
    ///
    /// # Examples
    ///
    /// ```
    /// use level_mover::GameConfig;
    ///
    /// let mut config = GameConfig::default();
    /// assert!(config.validate().is_ok());
    /// config.inventory_slots = 0;
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> LevelMoverResult<()> {
        let invalid = |msg: String| Err(LevelMoverError::InvalidConfig(msg));

        if self.tile_size <= 0 {
            return invalid(format!("tile_size must be positive, got {}", self.tile_size));
        }
        if self.board_width == 0 || self.board_height == 0 {
            return invalid("board must be at least 1x1".to_string());
        }
        if self.inventory_slots == 0 {
            return invalid("at least one inventory slot is required".to_string());
        }
        if self.level_time == 0 {
            return invalid("level_time must be at least one second".to_string());
        }
        if self.ticks_per_second == 0 {
            return invalid("ticks_per_second must be positive".to_string());
        }
        if !self.hazard_speed.is_finite() || self.hazard_speed < 0.0 {
            return invalid(format!(
                "hazard_speed must be finite and non-negative, got {}",
                self.hazard_speed
            ));
        }
        if self.levels.is_empty() {
            return invalid("no levels configured".to_string());
        }

        let mut seen = HashSet::new();
        for level in &self.levels {
            if !seen.insert(level.id.as_str()) {
                return invalid(format!("duplicate level id '{}'", level.id));
            }
        }

        Ok(())
    }

    /// Path of a data file.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        self.data_dir.join(path)
    }

    pub fn level(&self, index: usize) -> Option<&LevelEntry> {
        self.levels.get(index)
    }

    pub fn is_last_level(&self, index: usize) -> bool {
        index + 1 >= self.levels.len()
    }
}

//! # Level Mover
//!
//! A grid-based sliding-tile puzzle game. The player stays at a fixed screen
//! position while the level scrolls beneath it one tile at a time.
//!
//! ## Architecture Overview
//!
//! - **Game**: the simulation core. The movement resolver shifts every entity
//!   layer and rolls the shift back when the move is illegal, the hazard
//!   controller patrols hazards along their trajectories, and the round
//!   evaluator decides loss and win.
//! - **Ingest**: turns level text and trajectory files into a world.
//! - **Records**: best-score storage keyed by level id.
//! - **Input / Rendering**: macroquad frontend. Both only read core state.
//!
//! The core is single-threaded and frame-stepped: one [`GameSession::tick`]
//! per frame handles input, movement, hazard advancement and round evaluation
//! strictly in that order.

pub mod game;
pub mod ingest;
pub mod input;
pub mod records;
pub mod rendering;
pub mod settings;

pub use game::*;
pub use ingest::*;
pub use input::*;
pub use records::*;
pub use settings::*;

pub use rendering::MacroquadDisplay;

use std::path::PathBuf;

/// Core error type for the Level Mover engine.
#[derive(thiserror::Error, Debug)]
pub enum LevelMoverError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Level source file does not exist
    #[error("Level not found: {}", .0.display())]
    LevelNotFound(PathBuf),

    /// Trajectory source file does not exist
    #[error("Trajectory not found: {}", .0.display())]
    TrajectoryNotFound(PathBuf),

    /// Level text could not be ingested
    #[error("Invalid level: {0}")]
    InvalidLevel(String),

    /// Trajectory text could not be ingested
    #[error("Invalid trajectory: {0}")]
    InvalidTrajectory(String),

    /// The level has no actor start cell, so no session can begin
    #[error("Level has no actor start cell")]
    MissingActorStart,

    /// Configuration is unusable
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Game state is invalid
    #[error("Invalid game state: {0}")]
    InvalidState(String),

    /// Record store read or write failed
    #[error("Record store error: {0}")]
    RecordStore(String),
}

/// Result type used throughout the Level Mover codebase.
pub type LevelMoverResult<T> = Result<T, LevelMoverError>;

/// Version information for the game.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default game constants.
pub mod config {
    /// Edge length of one tile in pixels
    pub const TILE_SIZE: i32 = 60;

    /// Visible board width in tiles
    pub const BOARD_WIDTH: u32 = 9;

    /// Visible board height in tiles
    pub const BOARD_HEIGHT: u32 = 9;

    /// Number of inventory slots
    pub const INVENTORY_SLOTS: usize = 7;

    /// Hazard patrol speed in pixels per tick
    pub const HAZARD_SPEED: f32 = 5.0;

    /// Seconds on the clock at level start
    pub const LEVEL_TIME: u32 = 100;

    /// Simulation ticks per second
    pub const TICKS_PER_SECOND: u32 = 30;

    /// Score awarded for reaching the portal
    pub const BASE_SCORE: u32 = 1000;

    /// Bonus points per remaining second
    pub const TIME_BONUS: u32 = 10;

    /// Maximum simulation substeps per rendered frame
    pub const MAX_SUBSTEPS: u32 = 4;
}

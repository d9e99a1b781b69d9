//! # Command Definitions
//!
//! The commands the core understands.

use crate::Direction;
use serde::{Deserialize, Serialize};

/// Player input types that can be processed by the game session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerInput {
    /// Step one tile in the given direction
    Move(Direction),
    /// Pause or resume hazards and the clock
    TogglePause,
    /// Replay or continue after the round has ended
    Restart,
    /// Leave the game
    Quit,
}

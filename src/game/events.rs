//! # Game Events
//!
//! Everything the core does is reported as a [`GameEvent`]. The frontend only
//! reads them, mostly to fill the message log.

use crate::{ClassId, Direction, LossCause, Position};
use serde::{Deserialize, Serialize};

/// State changes reported by the simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A level was loaded and play started
    LevelStarted { index: usize, level_id: String },
    /// The world moved one tile by `shift`
    ShiftCommitted {
        direction: Direction,
        shift: Position,
    },
    /// The move was illegal and the world was put back
    ShiftReverted { direction: Direction },
    /// A pushable stayed in front of the actor
    BlockPushed,
    /// A pushable could not be pushed
    BlockBlocked,
    /// A pushable sank into a liquid tile, filling it
    BlockSunk,
    /// A key was picked up; `stored` is false when the inventory was full
    KeyCollected { class: ClassId, stored: bool },
    /// A door opened with a matching key
    DoorOpened { class: ClassId },
    /// A door stayed shut for lack of a matching key
    DoorLocked { class: ClassId },
    /// A collectible was taken
    CollectibleTaken { remaining: u32 },
    /// Every collectible is gone, the portal now works
    PortalActivated,
    Paused,
    Resumed,
    /// One second of level time elapsed
    TimeTick { remaining: u32 },
    GameOver { cause: LossCause },
    LevelComplete { level_id: String, score: u32 },
    GameWon { level_id: String, score: u32 },
}

impl GameEvent {
    /// Human-readable line for the message log, if the event deserves one.
    ///
    /// # Examples
    ///
    /// ```
    /// use level_mover::{ClassId, GameEvent};
    ///
    /// let event = GameEvent::DoorLocked { class: ClassId(0) };
    /// assert_eq!(event.message().as_deref(), Some("The red door is locked."));
    /// assert!(GameEvent::BlockPushed.message().is_none());
    /// ```
    pub fn message(&self) -> Option<String> {
        match self {
            GameEvent::LevelStarted { level_id, .. } => Some(format!("Level {level_id}.")),
            GameEvent::BlockSunk => Some("The block sinks and fills the water.".to_string()),
            GameEvent::KeyCollected { class, stored } => Some(if *stored {
                format!("You picked up the {} key.", class.name())
            } else {
                format!("No room for the {} key. It is lost.", class.name())
            }),
            GameEvent::DoorOpened { class } => Some(format!("The {} door opens.", class.name())),
            GameEvent::DoorLocked { class } => {
                Some(format!("The {} door is locked.", class.name()))
            }
            GameEvent::PortalActivated => Some("The portal is open!".to_string()),
            GameEvent::Paused => Some("Paused.".to_string()),
            GameEvent::Resumed => Some("Resumed.".to_string()),
            GameEvent::GameOver { cause } => Some(format!("Game over: {}.", cause.describe())),
            GameEvent::LevelComplete { score, .. } => {
                Some(format!("Level complete! Score: {score}"))
            }
            GameEvent::GameWon { score, .. } => Some(format!("You win! Score: {score}")),
            _ => None,
        }
    }
}

//! # Game Module
//!
//! The simulation core: entity model, movement resolution, hazard patrols and
//! round evaluation.
//!
//! This module contains the fundamental building blocks of Level Mover:
//! - Collision primitives (rectangles and pixel masks)
//! - Tile entities, the world that partitions them, and the inventory
//! - The movement resolver that shifts the world under the fixed actor
//! - Trajectories and the hazard controller
//! - The round evaluator and the per-frame game session

pub mod collision;
pub mod entities;
pub mod events;
pub mod hazards;
pub mod inventory;
pub mod movement;
pub mod round;
pub mod state;
pub mod trajectory;
pub mod world;

pub use collision::*;
pub use entities::*;
pub use events::*;
pub use hazards::*;
pub use inventory::*;
pub use movement::*;
pub use round::*;
pub use state::*;
pub use trajectory::*;
pub use world::*;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A 2D pixel offset.
///
/// Tile positions are always integer multiples of the tile size.
///
/// # Examples
///
/// ```
/// use level_mover::Position;
///
/// let pos = Position::new(60, 120);
/// assert_eq!(pos + Position::new(-60, 0), Position::new(0, 120));
/// assert_eq!(-pos, Position::new(-60, -120));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Creates a new position with the given coordinates.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Scales both components.
    pub fn scaled(self, factor: i32) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }

    /// Converts to a real-valued vector.
    pub fn as_vec2(self) -> glam::Vec2 {
        glam::Vec2::new(self.x as f32, self.y as f32)
    }
}

impl std::ops::Add for Position {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl std::ops::Sub for Position {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

impl std::ops::Neg for Position {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

/// The four directions the player can ask to move in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit grid step in the player's intended direction.
    ///
    /// # Examples
    ///
    /// ```
    /// use level_mover::{Direction, Position};
    ///
    /// assert_eq!(Direction::Up.to_delta(), Position::new(0, -1));
    /// assert_eq!(Direction::Right.to_delta(), Position::new(1, 0));
    /// ```
    pub fn to_delta(self) -> Position {
        match self {
            Direction::Up => Position::new(0, -1),
            Direction::Down => Position::new(0, 1),
            Direction::Left => Position::new(-1, 0),
            Direction::Right => Position::new(1, 0),
        }
    }

    /// Unit step applied to the world. The actor never moves, so the world
    /// moves the opposite way.
    pub fn world_step(self) -> Position {
        -self.to_delta()
    }

    /// Returns all 4 directions.
    pub fn all() -> [Direction; 4] {
        [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ]
    }
}

/// Horizontal sprite orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// Facing implied by a horizontal world step: the world moving right
    /// means the actor walks left. A zero step has no facing.
    pub fn from_world_dx(dx: i32) -> Option<Facing> {
        match dx.signum() {
            1 => Some(Facing::Left),
            -1 => Some(Facing::Right),
            _ => None,
        }
    }

    /// Facing implied by horizontal travel of a moving entity.
    pub fn from_travel_dx(dx: f32) -> Option<Facing> {
        if dx > 0.0 {
            Some(Facing::Right)
        } else if dx < 0.0 {
            Some(Facing::Left)
        } else {
            None
        }
    }
}

/// Unique identifier for game entities.
pub type EntityId = Uuid;

/// Creates a new unique entity ID.
pub fn new_entity_id() -> EntityId {
    Uuid::new_v4()
}

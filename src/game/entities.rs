//! # Entities
//!
//! Tile entities are a single tagged type: the [`TileKind`] carries the
//! category and any category-specific data (the class id of keys and doors,
//! the open flag of doors). The actor and patrolling hazards have their own
//! types because they carry masks and, for hazards, a trajectory.

use crate::{new_entity_id, EntityId, Facing, Mask, Position, Rect, Trajectory};
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Small integer tying a key to the doors it opens.
///
/// # Examples
///
/// ```
/// use level_mover::ClassId;
///
/// assert_eq!(ClassId::from_key_glyph('b'), Some(ClassId(1)));
/// assert_eq!(ClassId::from_door_glyph('B'), Some(ClassId(1)));
/// assert_eq!(ClassId(3).name(), "yellow");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClassId(pub u8);

impl ClassId {
    const KEY_GLYPHS: &'static str = "rbgy";
    const DOOR_GLYPHS: &'static str = "RBGY";

    /// Class id of a key glyph, if the glyph is a key.
    pub fn from_key_glyph(glyph: char) -> Option<Self> {
        Self::KEY_GLYPHS.find(glyph).map(|i| ClassId(i as u8))
    }

    /// Class id of a door glyph, if the glyph is a door.
    pub fn from_door_glyph(glyph: char) -> Option<Self> {
        Self::DOOR_GLYPHS.find(glyph).map(|i| ClassId(i as u8))
    }

    pub fn key_glyph(self) -> char {
        Self::KEY_GLYPHS.chars().nth(self.0 as usize).unwrap_or('?')
    }

    pub fn door_glyph(self) -> char {
        Self::DOOR_GLYPHS.chars().nth(self.0 as usize).unwrap_or('?')
    }

    /// Color name used in messages.
    pub fn name(self) -> &'static str {
        match self.0 {
            0 => "red",
            1 => "blue",
            2 => "green",
            3 => "yellow",
            _ => "unknown",
        }
    }
}

/// Entity categories. Each category is one collection of the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Wall,
    Floor,
    Liquid,
    Pushable,
    Collectible,
    Key,
    Door,
    Portal,
    Hazard,
    Actor,
}

impl Category {
    /// Categories that the movement resolver shifts before any interaction
    /// is evaluated, in shift order.
    pub const UNCONDITIONAL: [Category; 4] = [
        Category::Wall,
        Category::Liquid,
        Category::Portal,
        Category::Floor,
    ];

    /// Back-to-front draw order.
    pub const DRAW_ORDER: [Category; 10] = [
        Category::Wall,
        Category::Floor,
        Category::Key,
        Category::Door,
        Category::Collectible,
        Category::Pushable,
        Category::Portal,
        Category::Actor,
        Category::Liquid,
        Category::Hazard,
    ];
}

/// What a tile is, plus category-specific data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileKind {
    Wall,
    Floor,
    Liquid,
    Pushable,
    Collectible,
    Key { class: ClassId },
    Door { class: ClassId, open: bool },
    Portal,
}

impl TileKind {
    pub fn category(self) -> Category {
        match self {
            TileKind::Wall => Category::Wall,
            TileKind::Floor => Category::Floor,
            TileKind::Liquid => Category::Liquid,
            TileKind::Pushable => Category::Pushable,
            TileKind::Collectible => Category::Collectible,
            TileKind::Key { .. } => Category::Key,
            TileKind::Door { .. } => Category::Door,
            TileKind::Portal => Category::Portal,
        }
    }

    /// Class id for keys and doors.
    pub fn class(self) -> Option<ClassId> {
        match self {
            TileKind::Key { class } | TileKind::Door { class, .. } => Some(class),
            _ => None,
        }
    }
}

/// A static or grid-movable tile entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    pub id: EntityId,
    pub kind: TileKind,
    pub rect: Rect,
    /// Source glyph, kept so the renderer can tell tile variants apart
    pub glyph: char,
}

impl Tile {
    pub fn new(kind: TileKind, rect: Rect, glyph: char) -> Self {
        Self {
            id: new_entity_id(),
            kind,
            rect,
            glyph,
        }
    }

    pub fn category(&self) -> Category {
        self.kind.category()
    }

    pub fn class(&self) -> Option<ClassId> {
        self.kind.class()
    }
}

/// The player's avatar. Its rectangle never moves; only its facing changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    pub id: EntityId,
    pub rect: Rect,
    pub facing: Facing,
    pub mask: Mask,
}

impl Actor {
    pub fn new(rect: Rect) -> Self {
        Self {
            id: new_entity_id(),
            rect,
            facing: Facing::default(),
            mask: Mask::full(rect.w as u32, rect.h as u32),
        }
    }

    /// Turns the actor to match a horizontal world step. Vertical steps
    /// leave the facing unchanged.
    pub fn face_world_dx(&mut self, dx: i32) {
        if let Some(facing) = Facing::from_world_dx(dx) {
            self.facing = facing;
        }
    }
}

/// A hazard patrolling a trajectory with sub-tile precision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hazard {
    pub id: EntityId,
    /// Exact patrol position; `rect` is derived from it
    pub position: Vec2,
    pub trajectory: Trajectory,
    pub rect: Rect,
    pub facing: Facing,
    pub mask: Mask,
}

impl Hazard {
    /// Creates a hazard at the start of its trajectory, with a disc mask
    /// inset a tenth of the tile from each side.
    pub fn new(trajectory: Trajectory, tile_size: i32) -> Self {
        let position = trajectory.start();
        let size = tile_size.max(0) as u32;
        let mut hazard = Self {
            id: new_entity_id(),
            position,
            trajectory,
            rect: Rect::new(0, 0, tile_size, tile_size),
            facing: Facing::default(),
            mask: Mask::disc(size, size, size / 10),
        };
        hazard.sync_rect();
        hazard
    }

    /// Replaces the default disc mask.
    pub fn with_mask(mut self, mask: Mask) -> Self {
        self.mask = mask;
        self
    }

    /// One patrol step along the trajectory.
    pub fn advance(&mut self) {
        if let Some(facing) = Facing::from_travel_dx(self.trajectory.velocity().x) {
            self.facing = facing;
        }
        self.position = self.trajectory.advance(self.position);
        self.sync_rect();
    }

    /// Shifts the hazard together with its whole patrol path.
    pub fn translate(&mut self, delta: Position) {
        let delta = delta.as_vec2();
        self.position += delta;
        self.trajectory.translate(delta);
        self.sync_rect();
    }

    fn sync_rect(&mut self) {
        self.rect.x = self.position.x.floor() as i32;
        self.rect.y = self.position.y.floor() as i32;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_glyphs() {
        assert_eq!(ClassId::from_key_glyph('r'), Some(ClassId(0)));
        assert_eq!(ClassId::from_key_glyph('y'), Some(ClassId(3)));
        assert_eq!(ClassId::from_key_glyph('R'), None);
        assert_eq!(ClassId::from_door_glyph('G'), Some(ClassId(2)));
    }

    #[test]
    fn test_tile_kind_category() {
        let door = TileKind::Door {
            class: ClassId(1),
            open: false,
        };
        assert_eq!(door.category(), Category::Door);
        assert_eq!(door.class(), Some(ClassId(1)));
        assert_eq!(TileKind::Wall.class(), None);
    }

    #[test]
    fn test_actor_facing_ignores_vertical_steps() {
        let mut actor = Actor::new(Rect::tile(4, 4, 60));
        actor.face_world_dx(60);
        assert_eq!(actor.facing, Facing::Left);
        actor.face_world_dx(0);
        assert_eq!(actor.facing, Facing::Left);
        actor.face_world_dx(-60);
        assert_eq!(actor.facing, Facing::Right);
    }

    #[test]
    fn test_hazard_translate_keeps_path_attached() {
        let trajectory = Trajectory::new(vec![Vec2::ZERO, Vec2::new(60.0, 0.0)], 5.0).unwrap();
        let mut hazard = Hazard::new(trajectory, 60);
        hazard.advance();
        assert_eq!(hazard.rect.origin(), Position::new(5, 0));
        assert_eq!(hazard.facing, Facing::Right);

        hazard.translate(Position::new(0, 60));
        assert_eq!(hazard.rect.origin(), Position::new(5, 60));
        assert_eq!(hazard.trajectory.waypoints()[1], Vec2::new(60.0, 60.0));

        hazard.advance();
        assert_eq!(hazard.rect.origin(), Position::new(10, 60));
    }
}

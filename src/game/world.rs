//! # World
//!
//! The grid entity set: every tile entity of the loaded level partitioned by
//! category, the patrolling hazards, and the single fixed actor.

use crate::{
    Actor, Category, GameConfig, Hazard, LevelLayout, LevelMoverError, LevelMoverResult,
    Position, Rect, Tile, TileCode, TileKind, Trajectory,
};
use log::warn;
use serde::{Deserialize, Serialize};

/// All entities of one level.
///
/// Tile positions are pixel offsets and stay integer multiples of
/// `tile_size` relative to each other; only hazards move in between.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct World {
    pub tile_size: i32,
    pub walls: Vec<Tile>,
    pub floors: Vec<Tile>,
    pub liquids: Vec<Tile>,
    pub pushables: Vec<Tile>,
    pub collectibles: Vec<Tile>,
    pub keys: Vec<Tile>,
    pub doors: Vec<Tile>,
    pub portals: Vec<Tile>,
    pub hazards: Vec<Hazard>,
    pub actor: Actor,
}

impl World {
    /// Builds the world for a parsed level.
    ///
    /// The whole level is translated so the actor start lands in the center
    /// cell of the board. The i-th hazard cell patrols the i-th trajectory,
    /// whose waypoints are level pixel coordinates and receive the same
    /// translation; hazards without a trajectory stay on their cell.
    pub fn from_layout(
        layout: &LevelLayout,
        trajectories: &[Trajectory],
        config: &GameConfig,
    ) -> LevelMoverResult<Self> {
        let tile = config.tile_size;
        let (start_col, start_row) = layout
            .actor_start()
            .ok_or(LevelMoverError::MissingActorStart)?;

        let center = Position::new(
            (config.board_width / 2) as i32,
            (config.board_height / 2) as i32,
        );
        let offset = (center - Position::new(start_col, start_row)).scaled(tile);

        let mut world = Self {
            tile_size: tile,
            walls: Vec::new(),
            floors: Vec::new(),
            liquids: Vec::new(),
            pushables: Vec::new(),
            collectibles: Vec::new(),
            keys: Vec::new(),
            doors: Vec::new(),
            portals: Vec::new(),
            hazards: Vec::new(),
            actor: Actor::new(Rect::tile(center.x, center.y, tile)),
        };

        for cell in layout.cells() {
            let rect = Rect::tile(cell.col, cell.row, tile).translated(offset);
            let glyph = cell.code.glyph();

            match cell.code {
                TileCode::Wall(_) => {
                    world.walls.push(Tile::new(TileKind::Wall, rect, glyph));
                    continue;
                }
                TileCode::Floor(_) => {
                    world.floors.push(Tile::new(TileKind::Floor, rect, glyph));
                    continue;
                }
                _ => world.floors.push(Tile::new(TileKind::Floor, rect, '.')),
            }

            match cell.code {
                TileCode::ActorStart => {}
                TileCode::Key(class) => {
                    world.keys.push(Tile::new(TileKind::Key { class }, rect, glyph))
                }
                TileCode::Door(class) => world.doors.push(Tile::new(
                    TileKind::Door { class, open: false },
                    rect,
                    glyph,
                )),
                TileCode::Collectible => {
                    world
                        .collectibles
                        .push(Tile::new(TileKind::Collectible, rect, glyph))
                }
                TileCode::Liquid => world.liquids.push(Tile::new(TileKind::Liquid, rect, glyph)),
                TileCode::Pushable => {
                    world
                        .pushables
                        .push(Tile::new(TileKind::Pushable, rect, glyph))
                }
                TileCode::Portal => world.portals.push(Tile::new(TileKind::Portal, rect, glyph)),
                TileCode::Hazard => {
                    let index = world.hazards.len();
                    let trajectory = match trajectories.get(index) {
                        Some(trajectory) => {
                            let mut trajectory = trajectory.clone();
                            trajectory.translate(offset.as_vec2());
                            trajectory
                        }
                        None => {
                            warn!(
                                "Hazard {} at ({}, {}) has no trajectory, it will not move",
                                index, cell.col, cell.row
                            );
                            Trajectory::stationary(rect.origin().as_vec2())
                        }
                    };
                    world.hazards.push(Hazard::new(trajectory, tile));
                }
                TileCode::Wall(_) | TileCode::Floor(_) => {}
            }
        }

        if trajectories.len() > world.hazards.len() {
            warn!(
                "{} trajectories supplied for {} hazards, the rest are unused",
                trajectories.len(),
                world.hazards.len()
            );
        }

        Ok(world)
    }

    /// Builds a world straight from level rows with default settings and no
    /// trajectories.
    ///
    /// # Examples
    ///
    /// ```
    /// use level_mover::World;
    ///
    /// let world = World::from_rows(&["#P*O"]).unwrap();
    /// assert_eq!(world.walls.len(), 1);
    /// assert_eq!(world.floors.len(), 3);
    /// assert_eq!(world.collectibles.len(), 1);
    /// ```
    pub fn from_rows(rows: &[&str]) -> LevelMoverResult<Self> {
        let layout = LevelLayout::from_rows(rows)?;
        Self::from_layout(&layout, &[], &GameConfig::default())
    }

    /// Tile collection of a category. Hazards and the actor are not tiles
    /// and yield an empty slice.
    pub fn layer(&self, category: Category) -> &[Tile] {
        match category {
            Category::Wall => &self.walls,
            Category::Floor => &self.floors,
            Category::Liquid => &self.liquids,
            Category::Pushable => &self.pushables,
            Category::Collectible => &self.collectibles,
            Category::Key => &self.keys,
            Category::Door => &self.doors,
            Category::Portal => &self.portals,
            Category::Hazard | Category::Actor => &[],
        }
    }

    pub fn layer_mut(&mut self, category: Category) -> Option<&mut Vec<Tile>> {
        match category {
            Category::Wall => Some(&mut self.walls),
            Category::Floor => Some(&mut self.floors),
            Category::Liquid => Some(&mut self.liquids),
            Category::Pushable => Some(&mut self.pushables),
            Category::Collectible => Some(&mut self.collectibles),
            Category::Key => Some(&mut self.keys),
            Category::Door => Some(&mut self.doors),
            Category::Portal => Some(&mut self.portals),
            Category::Hazard | Category::Actor => None,
        }
    }

    /// Moves a whole tile layer.
    pub fn shift_layer(&mut self, category: Category, delta: Position) {
        if category == Category::Hazard {
            for hazard in &mut self.hazards {
                hazard.translate(delta);
            }
        } else if let Some(layer) = self.layer_mut(category) {
            for tile in layer {
                tile.rect.translate(delta);
            }
        }
    }

    /// Index of the first tile in `category` overlapping the actor.
    pub fn find_actor_overlap(&self, category: Category) -> Option<usize> {
        let actor = self.actor.rect;
        self.layer(category)
            .iter()
            .position(|tile| tile.rect.overlaps(&actor))
    }

    pub fn actor_hits_wall(&self) -> bool {
        self.find_actor_overlap(Category::Wall).is_some()
    }

    pub fn actor_in_liquid(&self) -> bool {
        self.find_actor_overlap(Category::Liquid).is_some()
    }

    pub fn actor_on_portal(&self) -> bool {
        self.find_actor_overlap(Category::Portal).is_some()
    }

    /// Saves the world to JSON.
    pub fn save_to_json(&self) -> LevelMoverResult<String> {
        serde_json::to_string_pretty(self).map_err(LevelMoverError::from)
    }

    /// Loads a world from JSON.
    pub fn load_from_json(json: &str) -> LevelMoverResult<Self> {
        serde_json::from_str(json).map_err(LevelMoverError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn test_actor_is_centered() {
        let world = World::from_rows(&["P#"]).unwrap();
        assert_eq!(world.actor.rect, Rect::tile(4, 4, 60));
        assert_eq!(world.walls[0].rect, Rect::tile(5, 4, 60));
        assert_eq!(world.floors[0].rect, world.actor.rect);
    }

    #[test]
    fn test_floor_beneath_non_wall_tiles() {
        let world = World::from_rows(&["PrR*WSOM"]).unwrap();
        assert_eq!(world.floors.len(), 8);
        assert!(world.walls.is_empty());
        assert_eq!(world.hazards.len(), 1);
        assert!(world.hazards[0].trajectory.is_stationary());
    }

    #[test]
    fn test_missing_actor_start() {
        let result = World::from_rows(&["##", ".."]);
        assert!(matches!(result, Err(LevelMoverError::MissingActorStart)));
    }

    #[test]
    fn test_trajectory_receives_centering_offset() {
        let layout = LevelLayout::from_rows(&["PM"]).unwrap();
        let trajectory = Trajectory::new(vec![Vec2::new(60.0, 0.0), Vec2::new(60.0, 60.0)], 5.0)
            .unwrap();
        let world = World::from_layout(&layout, &[trajectory], &GameConfig::default()).unwrap();

        let hazard = &world.hazards[0];
        assert_eq!(hazard.position, Vec2::new(300.0, 240.0));
        assert_eq!(hazard.trajectory.waypoints()[1], Vec2::new(300.0, 300.0));
    }

    #[test]
    fn test_json_snapshot() {
        let world = World::from_rows(&["#PSW", "*rGO"]).unwrap();
        let json = world.save_to_json().unwrap();
        let restored = World::load_from_json(&json).unwrap();
        assert_eq!(world, restored);
    }
}

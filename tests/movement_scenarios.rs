//! Integration tests for the movement resolver: pushes, liquids, doors and
//! the all-or-nothing shift.

use glam::Vec2;
use level_mover::{
    advance_hazards, resolve_move, Category, ClassId, Direction, Facing, GameConfig, GameEvent,
    Inventory, LevelLayout, LevelMoverResult, Rect, Trajectory, World,
};
use proptest::prelude::*;

const LAYERS: [Category; 8] = [
    Category::Wall,
    Category::Floor,
    Category::Liquid,
    Category::Pushable,
    Category::Collectible,
    Category::Key,
    Category::Door,
    Category::Portal,
];

fn assert_same_layers(world: &World, before: &World) {
    for category in LAYERS {
        assert_eq!(
            world.layer(category),
            before.layer(category),
            "{:?} layer changed",
            category
        );
    }
    assert_eq!(world.hazards, before.hazards);
    assert_eq!(world.actor.rect, before.actor.rect);
}

/// A block pushed into water fills it and the actor steps onto its cell.
#[test]
fn test_block_sinks_into_liquid() -> LevelMoverResult<()> {
    let mut world = World::from_rows(&["#WSP"])?;
    let mut inventory = Inventory::default();
    let mut left = 0;
    let pushable_cell = world.pushables[0].rect;

    let outcome = resolve_move(&mut world, &mut inventory, &mut left, Direction::Left);

    assert!(outcome.committed);
    assert!(outcome.events.contains(&GameEvent::BlockSunk));
    assert!(world.pushables.is_empty());
    assert!(world.liquids.is_empty());
    assert_eq!(world.walls.len(), 1);

    // The floor that was under the block is now under the actor.
    let shifted = pushable_cell.translated(outcome.shift);
    assert_eq!(shifted, world.actor.rect);
    assert!(world
        .floors
        .iter()
        .any(|floor| floor.rect == world.actor.rect));
    assert!(!world.actor_in_liquid());
    Ok(())
}

/// A block with a wall behind it cannot move, and neither does the world.
#[test]
fn test_block_against_wall_blocks_move() -> LevelMoverResult<()> {
    let mut world = World::from_rows(&[".#SP."])?;
    let before = world.clone();
    let mut inventory = Inventory::default();
    let mut left = 0;

    let outcome = resolve_move(&mut world, &mut inventory, &mut left, Direction::Left);

    assert!(!outcome.committed);
    assert!(outcome.events.contains(&GameEvent::BlockBlocked));
    assert_same_layers(&world, &before);
    assert_eq!(world.actor.facing, Facing::Left);
    Ok(())
}

#[test]
fn test_sinking_consumes_one_liquid() -> LevelMoverResult<()> {
    let mut world = World::from_rows(&["W", "W", "S", "P"])?;
    let mut inventory = Inventory::default();
    let mut left = 0;

    let outcome = resolve_move(&mut world, &mut inventory, &mut left, Direction::Up);
    assert!(outcome.committed);
    assert_eq!(world.liquids.len(), 1);
    assert!(world.pushables.is_empty());

    // The filled cell is safe ground, the pool beyond it is not.
    let outcome = resolve_move(&mut world, &mut inventory, &mut left, Direction::Up);
    assert!(outcome.committed);
    assert!(!world.actor_in_liquid());

    let outcome = resolve_move(&mut world, &mut inventory, &mut left, Direction::Up);
    assert!(outcome.committed);
    assert!(world.actor_in_liquid());
    Ok(())
}

#[test]
fn test_door_gating_by_class() -> LevelMoverResult<()> {
    for key in ['r', 'b', 'g', 'y'] {
        for door in ['R', 'B', 'G', 'Y'] {
            let row = format!("P{key}{door}.");
            let mut world = World::from_rows(&[row.as_str()])?;
            let mut inventory = Inventory::default();
            let mut left = 0;

            resolve_move(&mut world, &mut inventory, &mut left, Direction::Right);
            let outcome = resolve_move(&mut world, &mut inventory, &mut left, Direction::Right);

            let matching = key.to_ascii_uppercase() == door;
            assert_eq!(outcome.committed, matching, "key {key}, door {door}");
            assert_eq!(world.doors.is_empty(), matching);
        }
    }
    Ok(())
}

#[test]
fn test_door_check_uses_any_held_key() -> LevelMoverResult<()> {
    let mut world = World::from_rows(&["PrgbG"])?;
    let mut inventory = Inventory::default();
    let mut left = 0;

    for _ in 0..4 {
        resolve_move(&mut world, &mut inventory, &mut left, Direction::Right);
    }
    assert_eq!(inventory.len(), 3);
    assert!(world.doors.is_empty());
    assert_eq!(inventory.items()[1].class(), Some(ClassId(2)));
    Ok(())
}

#[test]
fn test_push_onto_pickup_cell_then_collect() -> LevelMoverResult<()> {
    // The block may rest on a star; the star stays collectible.
    let mut world = World::from_rows(&["PS*."])?;
    let mut inventory = Inventory::default();
    let mut left = 1;

    let outcome = resolve_move(&mut world, &mut inventory, &mut left, Direction::Right);
    assert!(outcome.committed);
    assert_eq!(world.pushables[0].rect, world.collectibles[0].rect);

    resolve_move(&mut world, &mut inventory, &mut left, Direction::Right);
    assert_eq!(left, 0);
    assert_eq!(world.pushables[0].rect, Rect::tile(5, 4, 60));
    Ok(())
}

fn grid_strategy() -> impl Strategy<Value = Vec<String>> {
    let glyphs = vec!['.', '.', '.', '#', 'S', 'W', '*', 'r', 'R', 'b', 'O', 'M'];
    prop::collection::vec(prop::sample::select(glyphs), 25).prop_map(|mut cells| {
        cells[12] = 'P';
        cells
            .chunks(5)
            .map(|row| row.iter().collect::<String>())
            .collect()
    })
}

fn direction_strategy() -> impl Strategy<Value = Direction> {
    prop::sample::select(Direction::all().to_vec())
}

/// Patrols with arbitrary, mostly diagonal, segments.
fn patrols_strategy() -> impl Strategy<Value = Vec<Trajectory>> {
    let waypoints = prop::collection::vec((-300i32..300, -300i32..300), 2..5);
    prop::collection::vec(waypoints, 0..8).prop_map(|patrols| {
        patrols
            .into_iter()
            .map(|points| {
                let points = points
                    .into_iter()
                    .map(|(x, y)| Vec2::new(x as f32, y as f32))
                    .collect();
                Trajectory::new(points, 5.0).expect("trajectory")
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn prop_blocked_move_restores_patrolling_hazards(
        rows in grid_strategy(),
        patrols in patrols_strategy(),
        ticks in 0usize..40,
        moves in prop::collection::vec(direction_strategy(), 1..8),
    ) {
        let rows: Vec<&str> = rows.iter().map(String::as_str).collect();
        let layout = LevelLayout::from_rows(&rows).expect("valid grid");
        let mut world = World::from_layout(&layout, &patrols, &GameConfig::default())
            .expect("valid world");
        let mut inventory = Inventory::default();
        let mut left = world.collectibles.len() as u32;

        for _ in 0..ticks {
            advance_hazards(&mut world);
        }

        for direction in moves {
            let before = world.hazards.clone();
            let outcome = resolve_move(&mut world, &mut inventory, &mut left, direction);
            if !outcome.committed {
                prop_assert_eq!(&world.hazards, &before);
            }
            advance_hazards(&mut world);
        }
    }

    #[test]
    fn prop_blocked_first_move_changes_nothing(
        rows in grid_strategy(),
        direction in direction_strategy(),
    ) {
        let rows: Vec<&str> = rows.iter().map(String::as_str).collect();
        let mut world = World::from_rows(&rows).expect("valid grid");
        let before = world.clone();
        let mut inventory = Inventory::default();
        let mut left = world.collectibles.len() as u32;

        let outcome = resolve_move(&mut world, &mut inventory, &mut left, direction);

        if !outcome.committed {
            let mut expected = before;
            expected.actor.facing = world.actor.facing;
            prop_assert_eq!(&world, &expected);
            prop_assert!(inventory.is_empty());
            prop_assert_eq!(left, world.collectibles.len() as u32);
        } else {
            prop_assert!(!world.actor_hits_wall());
        }
    }

    #[test]
    fn prop_reverted_moves_keep_static_layers(
        rows in grid_strategy(),
        moves in prop::collection::vec(direction_strategy(), 1..12),
    ) {
        let rows: Vec<&str> = rows.iter().map(String::as_str).collect();
        let mut world = World::from_rows(&rows).expect("valid grid");
        let mut inventory = Inventory::default();
        let mut left = world.collectibles.len() as u32;

        for direction in moves {
            let before = world.clone();
            let outcome = resolve_move(&mut world, &mut inventory, &mut left, direction);

            if outcome.committed {
                let shift = outcome.shift;
                for (wall, old) in world.walls.iter().zip(&before.walls) {
                    prop_assert_eq!(wall.rect, old.rect.translated(shift));
                }
            } else {
                prop_assert_eq!(&world.walls, &before.walls);
                prop_assert_eq!(&world.floors, &before.floors);
                prop_assert_eq!(&world.portals, &before.portals);
                prop_assert_eq!(&world.hazards, &before.hazards);
            }
            prop_assert!(!world.actor_hits_wall());
        }
    }

    #[test]
    fn prop_sinking_conserves_counts(
        rows in grid_strategy(),
        moves in prop::collection::vec(direction_strategy(), 1..12),
    ) {
        let rows: Vec<&str> = rows.iter().map(String::as_str).collect();
        let mut world = World::from_rows(&rows).expect("valid grid");
        let mut inventory = Inventory::default();
        let mut left = world.collectibles.len() as u32;

        for direction in moves {
            let pushables = world.pushables.len();
            let liquids = world.liquids.len();
            let outcome = resolve_move(&mut world, &mut inventory, &mut left, direction);
            let sunk = outcome
                .events
                .iter()
                .filter(|event| **event == GameEvent::BlockSunk)
                .count();

            prop_assert!(sunk <= 1);
            prop_assert_eq!(world.pushables.len(), pushables - sunk);
            prop_assert_eq!(world.liquids.len(), liquids - sunk);
        }
    }
}

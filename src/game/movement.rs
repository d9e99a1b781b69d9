//! # Movement Resolver
//!
//! The actor never leaves its screen cell. A move shifts every other entity
//! one tile the opposite way, resolves what the actor now touches, and when
//! the move turns out to be illegal shifts everything back.
//!
//! A pass runs in a fixed order:
//!
//! 1. walls, liquids, portals, floors and hazards (with their patrol paths)
//!    shift unconditionally;
//! 2. pushables shift, then a pushable landing on the actor tries to stay
//!    put: a wall or another pushable behind it blocks the move, a liquid
//!    swallows it together with one liquid tile;
//! 3. keys shift and a key on the actor is picked up;
//! 4. doors shift and a door on the actor opens with a matching key or
//!    blocks the move;
//! 5. collectibles shift and one on the actor is taken.
//!
//! A blocked pass, or one that leaves the actor inside a wall, is followed by
//! exactly one pass in the opposite direction. Since that pass moves every
//! layer by the same vector, a pushable that was shoved back into line in
//! step 2 ends up where it started. Hazards are restored from a copy taken
//! before the move.

use crate::{Category, Direction, GameEvent, Inventory, Position, World};
use log::debug;
use serde::{Deserialize, Serialize};

/// Result of one resolved move.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveOutcome {
    pub direction: Direction,
    /// Pixel shift applied to the world when committed
    pub shift: Position,
    pub committed: bool,
    pub events: Vec<GameEvent>,
}

/// Resolves one player move.
///
/// `collectibles_left` is decremented for every collectible taken and never
/// goes below zero. The actor's facing follows the horizontal direction of
/// the request whether or not the move commits.
///
/// # Examples
///
/// ```
/// use level_mover::{resolve_move, Direction, Inventory, World};
///
/// let mut world = World::from_rows(&["#P*"]).unwrap();
/// let mut inventory = Inventory::default();
/// let mut left = 1;
///
/// let blocked = resolve_move(&mut world, &mut inventory, &mut left, Direction::Left);
/// assert!(!blocked.committed);
///
/// let taken = resolve_move(&mut world, &mut inventory, &mut left, Direction::Right);
/// assert!(taken.committed);
/// assert_eq!(left, 0);
/// ```
pub fn resolve_move(
    world: &mut World,
    inventory: &mut Inventory,
    collectibles_left: &mut u32,
    direction: Direction,
) -> MoveOutcome {
    let shift = direction.world_step().scaled(world.tile_size);
    world.actor.face_world_dx(shift.x);

    // Float positions do not survive a shift there and back exactly.
    let hazards = world.hazards.clone();

    let mut events = Vec::new();
    let blocked = shift_pass(world, inventory, collectibles_left, shift, &mut events);

    if blocked || world.actor_hits_wall() {
        debug!(
            "Move {:?} reverted ({})",
            direction,
            if blocked { "blocked" } else { "wall" }
        );
        shift_pass(world, inventory, collectibles_left, -shift, &mut events);
        world.hazards = hazards;
        events.push(GameEvent::ShiftReverted { direction });
        return MoveOutcome {
            direction,
            shift,
            committed: false,
            events,
        };
    }

    debug!("Move {:?} committed, world shifted by {:?}", direction, shift);
    events.push(GameEvent::ShiftCommitted { direction, shift });
    MoveOutcome {
        direction,
        shift,
        committed: true,
        events,
    }
}

/// One shift of every layer by `shift`. Returns whether the move is blocked.
fn shift_pass(
    world: &mut World,
    inventory: &mut Inventory,
    collectibles_left: &mut u32,
    shift: Position,
    events: &mut Vec<GameEvent>,
) -> bool {
    for category in Category::UNCONDITIONAL {
        world.shift_layer(category, shift);
    }
    world.shift_layer(Category::Hazard, shift);

    let mut blocked = resolve_pushables(world, shift, events);
    collect_keys(world, inventory, shift, events);
    blocked |= resolve_doors(world, inventory, shift, events);
    take_collectibles(world, collectibles_left, shift, events);

    blocked
}

fn resolve_pushables(world: &mut World, shift: Position, events: &mut Vec<GameEvent>) -> bool {
    world.shift_layer(Category::Pushable, shift);

    let Some(index) = world.find_actor_overlap(Category::Pushable) else {
        return false;
    };

    let pushed = world.pushables[index].rect.translated(-shift);
    let hits_wall = world.walls.iter().any(|wall| wall.rect.overlaps(&pushed));
    let hits_pushable = world
        .pushables
        .iter()
        .enumerate()
        .any(|(i, other)| i != index && other.rect.overlaps(&pushed));

    if hits_wall || hits_pushable {
        debug!("Pushable blocked by {}", if hits_wall { "wall" } else { "pushable" });
        events.push(GameEvent::BlockBlocked);
        return true;
    }

    if let Some(liquid) = world
        .liquids
        .iter()
        .position(|liquid| liquid.rect.overlaps(&pushed))
    {
        debug!("Pushable sank into liquid at {:?}", world.liquids[liquid].rect.origin());
        world.liquids.remove(liquid);
        world.pushables.remove(index);
        events.push(GameEvent::BlockSunk);
        return false;
    }

    world.pushables[index].rect = pushed;
    events.push(GameEvent::BlockPushed);
    false
}

fn collect_keys(
    world: &mut World,
    inventory: &mut Inventory,
    shift: Position,
    events: &mut Vec<GameEvent>,
) {
    world.shift_layer(Category::Key, shift);

    while let Some(index) = world.find_actor_overlap(Category::Key) {
        let key = world.keys.remove(index);
        let Some(class) = key.class() else {
            continue;
        };
        let stored = inventory.add(key);
        debug!("Key {:?} collected (stored: {})", class, stored);
        events.push(GameEvent::KeyCollected { class, stored });
    }
}

fn resolve_doors(
    world: &mut World,
    inventory: &Inventory,
    shift: Position,
    events: &mut Vec<GameEvent>,
) -> bool {
    world.shift_layer(Category::Door, shift);

    let Some(index) = world.find_actor_overlap(Category::Door) else {
        return false;
    };
    let Some(class) = world.doors[index].class() else {
        return false;
    };

    if inventory.has_class(class) {
        debug!("Door {:?} opened", class);
        world.doors.remove(index);
        events.push(GameEvent::DoorOpened { class });
        false
    } else {
        debug!("Door {:?} locked, no matching key", class);
        events.push(GameEvent::DoorLocked { class });
        true
    }
}

fn take_collectibles(
    world: &mut World,
    collectibles_left: &mut u32,
    shift: Position,
    events: &mut Vec<GameEvent>,
) {
    world.shift_layer(Category::Collectible, shift);

    while let Some(index) = world.find_actor_overlap(Category::Collectible) {
        world.collectibles.remove(index);
        *collectibles_left = collectibles_left.saturating_sub(1);
        events.push(GameEvent::CollectibleTaken {
            remaining: *collectibles_left,
        });
        if *collectibles_left == 0 {
            events.push(GameEvent::PortalActivated);
        }
    }
}

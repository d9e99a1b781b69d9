//! # Hazard Controller
//!
//! Advances every patrolling hazard one step per simulation tick. Runs
//! independently of player movement and is skipped while paused.

use crate::{masks_collide, World};

/// Moves every hazard one tick along its trajectory.
pub fn advance_hazards(world: &mut World) {
    for hazard in &mut world.hazards {
        hazard.advance();
    }
}

/// Index of the first hazard whose mask touches the actor's mask.
pub fn hazard_contact(world: &World) -> Option<usize> {
    let actor = &world.actor;
    world
        .hazards
        .iter()
        .position(|hazard| masks_collide(&actor.rect, &actor.mask, &hazard.rect, &hazard.mask))
}

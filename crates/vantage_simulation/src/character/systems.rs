//! Character state aggregation

use bevy::prelude::*;

use super::components::{LocomotionState, PhysicsBody};
use crate::movement::CharacterMovement;

/// Horizontal (XY) speed of a velocity
pub fn ground_speed(velocity: Vec3) -> f32 {
    velocity.truncate().length()
}

/// System: velocity + falling state → LocomotionState
///
/// Runs last in the FixedUpdate chain, after integration.
pub fn update_locomotion_state(
    mut query: Query<(&PhysicsBody, &CharacterMovement, &mut LocomotionState)>,
) {
    for (body, movement, mut state) in query.iter_mut() {
        let next = LocomotionState {
            ground_speed: ground_speed(body.velocity),
            in_air: movement.is_falling(),
        };

        // Skip the write so Changed<LocomotionState> stays meaningful
        if *state != next {
            *state = next;
        }
    }
}

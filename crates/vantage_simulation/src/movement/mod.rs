//! Movement domain: input translation and kinematic locomotion
//!
//! Contains:
//! - CharacterMovement, MovementInput, LastMovementInput
//! - translator (axis + yaw → world impulses)
//! - kinematic controller systems (FixedUpdate)

pub mod components;
pub mod kinematic;
pub mod translator;

pub use components::*;
pub use kinematic::*;
pub use translator::*;

use bevy::prelude::*;

use crate::character::update_locomotion_state;
use crate::input::route_player_input;
use crate::GameplaySet;

/// Kinematic movement plugin
///
/// Registers the per-tick chain in FixedUpdate:
/// 1. ground_detection
/// 2. apply_movement_input
/// 3. apply_jumps
/// 4. apply_gravity
/// 5. integrate_velocity_to_transform
/// 6. update_body_rotation
/// 7. sync_body_transform
/// 8. update_locomotion_state (ground speed / in-air)
///
/// and `latch_movement_input` in Update, right after input routing.
pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            (
                ground_detection,
                apply_movement_input,
                apply_jumps,
                apply_gravity,
                integrate_velocity_to_transform,
                update_body_rotation,
                sync_body_transform,
                update_locomotion_state,
            )
                .chain(),
        );

        app.add_systems(
            Update,
            latch_movement_input
                .in_set(GameplaySet::Input)
                .after(route_player_input),
        );
    }
}

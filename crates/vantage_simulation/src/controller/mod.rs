//! Controller domain: control rotation and possession
//!
//! Contains:
//! - PlayerController (control rotation + typed pawn handle)
//! - Possessor (back-reference on the character)
//! - LookConstraint + look math (free / clamped to body)
//! - possession requests and stale-handle cleanup

pub mod components;
pub mod look;
pub mod possession;


pub use components::*;
pub use look::*;
pub use possession::*;

use bevy::prelude::*;

use crate::GameplaySet;

pub struct ControllerPlugin;

impl Plugin for ControllerPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<PossessionRequest>();

        app.add_systems(
            Update,
            (release_stale_possessions, apply_possession_requests)
                .chain()
                .in_set(GameplaySet::Possession),
        );
    }
}

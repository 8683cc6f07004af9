//! View domain: first/third person toggle and camera rig
//!
//! Contains:
//! - ViewMode (ThirdPerson ⇄ FirstPerson)
//! - CameraRig (arm length, rotation inheritance, anchor, lag)
//! - CameraView (resolved pose the client camera copies)
//! - ToggleViewIntent (event from the input router)

pub mod components;
pub mod systems;

#[cfg(test)]
mod view_tests;

pub use components::*;
pub use systems::*;

use bevy::prelude::*;

use crate::GameplaySet;

pub struct ViewPlugin;

impl Plugin for ViewPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<ToggleViewIntent>();

        app.add_systems(Update, toggle_view_mode.in_set(GameplaySet::View));
        app.add_systems(Update, update_camera_views.in_set(GameplaySet::Camera));
    }
}

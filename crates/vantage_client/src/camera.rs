use bevy::prelude::*;
use vantage_simulation::{CameraView, PlayerController};

use crate::space::camera_pose;
use crate::LocalPlayer;

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            follow_possessed_view.after(vantage_simulation::GameplaySet::Camera),
        );
    }
}

/// Marker: the rendering camera driven by the local player's view
#[derive(Component)]
pub struct PlayerCamera;

/// Copy the possessed pawn's resolved view into the render camera
fn follow_possessed_view(
    local: Option<Res<LocalPlayer>>,
    controllers: Query<&PlayerController>,
    views: Query<&CameraView>,
    mut cameras: Query<&mut Transform, With<PlayerCamera>>,
) {
    let Some(local) = local else {
        return;
    };
    let Some(pawn) = controllers.get(local.controller).ok().and_then(PlayerController::pawn) else {
        return;
    };
    let Ok(view) = views.get(pawn.entity()) else {
        return;
    };

    for mut transform in cameras.iter_mut() {
        *transform = camera_pose(view.location, view.rotation.forward());
    }
}

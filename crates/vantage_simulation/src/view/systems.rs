//! View systems: mode toggle and per-frame camera resolution

use bevy::prelude::*;

use super::components::{CameraAnchor, CameraRig, CameraView, ToggleViewIntent, ViewMode};
use crate::character::BodyRotation;
use crate::config::FirstPersonBodyPolicy;
use crate::controller::{PlayerController, Possessor};
use crate::logger;
use crate::movement::CharacterMovement;
use crate::shared::{interp_to, Rotator};

/// System: flip ViewMode on ToggleViewIntent
///
/// Entering first person collapses the arm and hangs the camera on the head.
/// Entering third person restores the arm and movement-driven body rotation.
pub fn toggle_view_mode(
    mut intents: EventReader<ToggleViewIntent>,
    mut pawns: Query<(
        &mut ViewMode,
        &mut CameraRig,
        &mut CharacterMovement,
        &mut BodyRotation,
        &Possessor,
    )>,
    controllers: Query<&PlayerController>,
) {
    for intent in intents.read() {
        let Ok((mut mode, mut rig, mut movement, mut body, possessor)) = pawns.get_mut(intent.pawn) else {
            continue;
        };

        *mode = mode.toggled();

        match *mode {
            ViewMode::FirstPerson => {
                rig.enter_first_person();

                if rig.first_person_body == FirstPersonBodyPolicy::FollowControlYaw {
                    if let Some(controller) = possessor.0.and_then(|c| controllers.get(c).ok()) {
                        body.0.yaw = controller.control_rotation.yaw;
                    }
                    movement.use_controller_yaw = true;
                    movement.orient_rotation_to_movement = false;
                }
            }
            ViewMode::ThirdPerson => {
                rig.enter_third_person();
                movement.use_controller_yaw = false;
                movement.orient_rotation_to_movement = true;
            }
        }

        logger::log_info(&format!("👁️ {:?} view mode → {:?}", intent.pawn, *mode));
    }
}

/// Resolve the camera pose for one character
///
/// `control` is the possessing controller's control rotation, if any.
pub fn resolve_camera_view(
    transform: &Transform,
    body: Rotator,
    control: Option<Rotator>,
    rig: &CameraRig,
    previous: &CameraView,
    delta: f32,
) -> CameraView {
    let target_pivot = match rig.anchor {
        CameraAnchor::ArmSocket => transform.translation,
        CameraAnchor::HeadSocket => transform.translation + rig.head_socket_offset,
    };

    let rotation = match control {
        Some(control) if rig.follows_control_rotation() => control,
        _ => body,
    };

    // Lag only applies to the arm, and restarts when the anchor changes
    let pivot = match (rig.anchor, previous.lagged_pivot) {
        (CameraAnchor::ArmSocket, Some(lagged)) if rig.lag_enabled && previous.anchor == CameraAnchor::ArmSocket => {
            interp_to(lagged, target_pivot, delta, rig.lag_speed)
        }
        _ => target_pivot,
    };

    CameraView {
        location: pivot - rotation.forward() * rig.arm_length,
        rotation,
        lagged_pivot: Some(pivot),
        anchor: rig.anchor,
    }
}

/// System: recompute CameraView for every character
pub fn update_camera_views(
    mut pawns: Query<(&Transform, &BodyRotation, &CameraRig, &Possessor, &mut CameraView)>,
    controllers: Query<&PlayerController>,
    time: Res<Time>,
) {
    let delta = time.delta_secs();

    for (transform, body, rig, possessor, mut view) in pawns.iter_mut() {
        let control = possessor
            .0
            .and_then(|c| controllers.get(c).ok())
            .map(|controller| controller.control_rotation);

        let resolved = resolve_camera_view(transform, body.0, control, rig, &view, delta);
        if *view != resolved {
            *view = resolved;
        }
    }
}

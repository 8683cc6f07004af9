//! Tests for view toggling and camera resolution.

use bevy::prelude::*;

use crate::character::{BodyRotation, Character};
use crate::config::FirstPersonBodyPolicy;
use crate::controller::{PlayerController, Possessor};
use crate::movement::CharacterMovement;
use crate::shared::Rotator;
use crate::view::{
    resolve_camera_view, toggle_view_mode, CameraAnchor, CameraRig, CameraView, ToggleViewIntent, ViewMode,
};

fn toggle_app() -> App {
    let mut app = App::new();
    app.add_event::<ToggleViewIntent>();
    app.add_systems(Update, toggle_view_mode);
    app
}

/// Character possessed by a controller looking at `control_yaw`
fn spawn_possessed(app: &mut App, body_yaw: f32, control_yaw: f32) -> (Entity, Entity) {
    let controller = app
        .world_mut()
        .spawn(PlayerController::new(Rotator::from_yaw(control_yaw)))
        .id();
    let pawn = app
        .world_mut()
        .spawn((Character, BodyRotation(Rotator::from_yaw(body_yaw)), Possessor(Some(controller))))
        .id();
    (controller, pawn)
}

fn toggle(app: &mut App, pawn: Entity) {
    app.world_mut().send_event(ToggleViewIntent { pawn });
    app.update();
}

#[test]
fn test_arm_collapses_and_restores() {
    let mut app = toggle_app();
    let (_, pawn) = spawn_possessed(&mut app, 0.0, 0.0);

    assert_eq!(app.world().get::<CameraRig>(pawn).unwrap().arm_length, 300.0);

    toggle(&mut app, pawn);
    assert_eq!(*app.world().get::<ViewMode>(pawn).unwrap(), ViewMode::FirstPerson);
    assert_eq!(app.world().get::<CameraRig>(pawn).unwrap().arm_length, 0.0);

    toggle(&mut app, pawn);
    assert_eq!(*app.world().get::<ViewMode>(pawn).unwrap(), ViewMode::ThirdPerson);
    assert_eq!(app.world().get::<CameraRig>(pawn).unwrap().arm_length, 300.0);
}

#[test]
fn test_double_toggle_restores_rig_and_movement_flags() {
    let mut app = toggle_app();
    let (_, pawn) = spawn_possessed(&mut app, 10.0, 75.0);

    let rig_before = app.world().get::<CameraRig>(pawn).unwrap().clone();
    let movement_before = *app.world().get::<CharacterMovement>(pawn).unwrap();

    toggle(&mut app, pawn);
    toggle(&mut app, pawn);

    assert_eq!(*app.world().get::<CameraRig>(pawn).unwrap(), rig_before);

    let movement = app.world().get::<CharacterMovement>(pawn).unwrap();
    assert_eq!(movement.use_controller_yaw, movement_before.use_controller_yaw);
    assert_eq!(
        movement.orient_rotation_to_movement,
        movement_before.orient_rotation_to_movement
    );
}

#[test]
fn test_first_person_snaps_body_to_control_yaw() {
    let mut app = toggle_app();
    let (_, pawn) = spawn_possessed(&mut app, 10.0, 75.0);

    toggle(&mut app, pawn);

    let rig = app.world().get::<CameraRig>(pawn).unwrap();
    assert!(rig.camera_uses_control_rotation);
    assert_eq!(rig.anchor, CameraAnchor::HeadSocket);

    assert_eq!(app.world().get::<BodyRotation>(pawn).unwrap().0.yaw, 75.0);

    let movement = app.world().get::<CharacterMovement>(pawn).unwrap();
    assert!(movement.use_controller_yaw);
    assert!(!movement.orient_rotation_to_movement);
}

#[test]
fn test_follow_movement_policy_keeps_body() {
    let mut app = toggle_app();
    let (_, pawn) = spawn_possessed(&mut app, 10.0, 75.0);
    app.world_mut()
        .get_mut::<CameraRig>(pawn)
        .unwrap()
        .first_person_body = FirstPersonBodyPolicy::FollowMovement;

    toggle(&mut app, pawn);

    assert_eq!(app.world().get::<BodyRotation>(pawn).unwrap().0.yaw, 10.0);
    let movement = app.world().get::<CharacterMovement>(pawn).unwrap();
    assert!(!movement.use_controller_yaw);
    assert!(movement.orient_rotation_to_movement);
}

#[test]
fn test_toggle_unknown_pawn_is_ignored() {
    let mut app = toggle_app();
    let ghost = app.world_mut().spawn_empty().id();
    app.world_mut().despawn(ghost);

    toggle(&mut app, ghost);
}

#[test]
fn test_third_person_camera_trails_behind_control_rotation() {
    let rig = CameraRig {
        lag_enabled: false,
        ..default()
    };
    let transform = Transform::from_xyz(100.0, 0.0, 0.0);

    let view = resolve_camera_view(
        &transform,
        Rotator::ZERO,
        Some(Rotator::from_yaw(90.0)),
        &rig,
        &CameraView::default(),
        1.0 / 60.0,
    );

    // Looking down +Y, so the camera sits 300 units toward -Y
    assert!((view.location - Vec3::new(100.0, -300.0, 0.0)).length() < 1e-3);
    assert_eq!(view.rotation.yaw, 90.0);
}

#[test]
fn test_first_person_camera_sits_on_head() {
    let mut rig = CameraRig::default();
    rig.enter_first_person();
    let transform = Transform::from_xyz(0.0, 0.0, 0.0);

    let view = resolve_camera_view(
        &transform,
        Rotator::ZERO,
        Some(Rotator::new(30.0, -10.0, 0.0)),
        &rig,
        &CameraView::default(),
        1.0 / 60.0,
    );

    assert_eq!(view.location, Vec3::new(0.0, 0.0, 70.0));
    assert_eq!(view.rotation, Rotator::new(30.0, -10.0, 0.0));
}

#[test]
fn test_unpossessed_camera_uses_body_rotation() {
    let rig = CameraRig {
        lag_enabled: false,
        ..default()
    };

    let view = resolve_camera_view(
        &Transform::default(),
        Rotator::from_yaw(180.0),
        None,
        &rig,
        &CameraView::default(),
        1.0 / 60.0,
    );

    assert_eq!(view.rotation.yaw, 180.0);
    assert!((view.location - Vec3::new(300.0, 0.0, 0.0)).length() < 1e-3);
}

#[test]
fn test_arm_lag_trails_then_resets_on_anchor_change() {
    let mut rig = CameraRig::default();
    let dt = 1.0 / 60.0;

    let start = Transform::from_xyz(0.0, 0.0, 0.0);
    let first = resolve_camera_view(&start, Rotator::ZERO, None, &rig, &CameraView::default(), dt);

    // Pawn jumps forward; the pivot only covers part of the distance
    let moved = Transform::from_xyz(600.0, 0.0, 0.0);
    let lagged = resolve_camera_view(&moved, Rotator::ZERO, None, &rig, &first, dt);
    let pivot_x = lagged.location.x + rig.arm_length;
    assert!(pivot_x > 0.0 && pivot_x < 600.0);

    // Head anchor never lags
    rig.enter_first_person();
    let head = resolve_camera_view(&moved, Rotator::ZERO, None, &rig, &lagged, dt);
    assert_eq!(head.location, Vec3::new(600.0, 0.0, 70.0));

    // Back to the arm: lag restarts from the current location
    rig.enter_third_person();
    let back = resolve_camera_view(&moved, Rotator::ZERO, None, &rig, &head, dt);
    assert!((back.location - Vec3::new(300.0, 0.0, 0.0)).length() < 1e-3);
}

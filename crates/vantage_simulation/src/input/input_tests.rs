//! Tests for the input router.

use bevy::prelude::*;

use crate::character::{BodyRotation, Character};
use crate::controller::{LookConstraint, PawnHandle, PlayerController, Possessor};
use crate::input::{route_player_input, ActionId, InputActionEvent, InputBindings, TriggerPhase};
use crate::movement::{CharacterMovement, LastMovementInput, MovementInput};
use crate::shared::Rotator;
use crate::shooting::{FireInput, FirePhase};
use crate::view::ToggleViewIntent;

#[derive(Resource, Default)]
struct Routed {
    fire: Vec<FireInput>,
    toggles: Vec<Entity>,
}

fn collect(mut fire: EventReader<FireInput>, mut toggles: EventReader<ToggleViewIntent>, mut routed: ResMut<Routed>) {
    routed.fire.extend(fire.read().copied());
    routed.toggles.extend(toggles.read().map(|t| t.pawn));
}

fn router_app() -> App {
    let mut app = App::new();
    app.add_event::<InputActionEvent>()
        .add_event::<FireInput>()
        .add_event::<ToggleViewIntent>()
        .init_resource::<InputBindings>()
        .init_resource::<Routed>();
    app.add_systems(Update, (route_player_input, collect).chain());
    app
}

/// Controller possessing a fresh character (wired directly, no possession
/// system in this app)
fn spawn_pair(app: &mut App, control_yaw: f32) -> (Entity, Entity) {
    let pawn = app.world_mut().spawn(Character).id();
    let mut controller = PlayerController::new(Rotator::from_yaw(control_yaw));
    controller.set_pawn(Some(PawnHandle::new(pawn)));
    let controller = app.world_mut().spawn(controller).id();
    app.world_mut().get_mut::<Possessor>(pawn).unwrap().0 = Some(controller);
    (controller, pawn)
}

fn send(app: &mut App, event: InputActionEvent) {
    app.world_mut().send_event(event);
    app.update();
}

#[test]
fn test_move_forward_at_yaw_zero() {
    let mut app = router_app();
    let (controller, pawn) = spawn_pair(&mut app, 0.0);

    send(
        &mut app,
        InputActionEvent::axis(controller, ActionId::Move, TriggerPhase::Triggered, Vec2::new(0.0, 1.0)),
    );

    let last = app.world().get::<LastMovementInput>(pawn).unwrap().0;
    assert!((last - Vec3::X).length() < 1e-5);
    let pending = app.world().get::<MovementInput>(pawn).unwrap().pending();
    assert!((pending - Vec3::X).length() < 1e-5);
}

#[test]
fn test_move_release_clears_last_input() {
    let mut app = router_app();
    let (controller, pawn) = spawn_pair(&mut app, 0.0);

    send(
        &mut app,
        InputActionEvent::axis(controller, ActionId::Move, TriggerPhase::Triggered, Vec2::new(1.0, 0.0)),
    );
    send(
        &mut app,
        InputActionEvent::axis(controller, ActionId::Move, TriggerPhase::Completed, Vec2::new(1.0, 0.0)),
    );

    assert_eq!(app.world().get::<LastMovementInput>(pawn).unwrap().0, Vec3::ZERO);
}

#[test]
fn test_look_accumulates_control_rotation() {
    let mut app = router_app();
    let (controller, _) = spawn_pair(&mut app, 0.0);

    send(
        &mut app,
        InputActionEvent::axis(controller, ActionId::Look, TriggerPhase::Triggered, Vec2::new(30.0, -10.0)),
    );

    let control = app.world().get::<PlayerController>(controller).unwrap().control_rotation;
    assert_eq!(control.yaw, 30.0);
    assert_eq!(control.pitch, -10.0);
}

#[test]
fn test_look_clamped_to_body() {
    let mut app = router_app();
    let (controller, pawn) = spawn_pair(&mut app, 0.0);
    app.world_mut().entity_mut(pawn).insert((
        BodyRotation(Rotator::ZERO),
        LookConstraint::ClampedToBody {
            max_yaw_offset: 90.0,
            pitch_limit: None,
        },
    ));

    send(
        &mut app,
        InputActionEvent::axis(controller, ActionId::Look, TriggerPhase::Triggered, Vec2::new(150.0, 0.0)),
    );

    let control = app.world().get::<PlayerController>(controller).unwrap().control_rotation;
    assert!((control.yaw - 90.0).abs() < 1e-4);
}

#[test]
fn test_look_without_pawn_still_turns_controller() {
    let mut app = router_app();
    let controller = app.world_mut().spawn(PlayerController::default()).id();

    send(
        &mut app,
        InputActionEvent::axis(controller, ActionId::Look, TriggerPhase::Triggered, Vec2::new(15.0, 0.0)),
    );

    let control = app.world().get::<PlayerController>(controller).unwrap().control_rotation;
    assert_eq!(control.yaw, 15.0);
}

#[test]
fn test_jump_press_and_release() {
    let mut app = router_app();
    let (controller, pawn) = spawn_pair(&mut app, 0.0);

    send(&mut app, InputActionEvent::button(controller, ActionId::Jump, TriggerPhase::Started));
    assert!(app.world().get::<CharacterMovement>(pawn).unwrap().is_jump_pressed());

    send(&mut app, InputActionEvent::button(controller, ActionId::Jump, TriggerPhase::Completed));
    assert!(!app.world().get::<CharacterMovement>(pawn).unwrap().is_jump_pressed());
}

#[test]
fn test_fire_and_toggle_are_forwarded() {
    let mut app = router_app();
    let (controller, pawn) = spawn_pair(&mut app, 0.0);

    send(&mut app, InputActionEvent::button(controller, ActionId::Fire, TriggerPhase::Started));
    send(&mut app, InputActionEvent::button(controller, ActionId::Fire, TriggerPhase::Completed));
    send(&mut app, InputActionEvent::button(controller, ActionId::ToggleView, TriggerPhase::Started));

    let routed = app.world().resource::<Routed>();
    let phases: Vec<_> = routed.fire.iter().map(|f| (f.pawn, f.phase)).collect();
    assert_eq!(phases, vec![(pawn, FirePhase::Start), (pawn, FirePhase::Stop)]);
    assert_eq!(routed.toggles, vec![pawn]);
}

#[test]
fn test_unbound_phase_is_ignored() {
    let mut app = router_app();
    let (controller, _) = spawn_pair(&mut app, 0.0);

    send(&mut app, InputActionEvent::button(controller, ActionId::ToggleView, TriggerPhase::Completed));
    send(&mut app, InputActionEvent::button(controller, ActionId::Fire, TriggerPhase::Triggered));

    let routed = app.world().resource::<Routed>();
    assert!(routed.fire.is_empty());
    assert!(routed.toggles.is_empty());
}

#[test]
fn test_controller_without_pawn_drops_actions() {
    let mut app = router_app();
    let controller = app.world_mut().spawn(PlayerController::default()).id();
    let bystander = app.world_mut().spawn(Character).id();

    send(
        &mut app,
        InputActionEvent::axis(controller, ActionId::Move, TriggerPhase::Triggered, Vec2::new(0.0, 1.0)),
    );
    send(&mut app, InputActionEvent::button(controller, ActionId::Fire, TriggerPhase::Started));
    send(&mut app, InputActionEvent::button(controller, ActionId::Jump, TriggerPhase::Started));

    assert_eq!(app.world().get::<LastMovementInput>(bystander).unwrap().0, Vec3::ZERO);
    assert!(!app.world().get::<CharacterMovement>(bystander).unwrap().is_jump_pressed());
    assert!(app.world().resource::<Routed>().fire.is_empty());
}

#[test]
fn test_unknown_controller_is_ignored() {
    let mut app = router_app();
    let ghost = app.world_mut().spawn_empty().id();

    send(&mut app, InputActionEvent::button(ghost, ActionId::Fire, TriggerPhase::Started));

    assert!(app.world().resource::<Routed>().fire.is_empty());
}

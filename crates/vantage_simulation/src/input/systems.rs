//! Input router (ECS)
//!
//! # Flow
//!
//! ```text
//! InputActionEvent { controller, action, phase, value }
//!     ↓ InputBindings::resolve
//! InputCommand
//!     ↓ controller's PawnHandle
//! movement translator / look / jump / FireInput / ToggleViewIntent
//! ```
//!
//! A controller without a pawn drops everything except look, which lives on
//! the controller itself.

use bevy::prelude::*;

use super::bindings::{InputBindings, InputCommand};
use super::events::InputActionEvent;
use crate::character::{BodyRotation, Character};
use crate::controller::{add_look_input, constrain_to_body, LookConstraint, PlayerController};
use crate::movement::{apply_move_input, CharacterMovement, LastMovementInput, MovementInput};
use crate::shooting::{FireInput, FirePhase};
use crate::view::ToggleViewIntent;

/// System: route input actions to the possessed character
pub fn route_player_input(
    mut events: EventReader<InputActionEvent>,
    bindings: Res<InputBindings>,
    mut controllers: Query<&mut PlayerController>,
    mut pawns: Query<
        (
            &BodyRotation,
            &LookConstraint,
            &mut MovementInput,
            &mut LastMovementInput,
            &mut CharacterMovement,
        ),
        With<Character>,
    >,
    mut fire: EventWriter<FireInput>,
    mut toggles: EventWriter<ToggleViewIntent>,
) {
    for event in events.read() {
        let Some(command) = bindings.resolve(event.action, event.phase) else {
            continue;
        };
        let Ok(mut controller) = controllers.get_mut(event.controller) else {
            continue;
        };

        let pawn = controller.pawn().map(|handle| handle.entity());

        if command == InputCommand::Look {
            let mut control = add_look_input(controller.control_rotation, event.value.as_axis2d());
            if let Some((body, constraint, ..)) = pawn.and_then(|p| pawns.get(p).ok()) {
                control = constrain_to_body(control, body.0, *constraint);
            }
            controller.control_rotation = control;
            continue;
        }

        let Some(pawn) = pawn else {
            continue;
        };
        let control_yaw = controller.control_rotation.yaw;

        match command {
            InputCommand::Move | InputCommand::StopMove => {
                let Ok((_, _, mut input, mut last, _)) = pawns.get_mut(pawn) else {
                    continue;
                };
                let axis = match command {
                    InputCommand::Move => event.value.as_axis2d(),
                    _ => Vec2::ZERO,
                };
                apply_move_input(axis, Some(control_yaw), &mut input, &mut last);
            }
            InputCommand::Jump | InputCommand::StopJumping => {
                let Ok((.., mut movement)) = pawns.get_mut(pawn) else {
                    continue;
                };
                if command == InputCommand::Jump {
                    movement.jump();
                } else {
                    movement.stop_jumping();
                }
            }
            InputCommand::StartFire => {
                fire.write(FireInput {
                    pawn,
                    phase: FirePhase::Start,
                });
            }
            InputCommand::StopFire => {
                fire.write(FireInput {
                    pawn,
                    phase: FirePhase::Stop,
                });
            }
            InputCommand::ToggleView => {
                toggles.write(ToggleViewIntent { pawn });
            }
            InputCommand::Look => {}
        }
    }
}

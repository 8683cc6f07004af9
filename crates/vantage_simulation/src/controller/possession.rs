//! Possession: binding a controller to the single character it drives
//!
//! Invariant: a character has at most one possessor. Possessing a pawn
//! that another controller holds takes it away from that controller.

use bevy::prelude::*;

use super::components::{PawnHandle, PlayerController, Possessor};
use crate::character::{BodyRotation, Character};
use crate::logger;

/// Event: possession change request
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum PossessionRequest {
    Possess { controller: Entity, pawn: Entity },
    Unpossess { controller: Entity },
}

/// System: apply possession requests in arrival order
///
/// On possess the control rotation snaps to the pawn's body rotation.
pub fn apply_possession_requests(
    mut requests: EventReader<PossessionRequest>,
    mut controllers: Query<(Entity, &mut PlayerController)>,
    mut pawns: Query<(&mut Possessor, &BodyRotation), With<Character>>,
) {
    for request in requests.read() {
        match *request {
            PossessionRequest::Possess { controller, pawn } => {
                possess(controller, pawn, &mut controllers, &mut pawns);
            }
            PossessionRequest::Unpossess { controller } => {
                unpossess(controller, &mut controllers, &mut pawns);
            }
        }
    }
}

fn possess(
    controller_entity: Entity,
    pawn: Entity,
    controllers: &mut Query<(Entity, &mut PlayerController)>,
    pawns: &mut Query<(&mut Possessor, &BodyRotation), With<Character>>,
) {
    if !controllers.contains(controller_entity) {
        return;
    }
    let Ok((possessor, body)) = pawns.get(pawn) else {
        return;
    };
    let body_rotation = body.0;

    // Previous possessor of this pawn loses it
    if let Some(previous) = possessor.0.filter(|&c| c != controller_entity) {
        if let Ok((_, mut other)) = controllers.get_mut(previous) {
            other.set_pawn(None);
        }
    }

    // Controller drops whatever it drove before
    unpossess(controller_entity, controllers, pawns);

    if let Ok((mut possessor, _)) = pawns.get_mut(pawn) {
        possessor.0 = Some(controller_entity);
    }
    if let Ok((_, mut controller)) = controllers.get_mut(controller_entity) {
        controller.set_pawn(Some(PawnHandle::new(pawn)));
        controller.control_rotation = body_rotation;
    }

    logger::log(&format!("Controller {:?} possessed {:?}", controller_entity, pawn));
}

fn unpossess(
    controller_entity: Entity,
    controllers: &mut Query<(Entity, &mut PlayerController)>,
    pawns: &mut Query<(&mut Possessor, &BodyRotation), With<Character>>,
) {
    let Ok((_, mut controller)) = controllers.get_mut(controller_entity) else {
        return;
    };
    let Some(handle) = controller.pawn() else {
        return;
    };
    controller.set_pawn(None);

    if let Ok((mut possessor, _)) = pawns.get_mut(handle.entity()) {
        if possessor.0 == Some(controller_entity) {
            possessor.0 = None;
        }
    }

    logger::log(&format!("Controller {:?} released {:?}", controller_entity, handle.entity()));
}

/// System: drop handles to despawned pawns, and possessors that no longer
/// exist
pub fn release_stale_possessions(
    mut controllers: Query<(Entity, &mut PlayerController)>,
    mut pawns: Query<(Entity, &mut Possessor), With<Character>>,
) {
    for (controller_entity, mut controller) in controllers.iter_mut() {
        let Some(handle) = controller.pawn() else {
            continue;
        };
        if !pawns.contains(handle.entity()) {
            controller.set_pawn(None);
            logger::log(&format!(
                "Controller {:?} lost pawn {:?} (despawned)",
                controller_entity,
                handle.entity()
            ));
        }
    }

    for (pawn, mut possessor) in pawns.iter_mut() {
        let Some(controller_entity) = possessor.0 else {
            continue;
        };
        let still_held = controllers
            .get(controller_entity)
            .is_ok_and(|(_, controller)| controller.pawn().map(PawnHandle::entity) == Some(pawn));
        if !still_held {
            possessor.0 = None;
        }
    }
}

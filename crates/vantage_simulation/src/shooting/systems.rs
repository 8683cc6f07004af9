//! Fire flow: input → (authority check | server call) → trace → result
//!
//! ```text
//! FireInput ─┬─ EquippedWeapon → FireBehavior::start_fire / stop_fire
//!            ├─ Authority       → HitScanRequest
//!            └─ proxy           → RpcOutbox (ServerRpc::Fire)
//!
//! RpcInbox (server) → re-check authority + owner → HitScanRequest
//! HitScanRequest → backend (HitVolumes | Rapier) → HitScanResult
//! ```

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::components::{Aim, EquippedWeapon, HitScan, HitVolume};
use super::events::{FireInput, FirePhase, HitScanRequest, HitScanResult, TraceHit};
use super::trace::trace_volumes;
use crate::character::{BodyRotation, EyeHeight};
use crate::controller::{PlayerController, Possessor};
use crate::logger;
use crate::net::{find_by_net_id, LocalConnection, NetId, NetOwner, NetRole, RpcInbox, RpcOutbox, ServerRpc};
use crate::shared::Rotator;

/// Aim of a character: eye location, looking along the base aim rotation
///
/// Base aim is the possessing controller's control rotation, or the body
/// rotation when nobody possesses the character.
pub fn compute_aim(
    shooter: Entity,
    transform: &Transform,
    eye: &EyeHeight,
    body: Rotator,
    control: Option<Rotator>,
) -> Aim {
    let rotation = control.unwrap_or(body);
    Aim {
        shooter,
        origin: eye.eye_location(transform),
        direction: rotation.forward(),
    }
}

fn hit_scan_request(aim: &Aim, hit_scan: &HitScan) -> HitScanRequest {
    HitScanRequest {
        shooter: aim.shooter,
        origin: aim.origin,
        direction: aim.direction,
        max_range: hit_scan.max_range,
    }
}

fn control_rotation_of(possessor: &Possessor, controllers: &Query<&PlayerController>) -> Option<Rotator> {
    possessor
        .0
        .and_then(|c| controllers.get(c).ok())
        .map(|controller| controller.control_rotation)
}

/// System: dispatch fire input
pub fn handle_fire_input(
    mut inputs: EventReader<FireInput>,
    mut pawns: Query<(
        &Transform,
        &EyeHeight,
        &BodyRotation,
        &Possessor,
        &HitScan,
        &NetRole,
        Option<&NetId>,
        Option<&mut EquippedWeapon>,
    )>,
    controllers: Query<&PlayerController>,
    local: Res<LocalConnection>,
    mut outbox: ResMut<RpcOutbox>,
    mut requests: EventWriter<HitScanRequest>,
) {
    for input in inputs.read() {
        let Ok((transform, eye, body, possessor, hit_scan, role, net_id, weapon)) = pawns.get_mut(input.pawn) else {
            continue;
        };

        // Equipped weapon owns both edges
        if let Some(mut weapon) = weapon {
            match input.phase {
                FirePhase::Start => {
                    let control = control_rotation_of(possessor, &controllers);
                    let aim = compute_aim(input.pawn, transform, eye, body.0, control);
                    if let Some(request) = weapon.0.start_fire(&aim) {
                        if role.has_authority() {
                            requests.write(request);
                        }
                    }
                }
                FirePhase::Stop => weapon.0.stop_fire(),
            }
            continue;
        }

        if input.phase == FirePhase::Stop {
            continue;
        }

        if role.has_authority() {
            let control = control_rotation_of(possessor, &controllers);
            let aim = compute_aim(input.pawn, transform, eye, body.0, control);
            requests.write(hit_scan_request(&aim, hit_scan));
            continue;
        }

        // Proxy without a NetId has nothing to address on the server
        let Some(net_id) = net_id else {
            continue;
        };

        let sequence = outbox.send_reliable(local.0, ServerRpc::Fire { pawn: *net_id });
        logger::log(&format!("🔫 {:?} fire → server (seq {})", input.pawn, sequence));
    }
}

/// System: handle client calls on the server
///
/// The pawn must exist, be simulated here and be owned by the calling
/// connection. Anything else is dropped without a reply.
pub fn receive_server_rpcs(
    mut inbox: ResMut<RpcInbox>,
    pawns: Query<(
        Entity,
        &NetId,
        &NetRole,
        Option<&NetOwner>,
        &Transform,
        &EyeHeight,
        &BodyRotation,
        &Possessor,
        &HitScan,
    )>,
    controllers: Query<&PlayerController>,
    mut requests: EventWriter<HitScanRequest>,
) {
    for envelope in inbox.drain() {
        match envelope.rpc {
            ServerRpc::Fire { pawn } => {
                let found = find_by_net_id(pawns.iter().map(|(entity, net_id, ..)| (entity, net_id)), pawn);
                let Some((entity, _, role, owner, transform, eye, body, possessor, hit_scan)) =
                    found.and_then(|entity| pawns.get(entity).ok())
                else {
                    continue;
                };

                if !role.has_authority() || owner.map(|o| o.0) != Some(envelope.sender) {
                    continue;
                }

                let control = control_rotation_of(possessor, &controllers);
                let aim = compute_aim(entity, transform, eye, body.0, control);
                requests.write(hit_scan_request(&aim, hit_scan));
            }
        }
    }
}

/// System: resolve traces against `HitVolume`s (headless backend)
pub fn resolve_hitscan_volumes(
    mut requests: EventReader<HitScanRequest>,
    volumes: Query<(Entity, &Transform, &HitVolume)>,
    mut results: EventWriter<HitScanResult>,
) {
    for request in requests.read() {
        let hit = trace_volumes(request, volumes.iter());
        results.write(HitScanResult {
            shooter: request.shooter,
            hit,
        });
    }
}

/// System: resolve traces through the Rapier query pipeline
pub fn resolve_hitscan_rapier(
    mut requests: EventReader<HitScanRequest>,
    rapier: ReadRapierContext,
    mut results: EventWriter<HitScanResult>,
) {
    let Ok(context) = rapier.single() else {
        requests.clear();
        return;
    };

    for request in requests.read() {
        let filter = QueryFilter::default().exclude_collider(request.shooter);
        let hit = context
            .cast_ray(request.origin, request.direction, request.max_range, true, filter)
            .map(|(entity, distance)| TraceHit {
                entity,
                location: request.origin + request.direction * distance,
                distance,
            });

        results.write(HitScanResult {
            shooter: request.shooter,
            hit,
        });
    }
}

/// System: log trace outcomes
pub fn report_hitscan_results(mut results: EventReader<HitScanResult>) {
    for result in results.read() {
        match result.hit {
            Some(hit) => logger::log_info(&format!(
                "🎯 {:?} hit {:?} at {:.1} ({:.1} units)",
                result.shooter, hit.entity, hit.location, hit.distance
            )),
            None => logger::log_info(&format!("🎯 {:?} missed", result.shooter)),
        }
    }
}

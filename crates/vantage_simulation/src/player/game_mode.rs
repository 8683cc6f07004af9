//! Game mode: which pawn and controller a joining player gets
//!
//! On `PlayerLogin` the authority spawns a controller and the default
//! character at the spawn point, gives both the joining connection as owner
//! and queues possession. A joining connection starts a fresh rpc sequence,
//! so its old replay state is dropped.

use bevy::prelude::*;

use super::spawn::{spawn_player_character, spawn_player_controller};
use crate::config::GameplayConfig;
use crate::controller::PossessionRequest;
use crate::logger;
use crate::net::{ConnectionId, NetIdAllocator, NetOwner, NetRole, RpcInbox};

/// Spawn rules
#[derive(Resource, Debug, Clone)]
pub struct GameMode {
    pub spawn_point: Vec3,
    pub spawn_yaw: f32,
}

impl Default for GameMode {
    fn default() -> Self {
        Self {
            spawn_point: Vec3::ZERO,
            spawn_yaw: 0.0,
        }
    }
}

/// Event: a connection joined
#[derive(Event, Debug, Clone, Copy)]
pub struct PlayerLogin {
    pub connection: ConnectionId,
}

/// Event: player pawn + controller are in the world
#[derive(Event, Debug, Clone, Copy)]
pub struct PlayerSpawned {
    pub connection: ConnectionId,
    pub controller: Entity,
    pub pawn: Entity,
}

/// System: spawn and possess a default pawn for every login
pub fn handle_player_logins(
    mut commands: Commands,
    mut logins: EventReader<PlayerLogin>,
    game_mode: Res<GameMode>,
    config: Res<GameplayConfig>,
    mut net_ids: ResMut<NetIdAllocator>,
    mut possession: EventWriter<PossessionRequest>,
    mut spawned: EventWriter<PlayerSpawned>,
    mut inbox: Option<ResMut<RpcInbox>>,
) {
    for login in logins.read() {
        if let Some(inbox) = inbox.as_deref_mut() {
            inbox.forget(login.connection);
        }
        let pawn = spawn_player_character(&mut commands, &config, game_mode.spawn_point, game_mode.spawn_yaw);
        let controller = spawn_player_controller(&mut commands, game_mode.spawn_yaw);

        let net_id = net_ids.allocate();
        commands
            .entity(pawn)
            .insert((net_id, NetOwner(login.connection), NetRole::Authority));
        commands.entity(controller).insert(NetOwner(login.connection));

        possession.write(PossessionRequest::Possess { controller, pawn });
        spawned.write(PlayerSpawned {
            connection: login.connection,
            controller,
            pawn,
        });

        logger::log_info(&format!(
            "✅ {:?} joined: pawn {:?} ({:?}), controller {:?}",
            login.connection, pawn, net_id, controller
        ));
    }
}

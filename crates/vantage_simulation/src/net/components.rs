//! Replication identity: roles, network ids, owning connection

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Network role of an actor on this peer
///
/// - Authority: this peer owns the simulation of the actor (server,
///   standalone)
/// - AutonomousProxy: locally controlled copy on an owning client
/// - SimulatedProxy: remote copy driven purely by replication
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub enum NetRole {
    #[default]
    Authority,
    AutonomousProxy,
    SimulatedProxy,
}

impl NetRole {
    pub fn has_authority(self) -> bool {
        self == NetRole::Authority
    }
}

/// Stable id shared by every peer's copy of a replicated actor
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
pub struct NetId(pub u64);

/// Transport connection id. 0 is the listen host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Reflect, Serialize, Deserialize)]
pub struct ConnectionId(pub u32);

impl ConnectionId {
    pub const HOST: Self = Self(0);
}

/// Connection that owns (controls) an actor
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct NetOwner(pub ConnectionId);

/// This peer's own connection
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LocalConnection(pub ConnectionId);

/// Hands out NetIds on the authority
#[derive(Resource, Debug, Default)]
pub struct NetIdAllocator {
    next: u64,
}

impl NetIdAllocator {
    pub fn allocate(&mut self) -> NetId {
        self.next += 1;
        NetId(self.next)
    }
}

/// Find the local entity carrying `id`
pub fn find_by_net_id<'a>(
    query: impl IntoIterator<Item = (Entity, &'a NetId)>,
    id: NetId,
) -> Option<Entity> {
    query
        .into_iter()
        .find_map(|(entity, net_id)| (*net_id == id).then_some(entity))
}

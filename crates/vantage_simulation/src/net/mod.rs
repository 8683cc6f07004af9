//! Net seam: roles, ids, ownership and client → server calls
//!
//! No real socket transport. `pump_loopback` moves calls between two
//! in-process worlds; the server-side handlers live with the features they
//! drive (see `shooting::receive_server_rpcs`).

pub mod components;
pub mod rpc;

pub use components::*;
pub use rpc::*;

use bevy::prelude::*;

pub struct NetPlugin;

impl Plugin for NetPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LocalConnection>()
            .init_resource::<NetIdAllocator>()
            .init_resource::<RpcOutbox>()
            .init_resource::<RpcInbox>();
    }
}

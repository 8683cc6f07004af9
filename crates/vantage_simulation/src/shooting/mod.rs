//! Shooting domain: authority-gated hit-scan fire
//!
//! Contains:
//! - HitScan, EquippedWeapon + FireBehavior strategy, HitVolume
//! - FireInput / HitScanRequest / HitScanResult events
//! - server-side handling of ServerRpc::Fire
//! - scene query backends (analytic volumes, Rapier)

pub mod components;
pub mod events;
pub mod systems;
pub mod trace;


pub use components::*;
pub use events::*;
pub use systems::*;
pub use trace::*;

use bevy::prelude::*;

use crate::GameplaySet;

/// Which world representation answers hit-scan traces
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SceneQueryBackend {
    /// `HitVolume` components, no physics needed (headless, tests)
    #[default]
    HitVolumes,
    /// bevy_rapier3d colliders; the host adds `RapierPhysicsPlugin`
    Rapier,
}

#[derive(Default)]
pub struct ShootingPlugin {
    pub backend: SceneQueryBackend,
}

impl Plugin for ShootingPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<FireInput>()
            .add_event::<HitScanRequest>()
            .add_event::<HitScanResult>();

        match self.backend {
            SceneQueryBackend::HitVolumes => {
                app.add_systems(
                    Update,
                    (handle_fire_input, receive_server_rpcs, resolve_hitscan_volumes, report_hitscan_results)
                        .chain()
                        .in_set(GameplaySet::Fire),
                );
            }
            SceneQueryBackend::Rapier => {
                app.add_systems(
                    Update,
                    (handle_fire_input, receive_server_rpcs, resolve_hitscan_rapier, report_hitscan_results)
                        .chain()
                        .in_set(GameplaySet::Fire),
                );
            }
        }
    }
}

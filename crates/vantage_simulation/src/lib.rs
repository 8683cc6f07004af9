//! Vantage Simulation Core
//!
//! Third-person character gameplay on Bevy 0.16 ECS: possession, input
//! routing, kinematic movement, first/third person view and
//! authority-gated hit-scan fire.
//!
//! Frame layout:
//! - Update: Spawn → Possession → Input → View → Fire → Camera (chained)
//! - FixedUpdate: kinematic movement chain + locomotion state

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

pub mod character;
pub mod config;
pub mod controller;
pub mod input;
pub mod logger;
pub mod movement;
pub mod net;
pub mod player;
pub mod session;
pub mod shared;
pub mod shooting;
pub mod view;

pub use character::{BodyRotation, Character, EyeHeight, LocomotionState, PhysicsBody};
pub use config::{ConfigError, GameplayConfig};
pub use controller::{ControllerPlugin, PlayerController, PossessionRequest};
pub use input::{ActionId, ActionValue, InputActionEvent, InputPlugin, TriggerPhase};
pub use logger::{init_logger, log, log_error, log_info, log_warning, set_log_level, set_logger, LogLevel, LogPrinter};
pub use movement::MovementPlugin;
pub use net::{pump_loopback, NetPlugin};
pub use player::{GameModePlugin, PlayerLogin, PlayerSpawned};
pub use shared::Rotator;
pub use shooting::{HitScanResult, SceneQueryBackend, ShootingPlugin};
pub use view::{CameraView, ViewMode, ViewPlugin};

/// Per-frame gameplay ordering (Update)
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameplaySet {
    /// Logins, spawning
    Spawn,
    /// Possession changes, stale handle cleanup
    Possession,
    /// Input actions → pawn
    Input,
    /// View mode toggles
    View,
    /// Fire dispatch, server calls, traces
    Fire,
    /// Resolved camera pose
    Camera,
}

/// Main simulation plugin (wires every subsystem)
pub struct SimulationPlugin {
    pub config: GameplayConfig,
    pub backend: SceneQueryBackend,
}

impl Default for SimulationPlugin {
    fn default() -> Self {
        Self {
            config: GameplayConfig::default(),
            backend: SceneQueryBackend::HitVolumes,
        }
    }
}

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            Update,
            (
                GameplaySet::Spawn,
                GameplaySet::Possession,
                GameplaySet::Input,
                GameplaySet::View,
                GameplaySet::Fire,
                GameplaySet::Camera,
            )
                .chain(),
        );

        let config = self.config.clone().or_default_if_invalid();

        app.insert_resource(Time::<Fixed>::from_hz(config.simulation.tick_hz))
            .insert_resource(DeterministicRng::new(config.simulation.seed))
            .insert_resource(config)
            .add_plugins((
                NetPlugin,
                ControllerPlugin,
                InputPlugin,
                MovementPlugin,
                ViewPlugin,
                ShootingPlugin { backend: self.backend },
                GameModePlugin,
            ));
    }
}

/// Seeded RNG resource
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Minimal headless App running the full simulation
///
/// Every `update()` advances time by exactly one fixed tick, so runs with
/// the same config and inputs are reproducible.
pub fn create_headless_app(config: GameplayConfig) -> App {
    init_logger();

    let config = config.or_default_if_invalid();
    let tick = Duration::from_secs_f64(1.0 / config.simulation.tick_hz);

    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(TimeUpdateStrategy::ManualDuration(tick))
        .add_plugins(SimulationPlugin {
            config,
            backend: SceneQueryBackend::HitVolumes,
        });

    app
}

/// Byte snapshot of every `T` in the world, ordered by entity index
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();
    entities.sort_by_key(|(entity, _)| entity.index());

    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}

//! Determinism tests
//!
//! Two headless runs with the same seed and scripted input must end in the
//! same world state.

use vantage_simulation::session::{run_scripted_session, spawn_target_ring, SessionStats};
use vantage_simulation::*;

const TICK_COUNT: u32 = 600;

/// Runs a scripted session and returns (stats, snapshot)
fn run_simulation(seed: u64) -> (SessionStats, Vec<u8>) {
    let mut config = GameplayConfig::default();
    config.simulation.seed = seed;

    let mut app = create_headless_app(config);
    spawn_target_ring(app.world_mut(), 8, 800.0);

    let stats = run_scripted_session(&mut app, TICK_COUNT);

    let world = app.world_mut();
    let mut snapshot = world_snapshot::<bevy::prelude::Transform>(world);
    snapshot.extend(world_snapshot::<PhysicsBody>(world));
    snapshot.extend(world_snapshot::<LocomotionState>(world));
    snapshot.extend(world_snapshot::<BodyRotation>(world));
    snapshot.extend(world_snapshot::<PlayerController>(world));
    snapshot.extend(world_snapshot::<ViewMode>(world));

    (stats, snapshot)
}

#[test]
fn test_determinism_same_seed() {
    const SEED: u64 = 12345;

    let first = run_simulation(SEED);
    let second = run_simulation(SEED);

    assert_eq!(first.0, second.0);
    assert_eq!(
        first.1, second.1,
        "Simulation with the same seed ({}) diverged",
        SEED
    );
}

#[test]
fn test_determinism_multiple_runs() {
    const SEED: u64 = 42;

    let snapshots: Vec<_> = (0..3).map(|_| run_simulation(SEED)).collect();

    for (i, snapshot) in snapshots.iter().enumerate().skip(1) {
        assert_eq!(snapshots[0], *snapshot, "Run {} differs from run 0", i);
    }
}

#[test]
fn test_different_seeds_diverge() {
    let (_, a) = run_simulation(1);
    let (_, b) = run_simulation(2);

    assert_ne!(a, b);
}

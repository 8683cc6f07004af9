//! Headless Vantage simulation
//!
//! Runs a seeded scripted session without rendering. Reads the gameplay
//! config from `VANTAGE_CONFIG` when set.

use vantage_simulation::session::{run_scripted_session, spawn_target_ring};
use vantage_simulation::{create_headless_app, log_info, world_snapshot, GameplayConfig, LocomotionState};

fn main() {
    let config = match std::env::var("VANTAGE_CONFIG") {
        Ok(path) => GameplayConfig::load_or_default(path),
        Err(_) => GameplayConfig::default(),
    };
    let seed = config.simulation.seed;

    let mut app = create_headless_app(config);
    log_info(&format!("Starting Vantage headless simulation (seed: {})", seed));

    spawn_target_ring(app.world_mut(), 8, 800.0);

    let stats = run_scripted_session(&mut app, 1200);

    let snapshot = world_snapshot::<LocomotionState>(app.world_mut());
    log_info(&format!(
        "Simulation complete: {} shots, {} hits, locomotion snapshot {} bytes",
        stats.shots,
        stats.hits,
        snapshot.len()
    ));
}

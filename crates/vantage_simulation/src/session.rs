//! Scripted headless session
//!
//! Drives one logged-in player with random input drawn from
//! `DeterministicRng`, so the same seed replays the same session.

use bevy::prelude::*;
use rand::Rng;

use crate::input::{ActionId, InputActionEvent, TriggerPhase};
use crate::logger;
use crate::net::ConnectionId;
use crate::player::PlayerLogin;
use crate::shooting::{HitScanResult, HitVolume};
use crate::{DeterministicRng, PlayerController};

/// Hit/miss tally of a session
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SessionStats {
    pub shots: u32,
    pub hits: u32,
}

fn tally_hitscan_results(mut results: EventReader<HitScanResult>, mut stats: ResMut<SessionStats>) {
    for result in results.read() {
        stats.shots += 1;
        if result.hit.is_some() {
            stats.hits += 1;
        }
    }
}

/// Ring of spherical targets around the origin
pub fn spawn_target_ring(world: &mut World, count: usize, radius: f32) {
    for i in 0..count {
        let angle = i as f32 / count as f32 * std::f32::consts::TAU;
        let position = Vec3::new(angle.cos() * radius, angle.sin() * radius, 64.0);
        world.spawn((Name::new(format!("Target {i}")), Transform::from_translation(position), HitVolume::sphere(60.0)));
    }
}

/// Log in the local player and return its controller
pub fn login_local_player(app: &mut App) -> Option<Entity> {
    app.world_mut().send_event(PlayerLogin {
        connection: ConnectionId::HOST,
    });
    app.update();

    let mut controllers = app.world_mut().query_filtered::<Entity, With<PlayerController>>();
    let controller = controllers.iter(app.world()).next();
    if controller.is_none() {
        logger::log_error("login produced no controller");
    }
    controller
}

/// One random frame of input for `controller`
fn random_inputs(rng: &mut impl Rng, controller: Entity) -> Vec<InputActionEvent> {
    let mut events = Vec::new();

    if rng.gen_bool(0.8) {
        let axis = Vec2::new(rng.gen_range(-1.0..=1.0), rng.gen_range(-1.0..=1.0));
        events.push(InputActionEvent::axis(controller, ActionId::Move, TriggerPhase::Triggered, axis));
    } else {
        events.push(InputActionEvent::axis(controller, ActionId::Move, TriggerPhase::Completed, Vec2::ZERO));
    }

    if rng.gen_bool(0.5) {
        let look = Vec2::new(rng.gen_range(-3.0..=3.0), rng.gen_range(-1.0..=1.0));
        events.push(InputActionEvent::axis(controller, ActionId::Look, TriggerPhase::Triggered, look));
    }

    // Release is left to the per-tick reset; a same-frame Completed would cancel the press
    if rng.gen_bool(0.02) {
        events.push(InputActionEvent::button(controller, ActionId::Jump, TriggerPhase::Started));
    }

    if rng.gen_bool(0.05) {
        events.push(InputActionEvent::button(controller, ActionId::Fire, TriggerPhase::Started));
        events.push(InputActionEvent::button(controller, ActionId::Fire, TriggerPhase::Completed));
    }

    if rng.gen_bool(0.01) {
        events.push(InputActionEvent::button(controller, ActionId::ToggleView, TriggerPhase::Started));
    }

    events
}

/// Run `ticks` frames of scripted input on a headless app
///
/// Logs in a player first; returns the shot tally.
pub fn run_scripted_session(app: &mut App, ticks: u32) -> SessionStats {
    app.init_resource::<SessionStats>()
        .add_systems(Update, tally_hitscan_results.after(crate::GameplaySet::Fire));

    let Some(controller) = login_local_player(app) else {
        return SessionStats::default();
    };

    for tick in 0..ticks {
        let events = {
            let mut rng = app.world_mut().resource_mut::<DeterministicRng>();
            random_inputs(&mut rng.rng, controller)
        };
        for event in events {
            app.world_mut().send_event(event);
        }
        app.update();

        if tick % 120 == 0 {
            let stats = *app.world().resource::<SessionStats>();
            logger::log_info(&format!("Tick {}: {} shots, {} hits", tick, stats.shots, stats.hits));
        }
    }

    *app.world().resource::<SessionStats>()
}

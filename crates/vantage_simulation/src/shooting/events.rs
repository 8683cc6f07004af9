//! Shooting events

use bevy::prelude::*;

/// Fire button edge, routed from input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FirePhase {
    Start,
    Stop,
}

/// Event: fire input for a possessed character
#[derive(Event, Debug, Clone, Copy)]
pub struct FireInput {
    pub pawn: Entity,
    pub phase: FirePhase,
}

/// Event: trace request (authority only)
///
/// Ephemeral. Resolved by the active scene query backend in the same frame.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct HitScanRequest {
    /// Excluded from the trace
    pub shooter: Entity,
    pub origin: Vec3,
    /// Unit direction
    pub direction: Vec3,
    pub max_range: f32,
}

/// First blocking hit along a trace
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceHit {
    pub entity: Entity,
    pub location: Vec3,
    pub distance: f32,
}

/// Event: trace outcome
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct HitScanResult {
    pub shooter: Entity,
    pub hit: Option<TraceHit>,
}

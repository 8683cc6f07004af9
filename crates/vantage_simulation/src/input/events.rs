//! Input action events
//!
//! Emitted by the host (the client maps keyboard/mouse; the headless runner
//! scripts them) and consumed by the input router.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Logical gameplay action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize)]
pub enum ActionId {
    Move,
    Look,
    Jump,
    Fire,
    ToggleView,
}

/// Where in its lifetime an action is
///
/// - Started: first frame of the press
/// - Triggered: every frame the action is active (axes)
/// - Completed: release
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize)]
pub enum TriggerPhase {
    Started,
    Triggered,
    Completed,
}

/// Action payload
#[derive(Debug, Clone, Copy, PartialEq, Reflect, Serialize, Deserialize)]
pub enum ActionValue {
    Digital(bool),
    Axis1D(f32),
    Axis2D(Vec2),
}

impl ActionValue {
    /// Value as a 2D axis (x for 1D, zero for digital)
    pub fn as_axis2d(self) -> Vec2 {
        match self {
            ActionValue::Digital(_) => Vec2::ZERO,
            ActionValue::Axis1D(x) => Vec2::new(x, 0.0),
            ActionValue::Axis2D(axis) => axis,
        }
    }
}

/// Event: one input action for a controller
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct InputActionEvent {
    pub controller: Entity,
    pub action: ActionId,
    pub phase: TriggerPhase,
    pub value: ActionValue,
}

impl InputActionEvent {
    pub fn axis(controller: Entity, action: ActionId, phase: TriggerPhase, axis: Vec2) -> Self {
        Self {
            controller,
            action,
            phase,
            value: ActionValue::Axis2D(axis),
        }
    }

    pub fn button(controller: Entity, action: ActionId, phase: TriggerPhase) -> Self {
        Self {
            controller,
            action,
            phase,
            value: ActionValue::Digital(phase != TriggerPhase::Completed),
        }
    }
}

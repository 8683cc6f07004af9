//! Controller components: control rotation + possession handle

use bevy::prelude::*;

use crate::config::LookTuning;
use crate::shared::Rotator;

/// Player controller. Owns the look ("control") rotation and drives at
/// most one character at a time
///
/// The pawn handle is set on possession and cleared on dispossession or
/// when the pawn despawns. Input routing uses it directly, no lookup by
/// type per event.
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
pub struct PlayerController {
    pub control_rotation: Rotator,
    pawn: Option<PawnHandle>,
}

impl PlayerController {
    /// Unpossessed controller looking along `control_rotation`
    pub fn new(control_rotation: Rotator) -> Self {
        Self {
            control_rotation,
            pawn: None,
        }
    }

    pub fn pawn(&self) -> Option<PawnHandle> {
        self.pawn
    }

    pub(crate) fn set_pawn(&mut self, pawn: Option<PawnHandle>) {
        self.pawn = pawn;
    }
}

/// Typed handle to a possessed character
///
/// Only the possession systems create these, so holding one means the
/// entity was a `Character` when it was possessed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub struct PawnHandle(Entity);

impl PawnHandle {
    pub(crate) fn new(entity: Entity) -> Self {
        Self(entity)
    }

    pub fn entity(self) -> Entity {
        self.0
    }
}

/// Back-reference on the character: the controller possessing it, if any
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct Possessor(pub Option<Entity>);

/// Look constraint policy, per character
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub enum LookConstraint {
    /// yaw/pitch accumulate freely
    #[default]
    Free,
    /// Look direction stays within `max_yaw_offset` of the body front;
    /// `pitch_limit` optionally bounds pitch relative to the body
    ClampedToBody {
        max_yaw_offset: f32,
        pitch_limit: Option<f32>,
    },
}

impl LookConstraint {
    pub fn from_tuning(tuning: &LookTuning) -> Self {
        if tuning.clamp_to_body {
            LookConstraint::ClampedToBody {
                max_yaw_offset: tuning.max_yaw_offset,
                pitch_limit: tuning.pitch_limit,
            }
        } else {
            LookConstraint::Free
        }
    }
}

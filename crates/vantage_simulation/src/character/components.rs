//! Character components: the controlled entity's state

use bevy::prelude::*;

use crate::controller::{LookConstraint, Possessor};
use crate::movement::{CharacterMovement, LastMovementInput, MovementInput};
use crate::net::NetRole;
use crate::shared::Rotator;
use crate::shooting::HitScan;
use crate::view::{CameraRig, CameraView, ViewMode};

/// Player/agent character, the entity a controller possesses
///
/// Pulls in the full state set through Required Components, so a bare
/// `Character` spawn is already movable, viewable and able to fire.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
#[require(
    Transform,
    PhysicsBody,
    BodyRotation,
    LocomotionState,
    EyeHeight,
    CharacterMovement,
    MovementInput,
    LastMovementInput,
    ViewMode,
    CameraRig,
    CameraView,
    Possessor,
    LookConstraint,
    NetRole,
    HitScan
)]
pub struct Character;

/// Velocity owned by the kinematic movement model (units/sec)
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct PhysicsBody {
    pub velocity: Vec3,
}

/// Body facing. Transform rotation is synced from this every tick.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct BodyRotation(pub Rotator);

/// Derived locomotion state (drives animation selection)
///
/// Recomputed every simulation tick from velocity, never persisted.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct LocomotionState {
    /// Horizontal speed (units/sec)
    pub ground_speed: f32,
    /// Jumping or falling
    pub in_air: bool,
}

/// Eye height above the character origin (hit-scan origin)
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct EyeHeight(pub f32);

impl Default for EyeHeight {
    fn default() -> Self {
        Self(64.0)
    }
}

impl EyeHeight {
    pub fn eye_location(&self, transform: &Transform) -> Vec3 {
        transform.translation + Vec3::new(0.0, 0.0, self.0)
    }
}

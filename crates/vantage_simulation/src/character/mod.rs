//! Character domain: the controlled entity
//!
//! Contains:
//! - Character (marker, pulls required components)
//! - PhysicsBody, BodyRotation, EyeHeight
//! - LocomotionState + aggregation system (ground speed, in-air)

pub mod components;
pub mod systems;

pub use components::*;
pub use systems::*;

//! Shared domain: cross-cutting types
//!
//! Contains:
//! - Rotator (yaw/pitch/roll degrees, Z-up conventions)
//! - interp_to (camera lag smoothing)

pub mod rotator;

pub use rotator::*;

//! Movement translator: 2D input axis + controller yaw → world impulses
//!
//! Axis layout: x = strafe (right positive), y = forward.

use bevy::prelude::*;

use super::components::{LastMovementInput, MovementInput};

/// Axis components at or below this magnitude count as no input
pub const INPUT_EPSILON: f32 = 1e-4;

/// Horizontal forward/right unit vectors for a yaw (degrees)
///
/// `right` is `forward` turned by +90° of yaw, the same way look input turns.
pub fn movement_basis(yaw: f32) -> (Vec3, Vec3) {
    let (sin, cos) = yaw.to_radians().sin_cos();
    let forward = Vec3::new(cos, sin, 0.0);
    let right = Vec3::new(-sin, cos, 0.0);
    (forward, right)
}

/// World-space movement vector for an axis at a yaw
pub fn world_move_vector(axis: Vec2, yaw: f32) -> Vec3 {
    let (forward, right) = movement_basis(yaw);
    forward * axis.y + right * axis.x
}

/// Feed a move axis into the character's movement input
///
/// Each axis is applied on its own and skipped when near zero. A near-zero
/// axis or a missing controller clears `LastMovementInput` and releases the
/// held input. Returns the combined world vector that was applied.
pub fn apply_move_input(
    axis: Vec2,
    control_yaw: Option<f32>,
    input: &mut MovementInput,
    last: &mut LastMovementInput,
) -> Vec3 {
    let Some(yaw) = control_yaw else {
        last.0 = Vec3::ZERO;
        input.release();
        return Vec3::ZERO;
    };

    if axis.is_nan() || axis.length() <= INPUT_EPSILON {
        last.0 = Vec3::ZERO;
        input.release();
        return Vec3::ZERO;
    }

    let (forward, right) = movement_basis(yaw);

    if axis.y.abs() > INPUT_EPSILON {
        input.add_input(forward, axis.y);
    }
    if axis.x.abs() > INPUT_EPSILON {
        input.add_input(right, axis.x);
    }

    let combined = forward * axis.y + right * axis.x;
    last.0 = combined;
    combined
}

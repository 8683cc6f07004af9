//! Look input → control rotation, with optional clamp to body facing

use bevy::prelude::*;

use super::components::LookConstraint;
use crate::shared::{normalize_axis, Rotator};

/// Apply a look axis: yaw += x, pitch += y
pub fn add_look_input(control: Rotator, axis: Vec2) -> Rotator {
    Rotator::new(control.yaw + axis.x, control.pitch + axis.y, control.roll).normalized()
}

/// Constrain a control rotation relative to body facing
///
/// delta = normalize(control - body); delta.yaw is clamped to
/// ±max_yaw_offset (pitch too when a limit is set); result = body + delta.
pub fn constrain_to_body(control: Rotator, body: Rotator, constraint: LookConstraint) -> Rotator {
    let LookConstraint::ClampedToBody {
        max_yaw_offset,
        pitch_limit,
    } = constraint
    else {
        return control;
    };

    let mut delta = (control - body).normalized();
    delta.yaw = delta.yaw.clamp(-max_yaw_offset, max_yaw_offset);
    if let Some(limit) = pitch_limit {
        delta.pitch = delta.pitch.clamp(-limit, limit);
    }

    (body + delta).normalized()
}

/// Signed yaw offset of the look direction from the body front
pub fn yaw_offset(control: Rotator, body: Rotator) -> f32 {
    normalize_axis(control.yaw - body.yaw)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLAMPED: LookConstraint = LookConstraint::ClampedToBody {
        max_yaw_offset: 90.0,
        pitch_limit: None,
    };

    #[test]
    fn test_look_input_accumulates() {
        let control = add_look_input(Rotator::ZERO, Vec2::new(10.0, -5.0));
        assert_eq!(control.yaw, 10.0);
        assert_eq!(control.pitch, -5.0);

        let control = add_look_input(control, Vec2::new(175.0, 0.0));
        assert_eq!(control.yaw, -175.0);
    }

    #[test]
    fn test_free_policy_is_identity() {
        let control = Rotator::new(170.0, 60.0, 0.0);
        let body = Rotator::from_yaw(-20.0);
        assert_eq!(constrain_to_body(control, body, LookConstraint::Free), control);
    }

    #[test]
    fn test_clamp_limits_yaw_offset() {
        let body = Rotator::from_yaw(0.0);

        let clamped = constrain_to_body(Rotator::from_yaw(135.0), body, CLAMPED);
        assert!((clamped.yaw - 90.0).abs() < 1e-4);

        let clamped = constrain_to_body(Rotator::from_yaw(-100.0), body, CLAMPED);
        assert!((clamped.yaw + 90.0).abs() < 1e-4);

        let inside = constrain_to_body(Rotator::from_yaw(45.0), body, CLAMPED);
        assert!((inside.yaw - 45.0).abs() < 1e-4);
    }

    #[test]
    fn test_clamp_across_wrap() {
        // Body faces 170°, look at -150° is 40° to the left across the wrap
        let body = Rotator::from_yaw(170.0);
        let clamped = constrain_to_body(Rotator::from_yaw(-150.0), body, CLAMPED);
        assert!((yaw_offset(clamped, body) - 40.0).abs() < 1e-3);

        // 200° off (via wrap = -160°) gets clamped to -90°
        let clamped = constrain_to_body(Rotator::from_yaw(10.0), body, CLAMPED);
        assert!((yaw_offset(clamped, body) + 90.0).abs() < 1e-3);
    }

    #[test]
    fn test_clamp_invariant_over_pairs() {
        for body_step in 0..36 {
            for control_step in 0..72 {
                let body = Rotator::from_yaw(body_step as f32 * 10.0 - 180.0);
                let control = Rotator::new(control_step as f32 * 10.0 - 360.0, 12.0, 0.0);

                let clamped = constrain_to_body(control, body, CLAMPED);
                let offset = yaw_offset(clamped, body);

                assert!(
                    offset >= -90.001 && offset <= 90.001,
                    "body={:?} control={:?} offset={}",
                    body,
                    control,
                    offset
                );
                // Pitch untouched without a limit
                assert!((clamped.pitch - 12.0).abs() < 1e-4);
            }
        }
    }

    #[test]
    fn test_optional_pitch_limit() {
        let constraint = LookConstraint::ClampedToBody {
            max_yaw_offset: 90.0,
            pitch_limit: Some(80.0),
        };
        let clamped = constrain_to_body(Rotator::new(0.0, 85.0, 0.0), Rotator::ZERO, constraint);
        assert!((clamped.pitch - 80.0).abs() < 1e-4);
    }
}

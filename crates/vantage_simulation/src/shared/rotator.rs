//! Rotator: yaw/pitch/roll in degrees, Z-up world
//!
//! Conventions:
//! - yaw rotates about +Z, yaw 0 looks down +X
//! - +Y is to the right of +X, so positive yaw turns right (left-handed
//!   frame; renderers with a right-handed Z-up frame mirror Y on display)
//! - positive pitch looks up (+Z)
//! - roll rotates about the forward axis

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// World up axis
pub const WORLD_UP: Vec3 = Vec3::Z;

/// Orientation in degrees (camera/control rotation, body facing)
#[derive(Debug, Clone, Copy, PartialEq, Default, Reflect, Serialize, Deserialize)]
pub struct Rotator {
    pub yaw: f32,
    pub pitch: f32,
    pub roll: f32,
}

impl Rotator {
    pub const ZERO: Self = Self {
        yaw: 0.0,
        pitch: 0.0,
        roll: 0.0,
    };

    pub const fn new(yaw: f32, pitch: f32, roll: f32) -> Self {
        Self { yaw, pitch, roll }
    }

    pub const fn from_yaw(yaw: f32) -> Self {
        Self::new(yaw, 0.0, 0.0)
    }

    /// Every axis wrapped into [-180, 180]
    pub fn normalized(self) -> Self {
        Self {
            yaw: normalize_axis(self.yaw),
            pitch: normalize_axis(self.pitch),
            roll: normalize_axis(self.roll),
        }
    }

    /// Yaw-only copy (movement basis, body facing)
    pub fn yaw_only(self) -> Self {
        Self::from_yaw(self.yaw)
    }

    /// Unit view direction
    pub fn forward(self) -> Vec3 {
        let (sy, cy) = self.yaw.to_radians().sin_cos();
        let (sp, cp) = self.pitch.to_radians().sin_cos();
        Vec3::new(cp * cy, cp * sy, sp)
    }

    /// World rotation with local +X as forward and +Z as up
    pub fn to_quat(self) -> Quat {
        Quat::from_rotation_z(self.yaw.to_radians())
            * Quat::from_rotation_y(-self.pitch.to_radians())
            * Quat::from_rotation_x(self.roll.to_radians())
    }
}

impl std::ops::Add for Rotator {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.yaw + rhs.yaw, self.pitch + rhs.pitch, self.roll + rhs.roll)
    }
}

impl std::ops::Sub for Rotator {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.yaw - rhs.yaw, self.pitch - rhs.pitch, self.roll - rhs.roll)
    }
}

/// Wrap an angle (degrees) into [-180, 180]
pub fn normalize_axis(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    if wrapped > 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}

/// Move `current` toward `target` by `dt * speed` of the remaining distance
///
/// speed <= 0 snaps to target (lag disabled).
pub fn interp_to(current: Vec3, target: Vec3, dt: f32, speed: f32) -> Vec3 {
    if speed <= 0.0 {
        return target;
    }

    let dist = target - current;
    if dist.length_squared() < 1e-8 {
        return target;
    }

    current + dist * (dt * speed).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_axis() {
        assert_eq!(normalize_axis(0.0), 0.0);
        assert_eq!(normalize_axis(190.0), -170.0);
        assert_eq!(normalize_axis(-190.0), 170.0);
        assert_eq!(normalize_axis(720.0), 0.0);
        assert_eq!(normalize_axis(180.0), 180.0);
    }

    #[test]
    fn test_forward_axes() {
        let forward = Rotator::ZERO.forward();
        assert!((forward - Vec3::X).length() < 1e-5);

        let left = Rotator::from_yaw(90.0).forward();
        assert!((left - Vec3::Y).length() < 1e-5);

        let up = Rotator::new(0.0, 90.0, 0.0).forward();
        assert!((up - Vec3::Z).length() < 1e-5);
    }

    #[test]
    fn test_quat_matches_forward() {
        let rotator = Rotator::new(35.0, -20.0, 0.0);
        let from_quat = rotator.to_quat() * Vec3::X;
        assert!((from_quat - rotator.forward()).length() < 1e-5);
    }

    #[test]
    fn test_interp_to() {
        let start = Vec3::ZERO;
        let target = Vec3::new(100.0, 0.0, 0.0);

        // 10/s * 0.05s = half the distance
        let step = interp_to(start, target, 0.05, 10.0);
        assert!((step.x - 50.0).abs() < 1e-4);

        // Overshooting step clamps to target
        assert_eq!(interp_to(start, target, 1.0, 10.0), target);

        // Lag disabled
        assert_eq!(interp_to(start, target, 0.01, 0.0), target);
    }
}

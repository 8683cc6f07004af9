//! Shooting components: built-in hit-scan, equipped weapon, hit volumes

use bevy::prelude::*;

use super::events::HitScanRequest;

/// Built-in hit-scan of a character (used when no weapon is equipped)
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct HitScan {
    /// Trace length (world units)
    pub max_range: f32,
}

impl Default for HitScan {
    fn default() -> Self {
        Self { max_range: 10_000.0 }
    }
}

/// Where a shot starts and where it points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aim {
    pub shooter: Entity,
    pub origin: Vec3,
    /// Unit direction
    pub direction: Vec3,
}

/// Fire strategy of an equipped weapon
///
/// Returned requests are traced only where the shooter has authority.
pub trait FireBehavior: Send + Sync + 'static {
    fn start_fire(&mut self, aim: &Aim) -> Option<HitScanRequest>;

    fn stop_fire(&mut self);
}

/// Weapon in hand; takes over fire start/stop from the built-in hit-scan
#[derive(Component)]
pub struct EquippedWeapon(pub Box<dyn FireBehavior>);

impl EquippedWeapon {
    pub fn new(behavior: impl FireBehavior) -> Self {
        Self(Box::new(behavior))
    }
}

/// Shape a hit-scan can strike when traced without a physics backend
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub enum HitShape {
    Sphere { radius: f32 },
    /// Oriented box, half extents in local space
    Box { half_extents: Vec3 },
}

/// Traceable volume, positioned by the entity's Transform
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct HitVolume(pub HitShape);

impl HitVolume {
    pub fn sphere(radius: f32) -> Self {
        Self(HitShape::Sphere { radius })
    }

    pub fn cuboid(half_extents: Vec3) -> Self {
        Self(HitShape::Box { half_extents })
    }
}

//! Analytic ray tests against hit volumes
//!
//! The ray is moved into the volume's local space (inverse affine), so the
//! returned parameter is a world distance along the unit world direction.

use bevy::prelude::*;

use super::components::{HitShape, HitVolume};
use super::events::{HitScanRequest, TraceHit};

const PARALLEL_EPSILON: f32 = 1e-8;

/// Entry distance of a local-space ray into a sphere at the origin
///
/// A ray starting inside reports 0.
fn ray_sphere(origin: Vec3, direction: Vec3, radius: f32) -> Option<f32> {
    let a = direction.length_squared();
    if a < PARALLEL_EPSILON {
        return None;
    }
    let b = 2.0 * origin.dot(direction);
    let c = origin.length_squared() - radius * radius;

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }

    let root = discriminant.sqrt();
    let near = (-b - root) / (2.0 * a);
    let far = (-b + root) / (2.0 * a);

    if far < 0.0 {
        None
    } else {
        Some(near.max(0.0))
    }
}

/// Slab test of a local-space ray against an axis-aligned box at the origin
fn ray_box(origin: Vec3, direction: Vec3, half_extents: Vec3) -> Option<f32> {
    let mut near = f32::NEG_INFINITY;
    let mut far = f32::INFINITY;

    for axis in 0..3 {
        let o = origin[axis];
        let d = direction[axis];
        let h = half_extents[axis];

        if d.abs() < PARALLEL_EPSILON {
            if o < -h || o > h {
                return None;
            }
            continue;
        }

        let t1 = (-h - o) / d;
        let t2 = (h - o) / d;
        near = near.max(t1.min(t2));
        far = far.min(t1.max(t2));
        if near > far {
            return None;
        }
    }

    if far < 0.0 {
        None
    } else {
        Some(near.max(0.0))
    }
}

/// Distance along a unit world ray to a volume placed by `transform`
pub fn ray_volume_distance(origin: Vec3, direction: Vec3, transform: &Transform, volume: &HitVolume) -> Option<f32> {
    let to_local = transform.compute_affine().inverse();
    let local_origin = to_local.transform_point3(origin);
    let local_direction = to_local.transform_vector3(direction);

    match volume.0 {
        HitShape::Sphere { radius } => ray_sphere(local_origin, local_direction, radius),
        HitShape::Box { half_extents } => ray_box(local_origin, local_direction, half_extents),
    }
}

/// Closest volume struck by the request, shooter excluded
pub fn trace_volumes<'a>(
    request: &HitScanRequest,
    volumes: impl IntoIterator<Item = (Entity, &'a Transform, &'a HitVolume)>,
) -> Option<TraceHit> {
    volumes
        .into_iter()
        .filter(|(entity, _, _)| *entity != request.shooter)
        .filter_map(|(entity, transform, volume)| {
            ray_volume_distance(request.origin, request.direction, transform, volume)
                .filter(|distance| *distance <= request.max_range)
                .map(|distance| (entity, distance))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(entity, distance)| TraceHit {
            entity,
            location: request.origin + request.direction * distance,
            distance,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(shooter: Entity, max_range: f32) -> HitScanRequest {
        HitScanRequest {
            shooter,
            origin: Vec3::ZERO,
            direction: Vec3::X,
            max_range,
        }
    }

    #[test]
    fn test_sphere_entry_distance() {
        let transform = Transform::from_xyz(500.0, 0.0, 0.0);
        let distance = ray_volume_distance(Vec3::ZERO, Vec3::X, &transform, &HitVolume::sphere(50.0));
        assert!((distance.unwrap() - 450.0).abs() < 1e-3);
    }

    #[test]
    fn test_sphere_behind_ray_missed() {
        let transform = Transform::from_xyz(-500.0, 0.0, 0.0);
        assert!(ray_volume_distance(Vec3::ZERO, Vec3::X, &transform, &HitVolume::sphere(50.0)).is_none());
    }

    #[test]
    fn test_ray_inside_sphere_hits_at_zero() {
        let distance = ray_volume_distance(Vec3::ZERO, Vec3::X, &Transform::IDENTITY, &HitVolume::sphere(10.0));
        assert_eq!(distance, Some(0.0));
    }

    #[test]
    fn test_rotated_box_uses_local_extents() {
        // Thin along local X, long along local Y; rotated 90° about Z it
        // presents its long side along world X
        let transform = Transform::from_xyz(0.0, 300.0, 0.0)
            .with_rotation(Quat::from_rotation_z(std::f32::consts::FRAC_PI_2));
        let volume = HitVolume::cuboid(Vec3::new(5.0, 100.0, 50.0));

        let along_y = ray_volume_distance(Vec3::ZERO, Vec3::Y, &transform, &volume).unwrap();
        assert!((along_y - 295.0).abs() < 1e-2);

        let offset_origin = Vec3::new(80.0, 0.0, 0.0);
        assert!(ray_volume_distance(offset_origin, Vec3::Y, &transform, &volume).is_some());
        let outside_origin = Vec3::new(120.0, 0.0, 0.0);
        assert!(ray_volume_distance(outside_origin, Vec3::Y, &transform, &volume).is_none());
    }

    #[test]
    fn test_trace_picks_closest_and_skips_shooter() {
        let shooter = Entity::from_raw(1);
        let near = Entity::from_raw(2);
        let far = Entity::from_raw(3);

        let shooter_tf = Transform::IDENTITY;
        let near_tf = Transform::from_xyz(200.0, 0.0, 0.0);
        let far_tf = Transform::from_xyz(800.0, 0.0, 0.0);
        let sphere = HitVolume::sphere(20.0);

        let volumes = [(shooter, &shooter_tf, &sphere), (far, &far_tf, &sphere), (near, &near_tf, &sphere)];

        let hit = trace_volumes(&request(shooter, 10_000.0), volumes).unwrap();
        assert_eq!(hit.entity, near);
        assert!((hit.distance - 180.0).abs() < 1e-3);
        assert!((hit.location - Vec3::new(180.0, 0.0, 0.0)).length() < 1e-3);
    }

    #[test]
    fn test_trace_respects_max_range() {
        let target = Entity::from_raw(2);
        let target_tf = Transform::from_xyz(800.0, 0.0, 0.0);
        let sphere = HitVolume::sphere(20.0);

        let hit = trace_volumes(&request(Entity::from_raw(1), 500.0), [(target, &target_tf, &sphere)]);
        assert!(hit.is_none());
    }
}

//! Simulation space → render space
//!
//! The simulation frame is left-handed (X forward, Y right, Z up). Bevy
//! renders right-handed, so everything crossing into a visual, the camera or
//! a gizmo is mirrored across the XZ plane. Input stays in simulation terms:
//! strafe right and positive yaw both turn toward screen right.

use bevy::prelude::*;

pub fn to_render_point(point: Vec3) -> Vec3 {
    Vec3::new(point.x, -point.y, point.z)
}

/// Same rotation seen through the Y mirror
pub fn to_render_rotation(rotation: Quat) -> Quat {
    Quat::from_xyzw(-rotation.x, rotation.y, -rotation.z, rotation.w)
}

pub fn to_render_transform(transform: &Transform) -> Transform {
    Transform {
        translation: to_render_point(transform.translation),
        rotation: to_render_rotation(transform.rotation),
        scale: transform.scale,
    }
}

/// Render camera pose at a simulation eye looking along a simulation direction
pub fn camera_pose(location: Vec3, direction: Vec3) -> Transform {
    Transform::from_translation(to_render_point(location)).looking_to(to_render_point(direction), Vec3::Z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vantage_simulation::movement::movement_basis;
    use vantage_simulation::Rotator;

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn test_simulation_right_is_screen_right() {
        for yaw in [0.0, 37.0, 90.0, -135.0] {
            let (forward, right) = movement_basis(yaw);
            let camera = camera_pose(Vec3::ZERO, forward);
            assert!(close(*camera.forward(), to_render_point(forward)));
            assert!(close(*camera.right(), to_render_point(right)), "yaw {yaw}");
        }
    }

    #[test]
    fn test_positive_yaw_turns_camera_right() {
        let before = camera_pose(Vec3::ZERO, Rotator::from_yaw(0.0).forward());
        let after = camera_pose(Vec3::ZERO, Rotator::from_yaw(10.0).forward());
        // Turning right moves the new view direction onto the old right side
        assert!(after.forward().dot(*before.right()) > 0.0);
    }

    #[test]
    fn test_rotation_mirror_matches_point_mirror() {
        let rotation = Rotator::new(63.0, -20.0, 0.0).to_quat();
        let sim = Transform::from_xyz(10.0, 20.0, 30.0).with_rotation(rotation);
        let render = to_render_transform(&sim);

        assert!(close(render.translation, Vec3::new(10.0, -20.0, 30.0)));
        for local in [Vec3::X, Vec3::Z, Vec3::new(1.0, 0.0, 2.0)] {
            let expected = to_render_point(sim.transform_point(local));
            assert!(close(render.transform_point(local), expected), "local {local}");
        }
    }
}

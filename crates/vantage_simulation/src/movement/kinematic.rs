//! Kinematic character controller
//!
//! Architecture:
//! - Custom velocity integration (no physics forces)
//! - Flat floor at `CharacterMovement::floor_z`
//! - Input → horizontal velocity, jump, gravity, floor contact
//! - Body yaw: orient to movement (rate limited) or follow controller yaw
//!
//! Determinism: everything runs in FixedUpdate with the fixed delta.

use bevy::prelude::*;

use super::components::{CharacterMovement, MovementInput};
use crate::character::{BodyRotation, PhysicsBody};
use crate::controller::{PlayerController, Possessor};
use crate::shared::normalize_axis;

/// Above the floor by more than this counts as airborne
pub const FLOOR_TOLERANCE: f32 = 0.01;

/// Floor contact from position and vertical velocity
pub fn detect_floor(transform: &Transform, body: &PhysicsBody, movement: &mut CharacterMovement) {
    let above_floor = transform.translation.z > movement.floor_z + FLOOR_TOLERANCE;
    movement.set_falling(above_floor || body.velocity.z > 0.0);
}

/// Held input → horizontal velocity
///
/// Input longer than 1 is clamped, so diagonals are not faster. The held
/// vector is read, not reset: every tick of a frame sees the same stick.
pub fn apply_input_to_velocity(input: &MovementInput, movement: &mut CharacterMovement, body: &mut PhysicsBody) {
    let raw = input.held();
    let acceleration = Vec3::new(raw.x, raw.y, 0.0).clamp_length_max(1.0);

    body.velocity.x = acceleration.x * movement.max_walk_speed;
    body.velocity.y = acceleration.y * movement.max_walk_speed;
    movement.set_last_acceleration(acceleration);
}

/// Start a jump if one is pressed and the character stands on the floor
///
/// The request is cleared every tick: one jump per press, none in the air.
pub fn apply_jump(movement: &mut CharacterMovement, body: &mut PhysicsBody) -> bool {
    let jumped = movement.is_jump_pressed() && !movement.is_falling();
    if jumped {
        body.velocity.z = movement.jump_z_velocity;
        movement.set_falling(true);
    }
    movement.stop_jumping();
    jumped
}

pub fn apply_gravity_step(movement: &CharacterMovement, body: &mut PhysicsBody, delta: f32) {
    if movement.is_falling() {
        body.velocity.z += movement.gravity_z * delta;
    }
}

/// position += velocity * dt, then resolve floor contact
pub fn integrate_step(transform: &mut Transform, body: &mut PhysicsBody, movement: &mut CharacterMovement, delta: f32) {
    transform.translation += body.velocity * delta;

    if transform.translation.z <= movement.floor_z && body.velocity.z <= 0.0 {
        transform.translation.z = movement.floor_z;
        body.velocity.z = 0.0;
        movement.set_falling(false);
    }
}

/// Rotate `current` toward `target` yaw by at most `max_step` degrees
pub fn turn_toward(current: f32, target: f32, max_step: f32) -> f32 {
    let delta = normalize_axis(target - current);
    if delta.abs() <= max_step {
        normalize_axis(target)
    } else {
        normalize_axis(current + max_step * delta.signum())
    }
}

/// System: floor detection (start of tick)
pub fn ground_detection(mut query: Query<(&Transform, &PhysicsBody, &mut CharacterMovement)>) {
    for (transform, body, mut movement) in query.iter_mut() {
        detect_floor(transform, body, &mut movement);
    }
}

/// System: held MovementInput → horizontal velocity
pub fn apply_movement_input(mut query: Query<(&MovementInput, &mut CharacterMovement, &mut PhysicsBody)>) {
    for (input, mut movement, mut body) in query.iter_mut() {
        apply_input_to_velocity(input, &mut movement, &mut body);
    }
}

/// System (Update, after input routing): latch this frame's move input
///
/// A pawn nobody possesses holds no input.
pub fn latch_movement_input(mut query: Query<(&Possessor, &mut MovementInput)>) {
    for (possessor, mut input) in query.iter_mut() {
        if possessor.0.is_some() {
            input.latch();
        } else {
            input.release();
        }
    }
}

/// System: pending jump → vertical velocity
pub fn apply_jumps(mut query: Query<(Entity, &mut CharacterMovement, &mut PhysicsBody)>) {
    for (entity, mut movement, mut body) in query.iter_mut() {
        if apply_jump(&mut movement, &mut body) {
            crate::logger::log(&format!("Character {:?} jumped", entity));
        }
    }
}

/// System: gravity while airborne
pub fn apply_gravity(mut query: Query<(&CharacterMovement, &mut PhysicsBody)>, time: Res<Time<Fixed>>) {
    let delta = time.delta_secs();

    for (movement, mut body) in query.iter_mut() {
        apply_gravity_step(movement, &mut body, delta);
    }
}

/// System: velocity → Transform (headless integration, no physics solver)
pub fn integrate_velocity_to_transform(
    mut query: Query<(&mut Transform, &mut PhysicsBody, &mut CharacterMovement)>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (mut transform, mut body, mut movement) in query.iter_mut() {
        integrate_step(&mut transform, &mut body, &mut movement, delta);
    }
}

/// System: body yaw policy
///
/// - use_controller_yaw: copy the possessing controller's yaw
/// - orient_rotation_to_movement: turn toward the last input direction at
///   `rotation_rate_yaw`
pub fn update_body_rotation(
    mut query: Query<(&CharacterMovement, &mut BodyRotation, &Possessor)>,
    controllers: Query<&PlayerController>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (movement, mut body, possessor) in query.iter_mut() {
        if movement.use_controller_yaw {
            let Some(controller) = possessor.0.and_then(|c| controllers.get(c).ok()) else {
                continue;
            };
            if body.0.yaw != controller.control_rotation.yaw {
                body.0.yaw = controller.control_rotation.yaw;
            }
            continue;
        }

        let acceleration = movement.last_acceleration();
        if !movement.orient_rotation_to_movement || acceleration.length_squared() < 1e-8 {
            continue;
        }

        let target = acceleration.y.atan2(acceleration.x).to_degrees();
        body.0.yaw = turn_toward(body.0.yaw, target, movement.rotation_rate_yaw * delta);
    }
}

/// System: BodyRotation → Transform rotation
pub fn sync_body_transform(mut query: Query<(&BodyRotation, &mut Transform), Changed<BodyRotation>>) {
    for (body, mut transform) in query.iter_mut() {
        transform.rotation = body.0.yaw_only().to_quat();
    }
}

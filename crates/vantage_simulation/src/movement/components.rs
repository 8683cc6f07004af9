//! Movement components: kinematic model state + accumulated input

use bevy::prelude::*;

use crate::config::MovementTuning;

/// Kinematic character movement
///
/// Owns locomotion: walk speed, jump, gravity, flat-floor contact and body
/// orientation policy. The rest of the layer only talks to it through
/// `MovementInput`, `jump`/`stop_jumping` and `is_falling`.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct CharacterMovement {
    /// Horizontal speed at full input (units/sec)
    pub max_walk_speed: f32,
    /// Initial vertical speed of a jump (units/sec)
    pub jump_z_velocity: f32,
    /// Gravity acceleration (units/sec², negative = down)
    pub gravity_z: f32,
    /// Max body turn rate when orienting to movement (deg/sec)
    pub rotation_rate_yaw: f32,
    /// Height of the walkable floor
    pub floor_z: f32,
    /// Body turns toward the input direction (third person)
    pub orient_rotation_to_movement: bool,
    /// Body yaw copies the controller yaw (first person)
    pub use_controller_yaw: bool,
    falling: bool,
    jump_pressed: bool,
    /// Input direction consumed on the last tick (clamped to length 1)
    last_acceleration: Vec3,
}

impl Default for CharacterMovement {
    fn default() -> Self {
        Self::from_tuning(&MovementTuning::default())
    }
}

impl CharacterMovement {
    pub fn from_tuning(tuning: &MovementTuning) -> Self {
        Self {
            max_walk_speed: tuning.max_walk_speed,
            jump_z_velocity: tuning.jump_z_velocity,
            gravity_z: tuning.gravity_z,
            rotation_rate_yaw: tuning.rotation_rate_yaw,
            floor_z: tuning.floor_z,
            orient_rotation_to_movement: true,
            use_controller_yaw: false,
            falling: false,
            jump_pressed: false,
            last_acceleration: Vec3::ZERO,
        }
    }

    /// Unsupported (jumping or falling)
    pub fn is_falling(&self) -> bool {
        self.falling
    }

    pub fn set_falling(&mut self, falling: bool) {
        self.falling = falling;
    }

    /// Jump start: request a jump on the next tick
    pub fn jump(&mut self) {
        self.jump_pressed = true;
    }

    /// Jump stop: drop a pending request
    pub fn stop_jumping(&mut self) {
        self.jump_pressed = false;
    }

    pub fn is_jump_pressed(&self) -> bool {
        self.jump_pressed
    }

    pub fn last_acceleration(&self) -> Vec3 {
        self.last_acceleration
    }

    pub(crate) fn set_last_acceleration(&mut self, acceleration: Vec3) {
        self.last_acceleration = acceleration;
    }
}

/// Movement input held between simulation ticks
///
/// The translator adds world-space impulses during a frame (`pending`).
/// Latching at the end of input routing turns a frame's sum into the held
/// vector, which every tick reads until the next frame with input replaces
/// it or a release clears it. Tick count per frame has no effect on speed.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct MovementInput {
    pending: Vec3,
    fresh: bool,
    held: Vec3,
}

impl MovementInput {
    /// Add `direction * scale`; zero scale is ignored
    pub fn add_input(&mut self, direction: Vec3, scale: f32) {
        if scale != 0.0 {
            self.pending += direction * scale;
            self.fresh = true;
        }
    }

    /// Input added this frame, not yet latched
    pub fn pending(&self) -> Vec3 {
        self.pending
    }

    /// Input the kinematic model applies each tick
    pub fn held(&self) -> Vec3 {
        self.held
    }

    /// Frame with input: pending replaces held. Frame without: held stays.
    pub fn latch(&mut self) {
        if self.fresh {
            self.held = self.pending;
        }
        self.pending = Vec3::ZERO;
        self.fresh = false;
    }

    /// Stick released: drop pending and held input
    pub fn release(&mut self) {
        *self = Self::default();
    }
}

/// Last world-space movement vector produced by the translator
///
/// Zero when the last move input was released or near zero. Read by
/// animation/presentation.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct LastMovementInput(pub Vec3);

//! View components: view mode, camera rig, resolved camera view

use bevy::prelude::*;

use crate::config::{CameraTuning, FirstPersonBodyPolicy};
use crate::shared::Rotator;

/// Camera view mode of a character
///
/// # Toggle
/// - single toggle input flips the mode, no guards, no blending
/// - ThirdPerson: trailing arm behind the character
/// - FirstPerson: camera on the head, arm collapsed
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub enum ViewMode {
    #[default]
    ThirdPerson,
    FirstPerson,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::ThirdPerson => ViewMode::FirstPerson,
            ViewMode::FirstPerson => ViewMode::ThirdPerson,
        }
    }
}

/// Where the camera hangs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
pub enum CameraAnchor {
    /// End of the trailing arm
    #[default]
    ArmSocket,
    /// Head attachment point on the character
    HeadSocket,
}

/// Camera rig parameters (arm + camera attachment)
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub struct CameraRig {
    /// Current follow distance
    pub arm_length: f32,
    /// Follow distance restored when entering third person
    pub default_arm_length: f32,
    /// Arm rotates with the controller's control rotation
    pub arm_uses_control_rotation: bool,
    /// Camera itself takes the control rotation (first person)
    pub camera_uses_control_rotation: bool,
    pub anchor: CameraAnchor,
    pub head_socket_offset: Vec3,
    /// Positional lag of the arm pivot
    pub lag_enabled: bool,
    pub lag_speed: f32,
    pub first_person_body: FirstPersonBodyPolicy,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::from_tuning(&CameraTuning::default())
    }
}

impl CameraRig {
    /// Third-person rig built from tuning
    pub fn from_tuning(tuning: &CameraTuning) -> Self {
        Self {
            arm_length: tuning.arm_length,
            default_arm_length: tuning.arm_length,
            arm_uses_control_rotation: true,
            camera_uses_control_rotation: false,
            anchor: CameraAnchor::ArmSocket,
            head_socket_offset: tuning.head_socket_offset,
            lag_enabled: tuning.camera_lag,
            lag_speed: tuning.camera_lag_speed,
            first_person_body: tuning.first_person_body,
        }
    }

    pub fn enter_first_person(&mut self) {
        self.arm_length = 0.0;
        self.camera_uses_control_rotation = true;
        self.anchor = CameraAnchor::HeadSocket;
    }

    pub fn enter_third_person(&mut self) {
        self.arm_length = self.default_arm_length;
        self.camera_uses_control_rotation = false;
        self.anchor = CameraAnchor::ArmSocket;
    }

    /// View rotation follows the controller (either via arm or camera)
    pub fn follows_control_rotation(&self) -> bool {
        match self.anchor {
            CameraAnchor::ArmSocket => self.arm_uses_control_rotation || self.camera_uses_control_rotation,
            CameraAnchor::HeadSocket => self.camera_uses_control_rotation,
        }
    }
}

/// Resolved camera pose, recomputed every frame
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct CameraView {
    pub location: Vec3,
    pub rotation: Rotator,
    /// Lagged arm pivot; reset when the anchor changes
    pub(crate) lagged_pivot: Option<Vec3>,
    pub(crate) anchor: CameraAnchor,
}

/// Event: toggle first/third person
#[derive(Event, Debug, Clone, Copy)]
pub struct ToggleViewIntent {
    pub pawn: Entity,
}

//! Player spawn helpers
//!
//! Build the default character and controller from `GameplayConfig`.

use bevy::prelude::*;

use crate::character::{BodyRotation, Character, EyeHeight};
use crate::config::GameplayConfig;
use crate::controller::{LookConstraint, PlayerController};
use crate::movement::CharacterMovement;
use crate::shared::Rotator;
use crate::shooting::HitScan;
use crate::view::CameraRig;

/// Default character with tunings taken from config
///
/// Everything not listed here comes from `Character`'s required components.
/// Net identity (NetId, NetOwner, NetRole) is added by the caller.
pub fn character_bundle(config: &GameplayConfig, position: Vec3, yaw: f32) -> impl Bundle {
    let facing = Rotator::from_yaw(yaw);

    (
        Character,
        Transform::from_translation(position).with_rotation(facing.to_quat()),
        BodyRotation(facing),
        EyeHeight(config.fire.base_eye_height),
        CharacterMovement::from_tuning(&config.movement),
        CameraRig::from_tuning(&config.camera),
        LookConstraint::from_tuning(&config.look),
        HitScan {
            max_range: config.fire.max_range,
        },
    )
}

/// Spawn the default character
///
/// # Returns
/// Entity of the new character (unpossessed)
pub fn spawn_player_character(commands: &mut Commands, config: &GameplayConfig, position: Vec3, yaw: f32) -> Entity {
    commands.spawn(character_bundle(config, position, yaw)).id()
}

/// Spawn a controller with no pawn, looking along `yaw`
pub fn spawn_player_controller(commands: &mut Commands, yaw: f32) -> Entity {
    commands.spawn(PlayerController::new(Rotator::from_yaw(yaw))).id()
}

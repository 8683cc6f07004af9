//! Gameplay tuning, loaded from a RON file
//!
//! Every field has a default matching the shipped character setup, so a
//! missing or broken file never blocks startup (`load_or_default`).

use std::path::Path;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::logger;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: ron::error::SpannedError,
    },
    #[error("invalid config {path}: {reason}")]
    Invalid { path: String, reason: String },
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] ron::Error),
}

/// Accepted FixedUpdate rates; NaN and infinities fall outside
pub const TICK_HZ_RANGE: std::ops::RangeInclusive<f64> = 1.0..=1000.0;

/// All tunable gameplay parameters
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameplayConfig {
    pub simulation: SimulationTuning,
    pub movement: MovementTuning,
    pub camera: CameraTuning,
    pub look: LookTuning,
    pub fire: FireTuning,
}

impl Default for GameplayConfig {
    fn default() -> Self {
        Self {
            simulation: SimulationTuning::default(),
            movement: MovementTuning::default(),
            camera: CameraTuning::default(),
            look: LookTuning::default(),
            fire: FireTuning::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationTuning {
    /// FixedUpdate rate
    pub tick_hz: f64,
    /// Seed for the scripted headless session
    pub seed: u64,
}

impl Default for SimulationTuning {
    fn default() -> Self {
        Self {
            tick_hz: 60.0,
            seed: 42,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementTuning {
    pub max_walk_speed: f32,
    pub jump_z_velocity: f32,
    pub gravity_z: f32,
    /// Body turn rate when orienting to movement (deg/s)
    pub rotation_rate_yaw: f32,
    /// Height of the flat floor the kinematic model stands on
    pub floor_z: f32,
}

impl Default for MovementTuning {
    fn default() -> Self {
        Self {
            max_walk_speed: 600.0,
            jump_z_velocity: 420.0,
            gravity_z: -980.0,
            rotation_rate_yaw: 540.0,
            floor_z: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect, Serialize, Deserialize)]
pub enum FirstPersonBodyPolicy {
    /// Body yaw snaps to and then tracks the controller yaw
    #[default]
    FollowControlYaw,
    /// Body keeps turning toward movement direction
    FollowMovement,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraTuning {
    pub arm_length: f32,
    pub camera_lag: bool,
    pub camera_lag_speed: f32,
    /// Head attachment point relative to the character origin
    pub head_socket_offset: Vec3,
    pub first_person_body: FirstPersonBodyPolicy,
}

impl Default for CameraTuning {
    fn default() -> Self {
        Self {
            arm_length: 300.0,
            camera_lag: true,
            camera_lag_speed: 10.0,
            head_socket_offset: Vec3::new(0.0, 0.0, 70.0),
            first_person_body: FirstPersonBodyPolicy::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LookTuning {
    /// Keep the look direction within `max_yaw_offset` of the body front
    pub clamp_to_body: bool,
    pub max_yaw_offset: f32,
    /// Pitch limit used by the clamp; `None` leaves pitch free
    pub pitch_limit: Option<f32>,
}

impl Default for LookTuning {
    fn default() -> Self {
        Self {
            clamp_to_body: false,
            max_yaw_offset: 90.0,
            pitch_limit: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FireTuning {
    pub max_range: f32,
    pub base_eye_height: f32,
}

impl Default for FireTuning {
    fn default() -> Self {
        Self {
            max_range: 10_000.0,
            base_eye_height: 64.0,
        }
    }
}

impl GameplayConfig {
    pub fn from_ron(contents: &str, origin: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(contents).map_err(|source| ConfigError::Parse {
            path: origin.to_string(),
            source,
        })?;
        config.validate(origin)?;
        Ok(config)
    }

    /// Reject values the app cannot start with
    pub fn validate(&self, origin: &str) -> Result<(), ConfigError> {
        let tick_hz = self.simulation.tick_hz;
        if !TICK_HZ_RANGE.contains(&tick_hz) {
            return Err(ConfigError::Invalid {
                path: origin.to_string(),
                reason: format!(
                    "simulation.tick_hz must be within {}..={}, got {tick_hz}",
                    TICK_HZ_RANGE.start(),
                    TICK_HZ_RANGE.end()
                ),
            });
        }
        Ok(())
    }

    /// This config if valid, otherwise defaults (with a warning)
    pub fn or_default_if_invalid(self) -> Self {
        match self.validate("<in-memory>") {
            Ok(()) => self,
            Err(err) => {
                logger::log_warning(&format!("{err}; using default gameplay config"));
                Self::default()
            }
        }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_ron(&contents, &path.display().to_string())
    }

    /// Load from file; any failure logs a warning and yields defaults
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(err) => {
                logger::log_warning(&format!("{err}; using default gameplay config"));
                Self::default()
            }
        }
    }

    pub fn to_ron(&self) -> Result<String, ConfigError> {
        Ok(ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?)
    }
}

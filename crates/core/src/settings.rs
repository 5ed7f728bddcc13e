//! Settings - persisted game configuration
//!
//! Stored as camelCase JSON. The simulation reads a `Settings` value when a
//! session starts and never writes it back.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::shapes::BlockSet;
use crate::types::{
    Shaft, DEFAULT_ANIMATION_DURATION, DEFAULT_FALLING_SPEED, DEFAULT_SHAFT_SIZE_X,
    DEFAULT_SHAFT_SIZE_Y, DEFAULT_SHAFT_SIZE_Z,
};

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to access settings file: {0}")]
    Io(#[from] io::Error),
    #[error("malformed settings: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid setting {field}: {reason}")]
    Invalid {
        field: &'static str,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub shaft_size_x: i32,
    pub shaft_size_y: i32,
    pub shaft_size_z: i32,
    /// Seconds per gravity step
    pub falling_speed: f32,
    /// Seconds per piece transition
    pub animation_duration: f32,
    /// Start with gravity suspended
    pub paused: bool,
    pub block_set: BlockSet,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            shaft_size_x: DEFAULT_SHAFT_SIZE_X,
            shaft_size_y: DEFAULT_SHAFT_SIZE_Y,
            shaft_size_z: DEFAULT_SHAFT_SIZE_Z,
            falling_speed: DEFAULT_FALLING_SPEED,
            animation_duration: DEFAULT_ANIMATION_DURATION,
            paused: false,
            block_set: BlockSet::default(),
        }
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> SettingsError {
    SettingsError::Invalid {
        field,
        reason: reason.into(),
    }
}

impl Settings {
    pub fn shaft(&self) -> Shaft {
        Shaft::new(self.shaft_size_x, self.shaft_size_y, self.shaft_size_z)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        for (field, size) in [
            ("shaftSizeX", self.shaft_size_x),
            ("shaftSizeY", self.shaft_size_y),
            ("shaftSizeZ", self.shaft_size_z),
        ] {
            if size <= 0 {
                return Err(invalid(field, format!("must be positive, got {size}")));
            }
        }
        if !(self.falling_speed.is_finite() && self.falling_speed > 0.0) {
            return Err(invalid(
                "fallingSpeed",
                format!("must be a positive number of seconds, got {}", self.falling_speed),
            ));
        }
        if !(self.animation_duration.is_finite() && self.animation_duration >= 0.0) {
            return Err(invalid(
                "animationDuration",
                format!("must not be negative, got {}", self.animation_duration),
            ));
        }
        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load from `path`, falling back to defaults if the file does not exist
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(json) => Self::from_json(&json),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                log::info!("no settings at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(err) => Err(err.into()),
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        self.validate()?;
        fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

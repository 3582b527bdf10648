//! Session configuration.
//!
//! Every field is optional in the JSON form and falls back to the constants in
//! `tick-tetris-types`.
//!
//! ```
//! use tick_tetris_engine::SessionConfig;
//!
//! let config = SessionConfig::from_json_str(r#"{ "refresh_hz": 144, "seed": 7 }"#).unwrap();
//! assert_eq!(config.refresh_hz, Some(144));
//! assert_eq!(config.move_update_interval_ms, 150);
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::input::InputConfig;
use crate::types::{
    MOVE_UPDATE_INTERVAL_MS, STICK_DEADZONE, STICK_DIRECTION_THRESHOLD,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("move_update_interval_ms must be positive")]
    ZeroMoveInterval,
    #[error("stick_deadzone must be between 0 and 32766, got {0}")]
    Deadzone(i16),
    #[error("stick_direction_threshold must be within (0, 1), got {0}")]
    DirectionThreshold(f32),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    /// Display refresh rate; `None` or `<= 1` uses the default
    pub refresh_hz: Option<u32>,
    pub move_update_interval_ms: u32,
    pub stick_deadzone: i16,
    pub stick_direction_threshold: f32,
    /// Piece RNG seed; hosts pick one when absent
    pub seed: Option<u32>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            refresh_hz: None,
            move_update_interval_ms: MOVE_UPDATE_INTERVAL_MS,
            stick_deadzone: STICK_DEADZONE,
            stick_direction_threshold: STICK_DIRECTION_THRESHOLD,
            seed: None,
        }
    }
}

impl SessionConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: SessionConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.move_update_interval_ms == 0 {
            return Err(ConfigError::ZeroMoveInterval);
        }
        if !(0..i16::MAX).contains(&self.stick_deadzone) {
            return Err(ConfigError::Deadzone(self.stick_deadzone));
        }
        let threshold = self.stick_direction_threshold;
        if !(threshold > 0.0 && threshold < 1.0) {
            return Err(ConfigError::DirectionThreshold(threshold));
        }
        Ok(())
    }

    pub fn move_update_interval(&self) -> Duration {
        Duration::from_millis(self.move_update_interval_ms as u64)
    }

    pub fn input_config(&self) -> InputConfig {
        InputConfig {
            stick_deadzone: self.stick_deadzone,
            direction_threshold: self.stick_direction_threshold,
        }
    }
}

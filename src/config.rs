//! Tunables for a session.
//!
//! Read from the JSON file named by `PIXEL_DASH_CONFIG` when set; every field
//! is optional and falls back to the defaults below.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::compute::DEFAULT_DIRECTION_CHANGE_PERCENT;
use crate::entities::{DEFAULT_SPEED, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::error::InitError;

/// Environment variable holding the config file path.
pub const CONFIG_ENV_VAR: &str = "PIXEL_DASH_CONFIG";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Fixed sleep between frames, in milliseconds.
    pub frame_delay_ms: u64,
    /// Pixels per frame for both player and enemy.
    pub speed: i32,
    /// Per-frame chance (0–100) that the enemy picks a new heading.
    pub direction_change_percent: u32,
    /// RNG seed; drawn from the clock when absent.
    pub seed: Option<u64>,
    /// Stop after this many frames.
    pub max_frames: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            frame_delay_ms: 30,
            speed: DEFAULT_SPEED,
            direction_change_percent: DEFAULT_DIRECTION_CHANGE_PERCENT,
            seed: None,
            max_frames: None,
        }
    }
}

/// Fastest allowed speed: the short side of the playfield per frame.
pub const MAX_SPEED: i32 = if SCREEN_WIDTH < SCREEN_HEIGHT {
    SCREEN_WIDTH
} else {
    SCREEN_HEIGHT
};

impl GameConfig {
    pub fn frame_delay(&self) -> Duration {
        Duration::from_millis(self.frame_delay_ms)
    }

    pub fn validate(&self) -> Result<(), InitError> {
        if self.speed <= 0 {
            return Err(InitError::ConfigInvalid(format!(
                "speed must be positive, got {}",
                self.speed
            )));
        }
        if self.speed > MAX_SPEED {
            return Err(InitError::ConfigInvalid(format!(
                "speed must be at most {}, got {}",
                MAX_SPEED, self.speed
            )));
        }
        if self.direction_change_percent > 100 {
            return Err(InitError::ConfigInvalid(format!(
                "direction_change_percent must be at most 100, got {}",
                self.direction_change_percent
            )));
        }
        Ok(())
    }

    /// Parse and validate a config file.
    pub fn from_file(path: &Path) -> Result<Self, InitError> {
        let json = std::fs::read_to_string(path).map_err(|source| InitError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&json).map_err(|source| InitError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Config from `PIXEL_DASH_CONFIG`, or the defaults when it is unset.
    pub fn load() -> Result<Self, InitError> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::from_file(Path::new(&path)),
            None => {
                log::info!("Using default config");
                Ok(Self::default())
            }
        }
    }
}

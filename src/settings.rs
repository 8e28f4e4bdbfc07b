//! Game settings
//!
//! Startup parameters for a session, read from a JSON file. Balance data
//! (per-level spawn tables) lives separately in `tuning`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::sim::{BASE_SPEED, FALLBACK_INTERVAL, MAX_LEVEL, SPAWN_PADDING};
use crate::tuning::ConfigError;

/// Session settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Player ===
    /// Level a new session starts at
    pub starting_level: u32,
    /// Movement speed at the starting level
    pub starting_speed: f32,

    // === Spawning ===
    /// Distance inside the view edge for spawns (fraction of the view)
    pub spawn_padding: f32,
    /// Wait used for levels missing from the tuning table (seconds)
    pub fallback_interval: f32,
    /// Fixed RNG seed; random when absent
    pub seed: Option<u64>,

    // === Files ===
    /// Where high scores are stored
    pub save_path: PathBuf,
    /// Optional tuning document; built-in table when absent
    pub tuning_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            starting_level: 1,
            starting_speed: BASE_SPEED,

            spawn_padding: SPAWN_PADDING,
            fallback_interval: FALLBACK_INTERVAL,
            seed: None,

            save_path: PathBuf::from("crayonfish_save.json"),
            tuning_path: None,
        }
    }
}

impl Settings {
    /// Starting level clamped into the playable range
    pub fn effective_starting_level(&self) -> u32 {
        self.starting_level.clamp(1, MAX_LEVEL)
    }

    /// Padding clamped so opposite edges never cross
    pub fn effective_spawn_padding(&self) -> f32 {
        if self.spawn_padding.is_finite() {
            self.spawn_padding.clamp(0.0, 0.5)
        } else {
            SPAWN_PADDING
        }
    }

    /// Fallback interval, replaced by the default when not a positive number
    pub fn effective_fallback_interval(&self) -> f32 {
        if self.fallback_interval.is_finite() && self.fallback_interval > 0.0 {
            self.fallback_interval
        } else {
            FALLBACK_INTERVAL
        }
    }

    /// Parse settings from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load settings from a file
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings, falling back to defaults on any error
    pub fn load(path: Option<&Path>) -> Self {
        match path.map(Self::load_from) {
            Some(Ok(settings)) => settings,
            Some(Err(e)) => {
                log::warn!("{e}; using default settings");
                Self::default()
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }
}

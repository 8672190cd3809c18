//! Application configuration: a JSON file, overridable from the command line.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use tactrainer_core::constants::DEFAULT_RETURN_DECAY_SECS;
use tactrainer_core::state::SystemStates;
use tactrainer_sim::engine::SimConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Top-level application configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Platform catalog JSON.
    pub platforms: Option<PathBuf>,
    /// Weapon catalog JSON.
    pub weapons: Option<PathBuf>,
    /// Scenario to start with instead of the default ownship.
    pub scenario: Option<PathBuf>,
    pub sim: SimSettings,
}

/// Engine settings as they appear in the config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimSettings {
    pub time_scale: f64,
    pub return_decay_secs: f64,
    pub systems: SystemStates,
}

impl Default for SimSettings {
    fn default() -> Self {
        Self {
            time_scale: 1.0,
            return_decay_secs: DEFAULT_RETURN_DECAY_SECS,
            systems: SystemStates::default(),
        }
    }
}

impl From<&SimSettings> for SimConfig {
    fn from(settings: &SimSettings) -> Self {
        SimConfig {
            time_scale: settings.time_scale,
            return_decay_secs: settings.return_decay_secs,
            systems: settings.systems,
        }
    }
}

impl AppConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Engine configuration derived from the `sim` section.
    pub fn sim_config(&self) -> SimConfig {
        SimConfig::from(&self.sim)
    }
}

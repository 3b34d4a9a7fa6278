//! Runner configuration
//!
//! Loaded from a JSON file; every field falls back to its default.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::sim::{BoosterKind, Boosters};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Battle RNG seed
    pub seed: u64,
    /// Boosters armed before each match
    pub boosters: Vec<BoosterKind>,
    /// Host frames per second fed to the fixed-step accumulator
    pub frame_rate: f32,
    /// Let the runner play the player side
    pub autoplay: bool,
    /// Matches to run before exiting
    pub max_matches: u32,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            boosters: Vec::new(),
            frame_rate: 60.0,
            autoplay: true,
            max_matches: 1,
        }
    }
}

/// Failure to read a config file
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read config: {}", e),
            ConfigError::Parse(e) => write!(f, "invalid config: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
        }
    }
}

impl MatchConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(ConfigError::Parse)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config (seed {}, {} boosters)", config.seed, config.boosters.len());
        Ok(config)
    }

    /// Booster set for one match. Duplicates collapse.
    pub fn to_boosters(&self) -> Boosters {
        self.boosters.iter().copied().collect()
    }

    /// Wall-clock seconds per host frame
    pub fn frame_dt(&self) -> f32 {
        if self.frame_rate > 0.0 {
            1.0 / self.frame_rate
        } else {
            1.0 / Self::default().frame_rate
        }
    }
}

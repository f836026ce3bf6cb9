//! Session configuration, optionally loaded from a JSON file.

use crate::character::PlayerClass;
use crate::core::constants::{DUNGEON_DEFAULT_LENGTH, DUNGEON_MIN_LENGTH};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("dungeon length {0} is shorter than the minimum of 8 rows")]
    DungeonTooShort(usize),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Fixed RNG seed; a fresh one is drawn when absent.
    pub seed: Option<u64>,
    /// Rows in each generated dungeon.
    pub dungeon_length: usize,
    /// Difficulty index of the first and second dungeon.
    pub dungeon_indices: [u32; 2],
    /// Skips the class menu when set.
    pub starting_class: Option<PlayerClass>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: None,
            dungeon_length: DUNGEON_DEFAULT_LENGTH,
            dungeon_indices: [1, 2],
            starting_class: None,
        }
    }
}

impl SessionConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dungeon_length < DUNGEON_MIN_LENGTH {
            return Err(ConfigError::DungeonTooShort(self.dungeon_length));
        }
        Ok(())
    }
}

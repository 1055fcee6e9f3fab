//! Host configuration.
//!
//! ```toml
//! storage_key = "recipes:v1"
//! data_dir = "/var/lib/cookwise"
//! tick_interval_ms = 1000
//! ```
//!
//! Every field is optional.

use crate::storage::{FileStore, MemoryStore, KeyValueStore, DEFAULT_RECIPES_KEY};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Tick interval must be positive")]
    ZeroTickInterval,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CookbookConfig {
    /// Key of the recipe blob in the durable store.
    pub storage_key: String,
    /// Directory for the file-backed store. Without one, recipes live in
    /// memory only.
    pub data_dir: Option<PathBuf>,
    /// Period of the session tick driver.
    pub tick_interval_ms: u64,
}

impl Default for CookbookConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_RECIPES_KEY.to_string(),
            data_dir: None,
            tick_interval_ms: 1000,
        }
    }
}

impl CookbookConfig {
    /// Parse TOML, filling unset fields with defaults.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        if config.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }
        Ok(config)
    }

    /// Read and parse a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    /// Period between session ticks.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Durable store described by this config.
    pub fn open_storage(&self) -> Box<dyn KeyValueStore + Send> {
        match &self.data_dir {
            Some(dir) => Box::new(FileStore::new(dir)),
            None => Box::new(MemoryStore::new()),
        }
    }
}

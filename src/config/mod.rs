//! Configuration loading and management

mod io;
mod settings;

pub use settings::{RewardSettings, Settings};

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::progress::ProgressEngine;
use crate::storage::{self, ProgressStore};

/// Engine over whichever backend the config selects
pub type ConfiguredEngine = ProgressEngine<Box<dyn ProgressStore + Send>>;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// General settings
    #[serde(default)]
    pub settings: Settings,
}

impl Config {
    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse config")
    }

    /// Directory holding progress data
    pub fn data_dir(&self) -> PathBuf {
        self.settings
            .data_dir
            .clone()
            .unwrap_or_else(Self::global_config_dir)
    }

    /// Open the configured store and hydrate an engine from it
    pub fn open_engine(&self) -> Result<ConfiguredEngine> {
        let data_dir = self.data_dir();
        let store = storage::open_store(self.settings.storage, &data_dir).with_context(|| {
            format!(
                "Failed to open {} progress store in {}",
                self.settings.storage.as_str(),
                data_dir.display()
            )
        })?;
        Ok(ProgressEngine::new(store))
    }

    /// Load from `path` if given, otherwise from the global location.
    /// A missing file yields the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        let path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::global_config_path);

        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        Self::from_file(&path)
    }
}

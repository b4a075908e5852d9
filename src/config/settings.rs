//! Settings configuration types

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::storage::StorageBackend;

/// General settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Where progress is stored (defaults to ~/.ecotrack)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,

    /// Storage backend: "json" (single file) or "sqlite"
    #[serde(default)]
    pub storage: StorageBackend,

    /// Points awarded by the activity shortcuts
    #[serde(default)]
    pub rewards: RewardSettings,
}

/// Points awarded per activity kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardSettings {
    #[serde(default = "default_waste_scan")]
    pub waste_scan: u32,

    #[serde(default = "default_carbon_calc")]
    pub carbon_calc: u32,

    #[serde(default = "default_challenge")]
    pub challenge: u32,
}

fn default_waste_scan() -> u32 {
    10
}

fn default_carbon_calc() -> u32 {
    25
}

fn default_challenge() -> u32 {
    40
}

impl Default for RewardSettings {
    fn default() -> Self {
        Self {
            waste_scan: default_waste_scan(),
            carbon_calc: default_carbon_calc(),
            challenge: default_challenge(),
        }
    }
}

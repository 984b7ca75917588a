//! Engine configuration
//!
//! Configuration is loaded from YAML files or built programmatically. All
//! fields carry serde defaults so a partial file is enough.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::utils::error::Result;

/// Engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Name of the rank held by players with no other active rank
    #[serde(default = "default_rank")]
    pub default_rank: String,
    /// Storage configuration
    #[serde(default)]
    pub storage: StorageConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_rank: default_rank(),
            storage: StorageConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from a YAML file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = tokio::fs::read_to_string(path).await?;
        let config: Self = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    /// Merge another configuration on top of this one
    pub fn merge(mut self, other: Self) -> Self {
        if other.default_rank != default_rank() {
            self.default_rank = other.default_rank;
        }
        self.storage = self.storage.merge(other.storage);
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.default_rank.trim().is_empty() {
            return Err("default rank name cannot be empty".to_string());
        }
        if self.default_rank.contains('.') || self.default_rank.contains('*') {
            return Err(format!(
                "default rank name '{}' must not contain '.' or '*'",
                self.default_rank
            ));
        }
        self.storage.validate()
    }
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Path used by the file-backed store
    #[serde(default = "default_data_path")]
    pub data_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_path: default_data_path(),
        }
    }
}

impl StorageConfig {
    /// Merge storage configurations
    pub fn merge(mut self, other: Self) -> Self {
        if other.data_path != default_data_path() {
            self.data_path = other.data_path;
        }
        self
    }

    /// Validate the storage configuration
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.data_path.trim().is_empty() {
            return Err("storage data path cannot be empty".to_string());
        }
        Ok(())
    }
}

fn default_rank() -> String {
    "member".to_string()
}

fn default_data_path() -> String {
    "data/ranks.json".to_string()
}

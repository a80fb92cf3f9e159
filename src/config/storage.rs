//! Session storage configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Session storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Storage backend to use
    #[serde(default)]
    pub backend: StorageBackend,

    /// Base directory for the file backend
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

/// Session storage backend
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// YAML file per session under `data_dir`
    #[default]
    File,
    /// In-process map, lost on restart
    Memory,
}

impl StorageConfig {
    /// Validate storage configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.backend == StorageBackend::File && self.data_dir.trim().is_empty() {
            return Err(ValidationError::EmptyDataDir);
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            data_dir: default_data_dir(),
        }
    }
}

fn default_data_dir() -> String {
    "./data/sessions".to_string()
}

//! Application configuration.
//!
//! Artifact/dataset paths and the rule thresholds are external
//! configuration, never hard-coded. A missing config file yields the
//! documented defaults; a present-but-invalid file is an error rather than
//! a silent fallback.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::{EmergencyThresholds, StatusThresholds};

/// Environment variable overriding the config file location.
pub const CONFIG_PATH_ENV: &str = "CARDIOGRAPH_CONFIG";

/// Default config file, resolved relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "cardiograph.toml";

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("cannot parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Model artifact and training dataset locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Persisted artifact; created after the first training run
    pub artifact_path: PathBuf,
    /// Labeled training dataset, used only when no artifact exists
    pub dataset_path: PathBuf,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            artifact_path: PathBuf::from("heart_model.json"),
            dataset_path: PathBuf::from("train.csv"),
        }
    }
}

/// Advice selection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdviceConfig {
    /// Number of general tips sampled per non-emergency result
    pub tips_per_result: usize,
    /// Fixed RNG seed for reproducible runs; unset means OS entropy
    pub seed: Option<u64>,
}

impl Default for AdviceConfig {
    fn default() -> Self {
        Self {
            tips_per_result: 3,
            seed: None,
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub model: ModelConfig,
    pub thresholds: StatusThresholds,
    pub emergency: EmergencyThresholds,
    pub advice: AdviceConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file, falling back to defaults when
    /// the file does not exist.
    ///
    /// # Errors
    /// Returns [`ConfigError`] if the file exists but cannot be read or
    /// parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Resolve the config file path from the environment.
    #[must_use]
    pub fn path_from_env() -> PathBuf {
        std::env::var(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH))
    }
}

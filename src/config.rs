use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::models::ReportLayout;
use crate::report::DEFAULT_FILE_SUFFIX;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Team identifier → brand names in processing order
    pub teams: HashMap<String, Vec<String>>,
    pub report: ReportConfig,
    pub store: StoreConfig,
}

/// Report output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub layout: ReportLayout,
    pub output_dir: PathBuf,
    pub file_suffix: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            layout: ReportLayout::Grouped,
            output_dir: PathBuf::from("."),
            file_suffix: DEFAULT_FILE_SUFFIX.to_string(),
        }
    }
}

/// Local JSON store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(".reject-check/store"),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            info!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        info!(path = %path.display(), "Loaded configuration");

        Ok(config)
    }

    /// Load configuration from the default location (.reject-check/config.yml)
    pub fn load_default() -> Result<Self> {
        Self::load(".reject-check/config.yml")
    }
}

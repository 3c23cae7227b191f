//! Configuration module

use crate::sync::DEFAULT_REPORT_INTERVAL;
use crate::{Error, Result};
use dirs::config_dir;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Sync behaviour defaults, overridable per invocation
    pub sync: SyncConfig,
}

/// Sync configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Default remote key prefix prepended to file names
    pub prefix: String,
    /// Cache-control directive attached to uploaded objects
    pub cache_control: Option<String>,
    /// Number of processed items between progress lines
    #[serde(default = "default_report_interval")]
    pub report_interval: usize,
}

fn default_report_interval() -> usize {
    DEFAULT_REPORT_INTERVAL
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sync: SyncConfig {
                prefix: "uploads/".to_string(),
                cache_control: Some("public, max-age=315360000".to_string()),
                report_interval: DEFAULT_REPORT_INTERVAL,
            },
        }
    }
}

impl Config {
    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = config_dir()
            .ok_or_else(|| Error::Config("Unable to determine config directory".to_string()))?;

        let ferry_dir = config_dir.join("ferry");
        if !ferry_dir.exists() {
            fs::create_dir_all(&ferry_dir)?;
        }

        Ok(ferry_dir.join("config.toml"))
    }

    /// Get default configuration content with examples
    pub fn default_config_content() -> String {
        r#"# Ferry Configuration File
# This file configures the default behaviour of the ferry sync tool.
# Every value can be overridden per invocation with CLI flags.

[sync]
# Remote key prefix prepended to every file name. Concatenated
# literally, so include a trailing slash for directory-style keys.
prefix = "uploads/"

# Cache-control directive attached to uploaded objects.
# Remove this line to upload without a cache-control attribute.
cache_control = "public, max-age=315360000"

# Number of processed items between progress lines.
report_interval = 200
"#
        .to_string()
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if !path.exists() {
            // Create default config with commented examples
            let default_content = Self::default_config_content();
            fs::write(&path, default_content)?;
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)?;
        let config: Config = toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))?;

        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(&path, contents)?;
        Ok(())
    }

    /// Load configuration or use defaults if loading fails
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }
}

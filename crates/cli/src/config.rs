//! Configuration file handling for the CLI
//!
//! Flags always win; the file only supplies defaults.

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::output::OutputFormat;

/// Optional defaults read from ~/.config/kubecap/config.json
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Default namespace when -n is not given
    pub default_namespace: Option<String>,
    /// Default output format ("table" or "json")
    pub default_format: Option<String>,
}

impl Config {
    /// Load configuration from file; a missing file is not an error
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content =
            std::fs::read_to_string(&config_path).context("Failed to read config file")?;
        serde_json::from_str(&content).context("Failed to parse config file")
    }

    /// The configured default format, if it names a known one
    pub fn parsed_format(&self) -> Option<OutputFormat> {
        self.default_format
            .as_deref()
            .and_then(|s| OutputFormat::from_str(s, true).ok())
    }

    fn config_path() -> Result<PathBuf> {
        let home = dirs_next::home_dir().context("Could not determine home directory")?;
        Ok(home.join(".config").join("kubecap").join("config.json"))
    }
}

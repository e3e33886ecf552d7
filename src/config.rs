//! Runtime configuration for the logscope binary
//!
//! Loaded from an optional TOML file; CLI flags take precedence.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Config file looked up in the working directory when none is given
const DEFAULT_CONFIG_PATH: &str = "logscope.toml";

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory scanned for log files
    pub log_dir: PathBuf,

    /// File extension picked up during discovery
    pub extension: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from("logs"),
            extension: "log".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration
    ///
    /// An explicitly given path must exist and parse; the default path
    /// is only used if present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default = Path::new(DEFAULT_CONFIG_PATH);
                if default.exists() {
                    Self::from_file(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }
}

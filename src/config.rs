//! User configuration loaded from `~/.gurl/config.yaml`

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::constants::{CONFIG_DIR, CONFIG_FILE, DEFAULT_LOG_FILE};
use crate::messages::KeyBindings;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Prepended to addresses that start with `/`
    pub base_url: Option<String>,
    pub log_file: PathBuf,
    pub keys: KeyBindings,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            base_url: None,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            keys: KeyBindings::default(),
        }
    }
}

impl Config {
    /// Default location, falling back to the working directory without a home
    pub fn path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(CONFIG_DIR)
            .join(CONFIG_FILE)
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path())
    }

    /// A missing file yields the defaults; a malformed one is an error
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        if content.trim().is_empty() {
            return Ok(Config::default());
        }

        serde_yaml::from_str(&content)
            .with_context(|| format!("Invalid config {}", path.display()))
    }
}

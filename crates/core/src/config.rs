//! Local wizard settings persisted as JSON.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context as _, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::context::HomePaths;

/// Settings for one wizard installation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppConfig {
    /// Root directory of the managed installation.
    pub home_dir: PathBuf,
    /// Directory for downloaded artifacts and logs.
    pub data_dir: PathBuf,
    /// Source URL for the artifact download step.
    pub artifact_url: String,
    /// Render tick interval in milliseconds.
    pub tick_interval_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        let home_dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".stepwise");
        let data_dir = home_dir.join("data");
        Self {
            home_dir,
            data_dir,
            artifact_url: "https://example.com/stepwise/artifact.tar.gz".to_string(),
            tick_interval_ms: 100,
        }
    }
}

/// Default location of the settings file.
pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("stepwise")
        .join("config.json")
}

/// Write a default settings file at the default location if none
/// exists; an existing file is left untouched.
pub fn ensure_default_config() -> Result<()> {
    ensure_default_config_at(config_path())
}

/// Like [`ensure_default_config`], at an explicit path.
pub fn ensure_default_config_at(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if path.exists() {
        return Ok(());
    }
    AppConfig::default().persist(path)?;
    info!(path = %path.display(), "wrote default config");
    Ok(())
}

impl AppConfig {
    /// Load settings from the default location.
    pub fn load() -> Result<Self> {
        Self::load_from(config_path())
    }

    /// Load settings from an explicit path.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse config {}", path.display()))
    }

    /// Persist settings, creating parent directories if needed.
    pub fn persist(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create config directory {}", parent.display()))?;
        }
        let serialized = serde_json::to_string_pretty(self).context("failed to serialize config")?;
        fs::write(path, serialized)
            .with_context(|| format!("failed to write config {}", path.display()))
    }

    /// Path settings for [`crate::context::Context::with_home_paths`].
    pub fn home_paths(&self) -> HomePaths {
        HomePaths {
            home_dir: self.home_dir.clone(),
            data_dir: self.data_dir.clone(),
        }
    }
}

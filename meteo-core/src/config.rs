use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{form::SettlePolicy, model::Coordinate, provider::openmeteo::OPEN_METEO_FORECAST_URL};

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// latitude = "13.7563"
/// longitude = "100.5018"
/// timeout_secs = 15
/// settle_policy = "latest-request-only"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// Default latitude pre-filled in the form.
    pub latitude: Option<String>,
    /// Default longitude pre-filled in the form.
    pub longitude: Option<String>,

    /// Forecast endpoint; the public Open-Meteo URL when unset.
    pub endpoint: Option<String>,

    /// Request timeout. No timeout when unset.
    pub timeout_secs: Option<u64>,

    #[serde(default)]
    pub settle_policy: SettlePolicy,
}

impl Config {
    /// Coordinate to start the form with, falling back per field to the
    /// built-in default.
    pub fn default_coordinate(&self) -> Coordinate {
        let fallback = Coordinate::default();

        Coordinate {
            latitude: self.latitude.clone().unwrap_or(fallback.latitude),
            longitude: self.longitude.clone().unwrap_or(fallback.longitude),
        }
    }

    pub fn set_default_coordinate(&mut self, coordinate: Coordinate) {
        self.latitude = Some(coordinate.latitude);
        self.longitude = Some(coordinate.longitude);
    }

    pub fn endpoint(&self) -> &str {
        self.endpoint.as_deref().unwrap_or(OPEN_METEO_FORECAST_URL)
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        tracing::debug!(path = %path.display(), "Saved configuration");
        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "meteo", "meteo-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

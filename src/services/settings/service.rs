use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};

use crate::models::settings::PlannerSettings;

const APP_DIR: &str = "travel-calendar";

/// Loads and saves [`PlannerSettings`] as TOML.
pub struct SettingsService {
    path: PathBuf,
}

impl SettingsService {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Service bound to `<config_dir>/travel-calendar/settings.toml`.
    pub fn with_default_path() -> Result<Self> {
        Ok(Self::new(Self::default_settings_path()?))
    }

    pub fn default_settings_path() -> Result<PathBuf> {
        let config_dir = directories::BaseDirs::new()
            .context("Failed to get base directories")?
            .config_dir()
            .to_path_buf();
        Ok(config_dir.join(APP_DIR).join("settings.toml"))
    }

    pub fn default_database_path() -> Result<PathBuf> {
        let data_dir = directories::BaseDirs::new()
            .context("Failed to get base directories")?
            .data_dir()
            .to_path_buf();
        Ok(data_dir.join(APP_DIR).join("trips.db"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read settings; a missing file yields defaults.
    pub fn load(&self) -> Result<PlannerSettings> {
        if !self.path.exists() {
            log::debug!("No settings at {}, using defaults", self.path.display());
            return Ok(PlannerSettings::default());
        }

        let data = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read settings from {}", self.path.display()))?;
        let settings: PlannerSettings = toml::from_str(&data)
            .with_context(|| format!("Failed to parse settings in {}", self.path.display()))?;

        settings
            .validate()
            .map_err(|e| anyhow!("Invalid settings in {}: {}", self.path.display(), e))?;

        Ok(settings)
    }

    pub fn save(&self, settings: &PlannerSettings) -> Result<()> {
        settings
            .validate()
            .map_err(|e| anyhow!("Invalid settings: {}", e))?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create dir {}", parent.display()))?;
        }

        let data = toml::to_string_pretty(settings).context("Failed to serialize settings")?;
        fs::write(&self.path, data)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))?;
        Ok(())
    }

    /// Database location from settings, falling back to the data directory.
    pub fn resolve_database_path(settings: &PlannerSettings) -> Result<PathBuf> {
        match settings.database_path {
            Some(ref path) => Ok(path.clone()),
            None => Self::default_database_path(),
        }
    }
}

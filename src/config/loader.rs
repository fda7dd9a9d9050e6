//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading engine settings
//! from a YAML file.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{EngineError, EngineResult};

use super::types::EngineSettings;

/// Name of the settings file inside a configuration directory.
pub const SETTINGS_FILE: &str = "engine.yaml";

/// Loads and provides access to engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// └── engine.yaml   # Rounding, session limits, edit window, week start
/// ```
///
/// # Example
///
/// ```no_run
/// use attendance_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// println!("Edit window: {} months", loader.settings().edit_window_months);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    settings: EngineSettings,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - `engine.yaml` is missing (`ConfigNotFound`)
    /// - the file contains invalid YAML or out-of-range values (`ConfigParseError`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let settings_path = path.as_ref().join(SETTINGS_FILE);
        let settings = Self::load_yaml::<EngineSettings>(&settings_path)?;
        Self::validate(&settings, &settings_path)?;

        info!(
            path = %settings_path.display(),
            rounding = ?settings.default_rounding,
            week_starts_on = %settings.week_starts_on,
            "Loaded engine configuration"
        );

        Ok(Self { settings })
    }

    /// Wraps already-built settings.
    pub fn from_settings(settings: EngineSettings) -> Self {
        Self { settings }
    }

    /// Returns the loaded settings.
    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    fn validate(settings: &EngineSettings, path: &Path) -> EngineResult<()> {
        let invalid = |message: &str| EngineError::ConfigParseError {
            path: path.display().to_string(),
            message: message.to_string(),
        };

        if !(1..=24 * 60).contains(&settings.max_session_minutes) {
            return Err(invalid("max_session_minutes must be between 1 and 1440"));
        }
        if settings.edit_window_months == 0 {
            return Err(invalid("edit_window_months must be at least 1"));
        }
        if settings.max_report_days == 0 {
            return Err(invalid("max_report_days must be at least 1"));
        }
        Ok(())
    }
}

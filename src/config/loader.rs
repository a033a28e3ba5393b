//! Settings loading functionality.
//!
//! This module provides the [`SettingsLoader`] type for loading engine
//! settings from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::EngineSettings;

/// Loads and provides access to engine settings.
///
/// # Directory Structure
///
/// The settings directory holds a single file:
/// ```text
/// config/engine/
/// └── settings.yaml
/// ```
///
/// # Example
///
/// ```no_run
/// use attendance_engine::config::SettingsLoader;
///
/// let loader = SettingsLoader::load("./config/engine").unwrap();
/// let settings = loader.settings();
/// ```
#[derive(Debug, Clone)]
pub struct SettingsLoader {
    settings: EngineSettings,
}

impl SettingsLoader {
    /// Loads settings from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the settings directory (e.g., "./config/engine")
    ///
    /// # Returns
    ///
    /// Returns a `SettingsLoader` instance on success, or an error if the
    /// file is missing or contains invalid YAML.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let settings_path = path.as_ref().join("settings.yaml");
        let settings = Self::load_yaml::<EngineSettings>(&settings_path)?;
        Ok(Self { settings })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParse {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the loaded settings.
    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }
}

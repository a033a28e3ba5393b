//! Settings loading and management for the engine.
//!
//! This module provides functionality to load engine settings from YAML
//! files, currently the injected lateness penalty rate.
//!
//! # Example
//!
//! ```no_run
//! use attendance_engine::config::SettingsLoader;
//!
//! let loader = SettingsLoader::load("./config/engine").unwrap();
//! ```

mod loader;
mod types;

pub use loader::SettingsLoader;
pub use types::EngineSettings;

//! Configuration types for the engine.
//!
//! This module contains the strongly-typed settings structure that is
//! deserialized from the YAML settings file.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::store::SettingsProvider;

/// Engine settings loaded from `settings.yaml`.
///
/// All fields are optional in the file; absent values fall back to their
/// documented defaults at the point of use.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EngineSettings {
    /// The penalty charged per minute of lateness, in currency units.
    ///
    /// Unset or zero means the engine's fallback rate applies.
    #[serde(default)]
    pub late_penalty_rate_per_minute: Option<Decimal>,
}

impl SettingsProvider for EngineSettings {
    fn late_penalty_rate_per_minute(&self) -> Decimal {
        self.late_penalty_rate_per_minute.unwrap_or(Decimal::ZERO)
    }
}

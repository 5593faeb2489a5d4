//! Driver Configuration
//!
//! Settings of a heart rate driver, loadable from JSON.

use crate::core::constants::DEFAULT_DRIVER_NAME;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration of a `HeartRateDriver`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DriverConfig {
    /// Display name of the driver.
    pub name: String,
    /// Default log filter, used when the environment does not set one.
    pub log_level: String,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_DRIVER_NAME.to_owned(),
            log_level: "info".to_owned(),
        }
    }
}

impl DriverConfig {
    /// Parses a configuration from a JSON document.
    ///
    /// Missing fields take their default values.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("invalid driver configuration")
    }

    /// Loads a configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("could not read {}", path.display()))?;
        Self::from_json(&json)
    }
}

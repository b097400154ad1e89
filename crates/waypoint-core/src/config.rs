//! Waypoint configuration
//!
//! Loaded from TOML; every field has a default so a partial file is valid.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default cap on the navigation stack length
pub const DEFAULT_MAX_ENTRIES: usize = 50;

/// Default landing page when there is no history to go back to
pub const DEFAULT_DESTINATION: &str = "/search";

/// Default prefix for back-link labels
pub const DEFAULT_BACK_PREFIX: &str = "Back to ";

/// Runtime configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaypointConfig {
    /// Maximum number of entries kept in the navigation stack
    pub max_entries: usize,
    /// Where "back" goes on cold entry when no search URL is remembered
    pub default_destination: String,
    /// Prefix added to back-link labels
    pub back_prefix: String,
}

impl WaypointConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With stack cap
    #[inline]
    #[must_use]
    pub fn with_max_entries(mut self, max: usize) -> Self {
        self.max_entries = max;
        self
    }

    /// With fallback destination
    #[inline]
    #[must_use]
    pub fn with_default_destination(mut self, url: impl Into<String>) -> Self {
        self.default_destination = url.into();
        self
    }

    /// With back-link prefix
    #[inline]
    #[must_use]
    pub fn with_back_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.back_prefix = prefix.into();
        self
    }

    /// Check value ranges
    ///
    /// # Errors
    /// `ConfigError::Invalid` when the cap is zero or a string is blank.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_entries == 0 {
            return Err(ConfigError::Invalid(
                "max_entries must be at least 1".to_string(),
            ));
        }
        if self.default_destination.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "default_destination must not be empty".to_string(),
            ));
        }
        if self.back_prefix.is_empty() {
            return Err(ConfigError::Invalid(
                "back_prefix must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Parse and validate configuration from TOML text
    ///
    /// # Errors
    /// Parse errors and validation failures.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    ///
    /// # Errors
    /// IO, parse and validation failures.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::io_error(path, e))?;
        let config = Self::from_toml_str(&contents)?;
        tracing::debug!(path = %path.display(), ?config, "loaded waypoint config");
        Ok(config)
    }

    /// Render as pretty TOML
    ///
    /// # Errors
    /// Serialization failures.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

impl Default for WaypointConfig {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_MAX_ENTRIES,
            default_destination: DEFAULT_DESTINATION.to_string(),
            back_prefix: DEFAULT_BACK_PREFIX.to_string(),
        }
    }
}

//! Configuration for layout sessions

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use super::anchor::LayoutDirection;

/// Errors that can occur when loading a configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Unknown layout direction '{0}' (expected 'ltr' or 'rtl')")]
    BadDirection(String),
    #[error("Tolerance must be a non-negative number, got {0}")]
    BadTolerance(f64),
}

/// Options shared by every session a caller starts
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    /// Distance under which two coordinates count as equal when checking for conflicts
    pub tolerance: f64,

    /// Reading direction for new sessions; `None` uses the process-wide direction
    pub direction: Option<LayoutDirection>,

    /// Send each session's warnings to the `log` facade when it is applied
    pub log_warnings: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            tolerance: 0.001,
            direction: None,
            log_warnings: true,
        }
    }
}

/// TOML structure for deserializing configs
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlConfig {
    layout: Option<TomlLayout>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlLayout {
    tolerance: Option<f64>,
    direction: Option<String>,
    log_warnings: Option<bool>,
}

impl LayoutConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Pin the reading direction instead of following the process-wide one
    pub fn with_direction(mut self, direction: LayoutDirection) -> Self {
        self.direction = Some(direction);
        self
    }

    pub fn with_log_warnings(mut self, enabled: bool) -> Self {
        self.log_warnings = enabled;
        self
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Load configuration from a TOML string; missing keys keep their defaults
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let parsed: TomlConfig = toml::from_str(content)?;
        let mut config = Self::default();

        if let Some(layout) = parsed.layout {
            if let Some(tolerance) = layout.tolerance {
                if tolerance.is_nan() || tolerance < 0.0 {
                    return Err(ConfigError::BadTolerance(tolerance));
                }
                config.tolerance = tolerance;
            }
            if let Some(name) = layout.direction {
                let direction = LayoutDirection::from_name(&name)
                    .ok_or(ConfigError::BadDirection(name))?;
                config.direction = Some(direction);
            }
            if let Some(enabled) = layout.log_warnings {
                config.log_warnings = enabled;
            }
        }

        Ok(config)
    }

    /// Direction a session started now should use
    pub fn effective_direction(&self) -> LayoutDirection {
        self.direction.unwrap_or_else(LayoutDirection::current)
    }
}

//! Configuration schema types
//!
//! This module defines the configuration structure for pax2yaml.

use super::aoi::AoiConfig;
use serde::{Deserialize, Serialize};

/// Directory layout of written documents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputLayout {
    /// `<root>/<prefix><controller>/<instance>.yml`
    Flat,
    /// `<root>/<prefix><controller>/<AOI>/<instance>.yml`
    #[default]
    #[value(name = "per-aoi", alias = "per_aoi")]
    PerAoi,
}

impl std::fmt::Display for OutputLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputLayout::Flat => write!(f, "flat"),
            OutputLayout::PerAoi => write!(f, "per_aoi"),
        }
    }
}

/// Main pax2yaml configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaxConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Controller connection settings
    #[serde(default)]
    pub controller: ControllerConfig,

    /// Where and how documents are written
    #[serde(default)]
    pub output: OutputConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// AOI types to export and the sub-tags read for each section
    #[serde(default)]
    pub aoi: AoiConfig,
}

impl PaxConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.controller.validate()?;
        self.output.validate()?;
        self.logging.validate()?;
        self.aoi.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Controller connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControllerConfig {
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl ControllerConfig {
    fn validate(&self) -> Result<(), String> {
        if !(1..=300).contains(&self.timeout_seconds) {
            return Err(format!(
                "controller.timeout_seconds must be between 1 and 300, got {}",
                self.timeout_seconds
            ));
        }
        Ok(())
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Root directory for documents (empty = current directory)
    #[serde(default)]
    pub directory: String,

    /// Directory layout below the root
    #[serde(default)]
    pub layout: OutputLayout,

    /// Prefix of the per-controller folder
    #[serde(default = "default_folder_prefix")]
    pub folder_prefix: String,
}

impl OutputConfig {
    fn validate(&self) -> Result<(), String> {
        if self.folder_prefix.contains(['/', '\\']) {
            return Err(format!(
                "output.folder_prefix cannot contain path separators, got '{}'",
                self.folder_prefix
            ));
        }
        Ok(())
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: String::new(),
            layout: OutputLayout::default(),
            folder_prefix: default_folder_prefix(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local JSON file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local_enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_timeout_seconds() -> u64 {
    10
}

fn default_folder_prefix() -> String {
    "TagData_".to_string()
}

fn default_local_path() -> String {
    "logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

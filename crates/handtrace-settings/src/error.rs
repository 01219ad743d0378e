//! Error types for the settings crate.
//!
//! This module provides structured error types for configuration loading,
//! saving and validation.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during settings operations.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// The configuration file could not be read.
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The configuration file could not be written.
    #[error("Failed to write config file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The configuration file has an unsupported extension.
    #[error("Unsupported config format: {0} (expected .toml)")]
    UnsupportedFormat(String),

    /// TOML deserialization error.
    #[error("Invalid TOML config: {0}")]
    TomlError(#[from] toml::de::Error),

    /// TOML serialization error.
    #[error("TOML serialization error: {0}")]
    TomlSerError(#[from] toml::ser::Error),

    /// A configuration validation error occurred.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors related to configuration validation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A canvas dimension is zero, negative or not finite.
    #[error("Invalid canvas {name}: {value} (must be > 0)")]
    InvalidDimension { name: &'static str, value: f64 },

    /// The smoothing kernel must be a positive odd number.
    #[error("Invalid blur kernel size: {0} (must be odd and >= 1)")]
    InvalidBlurKernel(u32),

    /// A variation or amplitude parameter is negative.
    #[error("Parameter '{name}' must not be negative: {value}")]
    NegativeParameter { name: &'static str, value: f64 },

    /// A parameter is outside its valid range.
    #[error("Parameter '{name}' out of range: {value} (valid: {min}..{max})")]
    OutOfRange {
        name: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// A height or drawing parameter is NaN or infinite.
    #[error("Parameter '{name}' must be finite: {value}")]
    NotFinite { name: &'static str, value: f64 },

    /// A speed is zero.
    #[error("Speed '{0}' must be > 0")]
    ZeroSpeed(&'static str),
}

/// Result type alias for settings operations.
pub type SettingsResult<T> = Result<T, SettingsError>;

/// Result type alias for configuration validation.
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::InvalidDimension {
            name: "width",
            value: -5.0,
        };
        assert_eq!(err.to_string(), "Invalid canvas width: -5 (must be > 0)");

        let err = ConfigError::InvalidBlurKernel(4);
        assert_eq!(
            err.to_string(),
            "Invalid blur kernel size: 4 (must be odd and >= 1)"
        );

        let err = ConfigError::NotFinite {
            name: "z_safe",
            value: f64::INFINITY,
        };
        assert_eq!(err.to_string(), "Parameter 'z_safe' must be finite: inf");

        let err = ConfigError::ZeroSpeed("travel_speed");
        assert_eq!(err.to_string(), "Speed 'travel_speed' must be > 0");
    }

    #[test]
    fn test_error_conversion() {
        let config_err = ConfigError::InvalidBlurKernel(0);
        let settings_err: SettingsError = config_err.into();
        assert!(matches!(settings_err, SettingsError::Config(_)));
    }
}

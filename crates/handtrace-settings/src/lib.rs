//! Handtrace Settings Crate
//!
//! Handles generator configuration: defaults, TOML persistence, the
//! preset/override fold and validation.

pub mod config;
pub mod error;

pub use config::{ConfigOverrides, GeneratorConfig, LoadedConfig};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};

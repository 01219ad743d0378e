//! Generator configuration.
//!
//! A [`GeneratorConfig`] is resolved once per conversion as a pure fold:
//!
//! 1. a base configuration (built-in defaults or a TOML file),
//! 2. an optional drawing preset, which replaces all five drawing fields
//!    (callers skip it when a TOML file supplied its own `[drawing]` table),
//! 3. explicit overrides, which replace individual fields when present.
//!
//! The resulting value is owned by one generator and never shared mutably.

use crate::error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
use handtrace_profiles::{DrawingOverrides, DrawingParameters, DrawingStyle};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Parameters for one image-to-G-code conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Canvas width (mm)
    pub canvas_width: f64,
    /// Canvas height (mm)
    pub canvas_height: f64,
    /// Height for travel moves between strokes (mm)
    pub z_safe: f64,
    /// Deepest drawing height; also the fixed height of plain output (mm)
    pub z_draw_base: f64,
    /// Feed rate for travel moves (mm/min)
    pub travel_speed: u32,
    /// Gaussian smoothing kernel applied before edge detection (pixels, odd)
    pub blur_kernel: u32,
    /// Humanization knobs
    pub drawing: DrawingParameters,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            canvas_width: 200.0,
            canvas_height: 200.0,
            z_safe: 5.0,
            z_draw_base: 0.2,
            travel_speed: 3000,
            blur_kernel: 5,
            drawing: DrawingParameters::default(),
        }
    }
}

/// A configuration read from disk.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedConfig {
    pub config: GeneratorConfig,
    /// The file carried a `[drawing]` table.
    pub has_drawing: bool,
}

/// Explicit caller values applied after the drawing preset.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ConfigOverrides {
    pub canvas_width: Option<f64>,
    pub canvas_height: Option<f64>,
    pub z_safe: Option<f64>,
    pub z_draw_base: Option<f64>,
    pub travel_speed: Option<u32>,
    pub blur_kernel: Option<u32>,
    pub drawing: DrawingOverrides,
}

impl GeneratorConfig {
    /// Fold a preset and explicit overrides onto this base configuration.
    pub fn resolve(self, style: Option<DrawingStyle>, overrides: &ConfigOverrides) -> Self {
        let drawing = style.map_or(self.drawing, |s| s.parameters());
        Self {
            canvas_width: overrides.canvas_width.unwrap_or(self.canvas_width),
            canvas_height: overrides.canvas_height.unwrap_or(self.canvas_height),
            z_safe: overrides.z_safe.unwrap_or(self.z_safe),
            z_draw_base: overrides.z_draw_base.unwrap_or(self.z_draw_base),
            travel_speed: overrides.travel_speed.unwrap_or(self.travel_speed),
            blur_kernel: overrides.blur_kernel.unwrap_or(self.blur_kernel),
            drawing: overrides.drawing.apply_to(drawing),
        }
    }

    /// Load a configuration from a TOML file. Missing keys keep their defaults.
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        Self::load(path).map(|loaded| loaded.config)
    }

    /// Like [`load_from_file`](Self::load_from_file), also reporting whether
    /// the file set any drawing parameters.
    pub fn load(path: &Path) -> SettingsResult<LoadedConfig> {
        if !path.extension().is_some_and(|ext| ext == "toml") {
            return Err(SettingsError::UnsupportedFormat(
                path.display().to_string(),
            ));
        }

        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let table: toml::Table = toml::from_str(&content)?;
        let has_drawing = table.contains_key("drawing");
        let config: Self = toml::Value::Table(table).try_into()?;
        config.validate()?;
        tracing::debug!("Loaded generator config from {}", path.display());
        Ok(LoadedConfig {
            config,
            has_drawing,
        })
    }

    /// Save this configuration as TOML.
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|source| SettingsError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Platform default config location, e.g. `~/.config/handtrace/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("handtrace").join("config.toml"))
    }

    /// Check the values the pipeline cannot work with.
    pub fn validate(&self) -> ConfigResult<()> {
        for (name, value) in [("width", self.canvas_width), ("height", self.canvas_height)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidDimension { name, value });
            }
        }

        if self.blur_kernel == 0 || self.blur_kernel % 2 == 0 {
            return Err(ConfigError::InvalidBlurKernel(self.blur_kernel));
        }

        let d = &self.drawing;
        for (name, value) in [
            ("z_safe", self.z_safe),
            ("z_draw_base", self.z_draw_base),
            ("z_variation", d.z_variation),
            ("tremor_amplitude", d.tremor_amplitude),
            ("pressure_variation", d.pressure_variation),
            ("speed_variation", d.speed_variation),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite { name, value });
            }
        }

        if self.travel_speed == 0 {
            return Err(ConfigError::ZeroSpeed("travel_speed"));
        }
        if self.drawing.feed_rate == 0 {
            return Err(ConfigError::ZeroSpeed("feed_rate"));
        }

        for (name, value) in [
            ("z_variation", d.z_variation),
            ("tremor_amplitude", d.tremor_amplitude),
            ("pressure_variation", d.pressure_variation),
            ("speed_variation", d.speed_variation),
        ] {
            if value < 0.0 {
                return Err(ConfigError::NegativeParameter { name, value });
            }
        }

        if d.pressure_variation > 1.0 {
            return Err(ConfigError::OutOfRange {
                name: "pressure_variation",
                value: d.pressure_variation,
                min: 0.0,
                max: 1.0,
            });
        }

        Ok(())
    }

    /// Highest height a drawn vertex can reach.
    pub fn max_draw_height(&self) -> f64 {
        self.z_draw_base + self.drawing.z_variation
    }

    /// Describe a safe height that does not clear the drawing heights.
    ///
    /// Such a configuration is still accepted.
    pub fn safety_warning(&self) -> Option<String> {
        let max_draw = self.max_draw_height();
        (self.z_safe <= max_draw).then(|| {
            format!(
                "Safe height {:.2}mm does not clear the maximum draw height {:.2}mm",
                self.z_safe, max_draw
            )
        })
    }
}

//! Drawing presets.
//!
//! A preset bundles the five numeric knobs of the humanization model. The
//! preset set is closed; explicit overrides are applied field by field on
//! top of whichever preset (or the built-in defaults) was selected.

use crate::error::{ProfileError, ProfileResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The five parameters controlling how "hand drawn" a stroke looks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawingParameters {
    /// Maximum lift above the base draw height caused by low pressure (mm)
    pub z_variation: f64,
    /// Base drawing feed rate (mm/min)
    pub feed_rate: u32,
    /// Maximum XY jitter applied to drawn vertices (mm)
    pub tremor_amplitude: f64,
    /// Relative pressure noise (0..1)
    pub pressure_variation: f64,
    /// Relative feed-rate noise (0..1)
    pub speed_variation: f64,
}

impl Default for DrawingParameters {
    fn default() -> Self {
        Self {
            z_variation: 0.8,
            feed_rate: 1000,
            tremor_amplitude: 0.1,
            pressure_variation: 0.3,
            speed_variation: 0.2,
        }
    }
}

/// Named drawing presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawingStyle {
    Artistic,
    Technical,
    Sketch,
    Calligraphy,
    Engraving,
}

impl DrawingStyle {
    /// Every preset, in listing order.
    pub const ALL: [DrawingStyle; 5] = [
        DrawingStyle::Artistic,
        DrawingStyle::Technical,
        DrawingStyle::Sketch,
        DrawingStyle::Calligraphy,
        DrawingStyle::Engraving,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Self::Artistic => "artistic",
            Self::Technical => "technical",
            Self::Sketch => "sketch",
            Self::Calligraphy => "calligraphy",
            Self::Engraving => "engraving",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Artistic => "Expressive artistic stroke",
            Self::Technical => "Precise technical stroke",
            Self::Sketch => "Quick, loose sketch",
            Self::Calligraphy => "Calligraphic style with smooth variations",
            Self::Engraving => "Controlled engraving for hard materials",
        }
    }

    pub fn parameters(&self) -> DrawingParameters {
        match self {
            Self::Artistic => DrawingParameters {
                z_variation: 1.5,
                feed_rate: 800,
                tremor_amplitude: 0.15,
                pressure_variation: 0.4,
                speed_variation: 0.3,
            },
            Self::Technical => DrawingParameters {
                z_variation: 0.3,
                feed_rate: 1200,
                tremor_amplitude: 0.05,
                pressure_variation: 0.1,
                speed_variation: 0.1,
            },
            Self::Sketch => DrawingParameters {
                z_variation: 0.8,
                feed_rate: 1500,
                tremor_amplitude: 0.2,
                pressure_variation: 0.35,
                speed_variation: 0.25,
            },
            Self::Calligraphy => DrawingParameters {
                z_variation: 1.0,
                feed_rate: 600,
                tremor_amplitude: 0.08,
                pressure_variation: 0.5,
                speed_variation: 0.2,
            },
            Self::Engraving => DrawingParameters {
                z_variation: 0.2,
                feed_rate: 400,
                tremor_amplitude: 0.03,
                pressure_variation: 0.05,
                speed_variation: 0.05,
            },
        }
    }

    /// Look up a preset by name.
    ///
    /// Returns `None` (after logging a warning) for unknown names; callers
    /// then keep the built-in defaults.
    pub fn lookup(name: &str) -> Option<DrawingStyle> {
        match name.parse() {
            Ok(style) => Some(style),
            Err(err) => {
                tracing::warn!("{}. Using default values.", err);
                None
            }
        }
    }
}

impl fmt::Display for DrawingStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for DrawingStyle {
    type Err = ProfileError;

    fn from_str(s: &str) -> ProfileResult<Self> {
        let wanted = s.trim().to_lowercase();
        DrawingStyle::ALL
            .into_iter()
            .find(|style| style.key() == wanted)
            .ok_or_else(|| ProfileError::UnknownDrawingProfile(s.to_string()))
    }
}

/// Caller supplied values that win over the selected preset.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DrawingOverrides {
    pub z_variation: Option<f64>,
    pub feed_rate: Option<u32>,
    pub tremor_amplitude: Option<f64>,
    pub pressure_variation: Option<f64>,
    pub speed_variation: Option<f64>,
}

impl DrawingOverrides {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Replace each field of `base` for which an override is present.
    pub fn apply_to(&self, base: DrawingParameters) -> DrawingParameters {
        DrawingParameters {
            z_variation: self.z_variation.unwrap_or(base.z_variation),
            feed_rate: self.feed_rate.unwrap_or(base.feed_rate),
            tremor_amplitude: self.tremor_amplitude.unwrap_or(base.tremor_amplitude),
            pressure_variation: self.pressure_variation.unwrap_or(base.pressure_variation),
            speed_variation: self.speed_variation.unwrap_or(base.speed_variation),
        }
    }
}

//! Stroke humanization models.
//!
//! A [`StrokeModel`] decides, per drawn vertex, how far the pen wanders from
//! the ideal position, how hard it presses (tool height) and how fast it
//! moves. [`HandDrawnModel`] imitates a human hand with bounded random
//! noise; [`FixedModel`] draws the ideal path at constant height and speed.

use handtrace_core::MachinePoint;
use handtrace_profiles::DrawingParameters;
use handtrace_settings::GeneratorConfig;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::PI;

/// Lowest feed rate a randomized stroke may use (mm/min).
pub const MIN_FEED_RATE: u32 = 100;

/// Strength of the mid-stroke pressure bump.
const PRESSURE_BUMP: f64 = 0.3;

/// Combined pressure factor at which the tool reaches `z_draw_base`.
const PRESSURE_CAP: f64 = 1.5;

/// Per-vertex stroke decisions used by the toolpath emitter.
///
/// For each drawn vertex the emitter calls [`tremor`](Self::tremor), then
/// [`height`](Self::height), then [`feed_rate`](Self::feed_rate).
pub trait StrokeModel {
    /// Perturb an ideal machine position.
    fn tremor(&mut self, point: MachinePoint) -> MachinePoint;

    /// Tool height at `progress` (0..1) along the stroke.
    fn height(&mut self, progress: f64) -> f64;

    /// Feed rate for the next drawing move.
    fn feed_rate(&mut self) -> u32;

    /// Feed rate for lowering the tool onto the surface.
    fn plunge_feed_rate(&self) -> u32;
}

/// Randomized hand-drawn stroke model.
///
/// Random draws per vertex happen in a fixed order (tremor x, tremor y,
/// pressure, speed), so a seeded model always produces the same program.
#[derive(Debug, Clone)]
pub struct HandDrawnModel<R: Rng = StdRng> {
    params: DrawingParameters,
    z_draw_base: f64,
    rng: R,
}

impl HandDrawnModel<StdRng> {
    /// Reproducible model.
    pub fn seeded(config: &GeneratorConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    /// Model seeded from operating system entropy.
    pub fn from_entropy(config: &GeneratorConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }
}

impl<R: Rng> HandDrawnModel<R> {
    pub fn with_rng(config: &GeneratorConfig, rng: R) -> Self {
        Self {
            params: config.drawing,
            z_draw_base: config.z_draw_base,
            rng,
        }
    }

    pub fn parameters(&self) -> &DrawingParameters {
        &self.params
    }

    fn noise(&mut self, amplitude: f64) -> f64 {
        let a = amplitude.abs();
        self.rng.gen_range(-a..=a)
    }
}

impl<R: Rng> StrokeModel for HandDrawnModel<R> {
    fn tremor(&mut self, point: MachinePoint) -> MachinePoint {
        let dx = self.noise(self.params.tremor_amplitude);
        let dy = self.noise(self.params.tremor_amplitude);
        MachinePoint::new(point.x + dx, point.y + dy)
    }

    /// Pressure peaks mid-stroke and is scaled by random noise; stronger
    /// pressure means a lower tool. The result stays within
    /// `[z_draw_base, z_draw_base + z_variation]`.
    fn height(&mut self, progress: f64) -> f64 {
        let position_factor = 1.0 + PRESSURE_BUMP * (progress * PI).sin();
        let random_factor = 1.0 + self.noise(self.params.pressure_variation);
        let pressure = (position_factor * random_factor).min(PRESSURE_CAP);
        self.z_draw_base + self.params.z_variation * (1.0 - pressure / PRESSURE_CAP)
    }

    fn feed_rate(&mut self) -> u32 {
        let factor = 1.0 + self.noise(self.params.speed_variation);
        let feed = (f64::from(self.params.feed_rate) * factor).round();
        if feed < f64::from(MIN_FEED_RATE) {
            MIN_FEED_RATE
        } else {
            feed as u32
        }
    }

    fn plunge_feed_rate(&self) -> u32 {
        (self.params.feed_rate / 4).max(1)
    }
}

/// Deterministic model: ideal positions, constant height and feed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedModel {
    pub z_draw: f64,
    pub feed_rate: u32,
}

impl FixedModel {
    pub fn new(config: &GeneratorConfig) -> Self {
        Self {
            z_draw: config.z_draw_base,
            feed_rate: config.drawing.feed_rate,
        }
    }
}

impl StrokeModel for FixedModel {
    fn tremor(&mut self, point: MachinePoint) -> MachinePoint {
        point
    }

    fn height(&mut self, _progress: f64) -> f64 {
        self.z_draw
    }

    fn feed_rate(&mut self) -> u32 {
        self.feed_rate
    }

    fn plunge_feed_rate(&self) -> u32 {
        self.feed_rate
    }
}

//! # Handtrace
//!
//! Turns raster images into G-code that traces their outlines the way a
//! human hand would: slightly shaky, with varying pressure and speed.
//!
//! ## Architecture
//!
//! Handtrace is organized as a workspace with multiple crates:
//!
//! 1. **handtrace-core** - Geometry value types (pixel and machine points, contours)
//! 2. **handtrace-profiles** - Machine boilerplate profiles and drawing presets
//! 3. **handtrace-settings** - Generator configuration, TOML files, validation
//! 4. **handtrace-camtools** - Contour extraction, simplification, humanization, G-code assembly
//! 5. **handtrace** - Command line binary that integrates all crates

pub mod cli;

pub use handtrace_camtools::{
    CamToolError, CannyContourSource, ContourSource, ConversionReport, FixedModel, GcodeProgram,
    HandDrawnGenerator, HandDrawnModel, MotionCommand, StrokeModel,
};
pub use handtrace_core::{Contour, MachinePoint, PixelPoint, SimplifiedPath};
pub use handtrace_profiles::{DrawingParameters, DrawingStyle, MachineKind, MachineProfile};
pub use handtrace_settings::{ConfigOverrides, GeneratorConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging
///
/// Sets up structured logging with:
/// - Output on stderr, keeping stdout for listings and summaries
/// - RUST_LOG environment variable support (defaults to `info`, or `debug`
///   when `verbose` is set)
pub fn init_logging(verbose: bool) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let default_level = if verbose { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .with_level(true)
        .with_line_number(verbose);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

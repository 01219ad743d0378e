//! Error types for the camtools crate.
//!
//! This module provides structured error types for image loading, contour
//! extraction and writing the generated program.

use handtrace_settings::ConfigError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while converting an image to G-code.
#[derive(Error, Debug)]
pub enum CamToolError {
    /// The input image does not exist.
    #[error("Input image not found: {}", .0.display())]
    InputNotFound(PathBuf),

    /// The input image exists but could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    ReadFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The input bytes are not a decodable image.
    #[error("Could not decode image: {0}")]
    DecodeFailure(#[from] image::ImageError),

    /// Contours were supplied for an image without pixels.
    #[error("Invalid image dimensions: {width}x{height}")]
    EmptyImage { width: u32, height: u32 },

    /// The generated program could not be written.
    #[error("Failed to write {}: {source}", path.display())]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The generator configuration is invalid.
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

/// Result type alias for camtools operations.
pub type CamToolResult<T> = Result<T, CamToolError>;

//! # Handtrace CAM Tools
//!
//! Image to hand-drawn G-code pipeline:
//!
//! - **Contour Source**: edge detection and outline extraction from raster images
//! - **Simplifier**: closed-curve Douglas–Peucker reduction of each outline
//! - **Mapper**: pixel to machine millimetre coordinates with a flipped y axis
//! - **Humanization**: tremor, pressure (tool height) and speed noise per vertex
//! - **Emitter**: one lift/travel/plunge/draw/lift stroke per outline
//! - **Assembler**: header, per-contour blocks and footer written as one file

pub mod assembler;
pub mod contour_source;
pub mod emitter;
pub mod error;
pub mod humanize;
pub mod mapper;
pub mod simplify;

pub use assembler::{ConversionReport, GcodeProgram, HandDrawnGenerator};
pub use contour_source::{CannyContourSource, ContourSource, Extraction, MIN_CONTOUR_AREA};
pub use emitter::{MotionCommand, ToolpathEmitter};
pub use error::{CamToolError, CamToolResult};
pub use humanize::{FixedModel, HandDrawnModel, StrokeModel, MIN_FEED_RATE};
pub use mapper::CoordinateMapper;
pub use simplify::{simplify_closed, simplify_contour};

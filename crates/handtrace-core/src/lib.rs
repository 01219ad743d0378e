//! # Handtrace Core
//!
//! Geometry value types shared by every handtrace crate: pixel and machine
//! points, extracted contours and their simplified form.

pub mod types;

pub use types::{Contour, MachinePoint, PixelPoint, SimplifiedPath};

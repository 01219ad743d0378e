//! Edge and contour extraction.
//!
//! Turns raw image bytes into closed outlines in pixel space:
//! grayscale, Gaussian smoothing, Canny edge detection, a 3x3 morphological
//! close to bridge small gaps, then border following. Only outer borders of
//! top-level components are kept, loops enclosing 50 px² or less are
//! dropped, and the survivors are ordered by descending area.

use crate::error::CamToolResult;
use handtrace_core::{Contour, PixelPoint};
use image::{DynamicImage, GrayImage};
use imageproc::contours::{find_contours, BorderType};
use imageproc::distance_transform::Norm;

/// Loops enclosing this area or less are treated as noise (px²).
pub const MIN_CONTOUR_AREA: f64 = 50.0;

/// Contours extracted from one image, together with its pixel dimensions.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    pub width: u32,
    pub height: u32,
    /// Ordered by descending enclosed area
    pub contours: Vec<Contour>,
}

/// Anything that can turn image bytes into ordered contours.
pub trait ContourSource {
    fn extract(&self, bytes: &[u8]) -> CamToolResult<Extraction>;
}

/// Canny based contour source.
#[derive(Debug, Clone, PartialEq)]
pub struct CannyContourSource {
    /// Smoothing kernel size in pixels (odd)
    pub blur_kernel: u32,
    pub low_threshold: f32,
    pub high_threshold: f32,
    pub min_area: f64,
}

impl Default for CannyContourSource {
    fn default() -> Self {
        Self::new(5)
    }
}

impl CannyContourSource {
    pub fn new(blur_kernel: u32) -> Self {
        Self {
            blur_kernel,
            low_threshold: 50.0,
            high_threshold: 150.0,
            min_area: MIN_CONTOUR_AREA,
        }
    }

    /// Gaussian sigma equivalent to a square kernel of `blur_kernel` pixels.
    pub fn sigma(&self) -> f32 {
        let k = self.blur_kernel.max(1) as f32;
        0.3 * ((k - 1.0) * 0.5 - 1.0) + 0.8
    }

    /// Binary edge mask (edge = 255) of an already decoded image.
    pub fn edge_mask(&self, image: &DynamicImage) -> GrayImage {
        let gray = image.to_luma8();
        let blurred = imageproc::filter::gaussian_blur_f32(&gray, self.sigma());
        let edges = imageproc::edges::canny(&blurred, self.low_threshold, self.high_threshold);
        imageproc::morphology::close(&edges, Norm::LInf, 1)
    }

    /// Extract ordered contours from an already decoded image.
    pub fn extract_image(&self, image: &DynamicImage) -> Extraction {
        let mask = self.edge_mask(image);

        let outlines = find_contours::<i32>(&mask)
            .into_iter()
            .filter(|c| c.border_type == BorderType::Outer && c.parent.is_none())
            .map(|c| {
                Contour::new(
                    c.points
                        .into_iter()
                        .map(|p| PixelPoint::new(p.x, p.y))
                        .collect(),
                )
            })
            .collect();

        let contours = filter_and_sort(outlines, self.min_area);
        tracing::debug!(
            "Extracted {} contours from {}x{} image",
            contours.len(),
            image.width(),
            image.height()
        );

        Extraction {
            width: image.width(),
            height: image.height(),
            contours,
        }
    }
}

impl ContourSource for CannyContourSource {
    fn extract(&self, bytes: &[u8]) -> CamToolResult<Extraction> {
        let image = image::load_from_memory(bytes)?;
        Ok(self.extract_image(&image))
    }
}

/// Drop loops at or below `min_area`, then sort by descending area.
///
/// The sort is stable, so equal areas keep discovery order.
pub fn filter_and_sort(contours: Vec<Contour>, min_area: f64) -> Vec<Contour> {
    let mut kept: Vec<Contour> = contours
        .into_iter()
        .filter(|c| c.enclosed_area() > min_area)
        .collect();
    kept.sort_by(|a, b| b.enclosed_area().total_cmp(&a.enclosed_area()));
    kept
}

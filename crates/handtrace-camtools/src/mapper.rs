//! Pixel to machine coordinate mapping.
//!
//! The image is stretched over the whole canvas (no aspect preservation) and
//! the y axis is flipped: pixel row 0 lands on the top edge of the canvas.

use handtrace_core::{MachinePoint, PixelPoint};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    image_width: f64,
    image_height: f64,
    canvas_width: f64,
    canvas_height: f64,
}

impl CoordinateMapper {
    /// Image dimensions must be non-zero.
    pub fn new(image_width: u32, image_height: u32, canvas_width: f64, canvas_height: f64) -> Self {
        Self {
            image_width: f64::from(image_width),
            image_height: f64::from(image_height),
            canvas_width,
            canvas_height,
        }
    }

    pub fn to_machine(&self, p: PixelPoint) -> MachinePoint {
        let px = f64::from(p.x);
        let py = f64::from(p.y);
        MachinePoint::new(
            px / self.image_width * self.canvas_width,
            (self.image_height - py) / self.image_height * self.canvas_height,
        )
    }

    /// Inverse of [`to_machine`](Self::to_machine), in fractional pixels.
    pub fn to_pixel(&self, p: MachinePoint) -> (f64, f64) {
        (
            p.x / self.canvas_width * self.image_width,
            self.image_height - p.y / self.canvas_height * self.image_height,
        )
    }
}

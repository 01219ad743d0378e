//! Geometry value types for the image-to-toolpath pipeline.
//!
//! Two coordinate spaces are involved:
//! - **Pixel space**: integer raster coordinates, origin at the top-left
//!   corner, y grows downward.
//! - **Machine space**: millimetres on the drawing canvas, origin at the
//!   bottom-left corner, y grows upward.

use geo::{Area, Coord, EuclideanLength, LineString, Polygon};
use serde::{Deserialize, Serialize};

/// A point in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: i32,
    pub y: i32,
}

impl PixelPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<PixelPoint> for Coord<f64> {
    fn from(p: PixelPoint) -> Self {
        Coord {
            x: f64::from(p.x),
            y: f64::from(p.y),
        }
    }
}

impl From<(i32, i32)> for PixelPoint {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// A point on the machine canvas, in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MachinePoint {
    pub x: f64,
    pub y: f64,
}

impl MachinePoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: &MachinePoint) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// A closed outline extracted from an edge mask.
///
/// The enclosed area is computed once at construction (unsigned shoelace
/// area of the ring) and the contour is immutable afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Contour {
    points: Vec<PixelPoint>,
    enclosed_area: f64,
}

impl Contour {
    pub fn new(points: Vec<PixelPoint>) -> Self {
        let enclosed_area = ring(&points).unsigned_area();
        Self {
            points,
            enclosed_area,
        }
    }

    pub fn points(&self) -> &[PixelPoint] {
        &self.points
    }

    pub fn enclosed_area(&self) -> f64 {
        self.enclosed_area
    }

    /// Length of the closed outline, including the closing segment.
    pub fn perimeter(&self) -> f64 {
        ring(&self.points).exterior().euclidean_length()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

fn ring(points: &[PixelPoint]) -> Polygon<f64> {
    let coords: Vec<Coord<f64>> = points.iter().map(|&p| p.into()).collect();
    Polygon::new(LineString::from(coords), vec![])
}

/// A sparse vertex sequence approximating a [`Contour`].
///
/// Paths with fewer than two vertices are representable but produce no
/// toolpath; see [`SimplifiedPath::is_drawable`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SimplifiedPath {
    vertices: Vec<PixelPoint>,
}

impl SimplifiedPath {
    pub fn new(vertices: Vec<PixelPoint>) -> Self {
        Self { vertices }
    }

    pub fn vertices(&self) -> &[PixelPoint] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// A stroke needs at least a start and one more vertex.
    pub fn is_drawable(&self) -> bool {
        self.vertices.len() >= 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(side: i32) -> Contour {
        Contour::new(vec![
            PixelPoint::new(0, 0),
            PixelPoint::new(side, 0),
            PixelPoint::new(side, side),
            PixelPoint::new(0, side),
        ])
    }

    #[test]
    fn test_contour_area_and_perimeter() {
        let c = square(10);
        assert!((c.enclosed_area() - 100.0).abs() < 1e-9);
        assert!((c.perimeter() - 40.0).abs() < 1e-9);
        assert_eq!(c.len(), 4);
    }

    #[test]
    fn test_contour_area_ignores_winding() {
        let mut pts = square(4).points().to_vec();
        pts.reverse();
        let c = Contour::new(pts);
        assert!((c.enclosed_area() - 16.0).abs() < 1e-9);
    }

    #[test]
    fn test_degenerate_contours() {
        let empty = Contour::new(vec![]);
        assert!(empty.is_empty());
        assert_eq!(empty.enclosed_area(), 0.0);
        assert_eq!(empty.perimeter(), 0.0);

        let line = Contour::new(vec![PixelPoint::new(0, 0), PixelPoint::new(3, 4)]);
        assert_eq!(line.enclosed_area(), 0.0);
        assert!((line.perimeter() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_simplified_path_drawable() {
        assert!(!SimplifiedPath::new(vec![PixelPoint::new(1, 1)]).is_drawable());
        assert!(
            SimplifiedPath::new(vec![PixelPoint::new(1, 1), PixelPoint::new(2, 2)]).is_drawable()
        );
    }

    #[test]
    fn test_machine_point_distance() {
        let a = MachinePoint::new(0.0, 0.0);
        let b = MachinePoint::new(3.0, 4.0);
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-12);
    }
}

//! Closed-curve Douglas–Peucker simplification.

use geo::{Coord, LineString, SimplifyIdx};
use handtrace_core::{Contour, PixelPoint, SimplifiedPath};

/// Tolerance as a fraction of the contour perimeter.
pub const EPSILON_FACTOR: f64 = 0.005;

/// Simplify a closed contour with a tolerance of 0.5% of its perimeter.
pub fn simplify_contour(contour: &Contour) -> SimplifiedPath {
    simplify_closed(contour.points(), EPSILON_FACTOR * contour.perimeter())
}

/// Douglas–Peucker on a closed ring.
///
/// The ring is split at vertex 0 and at the vertex farthest from it; both
/// halves are simplified as open polylines and joined without repeating the
/// split vertices. The result never has more vertices than the input.
pub fn simplify_closed(points: &[PixelPoint], epsilon: f64) -> SimplifiedPath {
    if points.len() < 3 {
        return SimplifiedPath::new(points.to_vec());
    }

    let start: Coord<f64> = points[0].into();
    let Some(split) = (1..points.len())
        .map(|i| (i, distance(start, points[i].into())))
        .filter(|&(_, d)| d > 0.0)
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(i, _)| i)
    else {
        // Every vertex coincides with the first one
        return SimplifiedPath::new(vec![points[0]]);
    };

    let first: Vec<PixelPoint> = points[..=split].to_vec();
    let mut second: Vec<PixelPoint> = points[split..].to_vec();
    second.push(points[0]);

    let mut vertices = keep(&first, epsilon);
    let tail = keep(&second, epsilon);
    // Drop the shared split vertex and the closing copy of vertex 0
    vertices.extend_from_slice(&tail[1..tail.len() - 1]);

    SimplifiedPath::new(vertices)
}

fn keep(points: &[PixelPoint], epsilon: f64) -> Vec<PixelPoint> {
    let line: LineString<f64> = points.iter().map(|&p| Coord::from(p)).collect();
    line.simplify_idx(&epsilon)
        .into_iter()
        .map(|i| points[i])
        .collect()
}

fn distance(a: Coord<f64>, b: Coord<f64>) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(raw: &[(i32, i32)]) -> Vec<PixelPoint> {
        raw.iter().map(|&p| p.into()).collect()
    }

    /// Integer points along the border of an axis-aligned square.
    fn dense_square(side: i32) -> Vec<PixelPoint> {
        let mut out = Vec::new();
        for x in 0..side {
            out.push(PixelPoint::new(x, 0));
        }
        for y in 0..side {
            out.push(PixelPoint::new(side, y));
        }
        for x in (1..=side).rev() {
            out.push(PixelPoint::new(x, side));
        }
        for y in (1..=side).rev() {
            out.push(PixelPoint::new(0, y));
        }
        out
    }

    #[test]
    fn test_dense_square_reduces_to_corners() {
        let contour = Contour::new(dense_square(40));
        let path = simplify_contour(&contour);
        let mut corners = path.vertices().to_vec();
        corners.sort_by_key(|p| (p.x, p.y));
        assert_eq!(corners, pts(&[(0, 0), (0, 40), (40, 0), (40, 40)]));
    }

    #[test]
    fn test_starts_at_first_vertex() {
        let contour = Contour::new(dense_square(20));
        let path = simplify_contour(&contour);
        assert_eq!(path.vertices()[0], PixelPoint::new(0, 0));
    }

    #[test]
    fn test_zero_epsilon_keeps_everything() {
        let ring = pts(&[(0, 0), (5, 1), (10, 0), (10, 10), (0, 10)]);
        let path = simplify_closed(&ring, 0.0);
        assert_eq!(path.vertices(), ring.as_slice());
    }

    #[test]
    fn test_degenerate_inputs() {
        assert!(simplify_closed(&[], 1.0).is_empty());

        let single = pts(&[(3, 3)]);
        assert_eq!(simplify_closed(&single, 1.0).len(), 1);

        let same = pts(&[(2, 2), (2, 2), (2, 2)]);
        let path = simplify_closed(&same, 1.0);
        assert_eq!(path.len(), 1);
        assert!(!path.is_drawable());
    }

    #[test]
    fn test_never_grows() {
        let ring = pts(&[(0, 0), (3, 1), (7, 0), (9, 4), (8, 9), (2, 8), (1, 4)]);
        for eps in [0.0, 0.5, 1.0, 2.0, 10.0] {
            assert!(simplify_closed(&ring, eps).len() <= ring.len());
        }
    }
}

//! Geometric primitives on normalized landmark points.
//!
//! Everything here works in the image plane; depth is carried along but
//! ignored by the measurements.

use crate::types::Point3;

/// Angle at vertex `b` between rays `b→a` and `b→c`, in degrees within [0, 180].
///
/// Computed as the absolute difference of the two ray headings, reflected
/// into [0, 180]. Coincident points give a defined but meaningless value
/// instead of failing.
pub fn angle(a: &Point3, b: &Point3, c: &Point3) -> f64 {
    let radians = (c.y - b.y).atan2(c.x - b.x) - (a.y - b.y).atan2(a.x - b.x);
    let degrees = radians.to_degrees().abs();

    if degrees > 180.0 {
        360.0 - degrees
    } else {
        degrees
    }
}

/// Euclidean distance in the image plane
pub fn distance(a: &Point3, b: &Point3) -> f64 {
    nalgebra::distance(&a.xy(), &b.xy())
}

/// Midpoint of two points (depth averaged as well)
pub fn midpoint(a: &Point3, b: &Point3) -> Point3 {
    Point3::from_nalgebra(nalgebra::center(&a.to_nalgebra(), &b.to_nalgebra()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point3 {
        Point3::new(x, y, 0.0)
    }

    #[test]
    fn test_right_angle() {
        let a = angle(&p(1.0, 0.0), &p(0.0, 0.0), &p(0.0, 1.0));
        assert!((a - 90.0).abs() < 1e-10);
    }

    #[test]
    fn test_straight_line() {
        let a = angle(&p(0.45, 0.6), &p(0.45, 0.74), &p(0.45, 0.9));
        assert!((a - 180.0).abs() < 1e-10);
    }

    #[test]
    fn test_reflex_angle_is_folded() {
        // Raw heading difference is 270 degrees
        let a = angle(&p(0.0, -1.0), &p(0.0, 0.0), &p(-1.0, 0.0));
        assert!((a - 90.0).abs() < 1e-10);
        assert!((0.0..=180.0).contains(&a));
    }

    #[test]
    fn test_degenerate_angle_is_defined() {
        let a = angle(&p(0.5, 0.5), &p(0.5, 0.5), &p(0.5, 0.5));
        assert!(a.is_finite());
        assert_eq!(a, 0.0);
    }

    #[test]
    fn test_distance_ignores_depth() {
        let a = Point3::new(0.0, 0.0, 5.0);
        let b = Point3::new(3.0, 4.0, -2.0);
        assert!((distance(&a, &b) - 5.0).abs() < 1e-10);
        assert_eq!(distance(&a, &a), 0.0);
    }

    #[test]
    fn test_midpoint() {
        let m = midpoint(&p(0.45, 0.6), &p(0.55, 0.6));
        assert!((m.x - 0.5).abs() < 1e-12);
        assert!((m.y - 0.6).abs() < 1e-12);
    }
}

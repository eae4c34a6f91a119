//! Point-to-segment distance

use crate::Vec2;

/// Distance from `point` to the closed segment [a, b]
///
/// Degenerate segments (a == b) fall back to point distance.
pub fn point_segment_distance(point: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq == 0.0 {
        return point.distance(a);
    }
    let t = ((point - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    point.distance(a + ab * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_beside_segment() {
        let d = point_segment_distance(Vec2::new(5.0, 3.0), Vec2::ZERO, Vec2::new(10.0, 0.0));
        assert!((d - 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_point_past_endpoint() {
        let d = point_segment_distance(Vec2::new(13.0, 4.0), Vec2::ZERO, Vec2::new(10.0, 0.0));
        assert!((d - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_degenerate_segment() {
        let d = point_segment_distance(Vec2::new(3.0, 4.0), Vec2::ZERO, Vec2::ZERO);
        assert!((d - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_point_on_segment() {
        let d = point_segment_distance(Vec2::new(5.0, 0.0), Vec2::ZERO, Vec2::new(10.0, 0.0));
        assert!(d.abs() < 1e-6);
    }
}

//! Axis-aligned rectangle

use crate::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle defined by its minimum corner and size
///
/// Used for canvas bounds and rectangular obstacles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Minimum corner (top-left in canvas coordinates)
    pub min: Vec2,
    /// Width and height (non-negative)
    pub size: Vec2,
}

impl Rect {
    /// Create a rectangle from its minimum corner and size
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    /// Create a rectangle spanning from the origin to (width, height)
    pub fn from_size(width: f32, height: f32) -> Self {
        Self {
            min: Vec2::ZERO,
            size: Vec2::new(width, height),
        }
    }

    /// Maximum corner (bottom-right in canvas coordinates)
    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Width of the rectangle
    #[inline]
    pub fn width(&self) -> f32 {
        self.size.x
    }

    /// Height of the rectangle
    #[inline]
    pub fn height(&self) -> f32 {
        self.size.y
    }

    /// Center point of the rectangle
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.min + self.size * 0.5
    }

    /// Check whether a point lies inside the rectangle
    ///
    /// The minimum edge is inclusive and the maximum edge exclusive, so
    /// adjacent rectangles tile without double-counting shared edges.
    pub fn contains(&self, point: Vec2) -> bool {
        let max = self.max();
        point.x >= self.min.x && point.x < max.x && point.y >= self.min.y && point.y < max.y
    }

    /// Clamp a point so it lies within the rectangle (inclusive both edges)
    pub fn clamp_point(&self, point: Vec2) -> Vec2 {
        point.clamp_components(self.min, self.max())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_size() {
        let r = Rect::from_size(10.0, 20.0);
        assert_eq!(r.min, Vec2::ZERO);
        assert_eq!(r.max(), Vec2::new(10.0, 20.0));
        assert_eq!(r.width(), 10.0);
        assert_eq!(r.height(), 20.0);
    }

    #[test]
    fn test_contains() {
        let r = Rect::new(Vec2::new(1.0, 1.0), Vec2::new(2.0, 2.0));
        assert!(r.contains(Vec2::new(1.0, 1.0)));
        assert!(r.contains(Vec2::new(2.5, 2.5)));
        // Max edge is exclusive
        assert!(!r.contains(Vec2::new(3.0, 2.0)));
        assert!(!r.contains(Vec2::new(0.5, 2.0)));
    }

    #[test]
    fn test_center() {
        let r = Rect::from_size(10.0, 20.0);
        assert_eq!(r.center(), Vec2::new(5.0, 10.0));
    }

    #[test]
    fn test_clamp_point() {
        let r = Rect::from_size(10.0, 10.0);
        assert_eq!(r.clamp_point(Vec2::new(-1.0, 5.0)), Vec2::new(0.0, 5.0));
        assert_eq!(r.clamp_point(Vec2::new(11.0, 12.0)), Vec2::new(10.0, 10.0));
    }
}

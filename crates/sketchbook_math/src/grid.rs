//! Integer grid coordinates for cell-based games

use serde::{Deserialize, Serialize};

/// A cell position on an integer grid
///
/// Snake, the maze robot, and the cellular automata all address cells with
/// this type. Coordinates may go negative transiently; the wrap helpers fold
/// them back into a grid of the given dimensions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

impl GridPos {
    /// Create a new grid position
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Offset this position by (dx, dy)
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Wrap the position toroidally into a grid of `width` x `height` cells
    pub fn wrapped(self, width: i32, height: i32) -> Self {
        Self::new(self.x.rem_euclid(width), self.y.rem_euclid(height))
    }

    /// Check whether the position lies inside a grid of `width` x `height`
    pub fn in_bounds(self, width: i32, height: i32) -> bool {
        self.x >= 0 && self.x < width && self.y >= 0 && self.y < height
    }
}

impl std::ops::Add for GridPos {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset() {
        let p = GridPos::new(2, 3).offset(-1, 4);
        assert_eq!(p, GridPos::new(1, 7));
    }

    #[test]
    fn test_wrapped() {
        assert_eq!(GridPos::new(-1, 5).wrapped(10, 5), GridPos::new(9, 0));
        assert_eq!(GridPos::new(10, -1).wrapped(10, 5), GridPos::new(0, 4));
        assert_eq!(GridPos::new(3, 3).wrapped(10, 5), GridPos::new(3, 3));
    }

    #[test]
    fn test_in_bounds() {
        assert!(GridPos::new(0, 0).in_bounds(4, 4));
        assert!(GridPos::new(3, 3).in_bounds(4, 4));
        assert!(!GridPos::new(4, 0).in_bounds(4, 4));
        assert!(!GridPos::new(0, -1).in_bounds(4, 4));
    }
}

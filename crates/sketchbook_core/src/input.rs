//! Input events delivered to sketches
//!
//! The windowing layer is out of scope for this crate, so input arrives as
//! already-decoded intents rather than raw key codes. The binary (or a test)
//! maps whatever frontend it has onto these events.

use serde::{Deserialize, Serialize};
use sketchbook_math::{GridPos, Vec2};

/// One of the four cardinal directions
///
/// Ordered so that `opposite` is a rotation by two steps, mirroring the
/// arithmetic the snake uses to reject reversals.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Left,
    Down,
    Right,
}

impl Direction {
    /// All four directions in enum order
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Left,
        Direction::Down,
        Direction::Right,
    ];

    /// The direction pointing the opposite way
    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Left => Direction::Right,
            Direction::Down => Direction::Up,
            Direction::Right => Direction::Left,
        }
    }

    /// Unit cell offset in canvas coordinates (y grows downward)
    pub fn delta(self) -> GridPos {
        match self {
            Direction::Up => GridPos::new(0, -1),
            Direction::Left => GridPos::new(-1, 0),
            Direction::Down => GridPos::new(0, 1),
            Direction::Right => GridPos::new(1, 0),
        }
    }

    /// The direction 90 degrees to the left (counter-clockwise on screen)
    pub fn turned_left(self) -> Self {
        match self {
            Direction::Up => Direction::Left,
            Direction::Left => Direction::Down,
            Direction::Down => Direction::Right,
            Direction::Right => Direction::Up,
        }
    }

    /// The direction 90 degrees to the right (clockwise on screen)
    pub fn turned_right(self) -> Self {
        self.turned_left().opposite()
    }
}

/// A decoded input intent
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    /// A directional key (arrows / WASD in the original sketches)
    Direction(Direction),
    /// Fire the currently selected weapon
    Fire,
    /// Increase firing power
    PowerUp,
    /// Decrease firing power
    PowerDown,
    /// Pointer position in canvas coordinates
    Pointer(Vec2),
}

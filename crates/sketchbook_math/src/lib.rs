//! 2D math primitives shared by all sketches
//!
//! Provides the small vocabulary every sketch builds on:
//!
//! - [`Vec2`] - 2D vector used for positions, velocities, and forces
//! - [`Rect`] - axis-aligned rectangle (canvas bounds, obstacles)
//! - [`GridPos`] - integer cell coordinates for grid-based games
//! - [`linspace`], [`map_range`], [`lerp`] - numeric range helpers

mod grid;
mod range;
mod rect;
mod segment;
mod vec2;

pub use grid::GridPos;
pub use range::{lerp, linspace, map_range};
pub use rect::Rect;
pub use segment::point_segment_distance;
pub use vec2::Vec2;

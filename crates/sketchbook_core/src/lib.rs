//! Core types for the sketchbook
//!
//! This crate provides the foundational types every sketch builds on:
//!
//! - [`Sketch`] - lifecycle trait implemented by each simulation
//! - [`SketchStatus`] - whether a sketch is still running
//! - [`SketchRunner`] - registry and active-sketch stack
//! - [`FrameClock`] - wall-clock delta time with spiral-of-death capping
//! - [`InputEvent`] / [`Direction`] - the input vocabulary sketches consume
//! - [`CoreError`] - runner error type

mod clock;
mod error;
mod input;
mod runner;
mod sketch;

pub use clock::FrameClock;
pub use error::CoreError;
pub use input::{Direction, InputEvent};
pub use runner::SketchRunner;
pub use sketch::{Sketch, SketchStatus};

// Re-export commonly used math types for convenience
pub use sketchbook_math::{GridPos, Rect, Vec2};

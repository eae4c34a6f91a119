//! sketchbook - a headless portfolio of simulation sketches
//!
//! The library surface of the runner binary: configuration loading and the
//! registry wiring every portfolio sketch into a
//! [`SketchRunner`](sketchbook_core::SketchRunner).

pub mod config;
pub mod registry;

pub use sketchbook_core::{
    Direction, FrameClock, InputEvent, Sketch, SketchRunner, SketchStatus,
};

//! The sketch lifecycle trait

use crate::InputEvent;

/// Whether a sketch wants more frames
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SketchStatus {
    /// The sketch has more work to do
    Running,
    /// The sketch reached a terminal state and further updates are no-ops
    Finished,
}

/// A self-contained simulation stepped once per animation frame
///
/// Each sketch owns its entire mutable state. The caller owns the schedule:
/// it decides when (and how often) `update` runs and feeds input events in
/// between frames. Sketches never block, sleep, or spin on their own.
pub trait Sketch {
    /// Short identifier used for registration and logging
    fn name(&self) -> &str;

    /// Advance the simulation by `dt` seconds
    fn update(&mut self, dt: f32);

    /// Feed one input event to the sketch
    ///
    /// The default implementation ignores input; purely autonomous sketches
    /// don't override it.
    fn handle_input(&mut self, _event: &InputEvent) {}

    /// Report whether the sketch wants more frames
    fn status(&self) -> SketchStatus {
        SketchStatus::Running
    }

    /// Restore the sketch to its initial state
    fn reset(&mut self);
}

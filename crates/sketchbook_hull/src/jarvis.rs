//! Jarvis march (gift wrapping) as an animation step machine

use crate::{cross_z, sorted_distinct, StepEvent};
use sketchbook_math::Vec2;

/// The phase the Jarvis march is in
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JarvisStep {
    /// Scanning for the starting (leftmost) point, one candidate per step
    FindStart,
    /// Wrapping: examining one candidate per step for the next hull vertex
    Wrap,
    /// Hull complete
    Done,
}

/// Incremental gift wrapping
///
/// Each [`step`](Self::step) examines one candidate point, which is exactly
/// the granularity the original animation drew: the ray to the current best
/// candidate and the ray to the one being checked.
pub struct JarvisMarch {
    /// Distinct input points
    points: Vec<Vec2>,
    /// Hull under construction (counter-clockwise)
    hull: Vec<Vec2>,
    step: JarvisStep,
    /// Candidate index being examined
    cursor: usize,
    /// Best candidate so far (leftmost in FindStart, next vertex in Wrap)
    best: usize,
    /// Index of the most recently accepted hull vertex
    current: usize,
    /// Index of the starting vertex
    start: usize,
    finished_reported: bool,
}

impl JarvisMarch {
    /// Create a march over the given points
    ///
    /// Exact duplicates are dropped; fewer than three distinct points finish
    /// immediately with a degenerate hull.
    pub fn new(points: Vec<Vec2>) -> Self {
        let points = sorted_distinct(&points);
        let degenerate = points.len() < 3;
        Self {
            hull: if degenerate { points.clone() } else { Vec::new() },
            points,
            step: if degenerate {
                JarvisStep::Done
            } else {
                JarvisStep::FindStart
            },
            cursor: 0,
            best: 0,
            current: 0,
            start: 0,
            finished_reported: false,
        }
    }

    /// Current phase
    pub fn current_step(&self) -> JarvisStep {
        self.step
    }

    /// Hull vertices accepted so far
    pub fn hull(&self) -> &[Vec2] {
        &self.hull
    }

    /// Whether the hull is complete
    pub fn is_done(&self) -> bool {
        self.step == JarvisStep::Done
    }

    /// Forget all progress and start over with the same points
    pub fn restart(&mut self) {
        if self.points.len() < 3 {
            return;
        }
        self.hull.clear();
        self.step = JarvisStep::FindStart;
        self.cursor = 0;
        self.best = 0;
        self.current = 0;
        self.start = 0;
        self.finished_reported = false;
    }

    /// Advance the algorithm by one candidate point
    pub fn step(&mut self) -> StepEvent {
        match self.step {
            JarvisStep::FindStart => self.step_find_start(),
            JarvisStep::Wrap => self.step_wrap(),
            JarvisStep::Done => {
                if self.finished_reported {
                    StepEvent::Idle
                } else {
                    self.finished_reported = true;
                    StepEvent::Finished
                }
            }
        }
    }

    /// Run every remaining step and return the finished hull
    pub fn run_to_completion(&mut self) -> &[Vec2] {
        loop {
            match self.step() {
                StepEvent::Finished | StepEvent::Idle => break,
                _ => {}
            }
        }
        &self.hull
    }

    /// One candidate of the leftmost-point sweep
    fn step_find_start(&mut self) -> StepEvent {
        let candidate = self.points[self.cursor];
        let best = self.points[self.best];
        if candidate.x < best.x || (candidate.x == best.x && candidate.y < best.y) {
            self.best = self.cursor;
        }
        self.cursor += 1;

        if self.cursor >= self.points.len() {
            self.start = self.best;
            self.current = self.best;
            self.hull.push(self.points[self.start]);
            self.cursor = 0;
            self.best = usize::MAX;
            self.step = JarvisStep::Wrap;
            return StepEvent::Accepted { popped: 0 };
        }
        StepEvent::Examined
    }

    /// One candidate of a wrapping sweep
    fn step_wrap(&mut self) -> StepEvent {
        if self.cursor != self.current {
            if self.best == usize::MAX {
                self.best = self.cursor;
            } else {
                let current = self.points[self.current];
                let best = self.points[self.best];
                let candidate = self.points[self.cursor];
                let turn = cross_z(current, best, candidate);
                // A candidate to the right of the current best ray wraps
                // tighter; on ties the farther point wins so collinear
                // midpoints never land on the hull
                if turn < 0.0
                    || (turn == 0.0 && current.distance(candidate) > current.distance(best))
                {
                    self.best = self.cursor;
                }
            }
        }
        self.cursor += 1;

        if self.cursor >= self.points.len() {
            // A wrap that revisits the start, or has somehow accepted more
            // vertices than there are points, is complete
            if self.best == self.start || self.hull.len() >= self.points.len() {
                log::debug!("jarvis march complete, {} hull vertices", self.hull.len());
                self.step = JarvisStep::Done;
                self.finished_reported = true;
                return StepEvent::Finished;
            }
            self.hull.push(self.points[self.best]);
            self.current = self.best;
            self.cursor = 0;
            self.best = usize::MAX;
            return StepEvent::Accepted { popped: 0 };
        }
        StepEvent::Examined
    }
}

//! Monotone chain as an animation step machine

use crate::{cross_z, sorted_distinct, StepEvent};
use sketchbook_math::Vec2;

/// The phase the monotone chain is in
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MonotoneStep {
    /// Sorting the points lexicographically
    Sort,
    /// Building the lower chain left to right, one point per step
    Lower,
    /// Building the upper chain right to left, one point per step
    Upper,
    /// Joining the two chains
    Fuse,
    /// Hull complete
    Done,
}

/// Incremental monotone chain
///
/// The lower and upper chains stay inspectable while they grow, which is
/// what the original animation rendered in two colors before fusing them.
pub struct MonotoneChain {
    /// Distinct input points, sorted after the Sort phase
    points: Vec<Vec2>,
    lower: Vec<Vec2>,
    upper: Vec<Vec2>,
    /// Fused hull (counter-clockwise); empty until Fuse runs
    hull: Vec<Vec2>,
    step: MonotoneStep,
    cursor: usize,
    finished_reported: bool,
}

impl MonotoneChain {
    /// Create a chain builder over the given points
    ///
    /// Exact duplicates are dropped; fewer than three distinct points finish
    /// immediately with a degenerate hull.
    pub fn new(points: Vec<Vec2>) -> Self {
        let points = sorted_distinct(&points);
        let degenerate = points.len() < 3;
        Self {
            hull: if degenerate { points.clone() } else { Vec::new() },
            points,
            lower: Vec::new(),
            upper: Vec::new(),
            step: if degenerate {
                MonotoneStep::Done
            } else {
                MonotoneStep::Sort
            },
            cursor: 0,
            finished_reported: false,
        }
    }

    /// Current phase
    pub fn current_step(&self) -> MonotoneStep {
        self.step
    }

    /// The lower chain built so far
    pub fn lower_chain(&self) -> &[Vec2] {
        &self.lower
    }

    /// The upper chain built so far
    pub fn upper_chain(&self) -> &[Vec2] {
        &self.upper
    }

    /// The fused hull; empty until the Fuse phase has run
    pub fn hull(&self) -> &[Vec2] {
        &self.hull
    }

    /// Whether the hull is complete
    pub fn is_done(&self) -> bool {
        self.step == MonotoneStep::Done
    }

    /// Forget all progress and start over with the same points
    pub fn restart(&mut self) {
        if self.points.len() < 3 {
            return;
        }
        self.lower.clear();
        self.upper.clear();
        self.hull.clear();
        self.step = MonotoneStep::Sort;
        self.cursor = 0;
        self.finished_reported = false;
    }

    /// Advance the algorithm by one step
    pub fn step(&mut self) -> StepEvent {
        match self.step {
            MonotoneStep::Sort => {
                // Construction already sorted and deduplicated; seed the
                // lower chain the way the original did on its sort frame
                self.lower.push(self.points[0]);
                self.lower.push(self.points[1]);
                self.cursor = 2;
                self.step = MonotoneStep::Lower;
                StepEvent::Examined
            }
            MonotoneStep::Lower => {
                let point = self.points[self.cursor];
                let popped = Self::push_chain(&mut self.lower, point);
                self.cursor += 1;
                if self.cursor >= self.points.len() {
                    self.cursor = self.points.len() - 1;
                    self.step = MonotoneStep::Upper;
                }
                StepEvent::Accepted { popped }
            }
            MonotoneStep::Upper => {
                let point = self.points[self.cursor];
                let popped = Self::push_chain(&mut self.upper, point);
                if self.cursor == 0 {
                    self.step = MonotoneStep::Fuse;
                } else {
                    self.cursor -= 1;
                }
                StepEvent::Accepted { popped }
            }
            MonotoneStep::Fuse => {
                // Each chain ends where the other begins; drop the shared
                // endpoints and concatenate
                self.lower.pop();
                self.upper.pop();
                self.hull.clear();
                self.hull.extend_from_slice(&self.lower);
                self.hull.extend_from_slice(&self.upper);
                log::debug!("monotone chain complete, {} hull vertices", self.hull.len());
                self.step = MonotoneStep::Done;
                self.finished_reported = true;
                StepEvent::Finished
            }
            MonotoneStep::Done => {
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

    /// Append a point to a chain, popping reflex turns first
    fn push_chain(chain: &mut Vec<Vec2>, point: Vec2) -> usize {
        let mut popped = 0;
        while chain.len() >= 2
            && cross_z(chain[chain.len() - 2], chain[chain.len() - 1], point) <= 0.0
        {
            chain.pop();
            popped += 1;
        }
        chain.push(point);
        popped
    }
}

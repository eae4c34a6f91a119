//! Graham scan as an animation step machine

use crate::{cross_z, sorted_distinct, StepEvent};
use sketchbook_math::Vec2;

/// The phase the Graham scan is in
///
/// Mirrors the three-state pacing of the original animation: a sweep over
/// the sorted points, the stack scan proper, then done.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GrahamStep {
    /// Sorting by polar angle around the pivot, one pacing pass per point
    Sort,
    /// Scanning one point per step, popping reflex turns
    Scan,
    /// Hull complete
    Done,
}

/// Incremental Graham scan
///
/// Call [`step`](Self::step) once per animation frame; each call consumes at
/// most one candidate point and reports what happened, so a renderer can
/// draw the partial hull between calls.
pub struct GrahamScan {
    /// Distinct input points; reordered by the Sort phase
    points: Vec<Vec2>,
    /// Hull under construction (counter-clockwise)
    hull: Vec<Vec2>,
    step: GrahamStep,
    /// Sweep index in Sort, scan index in Scan
    cursor: usize,
    sorted: bool,
    finished_reported: bool,
}

impl GrahamScan {
    /// Create a scan over the given points
    ///
    /// Exact duplicate points are dropped. Fewer than three distinct points
    /// finish immediately with a degenerate hull.
    pub fn new(points: Vec<Vec2>) -> Self {
        let points = sorted_distinct(&points);
        let degenerate = points.len() < 3;
        Self {
            hull: if degenerate { points.clone() } else { Vec::new() },
            points,
            step: if degenerate {
                GrahamStep::Done
            } else {
                GrahamStep::Sort
            },
            cursor: 0,
            sorted: false,
            finished_reported: false,
        }
    }

    /// Current phase
    pub fn current_step(&self) -> GrahamStep {
        self.step
    }

    /// Hull vertices accepted so far
    pub fn hull(&self) -> &[Vec2] {
        &self.hull
    }

    /// The input points in their current (possibly sorted) order
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    /// Whether the hull is complete
    pub fn is_done(&self) -> bool {
        self.step == GrahamStep::Done
    }

    /// Forget all progress and start over with the same points
    pub fn restart(&mut self) {
        if self.points.len() < 3 {
            return;
        }
        self.hull.clear();
        self.step = GrahamStep::Sort;
        self.cursor = 0;
        self.sorted = false;
        self.finished_reported = false;
    }

    /// Advance the algorithm by one candidate point
    pub fn step(&mut self) -> StepEvent {
        match self.step {
            GrahamStep::Sort => {
                if !self.sorted {
                    self.sort_by_angle();
                    self.sorted = true;
                }
                self.cursor += 1;
                if self.cursor >= self.points.len() {
                    self.hull.push(self.points[0]);
                    self.hull.push(self.points[1]);
                    self.cursor = 2;
                    self.step = GrahamStep::Scan;
                }
                StepEvent::Examined
            }
            GrahamStep::Scan => {
                let point = self.points[self.cursor];
                let mut popped = 0;
                while self.hull.len() >= 2
                    && cross_z(
                        self.hull[self.hull.len() - 2],
                        self.hull[self.hull.len() - 1],
                        point,
                    ) <= 0.0
                {
                    self.hull.pop();
                    popped += 1;
                }
                self.hull.push(point);
                self.cursor += 1;
                if self.cursor >= self.points.len() {
                    log::debug!("graham scan complete, {} hull vertices", self.hull.len());
                    self.step = GrahamStep::Done;
                }
                StepEvent::Accepted { popped }
            }
            GrahamStep::Done => {
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

    /// Move the pivot (lowest y, then lowest x) to the front and sort the
    /// rest by polar angle around it, nearer points first on ties
    fn sort_by_angle(&mut self) {
        self.points
            .sort_by(|a, b| a.y.total_cmp(&b.y).then(a.x.total_cmp(&b.x)));
        let pivot = self.points[0];
        self.points[1..].sort_by(|a, b| {
            let angle_a = (a.y - pivot.y).atan2(a.x - pivot.x);
            let angle_b = (b.y - pivot.y).atan2(b.x - pivot.x);
            angle_a
                .total_cmp(&angle_b)
                .then(pivot.distance(*a).total_cmp(&pivot.distance(*b)))
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::is_counter_clockwise;

    fn v(x: f32, y: f32) -> Vec2 {
        Vec2::new(x, y)
    }

    #[test]
    fn test_square_with_interior_point() {
        let points = vec![
            v(2.0, 2.0),
            v(0.0, 0.0),
            v(4.0, 0.0),
            v(4.0, 4.0),
            v(0.0, 4.0),
        ];
        let mut scan = GrahamScan::new(points);
        let hull = scan.run_to_completion().to_vec();

        assert_eq!(hull.len(), 4);
        assert!(!hull.contains(&v(2.0, 2.0)));
        assert!(is_counter_clockwise(&hull));
    }

    #[test]
    fn test_step_pacing() {
        let points = vec![v(0.0, 0.0), v(4.0, 0.0), v(4.0, 4.0), v(0.0, 4.0)];
        let mut scan = GrahamScan::new(points);

        // The sort sweep examines one point per step
        assert_eq!(scan.current_step(), GrahamStep::Sort);
        for _ in 0..4 {
            assert_eq!(scan.step(), StepEvent::Examined);
        }
        assert_eq!(scan.current_step(), GrahamStep::Scan);

        // Two points are seeded, two remain to scan
        assert!(matches!(scan.step(), StepEvent::Accepted { .. }));
        assert!(matches!(scan.step(), StepEvent::Accepted { .. }));
        assert_eq!(scan.step(), StepEvent::Finished);
        assert_eq!(scan.step(), StepEvent::Idle);
    }

    #[test]
    fn test_collinear_points_are_popped() {
        let points = vec![
            v(0.0, 0.0),
            v(2.0, 0.0),
            v(4.0, 0.0),
            v(4.0, 4.0),
            v(0.0, 4.0),
        ];
        let mut scan = GrahamScan::new(points);
        let hull = scan.run_to_completion();
        assert_eq!(hull.len(), 4);
        assert!(!hull.contains(&v(2.0, 0.0)));
    }

    #[test]
    fn test_degenerate_input_finishes_immediately() {
        let mut scan = GrahamScan::new(vec![v(0.0, 0.0), v(1.0, 1.0)]);
        assert!(scan.is_done());
        assert_eq!(scan.step(), StepEvent::Finished);
        assert_eq!(scan.step(), StepEvent::Idle);
    }

    #[test]
    fn test_duplicates_collapse() {
        let points = vec![v(0.0, 0.0), v(0.0, 0.0), v(4.0, 0.0), v(2.0, 3.0)];
        let mut scan = GrahamScan::new(points);
        assert_eq!(scan.run_to_completion().len(), 3);
    }

    #[test]
    fn test_restart() {
        let points = vec![v(0.0, 0.0), v(4.0, 0.0), v(2.0, 3.0)];
        let mut scan = GrahamScan::new(points);
        let first = scan.run_to_completion().to_vec();

        scan.restart();
        assert!(!scan.is_done());
        let second = scan.run_to_completion().to_vec();
        assert_eq!(first, second);
    }
}

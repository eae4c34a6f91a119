//! Convex hull animation sketch
//!
//! Scatters a point cloud, runs one of the hull step machines at a fixed
//! step rate, dwells on the finished hull, then scatters again with fresh
//! points. Pressing fire cycles to the next algorithm.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use sketchbook_core::{InputEvent, Sketch, Vec2};
use sketchbook_hull::{GrahamScan, JarvisMarch, MonotoneChain, StepEvent};
use sketchbook_math::Rect;

/// Seconds the finished hull stays on screen before a rescatter
const DWELL_SECONDS: f32 = 4.0;

/// Margin kept free around the canvas edge, as a fraction of its size
const SCATTER_MARGIN: f32 = 0.05;

/// Which algorithm the animation runs
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HullAlgorithm {
    Graham,
    Jarvis,
    Monotone,
}

impl HullAlgorithm {
    /// The next algorithm in the rotation
    pub fn next(self) -> Self {
        match self {
            HullAlgorithm::Graham => HullAlgorithm::Jarvis,
            HullAlgorithm::Jarvis => HullAlgorithm::Monotone,
            HullAlgorithm::Monotone => HullAlgorithm::Graham,
        }
    }
}

impl std::str::FromStr for HullAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "graham" => Ok(HullAlgorithm::Graham),
            "jarvis" => Ok(HullAlgorithm::Jarvis),
            "monotone" => Ok(HullAlgorithm::Monotone),
            other => Err(format!("unknown hull algorithm '{}'", other)),
        }
    }
}

/// One machine behind a common face
enum Machine {
    Graham(GrahamScan),
    Jarvis(JarvisMarch),
    Monotone(MonotoneChain),
}

impl Machine {
    fn new(algorithm: HullAlgorithm, points: Vec<Vec2>) -> Self {
        match algorithm {
            HullAlgorithm::Graham => Machine::Graham(GrahamScan::new(points)),
            HullAlgorithm::Jarvis => Machine::Jarvis(JarvisMarch::new(points)),
            HullAlgorithm::Monotone => Machine::Monotone(MonotoneChain::new(points)),
        }
    }

    fn step(&mut self) -> StepEvent {
        match self {
            Machine::Graham(m) => m.step(),
            Machine::Jarvis(m) => m.step(),
            Machine::Monotone(m) => m.step(),
        }
    }

    fn is_done(&self) -> bool {
        match self {
            Machine::Graham(m) => m.is_done(),
            Machine::Jarvis(m) => m.is_done(),
            Machine::Monotone(m) => m.is_done(),
        }
    }

    fn hull(&self) -> &[Vec2] {
        match self {
            Machine::Graham(m) => m.hull(),
            Machine::Jarvis(m) => m.hull(),
            Machine::Monotone(m) => m.hull(),
        }
    }
}

/// The animated hull sketch
pub struct HullAnimation {
    algorithm: HullAlgorithm,
    machine: Machine,
    points: Vec<Vec2>,
    bounds: Rect,
    point_count: usize,
    /// Algorithm steps per second
    step_rate: f32,
    accumulator: f32,
    dwell: f32,
    rng: SmallRng,
}

impl HullAnimation {
    /// Create an animation over `point_count` scattered points
    pub fn new(
        algorithm: HullAlgorithm,
        bounds: Rect,
        point_count: usize,
        seed: u64,
    ) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let points = Self::scatter(&bounds, point_count, &mut rng);
        Self {
            algorithm,
            machine: Machine::new(algorithm, points.clone()),
            points,
            bounds,
            point_count,
            step_rate: 15.0,
            accumulator: 0.0,
            dwell: 0.0,
            rng,
        }
    }

    /// Uniform scatter with a margin, like the original's buffered canvas
    fn scatter(bounds: &Rect, count: usize, rng: &mut SmallRng) -> Vec<Vec2> {
        let x_buffer = SCATTER_MARGIN * bounds.width();
        let y_buffer = SCATTER_MARGIN * bounds.height();
        let max = bounds.max();
        (0..count)
            .map(|_| {
                Vec2::new(
                    rng.gen_range(bounds.min.x + x_buffer..max.x - x_buffer),
                    rng.gen_range(bounds.min.y + y_buffer..max.y - y_buffer),
                )
            })
            .collect()
    }

    fn rescatter(&mut self) {
        self.points = Self::scatter(&self.bounds, self.point_count, &mut self.rng);
        self.machine = Machine::new(self.algorithm, self.points.clone());
        self.dwell = 0.0;
        log::debug!(
            "rescattered {} points for {:?}",
            self.point_count,
            self.algorithm
        );
    }

    /// The algorithm currently running
    pub fn algorithm(&self) -> HullAlgorithm {
        self.algorithm
    }

    /// Switch algorithm and restart on fresh points
    pub fn set_algorithm(&mut self, algorithm: HullAlgorithm) {
        self.algorithm = algorithm;
        self.rescatter();
    }

    /// The current point cloud
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    /// The hull as built so far
    pub fn hull(&self) -> &[Vec2] {
        self.machine.hull()
    }

    /// Whether the current run has completed
    pub fn is_run_complete(&self) -> bool {
        self.machine.is_done()
    }
}

impl Sketch for HullAnimation {
    fn name(&self) -> &str {
        "convex-hull"
    }

    fn update(&mut self, dt: f32) {
        if self.machine.is_done() {
            // Hold the finished hull on screen, then start over
            self.dwell += dt;
            if self.dwell >= DWELL_SECONDS {
                self.rescatter();
            }
            return;
        }

        self.accumulator += dt;
        let period = 1.0 / self.step_rate;
        while self.accumulator >= period {
            self.accumulator -= period;
            if let StepEvent::Finished = self.machine.step() {
                break;
            }
        }
    }

    fn handle_input(&mut self, event: &InputEvent) {
        if let InputEvent::Fire = event {
            let next = self.algorithm.next();
            log::info!("switching hull algorithm to {:?}", next);
            self.set_algorithm(next);
        }
    }

    fn reset(&mut self) {
        self.rescatter();
        self.accumulator = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sketchbook_hull::{contains_point, is_counter_clockwise};

    fn animation(algorithm: HullAlgorithm) -> HullAnimation {
        HullAnimation::new(algorithm, Rect::from_size(400.0, 300.0), 20, 11)
    }

    #[test]
    fn test_scatter_respects_margin() {
        let anim = animation(HullAlgorithm::Graham);
        for point in anim.points() {
            assert!(point.x >= 20.0 && point.x <= 380.0);
            assert!(point.y >= 15.0 && point.y <= 285.0);
        }
        assert_eq!(anim.points().len(), 20);
    }

    #[test]
    fn test_run_completes_and_hull_is_valid() {
        for algorithm in [
            HullAlgorithm::Graham,
            HullAlgorithm::Jarvis,
            HullAlgorithm::Monotone,
        ] {
            let mut anim = animation(algorithm);
            for _ in 0..600 {
                anim.update(0.1);
                if anim.is_run_complete() {
                    break;
                }
            }
            assert!(anim.is_run_complete(), "{:?} never finished", algorithm);

            let hull = anim.hull().to_vec();
            assert!(hull.len() >= 3);
            assert!(is_counter_clockwise(&hull));
            for &p in anim.points() {
                assert!(contains_point(&hull, p));
            }
        }
    }

    #[test]
    fn test_dwell_then_rescatter() {
        let mut anim = animation(HullAlgorithm::Monotone);
        while !anim.is_run_complete() {
            anim.update(0.1);
        }
        let old_points = anim.points().to_vec();

        // Sit through the dwell; a new cloud appears
        for _ in 0..50 {
            anim.update(0.1);
        }
        assert!(!anim.is_run_complete());
        assert_ne!(anim.points(), old_points.as_slice());
    }

    #[test]
    fn test_fire_cycles_algorithm() {
        let mut anim = animation(HullAlgorithm::Graham);
        anim.handle_input(&InputEvent::Fire);
        assert_eq!(anim.algorithm(), HullAlgorithm::Jarvis);
        anim.handle_input(&InputEvent::Fire);
        assert_eq!(anim.algorithm(), HullAlgorithm::Monotone);
        anim.handle_input(&InputEvent::Fire);
        assert_eq!(anim.algorithm(), HullAlgorithm::Graham);
    }

    #[test]
    fn test_algorithm_from_str() {
        assert_eq!(
            "graham".parse::<HullAlgorithm>().unwrap(),
            HullAlgorithm::Graham
        );
        assert_eq!(
            "monotone".parse::<HullAlgorithm>().unwrap(),
            HullAlgorithm::Monotone
        );
        assert!("voronoi".parse::<HullAlgorithm>().is_err());
    }
}

//! Convex hull construction
//!
//! Three textbook algorithms, each available two ways:
//!
//! - [`convex_hull`] - one-shot monotone chain for when only the answer
//!   matters
//! - [`GrahamScan`], [`JarvisMarch`], [`MonotoneChain`] - explicit
//!   step-state machines that advance one candidate point per [`step`]
//!   call, so an animation layer can run one step per frame and draw the
//!   partial hull in between
//!
//! All variants agree on the output contract: the minimal convex polygon in
//! counter-clockwise order, collinear boundary points excluded.
//!
//! [`step`]: GrahamScan::step

mod graham;
mod jarvis;
mod monotone;

pub use graham::{GrahamScan, GrahamStep};
pub use jarvis::{JarvisMarch, JarvisStep};
pub use monotone::{MonotoneChain, MonotoneStep};

use sketchbook_math::Vec2;

/// Turn direction of the path a -> b -> c
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    CounterClockWise,
    ClockWise,
    CoLinear,
}

/// Classify the turn taken at `b` when walking a -> b -> c
pub fn orientation(a: Vec2, b: Vec2, c: Vec2) -> Orientation {
    let cross = cross_z(a, b, c);
    if cross > 0.0 {
        Orientation::CounterClockWise
    } else if cross < 0.0 {
        Orientation::ClockWise
    } else {
        Orientation::CoLinear
    }
}

/// Z component of (b - a) x (c - a)
///
/// Positive for a counter-clockwise turn. This is the single predicate all
/// three algorithms decide with.
#[inline]
pub fn cross_z(a: Vec2, b: Vec2, c: Vec2) -> f32 {
    (b - a).cross(c - a)
}

/// What one call to a step machine's `step()` did
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepEvent {
    /// A pacing pass examined one candidate without changing the hull
    Examined,
    /// A vertex was accepted onto the hull after rejecting `popped` points
    Accepted { popped: usize },
    /// The hull became complete on this step
    Finished,
    /// The machine was already done; nothing happened
    Idle,
}

/// Error from one-shot hull construction
#[derive(Debug, PartialEq, Eq)]
pub enum HullError {
    /// Fewer than three distinct input points
    InsufficientPoints,
    /// All distinct input points lie on a single line
    CollinearInput,
}

impl std::fmt::Display for HullError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HullError::InsufficientPoints => {
                write!(f, "need at least three distinct points")
            }
            HullError::CollinearInput => write!(f, "all points are collinear"),
        }
    }
}

impl std::error::Error for HullError {}

/// Sort points lexicographically by (x, y) and drop exact duplicates
pub(crate) fn sorted_distinct(points: &[Vec2]) -> Vec<Vec2> {
    let mut pts = points.to_vec();
    pts.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
    pts.dedup();
    pts
}

/// Compute the convex hull of a set of points
///
/// Returns the hull vertices in counter-clockwise order starting from the
/// lexicographically smallest point. Interior points and collinear boundary
/// points are excluded.
///
/// # Errors
/// [`HullError::InsufficientPoints`] when fewer than three distinct points
/// are given, [`HullError::CollinearInput`] when every point lies on one
/// line.
pub fn convex_hull(points: &[Vec2]) -> Result<Vec<Vec2>, HullError> {
    let pts = sorted_distinct(points);
    if pts.len() < 3 {
        return Err(HullError::InsufficientPoints);
    }

    // Monotone chain: grow the lower hull left to right, the upper hull
    // right to left, popping while the new point fails to make a
    // counter-clockwise turn.
    let mut lower: Vec<Vec2> = Vec::new();
    for &p in &pts {
        while lower.len() >= 2
            && cross_z(lower[lower.len() - 2], lower[lower.len() - 1], p) <= 0.0
        {
            lower.pop();
        }
        lower.push(p);
    }

    let mut upper: Vec<Vec2> = Vec::new();
    for &p in pts.iter().rev() {
        while upper.len() >= 2
            && cross_z(upper[upper.len() - 2], upper[upper.len() - 1], p) <= 0.0
        {
            upper.pop();
        }
        upper.push(p);
    }

    // The chain endpoints are shared; drop one copy of each
    lower.pop();
    upper.pop();
    lower.extend(upper);

    if lower.len() < 3 {
        return Err(HullError::CollinearInput);
    }
    Ok(lower)
}

/// Twice the signed area of a polygon (positive for counter-clockwise)
pub fn signed_area_doubled(polygon: &[Vec2]) -> f32 {
    let mut sum = 0.0;
    for i in 0..polygon.len() {
        let a = polygon[i];
        let b = polygon[(i + 1) % polygon.len()];
        sum += a.cross(b);
    }
    sum
}

/// Check that a polygon's vertices wind counter-clockwise
pub fn is_counter_clockwise(polygon: &[Vec2]) -> bool {
    signed_area_doubled(polygon) > 0.0
}

/// Check that a point lies inside or on a counter-clockwise convex polygon
///
/// The boundary test tolerates the rounding error of single-precision cross
/// products, so hull vertices themselves always pass.
pub fn contains_point(hull: &[Vec2], point: Vec2) -> bool {
    if hull.len() < 3 {
        return false;
    }
    for i in 0..hull.len() {
        let a = hull[i];
        let b = hull[(i + 1) % hull.len()];
        let tolerance = 1e-5 * ((b - a).length() * (point - a).length()).max(1.0);
        if cross_z(a, b, point) < -tolerance {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn v(x: f32, y: f32) -> Vec2 {
        Vec2::new(x, y)
    }

    /// Rotate a hull so the lexicographically smallest vertex comes first
    pub(crate) fn normalized_cycle(hull: &[Vec2]) -> Vec<Vec2> {
        let start = hull
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)))
            .map(|(i, _)| i)
            .unwrap_or(0);
        let mut rotated = hull.to_vec();
        rotated.rotate_left(start);
        rotated
    }

    #[test]
    fn test_orientation() {
        assert_eq!(
            orientation(v(0.0, 0.0), v(1.0, 0.0), v(1.0, 1.0)),
            Orientation::CounterClockWise
        );
        assert_eq!(
            orientation(v(0.0, 0.0), v(1.0, 0.0), v(1.0, -1.0)),
            Orientation::ClockWise
        );
        assert_eq!(
            orientation(v(0.0, 0.0), v(1.0, 0.0), v(2.0, 0.0)),
            Orientation::CoLinear
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(convex_hull(&[]), Err(HullError::InsufficientPoints));
    }

    #[test]
    fn test_duplicates_are_insufficient() {
        let dups = vec![v(1.0, 1.0); 5];
        assert_eq!(convex_hull(&dups), Err(HullError::InsufficientPoints));
    }

    #[test]
    fn test_collinear_input() {
        let line: Vec<Vec2> = (0..5).map(|i| v(i as f32, 2.0 * i as f32)).collect();
        assert_eq!(convex_hull(&line), Err(HullError::CollinearInput));
    }

    #[test]
    fn test_triangle() {
        let hull = convex_hull(&[v(0.0, 0.0), v(4.0, 0.0), v(2.0, 3.0)]).unwrap();
        assert_eq!(hull.len(), 3);
        assert!(is_counter_clockwise(&hull));
    }

    #[test]
    fn test_square_with_interior_point() {
        let points = vec![
            v(0.0, 0.0),
            v(4.0, 0.0),
            v(4.0, 4.0),
            v(0.0, 4.0),
            v(2.0, 2.0),
        ];
        let hull = convex_hull(&points).unwrap();
        assert_eq!(hull.len(), 4);
        assert!(!hull.contains(&v(2.0, 2.0)));
        assert_eq!(hull[0], v(0.0, 0.0));
        assert!(is_counter_clockwise(&hull));
    }

    #[test]
    fn test_collinear_edge_point_excluded() {
        let points = vec![
            v(0.0, 0.0),
            v(2.0, 0.0),
            v(4.0, 0.0),
            v(4.0, 4.0),
            v(0.0, 4.0),
        ];
        let hull = convex_hull(&points).unwrap();
        assert_eq!(hull.len(), 4);
        assert!(!hull.contains(&v(2.0, 0.0)));
    }

    #[test]
    fn test_contains_point() {
        let hull = convex_hull(&[v(0.0, 0.0), v(4.0, 0.0), v(4.0, 4.0), v(0.0, 4.0)]).unwrap();
        assert!(contains_point(&hull, v(2.0, 2.0)));
        assert!(contains_point(&hull, v(0.0, 0.0)));
        assert!(contains_point(&hull, v(2.0, 0.0)));
        assert!(!contains_point(&hull, v(5.0, 2.0)));
    }

    /// Strategy: clouds of small-integer points so every cross product is
    /// exact in f32 and the three algorithms cannot disagree numerically
    fn point_cloud() -> impl Strategy<Value = Vec<Vec2>> {
        prop::collection::vec((-20i32..=20, -20i32..=20), 3..32)
            .prop_map(|pts| pts.into_iter().map(|(x, y)| v(x as f32, y as f32)).collect())
    }

    proptest! {
        #[test]
        fn prop_hull_contains_all_points(points in point_cloud()) {
            if let Ok(hull) = convex_hull(&points) {
                prop_assert!(is_counter_clockwise(&hull));
                for &p in &points {
                    prop_assert!(contains_point(&hull, p), "point {:?} outside hull", p);
                }
            }
        }

        #[test]
        fn prop_hull_vertices_come_from_input(points in point_cloud()) {
            if let Ok(hull) = convex_hull(&points) {
                for vertex in &hull {
                    prop_assert!(points.contains(vertex));
                }
            }
        }

        #[test]
        fn prop_all_algorithms_agree(points in point_cloud()) {
            if let Ok(expected) = convex_hull(&points) {
                let graham = GrahamScan::new(points.clone()).run_to_completion().to_vec();
                let jarvis = JarvisMarch::new(points.clone()).run_to_completion().to_vec();
                let monotone = MonotoneChain::new(points.clone()).run_to_completion().to_vec();

                prop_assert_eq!(normalized_cycle(&monotone), expected.clone());
                prop_assert_eq!(normalized_cycle(&graham), expected.clone());
                prop_assert_eq!(normalized_cycle(&jarvis), expected);
            }
        }

        #[test]
        fn prop_hull_is_idempotent(points in point_cloud()) {
            if let Ok(hull) = convex_hull(&points) {
                let again = convex_hull(&hull).unwrap();
                prop_assert_eq!(again, hull);
            }
        }
    }
}

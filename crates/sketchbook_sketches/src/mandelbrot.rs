//! Mandelbrot set renderer
//!
//! Escape-time iteration over a sample grid. Rows are independent, so they
//! are farmed out across threads with rayon the same way the original
//! handed rows to a background worker and collected them by index.

use num::complex::Complex64;
use rayon::prelude::*;
use sketchbook_core::{Sketch, SketchStatus};
use sketchbook_math::linspace;

/// Sampling parameters for one rendering
#[derive(Clone, Debug, PartialEq)]
pub struct MandelbrotParams {
    /// Samples along the x axis
    pub x_points: usize,
    /// Samples along the y axis
    pub y_points: usize,
    /// Real-axis interval [min, max]
    pub x_limits: [f64; 2],
    /// Imaginary-axis interval [min, max]
    pub y_limits: [f64; 2],
    /// Iteration budget per sample
    pub max_steps: u32,
    /// Escape threshold compared against |z|^2
    pub threshold: f64,
}

impl Default for MandelbrotParams {
    fn default() -> Self {
        Self {
            x_points: 150,
            y_points: 150,
            x_limits: [-2.0, 0.5],
            y_limits: [-1.15, 1.15],
            max_steps: 100,
            threshold: 4.0,
        }
    }
}

/// One computed row of iteration counts
#[derive(Clone, Debug, PartialEq)]
pub struct RowResult {
    /// Row index into the sample grid
    pub row: usize,
    /// Iteration counts, one per x sample
    pub counts: Vec<u32>,
}

/// Number of iterations needed to decide whether c = x + iy escapes
///
/// Starts from z = c with the counter at 1 and iterates z <- z^2 + c until
/// |z|^2 reaches the threshold or the budget runs out. A result equal to
/// `max_steps` means the point is taken to be in the set.
pub fn escape_time(x: f64, y: f64, max_steps: u32, threshold: f64) -> u32 {
    let c = Complex64::new(x, y);
    let mut z = c;
    let mut steps = 1;
    while steps < max_steps && z.norm_sqr() < threshold {
        z = z * z + c;
        steps += 1;
    }
    steps
}

/// Compute one row of the sample grid
pub fn compute_row(params: &MandelbrotParams, row: usize) -> RowResult {
    let xs = linspace(params.x_limits[0], params.x_limits[1], params.x_points);
    let ys = linspace(params.y_limits[0], params.y_limits[1], params.y_points);
    let y = ys[row];

    let counts = xs
        .iter()
        .map(|&x| escape_time(x, y, params.max_steps, params.threshold))
        .collect();

    RowResult { row, counts }
}

/// Render the full grid, rows in parallel
///
/// The result is indexed `[row][column]` and is identical to computing each
/// row serially; only the scheduling differs.
pub fn render(params: &MandelbrotParams) -> Vec<Vec<u32>> {
    let mut rows: Vec<RowResult> = (0..params.y_points)
        .into_par_iter()
        .map(|row| compute_row(params, row))
        .collect();
    rows.sort_by_key(|result| result.row);
    rows.into_iter().map(|result| result.counts).collect()
}

/// Sketch wrapper that renders once and then reports finished
///
/// The original computed the whole image in `setup` and stopped its loop;
/// the equivalent here is one working update.
pub struct MandelbrotSketch {
    params: MandelbrotParams,
    image: Option<Vec<Vec<u32>>>,
}

impl MandelbrotSketch {
    /// Create a sketch with the given sampling parameters
    pub fn new(params: MandelbrotParams) -> Self {
        Self {
            params,
            image: None,
        }
    }

    /// The rendered iteration counts, if the sketch has run
    pub fn image(&self) -> Option<&Vec<Vec<u32>>> {
        self.image.as_ref()
    }
}

impl Sketch for MandelbrotSketch {
    fn name(&self) -> &str {
        "mandelbrot"
    }

    fn update(&mut self, _dt: f32) {
        if self.image.is_none() {
            log::info!(
                "rendering mandelbrot grid {}x{}",
                self.params.x_points,
                self.params.y_points
            );
            self.image = Some(render(&self.params));
        }
    }

    fn status(&self) -> SketchStatus {
        if self.image.is_some() {
            SketchStatus::Finished
        } else {
            SketchStatus::Running
        }
    }

    fn reset(&mut self) {
        self.image = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_params() -> MandelbrotParams {
        MandelbrotParams {
            x_points: 16,
            y_points: 12,
            ..MandelbrotParams::default()
        }
    }

    #[test]
    fn test_origin_is_in_the_set() {
        assert_eq!(escape_time(0.0, 0.0, 100, 4.0), 100);
    }

    #[test]
    fn test_far_point_escapes_quickly() {
        assert!(escape_time(2.0, 2.0, 100, 4.0) < 5);
    }

    #[test]
    fn test_cardioid_point_is_bounded() {
        // c = -1 is inside the period-2 bulb
        assert_eq!(escape_time(-1.0, 0.0, 100, 4.0), 100);
    }

    #[test]
    fn test_counts_start_at_one() {
        // Even an instantly escaping point reports at least one step
        assert!(escape_time(10.0, 10.0, 100, 4.0) >= 1);
    }

    #[test]
    fn test_row_shape() {
        let params = small_params();
        let result = compute_row(&params, 3);
        assert_eq!(result.row, 3);
        assert_eq!(result.counts.len(), 16);
    }

    #[test]
    fn test_render_dimensions() {
        let params = small_params();
        let image = render(&params);
        assert_eq!(image.len(), 12);
        assert!(image.iter().all(|row| row.len() == 16));
    }

    #[test]
    fn test_parallel_matches_serial() {
        let params = small_params();
        let parallel = render(&params);
        for row in 0..params.y_points {
            assert_eq!(parallel[row], compute_row(&params, row).counts);
        }
    }

    #[test]
    fn test_sketch_finishes_after_one_update() {
        let mut sketch = MandelbrotSketch::new(small_params());
        assert_eq!(sketch.status(), SketchStatus::Running);
        sketch.update(0.016);
        assert_eq!(sketch.status(), SketchStatus::Finished);
        assert!(sketch.image().is_some());
    }
}

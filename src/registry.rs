//! Sketch registry wiring
//!
//! Builds a [`SketchRunner`] with every portfolio sketch registered and
//! configured from the application config.

use crate::config::AppConfig;
use sketchbook_core::{SketchRunner, Vec2};
use sketchbook_math::Rect;
use sketchbook_sketches::{
    BouncingBall, GameOfLife, HanoiSketch, HullAlgorithm, HullAnimation, LineFollower,
    LinePath, MandelbrotParams, MandelbrotSketch, MazeSketch, Missile, MissileSketch,
    SnakeGame, TankGame,
};

/// Register every portfolio sketch into a fresh runner
pub fn build_runner(config: &AppConfig) -> SketchRunner {
    let bounds = Rect::from_size(config.canvas.width, config.canvas.height);
    let gravity = Vec2::new(config.physics.gravity[0], config.physics.gravity[1]);
    let seed = config.runner.seed;

    let mut runner = SketchRunner::new();

    runner.register(Box::new(BouncingBall::new(
        bounds,
        config.physics.ball_radius,
        config.physics.ball_mass,
        gravity,
    )));

    runner.register(Box::new(MissileSketch::new(
        Missile::new(
            Vec2::new(bounds.min.x + 20.0, bounds.max().y - 20.0),
            Vec2::new(1.0, -1.0),
            600.0,
            4000.0,
            0.05,
        ),
        bounds.center(),
    )));

    runner.register(Box::new(MandelbrotSketch::new(MandelbrotParams {
        x_points: config.mandelbrot.x_points,
        y_points: config.mandelbrot.y_points,
        max_steps: config.mandelbrot.max_steps,
        threshold: config.mandelbrot.threshold,
        ..MandelbrotParams::default()
    })));

    runner.register(Box::new(SnakeGame::new(Vec::new(), seed)));

    runner.register(Box::new(TankGame::new(
        config.tanks.players,
        config.canvas.width as usize,
        config.canvas.height,
        seed,
    )));

    match HanoiSketch::new(3, 0.5) {
        Ok(sketch) => runner.register(Box::new(sketch)),
        Err(e) => log::warn!("towers-of-hanoi unavailable: {}", e),
    }

    runner.register(Box::new(MazeSketch::demo()));

    runner.register(Box::new(LineFollower::new(
        LinePath::straight(
            Vec2::new(0.0, bounds.center().y),
            Vec2::new(bounds.max().x * 10.0, bounds.center().y),
        ),
        Vec2::new(0.0, bounds.center().y + 4.0),
        0.0,
    )));

    runner.register(Box::new(GameOfLife::random_soup(64, 48, seed)));

    let algorithm = config.hull.algorithm.parse().unwrap_or_else(|e| {
        log::warn!("{}; falling back to jarvis", e);
        HullAlgorithm::Jarvis
    });
    runner.register(Box::new(HullAnimation::new(
        algorithm,
        bounds,
        config.hull.points,
        seed,
    )));

    runner
}

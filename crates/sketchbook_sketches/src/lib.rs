//! The sketch portfolio
//!
//! Each module is one self-contained simulation implementing
//! [`sketchbook_core::Sketch`]: physics toys, small games, and algorithm
//! animations. The modules share nothing but the core trait, the math
//! primitives, and (where it fits) the physics world.

pub mod antenna;
pub mod bouncing_ball;
pub mod hanoi;
pub mod hull_anim;
pub mod life;
pub mod line_follow;
pub mod mandelbrot;
pub mod maze;
pub mod missile;
pub mod snake;
pub mod tanks;

pub use antenna::{
    bi_quad, dipole, folded_dipole, helix, turnstile, yagi_uda, AntennaError,
};
pub use bouncing_ball::BouncingBall;
pub use hanoi::{solve_bfs, HanoiError, HanoiSketch, HanoiState, Tower};
pub use hull_anim::{HullAlgorithm, HullAnimation};
pub use life::GameOfLife;
pub use line_follow::{AnalogLightSensor, DigitalLightSensor, LineFollower, LinePath};
pub use mandelbrot::{MandelbrotParams, MandelbrotSketch};
pub use maze::{LeftHandSolver, Maze, MazeError, MazeSketch, Robot, Walls};
pub use missile::{Missile, MissileSketch};
pub use snake::{LevelTemplate, SnakeGame};
pub use tanks::{TankGame, WeaponKind};

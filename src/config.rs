//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`SKB_SECTION__KEY`)

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Runner configuration
    #[serde(default)]
    pub runner: RunnerConfig,
    /// Canvas configuration
    #[serde(default)]
    pub canvas: CanvasConfig,
    /// Physics configuration
    #[serde(default)]
    pub physics: PhysicsConfig,
    /// Convex hull animation configuration
    #[serde(default)]
    pub hull: HullConfig,
    /// Mandelbrot configuration
    #[serde(default)]
    pub mandelbrot: MandelbrotConfig,
    /// Tanks configuration
    #[serde(default)]
    pub tanks: TanksConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`SKB_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        // Load default config (required)
        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        // Load user config (optional)
        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // Environment variables override everything
        // SKB_RUNNER__SKETCH=snake -> runner.sketch = "snake"
        figment = figment.merge(Env::prefixed("SKB_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }
}

/// Runner configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Name of the sketch to run
    pub sketch: String,
    /// Frames to run before stopping (0 = until the sketch finishes)
    pub max_frames: u64,
    /// Simulated frames per second
    pub fps: f32,
    /// Seed for every randomized sketch
    pub seed: u64,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            sketch: "convex-hull".to_string(),
            max_frames: 600,
            fps: 60.0,
            seed: 42,
        }
    }
}

/// Canvas configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanvasConfig {
    /// Canvas width in pixels
    pub width: f32,
    /// Canvas height in pixels
    pub height: f32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

/// Physics configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhysicsConfig {
    /// Gravity acceleration [x, y]; canvas y points down
    pub gravity: [f32; 2],
    /// Ball radius for the bouncing ball sketch
    pub ball_radius: f32,
    /// Ball mass for the bouncing ball sketch
    pub ball_mass: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: [0.0, 500.0],
            ball_radius: 15.0,
            ball_mass: 1.0,
        }
    }
}

/// Convex hull animation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HullConfig {
    /// Algorithm: "graham", "jarvis", or "monotone"
    pub algorithm: String,
    /// Number of scattered points
    pub points: usize,
}

impl Default for HullConfig {
    fn default() -> Self {
        Self {
            algorithm: "jarvis".to_string(),
            points: 45,
        }
    }
}

/// Mandelbrot configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MandelbrotConfig {
    /// Samples along the x axis
    pub x_points: usize,
    /// Samples along the y axis
    pub y_points: usize,
    /// Iteration budget per sample
    pub max_steps: u32,
    /// Escape threshold compared against |z|^2
    pub threshold: f64,
}

impl Default for MandelbrotConfig {
    fn default() -> Self {
        Self {
            x_points: 150,
            y_points: 150,
            max_steps: 100,
            threshold: 4.0,
        }
    }
}

/// Tanks configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TanksConfig {
    /// Number of players
    pub players: usize,
}

impl Default for TanksConfig {
    fn default() -> Self {
        Self { players: 2 }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}

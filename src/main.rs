//! sketchbook - headless sketch runner
//!
//! Loads the configuration, wires up the sketch registry, and steps the
//! configured sketch at a fixed timestep, logging progress along the way.

use sketchbook::config::AppConfig;
use sketchbook::registry;
use sketchbook_core::SketchStatus;

fn main() {
    // Load configuration before logging so the config can pick the level
    let config = AppConfig::load().unwrap_or_else(|e| {
        eprintln!("Failed to load config: {}. Using defaults.", e);
        AppConfig::default()
    });

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.debug.log_level.as_str()),
    )
    .init();
    log::info!("Starting sketchbook");

    let mut runner = registry::build_runner(&config);
    log::info!("Registered sketches: {:?}", runner.registered_names());

    runner
        .push_sketch(&config.runner.sketch)
        .unwrap_or_else(|e| panic!("Failed to activate sketch: {}", e));

    let dt = 1.0 / config.runner.fps;
    let report_every = config.runner.fps.round().max(1.0) as u64;
    let mut frames = 0u64;

    loop {
        let status = runner.update(dt);
        frames += 1;

        if frames % report_every == 0 {
            log::debug!(
                "frame {} ({:.1}s simulated)",
                frames,
                frames as f32 * dt
            );
        }

        if status == SketchStatus::Finished {
            log::info!("sketch '{}' finished after {} frames", config.runner.sketch, frames);
            break;
        }
        if config.runner.max_frames > 0 && frames >= config.runner.max_frames {
            log::info!(
                "stopping '{}' after {} frames",
                config.runner.sketch,
                frames
            );
            break;
        }
    }
}

//! Integration tests for configuration loading
//!
//! Tests that verify config loading from files and environment variables.

use serial_test::serial;
use sketchbook::config::AppConfig;

#[test]
#[serial]
fn test_env_override() {
    std::env::set_var("SKB_RUNNER__SKETCH", "snake");
    let config = AppConfig::load().unwrap();
    println!("Configured sketch: {}", config.runner.sketch);
    assert_eq!(config.runner.sketch, "snake");
    std::env::remove_var("SKB_RUNNER__SKETCH");
}

#[test]
#[serial]
fn test_default_file_loading() {
    // Remove env var to test file-based config
    std::env::remove_var("SKB_RUNNER__SKETCH");

    let cwd = std::env::current_dir().unwrap();
    println!("Current dir: {:?}", cwd);
    println!(
        "config/default.toml exists: {}",
        cwd.join("config/default.toml").exists()
    );

    let config = AppConfig::load().unwrap();
    println!("Configured sketch: {}", config.runner.sketch);
    assert_eq!(config.hull.points, 45);
}

#[test]
#[serial]
fn test_missing_config_dir_falls_back_to_defaults() {
    std::env::remove_var("SKB_RUNNER__SKETCH");
    let config = AppConfig::load_from("/nonexistent-config-dir").unwrap();
    assert_eq!(config.runner.sketch, "convex-hull");
    assert_eq!(config.canvas.width, 800.0);
}

#[test]
#[serial]
fn test_numeric_env_override() {
    std::env::set_var("SKB_HULL__POINTS", "12");
    let config = AppConfig::load().unwrap();
    assert_eq!(config.hull.points, 12);
    std::env::remove_var("SKB_HULL__POINTS");
}

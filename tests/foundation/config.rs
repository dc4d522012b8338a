//! Integration tests for resolver configuration

use xavi_foundation::{DEFAULT_FPS, DEFAULT_TAU_LIMITS, POINT_SPACING, ResolverConfig};

#[test]
fn defaults() {
    let config = ResolverConfig::default();
    assert_eq!(config.fps, DEFAULT_FPS);
    assert_eq!(config.tau_limits, DEFAULT_TAU_LIMITS);
    assert!((config.point_spacing - POINT_SPACING).abs() < f64::EPSILON);
}

#[test]
fn builders_and_presets() {
    let config = ResolverConfig::strict_window().with_fps(10);
    assert_eq!(config.fps, 10);
    assert_eq!(config.tau_limits, [1.0, 2.0]);

    let config = ResolverConfig::default()
        .with_tau_limits(0.5, 1.5)
        .with_point_spacing(2.0)
        .with_stop_speed(0.1)
        .with_acceleration_threshold(1.0);
    assert_eq!(config.tau_limits, [0.5, 1.5]);
    assert!((config.point_spacing - 2.0).abs() < f64::EPSILON);
    assert!((config.stop_speed - 0.1).abs() < f64::EPSILON);
    assert!((config.acceleration_threshold - 1.0).abs() < f64::EPSILON);
}

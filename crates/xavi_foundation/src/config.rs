//! Configuration for query resolution and trajectory joining.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default trajectory sampling rate, in frames per second.
pub const DEFAULT_FPS: u32 = 20;

/// Default admissible rollback window, in seconds before the action.
pub const DEFAULT_TAU_LIMITS: [f64; 2] = [1.0, 5.0];

/// Minimum spacing between consecutive planned points, in meters.
pub const POINT_SPACING: f64 = 1.0;

/// Configuration for the resolvers and the default segmenter.
///
/// Values read from a scenario file may omit any field.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ResolverConfig {
    /// Trajectory sampling rate.
    pub fps: u32,

    /// Rollback window `[low, high]` in seconds.
    pub tau_limits: [f64; 2],

    /// Required forward progress past the seam when joining trajectories.
    pub point_spacing: f64,

    /// Speed below which an agent is considered stopped (m/s).
    pub stop_speed: f64,

    /// Acceleration magnitude above which speed changes are labelled (m/s^2).
    pub acceleration_threshold: f64,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            fps: DEFAULT_FPS,
            tau_limits: DEFAULT_TAU_LIMITS,
            point_spacing: POINT_SPACING,
            stop_speed: 0.5,
            acceleration_threshold: 0.5,
        }
    }
}

impl ResolverConfig {
    /// A configuration with a narrow one-to-two second rollback window.
    #[must_use]
    pub fn strict_window() -> Self {
        Self {
            tau_limits: [1.0, 2.0],
            ..Self::default()
        }
    }

    /// Builder method to set the sampling rate.
    #[must_use]
    pub fn with_fps(mut self, fps: u32) -> Self {
        self.fps = fps;
        self
    }

    /// Builder method to set the rollback window in seconds.
    #[must_use]
    pub fn with_tau_limits(mut self, low: f64, high: f64) -> Self {
        self.tau_limits = [low, high];
        self
    }

    /// Builder method to set the seam spacing.
    #[must_use]
    pub fn with_point_spacing(mut self, spacing: f64) -> Self {
        self.point_spacing = spacing;
        self
    }

    /// Builder method to set the stop speed threshold.
    #[must_use]
    pub fn with_stop_speed(mut self, speed: f64) -> Self {
        self.stop_speed = speed;
        self
    }

    /// Builder method to set the acceleration threshold.
    #[must_use]
    pub fn with_acceleration_threshold(mut self, threshold: f64) -> Self {
        self.acceleration_threshold = threshold;
        self
    }
}

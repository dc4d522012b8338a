//! Sampled agent states.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use xavi_foundation::Point2;

/// One sampled state of an agent.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AgentState {
    /// Frame index at which the state was sampled.
    pub time: u64,
    /// Position in the road plane.
    pub position: Point2,
    /// Heading in radians.
    pub heading: f64,
    /// Speed in m/s.
    #[cfg_attr(feature = "serde", serde(default))]
    pub speed: f64,
    /// Longitudinal acceleration in m/s^2, if measured.
    #[cfg_attr(feature = "serde", serde(default))]
    pub acceleration: Option<f64>,
    /// Macro action the agent was executing, once filled in.
    #[cfg_attr(feature = "serde", serde(default))]
    pub macro_action: Option<String>,
    /// Maneuver the agent was executing, once filled in.
    #[cfg_attr(feature = "serde", serde(default))]
    pub maneuver: Option<String>,
}

impl AgentState {
    /// Creates an unlabelled, stationary state.
    #[must_use]
    pub fn new(time: u64, position: Point2, heading: f64) -> Self {
        Self {
            time,
            position,
            heading,
            speed: 0.0,
            acceleration: None,
            macro_action: None,
            maneuver: None,
        }
    }

    /// Builder method to set the speed.
    #[must_use]
    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = speed;
        self
    }

    /// Builder method to set the measured acceleration.
    #[must_use]
    pub fn with_acceleration(mut self, acceleration: f64) -> Self {
        self.acceleration = Some(acceleration);
        self
    }

    /// Builder method to set the macro action label.
    #[must_use]
    pub fn with_macro_action(mut self, macro_action: impl Into<String>) -> Self {
        self.macro_action = Some(macro_action.into());
        self
    }

    /// Builder method to set the maneuver label.
    #[must_use]
    pub fn with_maneuver(mut self, maneuver: impl Into<String>) -> Self {
        self.maneuver = Some(maneuver.into());
        self
    }

    /// Returns true if neither label has been filled in.
    #[must_use]
    pub fn is_unlabelled(&self) -> bool {
        self.macro_action.is_none() && self.maneuver.is_none()
    }
}

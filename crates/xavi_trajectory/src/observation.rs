//! Observed agent trajectories.

use std::collections::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use xavi_foundation::{AgentId, Error, ErrorKind, Result};

use crate::state::AgentState;
use crate::trajectory::Trajectory;

/// The observed trajectory of one agent together with its latest known state.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Observation {
    /// Everything observed so far, possibly extended with predictions.
    pub trajectory: Trajectory,
    /// The most recent known state.
    pub state: AgentState,
}

impl Observation {
    /// Creates an observation.
    #[must_use]
    pub fn new(trajectory: Trajectory, state: AgentState) -> Self {
        Self { trajectory, state }
    }

    /// Creates an observation whose latest state is the trajectory's last state.
    ///
    /// Returns `None` for an empty trajectory.
    #[must_use]
    pub fn from_trajectory(trajectory: Trajectory) -> Option<Self> {
        let state = trajectory.last()?.clone();
        Some(Self { trajectory, state })
    }
}

/// Observations of every tracked agent.
pub type Observations = HashMap<AgentId, Observation>;

/// Truncates every observation to its first `tau` states.
///
/// Returns the truncated observations and, per agent, the state at `tau - 1`,
/// which becomes the frame counterfactual generation starts from. The latest
/// state of each truncated observation is left unchanged.
///
/// # Errors
///
/// Returns `InvalidTruncation` if `tau` is zero or exceeds the length of an
/// agent's trajectory.
pub fn truncate_observations(
    observations: &Observations,
    tau: usize,
) -> Result<(Observations, HashMap<AgentId, AgentState>)> {
    let mut truncated = Observations::with_capacity(observations.len());
    let mut previous_frame = HashMap::with_capacity(observations.len());

    for (&agent, observation) in observations {
        let Some(last) = tau
            .checked_sub(1)
            .and_then(|i| observation.trajectory.get(i))
        else {
            return Err(Error::new(ErrorKind::InvalidTruncation { agent, tau }));
        };
        previous_frame.insert(agent, last.clone());
        truncated.insert(
            agent,
            Observation::new(
                observation.trajectory.slice(0, Some(tau)),
                observation.state.clone(),
            ),
        );
    }

    Ok((truncated, previous_frame))
}

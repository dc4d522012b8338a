//! Ordered state trajectories with structural sharing.
//!
//! Trajectories are backed by `im::Vector`, so cloning and slicing share
//! structure with the original instead of copying every state.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use xavi_foundation::Point2;

use crate::state::AgentState;

/// An ordered sequence of sampled agent states.
///
/// Indices are positional: a slice always starts again at index 0, while each
/// state keeps the frame `time` it was sampled at.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Trajectory {
    states: im::Vector<AgentState>,
}

impl Trajectory {
    /// Creates an empty trajectory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of states.
    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Returns true if the trajectory has no states.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Gets a state by position.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&AgentState> {
        self.states.get(index)
    }

    /// Gets a mutable state by position.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut AgentState> {
        self.states.get_mut(index)
    }

    /// Returns the first state.
    #[must_use]
    pub fn first(&self) -> Option<&AgentState> {
        self.states.front()
    }

    /// Returns the last state.
    #[must_use]
    pub fn last(&self) -> Option<&AgentState> {
        self.states.back()
    }

    /// Appends a state.
    pub fn push(&mut self, state: AgentState) {
        self.states.push_back(state);
    }

    /// Iterates over the states in order.
    pub fn states(&self) -> impl Iterator<Item = &AgentState> {
        self.states.iter()
    }

    /// Iterates mutably over the states in order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut AgentState> {
        self.states.iter_mut()
    }

    /// Positions of all states.
    #[must_use]
    pub fn path(&self) -> Vec<Point2> {
        self.states.iter().map(|s| s.position).collect()
    }

    /// Headings of all states.
    #[must_use]
    pub fn heading(&self) -> Vec<f64> {
        self.states.iter().map(|s| s.heading).collect()
    }

    /// Returns the states in `[start, end)` as a new trajectory.
    ///
    /// `end = None` means the end of the trajectory. Bounds are clamped to the
    /// trajectory length, and an inverted range yields an empty trajectory.
    #[must_use]
    pub fn slice(&self, start: usize, end: Option<usize>) -> Self {
        let len = self.len();
        let end = end.map_or(len, |e| e.min(len));
        let start = start.min(end);

        let mut states = self.states.skip(start);
        states.truncate(end - start);
        Self { states }
    }

    /// Returns this trajectory followed by `other`.
    #[must_use]
    pub fn concat(&self, other: &Self) -> Self {
        let mut states = self.states.clone();
        states.append(other.states.clone());
        Self { states }
    }
}

impl FromIterator<AgentState> for Trajectory {
    fn from_iter<I: IntoIterator<Item = AgentState>>(iter: I) -> Self {
        Self {
            states: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<AgentState>> for Trajectory {
    fn from(states: Vec<AgentState>) -> Self {
        states.into_iter().collect()
    }
}

impl<'a> IntoIterator for &'a Trajectory {
    type Item = &'a AgentState;
    type IntoIter = im::vector::Iter<'a, AgentState>;

    fn into_iter(self) -> Self::IntoIter {
        self.states.iter()
    }
}

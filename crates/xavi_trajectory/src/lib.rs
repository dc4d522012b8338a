//! Agent states, trajectories, action segmentation, and trajectory utilities.
//!
//! This crate provides:
//! - [`AgentState`] - A single sampled state of an agent
//! - [`Trajectory`] - An ordered, persistent sequence of states
//! - [`Observation`] / [`Observations`] - Per-agent observed trajectories
//! - [`ActionSegment`] and [`ActionSegmenter`] - Labelled action intervals
//! - Utilities for truncation and label backfilling

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod labels;
pub mod observation;
pub mod segment;
pub mod state;
pub mod trajectory;

pub use labels::{
    PlannedMacroAction, PlannedManeuver, fill_missing_actions, fix_initial_state, most_common,
};
pub use observation::{Observation, Observations, truncate_observations};
pub use segment::{ActionSegment, ActionSegmenter, KinematicSegmenter, segments_cover};
pub use state::AgentState;
pub use trajectory::Trajectory;

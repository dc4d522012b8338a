//! Label backfilling and label statistics.

use std::collections::HashMap;
use std::hash::Hash;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use tracing::debug;
use xavi_foundation::Point2;

use crate::trajectory::Trajectory;

/// A maneuver of a plan together with the path it was planned along.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlannedManeuver {
    /// Maneuver name.
    pub name: String,
    /// Planned positions.
    pub path: Vec<Point2>,
}

/// A macro action of a plan and its maneuvers, in execution order.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlannedMacroAction {
    /// Macro action name.
    pub name: String,
    /// Maneuvers the macro action is made of.
    pub maneuvers: Vec<PlannedManeuver>,
}

/// Labels every state with the macro action and maneuver of the nearest
/// planned point.
///
/// Leaves the trajectory untouched when the plan contains no points.
pub fn fill_missing_actions(trajectory: &mut Trajectory, plan: &[PlannedMacroAction]) {
    let mut points = Vec::new();
    let mut labels = Vec::new();
    for macro_action in plan {
        for maneuver in &macro_action.maneuvers {
            points.extend_from_slice(&maneuver.path);
            labels.extend(
                std::iter::repeat((macro_action.name.as_str(), maneuver.name.as_str()))
                    .take(maneuver.path.len()),
            );
        }
    }

    if points.is_empty() {
        debug!("plan has no points, labels left unfilled");
        return;
    }

    for state in trajectory.iter_mut() {
        if let Some(nearest) = state.position.nearest_index(&points) {
            let (macro_action, maneuver) = labels[nearest];
            state.macro_action = Some(macro_action.to_string());
            state.maneuver = Some(maneuver.to_string());
        }
    }
}

/// Copies the labels of the second state into an unlabelled initial state.
///
/// Only applies when the first state is at time 0 and has no labels.
pub fn fix_initial_state(trajectory: &mut Trajectory) {
    let Some(second) = trajectory.get(1).cloned() else {
        return;
    };
    if let Some(first) = trajectory.get_mut(0) {
        if first.time == 0 && first.is_unlabelled() {
            first.macro_action = second.macro_action;
            first.maneuver = second.maneuver;
        }
    }
}

/// Returns the most common element, preferring the earliest on ties.
#[must_use]
pub fn most_common<T>(items: &[T]) -> Option<&T>
where
    T: Eq + Hash,
{
    let mut counts: HashMap<&T, usize> = HashMap::new();
    for item in items {
        *counts.entry(item).or_default() += 1;
    }
    let mut best: Option<(&T, usize)> = None;
    for item in items {
        let count = counts[item];
        if best.is_none_or(|(_, c)| count > c) {
            best = Some((item, count));
        }
    }
    best.map(|(item, _)| item)
}

//! Temporal resolution of causal queries.
//!
//! Given a query and the observed trajectories, the resolver finds two anchors
//! in the subject agent's segmented action history:
//! - `t_action`: when the queried action began (factual queries), or when a
//!   counter-action stopped being active (counterfactual queries)
//! - `tau`: how far back history is rolled back before a counterfactual
//!   continuation is generated
//!
//! Both scans walk the segments from the most recent one backwards.

use std::collections::BTreeSet;

use tracing::{debug, info, warn};
use xavi_foundation::{ActionLibrary, Error, ErrorContext, Result};
use xavi_trajectory::{ActionSegment, ActionSegmenter, Observations, Trajectory, segments_cover};

use crate::query::{Query, QueryType, Tense};

// =============================================================================
// Factual Scan
// =============================================================================

/// Where the queried action most recently began.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActionMatch {
    /// First timestep of the action's most recent run.
    pub t_action: usize,
    /// Index, counting back from the most recent segment, of the segment
    /// that ends just before the action.
    pub segment_index: usize,
}

impl ActionMatch {
    /// Rollback for a factual query, clamped into the admissible window.
    ///
    /// Starts from the start of the segment preceding the action. If that puts
    /// fewer than `low` or more than `high` timesteps between `tau` and
    /// `t_action`, `tau` is moved to the nearest window edge. Never below 1.
    #[must_use]
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn rollback(&self, segments: &[ActionSegment], window: (f64, f64)) -> usize {
        let (low, high) = window;
        let previous_index = segments.len().saturating_sub(self.segment_index + 1);
        let Some(previous) = segments.get(previous_index) else {
            return 1;
        };

        let t_action = self.t_action as f64;
        let start = previous.start() as f64;
        let tau = if t_action - start < low {
            (t_action - low).trunc()
        } else if t_action - start > high {
            (t_action - high).trunc()
        } else {
            start
        };
        tau.max(1.0) as usize
    }
}

/// Finds where `action` most recently began.
///
/// If the action is active all the way back to the first segment, the match
/// falls back to `t_action = 1` at the oldest segment.
///
/// # Errors
///
/// Returns `ActionNotFound` if no segment contains the action.
pub fn action_matched_backward(segments: &[ActionSegment], action: &str) -> Result<ActionMatch> {
    let mut action_matched = false;
    for (i, segment) in segments.iter().rev().enumerate() {
        if segment.contains(action) {
            action_matched = true;
        } else if action_matched {
            return Ok(ActionMatch {
                t_action: segment.last_time() + 1,
                segment_index: i,
            });
        }
    }

    if action_matched {
        Ok(ActionMatch {
            t_action: 1,
            segment_index: segments.len() - 1,
        })
    } else {
        Err(Error::action_not_found(action))
    }
}

// =============================================================================
// Counterfactual Scan
// =============================================================================

/// Where a counter-action most recently stopped being active.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CounterActionMatch {
    /// First timestep after the counter-action's run, scanning backwards.
    pub t_action: usize,
    /// Index, counting back from the most recent segment, of the first
    /// segment without the counter-action.
    pub segment_index: usize,
    /// The counter-action that was found.
    pub matched_action: String,
}

impl CounterActionMatch {
    /// Rollback for a counterfactual query.
    ///
    /// This is a duration: the number of timesteps from the start of the
    /// segment preceding the counter-action's run to the end of the
    /// trajectory. No window is applied.
    #[must_use]
    pub fn rollback(&self, segments: &[ActionSegment], trajectory_length: usize) -> usize {
        let previous_index = segments.len().saturating_sub(self.segment_index + 1);
        segments
            .get(previous_index)
            .map_or(trajectory_length, |previous| {
                trajectory_length.saturating_sub(previous.start())
            })
    }
}

/// Finds where one of `counter_actions` most recently stopped being active.
///
/// The first counter-action met while scanning back is the one tracked; the
/// match is the first older segment that no longer contains it. Returns `None`
/// if no counter-action occurs, or if it is active back to the first segment.
#[must_use]
pub fn counter_action_matched_backward(
    segments: &[ActionSegment],
    counter_actions: &BTreeSet<String>,
) -> Option<CounterActionMatch> {
    let mut matched_action: Option<&str> = None;
    for (i, segment) in segments.iter().rev().enumerate() {
        if matched_action.is_none() {
            matched_action = segment
                .actions()
                .iter()
                .find(|a| counter_actions.contains(*a))
                .map(String::as_str);
        }
        if let Some(matched) = matched_action {
            if !segment.contains(matched) {
                return Some(CounterActionMatch {
                    t_action: segment.last_time() + 1,
                    segment_index: i,
                    matched_action: matched.to_string(),
                });
            }
        }
    }
    None
}

// =============================================================================
// Resolver
// =============================================================================

/// The anchors written back onto a query.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Resolution {
    /// Start of the queried action; `None` if no counterfactual start exists.
    pub t_action: Option<usize>,
    /// Rollback; `None` if no counterfactual start exists.
    pub tau: Option<usize>,
}

/// Resolves `t_action` and `tau` for queries.
pub struct TemporalResolver<'a, S> {
    library: &'a ActionLibrary,
    segmenter: S,
}

impl<'a, S: ActionSegmenter> TemporalResolver<'a, S> {
    /// Creates a resolver using `library` for counter-actions and `segmenter`
    /// to split trajectories into action segments.
    #[must_use]
    pub fn new(library: &'a ActionLibrary, segmenter: S) -> Self {
        Self { library, segmenter }
    }

    /// Computes the anchors of `query` and writes them onto it.
    ///
    /// `t_action` is always written. `tau` is written unless the caller
    /// preset it. The returned resolution holds the query's final values.
    ///
    /// # Errors
    ///
    /// - `AgentNotFound` if the queried agent has no observation
    /// - `EmptyTrajectory` if nothing is observed in the queried time range
    /// - `ActionNotFound` if a factual scan cannot find the action
    /// - `InvalidQuery` if a what query has no reference time, or one outside
    ///   the queried states
    pub fn resolve(
        &self,
        query: &mut Query,
        observations: &Observations,
        current_t: usize,
    ) -> Result<Resolution> {
        let observation = observations
            .get(&query.agent_id)
            .ok_or_else(|| Error::agent_not_found(query.agent_id))?;
        let trajectory = Self::restrict_to_tense(query, &observation.trajectory, current_t);

        let len = trajectory.len();
        if len == 0 {
            return Err(Error::empty_trajectory(Some(query.agent_id)));
        }

        let segments = self.segmenter.segment(&trajectory);
        debug_assert!(
            segments_cover(&segments, len),
            "segmentation must cover the trajectory"
        );

        let full_rollback = len - 1;
        let context = || ErrorContext::new().with_source(query.to_string());

        let resolution = match query.kind {
            QueryType::Why => {
                let found = action_matched_backward(&segments, &query.action)
                    .map_err(|e| e.with_context(context().with_frame("factual scan")))?;
                Resolution {
                    t_action: Some(found.t_action),
                    tau: Some(found.rollback(&segments, query.rollback_window())),
                }
            }
            QueryType::WhyNot => match self.counterfactual(query, &segments) {
                Some(found) => Resolution {
                    t_action: Some(found.t_action),
                    tau: Some(found.rollback(&segments, len)),
                },
                None => Resolution::default(),
            },
            QueryType::WhatIf if query.negative => {
                let found = action_matched_backward(&segments, &query.action)
                    .map_err(|e| e.with_context(context().with_frame("factual scan")))?;
                Resolution {
                    t_action: Some(found.t_action),
                    tau: Some(full_rollback),
                }
            }
            QueryType::WhatIf => Resolution {
                t_action: self.counterfactual(query, &segments).map(|m| m.t_action),
                tau: Some(full_rollback),
            },
            QueryType::What => {
                let t_action = query.t_action.ok_or_else(|| {
                    Error::invalid_query("what query has no reference time")
                        .with_context(context())
                })?;
                if t_action >= len {
                    return Err(Error::invalid_query(format!(
                        "reference time {t_action} is outside the {len} queried states"
                    ))
                    .with_context(context()));
                }
                Resolution {
                    t_action: Some(t_action),
                    tau: Some(full_rollback),
                }
            }
        };

        if resolution.tau == Some(0) {
            warn!(query = %query, "rollback reaches the start of the entire observation");
        }

        if query.tau.is_none() {
            query.tau = resolution.tau;
        }
        query.t_action = resolution.t_action;

        debug!(
            query = %query,
            t_action = ?query.t_action,
            tau = ?query.tau,
            segments = segments.len(),
            "resolved query anchors"
        );

        Ok(Resolution {
            t_action: query.t_action,
            tau: query.tau,
        })
    }

    fn restrict_to_tense(query: &Query, trajectory: &Trajectory, current_t: usize) -> Trajectory {
        match query.tense {
            Some(Tense::Past | Tense::Present) => trajectory.slice(0, Some(current_t)),
            Some(Tense::Future) => trajectory.slice(current_t, None),
            None => {
                warn!(query = %query, "query time was not given, falling back to observed trajectory");
                trajectory.slice(0, Some(current_t))
            }
        }
    }

    fn counterfactual(&self, query: &Query, segments: &[ActionSegment]) -> Option<CounterActionMatch> {
        let counter_actions = self.library.counter_actions(&query.action);
        let found = counter_action_matched_backward(segments, counter_actions);
        match &found {
            Some(m) => info!(
                query = %query,
                counter_action = %m.matched_action,
                t_action = m.t_action,
                "counter action found"
            ),
            None => info!(query = %query, "no counterfactual start found"),
        }
        found
    }
}

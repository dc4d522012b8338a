//! Action segmentation of trajectories.
//!
//! A segmentation partitions a trajectory into contiguous intervals, each
//! labelled with the set of actions active throughout it. The segments of a
//! trajectory of length `n` cover `[0, n)` in order, without gaps or overlaps.

use std::collections::BTreeSet;
use std::fmt;
use std::ops::Range;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use xavi_foundation::{ActionLibrary, ResolverConfig};

use crate::trajectory::Trajectory;

// =============================================================================
// Action Segment
// =============================================================================

/// A contiguous interval of a trajectory labelled with its active actions.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "SegmentRecord"))]
pub struct ActionSegment {
    actions: BTreeSet<String>,
    times: Range<usize>,
}

impl ActionSegment {
    /// Creates a segment covering the timesteps in `times`.
    ///
    /// # Panics
    ///
    /// Panics if `times` is empty or no action is given. Use
    /// [`ActionSegment::try_new`] for unchecked input.
    #[must_use]
    pub fn new<I, S>(actions: I, times: Range<usize>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        match Self::try_new(actions, times) {
            Ok(segment) => segment,
            Err(message) => panic!("{message}"),
        }
    }

    /// Creates a segment, rejecting empty time ranges and empty action sets.
    ///
    /// # Errors
    ///
    /// Returns a description of the first problem found.
    pub fn try_new<I, S>(actions: I, times: Range<usize>) -> Result<Self, String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if times.is_empty() {
            return Err(format!(
                "action segment {times:?} must cover at least one timestep"
            ));
        }
        let actions: BTreeSet<String> = actions.into_iter().map(Into::into).collect();
        if actions.is_empty() {
            return Err(format!("action segment {times:?} must have at least one action"));
        }
        Ok(Self { actions, times })
    }

    /// The actions active during this segment.
    #[must_use]
    pub fn actions(&self) -> &BTreeSet<String> {
        &self.actions
    }

    /// Returns true if `action` is active during this segment.
    #[must_use]
    pub fn contains(&self, action: &str) -> bool {
        self.actions.contains(action)
    }

    /// The timesteps covered, as a half-open range.
    #[must_use]
    pub fn times(&self) -> Range<usize> {
        self.times.clone()
    }

    /// The first timestep of the segment.
    #[must_use]
    pub fn start(&self) -> usize {
        self.times.start
    }

    /// The last timestep of the segment (inclusive).
    #[must_use]
    pub fn last_time(&self) -> usize {
        self.times.end - 1
    }

    /// Number of timesteps covered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Always false; segments cover at least one timestep.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }
}

/// Wire form of a segment, checked before it becomes an [`ActionSegment`].
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct SegmentRecord {
    actions: BTreeSet<String>,
    times: Range<usize>,
}

#[cfg(feature = "serde")]
impl TryFrom<SegmentRecord> for ActionSegment {
    type Error = String;

    fn try_from(record: SegmentRecord) -> Result<Self, Self::Error> {
        Self::try_new(record.actions, record.times)
    }
}

impl fmt::Display for ActionSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.actions.iter().map(String::as_str).collect();
        write!(
            f,
            "[{}..={}] {{{}}}",
            self.start(),
            self.last_time(),
            names.join(", ")
        )
    }
}

/// Returns true if `segments` cover `[0, len)` contiguously and in order.
#[must_use]
pub fn segments_cover(segments: &[ActionSegment], len: usize) -> bool {
    let mut next = 0;
    for segment in segments {
        if segment.start() != next || segment.is_empty() {
            return false;
        }
        next = segment.times.end;
    }
    next == len
}

// =============================================================================
// Segmenters
// =============================================================================

/// Partitions a trajectory into labelled action segments.
pub trait ActionSegmenter {
    /// Segments the trajectory; the result covers `[0, trajectory.len())`.
    fn segment(&self, trajectory: &Trajectory) -> Vec<ActionSegment>;
}

impl<F> ActionSegmenter for F
where
    F: Fn(&Trajectory) -> Vec<ActionSegment>,
{
    fn segment(&self, trajectory: &Trajectory) -> Vec<ActionSegment> {
        self(trajectory)
    }
}

/// Segments a trajectory by speed profile and by its filled-in labels.
///
/// Each state is labelled with one kinematic action (`Stop`, `Accelerate`,
/// `SlowDown` or `Maintain`) plus its macro action and maneuver, when those
/// belong to the library. Runs of identical label sets become one segment.
#[derive(Clone, Debug)]
pub struct KinematicSegmenter<'a> {
    library: &'a ActionLibrary,
    fps: f64,
    stop_speed: f64,
    acceleration_threshold: f64,
}

impl<'a> KinematicSegmenter<'a> {
    /// Creates a segmenter using the thresholds from `config`.
    #[must_use]
    pub fn new(library: &'a ActionLibrary, config: &ResolverConfig) -> Self {
        Self {
            library,
            fps: f64::from(config.fps),
            stop_speed: config.stop_speed,
            acceleration_threshold: config.acceleration_threshold,
        }
    }

    fn acceleration_at(&self, trajectory: &Trajectory, index: usize) -> f64 {
        let Some(state) = trajectory.get(index) else {
            return 0.0;
        };
        if let Some(acceleration) = state.acceleration {
            return acceleration;
        }
        let next = trajectory.get(index + 1);
        let prev = index.checked_sub(1).and_then(|i| trajectory.get(i));
        match (prev, next) {
            (_, Some(next)) => (next.speed - state.speed) * self.fps,
            (Some(prev), None) => (state.speed - prev.speed) * self.fps,
            (None, None) => 0.0,
        }
    }

    fn labels_at(&self, trajectory: &Trajectory, index: usize) -> BTreeSet<String> {
        let mut labels = BTreeSet::new();
        let Some(state) = trajectory.get(index) else {
            return labels;
        };

        let kinematic = if state.speed < self.stop_speed {
            "Stop"
        } else {
            let acceleration = self.acceleration_at(trajectory, index);
            if acceleration > self.acceleration_threshold {
                "Accelerate"
            } else if acceleration < -self.acceleration_threshold {
                "SlowDown"
            } else {
                "Maintain"
            }
        };
        labels.insert(kinematic.to_string());

        for label in [&state.macro_action, &state.maneuver].into_iter().flatten() {
            if self.library.contains(label) {
                labels.insert(label.clone());
            }
        }
        labels
    }
}

impl ActionSegmenter for KinematicSegmenter<'_> {
    fn segment(&self, trajectory: &Trajectory) -> Vec<ActionSegment> {
        let mut segments: Vec<ActionSegment> = Vec::new();
        for index in 0..trajectory.len() {
            let labels = self.labels_at(trajectory, index);
            match segments.last_mut() {
                Some(current) if current.actions == labels => current.times.end = index + 1,
                _ => segments.push(ActionSegment {
                    actions: labels,
                    times: index..index + 1,
                }),
            }
        }
        segments
    }
}

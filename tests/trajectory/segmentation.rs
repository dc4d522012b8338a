//! Integration tests for action segmentation
//!
//! Tests the kinematic segmenter and the coverage check.

use xavi_foundation::{ActionLibrary, Point2, ResolverConfig};
use xavi_trajectory::{
    ActionSegment, ActionSegmenter, AgentState, KinematicSegmenter, Trajectory, segments_cover,
};

/// Builds a trajectory from per-state speeds, with no recorded acceleration.
#[allow(clippy::cast_precision_loss)]
fn from_speeds(speeds: &[f64]) -> Trajectory {
    speeds
        .iter()
        .enumerate()
        .map(|(t, &v)| AgentState::new(t as u64, Point2::new(t as f64, 0.0), 0.0).with_speed(v))
        .collect()
}

fn labels(segment: &ActionSegment) -> Vec<&str> {
    segment.actions().iter().map(String::as_str).collect()
}

#[test]
fn speed_profile_segments() {
    let library = ActionLibrary::driving();
    let config = ResolverConfig::default().with_fps(1);
    let segmenter = KinematicSegmenter::new(&library, &config);

    // stopped, speeding up, cruising, braking
    let trajectory = from_speeds(&[0.0, 0.0, 1.0, 2.0, 3.0, 3.0, 3.0, 2.0, 1.0]);
    let segments = segmenter.segment(&trajectory);

    assert!(segments_cover(&segments, trajectory.len()));
    let summary: Vec<(Vec<&str>, std::ops::Range<usize>)> =
        segments.iter().map(|s| (labels(s), s.times())).collect();
    assert_eq!(
        summary,
        vec![
            (vec!["Stop"], 0..2),
            (vec!["Accelerate"], 2..4),
            (vec!["Maintain"], 4..6),
            (vec!["SlowDown"], 6..9),
        ]
    );
}

#[test]
fn labels_outside_library_are_ignored() {
    let library = ActionLibrary::driving();
    let segmenter = KinematicSegmenter::new(&library, &ResolverConfig::default());

    let trajectory: Trajectory = (0..4u64)
        .map(|t| {
            AgentState::new(t, Point2::new(0.0, 0.0), 0.0)
                .with_speed(5.0)
                .with_acceleration(0.0)
                .with_macro_action("Continue")
                .with_maneuver(if t < 2 { "FollowLane" } else { "TurnLeft" })
        })
        .collect();

    let segments = segmenter.segment(&trajectory);
    assert_eq!(segments.len(), 2);
    assert_eq!(labels(&segments[0]), vec!["FollowLane", "Maintain"]);
    assert_eq!(labels(&segments[1]), vec!["Maintain", "TurnLeft"]);
    assert_eq!(format!("{}", segments[1]), "[2..=3] {Maintain, TurnLeft}");
}

#[test]
fn empty_trajectory_has_no_segments() {
    let library = ActionLibrary::driving();
    let segmenter = KinematicSegmenter::new(&library, &ResolverConfig::default());
    let segments = segmenter.segment(&Trajectory::new());
    assert!(segments.is_empty());
    assert!(segments_cover(&segments, 0));
}

#[test]
fn coverage_check_detects_gaps() {
    let contiguous = vec![
        ActionSegment::new(["FollowLane"], 0..3),
        ActionSegment::new(["Stop"], 3..5),
    ];
    assert!(segments_cover(&contiguous, 5));
    assert!(!segments_cover(&contiguous, 6));

    let gap = vec![
        ActionSegment::new(["FollowLane"], 0..3),
        ActionSegment::new(["Stop"], 4..5),
    ];
    assert!(!segments_cover(&gap, 5));
}

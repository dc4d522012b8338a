//! Integration tests for the trajectory utilities
//!
//! Tests observation truncation, label backfilling, and label statistics.

use xavi_foundation::{AgentId, ErrorKind, Point2};
use xavi_trajectory::{
    AgentState, Observation, Observations, PlannedMacroAction, PlannedManeuver, Trajectory,
    fill_missing_actions, fix_initial_state, most_common, truncate_observations,
};

#[allow(clippy::cast_precision_loss)]
fn line(n: u64) -> Trajectory {
    (0..n)
        .map(|t| AgentState::new(t, Point2::new(t as f64, 0.0), 0.0))
        .collect()
}

fn two_agents() -> Observations {
    let mut observations = Observations::new();
    observations.insert(AgentId::new(0), Observation::from_trajectory(line(10)).unwrap());
    observations.insert(AgentId::new(1), Observation::from_trajectory(line(6)).unwrap());
    observations
}

// =============================================================================
// Truncation
// =============================================================================

#[test]
fn truncate_every_agent() {
    let (truncated, frame) = truncate_observations(&two_agents(), 4).unwrap();

    for agent in [AgentId::new(0), AgentId::new(1)] {
        assert_eq!(truncated[&agent].trajectory.len(), 4);
        assert_eq!(frame[&agent].time, 3);
    }
    // latest known state is kept as it was
    assert_eq!(truncated[&AgentId::new(0)].state.time, 9);
}

#[test]
fn truncate_rejects_zero_and_overlong() {
    let err = truncate_observations(&two_agents(), 0).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidTruncation { tau: 0, .. }));

    let err = truncate_observations(&two_agents(), 8).unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::InvalidTruncation { agent, tau: 8 } if agent == AgentId::new(1)
    ));
}

// =============================================================================
// Labels
// =============================================================================

fn plan() -> Vec<PlannedMacroAction> {
    vec![
        PlannedMacroAction {
            name: "Continue".to_string(),
            maneuvers: vec![PlannedManeuver {
                name: "FollowLane".to_string(),
                path: vec![Point2::new(0.0, 0.0), Point2::new(2.0, 0.0)],
            }],
        },
        PlannedMacroAction {
            name: "Exit".to_string(),
            maneuvers: vec![PlannedManeuver {
                name: "TurnLeft".to_string(),
                path: vec![Point2::new(4.0, 0.0), Point2::new(6.0, 0.0)],
            }],
        },
    ]
}

#[test]
fn fill_from_nearest_plan_point() {
    let mut trajectory = line(7);
    fill_missing_actions(&mut trajectory, &plan());

    let maneuvers: Vec<&str> = trajectory
        .states()
        .map(|s| s.maneuver.as_deref().unwrap())
        .collect();
    // x = 3 is equidistant from 2 and 4 and goes to the earlier point
    assert_eq!(
        maneuvers,
        vec![
            "FollowLane",
            "FollowLane",
            "FollowLane",
            "FollowLane",
            "TurnLeft",
            "TurnLeft",
            "TurnLeft"
        ]
    );
    assert_eq!(trajectory.get(6).unwrap().macro_action.as_deref(), Some("Exit"));
}

#[test]
fn fill_with_empty_plan_is_noop() {
    let mut trajectory = line(3);
    fill_missing_actions(&mut trajectory, &[]);
    assert!(trajectory.states().all(AgentState::is_unlabelled));
}

#[test]
fn fix_initial_state_copies_second_labels() {
    let mut trajectory: Trajectory = vec![
        AgentState::new(0, Point2::new(0.0, 0.0), 0.0),
        AgentState::new(1, Point2::new(1.0, 0.0), 0.0)
            .with_macro_action("Continue")
            .with_maneuver("FollowLane"),
    ]
    .into();
    fix_initial_state(&mut trajectory);
    assert_eq!(trajectory.get(0).unwrap().maneuver.as_deref(), Some("FollowLane"));

    // only applies to the frame at time 0
    let mut late: Trajectory = vec![
        AgentState::new(5, Point2::new(0.0, 0.0), 0.0),
        AgentState::new(6, Point2::new(1.0, 0.0), 0.0).with_maneuver("FollowLane"),
    ]
    .into();
    fix_initial_state(&mut late);
    assert!(late.get(0).unwrap().is_unlabelled());
}

#[test]
fn most_common_label() {
    assert_eq!(most_common(&["a", "b", "b", "a", "c"]), Some(&"a"));
    assert_eq!(most_common(&[1, 2, 2]), Some(&2));
    assert_eq!(most_common::<u8>(&[]), None);
}

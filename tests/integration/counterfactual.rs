//! Counterfactual workflow
//!
//! Resolve a query, roll observations back to `tau`, and splice a generated
//! continuation onto the truncated history.

use xavi_foundation::{AgentId, ErrorKind, Point2};
use xavi_runtime::Session;
use xavi_trajectory::{AgentState, Trajectory};

use crate::scenario::{braking_scenario, spec};

/// The agent keeps cruising at 1 m per frame instead of braking.
#[allow(clippy::cast_precision_loss)]
fn cruising(frames: std::ops::RangeInclusive<u64>) -> Trajectory {
    frames
        .map(|t| AgentState::new(t, Point2::new(t as f64, 0.0), 0.0).with_speed(10.0))
        .collect()
}

#[test]
fn roll_back_and_splice() {
    let scenario = braking_scenario();
    let session = Session::from_scenario(&scenario);
    let agent = AgentId::new(0);

    let mut query = spec("why", "Stop", false)
        .to_query(session.library(), session.config())
        .unwrap();
    let tau = session.resolve(&mut query).unwrap().tau.unwrap();
    assert_eq!(tau, 29);

    let (truncated, frame) = session.truncate(tau).unwrap();
    assert_eq!(truncated[&agent].trajectory.len(), 29);
    assert_eq!(frame[&agent].time, 28);
    assert_eq!(frame[&agent].position, Point2::new(28.0, 0.0));

    let rolled_back = Session::new(
        session.library().clone(),
        session.config().clone(),
        session.map().clone(),
        truncated,
        tau,
    );

    // continuation overlaps the seam by two frames
    let spliced = rolled_back.join(agent, &cruising(27..=40)).unwrap();
    let times: Vec<u64> = spliced.states().map(|s| s.time).collect();
    let expected: Vec<u64> = (0..28).chain(30..=40).collect();
    assert_eq!(times, expected);
    assert_eq!(spliced.len(), 39);
}

#[test]
fn truncation_bounds() {
    let session = Session::from_scenario(&braking_scenario());

    let err = session.truncate(0).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidTruncation { tau: 0, .. }));

    let err = session.truncate(51).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidTruncation { tau: 51, .. }));

    let (truncated, _) = session.truncate(50).unwrap();
    assert_eq!(truncated[&AgentId::new(0)].trajectory.len(), 50);
}

#[test]
fn join_rejects_continuation_behind_seam() {
    let session = Session::from_scenario(&braking_scenario());

    // full history ends stopped at x = 34.5; this continuation never gets past it
    let err = session.join(AgentId::new(0), &cruising(20..=34)).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::NoValidJoinPoint { searched: 1 }));

    let err = session.join(AgentId::new(3), &cruising(0..=5)).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::AgentNotFound(_)));
}

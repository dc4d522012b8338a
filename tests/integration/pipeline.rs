//! End-to-end query answering
//!
//! Scenario -> session -> kinematic segmentation -> temporal resolution -> report.

use xavi_engine::{QueryType, TemporalResolver};
use xavi_foundation::AgentId;
use xavi_runtime::{Format, Session, from_bytes, to_bytes};
use xavi_trajectory::{ActionSegmenter, KinematicSegmenter};

use crate::scenario::{braking_scenario, spec};

#[test]
fn braking_segments() {
    let scenario = braking_scenario();
    let session = Session::from_scenario(&scenario);
    let segmenter = KinematicSegmenter::new(session.library(), session.config());

    let trajectory = &session.observations()[&AgentId::new(0)].trajectory;
    let segments: Vec<String> = segmenter
        .segment(trajectory)
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(
        segments,
        vec!["[0..=28] {Maintain}", "[29..=38] {SlowDown}", "[39..=49] {Stop}"]
    );
}

#[test]
fn braking_queries() {
    let scenario = braking_scenario();
    let report = Session::from_scenario(&scenario).report(&scenario.queries);

    let anchors: Vec<(Option<usize>, Option<usize>)> =
        report.queries.iter().map(|q| (q.t_action, q.tau)).collect();
    assert_eq!(
        anchors,
        vec![
            // stop began at 39, preceded by braking from 29: inside the 10..50 window
            (Some(39), Some(29)),
            // maintain runs back to the first frame: no counterfactual start
            (None, None),
            // stop counters accelerate and starts at 39; rollback spans 29 to the end
            (Some(39), Some(21)),
            // full rollback
            (Some(39), Some(49)),
        ]
    );
    assert_eq!(report.failures(), 0);
}

#[test]
fn narrow_window_clamps_rollback() {
    let mut scenario = braking_scenario();
    scenario.config = scenario.config.clone().with_tau_limits(0.2, 0.5);
    let session = Session::from_scenario(&scenario);

    let mut query = spec("why", "Stop", false)
        .to_query(session.library(), session.config())
        .unwrap();
    assert_eq!(query.kind, QueryType::Why);
    let resolution = session.resolve(&mut query).unwrap();

    // window is [2, 5] steps; 39 - 29 = 10 > 5, so tau = 39 - 5
    assert_eq!(resolution.t_action, Some(39));
    assert_eq!(resolution.tau, Some(34));
}

#[test]
fn future_tense_only_sees_predictions() {
    let mut scenario = braking_scenario();
    scenario.current_t = 35;
    let session = Session::from_scenario(&scenario);

    let mut q = spec("why", "Stop", false);
    q.tense = Some("future".to_string());
    let mut query = q.to_query(session.library(), session.config()).unwrap();
    let resolution = session.resolve(&mut query).unwrap();

    // frames 35..50 re-indexed from 0: braking [0, 4), stopped from 4
    assert_eq!(resolution.t_action, Some(4));
    assert_eq!(resolution.tau, Some(1));
}

#[test]
fn report_survives_both_formats() {
    let scenario = braking_scenario();
    for format in [Format::Json, Format::MessagePack] {
        let restored = from_bytes(&to_bytes(&scenario, format).unwrap(), format).unwrap();
        let report = Session::from_scenario(&restored).report(&restored.queries);
        assert_eq!(report.queries[0].t_action, Some(39));
    }
}

#[test]
fn resolver_can_be_driven_directly() {
    let scenario = braking_scenario();
    let session = Session::from_scenario(&scenario);
    let resolver = TemporalResolver::new(
        session.library(),
        KinematicSegmenter::new(session.library(), session.config()),
    );

    let mut query = spec("whatif", "Stop", true)
        .to_query(session.library(), session.config())
        .unwrap();
    resolver
        .resolve(&mut query, session.observations(), session.current_t())
        .unwrap();
    assert_eq!(query.t_action, Some(39));
    assert_eq!(query.tau, Some(49));
}

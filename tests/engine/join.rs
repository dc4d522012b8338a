//! Integration tests for trajectory joining

use xavi_engine::{JoinResolver, find_join_index};
use xavi_foundation::{ErrorKind, Point2};
use xavi_map::{LaneId, LaneMap, PolylineLane};
use xavi_trajectory::{AgentState, Trajectory};

/// One lane along the x axis from 0 to 200, and a bend turning north at x = 100.
fn road() -> LaneMap {
    LaneMap::new()
        .with_lane(PolylineLane::new(
            LaneId::new(1),
            vec![Point2::new(0.0, 0.0), Point2::new(200.0, 0.0)],
            3.5,
        ))
        .with_lane(PolylineLane::new(
            LaneId::new(2),
            vec![
                Point2::new(100.0, 10.0),
                Point2::new(150.0, 10.0),
                Point2::new(150.0, 60.0),
            ],
            3.5,
        ))
}

fn eastbound(xs: &[f64], y: f64) -> Trajectory {
    xs.iter()
        .enumerate()
        .map(|(t, &x)| AgentState::new(t as u64, Point2::new(x, y), 0.0))
        .collect()
}

#[test]
fn nearest_point_already_ahead_is_accepted() {
    let map = road();
    let init = eastbound(&[46.0, 48.0, 50.0], 0.0);
    let joining = eastbound(&[44.0, 52.0, 54.0], 0.0);

    assert_eq!(find_join_index(&map, &init, &joining).unwrap(), 1);
}

#[test]
fn walks_past_points_behind_the_seam() {
    let map = road();
    let init = eastbound(&[46.0, 48.0, 50.0], 0.0);
    let joining = eastbound(&[49.8, 50.4, 50.9, 51.2, 51.6], 0.0);

    assert_eq!(find_join_index(&map, &init, &joining).unwrap(), 3);
}

#[test]
fn walks_along_a_bend() {
    let map = road();
    // heading north along the second leg of lane 2
    let north = std::f64::consts::FRAC_PI_2;
    let init: Trajectory = [20.0, 25.0]
        .iter()
        .enumerate()
        .map(|(t, &y)| AgentState::new(t as u64, Point2::new(150.0, y), north))
        .collect();
    let joining: Trajectory = [24.5, 25.5, 26.5]
        .iter()
        .enumerate()
        .map(|(t, &y)| AgentState::new(t as u64, Point2::new(150.0, y), north))
        .collect();

    // arc lengths 50 + 14.5, 15.5, 16.5 against 65 at the seam
    assert_eq!(find_join_index(&map, &init, &joining).unwrap(), 2);
}

#[test]
fn different_lanes_join_at_nearest_point() {
    let map = road();
    let init = eastbound(&[118.0, 120.0], 0.0);
    let joining = eastbound(&[110.0, 119.0, 125.0], 9.0);

    // nearest point sits in lane 2 while the seam is in lane 1
    assert_eq!(find_join_index(&map, &init, &joining).unwrap(), 1);
}

#[test]
fn off_map_seam_joins_at_nearest_point() {
    let map = road();
    let init = eastbound(&[48.0, 50.0], 30.0);
    let joining = eastbound(&[45.0, 48.5, 50.5], 30.0);

    assert_eq!(find_join_index(&map, &init, &joining).unwrap(), 2);
}

#[test]
fn continuation_that_never_overtakes_fails() {
    let map = road();
    let init = eastbound(&[48.0, 50.0], 0.0);
    let joining = eastbound(&[46.0, 48.0, 49.5, 50.5], 0.0);

    let err = find_join_index(&map, &init, &joining).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::NoValidJoinPoint { searched: 2 }));
}

#[test]
fn wider_spacing_walks_further() {
    let map = road();
    let init = eastbound(&[48.0, 50.0], 0.0);
    let joining = eastbound(&[50.0, 52.0, 54.0, 56.0], 0.0);

    let resolver = JoinResolver::new(&map);
    assert_eq!(resolver.join_index(&init, &joining).unwrap(), 1);
    let resolver = JoinResolver::new(&map).with_point_spacing(4.5);
    assert_eq!(resolver.join_index(&init, &joining).unwrap(), 3);
}

#[test]
fn splice_drops_overlap() {
    let map = road();
    let init = eastbound(&[46.0, 48.0, 50.0], 0.0);
    let joining = eastbound(&[49.8, 50.4, 50.9, 51.2, 51.6], 0.0);

    let spliced = JoinResolver::new(&map).splice(&init, &joining).unwrap();
    let xs: Vec<f64> = spliced.path().iter().map(|p| p.x).collect();
    assert_eq!(xs, vec![46.0, 48.0, 51.2, 51.6]);
}

//! Shared scenario fixture: an agent cruising down a straight road, then
//! braking to a stop.

use xavi_foundation::{AgentId, Point2, ResolverConfig};
use xavi_map::{LaneId, LaneMap, PolylineLane};
use xavi_runtime::{AgentRecord, QuerySpec, Scenario};
use xavi_trajectory::AgentState;

/// Speed at frame `t`: 10 m/s until frame 29, then losing 1 m/s per frame
/// until stopped at frame 39.
#[allow(clippy::cast_precision_loss)]
pub fn speed_at(t: u64) -> f64 {
    if t < 30 {
        10.0
    } else {
        (10.0 - (t - 29) as f64).max(0.0)
    }
}

/// 50 frames at 10 fps. Kinematic segments come out as Maintain `[0, 29)`,
/// `SlowDown` `[29, 39)`, and Stop `[39, 50)`.
pub fn braking_scenario() -> Scenario {
    let mut x = 0.0;
    let states = (0..50u64)
        .map(|t| {
            let state = AgentState::new(t, Point2::new(x, 0.0), 0.0).with_speed(speed_at(t));
            x += speed_at(t) / 10.0;
            state
        })
        .collect();

    Scenario {
        config: ResolverConfig::default().with_fps(10),
        lanes: LaneMap::new().with_lane(PolylineLane::new(
            LaneId::new(1),
            vec![Point2::new(-10.0, 0.0), Point2::new(500.0, 0.0)],
            3.5,
        )),
        agents: vec![AgentRecord {
            id: AgentId::new(0),
            states,
            plan: Vec::new(),
        }],
        current_t: 50,
        queries: vec![
            spec("why", "Stop", false),
            spec("whynot", "Stop", false),
            spec("whynot", "Accelerate", false),
            spec("whatif", "Stop", true),
        ],
    }
}

pub fn spec(kind: &str, action: &str, negative: bool) -> QuerySpec {
    QuerySpec {
        kind: kind.to_string(),
        action: action.to_string(),
        agent_id: AgentId::new(0),
        negative,
        tense: Some("past".to_string()),
        t_query: None,
        t_action: None,
        tau: None,
    }
}

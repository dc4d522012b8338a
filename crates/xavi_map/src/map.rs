//! Road maps: finding the lane an agent is driving in.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use xavi_foundation::{Point2, angle_difference};

use crate::lane::{Lane, LaneId, PolylineLane};

/// A road network that can locate the lane at a pose.
pub trait RoadMap {
    /// The lane handle type of this map.
    type Lane: Lane;

    /// The lane containing `point` that best matches `heading`, if any.
    fn best_lane_at(&self, point: Point2, heading: f64) -> Option<&Self::Lane>;
}

/// A road map made of independent polyline lanes.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct LaneMap {
    lanes: Vec<PolylineLane>,
}

impl LaneMap {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to add a lane.
    #[must_use]
    pub fn with_lane(mut self, lane: PolylineLane) -> Self {
        self.insert(lane);
        self
    }

    /// Adds a lane, replacing any lane with the same id.
    pub fn insert(&mut self, lane: PolylineLane) {
        self.lanes.retain(|l| l.id() != lane.id());
        self.lanes.push(lane);
    }

    /// Looks up a lane by id.
    #[must_use]
    pub fn get(&self, id: LaneId) -> Option<&PolylineLane> {
        self.lanes.iter().find(|l| l.id() == id)
    }

    /// Iterates over all lanes.
    pub fn lanes(&self) -> impl Iterator<Item = &PolylineLane> {
        self.lanes.iter()
    }

    /// Number of lanes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lanes.len()
    }

    /// Returns true if the map has no lanes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lanes.is_empty()
    }
}

impl FromIterator<PolylineLane> for LaneMap {
    fn from_iter<I: IntoIterator<Item = PolylineLane>>(iter: I) -> Self {
        iter.into_iter().fold(Self::new(), Self::with_lane)
    }
}

impl RoadMap for LaneMap {
    type Lane = PolylineLane;

    fn best_lane_at(&self, point: Point2, heading: f64) -> Option<&PolylineLane> {
        self.lanes
            .iter()
            .filter_map(|lane| {
                let projection = lane.project(point);
                let on_surface =
                    !projection.beyond_ends && projection.offset.abs() <= lane.width() / 2.0;
                on_surface.then(|| (lane, angle_difference(heading, projection.heading)))
            })
            .min_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(lane, _)| lane)
    }
}

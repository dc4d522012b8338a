//! Lane and road map capabilities for Xavi.
//!
//! Resolvers only need three things from a road network: the lane at a pose,
//! the arc length of a point along a lane, and a lane's total length. These
//! are the [`Lane`] and [`RoadMap`] traits. [`LaneMap`] is a simple
//! implementation over polyline lane centerlines.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod lane;
pub mod map;

pub use lane::{Lane, LaneId, PolylineLane, Projection};
pub use map::{LaneMap, RoadMap};

//! Lanes and arc-length projection.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use xavi_foundation::Point2;

/// Identifier of a lane in a road map.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct LaneId(u64);

impl LaneId {
    /// Creates a lane identifier.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw identifier value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for LaneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Lane({})", self.0)
    }
}

/// A lane as seen by the resolvers.
///
/// Two lanes are the same road segment iff their ids are equal.
pub trait Lane {
    /// Identity of the lane.
    fn id(&self) -> LaneId;

    /// Arc length along the lane centerline of the point's projection.
    fn distance_at(&self, point: Point2) -> f64;

    /// Total centerline length.
    fn length(&self) -> f64;
}

// =============================================================================
// Polyline Lane
// =============================================================================

/// Projection of a point onto a lane centerline.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Projection {
    /// Arc length of the projected point.
    pub distance: f64,
    /// Signed lateral offset, positive to the left of the direction of travel.
    pub offset: f64,
    /// Direction of travel at the projected point, in radians.
    pub heading: f64,
    /// True if the point projects before the start or past the end.
    pub beyond_ends: bool,
}

/// A lane described by its centerline polyline and a constant width.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "LaneRecord"))]
pub struct PolylineLane {
    id: LaneId,
    centerline: Vec<Point2>,
    width: f64,
}

impl PolylineLane {
    /// Creates a lane. The centerline must contain at least two points.
    ///
    /// # Panics
    ///
    /// Panics if the centerline has fewer than two points.
    #[must_use]
    pub fn new(id: LaneId, centerline: Vec<Point2>, width: f64) -> Self {
        assert!(centerline.len() >= 2, "lane centerline needs two points");
        Self {
            id,
            centerline,
            width,
        }
    }

    /// Creates a lane, rejecting centerlines with fewer than two points and
    /// widths that are negative or not finite.
    ///
    /// # Errors
    ///
    /// Returns a description of the first problem found.
    pub fn try_new(id: LaneId, centerline: Vec<Point2>, width: f64) -> Result<Self, String> {
        if centerline.len() < 2 {
            return Err(format!(
                "{id} centerline needs two points, got {}",
                centerline.len()
            ));
        }
        if !width.is_finite() || width < 0.0 {
            return Err(format!("{id} has invalid width {width}"));
        }
        Ok(Self {
            id,
            centerline,
            width,
        })
    }

    /// The centerline points.
    #[must_use]
    pub fn centerline(&self) -> &[Point2] {
        &self.centerline
    }

    /// The lane width.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Projects a point onto the nearest centerline segment.
    #[must_use]
    pub fn project(&self, point: Point2) -> Projection {
        let last_segment = self.centerline.len().saturating_sub(2);
        let mut travelled = 0.0;
        let mut best: Option<(f64, Projection)> = None;

        for (i, pair) in self.centerline.windows(2).enumerate() {
            let (a, b) = (pair[0], pair[1]);
            let direction = b - a;
            let segment_length = direction.norm();
            if segment_length <= f64::EPSILON {
                continue;
            }

            let raw = (point - a).dot(direction) / (segment_length * segment_length);
            let t = raw.clamp(0.0, 1.0);
            let foot = a + direction * t;
            let gap = point.distance(foot);

            if best.as_ref().is_none_or(|(d, _)| gap < *d) {
                let beyond_ends = (i == 0 && raw < 0.0) || (i == last_segment && raw > 1.0);
                best = Some((
                    gap,
                    Projection {
                        distance: travelled + t * segment_length,
                        offset: direction.cross(point - a) / segment_length,
                        heading: direction.angle(),
                        beyond_ends,
                    },
                ));
            }
            travelled += segment_length;
        }

        best.map_or_else(
            || Projection {
                distance: 0.0,
                offset: self.centerline.first().map_or(0.0, |&p| point.distance(p)),
                heading: 0.0,
                beyond_ends: true,
            },
            |(_, p)| p,
        )
    }

    /// Returns true if the point lies on the lane surface.
    #[must_use]
    pub fn contains(&self, point: Point2) -> bool {
        let projection = self.project(point);
        !projection.beyond_ends && projection.offset.abs() <= self.width / 2.0
    }
}

impl Lane for PolylineLane {
    fn id(&self) -> LaneId {
        self.id
    }

    fn distance_at(&self, point: Point2) -> f64 {
        self.project(point).distance
    }

    fn length(&self) -> f64 {
        self.centerline
            .windows(2)
            .map(|pair| pair[0].distance(pair[1]))
            .sum()
    }
}

/// Wire form of a lane, checked before it becomes a [`PolylineLane`].
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct LaneRecord {
    id: LaneId,
    centerline: Vec<Point2>,
    width: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<LaneRecord> for PolylineLane {
    type Error = String;

    fn try_from(record: LaneRecord) -> Result<Self, Self::Error> {
        Self::try_new(record.id, record.centerline, record.width)
    }
}

impl PartialEq for PolylineLane {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for PolylineLane {}

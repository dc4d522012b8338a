//! Joining a generated continuation onto an observed trajectory.
//!
//! The nearest point of the continuation may lie behind the observed end
//! along the direction of travel. The join walks forward from the nearest
//! point until the continuation is strictly ahead of the seam in arc length,
//! so the spliced trajectory never doubles back.

use tracing::{debug, warn};
use xavi_foundation::{Error, POINT_SPACING, Result};
use xavi_map::{Lane, RoadMap};
use xavi_trajectory::Trajectory;

/// Finds join points on a road map.
pub struct JoinResolver<'a, M> {
    map: &'a M,
    point_spacing: f64,
}

impl<'a, M: RoadMap> JoinResolver<'a, M> {
    /// Creates a join resolver with the default point spacing.
    #[must_use]
    pub fn new(map: &'a M) -> Self {
        Self {
            map,
            point_spacing: POINT_SPACING,
        }
    }

    /// Builder method to set the progress required past the seam.
    #[must_use]
    pub fn with_point_spacing(mut self, point_spacing: f64) -> Self {
        self.point_spacing = point_spacing;
        self
    }

    /// Index into `joining` whose state should replace the last state of `init`.
    ///
    /// If the seam and the nearest continuation point lie in different lanes
    /// (or either lane cannot be resolved), the nearest index is returned as is.
    ///
    /// # Errors
    ///
    /// - `EmptyTrajectory` if `init` is empty
    /// - `NoValidJoinPoint` if `joining` is empty or never gets ahead of the seam
    pub fn join_index(&self, init: &Trajectory, joining: &Trajectory) -> Result<usize> {
        let last = init.last().ok_or_else(|| Error::empty_trajectory(None))?;
        let path = joining.path();
        let headings = joining.heading();

        let closest_idx = last
            .position
            .nearest_index(&path)
            .ok_or_else(|| Error::no_valid_join_point(0))?;

        let last_lane = self.map.best_lane_at(last.position, last.heading);
        let closest_lane = self.map.best_lane_at(path[closest_idx], headings[closest_idx]);
        let (Some(last_lane), Some(closest_lane)) = (last_lane, closest_lane) else {
            warn!(closest_idx, "lane could not be resolved at the seam, joining at nearest point");
            return Ok(closest_idx);
        };
        if last_lane.id() != closest_lane.id() {
            warn!(
                last_lane = %last_lane.id(),
                closest_lane = %closest_lane.id(),
                "last observed point is on a different lane than the closest predicted point"
            );
            return Ok(closest_idx);
        }

        let d_last = last_lane.distance_at(last.position);
        for idx in closest_idx..path.len() {
            let Some(lane) = self.map.best_lane_at(path[idx], headings[idx]) else {
                continue;
            };
            let mut d_closest = lane.distance_at(path[idx]);
            if lane.id() != last_lane.id() {
                d_closest += last_lane.length();
            }
            if d_last - d_closest < -self.point_spacing {
                debug!(closest_idx, join_idx = idx, "found join point");
                return Ok(idx);
            }
        }

        Err(Error::no_valid_join_point(path.len() - closest_idx))
    }

    /// Splices `joining` onto `init`, replacing the last state of `init` with
    /// the continuation from the join point on.
    ///
    /// # Errors
    ///
    /// Propagates the errors of [`JoinResolver::join_index`].
    pub fn splice(&self, init: &Trajectory, joining: &Trajectory) -> Result<Trajectory> {
        let idx = self.join_index(init, joining)?;
        let head = init.slice(0, Some(init.len() - 1));
        Ok(head.concat(&joining.slice(idx, None)))
    }
}

/// Index into `joining` at which it continues `init`, using the default
/// point spacing.
///
/// # Errors
///
/// See [`JoinResolver::join_index`].
pub fn find_join_index<M: RoadMap>(
    map: &M,
    init: &Trajectory,
    joining: &Trajectory,
) -> Result<usize> {
    JoinResolver::new(map).join_index(init, joining)
}

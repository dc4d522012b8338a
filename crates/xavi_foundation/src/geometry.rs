//! Planar geometry used by trajectories and lane maps.

use std::f64::consts::PI;
use std::fmt;
use std::ops::{Add, Mul, Sub};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A position in the road plane, in meters.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point2 {
    /// Easting.
    pub x: f64,
    /// Northing.
    pub y: f64,
}

impl Point2 {
    /// Creates a point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        (self - other).norm()
    }

    /// Length of this point treated as a vector.
    #[must_use]
    pub fn norm(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Dot product with another vector.
    #[must_use]
    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Z component of the cross product with another vector.
    #[must_use]
    pub fn cross(self, other: Self) -> f64 {
        self.x * other.y - self.y * other.x
    }

    /// Direction of this vector in radians.
    #[must_use]
    pub fn angle(self) -> f64 {
        self.y.atan2(self.x)
    }

    /// Index of the point in `points` nearest to `self`.
    ///
    /// Returns `None` for an empty slice. Ties resolve to the lowest index.
    #[must_use]
    pub fn nearest_index(self, points: &[Point2]) -> Option<usize> {
        points
            .iter()
            .enumerate()
            .map(|(i, p)| (i, self.distance(*p)))
            .fold(None, |best: Option<(usize, f64)>, (i, d)| match best {
                Some((_, best_d)) if best_d <= d => best,
                _ => Some((i, d)),
            })
            .map(|(i, _)| i)
    }
}

impl Add for Point2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point2 {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl From<(f64, f64)> for Point2 {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Point2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}

/// Wraps an angle into `(-pi, pi]`.
#[must_use]
pub fn normalize_angle(angle: f64) -> f64 {
    let wrapped = (angle + PI).rem_euclid(2.0 * PI) - PI;
    if wrapped <= -PI { wrapped + 2.0 * PI } else { wrapped }
}

/// Absolute smallest difference between two headings, in `[0, pi]`.
#[must_use]
pub fn angle_difference(a: f64, b: f64) -> f64 {
    normalize_angle(a - b).abs()
}

//! Screen-space geometry: points, distances, angles and swipe buckets.
//!
//! Coordinates follow screen convention (y increases downward), so a positive
//! angle turns clockwise on screen.

use serde::{Deserialize, Serialize};

use crate::constants::EPSILON;
use crate::event::SwipeDirection;

/// A position in screen pixels.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        (self.x - other.x).abs() < EPSILON && (self.y - other.y).abs() < EPSILON
    }
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance(self, other: Self) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Angle of the vector `self → other` in degrees, range (-180, 180].
    pub fn angle_to(self, other: Self) -> f64 {
        (other.y - self.y).atan2(other.x - self.x).to_degrees()
    }

    /// Midpoint between `self` and `other`.
    pub fn midpoint(self, other: Self) -> Self {
        Self {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }
}

/// Wrap an angle in degrees into (-180, 180].
pub fn wrap_degrees(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    if wrapped > 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}

/// Classify a displacement into one of four swipe directions.
///
/// Buckets on `atan2(dy, dx)` in degrees:
/// right = [-45, 45), down = [45, 135), left = [135, 180] ∪ [-180, -135),
/// up = [-135, -45).
pub fn swipe_direction(dx: f64, dy: f64) -> SwipeDirection {
    let angle = dy.atan2(dx).to_degrees();
    if (-45.0..45.0).contains(&angle) {
        SwipeDirection::Right
    } else if (45.0..135.0).contains(&angle) {
        SwipeDirection::Down
    } else if (-135.0..-45.0).contains(&angle) {
        SwipeDirection::Up
    } else {
        SwipeDirection::Left
    }
}

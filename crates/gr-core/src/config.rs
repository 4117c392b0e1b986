//! Runtime-mutable thresholds consulted by the classifier.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_DOUBLE_TAP_WINDOW, DEFAULT_LONG_PRESS_THRESHOLD, DEFAULT_PINCH_THRESHOLD,
    DEFAULT_ROTATION_THRESHOLD, DEFAULT_SWIPE_THRESHOLD, DEFAULT_SWIPE_VELOCITY,
    DEFAULT_TAP_THRESHOLD,
};

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A threshold was NaN or infinite.
    NotFinite { field: &'static str, value: f64 },
    /// A threshold was below zero.
    Negative { field: &'static str, value: f64 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NotFinite { field, value } => {
                write!(f, "{field} must be finite, got {value}")
            }
            ConfigError::Negative { field, value } => {
                write!(f, "{field} must not be negative, got {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Numeric gesture policy. Distances in px, times in ms, velocity in px/ms.
///
/// Missing fields deserialize to their defaults, so a partial TOML table is
/// enough to override a single threshold.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdConfig {
    /// Displacement below which a contact is still a tap / long-press candidate.
    pub tap_threshold: f64,
    /// Max tap duration, and max gap between two taps of a double tap.
    pub double_tap_window: f64,
    /// Hold time before a stationary contact long-presses.
    pub long_press_threshold: f64,
    pub swipe_threshold: f64,
    pub swipe_velocity: f64,
    /// Minimum |scale - 1| for a pinch.
    pub pinch_threshold: f64,
    pub rotation_threshold: f64,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            tap_threshold: DEFAULT_TAP_THRESHOLD,
            double_tap_window: DEFAULT_DOUBLE_TAP_WINDOW,
            long_press_threshold: DEFAULT_LONG_PRESS_THRESHOLD,
            swipe_threshold: DEFAULT_SWIPE_THRESHOLD,
            swipe_velocity: DEFAULT_SWIPE_VELOCITY,
            pinch_threshold: DEFAULT_PINCH_THRESHOLD,
            rotation_threshold: DEFAULT_ROTATION_THRESHOLD,
        }
    }
}

impl ThresholdConfig {
    /// All thresholds as `(name, value)` pairs, in declaration order.
    pub fn fields(&self) -> [(&'static str, f64); 7] {
        [
            ("tap_threshold", self.tap_threshold),
            ("double_tap_window", self.double_tap_window),
            ("long_press_threshold", self.long_press_threshold),
            ("swipe_threshold", self.swipe_threshold),
            ("swipe_velocity", self.swipe_velocity),
            ("pinch_threshold", self.pinch_threshold),
            ("rotation_threshold", self.rotation_threshold),
        ]
    }

    /// Reject NaN, infinite, or negative thresholds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in self.fields() {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite { field, value });
            }
            if value < 0.0 {
                return Err(ConfigError::Negative { field, value });
            }
        }
        Ok(())
    }
}

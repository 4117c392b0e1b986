//! Raw pointer input as delivered by the host.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque pointer identifier (touch id, mouse button stream, pen id).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PointerId(pub u64);

impl fmt::Display for PointerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Opaque tag copied from a contact onto every gesture it produces.
/// The engine never looks inside it.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Target(pub String);

impl From<&str> for Target {
    fn from(s: &str) -> Self {
        Target(s.to_string())
    }
}

impl From<String> for Target {
    fn from(s: String) -> Self {
        Target(s)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lifecycle phase of a sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Down,
    Move,
    Up,
    Cancel,
}

/// One input sample: `{id, x, y, timestampMs, phase, target}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointerSample {
    pub id: PointerId,
    pub x: f64,
    pub y: f64,
    #[serde(alias = "t")]
    pub timestamp_ms: f64,
    pub phase: Phase,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<Target>,
}

impl PointerSample {
    pub fn new(id: u64, x: f64, y: f64, timestamp_ms: f64, phase: Phase) -> Self {
        Self {
            id: PointerId(id),
            x,
            y,
            timestamp_ms,
            phase,
            target: None,
        }
    }

    pub fn down(id: u64, x: f64, y: f64, timestamp_ms: f64) -> Self {
        Self::new(id, x, y, timestamp_ms, Phase::Down)
    }

    pub fn moved(id: u64, x: f64, y: f64, timestamp_ms: f64) -> Self {
        Self::new(id, x, y, timestamp_ms, Phase::Move)
    }

    pub fn up(id: u64, x: f64, y: f64, timestamp_ms: f64) -> Self {
        Self::new(id, x, y, timestamp_ms, Phase::Up)
    }

    pub fn cancel(id: u64, timestamp_ms: f64) -> Self {
        Self::new(id, 0.0, 0.0, timestamp_ms, Phase::Cancel)
    }

    pub fn with_target(mut self, target: impl Into<Target>) -> Self {
        self.target = Some(target.into());
        self
    }
}

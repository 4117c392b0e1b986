//! Classified gestures and the envelope handlers receive.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::sample::Target;

/// Direction of a swipe in screen space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwipeDirection {
    Up,
    Down,
    Left,
    Right,
}

impl fmt::Display for SwipeDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SwipeDirection::Up => "up",
            SwipeDirection::Down => "down",
            SwipeDirection::Left => "left",
            SwipeDirection::Right => "right",
        };
        f.write_str(name)
    }
}

/// A recognized gesture. One variant per kind, carrying only its own fields.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GestureEvent {
    Tap {
        x: f64,
        y: f64,
    },
    DoubleTap {
        x: f64,
        y: f64,
    },
    LongPress {
        x: f64,
        y: f64,
    },
    Swipe {
        direction: SwipeDirection,
        distance: f64,
        /// Release speed in px/ms.
        velocity: f64,
    },
    Pan {
        delta_x: f64,
        delta_y: f64,
    },
    Pinch {
        scale: f64,
        center_x: f64,
        center_y: f64,
    },
    Rotate {
        degrees: f64,
        center_x: f64,
        center_y: f64,
    },
}

impl GestureEvent {
    pub fn kind(&self) -> GestureKind {
        match self {
            GestureEvent::Tap { .. } => GestureKind::Tap,
            GestureEvent::DoubleTap { .. } => GestureKind::DoubleTap,
            GestureEvent::LongPress { .. } => GestureKind::LongPress,
            GestureEvent::Swipe { .. } => GestureKind::Swipe,
            GestureEvent::Pan { .. } => GestureKind::Pan,
            GestureEvent::Pinch { .. } => GestureKind::Pinch,
            GestureEvent::Rotate { .. } => GestureKind::Rotate,
        }
    }
}

impl fmt::Display for GestureEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GestureEvent::Tap { x, y } => write!(f, "tap ({x:.1}, {y:.1})"),
            GestureEvent::DoubleTap { x, y } => write!(f, "double_tap ({x:.1}, {y:.1})"),
            GestureEvent::LongPress { x, y } => write!(f, "long_press ({x:.1}, {y:.1})"),
            GestureEvent::Swipe {
                direction,
                distance,
                velocity,
            } => write!(
                f,
                "swipe {direction} distance={distance:.1} velocity={velocity:.3}"
            ),
            GestureEvent::Pan { delta_x, delta_y } => {
                write!(f, "pan dx={delta_x:.1} dy={delta_y:.1}")
            }
            GestureEvent::Pinch {
                scale,
                center_x,
                center_y,
            } => write!(f, "pinch scale={scale:.3} center=({center_x:.1}, {center_y:.1})"),
            GestureEvent::Rotate {
                degrees,
                center_x,
                center_y,
            } => write!(
                f,
                "rotate degrees={degrees:.1} center=({center_x:.1}, {center_y:.1})"
            ),
        }
    }
}

/// Field-less discriminant of [`GestureEvent`], used as the registration key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GestureKind {
    Tap,
    DoubleTap,
    LongPress,
    Swipe,
    Pan,
    Pinch,
    Rotate,
}

impl GestureKind {
    pub const ALL: [GestureKind; 7] = [
        GestureKind::Tap,
        GestureKind::DoubleTap,
        GestureKind::LongPress,
        GestureKind::Swipe,
        GestureKind::Pan,
        GestureKind::Pinch,
        GestureKind::Rotate,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            GestureKind::Tap => "tap",
            GestureKind::DoubleTap => "double_tap",
            GestureKind::LongPress => "long_press",
            GestureKind::Swipe => "swipe",
            GestureKind::Pan => "pan",
            GestureKind::Pinch => "pinch",
            GestureKind::Rotate => "rotate",
        }
    }
}

impl fmt::Display for GestureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Delivery envelope: the event, the target of the contact it came from,
/// and the engine time at which it was recognized.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Gesture {
    pub event: GestureEvent,
    pub target: Option<Target>,
    pub time_ms: f64,
}

impl Gesture {
    pub fn new(event: GestureEvent, target: Option<Target>, time_ms: f64) -> Self {
        Self {
            event,
            target,
            time_ms,
        }
    }

    pub fn kind(&self) -> GestureKind {
        self.event.kind()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_matches_variant() {
        let events = [
            GestureEvent::Tap { x: 0.0, y: 0.0 },
            GestureEvent::DoubleTap { x: 0.0, y: 0.0 },
            GestureEvent::LongPress { x: 0.0, y: 0.0 },
            GestureEvent::Swipe {
                direction: SwipeDirection::Up,
                distance: 60.0,
                velocity: 1.0,
            },
            GestureEvent::Pan {
                delta_x: 1.0,
                delta_y: 2.0,
            },
            GestureEvent::Pinch {
                scale: 1.5,
                center_x: 0.0,
                center_y: 0.0,
            },
            GestureEvent::Rotate {
                degrees: 20.0,
                center_x: 0.0,
                center_y: 0.0,
            },
        ];
        let kinds: Vec<GestureKind> = events.iter().map(GestureEvent::kind).collect();
        assert_eq!(kinds, GestureKind::ALL.to_vec());
    }

    #[test]
    fn test_event_json_shape() {
        let event = GestureEvent::Swipe {
            direction: SwipeDirection::Left,
            distance: 80.0,
            velocity: 1.25,
        };
        let json = serde_json::to_value(event).unwrap();
        assert_eq!(json["type"], "swipe");
        assert_eq!(json["direction"], "left");
        assert_eq!(json["distance"], 80.0);
    }

    #[test]
    fn test_envelope_json_uses_camel_case() {
        let gesture = Gesture::new(
            GestureEvent::Pan {
                delta_x: 12.0,
                delta_y: -3.0,
            },
            Some(Target::from("canvas")),
            42.0,
        );
        let json = serde_json::to_value(&gesture).unwrap();
        assert_eq!(json["timeMs"], 42.0);
        assert_eq!(json["target"], "canvas");
        assert_eq!(json["event"]["type"], "pan");
        assert_eq!(json["event"]["delta_x"], 12.0);
    }

    #[test]
    fn test_display() {
        let tap = GestureEvent::Tap { x: 1.0, y: 2.0 };
        assert_eq!(tap.to_string(), "tap (1.0, 2.0)");
        assert_eq!(GestureKind::DoubleTap.to_string(), "double_tap");
        assert_eq!(SwipeDirection::Right.to_string(), "right");
    }
}

//! Gesture recognition engine.
//!
//! Turns a stream of pointer samples (down / move / up / cancel) into
//! discrete gestures: tap, double tap, long press, swipe, pan, pinch and
//! rotate. A [`PointerTracker`] keeps per-contact state, a
//! [`GestureClassifier`] decides what happened, and a [`DispatchBus`] hands
//! the result to registered handlers. [`GestureEngine`] wires the three
//! together.
//!
//! Zero I/O: time is whatever the samples say it is.

pub mod classifier;
pub mod config;
pub mod constants;
pub mod dispatch;
pub mod engine;
pub mod event;
pub mod geometry;
pub mod sample;
pub mod timer;
pub mod tracker;

pub use classifier::GestureClassifier;
pub use config::{ConfigError, ThresholdConfig};
pub use constants::{
    DEFAULT_DOUBLE_TAP_WINDOW, DEFAULT_LONG_PRESS_THRESHOLD, DEFAULT_PINCH_THRESHOLD,
    DEFAULT_ROTATION_THRESHOLD, DEFAULT_SWIPE_THRESHOLD, DEFAULT_SWIPE_VELOCITY,
    DEFAULT_TAP_THRESHOLD, EPSILON,
};
pub use dispatch::{DeliveryFailure, DispatchBus, HandlerError, HandlerId, HandlerResult};
pub use engine::GestureEngine;
pub use event::{Gesture, GestureEvent, GestureKind, SwipeDirection};
pub use geometry::{Point, swipe_direction, wrap_degrees};
pub use sample::{Phase, PointerId, PointerSample, Target};
pub use timer::Deadline;
pub use tracker::{Baseline, Contact, PointerTracker, Velocity};

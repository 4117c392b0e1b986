/// Default tap slop in pixels: movement below this still counts as a tap.
pub const DEFAULT_TAP_THRESHOLD: f64 = 10.0;

/// Default double-tap window in milliseconds.
pub const DEFAULT_DOUBLE_TAP_WINDOW: f64 = 300.0;

/// Default hold time in milliseconds before a stationary contact long-presses.
pub const DEFAULT_LONG_PRESS_THRESHOLD: f64 = 500.0;

/// Default minimum swipe displacement in pixels.
pub const DEFAULT_SWIPE_THRESHOLD: f64 = 50.0;

/// Default minimum release speed for a swipe, in px/ms.
pub const DEFAULT_SWIPE_VELOCITY: f64 = 0.3;

/// Default fractional scale change before a pinch is reported.
pub const DEFAULT_PINCH_THRESHOLD: f64 = 0.1;

/// Default rotation in degrees before a rotate is reported.
pub const DEFAULT_ROTATION_THRESHOLD: f64 = 15.0;

/// Numerical epsilon for near-zero comparisons
pub const EPSILON: f64 = 1e-10;

//! Cancellable deadline in engine time (milliseconds).
//!
//! Stands in for a scheduled callback: the owner arms it, disarms it, and
//! polls it with the current time. Nothing runs in the background.

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Deadline {
    at: Option<f64>,
}

impl Deadline {
    pub fn armed_at(at: f64) -> Self {
        Self { at: Some(at) }
    }

    pub fn arm(&mut self, at: f64) {
        self.at = Some(at);
    }

    pub fn disarm(&mut self) {
        self.at = None;
    }

    pub fn is_armed(&self) -> bool {
        self.at.is_some()
    }

    /// When the deadline elapses, if armed.
    pub fn at(&self) -> Option<f64> {
        self.at
    }

    /// Armed and strictly passed by `now`.
    pub fn is_due(&self, now: f64) -> bool {
        self.at.is_some_and(|at| now > at)
    }

    /// Disarm and report whether the deadline had passed.
    pub fn take_if_due(&mut self, now: f64) -> bool {
        if self.is_due(now) {
            self.at = None;
            true
        } else {
            false
        }
    }
}

//! Gesture decisions from tracker state.
//!
//! Single-contact gestures are decided at release, in precedence order:
//! long press (decided earlier, while held), double tap, tap, swipe, pan.
//! Pan is also reported continuously while a single contact drags. Two
//! contacts that formed a baseline produce pinch and rotate on every move
//! and are left out of single-contact classification.

use std::collections::HashMap;

use crate::config::ThresholdConfig;
use crate::constants::EPSILON;
use crate::event::{Gesture, GestureEvent};
use crate::geometry::{swipe_direction, wrap_degrees};
use crate::sample::PointerId;
use crate::timer::Deadline;
use crate::tracker::{Contact, PointerTracker};

/// Classifier-side lifecycle of one contact.
#[derive(Clone, Copy, Debug, Default)]
struct ContactState {
    long_press: Deadline,
    long_pressed: bool,
    /// Took part in a two-pointer baseline.
    multi: bool,
}

#[derive(Debug, Default)]
pub struct GestureClassifier {
    states: HashMap<PointerId, ContactState>,
    /// Release time of the last tap that can still pair into a double tap.
    /// One value for the whole engine, not per pointer or target.
    last_tap: Option<f64>,
}

impl GestureClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the long-press timer for a freshly tracked contact.
    pub fn on_down(&mut self, tracker: &PointerTracker, id: PointerId, cfg: &ThresholdConfig) {
        let Some(contact) = tracker.contact(id) else {
            return;
        };
        let deadline = contact.start_time + cfg.long_press_threshold;
        self.states.insert(
            id,
            ContactState {
                long_press: Deadline::armed_at(deadline),
                ..Default::default()
            },
        );
        tracing::trace!(pointer = %id, deadline, "long press armed");

        if let Some(baseline) = tracker.baseline()
            && baseline.involves(id)
        {
            for member in [baseline.first, baseline.second] {
                if let Some(state) = self.states.get_mut(&member) {
                    state.multi = true;
                    state.long_press.disarm();
                }
            }
        }
    }

    /// React to a tracked move of `id`.
    pub fn on_move(
        &mut self,
        tracker: &PointerTracker,
        id: PointerId,
        cfg: &ThresholdConfig,
        out: &mut Vec<Gesture>,
    ) {
        let (Some(contact), Some(state)) = (tracker.contact(id), self.states.get_mut(&id)) else {
            return;
        };

        let displacement = contact.displacement();
        if displacement >= cfg.tap_threshold {
            if state.long_press.is_armed() {
                tracing::trace!(pointer = %id, "long press disarmed by movement");
            }
            state.long_press.disarm();

            if !state.multi {
                let (delta_x, delta_y) = contact.delta();
                out.push(Gesture::new(
                    GestureEvent::Pan { delta_x, delta_y },
                    contact.target.clone(),
                    contact.current_time,
                ));
            }
        }

        if tracker.baseline().is_some_and(|b| b.involves(id)) {
            Self::classify_pair(tracker, cfg, contact.current_time, out);
        }
    }

    /// Classify a released contact. `time` is the release time.
    pub fn on_up(
        &mut self,
        contact: &Contact,
        time: f64,
        cfg: &ThresholdConfig,
        out: &mut Vec<Gesture>,
    ) {
        let Some(state) = self.states.remove(&contact.id) else {
            return;
        };
        if state.multi {
            return;
        }

        let displacement = contact.displacement();
        let target = contact.target.clone();

        let tap_like = displacement < cfg.tap_threshold
            && !state.long_pressed
            && contact.duration(time) < cfg.double_tap_window;
        if tap_like {
            let (x, y) = (contact.current.x, contact.current.y);
            let paired = self
                .last_tap
                .is_some_and(|last| time - last < cfg.double_tap_window);
            if paired {
                self.last_tap = None;
                out.push(Gesture::new(GestureEvent::DoubleTap { x, y }, target, time));
            } else {
                self.last_tap = Some(time);
                out.push(Gesture::new(GestureEvent::Tap { x, y }, target, time));
            }
            return;
        }

        let (dx, dy) = contact.delta();
        let speed = contact.velocity.speed();
        if displacement >= cfg.swipe_threshold && speed >= cfg.swipe_velocity {
            out.push(Gesture::new(
                GestureEvent::Swipe {
                    direction: swipe_direction(dx, dy),
                    distance: displacement,
                    velocity: speed,
                },
                target,
                time,
            ));
        } else if displacement >= cfg.tap_threshold {
            out.push(Gesture::new(
                GestureEvent::Pan {
                    delta_x: dx,
                    delta_y: dy,
                },
                target,
                time,
            ));
        }
    }

    /// Forget `id` without classifying it.
    pub fn on_cancel(&mut self, id: PointerId) {
        self.states.remove(&id);
    }

    /// Fire every long press whose deadline `now` has passed.
    pub fn advance(
        &mut self,
        tracker: &PointerTracker,
        now: f64,
        cfg: &ThresholdConfig,
        out: &mut Vec<Gesture>,
    ) {
        let mut due: Vec<(f64, PointerId)> = self
            .states
            .iter()
            .filter(|(_, s)| s.long_press.is_due(now))
            .filter_map(|(id, s)| s.long_press.at().map(|at| (at, *id)))
            .collect();
        if due.is_empty() {
            return;
        }
        due.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));

        for (at, id) in due {
            let Some(state) = self.states.get_mut(&id) else {
                continue;
            };
            state.long_press.disarm();
            let Some(contact) = tracker.contact(id) else {
                continue;
            };
            if contact.displacement() >= cfg.tap_threshold {
                continue;
            }
            state.long_pressed = true;
            out.push(Gesture::new(
                GestureEvent::LongPress {
                    x: contact.current.x,
                    y: contact.current.y,
                },
                contact.target.clone(),
                at,
            ));
        }
    }

    /// Earliest armed long-press deadline.
    pub fn next_deadline(&self) -> Option<f64> {
        self.states
            .values()
            .filter_map(|s| s.long_press.at())
            .min_by(f64::total_cmp)
    }

    pub fn last_tap(&self) -> Option<f64> {
        self.last_tap
    }

    /// Drop every per-contact state and the last-tap timestamp.
    pub fn reset(&mut self) {
        self.states.clear();
        self.last_tap = None;
    }

    fn classify_pair(
        tracker: &PointerTracker,
        cfg: &ThresholdConfig,
        time: f64,
        out: &mut Vec<Gesture>,
    ) {
        let (Some(baseline), Some((a, b))) = (tracker.baseline(), tracker.baseline_pair()) else {
            return;
        };
        // Coincident fingers give no reference length or angle.
        if baseline.distance <= EPSILON {
            return;
        }
        let center = a.current.midpoint(b.current);

        let scale = a.current.distance(b.current) / baseline.distance;
        if (scale - 1.0).abs() >= cfg.pinch_threshold {
            out.push(Gesture::new(
                GestureEvent::Pinch {
                    scale,
                    center_x: center.x,
                    center_y: center.y,
                },
                a.target.clone(),
                time,
            ));
        }

        let degrees = wrap_degrees(a.current.angle_to(b.current) - baseline.angle);
        if degrees.abs() >= cfg.rotation_threshold {
            out.push(Gesture::new(
                GestureEvent::Rotate {
                    degrees,
                    center_x: center.x,
                    center_y: center.y,
                },
                a.target.clone(),
                time,
            ));
        }
    }
}

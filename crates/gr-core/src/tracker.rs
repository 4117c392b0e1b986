//! Per-pointer contact tracking.
//!
//! The tracker owns the table of active contacts and the two-pointer
//! baseline. It records positions, times and per-sample velocity; it makes
//! no gesture decisions.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::geometry::Point;
use crate::sample::{PointerId, Target};

/// Velocity in px/ms.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity {
    pub vx: f64,
    pub vy: f64,
}

impl Velocity {
    pub fn speed(self) -> f64 {
        self.vx.hypot(self.vy)
    }
}

/// Tracked state of one active pointer between `down` and `up`/`cancel`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Contact {
    pub id: PointerId,
    pub start: Point,
    pub start_time: f64,
    pub current: Point,
    pub current_time: f64,
    /// The sample before `current`. Only used for velocity.
    pub previous: Point,
    pub previous_time: f64,
    pub velocity: Velocity,
    pub target: Option<Target>,
    /// Arrival sequence number; lower arrived earlier.
    pub arrival: u64,
}

impl Contact {
    fn new(id: PointerId, at: Point, time: f64, target: Option<Target>, arrival: u64) -> Self {
        Self {
            id,
            start: at,
            start_time: time,
            current: at,
            current_time: time,
            previous: at,
            previous_time: time,
            velocity: Velocity::default(),
            target,
            arrival,
        }
    }

    /// Net movement from start to current position.
    pub fn delta(&self) -> (f64, f64) {
        (self.current.x - self.start.x, self.current.y - self.start.y)
    }

    /// Straight-line distance from start to current position.
    pub fn displacement(&self) -> f64 {
        self.start.distance(self.current)
    }

    /// Time held as of `now`.
    pub fn duration(&self, now: f64) -> f64 {
        now - self.start_time
    }

    /// Shift `current` into `previous`, apply the sample, recompute velocity.
    fn apply(&mut self, at: Point, time: f64) {
        self.previous = self.current;
        self.previous_time = self.current_time;
        self.current = at;
        self.current_time = time;

        let dt = self.current_time - self.previous_time;
        if dt > 0.0 {
            self.velocity = Velocity {
                vx: (self.current.x - self.previous.x) / dt,
                vy: (self.current.y - self.previous.y) / dt,
            };
        }
    }
}

/// Reference geometry for pinch/rotate, captured when a second contact lands.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Baseline {
    /// The earlier-arrived contact of the pair.
    pub first: PointerId,
    pub second: PointerId,
    pub distance: f64,
    /// Angle of `first → second`, in degrees.
    pub angle: f64,
}

impl Baseline {
    pub fn involves(&self, id: PointerId) -> bool {
        self.first == id || self.second == id
    }
}

#[derive(Debug, Default)]
pub struct PointerTracker {
    contacts: HashMap<PointerId, Contact>,
    baseline: Option<Baseline>,
    next_arrival: u64,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin tracking `id`, replacing any stale contact with the same id.
    ///
    /// If this makes two contacts active, a baseline is captured from the two
    /// earliest arrivals.
    pub fn on_down(
        &mut self,
        id: PointerId,
        x: f64,
        y: f64,
        time: f64,
        target: Option<Target>,
    ) -> &Contact {
        if self.contacts.contains_key(&id) {
            tracing::trace!(pointer = %id, "replacing stale contact");
            self.end(id);
        }

        let arrival = self.next_arrival;
        self.next_arrival += 1;
        self.contacts
            .insert(id, Contact::new(id, Point::new(x, y), time, target, arrival));

        if self.contacts.len() == 2 && self.baseline.is_none() {
            self.capture_baseline();
        }

        &self.contacts[&id]
    }

    /// Apply a move sample. Unknown ids are ignored.
    pub fn on_move(&mut self, id: PointerId, x: f64, y: f64, time: f64) -> Option<&Contact> {
        let Some(contact) = self.contacts.get_mut(&id) else {
            tracing::trace!(pointer = %id, "move for unknown pointer ignored");
            return None;
        };
        contact.apply(Point::new(x, y), time);
        Some(&*contact)
    }

    /// Stop tracking `id` and hand back its final state.
    pub fn on_up(&mut self, id: PointerId) -> Option<Contact> {
        self.end(id)
    }

    /// Stop tracking `id`. Nothing is classified after a cancel.
    pub fn on_cancel(&mut self, id: PointerId) {
        self.end(id);
    }

    pub fn contact(&self, id: PointerId) -> Option<&Contact> {
        self.contacts.get(&id)
    }

    pub fn contacts(&self) -> impl Iterator<Item = &Contact> {
        self.contacts.values()
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    pub fn baseline(&self) -> Option<&Baseline> {
        self.baseline.as_ref()
    }

    /// The two baseline contacts, earlier arrival first.
    pub fn baseline_pair(&self) -> Option<(&Contact, &Contact)> {
        let baseline = self.baseline.as_ref()?;
        let first = self.contacts.get(&baseline.first)?;
        let second = self.contacts.get(&baseline.second)?;
        Some((first, second))
    }

    /// Drop every contact and the baseline.
    pub fn clear(&mut self) {
        self.contacts.clear();
        self.baseline = None;
    }

    fn end(&mut self, id: PointerId) -> Option<Contact> {
        let removed = self.contacts.remove(&id);
        if self.baseline.is_some_and(|b| b.involves(id)) {
            tracing::debug!(pointer = %id, "baseline discarded");
            self.baseline = None;
        }
        removed
    }

    fn capture_baseline(&mut self) {
        let mut active: Vec<&Contact> = self.contacts.values().collect();
        active.sort_by_key(|c| c.arrival);
        let (first, second) = (active[0], active[1]);

        let baseline = Baseline {
            first: first.id,
            second: second.id,
            distance: first.current.distance(second.current),
            angle: first.current.angle_to(second.current),
        };
        tracing::debug!(
            first = %baseline.first,
            second = %baseline.second,
            distance = baseline.distance,
            angle = baseline.angle,
            "baseline captured"
        );
        self.baseline = Some(baseline);
    }
}

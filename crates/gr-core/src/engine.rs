//! The composed recognizer: tracker → classifier → dispatch.
//!
//! One engine per logical input stream. Hosts build as many as they need
//! (for example one per view); nothing is shared between engines.

use crate::classifier::GestureClassifier;
use crate::config::{ConfigError, ThresholdConfig};
use crate::dispatch::{DispatchBus, HandlerId, HandlerResult};
use crate::event::{Gesture, GestureKind};
use crate::geometry::Point;
use crate::sample::{Phase, PointerId, PointerSample, Target};
use crate::tracker::{Contact, PointerTracker};

#[derive(Debug, Default)]
pub struct GestureEngine {
    tracker: PointerTracker,
    classifier: GestureClassifier,
    bus: DispatchBus,
    config: ThresholdConfig,
    /// Reused output buffer for one classification pass.
    pending: Vec<Gesture>,
}

impl GestureEngine {
    pub fn new(config: ThresholdConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn with_defaults() -> Self {
        Self::default()
    }

    pub fn config(&self) -> &ThresholdConfig {
        &self.config
    }

    /// Direct access for runtime tuning. Takes effect from the next sample.
    pub fn config_mut(&mut self) -> &mut ThresholdConfig {
        &mut self.config
    }

    /// Replace the configuration after validating it.
    pub fn set_config(&mut self, config: ThresholdConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.config = config;
        tracing::debug!(?config, "thresholds updated");
        Ok(())
    }

    pub fn register<F>(&mut self, kind: GestureKind, handler: F) -> HandlerId
    where
        F: FnMut(&Gesture) -> HandlerResult + 'static,
    {
        self.bus.register(kind, handler)
    }

    pub fn unregister(&mut self, id: HandlerId) -> bool {
        self.bus.unregister(id)
    }

    pub fn bus(&self) -> &DispatchBus {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut DispatchBus {
        &mut self.bus
    }

    /// Route one sample by phase. Returns the number of gestures emitted.
    pub fn handle(&mut self, sample: &PointerSample) -> usize {
        let PointerSample {
            id,
            x,
            y,
            timestamp_ms: t,
            ..
        } = *sample;
        match sample.phase {
            Phase::Down => self.on_down(id, x, y, t, sample.target.clone()),
            Phase::Move => self.on_move(id, x, y, t),
            Phase::Up => self.on_up(id, x, y, t),
            Phase::Cancel => self.on_cancel(id, t),
        }
    }

    pub fn on_down(
        &mut self,
        id: PointerId,
        x: f64,
        y: f64,
        t: f64,
        target: Option<Target>,
    ) -> usize {
        let cfg = self.config;
        self.advance(t, &cfg);
        if self.tracker.contact(id).is_some() {
            self.classifier.on_cancel(id);
        }
        self.tracker.on_down(id, x, y, t, target);
        self.classifier.on_down(&self.tracker, id, &cfg);
        self.flush()
    }

    pub fn on_move(&mut self, id: PointerId, x: f64, y: f64, t: f64) -> usize {
        let cfg = self.config;
        self.advance(t, &cfg);
        if self.tracker.on_move(id, x, y, t).is_some() {
            self.classifier
                .on_move(&self.tracker, id, &cfg, &mut self.pending);
        }
        self.flush()
    }

    /// Release `id` at `(x, y)`. A release point that differs from the last
    /// tracked position is applied as a final move first.
    pub fn on_up(&mut self, id: PointerId, x: f64, y: f64, t: f64) -> usize {
        let cfg = self.config;
        self.advance(t, &cfg);

        let moved = self
            .tracker
            .contact(id)
            .is_some_and(|c| c.current != Point::new(x, y));
        if moved {
            self.tracker.on_move(id, x, y, t);
        }

        match self.tracker.on_up(id) {
            Some(contact) => {
                self.classifier
                    .on_up(&contact, t, &cfg, &mut self.pending);
            }
            None => tracing::trace!(pointer = %id, "up for unknown pointer ignored"),
        }
        self.flush()
    }

    /// Drop `id` without classifying it. Any pending long press is disarmed.
    pub fn on_cancel(&mut self, id: PointerId, t: f64) -> usize {
        let cfg = self.config;
        self.advance(t, &cfg);
        self.tracker.on_cancel(id);
        self.classifier.on_cancel(id);
        self.flush()
    }

    /// Fire long presses that are due at `now`. For hosts that poll on a
    /// frame or timer tick between samples.
    pub fn tick(&mut self, now: f64) -> usize {
        let cfg = self.config;
        self.advance(now, &cfg);
        self.flush()
    }

    /// Earliest pending long-press deadline, in sample time.
    pub fn next_deadline(&self) -> Option<f64> {
        self.classifier.next_deadline()
    }

    /// Forget every contact, timer and the last tap. Handlers stay registered.
    pub fn reset(&mut self) {
        self.tracker.clear();
        self.classifier.reset();
        self.pending.clear();
        tracing::debug!("engine reset");
    }

    pub fn active_contacts(&self) -> usize {
        self.tracker.len()
    }

    pub fn contact(&self, id: PointerId) -> Option<&Contact> {
        self.tracker.contact(id)
    }

    pub fn tracker(&self) -> &PointerTracker {
        &self.tracker
    }

    fn advance(&mut self, now: f64, cfg: &ThresholdConfig) {
        self.classifier
            .advance(&self.tracker, now, cfg, &mut self.pending);
    }

    /// Dispatch everything recognized in this pass.
    fn flush(&mut self) -> usize {
        let count = self.pending.len();
        for gesture in self.pending.drain(..) {
            tracing::debug!(kind = %gesture.kind(), time_ms = gesture.time_ms, "{}", gesture.event);
            self.bus.emit(&gesture);
        }
        count
    }
}

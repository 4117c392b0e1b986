//! Typed delivery of recognized gestures to registered handlers.
//!
//! Handlers run synchronously, in registration order, inside the call that
//! produced the gesture. A handler that returns an error or panics is
//! reported to the diagnostic sink and the remaining handlers still run.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};

use crate::event::{Gesture, GestureKind};

pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;
pub type HandlerResult = Result<(), HandlerError>;

type Handler = Box<dyn FnMut(&Gesture) -> HandlerResult>;
type DiagnosticSink = Box<dyn FnMut(&DeliveryFailure)>;

/// Identifies one registration, for [`DispatchBus::unregister`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandlerId(u64);

impl fmt::Display for HandlerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "handler-{}", self.0)
    }
}

/// A handler that failed while receiving a gesture.
#[derive(Clone, Debug, PartialEq)]
pub struct DeliveryFailure {
    pub handler: HandlerId,
    pub kind: GestureKind,
    pub reason: String,
    /// The handler panicked rather than returning an error.
    pub panicked: bool,
}

impl fmt::Display for DeliveryFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let how = if self.panicked { "panicked" } else { "failed" };
        write!(
            f,
            "{} {how} on {} gesture: {}",
            self.handler, self.kind, self.reason
        )
    }
}

pub struct DispatchBus {
    handlers: HashMap<GestureKind, Vec<(HandlerId, Handler)>>,
    next_id: u64,
    sink: Option<DiagnosticSink>,
    failures: u64,
}

impl Default for DispatchBus {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for DispatchBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts: HashMap<GestureKind, usize> = self
            .handlers
            .iter()
            .map(|(kind, list)| (*kind, list.len()))
            .collect();
        f.debug_struct("DispatchBus")
            .field("handlers", &counts)
            .field("failures", &self.failures)
            .finish()
    }
}

impl DispatchBus {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
            next_id: 0,
            sink: None,
            failures: 0,
        }
    }

    /// Add a handler for `kind`. Handlers for the same kind run in the order
    /// they were registered.
    pub fn register<F>(&mut self, kind: GestureKind, handler: F) -> HandlerId
    where
        F: FnMut(&Gesture) -> HandlerResult + 'static,
    {
        let id = HandlerId(self.next_id);
        self.next_id += 1;
        self.handlers
            .entry(kind)
            .or_default()
            .push((id, Box::new(handler)));
        tracing::debug!(%id, %kind, "handler registered");
        id
    }

    /// Remove one registration. Returns false if `id` was not registered.
    pub fn unregister(&mut self, id: HandlerId) -> bool {
        for list in self.handlers.values_mut() {
            if let Some(pos) = list.iter().position(|(h, _)| *h == id) {
                list.remove(pos);
                return true;
            }
        }
        false
    }

    /// Deliver `gesture` to every handler of its kind.
    /// Returns how many handlers completed without error.
    pub fn emit(&mut self, gesture: &Gesture) -> usize {
        let kind = gesture.kind();
        let Some(list) = self.handlers.get_mut(&kind) else {
            return 0;
        };

        let mut delivered = 0;
        let mut failed = Vec::new();
        for (id, handler) in list.iter_mut() {
            match catch_unwind(AssertUnwindSafe(|| handler(gesture))) {
                Ok(Ok(())) => delivered += 1,
                Ok(Err(e)) => failed.push(DeliveryFailure {
                    handler: *id,
                    kind,
                    reason: e.to_string(),
                    panicked: false,
                }),
                Err(payload) => failed.push(DeliveryFailure {
                    handler: *id,
                    kind,
                    reason: panic_message(payload.as_ref()),
                    panicked: true,
                }),
            }
        }

        for failure in &failed {
            self.report(failure);
        }
        delivered
    }

    /// Replace the default sink, which logs failures with `tracing::warn!`.
    pub fn set_diagnostic_sink<F>(&mut self, sink: F)
    where
        F: FnMut(&DeliveryFailure) + 'static,
    {
        self.sink = Some(Box::new(sink));
    }

    /// Total handler failures since creation.
    pub fn failure_count(&self) -> u64 {
        self.failures
    }

    pub fn handler_count(&self, kind: GestureKind) -> usize {
        self.handlers.get(&kind).map_or(0, Vec::len)
    }

    /// Remove every handler. The diagnostic sink is kept.
    pub fn clear(&mut self) {
        self.handlers.clear();
    }

    fn report(&mut self, failure: &DeliveryFailure) {
        self.failures += 1;
        match self.sink.as_mut() {
            Some(sink) => sink(failure),
            None => tracing::warn!(
                handler = %failure.handler,
                kind = %failure.kind,
                panicked = failure.panicked,
                "gesture handler failed: {}",
                failure.reason
            ),
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

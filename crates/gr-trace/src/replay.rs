//! Offline replay: run a recorded trace through a fresh engine.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use gr_core::{Gesture, GestureEngine, GestureKind, PointerSample, ThresholdConfig};

/// What a trace produced.
#[derive(Debug, Default)]
pub struct Replay {
    pub gestures: Vec<Gesture>,
    pub samples: usize,
}

impl Replay {
    /// Gesture count per kind, in kind order.
    pub fn counts(&self) -> BTreeMap<GestureKind, usize> {
        let mut counts = BTreeMap::new();
        for gesture in &self.gestures {
            *counts.entry(gesture.kind()).or_insert(0) += 1;
        }
        counts
    }
}

/// Replay `samples` in order. After the last sample the engine is ticked at
/// the last timestamp so a trailing hold still long-presses.
pub fn replay(config: ThresholdConfig, samples: &[PointerSample]) -> Replay {
    let mut engine = GestureEngine::new(config);
    let collected = Rc::new(RefCell::new(Vec::new()));
    for kind in GestureKind::ALL {
        let collected = Rc::clone(&collected);
        engine.register(kind, move |g| {
            collected.borrow_mut().push(g.clone());
            Ok(())
        });
    }

    for sample in samples {
        engine.handle(sample);
    }
    if let Some(last) = samples.last() {
        engine.tick(last.timestamp_ms);
    }

    let gestures = collected.take();
    tracing::debug!(
        samples = samples.len(),
        gestures = gestures.len(),
        "replay finished"
    );
    Replay {
        gestures,
        samples: samples.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gr_core::GestureEvent;

    #[test]
    fn test_replay_counts() {
        let samples = vec![
            PointerSample::down(1, 0.0, 0.0, 0.0),
            PointerSample::up(1, 0.0, 0.0, 30.0),
            PointerSample::down(1, 0.0, 0.0, 100.0),
            PointerSample::up(1, 0.0, 0.0, 130.0),
            PointerSample::down(1, 0.0, 0.0, 1_000.0),
            PointerSample::moved(1, 0.0, 80.0, 1_040.0),
            PointerSample::up(1, 0.0, 80.0, 1_040.0),
        ];
        let result = replay(ThresholdConfig::default(), &samples);
        assert_eq!(result.samples, 7);
        let counts = result.counts();
        assert_eq!(counts.get(&GestureKind::Tap), Some(&1));
        assert_eq!(counts.get(&GestureKind::DoubleTap), Some(&1));
        assert_eq!(counts.get(&GestureKind::Pan), Some(&1));
        assert_eq!(counts.get(&GestureKind::Swipe), Some(&1));
    }

    #[test]
    fn test_trailing_hold_long_presses() {
        let samples = vec![
            PointerSample::down(1, 4.0, 4.0, 0.0),
            PointerSample::moved(1, 5.0, 4.0, 700.0),
        ];
        let result = replay(ThresholdConfig::default(), &samples);
        assert_eq!(
            result.gestures.iter().map(|g| g.event).collect::<Vec<_>>(),
            vec![GestureEvent::LongPress { x: 4.0, y: 4.0 }]
        );
    }

    #[test]
    fn test_empty_trace() {
        let result = replay(ThresholdConfig::default(), &[]);
        assert!(result.gestures.is_empty());
        assert!(result.counts().is_empty());
    }
}

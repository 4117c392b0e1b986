//! Live recognition over a line stream.
//!
//! Samples carry their own clock. The first sample pins that clock to the
//! wall clock, so a held contact long-presses when its deadline passes in
//! real time, even if no further sample arrives.

use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;
use std::time::Duration;

use anyhow::{Context, Result};
use gr_core::{Gesture, GestureEngine, GestureKind, ThresholdConfig};
use gr_trace::{parse_sample_line, write_gesture};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::time::Instant;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ListenStats {
    pub samples: usize,
    pub skipped: usize,
    pub gestures: usize,
}

/// Sample time `t0` happened at wall instant `origin`.
#[derive(Debug, Clone, Copy)]
struct Clock {
    origin: Instant,
    t0: f64,
}

impl Clock {
    /// Wall instant for sample time `t`. `None` when `t` is too far out to
    /// be represented.
    fn instant_of(&self, t: f64) -> Option<Instant> {
        let offset = Duration::try_from_secs_f64((t - self.t0).max(0.0) / 1000.0).ok()?;
        self.origin.checked_add(offset)
    }

    fn now_ms(&self) -> f64 {
        self.t0 + self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// Smallest step past `t` that still compares greater at any magnitude.
fn just_after(t: f64) -> f64 {
    t + f64::EPSILON * t.abs().max(1.0)
}

/// Run until `input` hits EOF or Ctrl-C. Gestures are written to `out` as
/// JSON lines and flushed as soon as they are recognized. Malformed lines
/// are logged and skipped.
pub async fn run<R, W>(config: ThresholdConfig, input: R, out: &mut W) -> Result<ListenStats>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut engine = GestureEngine::new(config);
    let outbox: Rc<RefCell<Vec<Gesture>>> = Rc::default();
    for kind in GestureKind::ALL {
        let outbox = Rc::clone(&outbox);
        engine.register(kind, move |g| {
            outbox.borrow_mut().push(g.clone());
            Ok(())
        });
    }

    let mut lines = input.lines();
    let mut clock: Option<Clock> = None;
    let mut stats = ListenStats::default();
    let mut line_no = 0;

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        let deadline = engine.next_deadline();
        let wake = deadline.zip(clock).and_then(|(d, c)| c.instant_of(d));

        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("failed to read input")? else {
                    tracing::debug!("input closed");
                    break;
                };
                line_no += 1;
                match parse_sample_line(&line, line_no) {
                    Ok(Some(sample)) => {
                        let c = *clock.get_or_insert(Clock {
                            origin: Instant::now(),
                            t0: sample.timestamp_ms,
                        });
                        tracing::trace!(lag_ms = c.now_ms() - sample.timestamp_ms, "sample");
                        engine.handle(&sample);
                        stats.samples += 1;
                    }
                    Ok(None) => {}
                    Err(e) => {
                        tracing::warn!("skipping sample: {e}");
                        stats.skipped += 1;
                    }
                }
            }
            _ = tokio::time::sleep_until(wake.unwrap_or_else(Instant::now)), if wake.is_some() => {
                if let (Some(c), Some(d)) = (clock, deadline) {
                    // Deadlines fire strictly after `d`; sleep_until may also
                    // wake a hair early after float round-trips.
                    engine.tick(c.now_ms().max(just_after(d)));
                }
            }
            _ = &mut shutdown => {
                tracing::info!("interrupted");
                break;
            }
        }

        let recognized = std::mem::take(&mut *outbox.borrow_mut());
        if !recognized.is_empty() {
            for gesture in &recognized {
                write_gesture(out, gesture)?;
            }
            out.flush().context("failed to flush output")?;
            stats.gestures += recognized.len();
        }
    }

    Ok(stats)
}

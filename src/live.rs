//! Live driving: process the newest frame, drop the rest.
//!
//! The landmark source runs at camera rate; interpretation must never
//! fall behind it. A `tokio::sync::watch` channel holds only the latest
//! frame, so a slow consumer skips stale frames instead of queueing them.
//!
//! ```ignore
//! let (feed, frames) = live::channel();
//! tokio::spawn(async move {
//!     while let Some((landmarks, gesture)) = detector.next().await {
//!         if !feed.publish_detection(landmarks, gesture) { break; }
//!     }
//! });
//! let report = LiveDriver::new(interp).run(frames, &mut sink).await;
//! ```

use crate::sink::{deliver, PresentationSink};
use orrery_input::{FrameInput, GestureInterpreter, LabeledGesture, Landmark, MonotonicClock};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::watch;
use tracing::{debug, trace};

/// Receiving half handed to [`LiveDriver::run`].
pub type FrameWatch = watch::Receiver<Option<FrameInput>>;

/// Producer half: publishes frames, overwriting any not yet processed.
///
/// Clones share one session clock, so frames stamped through any of them
/// are ordered.
#[derive(Debug, Clone)]
pub struct FrameFeed {
    tx: Arc<watch::Sender<Option<FrameInput>>>,
    clock: Arc<Mutex<MonotonicClock>>,
    published: Arc<AtomicU64>,
}

impl FrameFeed {
    /// Publish an already stamped frame. Returns false once the driver
    /// has gone away.
    pub fn publish(&self, frame: FrameInput) -> bool {
        self.published.fetch_add(1, Ordering::Relaxed);
        self.tx.send(Some(frame)).is_ok()
    }

    /// Stamp raw detector output with the session clock on arrival and
    /// publish it.
    pub fn publish_detection(
        &self,
        landmarks: Option<Vec<Landmark>>,
        gesture: Option<LabeledGesture>,
    ) -> bool {
        let frame = self
            .clock
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .stamp(landmarks, gesture);
        self.publish(frame)
    }

    pub fn published(&self) -> u64 {
        self.published.load(Ordering::Relaxed)
    }
}

/// Create a latest-only frame channel.
pub fn channel() -> (FrameFeed, FrameWatch) {
    let (tx, rx) = watch::channel(None);
    let feed = FrameFeed {
        tx: Arc::new(tx),
        clock: Arc::new(Mutex::new(MonotonicClock::new())),
        published: Arc::new(AtomicU64::new(0)),
    };
    (feed, rx)
}

/// What a live run did.
#[derive(Debug)]
pub struct LiveReport {
    pub processed: u64,
    /// The interpreter, handed back for inspection.
    pub interpreter: GestureInterpreter,
}

/// Owns the interpreter for the duration of a live session.
#[derive(Debug)]
pub struct LiveDriver {
    interpreter: GestureInterpreter,
}

impl LiveDriver {
    pub fn new(interpreter: GestureInterpreter) -> Self {
        Self { interpreter }
    }

    /// Run until every [`FrameFeed`] clone is dropped.
    pub async fn run<S>(mut self, mut frames: FrameWatch, sink: &mut S) -> LiveReport
    where
        S: PresentationSink + ?Sized,
    {
        let mut processed = 0;
        let mut last_ms: Option<u64> = None;

        while frames.changed().await.is_ok() {
            let Some(frame) = frames.borrow_and_update().clone() else {
                continue;
            };
            if last_ms.is_some_and(|last| frame.timestamp_ms < last) {
                trace!(at_ms = frame.timestamp_ms, "stale frame dropped");
                continue;
            }
            last_ms = Some(frame.timestamp_ms);

            let outcome = self.interpreter.on_frame(&frame);
            deliver(sink, &outcome);
            processed += 1;
        }

        debug!(processed, "live session ended");
        LiveReport {
            processed,
            interpreter: self.interpreter,
        }
    }
}

//! Monotonic frame stamping.
//!
//! Detectors compare timestamps between frames, so stamps must never run
//! backwards even if the platform clock stutters.

use crate::frame::{FrameInput, LabeledGesture};
use crate::landmark::Landmark;
use instant::Instant;

/// Milliseconds since construction, never decreasing.
#[derive(Debug, Clone)]
pub struct MonotonicClock {
    start: Instant,
    last_ms: u64,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            last_ms: 0,
        }
    }

    /// Current session time in milliseconds.
    pub fn now_ms(&mut self) -> u64 {
        let elapsed = self.start.elapsed().as_millis();
        let ms = u64::try_from(elapsed).unwrap_or(u64::MAX);
        self.last_ms = self.last_ms.max(ms);
        self.last_ms
    }

    /// Stamp a detector result with the current session time.
    pub fn stamp(
        &mut self,
        landmarks: Option<Vec<Landmark>>,
        gesture: Option<LabeledGesture>,
    ) -> FrameInput {
        FrameInput {
            timestamp_ms: self.now_ms(),
            landmarks,
            gesture,
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

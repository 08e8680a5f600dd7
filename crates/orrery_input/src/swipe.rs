//! Horizontal swipe detection from palm-centre velocity.
//!
//! Velocity is measured between consecutive accepted samples, not since
//! the last commit, so a slow drift followed by a flick still registers.

use crate::landmark::Landmark;
use crate::{
    DEFAULT_SWIPE_COOLDOWN_MS, DEFAULT_SWIPE_DIRECTION_RATIO, DEFAULT_SWIPE_MIN_DISTANCE,
    DEFAULT_SWIPE_MIN_INTERVAL_MS, DEFAULT_SWIPE_MIN_VELOCITY,
};
use orrery_core::cooldown_elapsed;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Swipe direction in image space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SwipeDirection {
    /// Δx < 0: retreat focus.
    Left,
    /// Δx > 0: advance focus.
    Right,
}

/// Swipe thresholds.
#[derive(Debug, Clone, PartialEq)]
pub struct SwipeConfig {
    /// Samples closer together than this are ignored (frame-rate floor).
    pub min_interval_ms: u64,
    /// Minimum |Δx| between samples, normalized units.
    pub min_distance: f32,
    /// |Δx| must exceed this multiple of |Δy|.
    pub direction_ratio: f32,
    /// Minimum horizontal speed, normalized units per second.
    pub min_velocity: f32,
    /// Minimum time between two commits.
    pub cooldown_ms: u64,
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self {
            min_interval_ms: DEFAULT_SWIPE_MIN_INTERVAL_MS,
            min_distance: DEFAULT_SWIPE_MIN_DISTANCE,
            direction_ratio: DEFAULT_SWIPE_DIRECTION_RATIO,
            min_velocity: DEFAULT_SWIPE_MIN_VELOCITY,
            cooldown_ms: DEFAULT_SWIPE_COOLDOWN_MS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct PalmSample {
    x: f32,
    y: f32,
    at_ms: u64,
}

/// Palm-centre swipe detector. Only fed while unlocked.
#[derive(Debug, Clone)]
pub struct SwipeDetector {
    config: SwipeConfig,
    /// Working memory: cleared on every mode transition.
    last: Option<PalmSample>,
    /// Cooldown clock: survives mode transitions.
    last_commit: Option<u64>,
}

impl SwipeDetector {
    pub fn new(config: SwipeConfig) -> Self {
        Self {
            config,
            last: None,
            last_commit: None,
        }
    }

    /// Whether a previous palm position is held.
    pub fn has_memory(&self) -> bool {
        self.last.is_some()
    }

    /// Drop the stored palm position. The cooldown clock is kept.
    pub fn clear(&mut self) {
        self.last = None;
    }

    /// Feed one palm-centre sample; returns a committed swipe, if any.
    pub fn update(&mut self, palm: Landmark, at_ms: u64) -> Option<SwipeDirection> {
        let sample = PalmSample {
            x: palm.x,
            y: palm.y,
            at_ms,
        };
        let Some(prev) = self.last else {
            self.last = Some(sample);
            return None;
        };

        let dt_ms = at_ms.saturating_sub(prev.at_ms);
        if dt_ms == 0 || dt_ms < self.config.min_interval_ms {
            trace!(dt_ms, "swipe sample inside frame-rate floor");
            return None;
        }

        let dx = sample.x - prev.x;
        let dy = sample.y - prev.y;
        self.last = Some(sample);

        if dx.abs() <= self.config.min_distance
            || dx.abs() <= self.config.direction_ratio * dy.abs()
        {
            return None;
        }

        let velocity = dx.abs() / (dt_ms as f32 / 1000.0);
        if velocity <= self.config.min_velocity {
            trace!(velocity, "swipe too slow");
            return None;
        }
        if !cooldown_elapsed(self.last_commit, at_ms, self.config.cooldown_ms) {
            trace!(at_ms, "swipe suppressed by cooldown");
            return None;
        }

        self.last_commit = Some(at_ms);
        let direction = if dx > 0.0 {
            SwipeDirection::Right
        } else {
            SwipeDirection::Left
        };
        debug!(?direction, dx, velocity, at_ms, "swipe committed");
        Some(direction)
    }
}

impl Default for SwipeDetector {
    fn default() -> Self {
        Self::new(SwipeConfig::default())
    }
}

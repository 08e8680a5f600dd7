//! Rotary dial detection from the five fingertips.
//!
//! The hand is treated as a dial knob: fingertips spread around their
//! centroid, the thumb tip acts as the pointer. Only frame-to-frame angle
//! deltas are tracked, never an absolute dial position, so any starting
//! orientation works. Translation of the whole hand is detected through
//! centroid drift and discarded instead of being read as rotation.

use crate::landmark::{centroid, Landmark};
use crate::{
    DEFAULT_DIAL_MAX_DRIFT, DEFAULT_DIAL_MIN_SPREAD, DEFAULT_DIAL_ROTATION_THRESHOLD,
    DEFAULT_ROTATION_HISTORY_LEN,
};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::f32::consts::{PI, TAU};
use tracing::{debug, trace};

/// Direction of a committed dial tick. Image y grows downwards, so a
/// growing `atan2` angle is clockwise on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RotationDirection {
    Clockwise,
    CounterClockwise,
}

/// Outcome of one dial frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DialReading {
    /// Fingertips too close together. Nothing stored, history untouched.
    NotFormed,
    /// First sample after a reset; stored as the reference.
    Primed,
    /// Centroid moved too far; stored tips and history were reset.
    Drifted,
    /// Rotation measured but the smoothed average is below threshold.
    Steady { average: f32 },
    /// Smoothed rotation crossed the threshold.
    Tick {
        direction: RotationDirection,
        average: f32,
    },
}

impl DialReading {
    pub fn direction(&self) -> Option<RotationDirection> {
        match self {
            DialReading::Tick { direction, .. } => Some(*direction),
            _ => None,
        }
    }
}

/// Dial thresholds.
#[derive(Debug, Clone, PartialEq)]
pub struct DialConfig {
    /// Minimum mean fingertip distance from the centroid.
    pub min_spread: f32,
    /// Maximum centroid displacement between frames still read as rotation.
    pub max_drift: f32,
    /// Minimum smoothed angle delta (radians) for a tick.
    pub rotation_threshold: f32,
    /// Length of the smoothing window.
    pub history_len: usize,
}

impl Default for DialConfig {
    fn default() -> Self {
        Self {
            min_spread: DEFAULT_DIAL_MIN_SPREAD,
            max_drift: DEFAULT_DIAL_MAX_DRIFT,
            rotation_threshold: DEFAULT_DIAL_ROTATION_THRESHOLD,
            history_len: DEFAULT_ROTATION_HISTORY_LEN,
        }
    }
}

/// Fingertip dial detector. Only fed while locked.
#[derive(Debug, Clone)]
pub struct DialDetector {
    config: DialConfig,
    stored: Option<[Landmark; 5]>,
    history: VecDeque<f32>,
}

impl DialDetector {
    pub fn new(config: DialConfig) -> Self {
        let history = VecDeque::with_capacity(config.history_len);
        Self {
            config,
            stored: None,
            history,
        }
    }

    /// Whether stored tips or rotation history are held.
    pub fn has_memory(&self) -> bool {
        self.stored.is_some() || !self.history.is_empty()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Drop stored tips and rotation history.
    pub fn clear(&mut self) {
        self.stored = None;
        self.history.clear();
    }

    /// Feed the five fingertips (thumb first).
    pub fn update(&mut self, tips: [Landmark; 5]) -> DialReading {
        let Some(center) = centroid(&tips) else {
            return DialReading::NotFormed;
        };
        let spread = tips.iter().map(|t| t.distance(&center)).sum::<f32>() / 5.0;
        if spread <= self.config.min_spread {
            // History deliberately kept: a brief pinch does not restart smoothing.
            trace!(spread, "fingertips not spread into a dial");
            return DialReading::NotFormed;
        }

        let Some(prev) = self.stored else {
            self.stored = Some(tips);
            return DialReading::Primed;
        };
        let Some(prev_center) = centroid(&prev) else {
            self.stored = Some(tips);
            return DialReading::Primed;
        };

        let drift = center.distance(&prev_center);
        if drift > self.config.max_drift {
            trace!(drift, "hand translated, dial reset");
            self.clear();
            return DialReading::Drifted;
        }

        let before = angle_about(prev[0], prev_center);
        let after = angle_about(tips[0], center);
        let delta = normalize_angle(after - before);

        self.history.push_back(delta);
        while self.history.len() > self.config.history_len {
            self.history.pop_front();
        }
        let average = self.history.iter().sum::<f32>() / self.history.len() as f32;

        self.stored = Some(tips);

        if average.abs() > self.config.rotation_threshold {
            let direction = if average > 0.0 {
                RotationDirection::Clockwise
            } else {
                RotationDirection::CounterClockwise
            };
            debug!(?direction, average, "dial tick");
            DialReading::Tick { direction, average }
        } else {
            DialReading::Steady { average }
        }
    }
}

impl Default for DialDetector {
    fn default() -> Self {
        Self::new(DialConfig::default())
    }
}

fn angle_about(point: Landmark, center: Landmark) -> f32 {
    (point.y - center.y).atan2(point.x - center.x)
}

/// Fold an angle difference into (-π, π].
pub fn normalize_angle(mut delta: f32) -> f32 {
    if !delta.is_finite() {
        return 0.0;
    }
    while delta > PI {
        delta -= TAU;
    }
    while delta <= -PI {
        delta += TAU;
    }
    delta
}

//! Interpreter configuration and presets.

use crate::dial::DialConfig;
use crate::error::InputError;
use crate::hand_state::{GeometricFistClassifier, LabelClassifier};
use crate::swipe::SwipeConfig;
use crate::{
    DEFAULT_DIAL_MAX_DRIFT, DEFAULT_DIAL_MIN_SPREAD, DEFAULT_DIAL_ROTATION_THRESHOLD,
    DEFAULT_FIST_MIN_CLOSED, DEFAULT_FIST_THUMB_TOLERANCE, DEFAULT_GESTURE_CONFIDENCE,
    DEFAULT_HALTED_SPIN_MULTIPLIER, DEFAULT_ROTATION_HISTORY_LEN, DEFAULT_SWIPE_COOLDOWN_MS,
    DEFAULT_SWIPE_DIRECTION_RATIO, DEFAULT_SWIPE_MIN_DISTANCE, DEFAULT_SWIPE_MIN_INTERVAL_MS,
    DEFAULT_SWIPE_MIN_VELOCITY,
};
use orrery_core::DEFAULT_DETAIL_COOLDOWN_MS;
use serde::{Deserialize, Serialize};

/// Swipe cooldown used by the orbit-follow preset (ms).
pub const ORBIT_FOLLOW_SWIPE_COOLDOWN_MS: u64 = 500;

/// Spin speed-up applied to a halted body in the orbit-follow preset.
pub const ORBIT_FOLLOW_HALTED_SPIN_MULTIPLIER: f32 = 2.0;

/// What locking and unlocking do to the camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ZoomPolicy {
    /// Lock state never zooms.
    #[default]
    Disabled,
    /// Lock zooms in and halts the focused body; unlock zooms back out.
    Plain,
    /// Like `Plain`, but the zoomed-out camera keeps tracking the body
    /// once it resumes its orbit.
    KeepRevolving,
}

impl ZoomPolicy {
    pub fn zooms(&self) -> bool {
        !matches!(self, ZoomPolicy::Disabled)
    }

    pub fn tracks_orbit(&self) -> bool {
        matches!(self, ZoomPolicy::KeepRevolving)
    }
}

/// Every tunable of the interpreter.
///
/// Fields default individually, so a partial TOML or JSON file only
/// overrides what it names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterpreterConfig {
    /// Labels must be strictly more confident than this to switch mode.
    pub gesture_confidence_threshold: f32,

    pub swipe_min_interval_ms: u64,
    pub swipe_min_distance: f32,
    pub swipe_direction_ratio: f32,
    /// Normalized units per second.
    pub swipe_min_velocity: f32,
    pub swipe_cooldown_ms: u64,

    pub dial_min_spread: f32,
    pub dial_max_drift: f32,
    /// Radians.
    pub dial_rotation_threshold: f32,
    pub rotation_history_len: usize,

    pub fist_thumb_tolerance: f32,
    pub fist_min_closed: usize,

    pub detail_cooldown_ms: u64,

    pub zoom_policy: ZoomPolicy,

    /// Axial spin multiplier while a body's orbit is halted.
    pub halted_spin_multiplier: f32,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self {
            gesture_confidence_threshold: DEFAULT_GESTURE_CONFIDENCE,
            swipe_min_interval_ms: DEFAULT_SWIPE_MIN_INTERVAL_MS,
            swipe_min_distance: DEFAULT_SWIPE_MIN_DISTANCE,
            swipe_direction_ratio: DEFAULT_SWIPE_DIRECTION_RATIO,
            swipe_min_velocity: DEFAULT_SWIPE_MIN_VELOCITY,
            swipe_cooldown_ms: DEFAULT_SWIPE_COOLDOWN_MS,
            dial_min_spread: DEFAULT_DIAL_MIN_SPREAD,
            dial_max_drift: DEFAULT_DIAL_MAX_DRIFT,
            dial_rotation_threshold: DEFAULT_DIAL_ROTATION_THRESHOLD,
            rotation_history_len: DEFAULT_ROTATION_HISTORY_LEN,
            fist_thumb_tolerance: DEFAULT_FIST_THUMB_TOLERANCE,
            fist_min_closed: DEFAULT_FIST_MIN_CLOSED,
            detail_cooldown_ms: DEFAULT_DETAIL_COOLDOWN_MS,
            zoom_policy: ZoomPolicy::Disabled,
            halted_spin_multiplier: DEFAULT_HALTED_SPIN_MULTIPLIER,
        }
    }
}

impl InterpreterConfig {
    /// Swipe-to-browse with no zooming.
    pub fn classic() -> Self {
        Self::default()
    }

    /// Faster browsing; locking zooms onto the focused body and unlocking
    /// follows it back out along its orbit.
    pub fn orbit_follow() -> Self {
        Self {
            swipe_cooldown_ms: ORBIT_FOLLOW_SWIPE_COOLDOWN_MS,
            zoom_policy: ZoomPolicy::KeepRevolving,
            halted_spin_multiplier: ORBIT_FOLLOW_HALTED_SPIN_MULTIPLIER,
            ..Self::default()
        }
    }

    /// Look up a preset by name. Accepts `orbit-follow` and `orbit_follow`.
    pub fn from_preset(name: &str) -> Result<Self, InputError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "classic" => Ok(Self::classic()),
            "orbit-follow" | "orbit_follow" => Ok(Self::orbit_follow()),
            _ => Err(InputError::UnknownPreset(name.to_string())),
        }
    }

    /// Reject values the detectors cannot work with.
    pub fn validate(&self) -> Result<(), InputError> {
        let c = self.gesture_confidence_threshold;
        if !(0.0..=1.0).contains(&c) {
            return Err(InputError::invalid(
                "gesture_confidence_threshold",
                format!("{c} is outside [0, 1]"),
            ));
        }

        non_negative("swipe_min_distance", self.swipe_min_distance)?;
        non_negative("swipe_direction_ratio", self.swipe_direction_ratio)?;
        non_negative("swipe_min_velocity", self.swipe_min_velocity)?;
        non_negative("dial_min_spread", self.dial_min_spread)?;
        non_negative("dial_max_drift", self.dial_max_drift)?;
        non_negative("dial_rotation_threshold", self.dial_rotation_threshold)?;
        non_negative("fist_thumb_tolerance", self.fist_thumb_tolerance)?;
        non_negative("halted_spin_multiplier", self.halted_spin_multiplier)?;

        if self.rotation_history_len == 0 {
            return Err(InputError::invalid(
                "rotation_history_len",
                "must hold at least one sample",
            ));
        }
        if !(1..=5).contains(&self.fist_min_closed) {
            return Err(InputError::invalid(
                "fist_min_closed",
                format!("{} is not between 1 and 5 fingers", self.fist_min_closed),
            ));
        }
        Ok(())
    }

    pub fn swipe_config(&self) -> SwipeConfig {
        SwipeConfig {
            min_interval_ms: self.swipe_min_interval_ms,
            min_distance: self.swipe_min_distance,
            direction_ratio: self.swipe_direction_ratio,
            min_velocity: self.swipe_min_velocity,
            cooldown_ms: self.swipe_cooldown_ms,
        }
    }

    pub fn dial_config(&self) -> DialConfig {
        DialConfig {
            min_spread: self.dial_min_spread,
            max_drift: self.dial_max_drift,
            rotation_threshold: self.dial_rotation_threshold,
            history_len: self.rotation_history_len,
        }
    }

    pub fn label_classifier(&self) -> LabelClassifier {
        LabelClassifier::new(self.gesture_confidence_threshold)
    }

    pub fn fist_classifier(&self) -> GeometricFistClassifier {
        GeometricFistClassifier::new(self.fist_thumb_tolerance, self.fist_min_closed)
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), InputError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(InputError::invalid(
            field,
            format!("{value} must be finite and non-negative"),
        ))
    }
}

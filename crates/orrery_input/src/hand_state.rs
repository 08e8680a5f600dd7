//! Hand-state classifiers.
//!
//! Two independent opinions about whether the hand is open or closed:
//!
//! - [`LabelClassifier`] trusts the detector's labeled gesture when its
//!   confidence clears a threshold. It drives lock/unlock.
//! - [`GeometricFistClassifier`] counts curled fingers from joint
//!   positions. It drives depth calibration.
//!
//! They see the same frames and may disagree. Neither is derived from the
//! other.

use crate::frame::{GestureLabel, LabeledGesture};
use crate::landmark::{LandmarkFrame, CLOSURE_JOINTS, FINGERTIPS};
use crate::{DEFAULT_FIST_MIN_CLOSED, DEFAULT_FIST_THUMB_TOLERANCE, DEFAULT_GESTURE_CONFIDENCE};

/// Coarse hand pose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandState {
    Open,
    Fist,
}

/// What a classifier gets to look at for one frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct HandObservation<'a> {
    /// Present only if the frame passed validation.
    pub landmarks: Option<&'a LandmarkFrame>,
    pub gesture: Option<&'a LabeledGesture>,
}

/// Something that can decide whether the hand is open or closed.
pub trait HandStateClassifier {
    /// `None` means "no opinion this frame".
    fn classify(&self, observation: &HandObservation<'_>) -> Option<HandState>;
}

/// Confidence-gated detector label.
#[derive(Debug, Clone)]
pub struct LabelClassifier {
    threshold: f32,
}

impl LabelClassifier {
    pub fn new(threshold: f32) -> Self {
        Self { threshold }
    }
}

impl Default for LabelClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_GESTURE_CONFIDENCE)
    }
}

impl HandStateClassifier for LabelClassifier {
    fn classify(&self, observation: &HandObservation<'_>) -> Option<HandState> {
        let gesture = observation.gesture?;
        // NaN confidence never passes
        if gesture.confidence.is_nan() || gesture.confidence <= self.threshold {
            return None;
        }
        match gesture.label {
            GestureLabel::OpenPalm => Some(HandState::Open),
            GestureLabel::ClosedFist => Some(HandState::Fist),
            GestureLabel::Other(_) => None,
        }
    }
}

/// Finger-closure count from joint geometry.
///
/// Thumb: closed when its tip is within `thumb_tolerance` of the IP joint
/// horizontally. Other fingers: closed when the tip is below the knuckle
/// (larger y). A fist needs at least `min_closed` of five.
#[derive(Debug, Clone)]
pub struct GeometricFistClassifier {
    thumb_tolerance: f32,
    min_closed: usize,
}

impl GeometricFistClassifier {
    pub fn new(thumb_tolerance: f32, min_closed: usize) -> Self {
        Self {
            thumb_tolerance,
            min_closed,
        }
    }

    /// Number of fingers judged closed, 0..=5.
    pub fn closed_count(&self, frame: &LandmarkFrame) -> usize {
        FINGERTIPS
            .iter()
            .zip(CLOSURE_JOINTS.iter())
            .enumerate()
            .filter(|(finger, (tip, joint))| {
                let tip = frame.point(**tip);
                let joint = frame.point(**joint);
                if *finger == 0 {
                    (tip.x - joint.x).abs() < self.thumb_tolerance
                } else {
                    tip.y > joint.y
                }
            })
            .count()
    }
}

impl Default for GeometricFistClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_FIST_THUMB_TOLERANCE, DEFAULT_FIST_MIN_CLOSED)
    }
}

impl HandStateClassifier for GeometricFistClassifier {
    fn classify(&self, observation: &HandObservation<'_>) -> Option<HandState> {
        let frame = observation.landmarks?;
        if self.closed_count(frame) >= self.min_closed {
            Some(HandState::Fist)
        } else {
            Some(HandState::Open)
        }
    }
}

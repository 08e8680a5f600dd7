//! Per-frame input from the landmark source.

use crate::landmark::Landmark;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Static gesture label from the detector's classifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GestureLabel {
    OpenPalm,
    ClosedFist,
    /// Anything else in the detector's vocabulary. Ignored.
    Other(String),
}

impl GestureLabel {
    /// Parse the detector's vocabulary (`"Open_Palm"`, `"Closed_Fist"`, ...).
    pub fn parse(raw: &str) -> Self {
        match raw {
            "Open_Palm" => GestureLabel::OpenPalm,
            "Closed_Fist" => GestureLabel::ClosedFist,
            other => GestureLabel::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            GestureLabel::OpenPalm => "Open_Palm",
            GestureLabel::ClosedFist => "Closed_Fist",
            GestureLabel::Other(raw) => raw,
        }
    }
}

impl Serialize for GestureLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for GestureLabel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(GestureLabel::parse(&raw))
    }
}

/// A classified gesture and the classifier's confidence in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledGesture {
    pub label: GestureLabel,
    pub confidence: f32,
}

impl LabeledGesture {
    pub fn new(label: GestureLabel, confidence: f32) -> Self {
        Self { label, confidence }
    }

    pub fn open_palm(confidence: f32) -> Self {
        Self::new(GestureLabel::OpenPalm, confidence)
    }

    pub fn closed_fist(confidence: f32) -> Self {
        Self::new(GestureLabel::ClosedFist, confidence)
    }
}

/// Everything the landmark source produced for one processed video frame.
///
/// Either field may be absent: no hand in view, or no label assigned.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FrameInput {
    /// Monotonic milliseconds since the session started.
    pub timestamp_ms: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub landmarks: Option<Vec<Landmark>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gesture: Option<LabeledGesture>,
}

impl FrameInput {
    /// A frame where nothing was detected.
    pub fn empty(timestamp_ms: u64) -> Self {
        Self {
            timestamp_ms,
            ..Self::default()
        }
    }

    /// A frame with landmarks and no label.
    pub fn hand(timestamp_ms: u64, landmarks: Vec<Landmark>) -> Self {
        Self {
            timestamp_ms,
            landmarks: Some(landmarks),
            gesture: None,
        }
    }

    /// Attach a labeled gesture.
    pub fn with_gesture(mut self, gesture: LabeledGesture) -> Self {
        self.gesture = Some(gesture);
        self
    }

    pub fn has_hand(&self) -> bool {
        self.landmarks.is_some()
    }
}

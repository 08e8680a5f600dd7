//! Hand-gesture interpretation for orrery navigation.
//!
//! This crate turns per-frame hand landmarks (21 points, plus an optional
//! labeled gesture) into debounced navigation commands. The design ensures:
//!
//! 1. **Mode exclusive** - unlocked hands swipe, locked hands dial, never both
//! 2. **Debounced** - every commit is gated by a cooldown clock
//! 3. **Recoverable** - partial or missing frames are skipped, never fatal
//! 4. **Tunable** - every threshold lives in `InterpreterConfig`
//!
//! # Architecture
//!
//! ```text
//!                   ┌──► ModeState (label) ───────────┐
//! FrameInput ───────┤                                  ▼
//!                   ├──► Calibrator (geometry) ──► GestureInterpreter ──► Navigator
//!                   └──► SwipeDetector | DialDetector ─┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use orrery_input::{FrameInput, GestureInterpreter, InterpreterConfig};
//!
//! let mut interp = GestureInterpreter::new(InterpreterConfig::classic())?;
//! let outcome = interp.on_frame(&FrameInput::hand(now_ms, landmarks));
//! for event in outcome.events {
//!     presenter.apply(event);
//! }
//! ```

mod calibrate;
mod clock;
mod config;
mod dial;
mod error;
mod frame;
mod hand_state;
mod interpreter;
mod landmark;
mod mode;
mod swipe;

pub use calibrate::Calibrator;
pub use clock::MonotonicClock;
pub use config::{InterpreterConfig, ZoomPolicy};
pub use dial::{normalize_angle, DialConfig, DialDetector, DialReading, RotationDirection};
pub use error::InputError;
pub use frame::{FrameInput, GestureLabel, LabeledGesture};
pub use hand_state::{
    GeometricFistClassifier, HandObservation, HandState, HandStateClassifier, LabelClassifier,
};
pub use interpreter::{FrameOutcome, GestureInterpreter};
pub use landmark::{centroid, Landmark, LandmarkFrame, LANDMARK_COUNT};

#[cfg(any(test, feature = "test-support"))]
pub use landmark::fixtures;
pub use mode::{ModeState, ModeTransition};
pub use swipe::{SwipeConfig, SwipeDetector, SwipeDirection};

/// Anatomical landmark indices.
pub mod landmarks {
    pub use crate::landmark::{
        CLOSURE_JOINTS, FINGERTIPS, INDEX_MCP, INDEX_TIP, MIDDLE_MCP, MIDDLE_TIP, PINKY_MCP,
        PINKY_TIP, RING_MCP, RING_TIP, THUMB_IP, THUMB_TIP, WRIST,
    };
}

/// Default minimum label confidence (exclusive) for a mode change.
pub const DEFAULT_GESTURE_CONFIDENCE: f32 = 0.65;

/// Default frame-rate floor for swipe samples (milliseconds).
pub const DEFAULT_SWIPE_MIN_INTERVAL_MS: u64 = 16;

/// Default minimum horizontal travel between swipe samples.
pub const DEFAULT_SWIPE_MIN_DISTANCE: f32 = 0.01;

/// Default horizontal-to-vertical dominance ratio.
pub const DEFAULT_SWIPE_DIRECTION_RATIO: f32 = 1.5;

/// Default minimum swipe speed (normalized units per second).
pub const DEFAULT_SWIPE_MIN_VELOCITY: f32 = 0.8;

/// Default swipe cooldown (milliseconds).
pub const DEFAULT_SWIPE_COOLDOWN_MS: u64 = 800;

/// Default minimum mean fingertip spread for a dial.
pub const DEFAULT_DIAL_MIN_SPREAD: f32 = 0.05;

/// Default maximum fingertip-centroid drift between dial frames.
pub const DEFAULT_DIAL_MAX_DRIFT: f32 = 0.03;

/// Default smoothed rotation needed for a dial tick (radians).
pub const DEFAULT_DIAL_ROTATION_THRESHOLD: f32 = 0.02;

/// Default dial smoothing window.
pub const DEFAULT_ROTATION_HISTORY_LEN: usize = 8;

/// Default horizontal thumb tolerance for the geometric fist test.
pub const DEFAULT_FIST_THUMB_TOLERANCE: f32 = 0.05;

/// Default number of curled fingers that make a fist.
pub const DEFAULT_FIST_MIN_CLOSED: usize = 4;

/// Default axial spin multiplier for a halted body.
pub const DEFAULT_HALTED_SPIN_MULTIPLIER: f32 = 1.0;

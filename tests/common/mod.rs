//! Synthetic hands for integration tests.
#![allow(dead_code)]

use orrery::orrery_input::{FrameInput, LabeledGesture, Landmark};

pub use orrery::orrery_input::fixtures::{dial, fist, open_hand};

pub fn hand(at_ms: u64, points: Vec<Landmark>) -> FrameInput {
    FrameInput::hand(at_ms, points)
}

pub fn dial_frame(at_ms: u64, theta: f32) -> FrameInput {
    FrameInput::hand(at_ms, dial(0.5, 0.5, 0.1, theta))
}

pub fn lock(at_ms: u64) -> FrameInput {
    FrameInput::empty(at_ms).with_gesture(LabeledGesture::closed_fist(0.9))
}

pub fn unlock(at_ms: u64) -> FrameInput {
    FrameInput::empty(at_ms).with_gesture(LabeledGesture::open_palm(0.9))
}

/// A fast right (dx > 0) or left swipe: two frames 100 ms apart.
pub fn swipe(start_ms: u64, right: bool) -> [FrameInput; 2] {
    let (from, to) = if right { (0.30, 0.55) } else { (0.55, 0.30) };
    [
        hand(start_ms, open_hand(from, 0.5)),
        hand(start_ms + 100, open_hand(to, 0.5)),
    ]
}

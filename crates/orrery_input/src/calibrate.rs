//! Fist-to-palm depth calibration.
//!
//! Runs on every valid frame regardless of lock mode. Opening a closed
//! fist samples the thumb tip's depth as the new baseline and asks for
//! the detail ladder to return to `Overview`.

use crate::hand_state::HandState;
use tracing::debug;

/// Tracks fist/open transitions from the geometric classifier.
#[derive(Debug, Clone, Default)]
pub struct Calibrator {
    was_fist: bool,
    depth: Option<f32>,
}

impl Calibrator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest calibration depth, if any fist has been opened yet.
    pub fn depth(&self) -> Option<f32> {
        self.depth
    }

    /// Whether the previous frame was a fist.
    pub fn was_fist(&self) -> bool {
        self.was_fist
    }

    /// Feed the geometric hand state and the thumb tip's z.
    ///
    /// Returns the new baseline on a fist-to-open transition.
    pub fn update(&mut self, state: HandState, thumb_depth: f32) -> Option<f32> {
        let is_fist = state == HandState::Fist;
        let opened = self.was_fist && !is_fist;
        self.was_fist = is_fist;

        if !opened {
            return None;
        }
        self.depth = Some(thumb_depth);
        debug!(depth = thumb_depth, "calibrated on fist release");
        Some(thumb_depth)
    }
}

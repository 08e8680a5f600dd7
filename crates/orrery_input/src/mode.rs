//! Lock and zoom flags.
//!
//! Unlocked is swipe mode, locked is rotary-dial mode. The flags only
//! move on a transition: re-asserting the current mode is a no-op.

use crate::hand_state::HandState;
use serde::{Deserialize, Serialize};

/// A lock-state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModeTransition {
    Locked,
    Unlocked,
}

impl ModeTransition {
    pub fn locked(&self) -> bool {
        matches!(self, ModeTransition::Locked)
    }
}

/// Lock and zoom flags, driven by labeled gestures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ModeState {
    locked: bool,
    zoomed_in: bool,
}

impl ModeState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn is_zoomed_in(&self) -> bool {
        self.zoomed_in
    }

    /// Apply a confidence-gated hand state. Open unlocks, fist locks.
    pub fn apply(&mut self, state: HandState) -> Option<ModeTransition> {
        let want_locked = state == HandState::Fist;
        if want_locked == self.locked {
            return None;
        }
        self.locked = want_locked;
        Some(if want_locked {
            ModeTransition::Locked
        } else {
            ModeTransition::Unlocked
        })
    }

    /// Set the zoom flag; returns whether it changed.
    pub fn set_zoomed_in(&mut self, zoomed_in: bool) -> bool {
        let changed = self.zoomed_in != zoomed_in;
        self.zoomed_in = zoomed_in;
        changed
    }
}

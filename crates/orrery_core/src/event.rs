//! Output events consumed by the presentation layer.

use crate::detail::DetailLevel;
use crate::effect::EffectSet;
use serde::{Deserialize, Serialize};

/// Something the presentation layer must react to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum NavEvent {
    /// A different body is now focused.
    FocusChanged { index: usize },

    /// The detail level of the focused body changed.
    DetailLevelChanged { level: DetailLevel },

    /// Swipe mode (`false`) or rotary-dial mode (`true`) was entered.
    ModeChanged { locked: bool },

    /// The camera zoomed onto (or away from) the focused body.
    ///
    /// `track_orbit` asks the camera to keep following the body after
    /// zooming out while it revolves again.
    ZoomChanged {
        zoomed_in: bool,
        focus_index: usize,
        track_orbit: bool,
    },

    /// A fist-to-palm transition sampled a new thumb depth.
    Calibrated { depth: f32 },

    /// A body's orbital advance was frozen or released.
    OrbitHaltChanged { body: usize, halted: bool },
}

impl NavEvent {
    /// Effect flag this event maps to.
    pub fn effect(&self) -> EffectSet {
        match self {
            NavEvent::FocusChanged { .. } => EffectSet::CAMERA_RETARGET | EffectSet::TEXT_REFRESH,
            NavEvent::DetailLevelChanged { .. } => EffectSet::TEXT_REFRESH,
            NavEvent::ModeChanged { .. } => EffectSet::MODE_CHANGED,
            NavEvent::ZoomChanged { .. } => EffectSet::ZOOM_CHANGED | EffectSet::CAMERA_RETARGET,
            NavEvent::Calibrated { .. } => EffectSet::CALIBRATED,
            NavEvent::OrbitHaltChanged { .. } => EffectSet::ORBIT_CHANGED,
        }
    }

    pub fn is_focus_change(&self) -> bool {
        matches!(self, NavEvent::FocusChanged { .. })
    }

    pub fn is_detail_change(&self) -> bool {
        matches!(self, NavEvent::DetailLevelChanged { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn focus_change_retargets_camera() {
        let effect = NavEvent::FocusChanged { index: 2 }.effect();
        assert!(effect.contains(EffectSet::CAMERA_RETARGET));
        assert!(effect.contains(EffectSet::TEXT_REFRESH));
    }

    #[test]
    fn predicates_match_variants() {
        assert!(NavEvent::FocusChanged { index: 0 }.is_focus_change());
        assert!(NavEvent::DetailLevelChanged {
            level: DetailLevel::Deep
        }
        .is_detail_change());
        assert!(!NavEvent::Calibrated { depth: -0.1 }.is_detail_change());
    }
}

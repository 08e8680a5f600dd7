//! Effect flags - a per-frame summary of what the presentation layer must redo.
//!
//! Events say exactly what changed; an EffectSet says which subsystems
//! need to wake up. A renderer that only cares about "should the camera
//! move this frame" checks one bit instead of scanning events.

use crate::event::NavEvent;
use bitflags::bitflags;

bitflags! {
    /// Set of effects produced while processing one frame.
    ///
    /// Effects are additive - a single frame can produce several.
    ///
    /// # Example
    ///
    /// ```
    /// use orrery_core::EffectSet;
    ///
    /// let effects = EffectSet::CAMERA_RETARGET | EffectSet::TEXT_REFRESH;
    ///
    /// if effects.contains(EffectSet::CAMERA_RETARGET) {
    ///     // Start camera tween towards the focused body
    /// }
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct EffectSet: u16 {
        /// No effects.
        const NONE = 0;

        /// Camera target moved to a different body or zoom distance.
        const CAMERA_RETARGET = 1 << 0;

        /// Body description text must be re-rendered.
        const TEXT_REFRESH = 1 << 1;

        /// Lock indicator should be updated.
        const MODE_CHANGED = 1 << 2;

        /// Camera zoomed in or out.
        const ZOOM_CHANGED = 1 << 3;

        /// A body's orbit was frozen or released.
        const ORBIT_CHANGED = 1 << 4;

        /// A new depth baseline was sampled.
        const CALIBRATED = 1 << 5;
    }
}

impl Default for EffectSet {
    fn default() -> Self {
        EffectSet::NONE
    }
}

impl EffectSet {
    /// Union of the effects of every event.
    pub fn from_events(events: &[NavEvent]) -> Self {
        events
            .iter()
            .fold(EffectSet::NONE, |acc, event| acc | event.effect())
    }

    /// Check if the camera has to move.
    pub fn has_camera_effects(&self) -> bool {
        self.intersects(EffectSet::CAMERA_RETARGET | EffectSet::ZOOM_CHANGED)
    }

    /// Check if any on-screen text is stale.
    pub fn has_text_effects(&self) -> bool {
        self.intersects(EffectSet::TEXT_REFRESH | EffectSet::MODE_CHANGED)
    }
}

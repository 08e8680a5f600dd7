//! The gesture interpreter: one owned context that turns frames into
//! navigation events.
//!
//! Per frame, in order:
//!
//! 1. The labeled gesture (if confident) may lock or unlock. Every
//!    transition clears both detectors' working memory and applies the
//!    zoom policy.
//! 2. Frames without a complete, finite hand stop here.
//! 3. The calibrator watches for a fist opening, in either mode.
//! 4. Unlocked frames feed the swipe detector, locked frames the dial.
//! 5. Committed gestures become [`NavCommand`]s for the [`Navigator`].
//!
//! Navigator faults are absorbed here. Ladder clamps and cooldowns are
//! expected outcomes of gesture input; anything else is logged as a warning.

use crate::calibrate::Calibrator;
use crate::config::InterpreterConfig;
use crate::dial::{DialDetector, RotationDirection};
use crate::error::InputError;
use crate::frame::FrameInput;
use crate::hand_state::{
    GeometricFistClassifier, HandObservation, HandStateClassifier, LabelClassifier,
};
use crate::landmark::LandmarkFrame;
use crate::mode::{ModeState, ModeTransition};
use crate::swipe::{SwipeDetector, SwipeDirection};
use orrery_core::replay::CommandLog;
use orrery_core::{BodyCatalog, DetailLevel, EffectSet, Fault, NavCommand, NavEvent, Navigator};
use tracing::{debug, trace, warn};

/// Everything one frame produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameOutcome {
    pub events: Vec<NavEvent>,
    pub effects: EffectSet,
}

impl FrameOutcome {
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    fn push(&mut self, event: NavEvent) {
        self.effects |= event.effect();
        self.events.push(event);
    }

    fn extend(&mut self, events: Vec<NavEvent>) {
        self.effects |= EffectSet::from_events(&events);
        self.events.extend(events);
    }

    /// Fold another outcome into this one.
    pub fn merge(&mut self, other: FrameOutcome) {
        self.events.extend(other.events);
        self.effects |= other.effects;
    }
}

/// Gesture interpretation context. Single writer: feed it frames in
/// timestamp order from one thread.
#[derive(Debug, Clone)]
pub struct GestureInterpreter {
    config: InterpreterConfig,
    mode: ModeState,
    labels: LabelClassifier,
    geometry: GeometricFistClassifier,
    calibrator: Calibrator,
    swipe: SwipeDetector,
    dial: DialDetector,
    navigator: Navigator,
    log: CommandLog,
    frames_seen: u64,
}

impl GestureInterpreter {
    /// Interpreter over the Solar System catalog.
    pub fn new(config: InterpreterConfig) -> Result<Self, InputError> {
        Self::with_catalog(config, BodyCatalog::solar_system())
    }

    pub fn with_catalog(config: InterpreterConfig, catalog: BodyCatalog) -> Result<Self, InputError> {
        config.validate()?;
        let navigator = Navigator::new(catalog, config.detail_cooldown_ms)?
            .with_halted_spin_multiplier(config.halted_spin_multiplier);

        Ok(Self {
            mode: ModeState::new(),
            labels: config.label_classifier(),
            geometry: config.fist_classifier(),
            calibrator: Calibrator::new(),
            swipe: SwipeDetector::new(config.swipe_config()),
            dial: DialDetector::new(config.dial_config()),
            navigator,
            log: CommandLog::new(),
            frames_seen: 0,
            config,
        })
    }

    pub fn config(&self) -> &InterpreterConfig {
        &self.config
    }

    pub fn mode(&self) -> ModeState {
        self.mode
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    /// Commands that reached the navigator and changed something.
    pub fn command_log(&self) -> &CommandLog {
        &self.log
    }

    pub fn calibration_depth(&self) -> Option<f32> {
        self.calibrator.depth()
    }

    pub fn swipe_detector(&self) -> &SwipeDetector {
        &self.swipe
    }

    pub fn dial_detector(&self) -> &DialDetector {
        &self.dial
    }

    pub fn frames_seen(&self) -> u64 {
        self.frames_seen
    }

    /// Process one frame.
    pub fn on_frame(&mut self, frame: &FrameInput) -> FrameOutcome {
        let now = frame.timestamp_ms;
        let mut out = FrameOutcome::default();
        self.frames_seen += 1;

        let hand = frame
            .landmarks
            .as_deref()
            .and_then(LandmarkFrame::from_points);
        let observation = HandObservation {
            landmarks: hand.as_ref(),
            gesture: frame.gesture.as_ref(),
        };

        if let Some(state) = self.labels.classify(&observation) {
            if let Some(transition) = self.mode.apply(state) {
                self.on_transition(transition, now, &mut out);
            }
        }

        let Some(hand) = hand.as_ref() else {
            if frame.has_hand() {
                trace!(at_ms = now, "incomplete or non-finite hand, detectors skipped");
            }
            return out;
        };

        if let Some(state) = self.geometry.classify(&observation) {
            if let Some(depth) = self.calibrator.update(state, hand.thumb_tip().z) {
                out.push(NavEvent::Calibrated { depth });
                self.dispatch(NavCommand::SetDetail(DetailLevel::Overview), now, &mut out);
            }
        }

        let command = if self.mode.is_locked() {
            self.dial
                .update(hand.fingertips())
                .direction()
                .map(|direction| match direction {
                    RotationDirection::Clockwise => NavCommand::RaiseDetail,
                    RotationDirection::CounterClockwise => NavCommand::LowerDetail,
                })
        } else {
            self.swipe
                .update(hand.palm_center(), now)
                .map(|direction| match direction {
                    SwipeDirection::Right => NavCommand::AdvanceFocus,
                    SwipeDirection::Left => NavCommand::RetreatFocus,
                })
        };
        if let Some(command) = command {
            self.dispatch(command, now, &mut out);
        }

        out
    }

    /// Drain a frame source, returning everything it produced.
    pub fn run<I>(&mut self, frames: I) -> FrameOutcome
    where
        I: IntoIterator<Item = FrameInput>,
    {
        let mut total = FrameOutcome::default();
        for frame in frames {
            total.merge(self.on_frame(&frame));
        }
        total
    }

    fn on_transition(&mut self, transition: ModeTransition, now: u64, out: &mut FrameOutcome) {
        self.swipe.clear();
        self.dial.clear();

        let locked = transition.locked();
        debug!(locked, at_ms = now, "mode changed");
        out.push(NavEvent::ModeChanged { locked });

        let policy = self.config.zoom_policy;
        if !policy.zooms() || locked == self.mode.is_zoomed_in() {
            return;
        }

        let focus_index = self.navigator.focus();
        self.mode.set_zoomed_in(locked);
        debug!(zoomed_in = locked, focus_index, "zoom changed");
        out.push(NavEvent::ZoomChanged {
            zoomed_in: locked,
            focus_index,
            track_orbit: !locked && policy.tracks_orbit(),
        });

        let command = if locked {
            NavCommand::HaltOrbit(focus_index)
        } else {
            NavCommand::ResumeOrbit(focus_index)
        };
        self.dispatch(command, now, out);
    }

    /// Run a command, returning the fault it was absorbed with, if any.
    fn dispatch(&mut self, command: NavCommand, now: u64, out: &mut FrameOutcome) -> Option<Fault> {
        match self.navigator.execute(command, now) {
            Ok(events) => {
                if !events.is_empty() {
                    self.log.record(now, command);
                }
                out.extend(events);
                None
            }
            Err(fault) => {
                if fault.is_bug() {
                    warn!(command = command.name(), %fault, "navigator rejected command");
                } else {
                    trace!(
                        command = command.name(),
                        %fault,
                        expected = fault.is_expected(),
                        "command absorbed"
                    );
                }
                Some(fault)
            }
        }
    }
}

impl Default for GestureInterpreter {
    fn default() -> Self {
        Self {
            config: InterpreterConfig::default(),
            mode: ModeState::new(),
            labels: LabelClassifier::default(),
            geometry: GeometricFistClassifier::default(),
            calibrator: Calibrator::new(),
            swipe: SwipeDetector::default(),
            dial: DialDetector::default(),
            navigator: Navigator::default(),
            log: CommandLog::new(),
            frames_seen: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ZoomPolicy;
    use crate::frame::LabeledGesture;
    use crate::landmark::fixtures;

    fn lock(at_ms: u64) -> FrameInput {
        FrameInput::empty(at_ms).with_gesture(LabeledGesture::closed_fist(0.9))
    }

    fn unlock(at_ms: u64) -> FrameInput {
        FrameInput::empty(at_ms).with_gesture(LabeledGesture::open_palm(0.9))
    }

    fn dial(at_ms: u64, theta: f32) -> FrameInput {
        FrameInput::hand(at_ms, fixtures::dial(0.5, 0.5, 0.1, theta))
    }

    #[test]
    fn empty_frames_are_quiet() {
        let mut interp = GestureInterpreter::default();
        for t in 0..10 {
            assert!(interp.on_frame(&FrameInput::empty(t * 33)).is_empty());
        }
        assert_eq!(interp.frames_seen(), 10);
        assert_eq!(interp.navigator().focus(), 0);
    }

    #[test]
    fn swipe_right_advances_focus() {
        let mut interp = GestureInterpreter::default();
        interp.on_frame(&FrameInput::hand(0, fixtures::open_hand(0.30, 0.5)));
        let out = interp.on_frame(&FrameInput::hand(100, fixtures::open_hand(0.55, 0.5)));

        assert_eq!(out.events, vec![NavEvent::FocusChanged { index: 1 }]);
        assert!(out.effects.contains(EffectSet::CAMERA_RETARGET));
        assert_eq!(interp.command_log().names(), vec!["advance-focus"]);
    }

    #[test]
    fn low_confidence_label_is_ignored() {
        let mut interp = GestureInterpreter::default();
        let frame = FrameInput::empty(0).with_gesture(LabeledGesture::closed_fist(0.5));
        assert!(interp.on_frame(&frame).is_empty());
        assert!(!interp.mode().is_locked());
    }

    #[test]
    fn dial_raises_detail_while_locked() {
        let mut interp = GestureInterpreter::default();
        let out = interp.on_frame(&lock(0));
        assert_eq!(out.events, vec![NavEvent::ModeChanged { locked: true }]);

        interp.on_frame(&dial(33, 0.0));
        let out = interp.on_frame(&dial(66, 0.1));
        assert_eq!(
            out.events,
            vec![NavEvent::DetailLevelChanged {
                level: DetailLevel::Detailed
            }]
        );
    }

    #[test]
    fn swipes_ignored_while_locked() {
        let mut interp = GestureInterpreter::default();
        interp.on_frame(&lock(0));
        interp.on_frame(&FrameInput::hand(33, fixtures::open_hand(0.30, 0.5)));
        let out = interp.on_frame(&FrameInput::hand(133, fixtures::open_hand(0.55, 0.5)));

        assert!(out.events.iter().all(|e| !e.is_focus_change()));
        assert_eq!(interp.navigator().focus(), 0);
        assert!(!interp.swipe_detector().has_memory());
    }

    #[test]
    fn transition_clears_swipe_memory() {
        let mut interp = GestureInterpreter::default();
        interp.on_frame(&FrameInput::hand(0, fixtures::open_hand(0.3, 0.5)));
        assert!(interp.swipe_detector().has_memory());

        interp.on_frame(&lock(33));
        assert!(!interp.swipe_detector().has_memory());
    }

    #[test]
    fn transition_clears_dial_memory() {
        let mut interp = GestureInterpreter::default();
        interp.on_frame(&lock(0));
        interp.on_frame(&dial(33, 0.0));
        assert!(interp.dial_detector().has_memory());

        interp.on_frame(&unlock(66));
        assert!(!interp.dial_detector().has_memory());
    }

    #[test]
    fn fist_release_calibrates() {
        let mut interp = GestureInterpreter::default();
        assert!(interp
            .on_frame(&FrameInput::hand(0, fixtures::fist(0.5, 0.5)))
            .is_empty());
        let out = interp.on_frame(&FrameInput::hand(50, fixtures::open_hand(0.5, 0.5)));

        // Already at Overview: the reset changes nothing
        assert_eq!(out.events, vec![NavEvent::Calibrated { depth: -0.04 }]);
        assert!(out.effects.contains(EffectSet::CALIBRATED));
        assert_eq!(interp.calibration_depth(), Some(-0.04));
    }

    #[test]
    fn calibration_resets_detail() {
        let mut interp = GestureInterpreter::default();
        interp.on_frame(&lock(0));
        interp.on_frame(&dial(33, 0.0));
        interp.on_frame(&dial(66, 0.1));
        assert_eq!(interp.navigator().detail(), DetailLevel::Detailed);

        interp.on_frame(&FrameInput::hand(100, fixtures::fist(0.5, 0.5)));
        let out = interp.on_frame(&FrameInput::hand(133, fixtures::open_hand(0.5, 0.5)));

        assert_eq!(
            out.events,
            vec![
                NavEvent::Calibrated { depth: -0.04 },
                NavEvent::DetailLevelChanged {
                    level: DetailLevel::Overview
                },
            ]
        );
        assert!(interp.mode().is_locked());
    }

    #[test]
    fn clamp_faults_are_absorbed() {
        let mut interp = GestureInterpreter::default();
        interp.on_frame(&lock(0));
        interp.on_frame(&dial(33, 0.0));
        let out = interp.on_frame(&dial(66, -0.1));

        assert!(out.is_empty());
        assert_eq!(interp.navigator().detail(), DetailLevel::Overview);
        assert!(interp.command_log().is_empty());
    }

    #[test]
    fn orbit_follow_zooms_on_lock() {
        let mut interp = GestureInterpreter::new(InterpreterConfig::orbit_follow()).unwrap();
        let out = interp.on_frame(&lock(0));
        assert_eq!(
            out.events,
            vec![
                NavEvent::ModeChanged { locked: true },
                NavEvent::ZoomChanged {
                    zoomed_in: true,
                    focus_index: 0,
                    track_orbit: false
                },
                NavEvent::OrbitHaltChanged {
                    body: 0,
                    halted: true
                },
            ]
        );
        assert!(interp.mode().is_zoomed_in());
        assert!(interp.navigator().is_halted(0));

        let out = interp.on_frame(&unlock(33));
        assert_eq!(
            out.events,
            vec![
                NavEvent::ModeChanged { locked: false },
                NavEvent::ZoomChanged {
                    zoomed_in: false,
                    focus_index: 0,
                    track_orbit: true
                },
                NavEvent::OrbitHaltChanged {
                    body: 0,
                    halted: false
                },
            ]
        );
        assert!(!interp.navigator().is_halted(0));
    }

    #[test]
    fn plain_zoom_does_not_track() {
        let config = InterpreterConfig {
            zoom_policy: ZoomPolicy::Plain,
            ..InterpreterConfig::default()
        };
        let mut interp = GestureInterpreter::new(config).unwrap();
        interp.on_frame(&lock(0));
        let out = interp.on_frame(&unlock(33));
        assert!(out.events.contains(&NavEvent::ZoomChanged {
            zoomed_in: false,
            focus_index: 0,
            track_orbit: false
        }));
    }

    #[test]
    fn classic_never_zooms() {
        let mut interp = GestureInterpreter::default();
        let out = interp.on_frame(&lock(0));
        assert!(!out.effects.contains(EffectSet::ZOOM_CHANGED));
        assert!(!interp.mode().is_zoomed_in());
    }

    #[test]
    fn empty_catalog_rejected() {
        let err = GestureInterpreter::with_catalog(
            InterpreterConfig::default(),
            BodyCatalog::new(Vec::new()),
        )
        .unwrap_err();
        assert_eq!(err, InputError::Navigation(orrery_core::Fault::EmptyCatalog));
    }

    #[test]
    fn invalid_config_rejected() {
        let config = InterpreterConfig {
            rotation_history_len: 0,
            ..InterpreterConfig::default()
        };
        assert!(GestureInterpreter::new(config).is_err());
    }

    #[test]
    fn command_log_replays_to_same_focus() {
        let mut interp = GestureInterpreter::default();
        let frames = vec![
            FrameInput::hand(0, fixtures::open_hand(0.30, 0.5)),
            FrameInput::hand(100, fixtures::open_hand(0.55, 0.5)),
            FrameInput::hand(1_000, fixtures::open_hand(0.30, 0.5)),
            FrameInput::hand(1_100, fixtures::open_hand(0.55, 0.5)),
        ];
        let total = interp.run(frames);
        assert_eq!(total.events.len(), 2);
        assert_eq!(interp.navigator().focus(), 2);

        let replayed = interp
            .command_log()
            .replay(BodyCatalog::solar_system(), interp.config().detail_cooldown_ms)
            .unwrap();
        assert_eq!(replayed.focus(), interp.navigator().focus());
    }

    #[test]
    fn out_of_range_body_is_a_bug_fault() {
        let mut interp = GestureInterpreter::default();
        let mut out = FrameOutcome::default();

        let fault = interp
            .dispatch(NavCommand::HaltOrbit(42), 0, &mut out)
            .expect("body 42 is not in the catalog");

        assert!(fault.is_bug());
        assert!(out.is_empty());
        assert!(interp.command_log().events.is_empty());
    }

    #[test]
    fn clamp_fault_is_expected() {
        let mut interp = GestureInterpreter::default();
        let mut out = FrameOutcome::default();

        let fault = interp
            .dispatch(NavCommand::LowerDetail, 0, &mut out)
            .expect("overview cannot go lower");

        assert!(fault.is_expected());
        assert!(!fault.is_bug());
        assert!(out.is_empty());
    }

    #[test]
    fn extend_unions_event_effects() {
        let mut out = FrameOutcome::default();
        out.extend(vec![
            NavEvent::FocusChanged { index: 1 },
            NavEvent::Calibrated { depth: -0.04 },
        ]);
        assert_eq!(out.events.len(), 2);
        assert_eq!(out.effects, EffectSet::from_events(&out.events));
        assert!(out.effects.contains(EffectSet::CALIBRATED));
    }
}

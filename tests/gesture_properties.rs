//! End-to-end behaviour of the gesture interpreter.

mod common;

use common::*;
use orrery::orrery_core::{DetailLevel, NavEvent};
use orrery::orrery_input::{
    DialReading, FrameInput, GestureInterpreter, InterpreterConfig, LabeledGesture,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn interpreter() -> GestureInterpreter {
    GestureInterpreter::new(InterpreterConfig::classic()).unwrap()
}

fn feed(interp: &mut GestureInterpreter, frames: impl IntoIterator<Item = FrameInput>) -> Vec<NavEvent> {
    interp.run(frames).events
}

// ---------------------------------------------------------------------------
// Idempotence under no motion
// ---------------------------------------------------------------------------

#[test]
fn still_open_hand_produces_nothing() {
    let mut interp = interpreter();
    let frames = (0..30).map(|i| hand(i * 33, open_hand(0.5, 0.5)));
    assert!(feed(&mut interp, frames).is_empty());
    assert_eq!(interp.navigator().focus(), 0);
}

#[test]
fn still_dial_produces_nothing_after_lock() {
    let mut interp = interpreter();
    let events = feed(&mut interp, [lock(0)]);
    assert_eq!(events, vec![NavEvent::ModeChanged { locked: true }]);

    let frames = (1..30).map(|i| {
        dial_frame(i * 33, 0.4).with_gesture(LabeledGesture::closed_fist(0.9))
    });
    assert!(feed(&mut interp, frames).is_empty());
    assert_eq!(interp.navigator().detail(), DetailLevel::Overview);
}

// ---------------------------------------------------------------------------
// Mode exclusivity
// ---------------------------------------------------------------------------

#[test]
fn rotation_while_unlocked_changes_nothing() {
    let mut interp = interpreter();
    let frames = (0..20).map(|i| dial_frame(i * 100, i as f32 * 0.1));
    let events = feed(&mut interp, frames);
    assert!(events.is_empty(), "unexpected events: {events:?}");
    assert!(!interp.dial_detector().has_memory());
}

#[test]
fn swipe_while_locked_changes_nothing() {
    let mut interp = interpreter();
    feed(&mut interp, [lock(0)]);
    let [a, b] = swipe(100, true);
    let events = feed(&mut interp, [a, b]);
    assert!(events.iter().all(|e| !e.is_focus_change()));
    assert!(!interp.swipe_detector().has_memory());
}

#[derive(Debug, Clone)]
enum Step {
    Open(f32),
    Fist(f32),
    Dial(f32, f32),
    Lock,
    Unlock,
    Nothing,
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        (0.2f32..0.8).prop_map(Step::Open),
        (0.2f32..0.8).prop_map(Step::Fist),
        ((0.2f32..0.8), (-3.0f32..3.0)).prop_map(|(x, t)| Step::Dial(x, t)),
        Just(Step::Lock),
        Just(Step::Unlock),
        Just(Step::Nothing),
    ]
}

proptest! {
    #[test]
    fn swipe_and_dial_never_overlap(steps in prop::collection::vec((step(), 16u64..400), 1..60)) {
        let mut interp = interpreter();
        let mut now = 0;
        for (step, dt) in steps {
            now += dt;
            let frame = match step {
                Step::Open(x) => hand(now, open_hand(x, 0.5)),
                Step::Fist(x) => hand(now, fist(x, 0.5)),
                Step::Dial(x, theta) => hand(now, dial(x, 0.5, 0.1, theta)),
                Step::Lock => lock(now),
                Step::Unlock => unlock(now),
                Step::Nothing => FrameInput::empty(now),
            };
            let out = interp.on_frame(&frame);

            prop_assert!(!(interp.swipe_detector().has_memory() && interp.dial_detector().has_memory()));
            if interp.mode().is_locked() {
                prop_assert!(out.events.iter().all(|e| !e.is_focus_change()));
            } else {
                // Only calibration touches detail while unlocked, and only to reset it
                for event in &out.events {
                    if let NavEvent::DetailLevelChanged { level } = event {
                        prop_assert_eq!(*level, DetailLevel::Overview);
                    }
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Swipe direction correctness
// ---------------------------------------------------------------------------

#[test]
fn right_swipe_advances_left_swipe_retreats() {
    let mut interp = interpreter();
    let events = feed(&mut interp, swipe(0, true));
    assert_eq!(events, vec![NavEvent::FocusChanged { index: 1 }]);

    let events = feed(&mut interp, swipe(1_000, false));
    assert_eq!(events, vec![NavEvent::FocusChanged { index: 0 }]);
}

#[test]
fn left_swipe_from_first_body_wraps() {
    let mut interp = interpreter();
    let last = interp.navigator().catalog().len() - 1;
    let events = feed(&mut interp, swipe(0, false));
    assert_eq!(events, vec![NavEvent::FocusChanged { index: last }]);
}

#[test]
fn right_swipe_from_last_body_wraps() {
    let mut interp = interpreter();
    let n = interp.navigator().catalog().len();
    let mut t = 0;
    for _ in 0..n {
        feed(&mut interp, swipe(t, true));
        t += 1_000;
    }
    assert_eq!(interp.navigator().focus(), 0);
}

#[test]
fn vertical_motion_is_not_a_swipe() {
    let mut interp = interpreter();
    let events = feed(
        &mut interp,
        [hand(0, open_hand(0.5, 0.3)), hand(100, open_hand(0.55, 0.6))],
    );
    assert!(events.is_empty());
}

// ---------------------------------------------------------------------------
// Swipe cooldown
// ---------------------------------------------------------------------------

#[test]
fn second_swipe_inside_cooldown_is_dropped() {
    let mut interp = interpreter();
    let mut frames = swipe(0, true).to_vec();
    frames.extend(swipe(300, true));
    let events = feed(&mut interp, frames);
    assert_eq!(events, vec![NavEvent::FocusChanged { index: 1 }]);
}

#[test]
fn swipe_after_cooldown_commits() {
    let mut interp = interpreter();
    let mut frames = swipe(0, true).to_vec();
    // Commit at 100; next commit at 1_100 is 1s later
    frames.extend(swipe(1_000, true));
    let events = feed(&mut interp, frames);
    assert_eq!(
        events,
        vec![
            NavEvent::FocusChanged { index: 1 },
            NavEvent::FocusChanged { index: 2 },
        ]
    );
}

#[test]
fn orbit_follow_cooldown_is_shorter() {
    let mut interp = GestureInterpreter::new(InterpreterConfig::orbit_follow()).unwrap();
    let mut frames = swipe(0, true).to_vec();
    // Commit at 100, then at 700: inside 800 but past 500
    frames.push(hand(600, open_hand(0.30, 0.5)));
    frames.push(hand(700, open_hand(0.55, 0.5)));
    let events = feed(&mut interp, frames);
    assert_eq!(events.iter().filter(|e| e.is_focus_change()).count(), 2);
}

// ---------------------------------------------------------------------------
// Detail ladder clamping and cooldown
// ---------------------------------------------------------------------------

#[test]
fn detail_clamps_at_deep() {
    let mut interp = interpreter();
    feed(&mut interp, [lock(0), dial_frame(10, 0.0)]);

    let mut theta = 0.0;
    let mut changes = Vec::new();
    for i in 1..=5 {
        theta += 0.1;
        changes.extend(feed(&mut interp, [dial_frame(10 + i * 1_100, theta)]));
    }
    assert_eq!(
        changes,
        vec![
            NavEvent::DetailLevelChanged { level: DetailLevel::Detailed },
            NavEvent::DetailLevelChanged { level: DetailLevel::Deep },
        ]
    );
    assert_eq!(interp.navigator().detail(), DetailLevel::Deep);
}

#[test]
fn detail_clamps_at_overview() {
    let mut interp = interpreter();
    feed(&mut interp, [lock(0), dial_frame(10, 0.0)]);
    let events = feed(
        &mut interp,
        [dial_frame(1_200, -0.1), dial_frame(2_400, -0.2)],
    );
    assert!(events.is_empty());
    assert_eq!(interp.navigator().detail(), DetailLevel::Overview);
}

#[test]
fn detail_changes_respect_cooldown() {
    let mut interp = interpreter();
    feed(&mut interp, [lock(0), dial_frame(100, 0.0)]);

    let events = feed(
        &mut interp,
        [dial_frame(200, 0.1), dial_frame(300, 0.2), dial_frame(900, 0.3)],
    );
    assert_eq!(
        events,
        vec![NavEvent::DetailLevelChanged { level: DetailLevel::Detailed }]
    );

    // 1_250 - 200 > 1_000
    let events = feed(&mut interp, [dial_frame(1_250, 0.4)]);
    assert_eq!(
        events,
        vec![NavEvent::DetailLevelChanged { level: DetailLevel::Deep }]
    );
}

// ---------------------------------------------------------------------------
// Calibration trigger
// ---------------------------------------------------------------------------

#[test]
fn fist_then_open_calibrates_and_resets_detail() {
    let mut interp = interpreter();
    feed(
        &mut interp,
        [lock(0), dial_frame(100, 0.0), dial_frame(200, 0.1)],
    );
    assert_eq!(interp.navigator().detail(), DetailLevel::Detailed);

    let events = feed(
        &mut interp,
        [hand(300, fist(0.5, 0.5)), hand(400, open_hand(0.5, 0.5))],
    );
    assert_eq!(
        events,
        vec![
            NavEvent::Calibrated { depth: -0.04 },
            NavEvent::DetailLevelChanged { level: DetailLevel::Overview },
        ]
    );
    assert_eq!(interp.calibration_depth(), Some(-0.04));
}

#[test]
fn calibration_needs_a_transition() {
    let mut interp = interpreter();
    let frames = [
        hand(0, open_hand(0.5, 0.5)),
        hand(100, open_hand(0.5, 0.5)),
        hand(200, fist(0.5, 0.5)),
        hand(300, fist(0.5, 0.5)),
    ];
    assert!(feed(&mut interp, frames).is_empty());
    assert_eq!(interp.calibration_depth(), None);
}

#[test]
fn calibration_ignores_lock_state() {
    let mut interp = interpreter();
    let events = feed(
        &mut interp,
        [hand(0, fist(0.5, 0.5)), hand(100, open_hand(0.5, 0.5))],
    );
    assert_eq!(events, vec![NavEvent::Calibrated { depth: -0.04 }]);
    assert!(!interp.mode().is_locked());
}

// ---------------------------------------------------------------------------
// Dial drift and formation gates
// ---------------------------------------------------------------------------

#[test]
fn translation_resets_dial_instead_of_rotating() {
    let mut interp = interpreter();
    feed(
        &mut interp,
        [lock(0), dial_frame(100, 0.0), hand(200, dial(0.5, 0.5, 0.1, 0.01))],
    );
    assert_eq!(interp.dial_detector().history_len(), 1);

    // Whole hand slides 0.1 and turns: read as translation
    let events = feed(&mut interp, [hand(300, dial(0.6, 0.5, 0.1, 0.3))]);
    assert!(events.is_empty());
    assert!(!interp.dial_detector().has_memory());

    // Next frame only primes
    let events = feed(&mut interp, [hand(400, dial(0.6, 0.5, 0.1, 0.6))]);
    assert!(events.is_empty());
    assert_eq!(interp.dial_detector().history_len(), 0);
}

#[test]
fn unformed_dial_keeps_history() {
    let mut interp = interpreter();
    feed(
        &mut interp,
        [lock(0), dial_frame(100, 0.0), hand(200, dial(0.5, 0.5, 0.1, 0.01))],
    );
    assert_eq!(interp.dial_detector().history_len(), 1);

    // Fingers pinch together: rejected, history survives
    feed(&mut interp, [hand(300, dial(0.5, 0.5, 0.01, 0.01))]);
    assert_eq!(interp.dial_detector().history_len(), 1);
    assert!(interp.dial_detector().has_memory());
}

#[test]
fn dial_detector_reports_each_gate() {
    use orrery::orrery_input::{DialDetector, Landmark};

    fn tips(points: Vec<Landmark>) -> [Landmark; 5] {
        let frame = orrery::orrery_input::LandmarkFrame::from_points(&points).unwrap();
        frame.fingertips()
    }

    let mut det = DialDetector::default();
    assert_eq!(det.update(tips(dial(0.5, 0.5, 0.01, 0.0))), DialReading::NotFormed);
    assert_eq!(det.update(tips(dial(0.5, 0.5, 0.1, 0.0))), DialReading::Primed);
    assert_eq!(det.update(tips(dial(0.7, 0.5, 0.1, 0.0))), DialReading::Drifted);
}

// ---------------------------------------------------------------------------
// Missing and malformed frames
// ---------------------------------------------------------------------------

#[test]
fn partial_and_non_finite_frames_preserve_state() {
    let mut interp = interpreter();
    feed(&mut interp, [hand(0, open_hand(0.30, 0.5))]);
    assert!(interp.swipe_detector().has_memory());

    let mut partial = open_hand(0.55, 0.5);
    partial.truncate(20);
    let mut poisoned = open_hand(0.55, 0.5);
    poisoned[0].x = f32::NAN;

    let events = feed(
        &mut interp,
        [hand(50, partial), hand(80, poisoned), FrameInput::empty(90)],
    );
    assert!(events.is_empty());
    assert!(interp.swipe_detector().has_memory());

    // The stored sample from t=0 is still the reference
    let events = feed(&mut interp, [hand(100, open_hand(0.55, 0.5))]);
    assert_eq!(events, vec![NavEvent::FocusChanged { index: 1 }]);
}

#[test]
fn labels_apply_without_landmarks() {
    let mut interp = interpreter();
    let events = feed(&mut interp, [lock(0)]);
    assert_eq!(events, vec![NavEvent::ModeChanged { locked: true }]);
}

#[test]
fn confidence_must_exceed_threshold() {
    let mut interp = interpreter();
    let at_threshold = FrameInput::empty(0).with_gesture(LabeledGesture::closed_fist(0.65));
    assert!(feed(&mut interp, [at_threshold]).is_empty());
    assert!(!interp.mode().is_locked());
}

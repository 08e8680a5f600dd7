//! Presentation sinks: where navigation events go once interpreted.
//!
//! A renderer implements [`PresentationSink`] to tween its camera and
//! refresh body text. The crate ships a logging sink and a collecting
//! sink for tests and offline replay.

use orrery_core::{BodyCatalog, EffectSet, NavEvent};
use orrery_input::FrameOutcome;
use tracing::{debug, info};

/// Receives every event the interpreter emits, in order.
pub trait PresentationSink {
    fn present(&mut self, event: &NavEvent);

    /// Called once per frame that produced events, with their union.
    fn frame_done(&mut self, _effects: EffectSet) {}
}

/// Hand one frame's outcome to a sink.
pub fn deliver<S: PresentationSink + ?Sized>(sink: &mut S, outcome: &FrameOutcome) {
    if outcome.is_empty() {
        return;
    }
    for event in &outcome.events {
        sink.present(event);
    }
    sink.frame_done(outcome.effects);
}

/// Logs each event at `info`, naming bodies from the catalog.
#[derive(Debug, Clone)]
pub struct TracingSink {
    catalog: BodyCatalog,
    focus: usize,
}

impl TracingSink {
    pub fn new(catalog: BodyCatalog) -> Self {
        Self { catalog, focus: 0 }
    }

    fn body_name(&self, index: usize) -> &str {
        self.catalog.get(index).map_or("?", |b| b.name.as_str())
    }
}

impl PresentationSink for TracingSink {
    fn present(&mut self, event: &NavEvent) {
        match event {
            NavEvent::FocusChanged { index } => {
                self.focus = *index;
                info!(body = self.body_name(*index), index, "focus");
            }
            NavEvent::DetailLevelChanged { level } => {
                let text = self
                    .catalog
                    .get(self.focus)
                    .map_or("", |b| b.describe(*level));
                info!(%level, body = self.body_name(self.focus), text, "detail");
            }
            NavEvent::ModeChanged { locked } => info!(locked, "mode"),
            NavEvent::ZoomChanged {
                zoomed_in,
                focus_index,
                track_orbit,
            } => info!(
                zoomed_in,
                body = self.body_name(*focus_index),
                track_orbit,
                "zoom"
            ),
            NavEvent::Calibrated { depth } => info!(depth, "calibrated"),
            NavEvent::OrbitHaltChanged { body, halted } => {
                info!(body = self.body_name(*body), halted, "orbit")
            }
        }
    }

    fn frame_done(&mut self, effects: EffectSet) {
        debug!(
            camera = effects.has_camera_effects(),
            text = effects.has_text_effects(),
            ?effects,
            "frame presented"
        );
    }
}

/// Collects events and the running effect union.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordingSink {
    pub events: Vec<NavEvent>,
    pub effects: EffectSet,
    pub frames: usize,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PresentationSink for RecordingSink {
    fn present(&mut self, event: &NavEvent) {
        self.events.push(event.clone());
    }

    fn frame_done(&mut self, effects: EffectSet) {
        self.effects |= effects;
        self.frames += 1;
    }
}

//! Gesture-driven Solar System navigation.
//!
//! The interpretation itself lives in two crates:
//!
//! - [`orrery_core`]: focus ring, detail ladder, orbit halts, events
//! - [`orrery_input`]: landmark frames, detectors, the `GestureInterpreter`
//!
//! This crate adds what a running application needs around them: session
//! recordings on disk, config files, a latest-frame-only live driver, and
//! presentation sinks. The `orrery_replay` binary ties them together.

mod error;
pub mod live;
pub mod session;
pub mod settings;
pub mod sink;

pub use error::SessionError;
pub use live::{FrameFeed, LiveDriver, LiveReport};
pub use session::SessionRecording;
pub use sink::{deliver, PresentationSink, RecordingSink, TracingSink};

pub use orrery_core;
pub use orrery_input;

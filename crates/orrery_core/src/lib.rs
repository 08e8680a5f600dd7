//! Navigation engine for the orrery.
//!
//! This crate owns the only state the presentation layer ever sees: which
//! celestial body is focused and how much descriptive detail is shown. It
//! knows nothing about hands or cameras. Commands come in, events and
//! effect flags go out.
//!
//! # Architecture
//!
//! ```text
//! NavCommand ──► Navigator ──► Vec<NavEvent> ──► EffectSet
//!                   │
//!                   ├── BodyCatalog (cyclic focus ring)
//!                   ├── DetailLevel (clamped ladder + cooldown clock)
//!                   └── halted flags (per-body orbit freeze)
//! ```
//!
//! # Example
//!
//! ```
//! use orrery_core::{BodyCatalog, DetailLevel, Navigator, NavEvent};
//!
//! let mut nav = Navigator::new(BodyCatalog::solar_system(), 1_000).unwrap();
//! let events = nav.retreat_focus().unwrap();
//! assert_eq!(events, vec![NavEvent::FocusChanged { index: 8 }]);
//!
//! nav.raise_detail(0).unwrap();
//! assert_eq!(nav.detail(), DetailLevel::Detailed);
//! ```

mod body;
mod command;
mod detail;
mod effect;
mod event;
mod fault;
mod navigator;
pub mod replay;

pub use body::{Body, BodyCatalog};
pub use command::NavCommand;
pub use detail::DetailLevel;
pub use effect::EffectSet;
pub use event::NavEvent;
pub use fault::Fault;
pub use navigator::Navigator;

/// Default minimum interval between two detail-level changes (milliseconds).
pub const DEFAULT_DETAIL_COOLDOWN_MS: u64 = 1_000;

/// Returns true once more than `cooldown_ms` has passed since `last`.
///
/// A clock that has never been set never blocks.
pub fn cooldown_elapsed(last: Option<u64>, now_ms: u64, cooldown_ms: u64) -> bool {
    match last {
        None => true,
        Some(at) => now_ms.saturating_sub(at) > cooldown_ms,
    }
}

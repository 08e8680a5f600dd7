//! Fault types for navigation commands.
//!
//! Faults are recoverable: they mean a command had no effect, never that
//! the session is broken. The gesture interpreter swallows every one of
//! them.

use crate::detail::DetailLevel;
use thiserror::Error;

/// Navigation fault - a command that could not be applied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Fault {
    /// The catalog has no bodies to focus.
    #[error("Empty catalog: no bodies to navigate")]
    EmptyCatalog,

    /// Referenced body doesn't exist.
    #[error("Body {index} out of range (catalog has {len})")]
    BodyOutOfRange { index: usize, len: usize },

    /// Already at the top of the ladder.
    #[error("Detail already at {0}, cannot raise")]
    DetailAtCeiling(DetailLevel),

    /// Already at the bottom of the ladder.
    #[error("Detail already at {0}, cannot lower")]
    DetailAtFloor(DetailLevel),

    /// Detail changed too recently.
    #[error("Detail cooldown: {remaining_ms}ms remaining")]
    CoolingDown { remaining_ms: u64 },
}

impl Fault {
    /// Clamp and cooldown faults are routine gesture noise.
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Fault::DetailAtCeiling(_) | Fault::DetailAtFloor(_) | Fault::CoolingDown { .. }
        )
    }

    /// Check if this fault indicates a programming error.
    pub fn is_bug(&self) -> bool {
        matches!(self, Fault::EmptyCatalog | Fault::BodyOutOfRange { .. })
    }
}

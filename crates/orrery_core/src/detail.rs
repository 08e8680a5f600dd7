//! The three-rung detail ladder.
//!
//! | Level | Description |
//! |-------|-------------|
//! | Overview | Name and one-line summary |
//! | Detailed | Physical characteristics |
//! | Deep | Composition, history and moons |

use serde::{Deserialize, Serialize};
use std::fmt;

/// How much descriptive detail is shown for the focused body.
///
/// Totally ordered and clamped at both ends; there is no wraparound.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum DetailLevel {
    #[default]
    Overview,
    Detailed,
    Deep,
}

impl DetailLevel {
    /// All levels, lowest first.
    pub const ALL: [DetailLevel; 3] = [
        DetailLevel::Overview,
        DetailLevel::Detailed,
        DetailLevel::Deep,
    ];

    /// The next level up, or `None` at `Deep`.
    pub fn raised(self) -> Option<Self> {
        match self {
            DetailLevel::Overview => Some(DetailLevel::Detailed),
            DetailLevel::Detailed => Some(DetailLevel::Deep),
            DetailLevel::Deep => None,
        }
    }

    /// The next level down, or `None` at `Overview`.
    pub fn lowered(self) -> Option<Self> {
        match self {
            DetailLevel::Overview => None,
            DetailLevel::Detailed => Some(DetailLevel::Overview),
            DetailLevel::Deep => Some(DetailLevel::Detailed),
        }
    }

    /// Zero-based rung index.
    pub fn rung(self) -> u8 {
        match self {
            DetailLevel::Overview => 0,
            DetailLevel::Detailed => 1,
            DetailLevel::Deep => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DetailLevel::Overview => "overview",
            DetailLevel::Detailed => "detailed",
            DetailLevel::Deep => "deep",
        }
    }
}

impl fmt::Display for DetailLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//! Navigation commands - the input protocol of the [`Navigator`](crate::Navigator).

use crate::detail::DetailLevel;
use serde::{Deserialize, Serialize};

/// A discrete, already-debounced navigation command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NavCommand {
    /// Focus the next body (+1, wrapping).
    AdvanceFocus,
    /// Focus the previous body (-1, wrapping).
    RetreatFocus,
    /// One rung up the detail ladder, subject to cooldown.
    RaiseDetail,
    /// One rung down the detail ladder, subject to cooldown.
    LowerDetail,
    /// Jump straight to a level. Never blocked by cooldown.
    SetDetail(DetailLevel),
    /// Freeze a body's orbital advance (and its moons').
    HaltOrbit(usize),
    /// Let a halted body revolve again.
    ResumeOrbit(usize),
}

impl NavCommand {
    /// Short kebab-case name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            NavCommand::AdvanceFocus => "advance-focus",
            NavCommand::RetreatFocus => "retreat-focus",
            NavCommand::RaiseDetail => "raise-detail",
            NavCommand::LowerDetail => "lower-detail",
            NavCommand::SetDetail(_) => "set-detail",
            NavCommand::HaltOrbit(_) => "halt-orbit",
            NavCommand::ResumeOrbit(_) => "resume-orbit",
        }
    }

    /// Whether this command is gated by the detail cooldown clock.
    pub fn is_cooled(&self) -> bool {
        matches!(self, NavCommand::RaiseDetail | NavCommand::LowerDetail)
    }
}

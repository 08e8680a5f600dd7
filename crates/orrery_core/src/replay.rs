//! Command replay for deterministic state reconstruction.
//!
//! CommandLog records every committed command with its timestamp, enabling:
//! - Reconstructing focus/detail after the fact from a session log
//! - Checking that two sessions reached the same state
//! - Debugging cooldown behaviour offline

use crate::body::BodyCatalog;
use crate::command::NavCommand;
use crate::navigator::Navigator;
use crate::Fault;
use serde::{Deserialize, Serialize};

/// A command with the time it was committed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimestampedCommand {
    /// Monotonic milliseconds at commit.
    pub at_ms: u64,

    pub command: NavCommand,
}

impl TimestampedCommand {
    pub fn new(at_ms: u64, command: NavCommand) -> Self {
        Self { at_ms, command }
    }
}

/// Log of navigation commands for replay.
///
/// # Determinism
///
/// Given the same catalog, cooldown and log, replay always produces the
/// same focus, detail level and halt flags. Commands that faulted during
/// the live session fault identically during replay and are skipped.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommandLog {
    pub events: Vec<TimestampedCommand>,
}

impl CommandLog {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Record a command.
    pub fn record(&mut self, at_ms: u64, command: NavCommand) {
        self.events.push(TimestampedCommand::new(at_ms, command));
    }

    /// Replay all commands onto a fresh navigator.
    pub fn replay(&self, catalog: BodyCatalog, detail_cooldown_ms: u64) -> Result<Navigator, Fault> {
        self.replay_to(catalog, detail_cooldown_ms, u64::MAX)
    }

    /// Replay commands committed at or before `target_ms`.
    pub fn replay_to(
        &self,
        catalog: BodyCatalog,
        detail_cooldown_ms: u64,
        target_ms: u64,
    ) -> Result<Navigator, Fault> {
        let mut nav = Navigator::new(catalog, detail_cooldown_ms)?;

        for event in &self.events {
            if event.at_ms > target_ms {
                break;
            }
            // Recoverable faults replay as no-ops, same as live
            let _ = nav.execute(event.command, event.at_ms);
        }

        Ok(nav)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Command names in order, for logs and assertions.
    pub fn names(&self) -> Vec<&'static str> {
        self.events.iter().map(|e| e.command.name()).collect()
    }
}

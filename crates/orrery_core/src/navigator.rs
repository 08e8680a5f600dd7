//! The navigation/detail state machine.

use crate::body::{Body, BodyCatalog};
use crate::command::NavCommand;
use crate::detail::DetailLevel;
use crate::event::NavEvent;
use crate::fault::Fault;
use crate::{cooldown_elapsed, DEFAULT_DETAIL_COOLDOWN_MS};
use tracing::debug;

/// Owns the focus index, the detail level and per-body orbit halts.
///
/// These are the only values that persist across frames and the only
/// ones exposed to the presentation layer.
#[derive(Debug, Clone)]
pub struct Navigator {
    catalog: BodyCatalog,
    focus: usize,
    detail: DetailLevel,
    detail_cooldown_ms: u64,
    /// Timestamp of the last real ladder step. Clamped no-ops never set it.
    last_detail_change: Option<u64>,
    halted: Vec<bool>,
    halted_spin_multiplier: f32,
}

impl Navigator {
    /// Create a navigator focused on the first body at `Overview`.
    pub fn new(catalog: BodyCatalog, detail_cooldown_ms: u64) -> Result<Self, Fault> {
        if catalog.is_empty() {
            return Err(Fault::EmptyCatalog);
        }
        let halted = vec![false; catalog.len()];
        Ok(Self {
            catalog,
            focus: 0,
            detail: DetailLevel::Overview,
            detail_cooldown_ms,
            last_detail_change: None,
            halted,
            halted_spin_multiplier: 1.0,
        })
    }

    /// Scale applied to axial spin of halted bodies.
    pub fn with_halted_spin_multiplier(mut self, multiplier: f32) -> Self {
        self.halted_spin_multiplier = multiplier;
        self
    }

    pub fn catalog(&self) -> &BodyCatalog {
        &self.catalog
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn focused_body(&self) -> Option<&Body> {
        self.catalog.get(self.focus)
    }

    pub fn detail(&self) -> DetailLevel {
        self.detail
    }

    pub fn is_halted(&self, body: usize) -> bool {
        self.halted.get(body).copied().unwrap_or(false)
    }

    /// Axial spin multiplier for a body: accelerated only while halted.
    pub fn spin_multiplier(&self, body: usize) -> f32 {
        if self.is_halted(body) {
            self.halted_spin_multiplier
        } else {
            1.0
        }
    }

    /// Apply a command at time `now_ms`.
    pub fn execute(&mut self, command: NavCommand, now_ms: u64) -> Result<Vec<NavEvent>, Fault> {
        match command {
            NavCommand::AdvanceFocus => self.advance_focus(),
            NavCommand::RetreatFocus => self.retreat_focus(),
            NavCommand::RaiseDetail => self.raise_detail(now_ms).map(|e| vec![e]),
            NavCommand::LowerDetail => self.lower_detail(now_ms).map(|e| vec![e]),
            NavCommand::SetDetail(level) => Ok(self.set_detail_level(level).into_iter().collect()),
            NavCommand::HaltOrbit(body) => self.halt_orbit(body).map(|e| e.into_iter().collect()),
            NavCommand::ResumeOrbit(body) => {
                self.resume_orbit(body).map(|e| e.into_iter().collect())
            }
        }
    }

    // =========================================================================
    // FOCUS
    // =========================================================================

    /// Focus the next body, wrapping past the last one.
    pub fn advance_focus(&mut self) -> Result<Vec<NavEvent>, Fault> {
        let target = self.catalog.next_index(self.focus);
        self.refocus(target)
    }

    /// Focus the previous body, wrapping from 0 to the last one.
    pub fn retreat_focus(&mut self) -> Result<Vec<NavEvent>, Fault> {
        let target = self.catalog.prev_index(self.focus);
        self.refocus(target)
    }

    fn refocus(&mut self, target: usize) -> Result<Vec<NavEvent>, Fault> {
        if self.catalog.is_empty() {
            return Err(Fault::EmptyCatalog);
        }
        let mut events = Vec::with_capacity(2);
        // A halt belongs to the body being looked at; leaving it lets it revolve.
        if let Some(released) = self.resume_orbit(self.focus)? {
            events.push(released);
        }
        self.focus = target;
        debug!(focus = target, "focus changed");
        events.push(NavEvent::FocusChanged { index: target });
        Ok(events)
    }

    // =========================================================================
    // DETAIL LADDER
    // =========================================================================

    /// One rung up, gated by the detail cooldown.
    pub fn raise_detail(&mut self, now_ms: u64) -> Result<NavEvent, Fault> {
        self.check_detail_cooldown(now_ms)?;
        let next = self
            .detail
            .raised()
            .ok_or(Fault::DetailAtCeiling(self.detail))?;
        Ok(self.commit_detail(next, now_ms))
    }

    /// One rung down, gated by the detail cooldown.
    pub fn lower_detail(&mut self, now_ms: u64) -> Result<NavEvent, Fault> {
        self.check_detail_cooldown(now_ms)?;
        let next = self
            .detail
            .lowered()
            .ok_or(Fault::DetailAtFloor(self.detail))?;
        Ok(self.commit_detail(next, now_ms))
    }

    /// Direct set. Always succeeds and leaves the cooldown clock alone.
    ///
    /// Returns an event only when the level actually changed.
    pub fn set_detail_level(&mut self, level: DetailLevel) -> Option<NavEvent> {
        if self.detail == level {
            return None;
        }
        self.detail = level;
        debug!(%level, "detail level set");
        Some(NavEvent::DetailLevelChanged { level })
    }

    fn check_detail_cooldown(&self, now_ms: u64) -> Result<(), Fault> {
        if cooldown_elapsed(self.last_detail_change, now_ms, self.detail_cooldown_ms) {
            return Ok(());
        }
        let since = self
            .last_detail_change
            .map_or(0, |at| now_ms.saturating_sub(at));
        Err(Fault::CoolingDown {
            remaining_ms: self.detail_cooldown_ms.saturating_sub(since),
        })
    }

    fn commit_detail(&mut self, level: DetailLevel, now_ms: u64) -> NavEvent {
        self.detail = level;
        self.last_detail_change = Some(now_ms);
        debug!(%level, at_ms = now_ms, "detail level stepped");
        NavEvent::DetailLevelChanged { level }
    }

    // =========================================================================
    // ORBIT HALTS
    // =========================================================================

    /// Freeze a body's orbit. Returns `None` if it was already halted.
    pub fn halt_orbit(&mut self, body: usize) -> Result<Option<NavEvent>, Fault> {
        self.set_halted(body, true)
    }

    /// Release a body's orbit. Returns `None` if it was not halted.
    pub fn resume_orbit(&mut self, body: usize) -> Result<Option<NavEvent>, Fault> {
        self.set_halted(body, false)
    }

    fn set_halted(&mut self, body: usize, halted: bool) -> Result<Option<NavEvent>, Fault> {
        let len = self.halted.len();
        let slot = self
            .halted
            .get_mut(body)
            .ok_or(Fault::BodyOutOfRange { index: body, len })?;
        if *slot == halted {
            return Ok(None);
        }
        *slot = halted;
        debug!(body, halted, "orbit halt changed");
        Ok(Some(NavEvent::OrbitHaltChanged { body, halted }))
    }
}

impl Default for Navigator {
    fn default() -> Self {
        let catalog = BodyCatalog::solar_system();
        let halted = vec![false; catalog.len()];
        Self {
            catalog,
            focus: 0,
            detail: DetailLevel::Overview,
            detail_cooldown_ms: DEFAULT_DETAIL_COOLDOWN_MS,
            last_detail_change: None,
            halted,
            halted_spin_multiplier: 1.0,
        }
    }
}

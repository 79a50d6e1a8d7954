//! Warning groups: priority arbitration between related warnings.
//!
//! RULES:
//!   - Members are always sorted by ascending priority (most urgent first).
//!   - Members update in that order. The first member that detects its
//!     hazard suppresses every member after it for the rest of the pass.
//!   - All members share one `CueGate`: a member may play when nothing
//!     more urgent has played, or when it is the one that played last and
//!     its repeat interval has elapsed.

use crate::{
    context::TickContext,
    error::{WarnError, WarnResult},
    types::{Millis, Priority, WarningId},
    warning::Warning,
};

/// Group-wide gating state consulted by every member before it plays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CueGate {
    ms_since_last_cue_played: Millis,
    /// Priority of the member that played most recently.
    /// None = no warning, which admits any priority.
    highest_warned_priority:  Option<Priority>,
}

impl CueGate {
    pub fn new(ms_since_last_cue_played: Millis) -> Self {
        Self {
            ms_since_last_cue_played,
            highest_warned_priority: None,
        }
    }

    /// A strictly more urgent warning always wins. A warning at the gate's
    /// own priority may re-signal only after its repeat interval.
    pub fn can_play(&self, priority: Priority, repeat_interval_ms: Millis) -> bool {
        match self.highest_warned_priority {
            None => true,
            Some(highest) => {
                highest > priority
                    || (self.ms_since_last_cue_played > repeat_interval_ms && highest == priority)
            }
        }
    }

    pub fn record_played(&mut self, priority: Priority) {
        self.ms_since_last_cue_played = 0;
        self.highest_warned_priority = Some(priority);
    }

    pub fn advance(&mut self, elapsed_ms: Millis) {
        self.ms_since_last_cue_played = self.ms_since_last_cue_played.saturating_add(elapsed_ms);
    }

    pub fn reset(&mut self) {
        self.highest_warned_priority = None;
    }

    /// Raise the elapsed counter to at least `floor`.
    fn seed(&mut self, floor: Millis) {
        self.ms_since_last_cue_played = self.ms_since_last_cue_played.max(floor);
    }

    pub fn ms_since_last_cue_played(&self) -> Millis {
        self.ms_since_last_cue_played
    }

    pub fn highest_warned_priority(&self) -> Option<Priority> {
        self.highest_warned_priority
    }
}

#[derive(Debug)]
pub struct WarningGroup {
    name:              String,
    members:           Vec<Warning>,
    gate:              CueGate,
    /// Reserved for a user-facing on/off toggle. Never consulted.
    can_be_turned_off: bool,
}

impl WarningGroup {
    pub fn new(name: impl Into<String>, members: Vec<Warning>, can_be_turned_off: bool) -> Self {
        let mut group = Self {
            name: name.into(),
            members,
            gate: CueGate::new(0),
            can_be_turned_off,
        };
        group.sort_by_priority();
        group.seed_gate();
        group
    }

    /// One arbitration pass. Returns whether any member signaled.
    pub fn update(&mut self, ctx: &mut TickContext<'_>) -> bool {
        if !ctx.game_ready {
            return false;
        }

        self.gate.advance(ctx.elapsed_ms);

        let mut signaled: Option<Priority> = None;
        for warning in &mut self.members {
            if warning.update(signaled.is_some(), &mut self.gate, ctx) && signaled.is_none() {
                signaled = Some(warning.priority());
            }
        }

        // Open the gate when nothing signals, or when the member that set it
        // is no longer the one signaling.
        let stale = match (signaled, self.gate.highest_warned_priority()) {
            (None, _)                => true,
            (Some(p), Some(highest)) => p > highest,
            (Some(_), None)          => false,
        };
        if stale {
            self.gate.reset();
        }

        signaled.is_some()
    }

    pub fn add(&mut self, warning: Warning) {
        self.members.push(warning);
        self.sort_by_priority();
        self.seed_gate();
    }

    pub fn remove(&mut self, id: WarningId) -> Option<Warning> {
        let index = self.members.iter().position(|w| w.id() == id)?;
        Some(self.members.remove(index))
    }

    pub fn clear(&mut self) {
        self.members.clear();
    }

    pub fn set_priority(&mut self, id: WarningId, priority: Priority) -> WarnResult<()> {
        let warning = self
            .members
            .iter_mut()
            .find(|w| w.id() == id)
            .ok_or(WarnError::WarningNotFound { id })?;
        warning.set_priority(priority);
        self.sort_by_priority();
        Ok(())
    }

    pub fn name(&self) -> &str { &self.name }
    pub fn members(&self) -> &[Warning] { &self.members }
    pub fn gate(&self) -> &CueGate { &self.gate }
    pub fn can_be_turned_off(&self) -> bool { self.can_be_turned_off }
    pub fn len(&self) -> usize { self.members.len() }
    pub fn is_empty(&self) -> bool { self.members.is_empty() }

    pub fn member(&self, id: WarningId) -> Option<&Warning> {
        self.members.iter().find(|w| w.id() == id)
    }

    fn sort_by_priority(&mut self) {
        self.members.sort_by_key(Warning::priority);
    }

    /// Start as if the longest repeat interval already passed, so a fresh
    /// group does not burst replays.
    fn seed_gate(&mut self) {
        let longest = self
            .members
            .iter()
            .map(Warning::repeat_interval_ms)
            .max()
            .unwrap_or(0);
        self.gate.seed(longest);
    }
}

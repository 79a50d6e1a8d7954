//! A single HUD warning and its lifecycle state machine.
//!
//! STATES:
//!   NotStarted → Started   on the first pass the hazard is detected
//!   Started    → Played    once sound_delay elapsed AND the group gate allows
//!   Played     → Played    repeat path, only when repeat_interval > 0
//!   any        → NotStarted as soon as detection fails or is suppressed
//!
//! A warning never owns its gating state. The owning group passes its
//! `CueGate` into every update, so the gate is shared by all members.

use crate::{
    condition::WarningCondition,
    config::WarningTiming,
    context::TickContext,
    cue::{SoundCue, TextId},
    event::HudEvent,
    group::CueGate,
    notification::Notification,
    types::{Millis, Priority, WarningId},
};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningState {
    NotStarted,
    Started,
    Played,
}

pub struct Warning {
    id:                         WarningId,
    name:                       String,
    condition:                  Box<dyn WarningCondition>,
    priority:                   Priority,
    repeat_interval_ms:         Millis,
    sound_delay_ms:             Millis,
    disappear_ms:               Millis,
    state:                      WarningState,
    ms_since_last_state_change: Millis,
    text:                       TextId,
    /// Distinct cues requested since the warning started. The cue can
    /// change between repeats, so every one is cancelled on reset.
    requested_cues:             Vec<SoundCue>,
}

impl Warning {
    pub fn new(
        name:      impl Into<String>,
        condition: impl WarningCondition + 'static,
        timing:    &WarningTiming,
    ) -> Self {
        Self {
            id: WarningId::new(),
            name: name.into(),
            condition: Box::new(condition),
            priority: timing.priority,
            repeat_interval_ms: timing.repeat_interval_ms,
            sound_delay_ms: timing.sound_delay_ms,
            disappear_ms: timing.disappear_ms,
            state: WarningState::NotStarted,
            ms_since_last_state_change: 0,
            text: TextId::Blank,
            requested_cues: Vec::new(),
        }
    }

    pub fn id(&self) -> WarningId { self.id }
    pub fn name(&self) -> &str { &self.name }
    pub fn priority(&self) -> Priority { self.priority }
    pub fn repeat_interval_ms(&self) -> Millis { self.repeat_interval_ms }
    pub fn sound_delay_ms(&self) -> Millis { self.sound_delay_ms }
    pub fn disappear_ms(&self) -> Millis { self.disappear_ms }
    pub fn state(&self) -> WarningState { self.state }
    pub fn text(&self) -> TextId { self.text }
    pub fn ms_since_last_state_change(&self) -> Millis { self.ms_since_last_state_change }

    /// Changing priority breaks the owning group's ordering; go through
    /// `WarningGroup::set_priority` so the group re-sorts.
    pub(crate) fn set_priority(&mut self, priority: Priority) {
        self.priority = priority;
    }

    pub fn notification(&self) -> Notification {
        Notification {
            id: self.id,
            text: self.text,
            disappear_ms: self.disappear_ms,
        }
    }

    /// Run one arbitration pass.
    ///
    /// - `higher_priority_signaling`: a more urgent sibling already detected
    ///   its hazard this pass. Detection is skipped and treated as false.
    /// - `gate`: the owning group's shared priority/timing gate.
    ///
    /// Returns whether this warning detected its hazard.
    pub fn update(
        &mut self,
        higher_priority_signaling: bool,
        gate: &mut CueGate,
        ctx:  &mut TickContext<'_>,
    ) -> bool {
        let detection = if higher_priority_signaling {
            None
        } else {
            self.condition.detect(ctx.status)
        };

        self.ms_since_last_state_change =
            self.ms_since_last_state_change.saturating_add(ctx.elapsed_ms);

        let Some(detection) = detection else {
            self.reset(ctx);
            return false;
        };

        match self.state {
            WarningState::NotStarted => {
                self.text = detection.text;
                ctx.notifications.add(&self.notification());
                self.transition(WarningState::Started);
                ctx.events.push(HudEvent::WarningStarted {
                    at_ms:    ctx.now_ms,
                    warning:  self.name.clone(),
                    priority: self.priority,
                    text:     self.text,
                });
            }
            WarningState::Started => {
                if self.ms_since_last_state_change >= self.sound_delay_ms
                    && gate.can_play(self.priority, self.repeat_interval_ms)
                {
                    self.signal(detection.cue, false, gate, ctx);
                    self.transition(WarningState::Played);
                }
            }
            WarningState::Played => {
                if self.repeat_interval_ms > 0
                    && gate.can_play(self.priority, self.repeat_interval_ms)
                {
                    // Remove then add re-triggers visibility and the disappear timer.
                    ctx.notifications.remove(self.id);
                    ctx.notifications.add(&self.notification());
                    self.signal(detection.cue, true, gate, ctx);
                }
            }
        }
        true
    }

    fn signal(&mut self, cue: SoundCue, repeat: bool, gate: &mut CueGate, ctx: &mut TickContext<'_>) {
        ctx.enqueue_sound(cue);
        if !self.requested_cues.contains(&cue) {
            self.requested_cues.push(cue);
        }
        gate.record_played(self.priority);
        ctx.events.push(HudEvent::WarningSignaled {
            at_ms:    ctx.now_ms,
            warning:  self.name.clone(),
            priority: self.priority,
            cue,
            repeat,
        });
    }

    fn reset(&mut self, ctx: &mut TickContext<'_>) {
        if self.state == WarningState::NotStarted {
            return;
        }
        ctx.notifications.remove(self.id);
        for cue in std::mem::take(&mut self.requested_cues) {
            ctx.cancel_sound(cue);
        }
        self.transition(WarningState::NotStarted);
        ctx.events.push(HudEvent::WarningCleared {
            at_ms:    ctx.now_ms,
            warning:  self.name.clone(),
            priority: self.priority,
        });
    }

    fn transition(&mut self, next: WarningState) {
        log::debug!("warning '{}' (p{}): {:?} -> {next:?}", self.name, self.priority, self.state);
        self.state = next;
        self.ms_since_last_state_change = 0;
    }
}

impl fmt::Debug for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Warning")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("priority", &self.priority)
            .field("repeat_interval_ms", &self.repeat_interval_ms)
            .field("sound_delay_ms", &self.sound_delay_ms)
            .field("state", &self.state)
            .field("ms_since_last_state_change", &self.ms_since_last_state_change)
            .finish_non_exhaustive()
    }
}

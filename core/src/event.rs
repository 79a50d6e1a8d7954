//! HUD warning events: what happened during one scheduler update.
//!
//! Hosts and tooling consume these; the subsystem itself never reads them back.

use crate::{
    cue::{SoundCue, TextId},
    types::{Millis, Priority},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HudEvent {
    // ── Warning lifecycle ──────────────────────────
    WarningStarted {
        at_ms:    Millis,
        warning:  String,
        priority: Priority,
        text:     TextId,
    },
    /// The warning requested its cue. `repeat` is false for the first cue
    /// after the hazard appeared.
    WarningSignaled {
        at_ms:    Millis,
        warning:  String,
        priority: Priority,
        cue:      SoundCue,
        repeat:   bool,
    },
    WarningCleared {
        at_ms:    Millis,
        warning:  String,
        priority: Priority,
    },

    // ── Cue queue ──────────────────────────────────
    CueDispatched {
        at_ms:      Millis,
        cue:        SoundCue,
        from_queue: bool,
    },
    CueQueued {
        at_ms:   Millis,
        cue:     SoundCue,
        pending: usize,
    },
    CueCancelled {
        at_ms:    Millis,
        cue:      SoundCue,
        stopped:  bool,
        dequeued: usize,
    },
    /// HUD voice warnings are switched off; the cue was discarded.
    CueDropped {
        at_ms: Millis,
        cue:   SoundCue,
    },

    // ── Scheduler ──────────────────────────────────
    GroupsCleared {
        at_ms:  Millis,
        groups: usize,
    },
}

impl HudEvent {
    /// Stable name of the variant, for log lines and filters.
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::WarningStarted { .. }  => "warning_started",
            Self::WarningSignaled { .. } => "warning_signaled",
            Self::WarningCleared { .. }  => "warning_cleared",
            Self::CueDispatched { .. }   => "cue_dispatched",
            Self::CueQueued { .. }       => "cue_queued",
            Self::CueCancelled { .. }    => "cue_cancelled",
            Self::CueDropped { .. }      => "cue_dropped",
            Self::GroupsCleared { .. }   => "groups_cleared",
        }
    }
}

//! Game clock: counts simulation frames and converts them to game time.
//!
//! The clock is the only source of "now" for cue cooldown stamping.
//! It never reads wall time.

use crate::types::{Millis, Tick};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameClock {
    pub current_frame: Tick,
    /// Length of one simulation frame.
    pub step_ms:       Millis,
}

impl GameClock {
    pub fn new(step_ms: Millis) -> Self {
        Self { current_frame: 0, step_ms }
    }

    /// Advance one frame. Returns the new frame number.
    pub fn advance(&mut self) -> Tick {
        self.current_frame += 1;
        self.current_frame
    }

    /// Total game time elapsed since the clock was created.
    pub fn now_ms(&self) -> Millis {
        self.frames_to_ms(self.current_frame)
    }

    pub fn frames_to_ms(&self, frames: Tick) -> Millis {
        frames.saturating_mul(self.step_ms)
    }
}

//! Per-update context handed down from the scheduler to groups and warnings.

use crate::{
    audio::AudioOutput,
    cue::SoundCue,
    event::HudEvent,
    notification::NotificationSurface,
    sound_queue::SoundQueue,
    status::PlayerStatus,
    types::Millis,
};

/// Everything a warning may read or touch during one arbitration pass.
pub struct TickContext<'a> {
    pub status:        &'a PlayerStatus,
    /// Game time of this pass, used for cue cooldown stamping.
    pub now_ms:        Millis,
    /// Time advanced by this pass: step length times frames between updates.
    pub elapsed_ms:    Millis,
    pub game_ready:    bool,
    pub notifications: &'a mut dyn NotificationSurface,
    pub audio:         &'a mut dyn AudioOutput,
    pub sounds:        &'a mut SoundQueue,
    pub events:        &'a mut Vec<HudEvent>,
}

impl TickContext<'_> {
    pub fn enqueue_sound(&mut self, cue: SoundCue) {
        self.sounds.enqueue(cue, &mut *self.audio, self.now_ms, &mut *self.events);
    }

    pub fn cancel_sound(&mut self, cue: SoundCue) {
        self.sounds.cancel(cue, &mut *self.audio, self.now_ms, &mut *self.events);
    }
}

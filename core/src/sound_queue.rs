//! The global cue slot and its pending queue.
//!
//! RULES:
//!   - At most one cue is tracked as "currently playing" system-wide.
//!   - A cue plays immediately only when the slot is idle AND the
//!     cooldown since the last dispatch has elapsed. Otherwise it queues.
//!   - The queue is unbounded and keeps duplicates.
//!   - Cancellation matches by cue value, not by requester.

use crate::{
    audio::{AudioOutput, VoiceHandle},
    cue::SoundCue,
    event::HudEvent,
    types::Millis,
};
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayingCue {
    pub voice: VoiceHandle,
    pub cue:   SoundCue,
}

#[derive(Debug)]
pub struct SoundQueue {
    pending:          VecDeque<SoundCue>,
    current:          Option<PlayingCue>,
    /// None until the first dispatch, so the first cue never waits.
    last_dispatch_ms: Option<Millis>,
    cooldown_ms:      Millis,
}

impl SoundQueue {
    pub fn new(cooldown_ms: Millis) -> Self {
        Self {
            pending: VecDeque::new(),
            current: None,
            last_dispatch_ms: None,
            cooldown_ms,
        }
    }

    /// Play `cue` now if the slot is free and the cooldown elapsed,
    /// otherwise append it to the pending queue.
    pub fn enqueue(
        &mut self,
        cue:    SoundCue,
        audio:  &mut dyn AudioOutput,
        now_ms: Millis,
        events: &mut Vec<HudEvent>,
    ) {
        if !audio.hud_warnings_enabled() {
            log::trace!("at={now_ms}ms cue {cue:?} dropped: hud voice warnings disabled");
            events.push(HudEvent::CueDropped { at_ms: now_ms, cue });
            return;
        }

        if self.is_idle(audio) && self.cooldown_elapsed(now_ms) {
            self.dispatch(cue, false, audio, now_ms, events);
        } else {
            self.pending.push_back(cue);
            log::trace!("at={now_ms}ms cue {cue:?} queued ({} pending)", self.pending.len());
            events.push(HudEvent::CueQueued {
                at_ms: now_ms,
                cue,
                pending: self.pending.len(),
            });
        }
    }

    /// Stop the playing cue if it equals `cue` and is still audible, and
    /// drop every queued copy.
    pub fn cancel(
        &mut self,
        cue:    SoundCue,
        audio:  &mut dyn AudioOutput,
        now_ms: Millis,
        events: &mut Vec<HudEvent>,
    ) {
        let mut stopped = false;
        if let Some(playing) = self.current.filter(|p| p.cue == cue) {
            // A voice that already finished is forgotten, not stopped.
            if audio.is_playing(playing.voice) {
                audio.stop(playing.voice, false);
                stopped = true;
            }
            self.current = None;
        }

        let before = self.pending.len();
        self.pending.retain(|queued| *queued != cue);
        let dequeued = before - self.pending.len();

        if stopped || dequeued > 0 {
            log::debug!("at={now_ms}ms cue {cue:?} cancelled (stopped={stopped}, dequeued={dequeued})");
            events.push(HudEvent::CueCancelled {
                at_ms: now_ms,
                cue,
                stopped,
                dequeued,
            });
        }
    }

    /// Dispatch the head of the queue once the cooldown has elapsed.
    /// Called from the throttled scheduler tick.
    pub fn service(
        &mut self,
        audio:  &mut dyn AudioOutput,
        now_ms: Millis,
        events: &mut Vec<HudEvent>,
    ) {
        if !self.cooldown_elapsed(now_ms) {
            return;
        }
        if let Some(cue) = self.pending.pop_front() {
            self.dispatch(cue, true, audio, now_ms, events);
        }
    }

    /// Drop every pending cue and force-stop the playing one.
    pub fn clear(&mut self, audio: &mut dyn AudioOutput) {
        self.pending.clear();
        if let Some(playing) = self.current.take() {
            audio.stop(playing.voice, true);
        }
    }

    pub fn clear_pending(&mut self) {
        self.pending.clear();
    }

    pub fn is_idle(&self, audio: &dyn AudioOutput) -> bool {
        self.current.map_or(true, |playing| !audio.is_playing(playing.voice))
    }

    pub fn cooldown_elapsed(&self, now_ms: Millis) -> bool {
        self.last_dispatch_ms
            .map_or(true, |last| now_ms.saturating_sub(last) >= self.cooldown_ms)
    }

    pub fn pending(&self) -> impl Iterator<Item = SoundCue> + '_ {
        self.pending.iter().copied()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn current(&self) -> Option<PlayingCue> {
        self.current
    }

    pub fn last_dispatch_ms(&self) -> Option<Millis> {
        self.last_dispatch_ms
    }

    fn dispatch(
        &mut self,
        cue:        SoundCue,
        from_queue: bool,
        audio:      &mut dyn AudioOutput,
        now_ms:     Millis,
        events:     &mut Vec<HudEvent>,
    ) {
        let voice = audio.play_sound(cue);
        if voice.is_none() {
            log::warn!("at={now_ms}ms audio backend returned no voice for cue {cue:?}");
        }
        self.current = voice.map(|voice| PlayingCue { voice, cue });
        self.last_dispatch_ms = Some(now_ms);
        log::debug!("at={now_ms}ms cue {cue:?} dispatched (from_queue={from_queue})");
        events.push(HudEvent::CueDispatched { at_ms: now_ms, cue, from_queue });
    }
}

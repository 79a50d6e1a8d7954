//! Audio output surface.
//!
//! The scheduler only needs to start a cue, ask whether it is still
//! playing, and stop it. Mixing and decoding belong to the backend.

use crate::{cue::SoundCue, types::Millis};
use serde::{Deserialize, Serialize};

/// Opaque handle to a voice started by `AudioOutput::play_sound`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VoiceHandle(pub u64);

pub trait AudioOutput {
    /// Global user setting for HUD voice warnings.
    fn hud_warnings_enabled(&self) -> bool;

    /// Start `cue`. `None` means the backend could not start a voice;
    /// callers treat that as "nothing playing".
    fn play_sound(&mut self, cue: SoundCue) -> Option<VoiceHandle>;

    fn is_playing(&self, voice: VoiceHandle) -> bool;

    /// Stop a voice. `force` skips any fade-out.
    fn stop(&mut self, voice: VoiceHandle, force: bool);
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceRecord {
    pub voice:        VoiceHandle,
    pub cue:          SoundCue,
    pub remaining_ms: Millis,
    pub stopped:      bool,
}

/// In-memory audio backend. Every cue "plays" for `cue_length_ms`
/// of game time, advanced by the host with `advance`.
#[derive(Debug)]
pub struct RecordingAudio {
    pub enabled:   bool,
    cue_length_ms: Millis,
    next_voice:    u64,
    voices:        Vec<VoiceRecord>,
    played:        Vec<SoundCue>,
    stopped:       Vec<SoundCue>,
}

impl RecordingAudio {
    pub fn new(cue_length_ms: Millis) -> Self {
        Self {
            enabled: true,
            cue_length_ms,
            next_voice: 0,
            voices: Vec::new(),
            played: Vec::new(),
            stopped: Vec::new(),
        }
    }

    pub fn disabled(cue_length_ms: Millis) -> Self {
        Self { enabled: false, ..Self::new(cue_length_ms) }
    }

    /// Let `elapsed_ms` of playback pass.
    pub fn advance(&mut self, elapsed_ms: Millis) {
        for voice in &mut self.voices {
            voice.remaining_ms = voice.remaining_ms.saturating_sub(elapsed_ms);
        }
    }

    /// Every cue ever started, in order.
    pub fn played(&self) -> &[SoundCue] {
        &self.played
    }

    /// Every cue stopped before it finished, in order.
    pub fn stopped(&self) -> &[SoundCue] {
        &self.stopped
    }

    pub fn voices(&self) -> &[VoiceRecord] {
        &self.voices
    }

    pub fn playing_cue(&self) -> Option<SoundCue> {
        self.voices
            .iter()
            .rev()
            .find(|v| !v.stopped && v.remaining_ms > 0)
            .map(|v| v.cue)
    }
}

impl Default for RecordingAudio {
    fn default() -> Self { Self::new(2000) }
}

impl AudioOutput for RecordingAudio {
    fn hud_warnings_enabled(&self) -> bool {
        self.enabled
    }

    fn play_sound(&mut self, cue: SoundCue) -> Option<VoiceHandle> {
        self.next_voice += 1;
        let voice = VoiceHandle(self.next_voice);
        self.voices.push(VoiceRecord {
            voice,
            cue,
            remaining_ms: self.cue_length_ms,
            stopped: false,
        });
        self.played.push(cue);
        Some(voice)
    }

    fn is_playing(&self, voice: VoiceHandle) -> bool {
        self.voices
            .iter()
            .any(|v| v.voice == voice && !v.stopped && v.remaining_ms > 0)
    }

    fn stop(&mut self, voice: VoiceHandle, _force: bool) {
        if let Some(record) = self.voices.iter_mut().find(|v| v.voice == voice) {
            if !record.stopped && record.remaining_ms > 0 {
                self.stopped.push(record.cue);
            }
            record.stopped = true;
        }
    }
}

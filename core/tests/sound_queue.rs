//! Global cue slot tests: immediate play, queueing, cooldown, cancellation.

use hud_warnings::{
    audio::{AudioOutput, RecordingAudio, VoiceHandle},
    cue::SoundCue,
    event::HudEvent,
    sound_queue::SoundQueue,
};

const COOLDOWN: u64 = 5000;

fn queue() -> (SoundQueue, RecordingAudio, Vec<HudEvent>) {
    (SoundQueue::new(COOLDOWN), RecordingAudio::new(2000), Vec::new())
}

fn pending(q: &SoundQueue) -> Vec<SoundCue> {
    q.pending().collect()
}

#[test]
fn idle_slot_plays_immediately() {
    let (mut q, mut audio, mut events) = queue();
    q.enqueue(SoundCue::HealthLow, &mut audio, 100, &mut events);

    assert_eq!(audio.played(), &[SoundCue::HealthLow]);
    assert_eq!(q.pending_len(), 0);
    assert_eq!(q.last_dispatch_ms(), Some(100));
    assert_eq!(q.current().map(|p| p.cue), Some(SoundCue::HealthLow));
    assert!(matches!(
        events.as_slice(),
        [HudEvent::CueDispatched { from_queue: false, .. }]
    ));
}

#[test]
fn cue_inside_cooldown_is_queued() {
    let (mut q, mut audio, mut events) = queue();
    q.enqueue(SoundCue::HealthLow, &mut audio, 0, &mut events);
    audio.advance(3000); // first cue finished, slot idle
    q.enqueue(SoundCue::MeteorInbound, &mut audio, 3000, &mut events);

    assert_eq!(audio.played(), &[SoundCue::HealthLow]);
    assert_eq!(pending(&q), vec![SoundCue::MeteorInbound]);
}

#[test]
fn busy_slot_queues_even_after_cooldown() {
    let mut q = SoundQueue::new(COOLDOWN);
    let mut audio = RecordingAudio::new(10_000);
    let mut events = Vec::new();

    q.enqueue(SoundCue::HealthLow, &mut audio, 0, &mut events);
    audio.advance(6000); // still playing
    q.enqueue(SoundCue::HealthCritical, &mut audio, 6000, &mut events);

    assert_eq!(audio.played(), &[SoundCue::HealthLow]);
    assert_eq!(pending(&q), vec![SoundCue::HealthCritical]);
}

#[test]
fn queue_keeps_duplicates_in_order() {
    let (mut q, mut audio, mut events) = queue();
    q.enqueue(SoundCue::HealthLow, &mut audio, 0, &mut events);
    q.enqueue(SoundCue::MeteorInbound, &mut audio, 10, &mut events);
    q.enqueue(SoundCue::MeteorInbound, &mut audio, 20, &mut events);
    q.enqueue(SoundCue::HealthCritical, &mut audio, 30, &mut events);

    assert_eq!(
        pending(&q),
        vec![SoundCue::MeteorInbound, SoundCue::MeteorInbound, SoundCue::HealthCritical]
    );
}

#[test]
fn service_waits_for_cooldown_then_pops_front() {
    let (mut q, mut audio, mut events) = queue();
    q.enqueue(SoundCue::HealthLow, &mut audio, 1000, &mut events);
    q.enqueue(SoundCue::MeteorInbound, &mut audio, 1500, &mut events);
    q.enqueue(SoundCue::HealthCritical, &mut audio, 1600, &mut events);

    q.service(&mut audio, 5999, &mut events);
    assert_eq!(q.pending_len(), 2, "cooldown not yet elapsed");

    q.service(&mut audio, 6000, &mut events);
    assert_eq!(audio.played(), &[SoundCue::HealthLow, SoundCue::MeteorInbound]);
    assert_eq!(pending(&q), vec![SoundCue::HealthCritical]);
    assert_eq!(q.last_dispatch_ms(), Some(6000));
    assert!(matches!(
        events.last(),
        Some(HudEvent::CueDispatched { from_queue: true, cue: SoundCue::MeteorInbound, .. })
    ));
}

#[test]
fn disabled_hud_audio_drops_cues() {
    let mut q = SoundQueue::new(COOLDOWN);
    let mut audio = RecordingAudio::disabled(2000);
    let mut events = Vec::new();

    q.enqueue(SoundCue::HealthLow, &mut audio, 0, &mut events);

    assert!(audio.played().is_empty());
    assert_eq!(q.pending_len(), 0);
    assert!(matches!(events.as_slice(), [HudEvent::CueDropped { .. }]));
}

#[test]
fn cancel_stops_matching_cue_and_dequeues_every_copy() {
    let (mut q, mut audio, mut events) = queue();
    q.enqueue(SoundCue::HealthLow, &mut audio, 0, &mut events);
    q.enqueue(SoundCue::HealthLow, &mut audio, 10, &mut events);
    q.enqueue(SoundCue::MeteorInbound, &mut audio, 20, &mut events);
    q.enqueue(SoundCue::HealthLow, &mut audio, 30, &mut events);

    q.cancel(SoundCue::HealthLow, &mut audio, 40, &mut events);

    assert_eq!(audio.stopped(), &[SoundCue::HealthLow]);
    assert!(q.current().is_none());
    assert_eq!(pending(&q), vec![SoundCue::MeteorInbound]);
    assert!(matches!(
        events.last(),
        Some(HudEvent::CueCancelled { stopped: true, dequeued: 2, .. })
    ));
}

#[test]
fn cancel_after_cue_finished_reports_nothing() {
    let (mut q, mut audio, mut events) = queue();
    q.enqueue(SoundCue::HealthLow, &mut audio, 0, &mut events);
    audio.advance(2000); // voice ran to completion
    let before = events.len();

    q.cancel(SoundCue::HealthLow, &mut audio, 2000, &mut events);

    assert!(audio.stopped().is_empty(), "a finished voice is not stopped");
    assert!(q.current().is_none());
    assert_eq!(events.len(), before, "nothing was audible or queued");
}

#[test]
fn cancel_of_finished_cue_still_dequeues_copies() {
    let (mut q, mut audio, mut events) = queue();
    q.enqueue(SoundCue::HealthLow, &mut audio, 0, &mut events);
    q.enqueue(SoundCue::HealthLow, &mut audio, 10, &mut events);
    audio.advance(2000);

    q.cancel(SoundCue::HealthLow, &mut audio, 2010, &mut events);

    assert!(audio.stopped().is_empty());
    assert_eq!(q.pending_len(), 0);
    assert!(matches!(
        events.last(),
        Some(HudEvent::CueCancelled { stopped: false, dequeued: 1, .. })
    ));
}

#[test]
fn cancel_of_other_cue_leaves_playing_sound_alone() {
    let (mut q, mut audio, mut events) = queue();
    q.enqueue(SoundCue::HealthLow, &mut audio, 0, &mut events);
    let before = events.len();

    q.cancel(SoundCue::MeteorInbound, &mut audio, 10, &mut events);

    assert!(audio.stopped().is_empty());
    assert_eq!(audio.playing_cue(), Some(SoundCue::HealthLow));
    assert_eq!(events.len(), before, "nothing cancelled, nothing reported");
}

#[test]
fn clear_force_stops_and_empties() {
    let (mut q, mut audio, mut events) = queue();
    q.enqueue(SoundCue::HealthLow, &mut audio, 0, &mut events);
    q.enqueue(SoundCue::MeteorInbound, &mut audio, 10, &mut events);

    q.clear(&mut audio);

    assert_eq!(q.pending_len(), 0);
    assert!(q.current().is_none());
    assert_eq!(audio.stopped(), &[SoundCue::HealthLow]);
}

/// Backend that never hands out a voice.
struct MuteBackend;

impl AudioOutput for MuteBackend {
    fn hud_warnings_enabled(&self) -> bool { true }
    fn play_sound(&mut self, _cue: SoundCue) -> Option<VoiceHandle> { None }
    fn is_playing(&self, _voice: VoiceHandle) -> bool { false }
    fn stop(&mut self, _voice: VoiceHandle, _force: bool) {}
}

#[test]
fn missing_voice_handle_counts_as_nothing_playing() {
    let mut q = SoundQueue::new(COOLDOWN);
    let mut audio = MuteBackend;
    let mut events = Vec::new();

    q.enqueue(SoundCue::HealthLow, &mut audio, 0, &mut events);
    assert!(q.current().is_none());
    assert!(q.is_idle(&audio));
    // The dispatch still stamps the cooldown.
    assert_eq!(q.last_dispatch_ms(), Some(0));

    q.enqueue(SoundCue::HealthCritical, &mut audio, 100, &mut events);
    assert_eq!(q.pending_len(), 1);
}

//! Scheduler tests: throttling, group order, cue queue servicing,
//! headless mode and session teardown.

use hud_warnings::{
    audio::RecordingAudio,
    condition::Detection,
    config::{SchedulerConfig, WarningTiming, WarningsConfig},
    cue::{SoundCue, TextId},
    error::WarnError,
    event::HudEvent,
    group::WarningGroup,
    notification::HudNotifications,
    scheduler::{HostFrame, WarningScheduler},
    status::{CharacterStatus, PlayerStatus},
    types::{GroupId, Millis},
    warning::Warning,
};
use std::sync::{
    atomic::{AtomicBool, AtomicUsize, Ordering},
    Arc, Mutex,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// One host update per arbitration pass, 480ms apart.
fn every_frame() -> SchedulerConfig {
    SchedulerConfig {
        frames_between_update: 1,
        step_ms:               480,
        cue_cooldown_ms:       5000,
    }
}

struct Host {
    status:     PlayerStatus,
    audio:      RecordingAudio,
    hud:        HudNotifications,
    game_ready: bool,
    dedicated:  bool,
}

impl Host {
    fn new() -> Self {
        Self {
            status:     PlayerStatus::default(),
            audio:      RecordingAudio::new(2000),
            hud:        HudNotifications::new(),
            game_ready: true,
            dedicated:  false,
        }
    }

    fn update(&mut self, scheduler: &mut WarningScheduler) -> Vec<HudEvent> {
        let step = scheduler.config().step_ms;
        self.audio.advance(step);
        self.hud.advance(step);
        scheduler.on_update(HostFrame {
            status:        &self.status,
            game_ready:    self.game_ready,
            dedicated:     self.dedicated,
            audio:         &mut self.audio,
            notifications: &mut self.hud,
        })
    }

    fn run(&mut self, scheduler: &mut WarningScheduler, frames: usize) -> Vec<HudEvent> {
        (0..frames).flat_map(|_| self.update(scheduler)).collect()
    }
}

struct Tracker {
    on:    Arc<AtomicBool>,
    calls: Arc<AtomicUsize>,
}

fn tracked_group(name: &str, cue: SoundCue, timing: WarningTiming) -> (WarningGroup, Tracker) {
    let on = Arc::new(AtomicBool::new(true));
    let calls = Arc::new(AtomicUsize::new(0));
    let (on_c, calls_c) = (on.clone(), calls.clone());
    let condition = move |_: &PlayerStatus| -> Option<Detection> {
        calls_c.fetch_add(1, Ordering::SeqCst);
        on_c.load(Ordering::SeqCst)
            .then(|| Detection::new(cue, TextId::Blank))
    };
    let warning = Warning::new(name, condition, &timing);
    (WarningGroup::new(name, vec![warning], false), Tracker { on, calls })
}

fn dispatched(events: &[HudEvent]) -> Vec<(SoundCue, bool)> {
    events
        .iter()
        .filter_map(|e| match e {
            HudEvent::CueDispatched { cue, from_queue, .. } => Some((*cue, *from_queue)),
            _ => None,
        })
        .collect()
}

#[test]
fn arbitration_runs_every_nth_frame_only() {
    init_logging();
    let mut scheduler = WarningScheduler::new(SchedulerConfig::default()).unwrap();
    let (group, tracker) = tracked_group("g", SoundCue::HealthLow, WarningTiming::new(0, 0));
    scheduler.register_group(group);
    let mut host = Host::new();

    host.run(&mut scheduler, 29);
    assert_eq!(tracker.calls.load(Ordering::SeqCst), 0);

    host.run(&mut scheduler, 1);
    assert_eq!(tracker.calls.load(Ordering::SeqCst), 1);

    host.run(&mut scheduler, 30);
    assert_eq!(tracker.calls.load(Ordering::SeqCst), 2);
    assert_eq!(scheduler.update_counter(), 60);
    assert_eq!(scheduler.clock().now_ms(), 60 * 16);
}

#[test]
fn groups_update_in_registration_order() {
    let order = Arc::new(Mutex::new(Vec::new()));
    let mut scheduler = WarningScheduler::new(every_frame()).unwrap();
    for name in ["first", "second", "third"] {
        let log = order.clone();
        let condition = move |_: &PlayerStatus| -> Option<Detection> {
            log.lock().unwrap().push(name);
            None
        };
        let warning = Warning::new(name, condition, &WarningTiming::new(0, 0));
        scheduler.register_group(WarningGroup::new(name, vec![warning], false));
    }

    Host::new().update(&mut scheduler);
    assert_eq!(*order.lock().unwrap(), ["first", "second", "third"]);
}

#[test]
fn cues_across_groups_never_overlap_and_respect_cooldown() {
    let mut scheduler = WarningScheduler::new(every_frame()).unwrap();
    let (a, _pa) = tracked_group("a", SoundCue::HealthCritical, WarningTiming::new(0, 0));
    let (b, _pb) = tracked_group("b", SoundCue::MeteorInbound, WarningTiming::new(0, 0));
    scheduler.register_group(a);
    scheduler.register_group(b);
    let mut host = Host::new();

    // Frame 1 starts both, frame 2 signals both: first plays, second queues.
    let events = host.run(&mut scheduler, 2);
    assert_eq!(dispatched(&events), vec![(SoundCue::HealthCritical, false)]);
    assert_eq!(scheduler.sounds().pending_len(), 1);

    // First dispatch at 960ms; the queued cue waits until 5960ms (frame 13).
    let events = host.run(&mut scheduler, 10);
    assert!(dispatched(&events).is_empty());

    let events = host.run(&mut scheduler, 1);
    assert_eq!(dispatched(&events), vec![(SoundCue::MeteorInbound, true)]);
    assert_eq!(scheduler.sounds().pending_len(), 0);
}

/// Cancellation matches cue values, not requesters: a warning whose
/// hazard clears silences another group's identical cue.
#[test]
fn shared_cue_is_cancelled_across_groups() {
    let mut scheduler = WarningScheduler::new(every_frame()).unwrap();
    let (a, _pa) = tracked_group("a", SoundCue::HealthLow, WarningTiming::new(0, 0));
    let (b, pb) = tracked_group("b", SoundCue::HealthLow, WarningTiming::new(0, 0));
    scheduler.register_group(a);
    scheduler.register_group(b);
    let mut host = Host::new();

    host.run(&mut scheduler, 2);
    assert_eq!(host.audio.playing_cue(), Some(SoundCue::HealthLow));
    assert_eq!(scheduler.sounds().pending_len(), 1);

    pb.on.store(false, Ordering::SeqCst);
    let events = host.run(&mut scheduler, 1);

    assert_eq!(host.audio.stopped(), &[SoundCue::HealthLow], "group a's cue was stopped too");
    assert_eq!(scheduler.sounds().pending_len(), 0);
    assert!(events
        .iter()
        .any(|e| matches!(e, HudEvent::CueCancelled { stopped: true, dequeued: 1, .. })));
}

#[test]
fn headless_host_clears_everything_without_detecting() {
    let mut scheduler = WarningScheduler::new(every_frame()).unwrap();
    let (group, tracker) = tracked_group("g", SoundCue::HealthLow, WarningTiming::new(0, 0));
    scheduler.register_group(group);
    let mut host = Host::new();
    scheduler.enqueue_sound(SoundCue::MeteorInbound, &mut host.audio);
    scheduler.enqueue_sound(SoundCue::HealthLow, &mut host.audio);
    assert_eq!(scheduler.sounds().pending_len(), 1);

    host.dedicated = true;
    let events = host.run(&mut scheduler, 3);

    assert_eq!(tracker.calls.load(Ordering::SeqCst), 0);
    assert_eq!(scheduler.groups().count(), 0);
    assert_eq!(scheduler.sounds().pending_len(), 0);
    assert_eq!(scheduler.update_counter(), 0, "throttle counter does not run headless");
    assert!(matches!(events.as_slice(), [HudEvent::GroupsCleared { groups: 1, .. }]));
}

#[test]
fn not_ready_game_skips_groups() {
    let mut scheduler = WarningScheduler::new(every_frame()).unwrap();
    let (group, tracker) = tracked_group("g", SoundCue::HealthLow, WarningTiming::new(0, 0));
    scheduler.register_group(group);
    let mut host = Host::new();
    host.game_ready = false;

    host.run(&mut scheduler, 5);
    assert_eq!(tracker.calls.load(Ordering::SeqCst), 0);
}

#[test]
fn teardown_stops_sound_and_forgets_groups() {
    let mut scheduler = WarningScheduler::new(every_frame()).unwrap();
    let (a, _pa) = tracked_group("a", SoundCue::HealthLow, WarningTiming::new(0, 0));
    let (b, _pb) = tracked_group("b", SoundCue::MeteorInbound, WarningTiming::new(0, 0));
    scheduler.register_group(a);
    scheduler.register_group(b);
    let mut host = Host::new();
    host.run(&mut scheduler, 2);
    assert_eq!(scheduler.sounds().pending_len(), 1);

    let events = scheduler.teardown(&mut host.audio);

    assert_eq!(scheduler.groups().count(), 0);
    assert_eq!(scheduler.sounds().pending_len(), 0);
    assert!(scheduler.sounds().current().is_none());
    assert_eq!(host.audio.stopped(), &[SoundCue::HealthLow]);
    assert!(matches!(events.as_slice(), [HudEvent::GroupsCleared { groups: 2, .. }]));
}

#[test]
fn unregister_removes_group_and_rejects_unknown_ids() {
    let mut scheduler = WarningScheduler::new(every_frame()).unwrap();
    let (group, _tracker) = tracked_group("g", SoundCue::HealthLow, WarningTiming::new(0, 0));
    let id = scheduler.register_group(group);

    let removed = scheduler.unregister_group(id).unwrap();
    assert_eq!(removed.name(), "g");
    assert!(scheduler.group(id).is_none());
    assert!(matches!(
        scheduler.unregister_group(id),
        Err(WarnError::GroupNotFound { .. })
    ));
    assert!(scheduler.unregister_group(GroupId(999)).is_err());
}

#[test]
fn build_registers_enabled_standard_groups() {
    let scheduler = WarningScheduler::build(&WarningsConfig::default()).unwrap();
    let names: Vec<_> = scheduler.groups().map(|(_, g)| g.name().to_string()).collect();
    assert_eq!(names, ["health", "energy", "meteor"]);

    let mut config = WarningsConfig::default();
    config.meteor.enabled = false;
    let scheduler = WarningScheduler::build(&config).unwrap();
    assert_eq!(scheduler.groups().count(), 2);
}

#[test]
fn build_rejects_invalid_config() {
    let mut config = WarningsConfig::default();
    config.scheduler.frames_between_update = 0;
    assert!(matches!(
        WarningScheduler::build(&config),
        Err(WarnError::InvalidConfig { .. })
    ));
}

#[test]
fn new_rejects_zero_throttle_and_zero_step() {
    let zero_throttle = SchedulerConfig { frames_between_update: 0, ..every_frame() };
    assert!(matches!(
        WarningScheduler::new(zero_throttle),
        Err(WarnError::InvalidConfig { field: "scheduler.frames_between_update", .. })
    ));

    let zero_step = SchedulerConfig { step_ms: 0, ..every_frame() };
    assert!(matches!(
        WarningScheduler::new(zero_step),
        Err(WarnError::InvalidConfig { field: "scheduler.step_ms", .. })
    ));
}

#[test]
fn critical_health_wins_over_low_health_end_to_end() {
    init_logging();
    let mut scheduler = WarningScheduler::build(&WarningsConfig::default()).unwrap();
    let mut host = Host::new();
    host.status.character = Some(CharacterStatus {
        health_ratio: 0.1,
        ..CharacterStatus::default()
    });

    let events = host.run(&mut scheduler, 60);

    assert_eq!(dispatched(&events), vec![(SoundCue::HealthCritical, false)]);
    assert!(!host.audio.played().contains(&SoundCue::HealthLow));
    let started: Vec<Millis> = events
        .iter()
        .filter_map(|e| match e {
            HudEvent::WarningStarted { at_ms, .. } => Some(*at_ms),
            _ => None,
        })
        .collect();
    assert_eq!(started, vec![480], "critical health starts on the first arbitration pass");
}

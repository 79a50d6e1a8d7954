//! The warning scheduler: owns every group and the global cue slot.
//!
//! EXECUTION ORDER (per host update):
//!   1. Advance the game clock by one frame.
//!   2. Headless host: drop all groups and pending cues, stop.
//!   3. Every `frames_between_update`th frame only:
//!      a. update each group in registration order,
//!      b. dispatch the head of the cue queue if the cooldown elapsed.
//!
//! RULES:
//!   - One scheduler per session. It is built on session load and torn
//!     down on session unload; nothing about it is global.
//!   - The frame-count throttle and the millisecond accumulators are
//!     separate units. Only the throttle counts frames.

use crate::{
    audio::AudioOutput,
    clock::GameClock,
    config::{SchedulerConfig, WarningsConfig},
    context::TickContext,
    cue::SoundCue,
    error::{WarnError, WarnResult},
    event::HudEvent,
    group::WarningGroup,
    notification::NotificationSurface,
    sound_queue::SoundQueue,
    standard,
    status::PlayerStatus,
    types::{GroupId, Tick},
};

/// What the host supplies on every update call.
pub struct HostFrame<'a> {
    pub status:        &'a PlayerStatus,
    pub game_ready:    bool,
    /// Dedicated server: no local player to warn.
    pub dedicated:     bool,
    pub audio:         &'a mut dyn AudioOutput,
    pub notifications: &'a mut dyn NotificationSurface,
}

pub struct WarningScheduler {
    config:         SchedulerConfig,
    clock:          GameClock,
    groups:         Vec<(GroupId, WarningGroup)>,
    next_group_id:  u64,
    sounds:         SoundQueue,
    update_counter: Tick,
}

impl WarningScheduler {
    /// Fails when the throttle or the step length is zero.
    pub fn new(config: SchedulerConfig) -> WarnResult<Self> {
        config.validate()?;
        Ok(Self {
            clock:          GameClock::new(config.step_ms),
            groups:         Vec::new(),
            next_group_id:  0,
            sounds:         SoundQueue::new(config.cue_cooldown_ms),
            update_counter: 0,
            config,
        })
    }

    /// Build a scheduler with every enabled standard group registered.
    /// Call this on session load instead of new() + manual registration.
    pub fn build(config: &WarningsConfig) -> WarnResult<Self> {
        config.validate()?;
        let mut scheduler = Self::new(config.scheduler.clone())?;

        // Registration order is update order: health, energy, meteor.
        if config.health.enabled {
            scheduler.register_group(standard::health_group(&config.health));
        }
        if config.energy.enabled {
            scheduler.register_group(standard::energy_group(&config.energy));
        }
        if config.meteor.enabled {
            scheduler.register_group(standard::meteor_group(&config.meteor));
        }

        log::info!(
            "warning scheduler built: {} groups, arbitration every {} frames ({}ms)",
            scheduler.groups.len(),
            scheduler.config.frames_between_update,
            scheduler.config.update_interval_ms(),
        );
        Ok(scheduler)
    }

    pub fn register_group(&mut self, group: WarningGroup) -> GroupId {
        self.next_group_id += 1;
        let id = GroupId(self.next_group_id);
        log::debug!("registered {id} '{}' with {} warnings", group.name(), group.len());
        self.groups.push((id, group));
        id
    }

    pub fn unregister_group(&mut self, id: GroupId) -> WarnResult<WarningGroup> {
        let index = self
            .groups
            .iter()
            .position(|(gid, _)| *gid == id)
            .ok_or(WarnError::GroupNotFound { id })?;
        Ok(self.groups.remove(index).1)
    }

    /// Request a cue outside of a group update.
    pub fn enqueue_sound(&mut self, cue: SoundCue, audio: &mut dyn AudioOutput) -> Vec<HudEvent> {
        let mut events = Vec::new();
        self.sounds.enqueue(cue, audio, self.clock.now_ms(), &mut events);
        events
    }

    pub fn cancel_sound(&mut self, cue: SoundCue, audio: &mut dyn AudioOutput) -> Vec<HudEvent> {
        let mut events = Vec::new();
        self.sounds.cancel(cue, audio, self.clock.now_ms(), &mut events);
        events
    }

    /// Host update entry point. Call once per simulation frame.
    pub fn on_update(&mut self, frame: HostFrame<'_>) -> Vec<HudEvent> {
        let mut events = Vec::new();
        self.clock.advance();
        let now_ms = self.clock.now_ms();

        if frame.dedicated {
            if !self.groups.is_empty() {
                events.push(HudEvent::GroupsCleared { at_ms: now_ms, groups: self.groups.len() });
            }
            self.groups.clear();
            self.sounds.clear_pending();
            return events;
        }

        self.update_counter += 1;
        if self.update_counter % self.config.frames_between_update != 0 {
            return events;
        }
        log::trace!("frame={} arbitration pass at {now_ms}ms", self.clock.current_frame);

        let mut ctx = TickContext {
            status:        frame.status,
            now_ms,
            elapsed_ms:    self.config.update_interval_ms(),
            game_ready:    frame.game_ready,
            notifications: frame.notifications,
            audio:         frame.audio,
            sounds:        &mut self.sounds,
            events:        &mut events,
        };
        for (_, group) in &mut self.groups {
            group.update(&mut ctx);
        }
        ctx.sounds.service(&mut *ctx.audio, now_ms, &mut *ctx.events);

        events
    }

    /// Session unload: empty every group, forget them, drop pending cues
    /// and force-stop whatever is playing.
    pub fn teardown(&mut self, audio: &mut dyn AudioOutput) -> Vec<HudEvent> {
        let mut events = Vec::new();
        for (_, group) in &mut self.groups {
            group.clear();
        }
        if !self.groups.is_empty() {
            events.push(HudEvent::GroupsCleared {
                at_ms:  self.clock.now_ms(),
                groups: self.groups.len(),
            });
        }
        self.groups.clear();
        self.sounds.clear(audio);
        log::info!("warning scheduler torn down at {}ms", self.clock.now_ms());
        events
    }

    pub fn group(&self, id: GroupId) -> Option<&WarningGroup> {
        self.groups.iter().find(|(gid, _)| *gid == id).map(|(_, g)| g)
    }

    pub fn group_mut(&mut self, id: GroupId) -> Option<&mut WarningGroup> {
        self.groups.iter_mut().find(|(gid, _)| *gid == id).map(|(_, g)| g)
    }

    pub fn groups(&self) -> impl Iterator<Item = (GroupId, &WarningGroup)> {
        self.groups.iter().map(|(id, g)| (*id, g))
    }

    pub fn sounds(&self) -> &SoundQueue { &self.sounds }
    pub fn clock(&self) -> &GameClock { &self.clock }
    pub fn config(&self) -> &SchedulerConfig { &self.config }
    pub fn update_counter(&self) -> Tick { self.update_counter }
}

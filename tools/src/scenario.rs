//! Simulated player for headless runs.
//!
//! Each frame the player may take damage, drain or recharge the suit
//! battery, hop in and out of a ship cockpit, and drift into meteor
//! storms. Rates are per frame at the default 16ms step.

use crate::rng::{HazardRng, HazardSlot};
use hud_warnings::status::{
    CharacterStatus, CockpitStatus, ControlledEntity, ControlledKind, MeteorTarget, PlayerStatus,
    ProducersState,
};

pub struct SimulatedPlayer {
    pub status: PlayerStatus,
    health:     HazardRng,
    battery:    HazardRng,
    meteor:     HazardRng,
    seat:       HazardRng,
}

impl SimulatedPlayer {
    pub fn new(seed: u64) -> Self {
        let status = PlayerStatus {
            creative_mode:  false,
            oxygen_enabled: true,
            character:      Some(CharacterStatus {
                battery_ratio: 0.12,
                ..CharacterStatus::default()
            }),
            controlled:     Some(ControlledEntity {
                kind:     ControlledKind::Character,
                position: [0.0, 0.0, 0.0],
            }),
            meteor_target:  None,
        };
        Self {
            status,
            health:  HazardRng::new(seed, HazardSlot::Health),
            battery: HazardRng::new(seed, HazardSlot::Battery),
            meteor:  HazardRng::new(seed, HazardSlot::Meteor),
            seat:    HazardRng::new(seed, HazardSlot::Seat),
        }
    }

    /// Advance the simulated world by one frame.
    pub fn step(&mut self) {
        self.step_seat();
        self.step_character();
        self.step_meteor();
    }

    fn step_seat(&mut self) {
        if !self.seat.chance(0.0005) {
            return;
        }
        let Some(controlled) = self.status.controlled.as_mut() else {
            return;
        };
        controlled.kind = match controlled.kind {
            ControlledKind::Character => ControlledKind::Cockpit(CockpitStatus {
                grid_static:          false,
                fuel_remaining_hours: self.seat.range(0.0, 0.2),
                producers:            ProducersState::AllEnabled,
            }),
            _ => ControlledKind::Character,
        };
        log::info!("player now controls {:?}", controlled.kind);
    }

    fn step_character(&mut self) {
        let seated = matches!(
            self.status.controlled.as_ref().map(|c| &c.kind),
            Some(ControlledKind::Cockpit(_))
        );
        let Some(character) = self.status.character.as_mut() else {
            return;
        };

        // Damage bursts, slow regeneration.
        if self.health.chance(0.002) {
            character.health_ratio -= self.health.range(0.1, 0.5);
        } else {
            character.health_ratio += 0.0003;
        }
        character.health_ratio = character.health_ratio.clamp(0.0, 1.0);
        character.is_dead = character.health_ratio <= 0.0;
        if character.is_dead && self.health.chance(0.01) {
            // Respawn.
            character.health_ratio = 1.0;
            character.is_dead = false;
        }

        // Suit drains on foot and charges while seated.
        character.charging = seated;
        if seated {
            character.battery_ratio += 0.001;
        } else {
            character.battery_ratio -= self.battery.range(0.0, 0.00002);
        }
        character.battery_ratio = character.battery_ratio.clamp(0.0, 1.0);

        if let Some(ControlledEntity { kind: ControlledKind::Cockpit(cockpit), .. }) =
            self.status.controlled.as_mut()
        {
            cockpit.fuel_remaining_hours = (cockpit.fuel_remaining_hours - 0.00001).max(0.0);
        }
    }

    fn step_meteor(&mut self) {
        if self.status.meteor_target.is_some() {
            if self.meteor.chance(0.001) {
                log::info!("meteor storm passed");
                self.status.meteor_target = None;
            }
        } else if self.meteor.chance(0.0003) {
            let offset = self.meteor.range(0.0, 2000.0);
            log::info!("meteor storm aimed {offset:.0}m away");
            self.status.meteor_target = Some(MeteorTarget {
                center: [offset, 0.0, 0.0],
                radius: self.meteor.range(100.0, 400.0),
            });
        }
    }
}

//! Warning conditions: hazard detection against a player status snapshot.
//!
//! RULE: detection is pure. A condition reads the snapshot and returns
//! what to say and play; it never touches the HUD, audio, or timers.

use crate::{
    cue::{SoundCue, TextId},
    status::{ControlledKind, PlayerStatus},
};

/// What an active hazard wants shown and played.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Detection {
    pub cue:  SoundCue,
    pub text: TextId,
}

impl Detection {
    pub fn new(cue: SoundCue, text: TextId) -> Self {
        Self { cue, text }
    }
}

/// The contract every hazard check fulfills.
pub trait WarningCondition: Send {
    /// Returns `Some` while the hazard is active, `None` otherwise.
    fn detect(&self, status: &PlayerStatus) -> Option<Detection>;
}

impl<F> WarningCondition for F
where
    F: Fn(&PlayerStatus) -> Option<Detection> + Send,
{
    fn detect(&self, status: &PlayerStatus) -> Option<Detection> {
        self(status)
    }
}

// ── Health ────────────────────────────────────────────────────────

/// Local character alive with health ratio strictly below `threshold`.
#[derive(Debug, Clone)]
pub struct HealthBelow {
    pub threshold: f32,
    pub cue:       SoundCue,
    pub text:      TextId,
}

impl WarningCondition for HealthBelow {
    fn detect(&self, status: &PlayerStatus) -> Option<Detection> {
        let character = status.character.as_ref()?;
        (character.health_ratio < self.threshold && !character.is_dead)
            .then(|| Detection::new(self.cue, self.text))
    }
}

// ── Energy ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnergyLevel {
    Low,
    Critical,
    Empty,
}

/// Suit battery (percent) or cockpit fuel (minutes) below `threshold`.
#[derive(Debug, Clone)]
pub struct EnergyBelow {
    pub threshold: f32,
    pub level:     EnergyLevel,
}

impl EnergyBelow {
    fn under_threshold(&self, status: &PlayerStatus) -> bool {
        if status.creative_mode {
            return false;
        }
        let Some(controlled) = status.controlled.as_ref() else {
            return false;
        };
        match &controlled.kind {
            ControlledKind::Character => {
                let Some(character) = status.character.as_ref() else {
                    return false;
                };
                if character.charging {
                    return false;
                }
                character.battery_ratio * 100.0 < self.threshold && !character.is_dead
            }
            ControlledKind::Cockpit(cockpit) => {
                cockpit.fuel_remaining_hours * 60.0 < self.threshold
                    && cockpit.producers.any_enabled()
            }
            ControlledKind::Other => false,
        }
    }

    fn suit_text(&self, status: &PlayerStatus) -> TextId {
        let no_damage = status.oxygen_matters();
        match (self.level, no_damage) {
            (EnergyLevel::Low, false)      => TextId::SuitEnergyLow,
            (EnergyLevel::Low, true)       => TextId::SuitEnergyLowNoDamage,
            (EnergyLevel::Critical, false) => TextId::SuitEnergyCritical,
            (EnergyLevel::Critical, true)  => TextId::SuitEnergyCriticalNoDamage,
            (EnergyLevel::Empty, _)        => TextId::EnergyEmpty,
        }
    }
}

impl WarningCondition for EnergyBelow {
    fn detect(&self, status: &PlayerStatus) -> Option<Detection> {
        if !self.under_threshold(status) {
            return None;
        }
        // under_threshold already proved a controlled entity exists.
        let controlled = status.controlled.as_ref()?;
        match &controlled.kind {
            ControlledKind::Character => {
                let cue = match self.level {
                    EnergyLevel::Low      => SoundCue::SuitEnergyLow,
                    EnergyLevel::Critical => SoundCue::SuitEnergyCritical,
                    EnergyLevel::Empty    => SoundCue::SuitEnergyEmpty,
                };
                Some(Detection::new(cue, self.suit_text(status)))
            }
            ControlledKind::Cockpit(cockpit) => {
                let cue = match (self.level, cockpit.grid_static) {
                    (EnergyLevel::Low, true)       => SoundCue::StationFuelLow,
                    (EnergyLevel::Low, false)      => SoundCue::ShipFuelLow,
                    (EnergyLevel::Critical, true)  => SoundCue::StationFuelCritical,
                    (EnergyLevel::Critical, false) => SoundCue::ShipFuelCritical,
                    (EnergyLevel::Empty, true)     => SoundCue::StationFuelEmpty,
                    (EnergyLevel::Empty, false)    => SoundCue::ShipFuelEmpty,
                };
                let text = match self.level {
                    EnergyLevel::Empty => TextId::FuelEmpty,
                    _                  => self.suit_text(status),
                };
                Some(Detection::new(cue, text))
            }
            ControlledKind::Other => None,
        }
    }
}

// ── Meteor storm ──────────────────────────────────────────────────

/// Controlled entity within `2 * radius + margin_m` of the storm target.
#[derive(Debug, Clone)]
pub struct MeteorInbound {
    pub margin_m: f32,
}

impl WarningCondition for MeteorInbound {
    fn detect(&self, status: &PlayerStatus) -> Option<Detection> {
        let target = status.meteor_target.as_ref()?;
        let controlled = status.controlled.as_ref()?;
        let dist = distance(target.center, controlled.position);
        (dist < 2.0 * target.radius + self.margin_m)
            .then(|| Detection::new(SoundCue::MeteorInbound, TextId::MeteorInbound))
    }
}

fn distance(a: [f32; 3], b: [f32; 3]) -> f32 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f32>()
        .sqrt()
}

//! Player status snapshot: the game-simulation values warnings read.
//!
//! The host fills one of these per frame. Every field that can be absent
//! in the game (no local character, nothing controlled, no meteor storm)
//! is an Option, and conditions treat absence as "not detected".

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerStatus {
    pub creative_mode:  bool,
    /// Session setting: oxygen simulation is on.
    pub oxygen_enabled: bool,
    pub character:      Option<CharacterStatus>,
    pub controlled:     Option<ControlledEntity>,
    pub meteor_target:  Option<MeteorTarget>,
}

impl PlayerStatus {
    /// True when the local character breathes and the session simulates oxygen.
    /// Energy texts switch to their "no damage" variants in that case.
    pub fn oxygen_matters(&self) -> bool {
        self.oxygen_enabled
            && self.character.as_ref().is_some_and(|c| c.needs_oxygen)
    }
}

/// The local player's character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterStatus {
    /// Health in [0.0, 1.0].
    pub health_ratio:  f32,
    pub is_dead:       bool,
    /// Suit battery remaining capacity over maximum capacity, in [0.0, 1.0].
    pub battery_ratio: f32,
    /// The suit is receiving power (standing in a charger, seated, ...).
    pub charging:      bool,
    pub needs_oxygen:  bool,
}

impl Default for CharacterStatus {
    fn default() -> Self {
        Self {
            health_ratio:  1.0,
            is_dead:       false,
            battery_ratio: 1.0,
            charging:      false,
            needs_oxygen:  true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlledEntity {
    pub kind:     ControlledKind,
    pub position: [f32; 3],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ControlledKind {
    Character,
    Cockpit(CockpitStatus),
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CockpitStatus {
    /// Grid is a station rather than a ship.
    pub grid_static:          bool,
    pub fuel_remaining_hours: f32,
    pub producers:            ProducersState,
}

/// Aggregate enabled state of a grid's power producers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProducersState {
    AllEnabled,
    Mixed,
    AllDisabled,
    NoObjects,
}

impl ProducersState {
    pub fn any_enabled(&self) -> bool {
        matches!(self, Self::AllEnabled | Self::Mixed)
    }
}

/// Sphere a meteor storm is currently aimed at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeteorTarget {
    pub center: [f32; 3],
    pub radius: f32,
}

//! Audio cue and HUD text identifiers used by warnings.
//!
//! Cues are compared by value. Two warnings that share a cue can cancel
//! each other's queued or playing sound.

use serde::{Deserialize, Serialize};

/// Voice-over cues the HUD can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoundCue {
    HealthLow,
    HealthCritical,
    SuitEnergyLow,
    SuitEnergyCritical,
    SuitEnergyEmpty,
    ShipFuelLow,
    ShipFuelCritical,
    ShipFuelEmpty,
    StationFuelLow,
    StationFuelCritical,
    StationFuelEmpty,
    MeteorInbound,
}

impl SoundCue {
    /// Stable asset name used by audio backends.
    pub fn asset_name(&self) -> &'static str {
        match self {
            Self::HealthLow           => "hud_voc_health_low",
            Self::HealthCritical      => "hud_voc_health_critical",
            Self::SuitEnergyLow       => "hud_voc_energy_low",
            Self::SuitEnergyCritical  => "hud_voc_energy_crit",
            Self::SuitEnergyEmpty     => "hud_voc_energy_no",
            Self::ShipFuelLow         => "hud_voc_ship_fuel_low",
            Self::ShipFuelCritical    => "hud_voc_ship_fuel_crit",
            Self::ShipFuelEmpty       => "hud_voc_ship_fuel_no",
            Self::StationFuelLow      => "hud_voc_station_fuel_low",
            Self::StationFuelCritical => "hud_voc_station_fuel_crit",
            Self::StationFuelEmpty    => "hud_voc_station_fuel_no",
            Self::MeteorInbound       => "hud_voc_meteor_inbound",
        }
    }
}

/// Notification text keys. Rendering and localization happen elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextId {
    #[default]
    Blank,
    HealthLow,
    HealthCritical,
    SuitEnergyLow,
    SuitEnergyLowNoDamage,
    SuitEnergyCritical,
    SuitEnergyCriticalNoDamage,
    EnergyEmpty,
    FuelEmpty,
    MeteorInbound,
}

impl TextId {
    /// Fallback English text for hosts without localization.
    pub fn default_text(&self) -> &'static str {
        match self {
            Self::Blank                      => "",
            Self::HealthLow                  => "Health low",
            Self::HealthCritical             => "Health critical",
            Self::SuitEnergyLow              => "Energy low, find a charging point",
            Self::SuitEnergyLowNoDamage      => "Energy low, life support will fail soon",
            Self::SuitEnergyCritical         => "Energy critical, find a charging point now",
            Self::SuitEnergyCriticalNoDamage => "Energy critical, life support failing",
            Self::EnergyEmpty                => "No energy",
            Self::FuelEmpty                  => "No fuel",
            Self::MeteorInbound              => "Meteor storm inbound",
        }
    }
}

//! The standard HUD warning groups loaded with every session.
//!
//!   health: critical (p0) > low (p1)
//!   energy: empty (p0) > critical (p1) > low (p2)
//!   meteor: inbound (p0)

use crate::{
    condition::{EnergyBelow, EnergyLevel, HealthBelow, MeteorInbound},
    config::{EnergyGroupConfig, HealthGroupConfig, MeteorGroupConfig},
    cue::{SoundCue, TextId},
    group::WarningGroup,
    warning::Warning,
};

pub fn health_group(config: &HealthGroupConfig) -> WarningGroup {
    let low = Warning::new(
        "health_low",
        HealthBelow {
            threshold: config.low.threshold,
            cue:       SoundCue::HealthLow,
            text:      TextId::HealthLow,
        },
        &config.low.timing,
    );
    let critical = Warning::new(
        "health_critical",
        HealthBelow {
            threshold: config.critical.threshold,
            cue:       SoundCue::HealthCritical,
            text:      TextId::HealthCritical,
        },
        &config.critical.timing,
    );
    WarningGroup::new("health", vec![low, critical], config.can_be_turned_off)
}

pub fn energy_group(config: &EnergyGroupConfig) -> WarningGroup {
    let levels = [
        ("energy_low", &config.low, EnergyLevel::Low),
        ("energy_critical", &config.critical, EnergyLevel::Critical),
        ("energy_empty", &config.empty, EnergyLevel::Empty),
    ];
    let members = levels
        .into_iter()
        .map(|(name, warning, level)| {
            Warning::new(
                name,
                EnergyBelow { threshold: warning.threshold, level },
                &warning.timing,
            )
        })
        .collect();
    WarningGroup::new("energy", members, config.can_be_turned_off)
}

pub fn meteor_group(config: &MeteorGroupConfig) -> WarningGroup {
    let inbound = Warning::new(
        "meteor_inbound",
        MeteorInbound { margin_m: config.safety_margin_m },
        &config.inbound,
    );
    WarningGroup::new("meteor", vec![inbound], config.can_be_turned_off)
}

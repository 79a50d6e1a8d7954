use crate::{
    error::{WarnError, WarnResult},
    types::{Millis, Priority},
};
use serde::{Deserialize, Serialize};

// ── Per-warning timing ────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WarningTiming {
    pub priority:           Priority,
    /// 0 = play once, never repeat.
    pub repeat_interval_ms: Millis,
    /// How long the hazard must persist before the cue plays.
    #[serde(default)]
    pub sound_delay_ms:     Millis,
    /// How long the notification stays visible once shown. 0 = until withdrawn.
    #[serde(default)]
    pub disappear_ms:       Millis,
}

impl WarningTiming {
    pub fn new(priority: Priority, repeat_interval_ms: Millis) -> Self {
        Self {
            priority,
            repeat_interval_ms,
            sound_delay_ms: 0,
            disappear_ms: 0,
        }
    }

    pub fn with_sound_delay(mut self, sound_delay_ms: Millis) -> Self {
        self.sound_delay_ms = sound_delay_ms;
        self
    }

    pub fn with_disappear(mut self, disappear_ms: Millis) -> Self {
        self.disappear_ms = disappear_ms;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdWarning {
    #[serde(flatten)]
    pub timing:    WarningTiming,
    pub threshold: f32,
}

impl ThresholdWarning {
    fn new(priority: Priority, repeat_interval_ms: Millis, disappear_ms: Millis, threshold: f32) -> Self {
        Self {
            timing: WarningTiming::new(priority, repeat_interval_ms).with_disappear(disappear_ms),
            threshold,
        }
    }
}

// ── Scheduler ─────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Arbitration runs on every Nth host update.
    pub frames_between_update: u64,
    /// Length of one host update (simulation step).
    pub step_ms:               Millis,
    /// Minimum game time between two cue dispatches.
    pub cue_cooldown_ms:       Millis,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            frames_between_update: 30,
            step_ms:               16,
            cue_cooldown_ms:       5000,
        }
    }
}

impl SchedulerConfig {
    /// Time that passes between two arbitration passes.
    pub fn update_interval_ms(&self) -> Millis {
        self.step_ms.saturating_mul(self.frames_between_update)
    }

    pub fn validate(&self) -> WarnResult<()> {
        if self.frames_between_update == 0 {
            return Err(invalid("scheduler.frames_between_update", "must be at least 1"));
        }
        if self.step_ms == 0 {
            return Err(invalid("scheduler.step_ms", "must be at least 1"));
        }
        Ok(())
    }
}

// ── Standard groups ───────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthGroupConfig {
    pub enabled:           bool,
    pub can_be_turned_off: bool,
    /// Threshold is a health ratio in [0, 1].
    pub low:               ThresholdWarning,
    pub critical:          ThresholdWarning,
}

impl Default for HealthGroupConfig {
    fn default() -> Self {
        Self {
            enabled:           true,
            can_be_turned_off: false,
            low:               ThresholdWarning::new(1, 60_000, 2500, 0.4),
            critical:          ThresholdWarning::new(0, 30_000, 5000, 0.2),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnergyGroupConfig {
    pub enabled:           bool,
    pub can_be_turned_off: bool,
    /// Threshold is suit battery percent, or cockpit fuel minutes.
    pub low:               ThresholdWarning,
    pub critical:          ThresholdWarning,
    pub empty:             ThresholdWarning,
}

impl Default for EnergyGroupConfig {
    fn default() -> Self {
        Self {
            enabled:           true,
            can_be_turned_off: false,
            low:               ThresholdWarning::new(2, 60_000, 2500, 5.0),
            critical:          ThresholdWarning::new(1, 30_000, 5000, 1.0),
            empty:             ThresholdWarning::new(0, 10_000, 5000, 0.1),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeteorGroupConfig {
    pub enabled:           bool,
    pub can_be_turned_off: bool,
    pub inbound:           WarningTiming,
    /// Extra distance beyond twice the storm radius that still warns.
    pub safety_margin_m:   f32,
}

impl Default for MeteorGroupConfig {
    fn default() -> Self {
        Self {
            enabled:           true,
            can_be_turned_off: false,
            inbound:           WarningTiming::new(0, 10 * 60 * 1000).with_disappear(5000),
            safety_margin_m:   500.0,
        }
    }
}

// ── Top level ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WarningsConfig {
    pub scheduler: SchedulerConfig,
    pub health:    HealthGroupConfig,
    pub energy:    EnergyGroupConfig,
    pub meteor:    MeteorGroupConfig,
}

impl WarningsConfig {
    /// Load and validate a JSON config file. Missing sections take defaults.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        Ok(Self::from_json(&content)?)
    }

    pub fn from_json(content: &str) -> WarnResult<Self> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> WarnResult<()> {
        self.scheduler.validate()?;

        let health = [
            ("health.low.threshold", self.health.low.threshold),
            ("health.critical.threshold", self.health.critical.threshold),
        ];
        for (field, value) in health {
            check_threshold(field, value)?;
            if value > 1.0 {
                return Err(invalid(field, format!("health ratio {value} is above 1.0")));
            }
        }

        check_threshold("energy.low.threshold", self.energy.low.threshold)?;
        check_threshold("energy.critical.threshold", self.energy.critical.threshold)?;
        check_threshold("energy.empty.threshold", self.energy.empty.threshold)?;
        check_threshold("meteor.safety_margin_m", self.meteor.safety_margin_m)?;
        Ok(())
    }
}

fn check_threshold(field: &'static str, value: f32) -> WarnResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(invalid(field, format!("{value} is not a finite, non-negative number")));
    }
    Ok(())
}

fn invalid(field: &'static str, reason: impl Into<String>) -> WarnError {
    WarnError::InvalidConfig { field, reason: reason.into() }
}

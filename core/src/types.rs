//! Shared primitive types used across the warning subsystem.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A simulation frame. One frame = one host update call.
pub type Tick = u64;

/// Game time or a duration, in milliseconds.
pub type Millis = u64;

/// Warning priority. Lower value = more urgent; 0 is the most urgent.
pub type Priority = u32;

/// Stable identity of a single warning.
/// Notifications are keyed by it, so it must survive re-sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WarningId(pub Uuid);

impl WarningId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for WarningId {
    fn default() -> Self { Self::new() }
}

impl fmt::Display for WarningId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Handle returned when a group is registered with the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GroupId(pub u64);

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "group-{}", self.0)
    }
}

//! HUD notification surface.
//!
//! Warnings show and withdraw text through `NotificationSurface`.
//! `HudNotifications` is the in-memory surface used by headless hosts
//! and tests; a real HUD implements the trait over its own widgets.

use crate::{
    cue::TextId,
    types::{Millis, WarningId},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id:           WarningId,
    pub text:         TextId,
    /// 0 = stays visible until removed.
    pub disappear_ms: Millis,
}

pub trait NotificationSurface {
    /// Show `notification`. Adding an id that is already visible restarts its timer.
    fn add(&mut self, notification: &Notification);

    /// Withdraw the notification with this id. Unknown ids are ignored.
    fn remove(&mut self, id: WarningId);
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibleNotification {
    pub notification: Notification,
    /// None when the notification has no disappear time.
    pub remaining_ms: Option<Millis>,
}

#[derive(Debug, Default)]
pub struct HudNotifications {
    visible: Vec<VisibleNotification>,
    /// Total number of add() calls, re-adds included.
    shown_count: u64,
}

impl HudNotifications {
    pub fn new() -> Self { Self::default() }

    /// Count down disappear timers and drop the notifications that expired.
    pub fn advance(&mut self, elapsed_ms: Millis) {
        for entry in &mut self.visible {
            if let Some(remaining) = entry.remaining_ms.as_mut() {
                *remaining = remaining.saturating_sub(elapsed_ms);
            }
        }
        self.visible.retain(|entry| entry.remaining_ms != Some(0));
    }

    pub fn is_visible(&self, id: WarningId) -> bool {
        self.visible.iter().any(|entry| entry.notification.id == id)
    }

    pub fn text_of(&self, id: WarningId) -> Option<TextId> {
        self.visible
            .iter()
            .find(|entry| entry.notification.id == id)
            .map(|entry| entry.notification.text)
    }

    pub fn visible(&self) -> &[VisibleNotification] {
        &self.visible
    }

    pub fn shown_count(&self) -> u64 {
        self.shown_count
    }
}

impl NotificationSurface for HudNotifications {
    fn add(&mut self, notification: &Notification) {
        self.remove(notification.id);
        let remaining_ms = (notification.disappear_ms > 0).then_some(notification.disappear_ms);
        self.visible.push(VisibleNotification {
            notification: notification.clone(),
            remaining_ms,
        });
        self.shown_count += 1;
    }

    fn remove(&mut self, id: WarningId) {
        self.visible.retain(|entry| entry.notification.id != id);
    }
}

//! HUD hazard warnings: detection, per-group priority arbitration and a
//! throttled, single-slot voice cue queue shared by every group.
//!
//! The host builds one `WarningScheduler` per session and calls
//! `on_update` once per simulation frame with a `HostFrame` carrying the
//! player status and the audio / notification surfaces.

pub mod audio;
pub mod clock;
pub mod condition;
pub mod config;
pub mod context;
pub mod cue;
pub mod error;
pub mod event;
pub mod group;
pub mod notification;
pub mod scheduler;
pub mod sound_queue;
pub mod standard;
pub mod status;
pub mod types;
pub mod warning;

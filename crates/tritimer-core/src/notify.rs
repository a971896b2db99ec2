//! Notification and audio cues as data.
//!
//! The engine never talks to the system notification service or an audio
//! device. It attaches [`Cue`] values and notification text to the events
//! it emits, and the presentation layer forwards them to a
//! [`NotificationGateway`]. Gateway failures (denied permission, missing
//! audio device) degrade silently and never reach the engine.

use serde::{Deserialize, Serialize};

/// An audio cue the presentation layer should play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cue {
    /// Played when a fresh session starts.
    StartChime,
    /// HIIT last-seconds beep; the payload is the freshly computed
    /// remaining value (3, 2 or 1).
    CountdownBeep(u8),
    /// Played when the session completes.
    EndAlarm,
}

/// Sink for notification text and audio cues.
///
/// Implementations must not fail loudly; anything environment-dependent
/// (system notifications, audio playback) is the implementor's concern.
pub trait NotificationGateway {
    fn notify(&mut self, text: &str);
    fn cue(&mut self, cue: Cue);
}

/// Gateway that discards everything. Useful in tests and headless runs.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullGateway;

impl NotificationGateway for NullGateway {
    fn notify(&mut self, _text: &str) {}
    fn cue(&mut self, _cue: Cue) {}
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::notify::Cue;
use crate::timer::{Segment, TimerState};

/// Every state change in the engine produces an Event.
/// The presentation layer renders them; the notification gateway consumes
/// the attached `notify` text and [`Cue`]s.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// A fresh session started from Idle.
    Started {
        segment: Segment,
        at: DateTime<Utc>,
    },
    /// A paused session resumed with its frozen remaining time.
    Resumed {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    Paused {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    Reset {
        at: DateTime<Utc>,
    },
    /// Periodic recomputation while running; `cue` carries the HIIT
    /// 3-2-1 beep when one is due this tick.
    Tick {
        remaining_secs: u64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        cue: Option<Cue>,
        at: DateTime<Utc>,
    },
    /// The current segment expired and the sequencer scheduled another.
    PhaseAdvanced {
        segment: Segment,
        notify: String,
        at: DateTime<Utc>,
    },
    /// The sequencer declared the session over.
    Completed {
        notify: String,
        at: DateTime<Utc>,
    },
    /// Full state snapshot for display; produced on demand, not by
    /// state changes.
    StateSnapshot {
        state: TimerState,
        segment: Option<Segment>,
        remaining_secs: u64,
        total_secs: u64,
        progress_ratio: f64,
        at: DateTime<Utc>,
    },
}

impl Event {
    /// Notification text attached to this event, if any.
    pub fn notify_text(&self) -> Option<&str> {
        match self {
            Event::PhaseAdvanced { notify, .. } | Event::Completed { notify, .. } => {
                Some(notify.as_str())
            }
            _ => None,
        }
    }

    /// Audio cue attached to this event, if any.
    pub fn cue(&self) -> Option<Cue> {
        match self {
            Event::Started { .. } => Some(Cue::StartChime),
            Event::Completed { .. } => Some(Cue::EndAlarm),
            Event::Tick { cue, .. } => *cue,
            _ => None,
        }
    }
}

//! Phase sequencing policy.
//!
//! Pure functions mapping (mode config, expired segment) to what comes
//! next. The engine calls [`next`] only at the instant remaining time
//! reaches zero; no decision is ever made on a negative remaining value.

use serde::{Deserialize, Serialize};

use super::duration::Duration;
use super::mode::ModeConfig;

/// The kind of one contiguous timed segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhaseKind {
    Work,
    /// Interval-mode pause between work rounds.
    Break,
    /// HIIT-mode recovery between work rounds.
    Rest,
    /// Plain countdown's single segment.
    Countdown,
}

impl PhaseKind {
    pub fn label(&self) -> &'static str {
        match self {
            PhaseKind::Work => "Work",
            PhaseKind::Break => "Break",
            PhaseKind::Rest => "Rest",
            PhaseKind::Countdown => "Countdown",
        }
    }
}

/// One scheduled segment: what is being timed, in which round, for how long.
///
/// `round` is 1-based and stays within `[1, rounds]` for the modes that
/// have rounds; it is fixed at 1 for plain countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub kind: PhaseKind,
    pub round: u32,
    pub duration: Duration,
}

/// Outcome of a segment expiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextOutcome {
    /// Move to this segment.
    Advance(Segment),
    /// The session is over.
    Finished,
}

/// The opening segment for a mode.
pub fn first(config: &ModeConfig) -> Segment {
    match config {
        ModeConfig::Interval { work, .. } | ModeConfig::Hiit { work, .. } => Segment {
            kind: PhaseKind::Work,
            round: 1,
            duration: *work,
        },
        ModeConfig::Countdown { target } => Segment {
            kind: PhaseKind::Countdown,
            round: 1,
            duration: *target,
        },
    }
}

/// Decide what follows `current` once it has expired.
pub fn next(config: &ModeConfig, current: &Segment) -> NextOutcome {
    match config {
        ModeConfig::Interval { work, rest, rounds } => match current.kind {
            PhaseKind::Work => {
                // The final round has no trailing break.
                if current.round < *rounds {
                    NextOutcome::Advance(Segment {
                        kind: PhaseKind::Break,
                        round: current.round,
                        duration: *rest,
                    })
                } else {
                    NextOutcome::Finished
                }
            }
            PhaseKind::Break => {
                if current.round < *rounds {
                    NextOutcome::Advance(Segment {
                        kind: PhaseKind::Work,
                        round: current.round + 1,
                        duration: *work,
                    })
                } else {
                    // A break is never scheduled on the last round.
                    NextOutcome::Finished
                }
            }
            _ => NextOutcome::Finished,
        },
        ModeConfig::Hiit { work, rest, rounds } => match current.kind {
            PhaseKind::Work => {
                if current.round == *rounds {
                    NextOutcome::Finished
                } else if rest.is_zero() {
                    // Zero-length rests are elided, not displayed.
                    NextOutcome::Advance(Segment {
                        kind: PhaseKind::Work,
                        round: current.round + 1,
                        duration: *work,
                    })
                } else {
                    NextOutcome::Advance(Segment {
                        kind: PhaseKind::Rest,
                        round: current.round,
                        duration: *rest,
                    })
                }
            }
            PhaseKind::Rest => {
                if current.round < *rounds {
                    NextOutcome::Advance(Segment {
                        kind: PhaseKind::Work,
                        round: current.round + 1,
                        duration: *work,
                    })
                } else {
                    NextOutcome::Finished
                }
            }
            _ => NextOutcome::Finished,
        },
        ModeConfig::Countdown { .. } => NextOutcome::Finished,
    }
}

/// Notification text for a phase transition into `new`.
pub fn advance_text(config: &ModeConfig, new: &Segment) -> String {
    let rounds = config.rounds().unwrap_or(1);
    match new.kind {
        PhaseKind::Break => "Work time over -- take a break".to_string(),
        PhaseKind::Rest => "Work time over -- rest".to_string(),
        PhaseKind::Work => format!("Break over -- starting round {}/{}", new.round, rounds),
        PhaseKind::Countdown => String::new(),
    }
}

/// Notification text for a completed session.
pub fn completed_text(config: &ModeConfig) -> String {
    match config {
        ModeConfig::Interval { .. } => "Interval session complete -- all rounds finished".into(),
        ModeConfig::Hiit { .. } => "HIIT session complete -- all rounds finished".into(),
        ModeConfig::Countdown { .. } => "Time is up".into(),
    }
}

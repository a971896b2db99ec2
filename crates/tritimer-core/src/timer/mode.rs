//! Per-mode timer configuration.

use serde::{Deserialize, Serialize};

use super::duration::Duration;
use crate::error::TimerError;

/// Immutable configuration for one timer mode.
///
/// Validated at `configure()` time; a `ModeConfig` held by a running
/// engine is always valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum ModeConfig {
    /// Work/break cycling (pomodoro-style). The final round has no
    /// trailing break.
    Interval {
        work: Duration,
        rest: Duration,
        rounds: u32,
    },
    /// High-intensity interval training. Zero-length rests are elided
    /// entirely rather than scheduled.
    Hiit {
        work: Duration,
        rest: Duration,
        rounds: u32,
    },
    /// A single plain countdown segment.
    Countdown { target: Duration },
}

impl ModeConfig {
    /// Defaults from the classic pomodoro: 25 minutes work, 5 minutes
    /// break, 4 rounds.
    pub fn default_interval() -> Self {
        ModeConfig::Interval {
            work: Duration::from_parts(0, 25, 0),
            rest: Duration::from_parts(0, 5, 0),
            rounds: 4,
        }
    }

    /// Defaults from the classic tabata protocol: 20s on, 10s off, 8 rounds.
    pub fn default_hiit() -> Self {
        ModeConfig::Hiit {
            work: Duration::from_secs(20),
            rest: Duration::from_secs(10),
            rounds: 8,
        }
    }

    /// Check the mode's parameter requirements.
    ///
    /// # Errors
    ///
    /// Returns [`TimerError::InvalidConfiguration`] naming the offending
    /// field. The caller's state is never touched here.
    pub fn validate(&self) -> Result<(), TimerError> {
        match self {
            ModeConfig::Interval { work, rounds, .. } => {
                if *rounds == 0 {
                    return Err(TimerError::invalid("rounds", "must be at least 1"));
                }
                if work.is_zero() {
                    return Err(TimerError::invalid("work", "must be greater than zero"));
                }
                Ok(())
            }
            ModeConfig::Hiit { work, rounds, .. } => {
                if *rounds == 0 {
                    return Err(TimerError::invalid("rounds", "must be at least 1"));
                }
                if work.is_zero() {
                    return Err(TimerError::invalid("work", "must be at least 1 second"));
                }
                Ok(())
            }
            ModeConfig::Countdown { target } => {
                if target.is_zero() {
                    return Err(TimerError::invalid("target", "must be greater than zero"));
                }
                Ok(())
            }
        }
    }

    /// Total rounds, where rounds apply.
    pub fn rounds(&self) -> Option<u32> {
        match self {
            ModeConfig::Interval { rounds, .. } | ModeConfig::Hiit { rounds, .. } => Some(*rounds),
            ModeConfig::Countdown { .. } => None,
        }
    }

    pub fn mode_name(&self) -> &'static str {
        match self {
            ModeConfig::Interval { .. } => "interval",
            ModeConfig::Hiit { .. } => "hiit",
            ModeConfig::Countdown { .. } => "countdown",
        }
    }
}

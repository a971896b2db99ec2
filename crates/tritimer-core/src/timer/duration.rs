//! Non-negative time spans in whole seconds.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A whole-second time span, never negative by construction.
///
/// All arithmetic is total: interactive adjustment clamps per field
/// (seconds and minutes 0-59, hours 0-23) and decrement saturates at zero.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Duration {
    secs: u64,
}

/// A display field of a duration, for interactive up/down adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Hours,
    Minutes,
    Seconds,
}

impl Duration {
    pub const ZERO: Duration = Duration { secs: 0 };

    pub const fn from_secs(secs: u64) -> Self {
        Self { secs }
    }

    /// Build from hour/minute/second parts. Saturates on overflow.
    pub const fn from_parts(hours: u64, minutes: u64, seconds: u64) -> Self {
        Self {
            secs: hours
                .saturating_mul(3600)
                .saturating_add(minutes.saturating_mul(60))
                .saturating_add(seconds),
        }
    }

    pub const fn as_secs(&self) -> u64 {
        self.secs
    }

    pub const fn as_millis(&self) -> u64 {
        self.secs.saturating_mul(1000)
    }

    pub const fn is_zero(&self) -> bool {
        self.secs == 0
    }

    /// Decompose into `(hours, minutes, seconds)`.
    pub const fn parts(&self) -> (u64, u64, u64) {
        (self.secs / 3600, (self.secs % 3600) / 60, self.secs % 60)
    }

    /// Increment one display field, clamped at its maximum
    /// (59 for minutes/seconds, 23 for hours).
    pub fn increment(&self, field: Field) -> Self {
        let (h, m, s) = self.parts();
        match field {
            Field::Hours => Self::from_parts((h + 1).min(23), m, s),
            Field::Minutes => Self::from_parts(h, (m + 1).min(59), s),
            Field::Seconds => Self::from_parts(h, m, (s + 1).min(59)),
        }
    }

    /// Decrement one display field, saturating at zero.
    pub fn decrement(&self, field: Field) -> Self {
        let (h, m, s) = self.parts();
        match field {
            Field::Hours => Self::from_parts(h.saturating_sub(1), m, s),
            Field::Minutes => Self::from_parts(h, m.saturating_sub(1), s),
            Field::Seconds => Self::from_parts(h, m, s.saturating_sub(1)),
        }
    }
}

impl fmt::Display for Duration {
    /// `MM:SS`, or `HH:MM:SS` once an hour component is present.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (h, m, s) = self.parts();
        if h > 0 {
            write!(f, "{h:02}:{m:02}:{s:02}")
        } else {
            write!(f, "{m:02}:{s:02}")
        }
    }
}

impl FromStr for Duration {
    type Err = String;

    /// Accepts `SS`, `MM:SS` or `HH:MM:SS`.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = input.split(':').collect();
        let parse = |p: &str| {
            p.parse::<u64>()
                .map_err(|_| format!("invalid duration component '{p}'"))
        };
        match parts.as_slice() {
            [s] => Ok(Self::from_secs(parse(s)?)),
            [m, s] => Ok(Self::from_parts(0, parse(m)?, parse(s)?)),
            [h, m, s] => Ok(Self::from_parts(parse(h)?, parse(m)?, parse(s)?)),
            _ => Err(format!("invalid duration '{input}', expected [HH:]MM:SS")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parts_roundtrip() {
        let d = Duration::from_parts(1, 30, 45);
        assert_eq!(d.as_secs(), 5445);
        assert_eq!(d.parts(), (1, 30, 45));
    }

    #[test]
    fn increment_clamps_at_field_max() {
        let d = Duration::from_parts(23, 59, 59);
        assert_eq!(d.increment(Field::Hours), d);
        assert_eq!(d.increment(Field::Minutes), d);
        assert_eq!(d.increment(Field::Seconds), d);
    }

    #[test]
    fn decrement_saturates_at_zero() {
        let d = Duration::ZERO;
        assert_eq!(d.decrement(Field::Hours), d);
        assert_eq!(d.decrement(Field::Minutes), d);
        assert_eq!(d.decrement(Field::Seconds), d);
    }

    #[test]
    fn display_omits_zero_hours() {
        assert_eq!(Duration::from_parts(0, 25, 0).to_string(), "25:00");
        assert_eq!(Duration::from_parts(2, 5, 9).to_string(), "02:05:09");
    }

    #[test]
    fn parse_forms() {
        assert_eq!("90".parse::<Duration>().unwrap().as_secs(), 90);
        assert_eq!("25:00".parse::<Duration>().unwrap().as_secs(), 1500);
        assert_eq!("1:00:00".parse::<Duration>().unwrap().as_secs(), 3600);
        assert!("1:2:3:4".parse::<Duration>().is_err());
        assert!("abc".parse::<Duration>().is_err());
    }
}

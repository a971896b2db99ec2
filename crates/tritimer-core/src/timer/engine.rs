//! Timer engine implementation.
//!
//! The timer engine is a wall-clock-based state machine. It does not use
//! internal threads - the caller is responsible for calling `tick()`
//! periodically. Remaining time is recomputed from the stored absolute
//! deadline on every tick, never decremented, so a tick that arrives late
//! (suspended process, throttled loop) still reports the correct value.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running <-> Paused
//! Running -> Completed
//! any -> Idle (reset)
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = TimerEngine::new();
//! engine.configure(ModeConfig::default_interval())?;
//! engine.start()?;
//! // In a loop, nominally 10x per second:
//! engine.tick(); // Returns Some(Event) while running
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::duration::Duration;
use super::mode::ModeConfig;
use super::sequencer::{self, NextOutcome, Segment};
use crate::error::TimerError;
use crate::events::Event;
use crate::notify::Cue;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    Idle,
    Running,
    Paused,
    Completed,
}

/// Core timer engine.
///
/// Operates on wall-clock deadlines -- no internal thread. The caller is
/// responsible for calling `tick()` periodically and must serialize
/// commands; the engine is a single-owner state machine.
#[derive(Debug, Clone)]
pub struct TimerEngine {
    config: Option<ModeConfig>,
    state: TimerState,
    /// Current segment; None in Idle.
    segment: Option<Segment>,
    /// Absolute expiry instant (ms since epoch). Set only while Running.
    deadline_ms: Option<u64>,
    /// Remaining whole seconds as of the last tick, or the frozen value
    /// while Paused.
    remaining_secs: u64,
    /// Length of the current segment in seconds, for progress computation.
    initial_secs: u64,
}

impl TimerEngine {
    pub fn new() -> Self {
        Self {
            config: None,
            state: TimerState::Idle,
            segment: None,
            deadline_ms: None,
            remaining_secs: 0,
            initial_secs: 0,
        }
    }

    pub fn with_config(config: ModeConfig) -> Result<Self, TimerError> {
        let mut engine = Self::new();
        engine.configure(config)?;
        Ok(engine)
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn config(&self) -> Option<&ModeConfig> {
        self.config.as_ref()
    }

    pub fn segment(&self) -> Option<&Segment> {
        self.segment.as_ref()
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn remaining(&self) -> Duration {
        Duration::from_secs(self.remaining_secs)
    }

    pub fn total_secs(&self) -> u64 {
        self.initial_secs
    }

    /// 0.0 .. 1.0 progress within the current segment.
    ///
    /// Monotonically non-decreasing while Running; resets to 0.0 on each
    /// phase advance.
    pub fn progress_ratio(&self) -> f64 {
        if self.initial_secs == 0 {
            return 0.0;
        }
        (self.initial_secs - self.remaining_secs) as f64 / self.initial_secs as f64
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            state: self.state,
            segment: self.segment,
            remaining_secs: self.remaining_secs,
            total_secs: self.initial_secs,
            progress_ratio: self.progress_ratio(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Install a mode configuration. Allowed only in Idle.
    ///
    /// # Errors
    ///
    /// Returns [`TimerError::InvalidConfiguration`] if the parameters
    /// violate the mode's requirements or the engine is not Idle. The
    /// engine state is unchanged on error.
    pub fn configure(&mut self, config: ModeConfig) -> Result<(), TimerError> {
        if self.state != TimerState::Idle {
            return Err(TimerError::invalid(
                "state",
                "configuration can only change while idle",
            ));
        }
        config.validate()?;
        self.config = Some(config);
        Ok(())
    }

    /// Start a fresh session from Idle, or resume from Paused.
    pub fn start(&mut self) -> Result<Event, TimerError> {
        self.start_at(now_ms())
    }

    /// [`start`](Self::start) with an explicit clock reading.
    pub fn start_at(&mut self, now_ms: u64) -> Result<Event, TimerError> {
        match self.state {
            TimerState::Idle => {
                let config = self
                    .config
                    .ok_or_else(|| TimerError::NotReady("no configuration".into()))?;
                if config.validate().is_err() {
                    return Err(TimerError::NotReady("configuration has zero duration".into()));
                }
                let segment = sequencer::first(&config);
                self.initial_secs = segment.duration.as_secs();
                self.remaining_secs = self.initial_secs;
                self.deadline_ms = Some(now_ms + segment.duration.as_millis());
                self.segment = Some(segment);
                self.state = TimerState::Running;
                Ok(Event::Started {
                    segment,
                    at: Utc::now(),
                })
            }
            TimerState::Paused => {
                self.deadline_ms = Some(now_ms + self.remaining_secs * 1000);
                self.state = TimerState::Running;
                Ok(Event::Resumed {
                    remaining_secs: self.remaining_secs,
                    at: Utc::now(),
                })
            }
            TimerState::Running => Err(TimerError::NotReady("already running".into())),
            TimerState::Completed => {
                Err(TimerError::NotReady("session completed, reset first".into()))
            }
        }
    }

    /// Freeze the remaining time. No-op unless Running.
    pub fn pause(&mut self) -> Option<Event> {
        self.pause_at(now_ms())
    }

    /// [`pause`](Self::pause) with an explicit clock reading.
    pub fn pause_at(&mut self, now_ms: u64) -> Option<Event> {
        if self.state != TimerState::Running {
            return None;
        }
        self.remaining_secs = self.compute_remaining(now_ms);
        self.deadline_ms = None;
        self.state = TimerState::Paused;
        Some(Event::Paused {
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Return to Idle from any state. The configuration is retained.
    /// Always succeeds.
    pub fn reset(&mut self) -> Event {
        self.state = TimerState::Idle;
        self.segment = None;
        self.deadline_ms = None;
        self.remaining_secs = 0;
        self.initial_secs = 0;
        Event::Reset { at: Utc::now() }
    }

    /// Recompute remaining time against the wall clock.
    pub fn tick(&mut self) -> Option<Event> {
        self.tick_at(now_ms())
    }

    /// Call periodically while Running; a no-op in every other state.
    ///
    /// Returns `Tick` while the segment is live, `PhaseAdvanced` when the
    /// sequencer schedules another segment, and `Completed` when the
    /// session is over.
    pub fn tick_at(&mut self, now_ms: u64) -> Option<Event> {
        if self.state != TimerState::Running {
            return None;
        }
        let remaining = self.compute_remaining(now_ms);

        if remaining > 0 {
            let cue = self.countdown_cue(remaining);
            self.remaining_secs = remaining;
            return Some(Event::Tick {
                remaining_secs: remaining,
                cue,
                at: Utc::now(),
            });
        }

        self.remaining_secs = 0;
        let config = self.config?;
        let current = self.segment?;
        match sequencer::next(&config, &current) {
            NextOutcome::Advance(segment) => {
                self.initial_secs = segment.duration.as_secs();
                self.remaining_secs = self.initial_secs;
                self.deadline_ms = Some(now_ms + segment.duration.as_millis());
                self.segment = Some(segment);
                Some(Event::PhaseAdvanced {
                    segment,
                    notify: sequencer::advance_text(&config, &segment),
                    at: Utc::now(),
                })
            }
            NextOutcome::Finished => {
                self.state = TimerState::Completed;
                self.deadline_ms = None;
                Some(Event::Completed {
                    notify: sequencer::completed_text(&config),
                    at: Utc::now(),
                })
            }
        }
    }

    // ── Internal ─────────────────────────────────────────────────────

    /// `max(0, ceil((deadline - now) / 1000))`, the one place remaining
    /// time is derived from the clock.
    fn compute_remaining(&self, now_ms: u64) -> u64 {
        match self.deadline_ms {
            Some(deadline) => deadline.saturating_sub(now_ms).div_ceil(1000),
            None => self.remaining_secs,
        }
    }

    /// HIIT last-seconds beep, decided on the freshly computed remaining
    /// value within the same tick. Fires once per displayed second: only
    /// when the value has just dropped into (or within) the 3..1 window.
    fn countdown_cue(&self, remaining: u64) -> Option<Cue> {
        if !matches!(self.config, Some(ModeConfig::Hiit { .. })) {
            return None;
        }
        if (1..=3).contains(&remaining) && self.remaining_secs > remaining {
            Some(Cue::CountdownBeep(remaining as u8))
        } else {
            None
        }
    }
}

impl Default for TimerEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::PhaseKind;

    const T0: u64 = 1_000_000_000_000;

    fn countdown(secs: u64) -> TimerEngine {
        TimerEngine::with_config(ModeConfig::Countdown {
            target: Duration::from_secs(secs),
        })
        .unwrap()
    }

    fn interval(work: u64, rest: u64, rounds: u32) -> TimerEngine {
        TimerEngine::with_config(ModeConfig::Interval {
            work: Duration::from_secs(work),
            rest: Duration::from_secs(rest),
            rounds,
        })
        .unwrap()
    }

    fn hiit(work: u64, rest: u64, rounds: u32) -> TimerEngine {
        TimerEngine::with_config(ModeConfig::Hiit {
            work: Duration::from_secs(work),
            rest: Duration::from_secs(rest),
            rounds,
        })
        .unwrap()
    }

    #[test]
    fn start_pause_resume() {
        let mut engine = countdown(90);
        assert_eq!(engine.state(), TimerState::Idle);

        assert!(engine.start_at(T0).is_ok());
        assert_eq!(engine.state(), TimerState::Running);

        assert!(engine.pause_at(T0 + 5_000).is_some());
        assert_eq!(engine.state(), TimerState::Paused);

        assert!(engine.start_at(T0 + 30_000).is_ok());
        assert_eq!(engine.state(), TimerState::Running);
    }

    #[test]
    fn start_without_config_is_not_ready() {
        let mut engine = TimerEngine::new();
        assert!(matches!(engine.start_at(T0), Err(TimerError::NotReady(_))));
        assert_eq!(engine.state(), TimerState::Idle);
    }

    #[test]
    fn configure_rejected_while_running() {
        let mut engine = countdown(90);
        engine.start_at(T0).unwrap();
        let err = engine.configure(ModeConfig::default_hiit());
        assert!(err.is_err());
        assert_eq!(engine.config().unwrap().mode_name(), "countdown");
    }

    #[test]
    fn zero_rounds_configure_leaves_idle() {
        let mut engine = TimerEngine::new();
        let cfg = ModeConfig::Interval {
            work: Duration::from_secs(60),
            rest: Duration::from_secs(10),
            rounds: 0,
        };
        assert!(matches!(
            engine.configure(cfg),
            Err(TimerError::InvalidConfiguration { .. })
        ));
        assert_eq!(engine.state(), TimerState::Idle);
        assert!(engine.config().is_none());
    }

    #[test]
    fn pause_freezes_remaining_across_real_time() {
        let mut engine = countdown(60);
        engine.start_at(T0).unwrap();
        engine.tick_at(T0 + 23_000);
        let paused = engine.pause_at(T0 + 23_000).unwrap();
        match paused {
            Event::Paused { remaining_secs, .. } => assert_eq!(remaining_secs, 37),
            other => panic!("expected Paused, got {other:?}"),
        }

        // Ten seconds of wall time pass; resuming must not consume them.
        let resumed = engine.start_at(T0 + 33_000).unwrap();
        match resumed {
            Event::Resumed { remaining_secs, .. } => assert_eq!(remaining_secs, 37),
            other => panic!("expected Resumed, got {other:?}"),
        }
        match engine.tick_at(T0 + 33_050).unwrap() {
            Event::Tick { remaining_secs, .. } => assert_eq!(remaining_secs, 37),
            other => panic!("expected Tick, got {other:?}"),
        }
    }

    #[test]
    fn late_tick_recomputes_from_deadline() {
        let mut engine = countdown(90);
        engine.start_at(T0).unwrap();
        // No ticks for 85 seconds (suspended loop). One late tick lands
        // on the correct value.
        match engine.tick_at(T0 + 85_000).unwrap() {
            Event::Tick { remaining_secs, .. } => assert_eq!(remaining_secs, 5),
            other => panic!("expected Tick, got {other:?}"),
        }
    }

    #[test]
    fn countdown_completes_exactly_once() {
        let mut engine = countdown(90);
        engine.start_at(T0).unwrap();
        let mut completions = 0;
        let mut t = T0;
        while t <= T0 + 95_000 {
            if let Some(Event::Completed { .. }) = engine.tick_at(t) {
                completions += 1;
            }
            t += 100;
        }
        assert_eq!(completions, 1);
        assert_eq!(engine.state(), TimerState::Completed);
    }

    #[test]
    fn tick_is_noop_when_not_running() {
        let mut engine = countdown(1);
        assert!(engine.tick_at(T0).is_none());

        engine.start_at(T0).unwrap();
        engine.tick_at(T0 + 1_000); // expires
        assert_eq!(engine.state(), TimerState::Completed);
        let before = engine.remaining_secs();
        assert!(engine.tick_at(T0 + 60_000).is_none());
        assert_eq!(engine.remaining_secs(), before);
    }

    #[test]
    fn interval_ends_without_trailing_break() {
        let mut engine = interval(1500, 300, 4);
        engine.start_at(T0).unwrap();

        let mut t = T0;
        let mut kinds = vec![engine.segment().unwrap().kind];
        loop {
            t += 100;
            match engine.tick_at(t) {
                Some(Event::PhaseAdvanced { segment, .. }) => kinds.push(segment.kind),
                Some(Event::Completed { .. }) => break,
                _ => {}
            }
            assert!(t < T0 + 10_000_000, "session did not complete");
        }
        assert_eq!(kinds.last(), Some(&PhaseKind::Work));
        assert_eq!(
            kinds.iter().filter(|k| **k == PhaseKind::Break).count(),
            3
        );
        assert_eq!(engine.state(), TimerState::Completed);
    }

    #[test]
    fn hiit_zero_rest_never_emits_rest() {
        let mut engine = hiit(20, 0, 8);
        engine.start_at(T0).unwrap();

        let mut t = T0;
        let mut rounds_seen = vec![1];
        loop {
            t += 100;
            match engine.tick_at(t) {
                Some(Event::PhaseAdvanced { segment, .. }) => {
                    assert_eq!(segment.kind, PhaseKind::Work);
                    rounds_seen.push(segment.round);
                }
                Some(Event::Completed { .. }) => break,
                _ => {}
            }
        }
        assert_eq!(rounds_seen, (1..=8).collect::<Vec<u32>>());
    }

    #[test]
    fn progress_resets_on_phase_advance() {
        let mut engine = interval(10, 5, 2);
        engine.start_at(T0).unwrap();
        engine.tick_at(T0 + 9_000);
        assert!(engine.progress_ratio() > 0.8);
        engine.tick_at(T0 + 10_000); // work -> break
        assert_eq!(engine.progress_ratio(), 0.0);
        assert_eq!(engine.segment().unwrap().kind, PhaseKind::Break);
    }

    #[test]
    fn progress_ratio_zero_without_segment() {
        let engine = TimerEngine::new();
        assert_eq!(engine.progress_ratio(), 0.0);
    }

    #[test]
    fn hiit_countdown_beeps_fire_once_per_second() {
        let mut engine = hiit(5, 10, 2);
        engine.start_at(T0).unwrap();

        let mut beeps = Vec::new();
        let mut t = T0;
        while t < T0 + 5_000 {
            t += 100;
            if let Some(Event::Tick { cue: Some(cue), .. }) = engine.tick_at(t) {
                beeps.push(cue);
            }
        }
        assert_eq!(
            beeps,
            vec![
                Cue::CountdownBeep(3),
                Cue::CountdownBeep(2),
                Cue::CountdownBeep(1)
            ]
        );
    }

    #[test]
    fn no_countdown_beeps_outside_hiit() {
        let mut engine = countdown(5);
        engine.start_at(T0).unwrap();
        let mut t = T0;
        while t < T0 + 5_000 {
            t += 100;
            if let Some(Event::Tick { cue, .. }) = engine.tick_at(t) {
                assert!(cue.is_none());
            }
        }
    }

    #[test]
    fn reset_from_any_state_returns_to_idle() {
        let mut engine = countdown(30);
        engine.reset();
        assert_eq!(engine.state(), TimerState::Idle);

        engine.start_at(T0).unwrap();
        engine.reset();
        assert_eq!(engine.state(), TimerState::Idle);
        assert!(engine.segment().is_none());
        // Configuration survives a reset.
        assert!(engine.config().is_some());

        engine.start_at(T0).unwrap();
        engine.tick_at(T0 + 30_000);
        assert_eq!(engine.state(), TimerState::Completed);
        engine.reset();
        assert_eq!(engine.state(), TimerState::Idle);
    }

    #[test]
    fn snapshot_reflects_running_state() {
        let mut engine = countdown(60);
        engine.start_at(T0).unwrap();
        engine.tick_at(T0 + 15_000);
        match engine.snapshot() {
            Event::StateSnapshot {
                state,
                remaining_secs,
                total_secs,
                ..
            } => {
                assert_eq!(state, TimerState::Running);
                assert_eq!(remaining_secs, 45);
                assert_eq!(total_secs, 60);
            }
            other => panic!("expected StateSnapshot, got {other:?}"),
        }
    }
}

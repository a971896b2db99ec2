//! # Tritimer Core Library
//!
//! Core logic for the Tritimer productivity timer: three timer modes
//! (interval work/break cycling, HIIT work/rest rounds, and a plain
//! countdown) driven by a single wall-clock-based engine.
//!
//! ## Architecture
//!
//! - **Timer Engine**: A wall-clock-based state machine that requires the
//!   caller to periodically invoke `tick()` for progress updates. Remaining
//!   time is always recomputed from an absolute deadline, so a tick that
//!   arrives late (suspended process, throttled loop) still reports the
//!   correct value.
//! - **Phase Sequencer**: Pure per-mode policy deciding what follows an
//!   expired segment -- the next work/break/rest segment or completion.
//! - **Events**: Every state change produces an [`Event`]; notification
//!   and audio side effects are expressed as data ([`Cue`]) and handled by
//!   an external [`NotificationGateway`].
//! - **Config**: TOML-based persistence of last-used mode settings.
//!
//! ## Key Components
//!
//! - [`TimerEngine`]: Core timer state machine
//! - [`ModeConfig`]: Per-mode immutable configuration
//! - [`Config`]: Application configuration management

pub mod config;
pub mod error;
pub mod events;
pub mod notify;
pub mod timer;

pub use config::Config;
pub use error::{ConfigError, CoreError, TimerError};
pub use events::Event;
pub use notify::{Cue, NotificationGateway, NullGateway};
pub use timer::{
    Duration, Field, ModeConfig, NextOutcome, PhaseKind, Segment, TimerEngine, TimerState,
};

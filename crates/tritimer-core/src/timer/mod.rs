mod duration;
mod engine;
mod mode;
pub mod sequencer;

pub use duration::{Duration, Field};
pub use engine::{TimerEngine, TimerState};
pub use mode::ModeConfig;
pub use sequencer::{NextOutcome, PhaseKind, Segment};

//! Foreground timer sessions.
//!
//! This is the presentation layer and notification gateway in one place:
//! a polling loop drives the engine at a nominal 100 ms cadence, renders
//! its state to the terminal, and forwards notification text and audio
//! cues. The loop never does its own time arithmetic -- every displayed
//! value comes from the engine's wall-clock recomputation, so a stalled
//! loop (suspended laptop, stopped process) catches up on the next tick.

use std::io::Write as _;
use std::time::Duration as StdDuration;

use clap::Args;
use tritimer_core::{
    Config, Cue, Duration, Event, ModeConfig, NotificationGateway, TimerEngine,
};

/// Nominal polling cadence of the display loop.
const TICK_INTERVAL: StdDuration = StdDuration::from_millis(100);

#[derive(Args)]
pub struct IntervalArgs {
    /// Work duration ([HH:]MM:SS or seconds); defaults to the last-used value
    #[arg(long)]
    work: Option<Duration>,
    /// Break duration ([HH:]MM:SS or seconds)
    #[arg(long)]
    rest: Option<Duration>,
    /// Number of work rounds
    #[arg(long)]
    rounds: Option<u32>,
    /// Work-duration preset in minutes (the classic 25, 15 or 5)
    #[arg(long, conflicts_with = "work")]
    preset: Option<u64>,
    /// Emit events as JSON lines instead of the live display
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
pub struct HiitArgs {
    /// Work time in seconds; defaults to the last-used value
    #[arg(long)]
    work: Option<u64>,
    /// Rest time in seconds (0 skips rest phases entirely)
    #[arg(long)]
    rest: Option<u64>,
    /// Number of rounds
    #[arg(long)]
    rounds: Option<u32>,
    /// Emit events as JSON lines instead of the live display
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
pub struct CountdownArgs {
    /// Countdown duration ([HH:]MM:SS or seconds); defaults to the
    /// last-used value
    duration: Option<Duration>,
    /// Duration preset in minutes (the classic 1, 3, 5, 10 or 30)
    #[arg(long, conflicts_with = "duration")]
    preset: Option<u64>,
    /// Emit events as JSON lines instead of the live display
    #[arg(long)]
    json: bool,
}

pub fn interval(args: IntervalArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let work = args
        .preset
        .map(|m| Duration::from_parts(0, m, 0))
        .or(args.work)
        .unwrap_or(config.interval.work);
    let mode = ModeConfig::Interval {
        work,
        rest: args.rest.unwrap_or(config.interval.rest),
        rounds: args.rounds.unwrap_or(config.interval.rounds),
    };
    run_session(mode, args.json)
}

pub fn hiit(args: HiitArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let mode = ModeConfig::Hiit {
        work: args.work.map(Duration::from_secs).unwrap_or(config.hiit.work),
        rest: args.rest.map(Duration::from_secs).unwrap_or(config.hiit.rest),
        rounds: args.rounds.unwrap_or(config.hiit.rounds),
    };
    run_session(mode, args.json)
}

pub fn countdown(args: CountdownArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let target = args
        .preset
        .map(|m| Duration::from_parts(0, m, 0))
        .or(args.duration)
        .unwrap_or(config.countdown.target);
    run_session(ModeConfig::Countdown { target }, args.json)
}

/// Terminal notification gateway: text to stderr, cues as the bell.
struct ConsoleGateway {
    enabled: bool,
    bell: bool,
}

impl ConsoleGateway {
    fn new(config: &Config) -> Self {
        Self {
            enabled: config.notifications.enabled,
            bell: config.notifications.bell,
        }
    }
}

impl NotificationGateway for ConsoleGateway {
    fn notify(&mut self, text: &str) {
        if self.enabled {
            eprintln!("* {text}");
        }
    }

    fn cue(&mut self, cue: Cue) {
        if !self.bell {
            return;
        }
        let rings = match cue {
            Cue::StartChime | Cue::CountdownBeep(_) => 1,
            Cue::EndAlarm => 3,
        };
        let mut stderr = std::io::stderr();
        for _ in 0..rings {
            let _ = stderr.write_all(b"\x07");
        }
        let _ = stderr.flush();
    }
}

/// Tracks what is on screen so ticks can redraw in place and JSON output
/// only carries changed values.
struct Renderer {
    json: bool,
    last_remaining: Option<u64>,
    line_open: bool,
}

impl Renderer {
    fn new(json: bool) -> Self {
        Self {
            json,
            last_remaining: None,
            line_open: false,
        }
    }

    fn handle(
        &mut self,
        engine: &TimerEngine,
        event: &Event,
        gateway: &mut ConsoleGateway,
    ) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(cue) = event.cue() {
            gateway.cue(cue);
        }

        if self.json {
            self.emit_json(event)?;
        } else {
            self.draw(engine, event);
        }

        if let Some(text) = event.notify_text() {
            gateway.notify(text);
        }
        Ok(())
    }

    fn emit_json(&mut self, event: &Event) -> Result<(), Box<dyn std::error::Error>> {
        // At 10 ticks per second most ticks repeat the same remaining
        // value; only report the transitions between displayed seconds.
        if let Event::Tick { remaining_secs, .. } = event {
            if self.last_remaining == Some(*remaining_secs) {
                return Ok(());
            }
            self.last_remaining = Some(*remaining_secs);
        }
        println!("{}", serde_json::to_string(event)?);
        Ok(())
    }

    fn draw(&mut self, engine: &TimerEngine, event: &Event) {
        match event {
            Event::Tick { .. } | Event::Started { .. } | Event::PhaseAdvanced { .. } => {
                if matches!(event, Event::PhaseAdvanced { .. }) {
                    self.finish_line();
                }
                let line = status_line(engine);
                print!("\r{line}\x1b[K");
                let _ = std::io::stdout().flush();
                self.line_open = true;
            }
            Event::Completed { .. } => {
                self.finish_line();
                println!("done");
            }
            _ => {}
        }
    }

    fn finish_line(&mut self) {
        if self.line_open {
            println!();
            self.line_open = false;
        }
    }
}

/// One-line human rendering of the engine state, e.g. `Work 2/4  24:59  8%`.
fn status_line(engine: &TimerEngine) -> String {
    let remaining = engine.remaining();
    let pct = (engine.progress_ratio() * 100.0).round() as u32;
    match (engine.segment(), engine.config().and_then(|c| c.rounds())) {
        (Some(seg), Some(rounds)) => {
            format!("{} {}/{}  {}  {}%", seg.kind.label(), seg.round, rounds, remaining, pct)
        }
        (Some(seg), None) => format!("{}  {}  {}%", seg.kind.label(), remaining, pct),
        _ => remaining.to_string(),
    }
}

fn run_session(mode: ModeConfig, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut engine = TimerEngine::with_config(mode)?;

    // Remember the settings only once they are known to be valid.
    let mut config = Config::load_or_default();
    config.remember_mode(&mode);
    if let Err(e) = config.save() {
        eprintln!("warning: could not save config: {e}");
    }

    let mut gateway = ConsoleGateway::new(&config);
    let mut renderer = Renderer::new(json);

    let started = engine.start()?;
    renderer.handle(&engine, &started, &mut gateway)?;

    loop {
        std::thread::sleep(TICK_INTERVAL);
        let Some(event) = engine.tick() else {
            break;
        };
        let completed = matches!(event, Event::Completed { .. });
        renderer.handle(&engine, &event, &mut gateway)?;
        if completed {
            break;
        }
    }
    Ok(())
}

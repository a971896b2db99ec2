use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "tritimer", version, about = "Tritimer CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Work/break interval timer (pomodoro-style)
    Interval(commands::run::IntervalArgs),
    /// High-intensity interval training timer
    Hiit(commands::run::HiitArgs),
    /// Plain countdown timer
    Countdown(commands::run::CountdownArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Interval(args) => commands::run::interval(args),
        Commands::Hiit(args) => commands::run::hiit(args),
        Commands::Countdown(args) => commands::run::countdown(args),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

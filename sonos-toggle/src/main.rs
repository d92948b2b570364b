use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;

use sonos_toggle::logging::{init_logging, LoggingMode};
use sonos_toggle::report::{self, GlobalSummary, HouseSummary};
use sonos_toggle::{toggle_all, Config, HouseToggle, SonosControl};

/// Toggle playback across a fixed set of Sonos rooms
#[derive(Parser, Debug)]
#[command(name = "sonos-toggle")]
#[command(version)]
struct Cli {
    /// Config file (default: $XDG_CONFIG_HOME/sonos-toggle/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Per-request timeout in seconds, overrides the config file
    #[arg(short, long, global = true)]
    timeout: Option<u64>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// No log output on stderr
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Pause every group if any is playing, otherwise play every group
    All {
        /// Decide and print without sending commands
        #[arg(long)]
        dry_run: bool,
    },
    /// Toggle the house speaker, resuming or starting the default station
    House,
    /// Print the configured rooms
    Rooms,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mode = LoggingMode::from_flags(cli.quiet, &cli.log_level);
    if let Err(e) = init_logging(mode, &cli.log_level) {
        eprintln!("warning: {}", e);
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Printed directly so it shows even with --quiet
            eprintln!("{}", failure_message(&e));
            ExitCode::FAILURE
        }
    }
}

/// One line naming the failure and every context it passed through
fn failure_message(error: &anyhow::Error) -> String {
    format!("error: {:#}", error)
}

fn run(cli: Cli) -> Result<()> {
    let path = match cli.config {
        Some(path) => path,
        None => Config::default_path().ok_or_else(|| anyhow!("no config directory on this platform"))?,
    };
    let config = Config::load(&path).with_context(|| format!("loading {}", path.display()))?;
    debug!(path = %path.display(), rooms = config.rooms.len(), "config loaded");

    let timeout = match cli.timeout {
        Some(0) => return Err(anyhow!("--timeout must be positive")),
        Some(secs) => Duration::from_secs(secs),
        None => config.request_timeout(),
    };
    let control = SonosControl::new(timeout);

    let json = match cli.command {
        Command::All { dry_run } => {
            let outcome = toggle_all(&control, &config.rooms, dry_run)?;
            report::to_json(&GlobalSummary::new(report::timestamp(), &outcome))?
        }
        Command::House => {
            let settings = config.house_settings()?;
            let outcome = HouseToggle::new(&control, &settings).run()?;
            report::to_json(&HouseSummary::new(report::timestamp(), &outcome))?
        }
        Command::Rooms => report::to_json(&config.rooms)?,
    };

    println!("{}", json);
    Ok(())
}

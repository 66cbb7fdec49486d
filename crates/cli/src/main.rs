use std::{fs::File, process::ExitCode};

use anyhow::Result;
use camino::Utf8PathBuf;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use clap::{Parser, Subcommand};
use config::{Config, APP_NAME};
use simplelog::{
    ColorChoice, CombinedLogger, Config as LogConfig, LevelFilter, SharedLogger, TermLogger,
    TerminalMode, WriteLogger,
};
use xdg::BaseDirectories;

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "canvas-calendar", version)]
#[command(about = "Export your Canvas assignment due dates as a calendar")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Only include assignments due on or after this date (e.g. "2025-04-01")
    #[arg(long, global = true, value_parser = parse_since)]
    since: Option<DateTime<Utc>>,

    /// Show debug logs in the terminal
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the weekly schedule and write the calendar file (the default)
    Sync {
        /// Where to write the calendar (defaults to `output` from config)
        #[arg(short, long)]
        output: Option<Utf8PathBuf>,
    },
    /// Print assignments as JSON
    Assignments {
        #[arg(long)]
        pretty: bool,
    },
    /// Write the calendar file
    Calendar {
        #[arg(short, long)]
        output: Option<Utf8PathBuf>,
    },
    /// Print assignments grouped by week
    Weekly,
    /// Check the configured token works
    Whoami,
    /// Save the Canvas URL and access token to the config file
    Configure {
        /// Your Canvas instance, e.g. "https://canvas.example.edu"
        #[arg(long)]
        url: String,

        /// An access token, generated from your Canvas account settings
        #[arg(long)]
        token: Option<String>,
    },
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    match cli.command.unwrap_or(Commands::Sync { output: None }) {
        Commands::Configure { url, token } => commands::configure(url, token, cli.since),
        Commands::Sync { output } => commands::sync(&load_config(cli.since)?, output),
        Commands::Assignments { pretty } => {
            commands::assignments(&load_config(cli.since)?, pretty)
        }
        Commands::Calendar { output } => commands::calendar(&load_config(cli.since)?, output),
        Commands::Weekly => commands::weekly(&load_config(cli.since)?),
        Commands::Whoami => commands::whoami(&load_config(cli.since)?),
    }
}

fn load_config(since: Option<DateTime<Utc>>) -> Result<Config> {
    let mut config = Config::load()?;
    if let Some(since) = since {
        config.window_start = since;
    }

    Ok(config)
}

/// Warnings go to the terminal, everything goes to a log file in the cache directory.
fn init_logging(verbose: bool) -> Result<()> {
    let term_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        term_level,
        LogConfig::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )];
    match log_file() {
        Ok(file) => loggers.push(WriteLogger::new(
            LevelFilter::Debug,
            LogConfig::default(),
            file,
        )),
        Err(e) => eprintln!("not logging to file: {:#}", e),
    }
    CombinedLogger::init(loggers)?;

    Ok(())
}

fn log_file() -> Result<File> {
    let path =
        BaseDirectories::with_prefix(APP_NAME)?.place_cache_file(format!("{}.log", APP_NAME))?;

    Ok(File::create(path)?)
}

/// Accepts a full RFC 3339 timestamp, or a date meaning midnight UTC.
fn parse_since(s: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map(|d| d.and_time(NaiveTime::MIN).and_utc())
        .map_err(|_| format!("expected a date like 2025-04-01, got {:?}", s))
}

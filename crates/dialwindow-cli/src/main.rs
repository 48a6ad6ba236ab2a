mod commands;
mod error;
mod util;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

use crate::commands::{clocks, completions, derive, draft, replay, time, Context};
use crate::error::{exit_code_for, report_error};
use crate::util::resolve_today;
use dialwindow_config as config;

#[derive(Debug, Parser)]
#[command(name = "dialwindow", version, about = "dialwindow CLI")]
struct Cli {
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[arg(long, global = true)]
    json: bool,
    #[arg(long, short, global = true)]
    verbose: bool,
    /// Treat this date (YYYY-MM-DD) as today
    #[arg(long, global = true, value_name = "DATE")]
    today: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate shell completions
    Completions(completions::CompletionsArgs),
    #[command(flatten)]
    Session(SessionCommand),
}

/// Commands that run against the loaded configuration.
#[derive(Debug, Subcommand)]
enum SessionCommand {
    /// Print a fresh draft with configured defaults
    New(draft::NewArgs),
    /// Validate a draft file
    Validate(draft::ValidateArgs),
    /// Run full validation and emit the submission
    Submit(draft::SubmitArgs),
    /// List the weekdays a date range reaches
    Derive(derive::DeriveArgs),
    /// Convert between 12-hour and 24-hour clock formats
    #[command(subcommand)]
    Time(time::TimeCommand),
    /// Show the current time in each supported zone
    Clocks(clocks::ClocksArgs),
    /// Drive a form session from a scripted list of actions
    Replay(replay::ReplayArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let verbose = cli.verbose;
    init_logging(verbose);
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err, verbose);
            exit_code_for(&err)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let Cli {
        config: config_path,
        json,
        verbose,
        today,
        command,
    } = cli;

    let command = match command {
        Command::Completions(args) => return completions::emit(args),
        Command::Session(command) => command,
    };

    let app_config = config::load(config_path.clone()).with_context(|| "load config")?;
    if verbose {
        match config::resolve_config_path(config_path) {
            Ok(path) => {
                if path.exists() {
                    debug!(path = %path.display(), "config resolved");
                } else {
                    debug!(path = %path.display(), "config missing, using defaults");
                }
            }
            Err(err) => {
                debug!(error = %err, "config unavailable");
            }
        }
    }
    let today = resolve_today(today.as_deref())?;
    debug!(%today, timezone = %app_config.defaults.timezone, "session context");

    let ctx = Context {
        config: &app_config,
        json,
        today,
    };

    match command {
        SessionCommand::New(args) => draft::new_draft(&ctx, args),
        SessionCommand::Validate(args) => draft::validate_draft(&ctx, args),
        SessionCommand::Submit(args) => draft::submit_draft(&ctx, args),
        SessionCommand::Derive(args) => derive::derive_weekdays(&ctx, args),
        SessionCommand::Time(cmd) => time::run(&ctx, cmd),
        SessionCommand::Clocks(args) => clocks::show_clocks(&ctx, args),
        SessionCommand::Replay(args) => replay::replay(&ctx, args),
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}

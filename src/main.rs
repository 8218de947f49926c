//! feedback CLI
//!
//! Show the feedback widget in the terminal, or replay events headlessly.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use feedback_widget::config::WidgetConfig;
use feedback_widget::logging::{init_logging, LogConfig};
use feedback_widget::replay::{load_script, parse_events, replay};
use feedback_widget::report::format_report;
use feedback_widget::types::OutputFormat;

#[derive(Parser)]
#[command(name = "feedback")]
#[command(about = "A Good/Bad feedback widget driven by a state machine")]
#[command(version)]
struct Cli {
    /// Write logs to this file instead of the default data directory
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Log at debug level (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// TOML file with screen texts and log settings
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the widget in the terminal
    Run,

    /// Send events through the machine without a terminal and report the result
    Replay {
        /// Events in order: good, bad, close, submit, submit=<text>
        events: Vec<String>,

        /// JSON file with an array of events, sent before any positional ones
        #[arg(long)]
        file: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value = "human")]
        format: OutputFormatArg,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormatArg {
    Human,
    Json,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Human => OutputFormat::Human,
            OutputFormatArg::Json => OutputFormat::Json,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match dispatch(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn dispatch(cli: Cli) -> Result<(), String> {
    let config = WidgetConfig::load_or_default(cli.config.as_deref()).map_err(|e| e.to_string())?;
    let headless = matches!(cli.command, Commands::Replay { .. });
    setup_logging(&cli, &config, headless)?;

    match cli.command {
        Commands::Run => cmd_run(config),
        Commands::Replay { events, file, format } => {
            cmd_replay(&config, events, file, format.into())
        }
    }
}

/// Logs go to a file; headless runs mirror them to stderr with --verbose.
fn setup_logging(cli: &Cli, config: &WidgetConfig, headless: bool) -> Result<(), String> {
    let log_config = LogConfig {
        log_file: cli.log_file.clone(),
        log_dir: config.log_dir.clone(),
        emit_stderr: headless && cli.verbose,
        verbose: cli.verbose,
    };
    init_logging(&log_config).map_err(|e| e.to_string())?;
    Ok(())
}

// ============================================================================
// COMMAND HANDLERS
// ============================================================================

fn cmd_run(config: WidgetConfig) -> Result<(), String> {
    feedback_widget::tui::run(config).map_err(|e| format!("terminal error: {}", e))
}

fn cmd_replay(
    config: &WidgetConfig,
    events: Vec<String>,
    file: Option<PathBuf>,
    format: OutputFormat,
) -> Result<(), String> {
    let mut script = match file {
        Some(path) => load_script(&path).map_err(|e| e.to_string())?,
        None => Vec::new(),
    };
    script.extend(parse_events(&events).map_err(|e| e.to_string())?);

    let outcome = replay(script, &config.invalid_notice);
    print!("{}", format_report(&outcome, format));

    Ok(())
}

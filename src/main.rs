use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use progress_common::ProgressMode;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use wp_progress::progress_config::ProgressConfig;

mod cmd;

#[derive(Parser)]
#[command(name = "wp-progress")]
#[command(version, about = "Keep work, remaining work and % complete consistent")]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true)]
    pub project_dir: Option<PathBuf>,

    /// Progress calculation mode: work_based, status_based. Overrides progress.toml.
    #[arg(long, global = true)]
    pub mode: Option<ProgressMode>,

    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create .progress/progress.toml with default settings
    Init,
    /// Derive % complete from work and remaining work
    Percent {
        /// Work, e.g. 8, 1.5h, 1d 4h
        #[arg(long)]
        work: String,
        /// Remaining work
        #[arg(long)]
        remaining: String,
    },
    /// Derive remaining work from work and % complete
    Remaining {
        #[arg(long)]
        work: String,
        #[arg(long, allow_hyphen_values = true)]
        percent: i32,
    },
    /// Derive work from remaining work and % complete
    Work {
        #[arg(long)]
        remaining: String,
        #[arg(long, allow_hyphen_values = true)]
        percent: i32,
    },
    /// Check a set of progress values for consistency
    Check {
        #[arg(long)]
        work: Option<String>,
        #[arg(long)]
        remaining: Option<String>,
        #[arg(long, allow_hyphen_values = true)]
        percent: Option<i32>,
    },
    /// Apply a change to stored progress values and derive the rest
    Derive {
        /// JSON file with `previous`, `change` and optional `status`
        input: PathBuf,
    },
    /// Compute progress totals for a work package hierarchy
    Rollup {
        /// JSON file with the root work package and its children
        input: PathBuf,
    },
    /// Convert between duration text and hours
    Duration {
        #[command(subcommand)]
        command: DurationCommands,
    },
    /// View or validate configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand, Clone)]
pub enum DurationCommands {
    /// Parse duration text (e.g. "1d 4h") into hours
    Parse { text: String },
    /// Format hours using the configured duration format
    Format { hours: String },
}

#[derive(Subcommand, Clone)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Validate configuration and show any warnings
    Validate,
    /// Initialize a default progress.toml file
    Init,
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("wp_progress=debug,info"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("wp_progress=info,warn"))
    };

    let json = std::env::var("PROGRESS_LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let project_dir = match cli.project_dir.clone() {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to get current directory")?,
    };

    let load_config = || ProgressConfig::with_cli_args(project_dir.clone(), cli.mode);

    match &cli.command {
        Commands::Init => cmd::cmd_init(&project_dir)?,
        Commands::Percent { work, remaining } => {
            cmd::cmd_percent(&load_config()?, work, remaining, cli.json)?
        }
        Commands::Remaining { work, percent } => {
            cmd::cmd_remaining(&load_config()?, work, *percent, cli.json)?
        }
        Commands::Work { remaining, percent } => {
            cmd::cmd_work(&load_config()?, remaining, *percent, cli.json)?
        }
        Commands::Check {
            work,
            remaining,
            percent,
        } => cmd::cmd_check(
            &load_config()?,
            work.as_deref(),
            remaining.as_deref(),
            *percent,
            cli.json,
        )?,
        Commands::Derive { input } => cmd::cmd_derive(&load_config()?, input, cli.json)?,
        Commands::Rollup { input } => cmd::cmd_rollup(&load_config()?, input, cli.json)?,
        Commands::Duration { command } => {
            cmd::cmd_duration(&load_config()?, command.clone(), cli.json)?
        }
        Commands::Config { command } => cmd::cmd_config(&load_config()?, command.clone())?,
    }

    Ok(())
}

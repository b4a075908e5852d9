use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use ecotrack::Config;

mod cli;

#[derive(Parser)]
#[command(name = "ecotrack")]
#[command(about = "EcoTrack - points, levels and streaks for greener habits")]
#[command(version)]
struct Cli {
    /// Path to the config file (defaults to ~/.ecotrack/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Record an activity with an explicit label and point value
    Record {
        /// Activity label (e.g. "waste_scan", "carbon_calc", "challenge")
        label: String,

        /// Points to award
        points: String,
    },

    /// Record a waste classification
    Scan {
        /// What was classified (e.g. "plastic bottle")
        item: Option<String>,
    },

    /// Record a carbon footprint calculation
    Carbon,

    /// Record a completed eco challenge
    Challenge {
        /// Challenge name
        name: Option<String>,
    },

    /// Show points, level and streak
    Status,

    /// List achievements and their progress
    Achievements {
        /// Only show this category (waste_classification, carbon_reduction, challenges)
        #[arg(long)]
        category: Option<String>,
    },

    /// Show recent activity history
    History {
        /// Number of entries to show
        #[arg(short = 'n', long, default_value_t = 20)]
        limit: usize,
    },

    /// Delete all progress
    Reset {
        /// Skip the confirmation check
        #[arg(long)]
        yes: bool,
    },

    /// Write a default config file
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config_path = cli.config.as_deref();
    let config = || Config::load_or_default(config_path);

    match cli.command {
        Some(Commands::Record { label, points }) => {
            cli::record::record_command(&config()?, &label, &points)?;
        }
        Some(Commands::Scan { item }) => {
            cli::record::scan_command(&config()?, item.as_deref())?;
        }
        Some(Commands::Carbon) => {
            cli::record::carbon_command(&config()?)?;
        }
        Some(Commands::Challenge { name }) => {
            cli::record::challenge_command(&config()?, name.as_deref())?;
        }
        Some(Commands::Status) | None => {
            cli::status::status_command(&config()?)?;
        }
        Some(Commands::Achievements { category }) => {
            cli::achievements::achievements_command(&config()?, category.as_deref())?;
        }
        Some(Commands::History { limit }) => {
            cli::history::history_command(&config()?, limit)?;
        }
        Some(Commands::Reset { yes }) => {
            cli::reset::reset_command(&config()?, yes)?;
        }
        Some(Commands::Init { force }) => {
            cli::init::init_command(config_path, force)?;
        }
    }

    Ok(())
}

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;
mod common;

#[derive(Parser)]
#[command(name = "verdant-cli", version, about = "Verdant CLI -- sustainability challenge tracker")]
struct Cli {
    /// Path to a TOML tuning file (points per level / per donated item)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the challenge catalog
    Challenges {
        /// Print as JSON instead of a table
        #[arg(long)]
        json: bool,
        /// Only show challenges in this category
        #[arg(long)]
        category: Option<String>,
    },
    /// Apply a sequence of actions to a fresh session and print the events
    Run {
        /// Actions like "complete 3", "donate 2", "goto progress", "status"
        steps: Vec<String>,
    },
    /// Drive a session interactively from stdin (one action per line)
    Shell,
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging. Events go to stdout as JSON, logs to stderr.
    let log_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Challenges { json, category } => {
            commands::challenges::run(json, category.as_deref())
        }
        Commands::Run { steps } => commands::run::run(cli.config.as_deref(), &steps),
        Commands::Shell => commands::shell::run(cli.config.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

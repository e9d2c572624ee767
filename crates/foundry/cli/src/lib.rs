//! Foundry CLI - Command-line interface for fine-tuning dataset curation
//!
//! This CLI gives curators a terminal interface to:
//! - Import rated examples into a JSONL dataset
//! - Split qualified examples into train/validation sets
//! - Unlock or hand-edit the validation set
//! - Inspect split statistics
//! - Export provider-ready JSONL files

use clap::{Parser, Subcommand};
use std::ffi::OsString;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod error;
pub mod output;
mod prompt;

use commands::{dataset, export, split, stats};
use config::CliConfig;
pub use error::{CliError, CliResult};

/// Foundry CLI application
#[derive(Parser)]
#[command(name = "foundry")]
#[command(about = "Foundry - curate and split fine-tuning datasets", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "FOUNDRY_CONFIG")]
    config: Option<String>,

    /// Dataset file (JSONL, one example per line)
    #[arg(short, long, env = "FOUNDRY_DATASET")]
    dataset: Option<PathBuf>,

    /// Output format (table, json, yaml)
    #[arg(short, long, default_value = "table")]
    output: output::OutputFormat,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand)]
enum Commands {
    /// Import examples from a JSONL file
    Import(dataset::ImportArgs),

    /// Split qualified examples into train and validation sets
    Split(split::SplitArgs),

    /// Clear the validation set so the next split can redraw it
    Unlock(split::UnlockArgs),

    /// Move examples to a split by id
    #[command(name = "move")]
    Move(split::MoveArgs),

    /// Show split statistics
    Stats(stats::StatsArgs),

    /// Export train/validation files for a training provider
    Export(export::ExportArgs),

    /// Show configuration
    Config,
}

/// Run using the current process arguments.
pub async fn run() -> CliResult<()> {
    run_with_args(std::env::args_os()).await
}

/// Run using the provided argument iterator.
pub async fn run_with_args<I, T>(args: I) -> CliResult<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = Cli::parse_from(args);

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .try_init();

    // Load config
    let config = CliConfig::load(cli.config.as_deref())?;
    let dataset = config.dataset_path(cli.dataset);

    // Execute command
    match cli.command {
        Commands::Import(args) => dataset::import(args, &dataset).await,
        Commands::Split(args) => split::split(args, &dataset, &config, cli.output).await,
        Commands::Unlock(args) => split::unlock(args, &dataset).await,
        Commands::Move(args) => split::move_to(args, &dataset).await,
        Commands::Stats(args) => stats::execute(args, &dataset, &config, cli.output).await,
        Commands::Export(args) => export::execute(args, &dataset, &config, cli.output).await,
        Commands::Config => {
            let effective = config.with_dataset(dataset);
            output::print_single(&effective, cli.output)
        }
    }
}

//! CLI application for extracting structured loan requests from free text.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{batch, config, extract};
use loanx_core::LoanxConfig;

/// Loan request extraction - turn free-text loan requests into structured records
#[derive(Parser)]
#[command(name = "loanx")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract a loan request from text, a file or stdin
    Extract(extract::ExtractArgs),

    /// Extract loan requests from multiple files
    Batch(batch::BatchArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // The config command must work even when the file on disk is broken
    let settings = match cli.command {
        Commands::Config(_) => LoanxConfig::default(),
        _ => config::load(cli.config.as_deref())?,
    };

    // Set up logging based on verbosity, falling back to the configured level
    let level = match cli.verbose {
        0 => settings.logging.level.parse().unwrap_or(Level::WARN),
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Extract(args) => extract::run(args, &settings),
        Commands::Batch(args) => batch::run(args, &settings),
        Commands::Config(args) => config::run(args, cli.config.as_deref()),
    }
}

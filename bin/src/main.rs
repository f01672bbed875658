//! ronda CLI binary.
//!
//! Provides command-line interface for DCF valuation and ratio analysis.

mod args;
mod cmd;
mod data;
mod output;

use anyhow::Result;
use args::{AssumptionArgs, Target};
use clap::{Parser, Subcommand};
use std::process;
use tracing_subscriber::EnvFilter;

/// Log filter used when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "ronda=warn";

/// Log filter used with `--verbose`. Target matching is by prefix, so this
/// covers every `ronda_*` crate.
const VERBOSE_LOG_FILTER: &str = "ronda=debug";

#[derive(Parser)]
#[command(name = "ronda")]
#[command(about = "Transparent DCF valuation and financial ratio analysis", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log valuation intermediates at debug level
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Value companies with the base-case DCF
    Value {
        #[command(flatten)]
        target: Target,

        #[command(flatten)]
        assumptions: AssumptionArgs,
    },

    /// Value companies under bull, base and bear assumptions
    Scenarios {
        #[command(flatten)]
        target: Target,

        #[command(flatten)]
        assumptions: AssumptionArgs,
    },

    /// Show financial ratios
    Ratios {
        #[command(flatten)]
        target: Target,
    },

    /// Show company name, classification, price and description
    Overview {
        #[command(flatten)]
        target: Target,
    },

    /// Show the income statement, balance sheet and cash flow
    Statements {
        #[command(flatten)]
        target: Target,
    },

    /// Overview, statements, ratios, valuation and scenarios together
    Report {
        #[command(flatten)]
        target: Target,

        #[command(flatten)]
        assumptions: AssumptionArgs,
    },
}

#[tokio::main]
async fn main() {
    // Loaded before logging so RUST_LOG may come from .env
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli.command).await {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new(VERBOSE_LOG_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Value {
            target,
            assumptions,
        } => cmd::value::run(&target, &assumptions).await,
        Commands::Scenarios {
            target,
            assumptions,
        } => cmd::scenarios::run(&target, &assumptions).await,
        Commands::Ratios { target } => cmd::ratios::run(&target).await,
        Commands::Overview { target } => cmd::overview::run(&target).await,
        Commands::Statements { target } => cmd::statements::run(&target).await,
        Commands::Report {
            target,
            assumptions,
        } => cmd::report::run(&target, &assumptions).await,
    }
}

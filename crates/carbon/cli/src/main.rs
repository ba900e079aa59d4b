//! carbonctl - Command-line interface for carbon intelligence
//!
//! Operators use this CLI to:
//! - Analyze a facility record and certify the resulting carbon credits
//! - Run what-if simulations over adjusted emissions
//! - Verify issued certificates against the CarbonChain ledger
//! - Inspect and integrity-check the ledger itself

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use carbon_engine::AnalysisPipeline;
use clap::{Parser, Subcommand};
use tracing::{debug, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod output;

use commands::analyze::{AnalyzeArgs, SimulateArgs};
use commands::certificate::VerifyArgs;
use commands::ledger::LedgerCommands;
use config::{CarbonConfig, LedgerConfig, LoggingConfig};
use output::OutputFormat;

/// carbonctl application
#[derive(Parser)]
#[command(name = "carbonctl")]
#[command(about = "Carbon intelligence - emission analysis and certificate ledger", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "CARBON_CONFIG")]
    config: Option<String>,

    /// Ledger file; overrides the configured ledger backend
    #[arg(short, long, env = "CARBON_LEDGER_PATH")]
    ledger: Option<PathBuf>,

    /// Output format (text, json, yaml)
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Log level
    #[arg(long, env = "CARBON_LOG_LEVEL")]
    log_level: Option<String>,

    /// Enable JSON logging
    #[arg(long, env = "CARBON_LOG_JSON")]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand)]
enum Commands {
    /// Analyze a facility record and certify the result on the ledger
    Analyze(AnalyzeArgs),

    /// What-if simulation; never touches the ledger
    #[command(alias = "whatif")]
    Simulate(SimulateArgs),

    /// Verify a certificate against the ledger
    Verify(VerifyArgs),

    /// Inspect the certificate ledger
    Ledger {
        #[command(subcommand)]
        command: LedgerCommands,
    },

    /// Show the effective configuration
    Config,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration, then apply CLI overrides
    let mut config = CarbonConfig::load(cli.config.as_deref()).context("invalid configuration")?;
    if let Some(path) = cli.ledger.clone() {
        config.ledger = LedgerConfig::File { path };
    }
    if let Some(level) = cli.log_level.clone() {
        config.logging.level = level;
    }
    config.logging.json |= cli.json_logs;

    init_tracing(&config.logging);
    debug!(ledger = ?config.ledger, "configuration loaded");

    let format = cli.format;
    let ok = match cli.command {
        Commands::Config => {
            output::print_single(&config, format)?;
            true
        }
        Commands::Analyze(args) => {
            if config.ledger == LedgerConfig::Memory {
                warn!("certificates are issued against an in-memory ledger and discarded on exit; pass --ledger to persist them");
            }
            commands::analyze::analyze(args, &open_pipeline(&config)?, format)?;
            true
        }
        Commands::Simulate(args) => {
            commands::analyze::simulate(args, &open_pipeline(&config)?, format)?;
            true
        }
        Commands::Verify(args) => {
            let pipeline = open_pipeline(&config)?;
            commands::certificate::verify(args, pipeline.ledger(), format)?
        }
        Commands::Ledger { command } => {
            let pipeline = open_pipeline(&config)?;
            commands::ledger::execute(command, pipeline.ledger(), format)?
        }
    };

    if !ok {
        std::process::exit(1);
    }
    Ok(())
}

fn open_pipeline(config: &CarbonConfig) -> anyhow::Result<AnalysisPipeline> {
    let ledger = config.ledger.open().context("failed to open ledger")?;
    Ok(AnalysisPipeline::new(config.policy.clone(), Arc::new(ledger)))
}

/// Logs go to stderr so stdout stays machine-readable.
fn init_tracing(logging: &LoggingConfig) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| logging.level.clone().into());

    if logging.json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

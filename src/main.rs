//! xpub-scan - Discover the active addresses of an extended public key
//!
//! Walks receiving and change branches of every derivation mode, queries
//! a block explorer for each derived address and reports balances.
//! Only public keys are handled: nothing is ever signed or broadcast.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::error;

use xpub_scan::cli::commands;
use xpub_scan::config::Config;

/// xpub-scan - Extended public key scanner
#[derive(Parser)]
#[command(name = "xpub-scan")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan an extended public key
    Scan {
        /// Extended public key (xpub, tpub, Ltub, dgub)
        key: String,

        /// Currency symbol (BTC, LTC, DOGE, BCH). Defaults to the key prefix
        #[arg(long)]
        currency: Option<String>,

        /// Consecutive inactive receiving addresses before stopping
        #[arg(long)]
        gap_limit: Option<u32>,

        /// Only scan derivation modes starting with this prefix (e.g. "native")
        #[arg(long)]
        derivation_mode: Option<String>,

        /// Force testnet network
        #[arg(long)]
        testnet: bool,

        /// Skip transaction lists
        #[arg(long)]
        balance_only: bool,

        /// Walk derivation modes and branches concurrently
        #[arg(long)]
        concurrent: bool,

        /// Attempts per explorer request
        #[arg(long)]
        retries: Option<u32>,

        /// Delay between attempts in milliseconds
        #[arg(long)]
        retry_delay_ms: Option<u64>,

        /// Write the JSON report to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show current configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("xpub_scan=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration
    let mut config = match Config::load(&cli.config) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load configuration: {:#}", e);
            std::process::exit(1);
        }
    };

    // Execute command
    let result = match cli.command {
        Commands::Scan {
            key,
            currency,
            gap_limit,
            derivation_mode,
            testnet,
            balance_only,
            concurrent,
            retries,
            retry_delay_ms,
            output,
        } => {
            if let Some(gap_limit) = gap_limit {
                config.scan.gap_limit = gap_limit;
            }
            if derivation_mode.is_some() {
                config.scan.derivation_mode = derivation_mode;
            }
            if let Some(retries) = retries {
                config.fetch.retries = retries;
            }
            if let Some(delay) = retry_delay_ms {
                config.fetch.retry_delay_ms = delay;
            }
            config.scan.testnet |= testnet;
            config.scan.balance_only |= balance_only;
            config.scan.concurrent_walks |= concurrent;

            if let Err(e) = config.validate() {
                error!("Invalid configuration: {:#}", e);
                std::process::exit(1);
            }

            commands::scan(&config, &key, currency.as_deref(), output.as_deref()).await
        }
        Commands::Config => commands::show_config(&config),
    };

    if let Err(e) = result {
        error!("Command failed: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

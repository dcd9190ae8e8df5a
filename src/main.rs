//! Flash-loan Volume Bot
//!
//! Main entry point. Loads configuration, connects every pool wallet to the
//! RPC endpoint, then hands control to the round scheduler, which rotates
//! through the wallets until the operator answers "N" at a round boundary.
//!
//! Exit status: 0 when the operator stops the bot, non-zero on any error
//! (configuration, RPC, reverted transaction). Nothing is retried.
//!
//! Author: AI-Generated
//! Created: 2026-10-18

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use volume_bot::config::Environment;
use volume_bot::{load_config, AlloyLedger, Ledger, RangeSampler, RoundScheduler, SignerPool, StdinPrompt};

/// Flash-loan volume bot that rotates swaps across a pool of funded wallets
#[derive(Parser)]
#[command(name = "volume-bot")]
struct Args {
    /// .env file with ENVIRONMENT, LOCAL_RPC_URL, RPC_URL and PRIVATE_KEYS
    /// (defaults to ./.env if present)
    #[arg(long, env = "VOLUME_BOT_ENV_FILE")]
    env_file: Option<PathBuf>,

    /// TOML file with trading parameters (stock defaults when omitted)
    #[arg(short, long, env = "VOLUME_BOT_CONFIG")]
    config: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,
}

fn init_logging(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(false);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_json);

    if let Err(e) = run(args).await {
        error!("Fatal: {:#}", e);
        return Err(e);
    }
    Ok(())
}

async fn run(args: Args) -> Result<()> {
    info!("Flash-loan Volume Bot starting...");

    let config = load_config(args.env_file.as_deref(), args.config.as_deref())
        .context("Failed to load configuration")?;
    info!("Configuration loaded (environment: {})", config.environment);
    info!("RPC URL: {}", config.rpc_url.chars().take(40).collect::<String>());
    info!("Target token: {:?}", config.bot.target_token);
    info!("Flash loaner: {:?}", config.bot.flash_loaner);
    info!(
        "Trades per wallet: {} | loan amount: {} Eth | wait: {} ms",
        config.bot.trade_count, config.bot.flash_loan_amount, config.bot.wait_interval_ms
    );
    info!(
        "Fee buffer: {} Eth | residue kept per wallet: {} Eth",
        config.bot.fee_buffer, config.bot.residue_to_keep
    );

    if config.environment == Environment::Production {
        warn!("PRODUCTION environment - transactions spend real funds!");
    }

    let pool = SignerPool::from_private_keys(config.private_keys.as_slice()).context("Failed to load signer wallets")?;
    info!("Signer pool loaded: {} wallet(s)", pool.len());

    let ledger = AlloyLedger::connect(&config.rpc_url, &pool, config.bot.flash_loaner, config.bot.target_token)
        .await
        .context("Failed to connect to RPC")?;

    let network = ledger.network().await?;
    info!("Connected to network: {}", network.name);
    info!("Network chainId: {}", network.chain_id);

    let token = ledger.token_metadata().await.context("Failed to read target token metadata")?;
    info!("Target token: {} ({} decimals)", token.symbol, token.decimals);

    let mut scheduler = RoundScheduler::new(
        config.bot.clone(),
        token,
        ledger,
        StdinPrompt::new(),
        pool,
        RangeSampler::from_entropy(),
    );

    let summary = scheduler.run().await?;
    info!(
        "Done: {} round(s), {} wallet activations, {} swaps, {} Eth flash-loaned",
        summary.rounds, summary.activations, summary.swaps, summary.volume
    );

    Ok(())
}

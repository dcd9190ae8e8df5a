//! Trade Cycle Executor
//!
//! Runs one signer's burst of volume actions. Per action: sample a loan
//! amount, call the flash-loan facility (borrow → swap into the target token
//! → repay, all in one transaction), report balances, then sleep a sampled
//! interval.
//!
//! The minimum-output guard is always zero: the bot accepts any swap output
//! and enforces no slippage protection. The only bound on execution is the
//! 120 s deadline passed to the facility.
//!
//! Author: AI-Generated
//! Created: 2026-10-18

use crate::config::BotParams;
use crate::error::Result;
use crate::ledger::Ledger;
use crate::sampler::RangeSampler;
use crate::types::{CycleReport, FlashLoanRequest, TokenMetadata};
use crate::wallet::Signer;
use alloy::primitives::U256;
use chrono::{DateTime, Utc};
use rand::Rng;
use rust_decimal::Decimal;
use std::time::Duration;
use tracing::info;

/// Validity window of each swap request
pub const SWAP_DEADLINE_SECS: i64 = 120;

/// Iterations left in the current activation
struct TradeCycleState {
    remaining: u64,
}

/// Unix deadline `SWAP_DEADLINE_SECS` after `now`
pub fn swap_deadline(now: DateTime<Utc>) -> u64 {
    (now.timestamp() + SWAP_DEADLINE_SECS).max(0) as u64
}

/// Milliseconds as a decimal count of seconds, for logging
fn wait_seconds(wait_ms: u64) -> Decimal {
    (Decimal::from(wait_ms) / Decimal::from(1000)).normalize()
}

pub struct TradeCycleExecutor<'a, L> {
    ledger: &'a L,
    params: &'a BotParams,
    token: &'a TokenMetadata,
}

impl<'a, L: Ledger> TradeCycleExecutor<'a, L> {
    pub fn new(ledger: &'a L, params: &'a BotParams, token: &'a TokenMetadata) -> Self {
        Self { ledger, params, token }
    }

    /// Sample a trade count `k` and run exactly `k` volume actions for
    /// `signer`. `k = 0` runs nothing. The first failed call aborts the burst.
    pub async fn run<R: Rng>(&self, signer: &Signer, sampler: &mut RangeSampler<R>) -> Result<CycleReport> {
        let mut state = TradeCycleState {
            remaining: sampler.sample_int(&self.params.trade_count)?,
        };
        let swaps = state.remaining;
        let mut volume = Decimal::ZERO;

        while state.remaining > 0 {
            let amount = sampler.sample_real(&self.params.flash_loan_amount)?;
            let request = FlashLoanRequest {
                amount,
                token: self.token.address,
                min_amount_out: U256::ZERO,
                deadline: swap_deadline(Utc::now()),
                fee_buffer: self.params.fee_buffer,
            };

            let confirmation = self.ledger.flash_loan_swap(signer, &request).await?;
            volume += amount;

            let native = self.ledger.native_balance(signer.address()).await?;
            let token_balance = self.ledger.token_balance(signer.address(), self.token).await?;

            info!("Flash loan swap confirmed: {}", confirmation.tx_hash);
            info!("Current wallet's Eth balance: {}", native);
            info!("Eth amount used for increasing volume: {}", amount);
            info!("Current wallet's {} balance: {}", self.token.symbol, token_balance);

            let wait_ms = sampler.sample_int(&self.params.wait_interval_ms)?;
            info!(
                "Waiting for {} seconds before starting the next volume increase action...",
                wait_seconds(wait_ms)
            );
            tokio::time::sleep(Duration::from_millis(wait_ms)).await;

            state.remaining -= 1;
        }

        Ok(CycleReport {
            signer_index: signer.index(),
            swaps,
            volume,
        })
    }
}

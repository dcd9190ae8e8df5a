// Core data structures shared by the rotation loop and the ledger

use crate::error::{Result, VolumeBotError};
use alloy::primitives::{Address, TxHash, U256};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Inclusive `[min, max]` bound pair used for trade count, loan amount and
/// wait interval. Invariant: `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeConfig<T> {
    pub min: T,
    pub max: T,
}

impl<T: PartialOrd + fmt::Display> RangeConfig<T> {
    pub fn new(min: T, max: T) -> Result<Self> {
        let range = Self { min, max };
        range.validate()?;
        Ok(range)
    }

    /// Ranges deserialized from TOML bypass `new`, so callers re-check here.
    pub fn validate(&self) -> Result<()> {
        if self.min > self.max {
            return Err(VolumeBotError::InvalidRange {
                min: self.min.to_string(),
                max: self.max.to_string(),
            });
        }
        Ok(())
    }

    /// `min == max`: sampling always yields that value
    pub fn is_degenerate(&self) -> bool {
        self.min == self.max
    }
}

impl<T: fmt::Display> fmt::Display for RangeConfig<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}

/// Chain identity, for display only
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkInfo {
    pub name: String,
    pub chain_id: u64,
}

impl NetworkInfo {
    pub fn from_chain_id(chain_id: u64) -> Self {
        let name = match chain_id {
            1 => "mainnet",
            10 => "optimism",
            56 => "bnb",
            137 => "matic",
            8453 => "base",
            42161 => "arbitrum",
            11155111 => "sepolia",
            17000 => "holesky",
            1337 | 31337 => "anvil",
            _ => "unknown",
        };
        Self {
            name: name.to_string(),
            chain_id,
        }
    }
}

/// Target token metadata, fetched once at startup and cached
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenMetadata {
    pub address: Address,
    pub symbol: String,
    pub decimals: u8,
}

/// Arguments for one borrow-and-swap call on the flash-loan facility
#[derive(Debug, Clone, PartialEq)]
pub struct FlashLoanRequest {
    /// Native amount to borrow (ether units)
    pub amount: Decimal,
    pub token: Address,
    /// Always zero: no slippage protection is enforced by the bot
    pub min_amount_out: U256,
    /// Unix timestamp (seconds) after which the swap must not execute
    pub deadline: u64,
    /// Native value attached to the call to pay facility + swap fees
    pub fee_buffer: Decimal,
}

/// A confirmed (mined, status = success) transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxConfirmation {
    pub tx_hash: TxHash,
    pub block_number: Option<u64>,
    pub gas_used: u64,
}

/// Outcome of one signer activation's trade iterations
#[derive(Debug, Clone, PartialEq)]
pub struct CycleReport {
    pub signer_index: usize,
    pub swaps: u64,
    /// Sum of the sampled loan amounts
    pub volume: Decimal,
}

/// Outcome of the balance forward to the next signer
#[derive(Debug, Clone, PartialEq)]
pub struct HandoffReport {
    pub from_index: usize,
    pub to_index: usize,
    pub amount: Decimal,
    pub confirmation: TxConfirmation,
}

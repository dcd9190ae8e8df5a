//! Flash-loan Volume Bot Library
//!
//! Rotates a pool of funded wallets through bursts of flash-loan-funded swaps
//! into a target token, forwarding each wallet's balance to the next one
//! before it takes over.
//!
//! Author: AI-Generated
//! Created: 2026-10-18

pub mod config;
pub mod contracts;
pub mod error;
pub mod ledger;
pub mod rotation;
pub mod sampler;
pub mod types;
pub mod units;
pub mod wallet;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types
pub use config::{load_config, BotParams, Environment, GlobalConfig};
pub use error::{Result, VolumeBotError};
pub use ledger::{AlloyLedger, Ledger};
pub use rotation::{RoundScheduler, RunSummary, SchedulerState, StdinPrompt};
pub use sampler::RangeSampler;
pub use types::{RangeConfig, TokenMetadata};
pub use wallet::{Signer, SignerPool};

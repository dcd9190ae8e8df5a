//! Ledger Connection
//!
//! The one seam between the rotation loop and the chain. Every method is a
//! blocking step from the loop's point of view: state-changing calls return
//! only once the transaction is mined with a success status.
//!
//! Author: AI-Generated
//! Created: 2026-10-18

pub mod alloy_ledger;

pub use alloy_ledger::AlloyLedger;

use crate::error::Result;
use crate::types::{FlashLoanRequest, NetworkInfo, TokenMetadata, TxConfirmation};
use crate::wallet::Signer;
use alloy::primitives::Address;
use async_trait::async_trait;
use rust_decimal::Decimal;

#[async_trait]
pub trait Ledger: Send + Sync {
    /// Chain identity, for display only
    async fn network(&self) -> Result<NetworkInfo>;

    /// Native currency balance (ether units)
    async fn native_balance(&self, account: Address) -> Result<Decimal>;

    /// Target token balance (token units, per cached decimals)
    async fn token_balance(&self, account: Address, token: &TokenMetadata) -> Result<Decimal>;

    /// Symbol + decimals of the target token. Called once at startup.
    async fn token_metadata(&self) -> Result<TokenMetadata>;

    /// Borrow-and-swap on the flash-loan facility, signed by `signer`
    async fn flash_loan_swap(&self, signer: &Signer, request: &FlashLoanRequest) -> Result<TxConfirmation>;

    /// Native currency transfer from `signer` to `to`
    async fn transfer_native(&self, signer: &Signer, to: Address, amount: Decimal) -> Result<TxConfirmation>;
}

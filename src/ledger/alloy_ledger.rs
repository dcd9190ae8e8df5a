//! alloy-backed Ledger
//!
//! One provider serves every signer: the `EthereumWallet` filler holds all
//! pool keys, and each state-changing call picks its key by setting `from`.
//! Calls are sent, then awaited with `get_receipt()`; a mined receipt with a
//! failed status is an error like any transport failure.
//!
//! No timeout is applied to receipt polling. A transaction that never mines
//! stalls the loop; the on-chain deadline only bounds when the swap may
//! execute.
//!
//! Author: AI-Generated
//! Created: 2026-10-18

use crate::contracts::{IFlashLoaner, IERC20};
use crate::error::{Result, VolumeBotError};
use crate::ledger::Ledger;
use crate::types::{FlashLoanRequest, NetworkInfo, TokenMetadata, TxConfirmation};
use crate::units::{from_base_units, from_wei, to_wei};
use crate::wallet::{Signer, SignerPool};
use alloy::network::{EthereumWallet, TransactionBuilder};
use alloy::primitives::{Address, U256};
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::rpc::types::{TransactionReceipt, TransactionRequest};
use async_trait::async_trait;
use rust_decimal::Decimal;
use tracing::{debug, info};

pub struct AlloyLedger {
    provider: DynProvider,
    flash_loaner: Address,
    target_token: Address,
}

impl AlloyLedger {
    /// Connect to `rpc_url` (http(s):// or ws(s)://) with every pool key
    /// registered for signing.
    pub async fn connect(
        rpc_url: &str,
        pool: &SignerPool,
        flash_loaner: Address,
        target_token: Address,
    ) -> Result<Self> {
        let (first, rest) = pool
            .signers()
            .split_first()
            .ok_or(VolumeBotError::EmptyPool)?;

        let mut wallet = EthereumWallet::from(first.credential().clone());
        for signer in rest {
            wallet.register_signer(signer.credential().clone());
        }

        let provider = ProviderBuilder::new()
            .wallet(wallet)
            .connect(rpc_url)
            .await
            .map_err(|e| VolumeBotError::external("connect", e))?
            .erased();

        info!("Provider ready with {} signer(s) registered", pool.len());

        Ok(Self {
            provider,
            flash_loaner,
            target_token,
        })
    }
}

/// Turn a receipt into a confirmation, rejecting reverted transactions
fn confirm(operation: &str, receipt: TransactionReceipt) -> Result<TxConfirmation> {
    if !receipt.status() {
        return Err(VolumeBotError::external(
            operation,
            format!("transaction {} reverted", receipt.transaction_hash),
        ));
    }

    debug!(
        "{} confirmed: {} (block {:?}, gas {})",
        operation, receipt.transaction_hash, receipt.block_number, receipt.gas_used
    );

    Ok(TxConfirmation {
        tx_hash: receipt.transaction_hash,
        block_number: receipt.block_number,
        gas_used: receipt.gas_used,
    })
}

#[async_trait]
impl Ledger for AlloyLedger {
    async fn network(&self) -> Result<NetworkInfo> {
        let chain_id = self
            .provider
            .get_chain_id()
            .await
            .map_err(|e| VolumeBotError::external("eth_chainId", e))?;
        Ok(NetworkInfo::from_chain_id(chain_id))
    }

    async fn native_balance(&self, account: Address) -> Result<Decimal> {
        let wei = self
            .provider
            .get_balance(account)
            .await
            .map_err(|e| VolumeBotError::external("eth_getBalance", e))?;
        from_wei(wei)
    }

    async fn token_balance(&self, account: Address, token: &TokenMetadata) -> Result<Decimal> {
        let contract = IERC20::new(token.address, self.provider.clone());
        let raw: U256 = contract
            .balanceOf(account)
            .call()
            .await
            .map_err(|e| VolumeBotError::external("balanceOf", e))?;
        from_base_units(raw, token.decimals)
    }

    async fn token_metadata(&self) -> Result<TokenMetadata> {
        let contract = IERC20::new(self.target_token, self.provider.clone());
        let symbol_call = contract.symbol();
        let decimals_call = contract.decimals();
        let (symbol, decimals) = tokio::join!(symbol_call.call(), decimals_call.call());

        Ok(TokenMetadata {
            address: self.target_token,
            symbol: symbol.map_err(|e| VolumeBotError::external("symbol", e))?,
            decimals: decimals.map_err(|e| VolumeBotError::external("decimals", e))?,
        })
    }

    async fn flash_loan_swap(&self, signer: &Signer, request: &FlashLoanRequest) -> Result<TxConfirmation> {
        let amount = to_wei(request.amount)?;
        let fee_buffer = to_wei(request.fee_buffer)?;

        debug!(
            "initiateFlashLoan: amount={} wei, token={:?}, min_out={}, deadline={}, value={} wei, from={:?}",
            amount, request.token, request.min_amount_out, request.deadline, fee_buffer, signer.address()
        );

        let contract = IFlashLoaner::new(self.flash_loaner, self.provider.clone());
        let pending = contract
            .initiateFlashLoan(amount, request.token, request.min_amount_out, U256::from(request.deadline))
            .from(signer.address())
            .value(fee_buffer)
            .send()
            .await
            .map_err(|e| VolumeBotError::external("initiateFlashLoan", e))?;

        debug!("initiateFlashLoan sent: {}", pending.tx_hash());

        let receipt = pending
            .get_receipt()
            .await
            .map_err(|e| VolumeBotError::external("initiateFlashLoan receipt", e))?;
        confirm("initiateFlashLoan", receipt)
    }

    async fn transfer_native(&self, signer: &Signer, to: Address, amount: Decimal) -> Result<TxConfirmation> {
        let value = to_wei(amount)?;
        let tx = TransactionRequest::default()
            .with_from(signer.address())
            .with_to(to)
            .with_value(value);

        let pending = self
            .provider
            .send_transaction(tx)
            .await
            .map_err(|e| VolumeBotError::external("transfer", e))?;

        debug!("transfer sent: {}", pending.tx_hash());

        let receipt = pending
            .get_receipt()
            .await
            .map_err(|e| VolumeBotError::external("transfer receipt", e))?;
        confirm("transfer", receipt)
    }
}

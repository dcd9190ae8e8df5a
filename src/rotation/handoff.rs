//! Balance handoff between consecutive signers.
//!
//! The residual (`balance - residue_to_keep`) is sent as computed. A
//! non-positive residual is not clamped or skipped: the transfer is still
//! attempted and the ledger's rejection ends the run like any other failed
//! call.

use crate::config::BotParams;
use crate::error::Result;
use crate::ledger::Ledger;
use crate::types::HandoffReport;
use crate::wallet::Signer;
use rust_decimal::Decimal;
use tracing::{info, warn};

pub struct HandoffController<'a, L> {
    ledger: &'a L,
    params: &'a BotParams,
}

impl<'a, L: Ledger> HandoffController<'a, L> {
    pub fn new(ledger: &'a L, params: &'a BotParams) -> Self {
        Self { ledger, params }
    }

    /// Forward `from`'s spendable balance to `to` and wait for confirmation.
    /// `from == to` (single-signer pool) is a plain self-transfer.
    pub async fn hand_off(&self, from: &Signer, to: &Signer) -> Result<HandoffReport> {
        let balance = self.ledger.native_balance(from.address()).await?;
        let residual = balance - self.params.residue_to_keep;

        if residual <= Decimal::ZERO {
            warn!(
                "Wallet {} balance {} does not cover residue {}; sending {} anyway",
                from.number(),
                balance,
                self.params.residue_to_keep,
                residual
            );
        }

        info!("Sending {} Eth to the next wallet (wallet {})", residual, to.number());

        let confirmation = self.ledger.transfer_native(from, to.address(), residual).await?;

        Ok(HandoffReport {
            from_index: from.index(),
            to_index: to.index(),
            amount: residual,
            confirmation,
        })
    }
}

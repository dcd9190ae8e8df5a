//! Signer Pool: fixed, ordered, circular set of funded wallets
//!
//! Purpose:
//!     Owns every signer for the lifetime of the process and tracks which one
//!     is active. Advancing past the last signer wraps to the first and tells
//!     the scheduler a round is complete.
//!
//! Author: AI-Generated
//! Created: 2026-10-18
//!
//! Design:
//!     - Cursor is the only mutable state; only the round scheduler moves it
//!     - peek_next() is read-only so the handoff can address the next wallet
//!       before the cursor moves
//!     - A pool of one is legal: next == current, every advance wraps

use crate::error::{Result, VolumeBotError};
use alloy::primitives::Address;
use alloy::signers::local::PrivateKeySigner;
use std::fmt;

/// One funded account able to authorize transactions
pub struct Signer {
    index: usize,
    address: Address,
    credential: PrivateKeySigner,
}

impl Signer {
    pub fn new(index: usize, credential: PrivateKeySigner) -> Self {
        Self {
            index,
            address: credential.address(),
            credential,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// 1-based number used in operator-facing logs
    pub fn number(&self) -> usize {
        self.index + 1
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn credential(&self) -> &PrivateKeySigner {
        &self.credential
    }
}

// Never print key material
impl fmt::Debug for Signer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signer")
            .field("index", &self.index)
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

/// Result of moving the cursor one step
#[derive(Debug)]
pub struct Advance<'a> {
    pub next: &'a Signer,
    /// True iff the step went from the last signer back to the first
    pub wrapped: bool,
}

pub struct SignerPool {
    signers: Vec<Signer>,
    active: usize,
}

impl SignerPool {
    pub fn new(credentials: Vec<PrivateKeySigner>) -> Result<Self> {
        if credentials.is_empty() {
            return Err(VolumeBotError::EmptyPool);
        }

        let signers = credentials
            .into_iter()
            .enumerate()
            .map(|(index, credential)| Signer::new(index, credential))
            .collect();

        Ok(Self { signers, active: 0 })
    }

    /// Parse hex private keys (with or without `0x`) into a pool
    pub fn from_private_keys<S: AsRef<str>>(keys: &[S]) -> Result<Self> {
        let credentials = keys
            .iter()
            .enumerate()
            .map(|(i, key)| {
                key.as_ref()
                    .trim()
                    .parse::<PrivateKeySigner>()
                    .map_err(|e| VolumeBotError::config(format!("Invalid private key #{}: {}", i + 1, e)))
            })
            .collect::<Result<Vec<_>>>()?;

        Self::new(credentials)
    }

    pub fn len(&self) -> usize {
        self.signers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signers.is_empty()
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn current(&self) -> &Signer {
        &self.signers[self.active]
    }

    pub fn peek_next(&self) -> &Signer {
        &self.signers[self.next_index()]
    }

    pub fn advance(&mut self) -> Advance<'_> {
        let next = self.next_index();
        let wrapped = next == 0;
        self.active = next;
        Advance {
            next: &self.signers[next],
            wrapped,
        }
    }

    pub fn signers(&self) -> &[Signer] {
        &self.signers
    }

    fn next_index(&self) -> usize {
        (self.active + 1) % self.signers.len()
    }
}

//! Funded signer wallets and the circular pool that rotates through them.

pub mod pool;

pub use pool::{Advance, Signer, SignerPool};

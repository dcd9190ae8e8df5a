//! Wallet Rotation
//!
//! The orchestration core: each signer runs a randomized burst of
//! flash-loan swaps, forwards its remaining balance to the next signer, and
//! the scheduler moves on. A full pass over the pool is a round; between
//! rounds the operator decides whether to keep going.
//!
//! Execution is strictly sequential. Every external call is awaited before
//! the next one is issued and any failure ends the run: there are no retries
//! and no partial-progress records.

pub mod executor;
pub mod handoff;
pub mod prompt;
pub mod scheduler;

pub use executor::{TradeCycleExecutor, SWAP_DEADLINE_SECS};
pub use handoff::HandoffController;
pub use prompt::{OperatorPrompt, RoundDecision, StdinPrompt, CONTINUE_PROMPT};
pub use scheduler::{RoundScheduler, RunSummary, SchedulerState};

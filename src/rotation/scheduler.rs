//! Round Scheduler: drives the rotation state machine
//!
//! Purpose:
//!     Walks the signer pool one activation at a time. An activation runs the
//!     signer's trade burst, hands its balance to the next signer, then moves
//!     the pool cursor. When the cursor wraps, the operator is asked whether
//!     to start another round.
//!
//! Author: AI-Generated
//! Created: 2026-10-18
//!
//! States:
//!     Activating(i) ──(advance, no wrap)──▶ Activating(i+1)
//!     Activating(i) ──(advance, wrapped)──▶ RoundBoundary
//!     RoundBoundary ──(answer != "n")─────▶ Activating(0), round += 1
//!     RoundBoundary ──(answer == "n")─────▶ Terminated
//!
//! Terminated is the only way out; otherwise the bot runs forever. An error
//! in any step leaves the state untouched and is returned to the caller.

use crate::config::BotParams;
use crate::error::Result;
use crate::ledger::Ledger;
use crate::rotation::executor::TradeCycleExecutor;
use crate::rotation::handoff::HandoffController;
use crate::rotation::prompt::{OperatorPrompt, RoundDecision, CONTINUE_PROMPT};
use crate::sampler::RangeSampler;
use crate::types::TokenMetadata;
use crate::wallet::SignerPool;
use rand::rngs::StdRng;
use rand::Rng;
use rust_decimal::Decimal;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    /// Signer at this pool index is about to trade
    Activating(usize),
    /// Every signer has had its turn this round
    RoundBoundary,
    Terminated,
}

/// Totals for a finished run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    pub rounds: u64,
    pub activations: u64,
    pub swaps: u64,
    pub volume: Decimal,
}

pub struct RoundScheduler<L, P, R: Rng = StdRng> {
    params: BotParams,
    token: TokenMetadata,
    ledger: L,
    prompt: P,
    pool: SignerPool,
    sampler: RangeSampler<R>,
    state: SchedulerState,
    round: u64,
    summary: RunSummary,
}

impl<L: Ledger, P: OperatorPrompt, R: Rng> RoundScheduler<L, P, R> {
    pub fn new(
        params: BotParams,
        token: TokenMetadata,
        ledger: L,
        prompt: P,
        pool: SignerPool,
        sampler: RangeSampler<R>,
    ) -> Self {
        Self {
            params,
            token,
            ledger,
            prompt,
            pool,
            sampler,
            state: SchedulerState::Activating(0),
            round: 1,
            summary: RunSummary::default(),
        }
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn round(&self) -> u64 {
        self.round
    }

    pub fn pool(&self) -> &SignerPool {
        &self.pool
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    pub fn prompt(&self) -> &P {
        &self.prompt
    }

    /// Perform one transition and return the new state
    pub async fn step(&mut self) -> Result<SchedulerState> {
        let next = match self.state {
            SchedulerState::Activating(index) => self.activate(index).await?,
            SchedulerState::RoundBoundary => self.round_boundary().await?,
            SchedulerState::Terminated => SchedulerState::Terminated,
        };
        self.state = next;
        Ok(next)
    }

    /// Step until the operator stops the bot
    pub async fn run(&mut self) -> Result<RunSummary> {
        while self.state != SchedulerState::Terminated {
            self.step().await?;
        }
        Ok(self.summary.clone())
    }

    async fn activate(&mut self, index: usize) -> Result<SchedulerState> {
        debug_assert_eq!(index, self.pool.active_index());

        if index == 0 {
            info!("Round {}", self.round);
        }

        let signer = self.pool.current();
        info!("Wallet number {} ({:?})", signer.number(), signer.address());

        let cycle = TradeCycleExecutor::new(&self.ledger, &self.params, &self.token)
            .run(signer, &mut self.sampler)
            .await?;

        HandoffController::new(&self.ledger, &self.params)
            .hand_off(signer, self.pool.peek_next())
            .await?;

        self.summary.activations += 1;
        self.summary.swaps += cycle.swaps;
        self.summary.volume += cycle.volume;

        let advance = self.pool.advance();
        Ok(if advance.wrapped {
            SchedulerState::RoundBoundary
        } else {
            SchedulerState::Activating(advance.next.index())
        })
    }

    async fn round_boundary(&mut self) -> Result<SchedulerState> {
        let answer = self.prompt.ask(CONTINUE_PROMPT).await?;

        match RoundDecision::from_answer(&answer) {
            RoundDecision::Stop => {
                self.summary.rounds = self.round;
                info!(
                    "Stopping after round {}: {} activations, {} swaps, {} Eth volume",
                    self.round, self.summary.activations, self.summary.swaps, self.summary.volume
                );
                Ok(SchedulerState::Terminated)
            }
            RoundDecision::Continue => {
                self.round += 1;
                Ok(SchedulerState::Activating(0))
            }
        }
    }
}

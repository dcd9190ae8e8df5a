// Test doubles shared by the unit tests: recording ledger, scripted operator,
// deterministic pools and parameters.

use crate::config::{BotParams, DEFAULT_TARGET_TOKEN};
use crate::error::{Result, VolumeBotError};
use crate::ledger::Ledger;
use crate::rotation::OperatorPrompt;
use crate::types::{FlashLoanRequest, NetworkInfo, RangeConfig, TokenMetadata, TxConfirmation};
use crate::wallet::{Signer, SignerPool};
use alloy::primitives::{Address, B256};
use async_trait::async_trait;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

/// Pool of `n` signers with keys 0x..01, 0x..02, ...
pub fn test_pool(n: usize) -> SignerPool {
    let keys: Vec<String> = (1..=n).map(|i| format!("{:064x}", i)).collect();
    SignerPool::from_private_keys(keys.as_slice()).unwrap()
}

pub fn test_token() -> TokenMetadata {
    TokenMetadata {
        address: DEFAULT_TARGET_TOKEN,
        symbol: "USDC".to_string(),
        decimals: 6,
    }
}

/// Stock parameters with a fixed trade count and a fixed 1.5 s wait
pub fn test_params(trades: u64) -> BotParams {
    BotParams {
        trade_count: RangeConfig { min: trades, max: trades },
        wait_interval_ms: RangeConfig { min: 1500, max: 1500 },
        ..BotParams::default()
    }
}

/// Everything the fake ledger was asked to do, in order
#[derive(Debug, Clone, PartialEq)]
pub enum LedgerEvent {
    Swap { from: Address, request: FlashLoanRequest },
    Transfer { from: Address, to: Address, amount: Decimal },
}

#[derive(Default)]
struct FakeState {
    events: Vec<LedgerEvent>,
    balances: HashMap<Address, Decimal>,
    swap_attempts: usize,
    nonce: u64,
}

/// In-memory ledger. Transfers move balance; swaps leave it untouched.
pub struct FakeLedger {
    state: Mutex<FakeState>,
    default_balance: Decimal,
    token_balance: Decimal,
    /// 1-based swap attempt that reverts
    fail_swap_at: Option<usize>,
}

impl FakeLedger {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(FakeState::default()),
            default_balance: dec!(1.2),
            token_balance: dec!(850.5),
            fail_swap_at: None,
        }
    }

    pub fn with_balance(mut self, balance: Decimal) -> Self {
        self.default_balance = balance;
        self
    }

    pub fn failing_swap_at(mut self, attempt: usize) -> Self {
        self.fail_swap_at = Some(attempt);
        self
    }

    pub fn events(&self) -> Vec<LedgerEvent> {
        self.state.lock().unwrap().events.clone()
    }

    pub fn swaps(&self) -> Vec<(Address, FlashLoanRequest)> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                LedgerEvent::Swap { from, request } => Some((from, request)),
                _ => None,
            })
            .collect()
    }

    pub fn transfers(&self) -> Vec<(Address, Address, Decimal)> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                LedgerEvent::Transfer { from, to, amount } => Some((from, to, amount)),
                _ => None,
            })
            .collect()
    }

    pub fn swap_attempts(&self) -> usize {
        self.state.lock().unwrap().swap_attempts
    }

    fn confirmation(state: &mut FakeState) -> TxConfirmation {
        state.nonce += 1;
        TxConfirmation {
            tx_hash: B256::left_padding_from(&state.nonce.to_be_bytes()),
            block_number: Some(state.nonce),
            gas_used: 21_000,
        }
    }
}

#[async_trait]
impl Ledger for FakeLedger {
    async fn network(&self) -> Result<NetworkInfo> {
        Ok(NetworkInfo::from_chain_id(31337))
    }

    async fn native_balance(&self, account: Address) -> Result<Decimal> {
        let state = self.state.lock().unwrap();
        Ok(*state.balances.get(&account).unwrap_or(&self.default_balance))
    }

    async fn token_balance(&self, _account: Address, _token: &TokenMetadata) -> Result<Decimal> {
        Ok(self.token_balance)
    }

    async fn token_metadata(&self) -> Result<TokenMetadata> {
        Ok(test_token())
    }

    async fn flash_loan_swap(&self, signer: &Signer, request: &FlashLoanRequest) -> Result<TxConfirmation> {
        let mut state = self.state.lock().unwrap();
        state.swap_attempts += 1;
        if self.fail_swap_at == Some(state.swap_attempts) {
            return Err(VolumeBotError::external("initiateFlashLoan", "execution reverted"));
        }
        state.events.push(LedgerEvent::Swap {
            from: signer.address(),
            request: request.clone(),
        });
        Ok(Self::confirmation(&mut state))
    }

    async fn transfer_native(&self, signer: &Signer, to: Address, amount: Decimal) -> Result<TxConfirmation> {
        let mut state = self.state.lock().unwrap();
        if amount <= Decimal::ZERO {
            return Err(VolumeBotError::external(
                "transfer",
                format!("invalid transfer value {}", amount),
            ));
        }

        let from = signer.address();
        let from_balance = *state.balances.get(&from).unwrap_or(&self.default_balance);
        let to_balance = *state.balances.get(&to).unwrap_or(&self.default_balance);
        if from != to {
            state.balances.insert(from, from_balance - amount);
            state.balances.insert(to, to_balance + amount);
        }

        state.events.push(LedgerEvent::Transfer { from, to, amount });
        Ok(Self::confirmation(&mut state))
    }
}

/// Operator that replays canned answers and records each question
pub struct ScriptedPrompt {
    answers: VecDeque<String>,
    pub asked: Vec<String>,
}

impl ScriptedPrompt {
    pub fn new(answers: &[&str]) -> Self {
        Self {
            answers: answers.iter().map(|a| a.to_string()).collect(),
            asked: Vec::new(),
        }
    }
}

#[async_trait]
impl OperatorPrompt for ScriptedPrompt {
    async fn ask(&mut self, question: &str) -> Result<String> {
        self.asked.push(question.to_string());
        self.answers
            .pop_front()
            .ok_or_else(|| VolumeBotError::external("operator prompt", "script exhausted"))
    }
}

//! Operator confirmation at round boundaries.

use crate::error::{Result, VolumeBotError};
use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Stdin};

pub const CONTINUE_PROMPT: &str = "Continue next round? [Y/N]: ";

/// Asks the operator one question and returns the raw answer
#[async_trait]
pub trait OperatorPrompt: Send {
    async fn ask(&mut self, question: &str) -> Result<String>;
}

/// What the operator chose at a round boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundDecision {
    Continue,
    Stop,
}

impl RoundDecision {
    /// Only an explicit "n"/"N" stops; anything else (including an empty
    /// line) continues.
    pub fn from_answer(answer: &str) -> Self {
        if answer.trim().eq_ignore_ascii_case("n") {
            Self::Stop
        } else {
            Self::Continue
        }
    }
}

/// Interactive prompt on the process's stdin/stdout
pub struct StdinPrompt {
    reader: BufReader<Stdin>,
}

impl StdinPrompt {
    pub fn new() -> Self {
        Self {
            reader: BufReader::new(tokio::io::stdin()),
        }
    }
}

impl Default for StdinPrompt {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OperatorPrompt for StdinPrompt {
    async fn ask(&mut self, question: &str) -> Result<String> {
        let mut stdout = tokio::io::stdout();
        stdout
            .write_all(question.as_bytes())
            .await
            .map_err(|e| VolumeBotError::external("operator prompt", e))?;
        stdout
            .flush()
            .await
            .map_err(|e| VolumeBotError::external("operator prompt", e))?;

        // EOF leaves the line empty, which reads as "continue"
        let mut line = String::new();
        self.reader
            .read_line(&mut line)
            .await
            .map_err(|e| VolumeBotError::external("operator prompt", e))?;

        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

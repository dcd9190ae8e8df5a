//! Error taxonomy for the volume bot.
//!
//! Every variant is fatal: the rotation loop performs no local recovery and
//! no retries, so errors bubble straight up to `main` and end the process.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum VolumeBotError {
    /// Missing or invalid environment / parameter values (startup only)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A blocking external operation (swap, balance query, transfer) failed
    #[error("External call failed ({operation}): {message}")]
    ExternalCall { operation: String, message: String },

    #[error("Invalid range: min {min} > max {max}")]
    InvalidRange { min: String, max: String },

    #[error("Signer pool is empty: at least one private key is required")]
    EmptyPool,
}

impl VolumeBotError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Wrap any displayable failure as an `ExternalCall` for `operation`.
    pub fn external(operation: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::ExternalCall {
            operation: operation.into(),
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, VolumeBotError>;

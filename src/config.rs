//! Configuration management
//!
//! Secrets and endpoints come from the environment (.env via dotenv); trading
//! parameters come from an optional TOML file whose fields all default to the
//! stock bot settings. Both are validated once and frozen into a
//! `GlobalConfig` that is passed explicitly to whoever needs it.

use crate::error::{Result, VolumeBotError};
use crate::types::RangeConfig;
use alloy::primitives::{address, Address};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Mainnet USDC
pub const DEFAULT_TARGET_TOKEN: Address = address!("A0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48");
pub const DEFAULT_FLASH_LOANER: Address = address!("faA7b3a4b5c3f54a934a2e33D34C7bC099f96CCE");

/// Which RPC endpoint to use
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    /// Local fork / devnet (LOCAL_RPC_URL)
    Dev,
    /// Live network (RPC_URL)
    Production,
}

impl FromStr for Environment {
    type Err = VolumeBotError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "dev" => Ok(Self::Dev),
            "production" => Ok(Self::Production),
            other => Err(VolumeBotError::config(format!(
                "Invalid environment '{}': expected 'dev' or 'production'",
                other
            ))),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Dev => write!(f, "dev"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Bot parameters as written in the TOML file
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BotParamsFile {
    pub trade_count: RangeConfig<u64>,
    /// Milliseconds between volume actions
    pub wait_interval_ms: RangeConfig<u64>,
    /// Ether amount to flash loan per action
    pub flash_loan_amount: RangeConfig<Decimal>,
    /// Ether attached to each flash-loan call to pay loan + swap fees
    pub fee_buffer: Decimal,
    /// Ether left behind when a wallet hands off to the next one
    pub residue_to_keep: Decimal,
    pub target_token: String,
    pub flash_loaner: String,
}

impl Default for BotParamsFile {
    fn default() -> Self {
        Self {
            trade_count: RangeConfig { min: 1, max: 3 },
            wait_interval_ms: RangeConfig { min: 1000, max: 2000 },
            flash_loan_amount: RangeConfig {
                min: Decimal::new(25, 2),
                max: Decimal::new(5, 1),
            },
            fee_buffer: Decimal::new(2, 1),
            residue_to_keep: Decimal::new(5, 3),
            target_token: DEFAULT_TARGET_TOKEN.to_string(),
            flash_loaner: DEFAULT_FLASH_LOANER.to_string(),
        }
    }
}

/// Validated bot parameters
#[derive(Debug, Clone, PartialEq)]
pub struct BotParams {
    pub trade_count: RangeConfig<u64>,
    pub wait_interval_ms: RangeConfig<u64>,
    pub flash_loan_amount: RangeConfig<Decimal>,
    pub fee_buffer: Decimal,
    pub residue_to_keep: Decimal,
    pub target_token: Address,
    pub flash_loaner: Address,
}

impl Default for BotParams {
    fn default() -> Self {
        let file = BotParamsFile::default();
        Self {
            trade_count: file.trade_count,
            wait_interval_ms: file.wait_interval_ms,
            flash_loan_amount: file.flash_loan_amount,
            fee_buffer: file.fee_buffer,
            residue_to_keep: file.residue_to_keep,
            target_token: DEFAULT_TARGET_TOKEN,
            flash_loaner: DEFAULT_FLASH_LOANER,
        }
    }
}

impl BotParamsFile {
    pub fn validate(self) -> Result<BotParams> {
        check_range("trade_count", &self.trade_count)?;
        check_range("wait_interval_ms", &self.wait_interval_ms)?;
        check_range("flash_loan_amount", &self.flash_loan_amount)?;

        if self.flash_loan_amount.min < Decimal::ZERO {
            return Err(VolumeBotError::config("flash_loan_amount must not be negative"));
        }
        if self.fee_buffer < Decimal::ZERO {
            return Err(VolumeBotError::config("fee_buffer must not be negative"));
        }
        if self.residue_to_keep < Decimal::ZERO {
            return Err(VolumeBotError::config("residue_to_keep must not be negative"));
        }

        Ok(BotParams {
            trade_count: self.trade_count,
            wait_interval_ms: self.wait_interval_ms,
            flash_loan_amount: self.flash_loan_amount,
            fee_buffer: self.fee_buffer,
            residue_to_keep: self.residue_to_keep,
            target_token: parse_address("target_token", &self.target_token)?,
            flash_loaner: parse_address("flash_loaner", &self.flash_loaner)?,
        })
    }
}

impl BotParams {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: BotParamsFile = toml::from_str(content)
            .map_err(|e| VolumeBotError::config(format!("Failed to parse bot parameters: {}", e)))?;
        file.validate()
    }

    /// Load from a TOML file, or stock defaults when no path is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let content = std::fs::read_to_string(path).map_err(|e| {
                    VolumeBotError::config(format!("Failed to read config file {}: {}", path.display(), e))
                })?;
                Self::from_toml_str(&content)
            }
            None => Ok(Self::default()),
        }
    }
}

fn check_range<T: PartialOrd + fmt::Display>(name: &str, range: &RangeConfig<T>) -> Result<()> {
    range
        .validate()
        .map_err(|e| VolumeBotError::config(format!("{}: {}", name, e)))
}

fn parse_address(name: &str, value: &str) -> Result<Address> {
    Address::from_str(value.trim())
        .map_err(|e| VolumeBotError::config(format!("{}: invalid address '{}': {}", name, value, e)))
}

/// Immutable configuration snapshot, built once at startup
#[derive(Clone)]
pub struct GlobalConfig {
    pub environment: Environment,
    pub rpc_url: String,
    pub private_keys: Vec<String>,
    pub bot: BotParams,
}

// Keys stay out of logs
impl fmt::Debug for GlobalConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GlobalConfig")
            .field("environment", &self.environment)
            .field("rpc_url", &self.rpc_url)
            .field("private_keys", &format_args!("[{} redacted]", self.private_keys.len()))
            .field("bot", &self.bot)
            .finish()
    }
}

impl GlobalConfig {
    /// Build from an environment lookup (`std::env::var` in production,
    /// a map in tests).
    pub fn from_env<F>(lookup: F, bot: BotParams) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| VolumeBotError::config(format!("Missing environment variable: {}", key)))
        };

        let environment: Environment = require("ENVIRONMENT")?.trim().parse()?;
        let local_rpc_url = require("LOCAL_RPC_URL")?;
        let mainnet_rpc_url = require("RPC_URL")?;
        let private_keys: Vec<String> = require("PRIVATE_KEYS")?
            .split_whitespace()
            .map(str::to_string)
            .collect();

        if private_keys.is_empty() {
            return Err(VolumeBotError::config("No private keys provided"));
        }

        let rpc_url = match environment {
            Environment::Dev => local_rpc_url,
            Environment::Production => mainnet_rpc_url,
        };

        Ok(Self {
            environment,
            rpc_url: rpc_url.trim().to_string(),
            private_keys,
            bot,
        })
    }
}

/// Load `.env` (or `env_file`) plus bot parameters into a `GlobalConfig`
pub fn load_config(env_file: Option<&Path>, params_file: Option<&Path>) -> Result<GlobalConfig> {
    match env_file {
        Some(path) => {
            dotenv::from_path(path).map_err(|e| {
                VolumeBotError::config(format!("Failed to load env file {}: {}", path.display(), e))
            })?;
        }
        None => {
            dotenv::dotenv().ok();
        }
    }

    let bot = BotParams::load(params_file)?;
    GlobalConfig::from_env(|key| std::env::var(key).ok(), bot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    fn full_env(environment: &str) -> HashMap<String, String> {
        env(&[
            ("ENVIRONMENT", environment),
            ("LOCAL_RPC_URL", "http://127.0.0.1:8545"),
            ("RPC_URL", "https://eth.example.org"),
            ("PRIVATE_KEYS", "0xaa 0xbb  0xcc"),
        ])
    }

    #[test]
    fn test_defaults_match_stock_bot() {
        let params = BotParams::default();
        assert_eq!(params.trade_count, RangeConfig { min: 1, max: 3 });
        assert_eq!(params.wait_interval_ms, RangeConfig { min: 1000, max: 2000 });
        assert_eq!(params.flash_loan_amount, RangeConfig { min: dec!(0.25), max: dec!(0.5) });
        assert_eq!(params.fee_buffer, dec!(0.2));
        assert_eq!(params.residue_to_keep, dec!(0.005));
        assert_eq!(params.target_token, DEFAULT_TARGET_TOKEN);
        assert_eq!(BotParamsFile::default().validate().unwrap(), params);
    }

    #[test]
    fn test_shipped_config_matches_defaults() {
        let params = tokio_test::assert_ok!(BotParams::from_toml_str(include_str!("../config/volume_bot.toml")));
        assert_eq!(params, BotParams::default());
    }

    #[test]
    fn test_missing_config_file_is_error() {
        let err = tokio_test::assert_err!(BotParams::load(Some(Path::new("/nonexistent/volume_bot.toml"))));
        assert!(err.to_string().contains("Failed to read config file"));
        assert_eq!(tokio_test::assert_ok!(BotParams::load(None)), BotParams::default());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let params = BotParams::from_toml_str(
            r#"
trade_count = { min = 2, max = 5 }
fee_buffer = "0.1"
"#,
        )
        .unwrap();
        assert_eq!(params.trade_count, RangeConfig { min: 2, max: 5 });
        assert_eq!(params.fee_buffer, dec!(0.1));
        assert_eq!(params.residue_to_keep, dec!(0.005));
    }

    #[test]
    fn test_inverted_range_is_configuration_error() {
        let err = BotParams::from_toml_str("wait_interval_ms = { min = 2000, max = 1000 }").unwrap_err();
        assert!(matches!(err, VolumeBotError::Configuration(_)));
        assert!(err.to_string().contains("wait_interval_ms"));
    }

    #[test]
    fn test_bad_address_is_configuration_error() {
        let err = BotParams::from_toml_str("flash_loaner = \"0x1234\"").unwrap_err();
        assert!(err.to_string().contains("flash_loaner"));
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(BotParams::from_toml_str("max_slippage = 1").is_err());
    }

    #[test]
    fn test_negative_fee_buffer_rejected() {
        assert!(BotParams::from_toml_str("fee_buffer = \"-0.1\"").is_err());
    }

    #[test]
    fn test_env_selects_rpc_by_environment() {
        let vars = full_env("dev");
        let cfg = GlobalConfig::from_env(|k| vars.get(k).cloned(), BotParams::default()).unwrap();
        assert_eq!(cfg.environment, Environment::Dev);
        assert_eq!(cfg.rpc_url, "http://127.0.0.1:8545");
        assert_eq!(cfg.private_keys, vec!["0xaa", "0xbb", "0xcc"]);

        let vars = full_env("production");
        let cfg = GlobalConfig::from_env(|k| vars.get(k).cloned(), BotParams::default()).unwrap();
        assert_eq!(cfg.rpc_url, "https://eth.example.org");
    }

    #[test]
    fn test_invalid_environment_rejected() {
        let vars = full_env("staging");
        let err = GlobalConfig::from_env(|k| vars.get(k).cloned(), BotParams::default()).unwrap_err();
        assert!(err.to_string().contains("staging"));
    }

    #[test]
    fn test_missing_variable_named_in_error() {
        let mut vars = full_env("dev");
        vars.remove("RPC_URL");
        let err = GlobalConfig::from_env(|k| vars.get(k).cloned(), BotParams::default()).unwrap_err();
        assert_eq!(err.to_string(), "Configuration error: Missing environment variable: RPC_URL");
    }

    #[test]
    fn test_blank_private_keys_rejected() {
        let mut vars = full_env("dev");
        vars.insert("PRIVATE_KEYS".to_string(), "   ".to_string());
        assert!(GlobalConfig::from_env(|k| vars.get(k).cloned(), BotParams::default()).is_err());
    }

    #[test]
    fn test_debug_redacts_keys() {
        let vars = full_env("dev");
        let cfg = GlobalConfig::from_env(|k| vars.get(k).cloned(), BotParams::default()).unwrap();
        let rendered = format!("{:?}", cfg);
        assert!(rendered.contains("[3 redacted]"));
        assert!(!rendered.contains("0xbb"));
    }
}

//! Configuration management for ledgerchain

use crate::error::{ChainError, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::str::FromStr;

pub const DEFAULT_CONFIG_FILE: &str = "ledger.toml";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default = "default_rounds")]
    pub rounds: Vec<RoundConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
}

/// One commit: the transactions to pool, then the nonce for the block.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RoundConfig {
    pub nonce: u64,
    #[serde(default)]
    pub transactions: Vec<TransactionConfig>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TransactionConfig {
    pub sender: String,
    pub recipient: String,
    pub amount: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            logging: LoggingConfig::default(),
            rounds: default_rounds(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

impl LoggingConfig {
    pub fn max_level(&self) -> Result<tracing::Level> {
        tracing::Level::from_str(&self.level)
            .map_err(|_| ChainError::Config(format!("unknown logging.level '{}'", self.level)))
    }
}

fn default_level() -> String {
    "info".to_string()
}

fn default_rounds() -> Vec<RoundConfig> {
    vec![
        RoundConfig {
            nonce: 5,
            transactions: vec![TransactionConfig::new("A", "B", 1.0)],
        },
        RoundConfig {
            nonce: 2,
            transactions: vec![
                TransactionConfig::new("C", "D", 4.0),
                TransactionConfig::new("X", "Y", 2.0),
            ],
        },
    ]
}

impl TransactionConfig {
    pub fn new(sender: &str, recipient: &str, amount: f64) -> Self {
        Self {
            sender: sender.to_string(),
            recipient: recipient.to_string(),
            amount,
        }
    }
}

/// Loads `ledger.toml` from the working directory, or the defaults if it is absent.
pub fn load_config() -> Result<Config> {
    let path = Path::new(DEFAULT_CONFIG_FILE);
    if !path.exists() {
        return Ok(Config::default());
    }
    load_config_from(path)
}

pub fn load_config_from(path: impl AsRef<Path>) -> Result<Config> {
    let config_str = fs::read_to_string(path)?;
    parse_config(&config_str)
}

pub fn parse_config(config_str: &str) -> Result<Config> {
    let config: Config = if config_str.trim().is_empty() {
        Config::default()
    } else {
        toml::from_str(config_str)?
    };
    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &Config) -> Result<()> {
    config.logging.max_level()?;

    for (i, round) in config.rounds.iter().enumerate() {
        for tx in &round.transactions {
            if tx.sender.is_empty() || tx.recipient.is_empty() {
                return Err(ChainError::Config(format!(
                    "rounds[{}]: sender and recipient must be set",
                    i
                )));
            }
        }
    }
    Ok(())
}

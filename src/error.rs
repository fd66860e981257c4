//! Error types for ledgerchain

use std::fmt;

use crate::blockchain::Sha256Hash;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainError {
    /// Block `index` does not link to the digest of block `index - 1`.
    ChainIntegrity {
        index: usize,
        expected: Sha256Hash,
        found: Sha256Hash,
    },
    EmptyChain,
    InvalidGenesis(String),
    /// JSON has no representation for NaN or infinity.
    NonFiniteAmount {
        block: usize,
        transaction: usize,
    },
    Serialization(String),
    Config(String),
    IoError(String),
}

impl fmt::Display for ChainError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ChainError::ChainIntegrity {
                index,
                expected,
                found,
            } => write!(
                f,
                "Chain integrity broken at block {}: expected previous hash {}, found {}",
                index,
                hex::encode(expected),
                hex::encode(found)
            ),
            ChainError::EmptyChain => write!(f, "Chain has no blocks"),
            ChainError::InvalidGenesis(msg) => write!(f, "Invalid genesis block: {}", msg),
            ChainError::NonFiniteAmount { block, transaction } => write!(
                f,
                "Transaction {} in block {} has a non-finite amount",
                transaction, block
            ),
            ChainError::Serialization(msg) => write!(f, "Serialization error: {}", msg),
            ChainError::Config(msg) => write!(f, "Configuration error: {}", msg),
            ChainError::IoError(msg) => write!(f, "IO error: {}", msg),
        }
    }
}

impl std::error::Error for ChainError {}

impl From<std::io::Error> for ChainError {
    fn from(err: std::io::Error) -> Self {
        ChainError::IoError(err.to_string())
    }
}

impl From<toml::de::Error> for ChainError {
    fn from(err: toml::de::Error) -> Self {
        ChainError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for ChainError {
    fn from(err: serde_json::Error) -> Self {
        ChainError::Serialization(err.to_string())
    }
}

/// Convenience alias used across the crate
pub type Result<T> = std::result::Result<T, ChainError>;

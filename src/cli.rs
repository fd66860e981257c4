//! Helpers shared by the command-line binaries

use crate::blockchain::{Block, Blockchain};
use crate::config::{Config, RoundConfig};
use crate::error::ChainError;

/// Pools a round's transactions and commits them, linking to the current tail.
///
/// Uses the two-step protocol on purpose: read the tail digest, then hand it to
/// `create_block`.
pub fn apply_round<'a>(chain: &'a mut Blockchain, round: &RoundConfig) -> &'a Block {
    for tx in &round.transactions {
        chain.add_transaction(tx.sender.as_str(), tx.recipient.as_str(), tx.amount);
    }
    let previous_hash = chain.last_block().hash();
    chain.create_block(round.nonce, previous_hash)
}

/// Builds a fresh ledger and replays every configured round on it.
pub fn build_from_config(config: &Config) -> Blockchain {
    let mut chain = Blockchain::new();
    for round in &config.rounds {
        apply_round(&mut chain, round);
    }
    chain
}

/// Checks linkage and describes the verified chain; the error is left for the
/// caller to report exactly once.
pub fn verify_summary(chain: &Blockchain) -> Result<String, ChainError> {
    chain.validate_chain()?;
    Ok(format!("{} blocks, tail {}", chain.len(), chain.last_block().hash_hex()))
}

use crate::blockchain::core::chain::{Block, Blockchain};
use crate::error::ChainError;
use tracing::warn;

/// Walks `blocks` and checks that every block after the first carries the
/// digest of its predecessor as its previous hash.
pub fn validate_linkage(blocks: &[Block]) -> Result<(), ChainError> {
    if blocks.is_empty() {
        return Err(ChainError::EmptyChain);
    }

    let mut expected = blocks[0].hash();
    for (index, block) in blocks.iter().enumerate().skip(1) {
        if block.previous_hash() != &expected {
            warn!(
                "Block {} does not link to its predecessor ({} != {})",
                index,
                hex::encode(block.previous_hash()),
                hex::encode(expected)
            );
            return Err(ChainError::ChainIntegrity {
                index,
                expected,
                found: *block.previous_hash(),
            });
        }
        expected = block.hash();
    }
    Ok(())
}

impl Blockchain {
    /// Reports the first block whose previous hash does not match the digest
    /// of the block before it.
    pub fn validate_chain(&self) -> Result<(), ChainError> {
        validate_linkage(self.blocks())
    }
}

use crate::error::ChainError;
use crate::transaction::Transaction;
use sha2::{Digest, Sha256};
use std::fmt;
use tracing::{debug, info, trace};

pub type Sha256Hash = [u8; 32];

/// Width of the `=` runs either side of a block banner.
pub const BANNER_WIDTH: usize = 25;
/// Width of the `*` rule that closes a chain dump.
pub const FOOTER_WIDTH: usize = 55;

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Block {
    pub(crate) timestamp: i64,
    pub(crate) nonce: u64,
    pub(crate) previous_hash: Sha256Hash,
    pub(crate) transactions: Vec<Transaction>,
}

impl Block {
    /// Creates a block stamped with the current time in Unix nanoseconds.
    pub fn new(nonce: u64, previous_hash: Sha256Hash, transactions: Vec<Transaction>) -> Self {
        let timestamp = chrono::Utc::now()
            .timestamp_nanos_opt()
            .unwrap_or(i64::MAX);
        Self::with_timestamp(timestamp, nonce, previous_hash, transactions)
    }

    pub fn with_timestamp(
        timestamp: i64,
        nonce: u64,
        previous_hash: Sha256Hash,
        transactions: Vec<Transaction>,
    ) -> Self {
        Block {
            timestamp,
            nonce,
            previous_hash,
            transactions,
        }
    }

    /// The zero-valued block. Its digest is the genesis block's previous hash.
    pub fn empty() -> Self {
        Self::with_timestamp(0, 0, [0u8; 32], Vec::new())
    }

    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    pub fn previous_hash(&self) -> &Sha256Hash {
        &self.previous_hash
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Digest input: timestamp, nonce, previous hash, transaction count, then
    /// each transaction in block order. Integers are little-endian.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(8 + 8 + 32 + 8 + self.transactions.len() * 48);
        out.extend_from_slice(&self.timestamp.to_le_bytes());
        out.extend_from_slice(&self.nonce.to_le_bytes());
        out.extend_from_slice(&self.previous_hash);
        out.extend_from_slice(&(self.transactions.len() as u64).to_le_bytes());
        for tx in &self.transactions {
            tx.encode_canonical(&mut out);
        }
        out
    }

    pub fn hash(&self) -> Sha256Hash {
        let encoded = self.canonical_bytes();
        trace!("block digest input: {}", hex::encode(&encoded));
        let mut hasher = Sha256::new();
        hasher.update(&encoded);
        hasher.finalize().into()
    }

    pub fn hash_hex(&self) -> String {
        hex::encode(self.hash())
    }

    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "timestamp:      {}", self.timestamp)?;
        writeln!(f, "nonce:          {}", self.nonce)?;
        writeln!(f, "previous hash:  {}", hex::encode(self.previous_hash))?;
        for tx in &self.transactions {
            write!(f, "{}", tx)?;
        }
        Ok(())
    }
}

/// The ledger: pending transaction pool plus the append-only chain of blocks.
#[derive(Debug, Clone)]
pub struct Blockchain {
    pub(crate) pool: Vec<Transaction>,
    pub(crate) blocks: Vec<Block>,
}

impl Default for Blockchain {
    fn default() -> Self {
        Self::new()
    }
}

impl Blockchain {
    /// Creates a ledger holding only the genesis block.
    pub fn new() -> Self {
        let genesis_block = Self::create_genesis_block();
        info!("Created genesis block {}", genesis_block.hash_hex());
        Blockchain {
            pool: Vec::new(),
            blocks: vec![genesis_block],
        }
    }

    fn create_genesis_block() -> Block {
        Block::new(0, Block::empty().hash(), Vec::new())
    }

    /// Reassembles a ledger from externally held blocks and pending transactions.
    ///
    /// Only the shape is checked here (non-empty, genesis linked to the empty
    /// block); use [`Blockchain::validate_chain`] for full linkage.
    pub fn from_parts(blocks: Vec<Block>, pool: Vec<Transaction>) -> Result<Self, ChainError> {
        let genesis = blocks.first().ok_or(ChainError::EmptyChain)?;
        let expected = Block::empty().hash();
        if genesis.previous_hash != expected {
            return Err(ChainError::InvalidGenesis(format!(
                "Expected previous hash {}, but got {}.",
                hex::encode(expected),
                hex::encode(genesis.previous_hash)
            )));
        }
        Ok(Blockchain { pool, blocks })
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn pool(&self) -> &[Transaction] {
        &self.pool
    }

    pub fn get(&self, index: usize) -> Option<&Block> {
        self.blocks.get(index)
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Always false: a ledger is never without its genesis block.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn pending_len(&self) -> usize {
        self.pool.len()
    }

    pub fn last_block(&self) -> &Block {
        // `new` and `from_parts` both guarantee at least one block.
        &self.blocks[self.blocks.len() - 1]
    }

    pub fn add_transaction(
        &mut self,
        sender: impl Into<String>,
        recipient: impl Into<String>,
        amount: f64,
    ) {
        let tx = Transaction::new(sender, recipient, amount);
        debug!(
            "Pooled transaction {} -> {} ({}), pool size {}",
            tx.sender(),
            tx.recipient(),
            tx.amount(),
            self.pool.len() + 1
        );
        self.pool.push(tx);
    }

    /// Moves every pooled transaction into a new block linked to `previous_hash`.
    ///
    /// `previous_hash` is taken as given; nothing checks it against the last
    /// block until [`Blockchain::validate_chain`] runs.
    pub fn create_block(&mut self, nonce: u64, previous_hash: Sha256Hash) -> &Block {
        let transactions = std::mem::take(&mut self.pool);
        let block = Block::new(nonce, previous_hash, transactions);
        info!(
            "Committed block {} with {} transactions (nonce {})",
            self.blocks.len(),
            block.transactions.len(),
            nonce
        );
        self.blocks.push(block);
        self.last_block()
    }

    /// Links the new block to the current tail's digest and commits the pool.
    pub fn commit_block(&mut self, nonce: u64) -> &Block {
        let previous_hash = self.last_block().hash();
        self.create_block(nonce, previous_hash)
    }

    /// Serializes the committed blocks as JSON.
    ///
    /// Amounts must be finite: JSON would write NaN or infinity as `null` and
    /// the export could not be read back.
    pub fn export_json(&self) -> Result<String, ChainError> {
        for (block, b) in self.blocks.iter().enumerate() {
            let non_finite = b.transactions.iter().position(|tx| !tx.amount().is_finite());
            if let Some(transaction) = non_finite {
                return Err(ChainError::NonFiniteAmount { block, transaction });
            }
        }
        Ok(serde_json::to_string_pretty(&self.blocks)?)
    }

    /// Rebuilds a ledger from [`Blockchain::export_json`] output, with an empty pool.
    pub fn import_json(json: &str) -> Result<Self, ChainError> {
        let blocks: Vec<Block> = serde_json::from_str(json)?;
        Self::from_parts(blocks, Vec::new())
    }

    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Blockchain {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let banner = "=".repeat(BANNER_WIDTH);
        for (i, block) in self.blocks.iter().enumerate() {
            writeln!(f, "{} chain {} {}", banner, i, banner)?;
            write!(f, "{}", block)?;
        }
        writeln!(f, "{}", "*".repeat(FOOTER_WIDTH))
    }
}

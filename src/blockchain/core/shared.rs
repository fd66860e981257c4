use crate::blockchain::core::chain::{Block, Blockchain, Sha256Hash};
use crate::error::ChainError;
use parking_lot::Mutex;
use std::sync::Arc;

/// A [`Blockchain`] that can be handed to several threads.
///
/// Pool and chain sit behind one lock, so a commit (drain pool, append block)
/// is never interleaved with another caller's `add_transaction`.
#[derive(Debug, Clone, Default)]
pub struct SharedBlockchain {
    inner: Arc<Mutex<Blockchain>>,
}

impl SharedBlockchain {
    pub fn new() -> Self {
        Self::from_chain(Blockchain::new())
    }

    pub fn from_chain(chain: Blockchain) -> Self {
        SharedBlockchain {
            inner: Arc::new(Mutex::new(chain)),
        }
    }

    pub fn add_transaction(
        &self,
        sender: impl Into<String>,
        recipient: impl Into<String>,
        amount: f64,
    ) {
        self.inner.lock().add_transaction(sender, recipient, amount);
    }

    pub fn create_block(&self, nonce: u64, previous_hash: Sha256Hash) -> Block {
        self.inner.lock().create_block(nonce, previous_hash).clone()
    }

    /// Reads the tail digest and commits under a single lock acquisition.
    pub fn commit_block(&self, nonce: u64) -> Block {
        self.inner.lock().commit_block(nonce).clone()
    }

    pub fn last_block(&self) -> Block {
        self.inner.lock().last_block().clone()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    pub fn pending_len(&self) -> usize {
        self.inner.lock().pending_len()
    }

    pub fn validate_chain(&self) -> Result<(), ChainError> {
        self.inner.lock().validate_chain()
    }

    /// Runs `f` with the lock held.
    pub fn with<R>(&self, f: impl FnOnce(&Blockchain) -> R) -> R {
        f(&self.inner.lock())
    }

    /// A point-in-time copy of the whole ledger.
    pub fn snapshot(&self) -> Blockchain {
        self.inner.lock().clone()
    }

    pub fn render(&self) -> String {
        self.inner.lock().render()
    }
}

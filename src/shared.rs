//! Thread-safe ledger handle
//!
//! The plain [`Ledger`] is single-writer and synchronous. `SharedLedger`
//! is the extension point for concurrent admitters and sealers: one mutex
//! guards the chain and the pool together, `seal` holds it across the
//! whole read-search-append-flush sequence, and `admit_transaction` takes
//! it only for the append. A transaction admitted while a seal is running
//! lands either in that block or in the pool for the next one, never in
//! both and never nowhere.

use crate::block::Block;
use crate::config::ChainConfig;
use crate::error::Result;
use crate::ledger::Ledger;
use crate::report::{BlockSummary, TransactionRecord};
use parking_lot::Mutex;
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct SharedLedger {
    inner: Arc<Mutex<Ledger>>,
}

impl SharedLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ChainConfig) -> Self {
        SharedLedger {
            inner: Arc::new(Mutex::new(Ledger::with_config(config))),
        }
    }

    /// Queue a transaction. Locks only for the append.
    pub fn admit_transaction(&self, sender: &str, recipient: &str, amount: f64, fee: f64) -> u64 {
        self.inner
            .lock()
            .admit_transaction(sender, recipient, amount, fee)
    }

    /// Seal under the lock: the pool snapshot, proof search, append and
    /// flush form one exclusive region, so no concurrent admission is lost
    /// or double-counted.
    pub fn seal(&self, producer: &str) -> Result<Block> {
        self.inner.lock().seal(producer)
    }

    /// Owned copy of the block at the given 1-based position.
    pub fn get_block(&self, index: u64) -> Option<Block> {
        self.inner.lock().get_block(index).cloned()
    }

    /// Owned copy of the most recently appended block.
    pub fn last_block(&self) -> Block {
        self.inner.lock().last_block().clone()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    pub fn pending_count(&self) -> usize {
        self.inner.lock().pending_transactions().len()
    }

    pub fn block_summaries(&self) -> Vec<BlockSummary> {
        self.inner.lock().block_summaries()
    }

    pub fn transaction_records(&self) -> Vec<TransactionRecord> {
        self.inner.lock().transaction_records()
    }

    pub fn verify(&self) -> Result<()> {
        self.inner.lock().verify()
    }
}

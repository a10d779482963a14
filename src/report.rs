//! Read API for reporting and analytics
//!
//! Consumers get owned snapshots and poll by re-reading; the ledger has no
//! subscription or notification mechanism.

use crate::ledger::Ledger;
use serde::Serialize;

/// Per-block view exposed to reporting: everything tabulation needs
/// without the transaction bodies.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockSummary {
    pub index: u64,
    pub timestamp: u64,
    pub proof: u64,
    pub transaction_count: usize,
    pub producer: String,
}

/// A settled transaction tagged with the block that settled it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionRecord {
    pub sender: String,
    pub recipient: String,
    pub amount: f64,
    pub fee: f64,
    pub block_index: u64,
}

impl Ledger {
    /// One summary per block, in index order.
    pub fn block_summaries(&self) -> Vec<BlockSummary> {
        self.blocks()
            .iter()
            .map(|block| BlockSummary {
                index: block.index,
                timestamp: block.timestamp,
                proof: block.proof,
                transaction_count: block.transactions.len(),
                producer: block.producer.clone(),
            })
            .collect()
    }

    /// Every settled transaction across all blocks, in chain order, each
    /// tagged with its settling block's index. Pending transactions are
    /// not included.
    pub fn transaction_records(&self) -> Vec<TransactionRecord> {
        self.blocks()
            .iter()
            .flat_map(|block| {
                block.transactions.iter().map(|tx| TransactionRecord {
                    sender: tx.sender.clone(),
                    recipient: tx.recipient.clone(),
                    amount: tx.amount,
                    fee: tx.fee,
                    block_index: block.index,
                })
            })
            .collect()
    }
}

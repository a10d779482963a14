//! Block structure, canonical serialization and digests

use crate::error::Result;
use crate::transaction::Transaction;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// One position of the chain. Immutable once constructed.
///
/// Field declaration order is load-bearing: the canonical form serializes
/// fields in exactly this order (index, previous_digest, timestamp,
/// transactions, proof, producer) and every digest depends on it
/// byte-for-byte. Reordering fields changes every block digest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// 1-based chain position, strictly increasing by 1.
    pub index: u64,
    /// Hex digest of the predecessor; the genesis block carries a fixed
    /// sentinel literal instead of a real digest.
    pub previous_digest: String,
    /// Wall-clock milliseconds at creation.
    pub timestamp: u64,
    /// The batch settled by this block, in submission order. May be empty.
    pub transactions: Vec<Transaction>,
    /// The integer that satisfied the admission gate for this block.
    pub proof: u64,
    /// Identity of whoever sealed the block.
    pub producer: String,
}

impl Block {
    /// Construct a block. No validation is performed here; linkage and
    /// proof checks are the ledger's responsibility at seal time, which is
    /// what lets genesis be constructed without satisfying the gate.
    pub fn new(
        index: u64,
        previous_digest: String,
        timestamp: u64,
        transactions: Vec<Transaction>,
        proof: u64,
        producer: String,
    ) -> Self {
        Block {
            index,
            previous_digest,
            timestamp,
            transactions,
            proof,
            producer,
        }
    }

    /// Canonical byte encoding of all six fields, in declaration order.
    /// This is the only representation ever hashed or displayed; two
    /// blocks with identical field values produce identical bytes.
    pub fn canonical_form(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Lowercase hex SHA-256 of the canonical form. Deterministic for a
    /// given block value across processes and time.
    pub fn digest(&self) -> Result<String> {
        let canonical = self.canonical_form()?;
        Ok(hex::encode(Sha256::digest(&canonical)))
    }
}

/// Current wall-clock time in milliseconds, the chain's timestamp unit.
pub fn timestamp_millis() -> u64 {
    chrono::Utc::now().timestamp_millis() as u64
}

//! Ledger: chain ownership, admission, sealing and lookup

use crate::block::{timestamp_millis, Block};
use crate::config::ChainConfig;
use crate::error::{ChainError, Result};
use crate::mempool::Mempool;
use crate::pow;
use crate::transaction::Transaction;
use tracing::info;

/// Sentinel `previous_digest` of the genesis block. A fixed literal, never
/// the output of the hash function.
pub const GENESIS_PREVIOUS_DIGEST: &str = "1";

/// Seed proof recorded on the genesis block. The admission gate is never
/// run for genesis; this value is accepted unconditionally.
pub const GENESIS_PROOF: u64 = 100;

/// An append-only, hash-linked chain of blocks plus the pool of
/// transactions awaiting settlement. Single-writer: all mutation goes
/// through `&mut self`. Explicitly constructed and owned by the caller, so
/// independent chains can coexist.
#[derive(Debug, Clone)]
pub struct Ledger {
    blocks: Vec<Block>,
    mempool: Mempool,
    config: ChainConfig,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger {
    /// Create a ledger with the default config. The genesis block is
    /// synthesized in place: sentinel previous digest, seed proof, gate
    /// bypassed.
    pub fn new() -> Self {
        Self::with_config(ChainConfig::default())
    }

    /// Create a ledger with the provided config.
    pub fn with_config(config: ChainConfig) -> Self {
        let genesis = Block::new(
            1,
            GENESIS_PREVIOUS_DIGEST.to_string(),
            timestamp_millis(),
            Vec::new(),
            GENESIS_PROOF,
            config.genesis_producer.clone(),
        );
        Ledger {
            blocks: vec![genesis],
            mempool: Mempool::new(),
            config,
        }
    }

    /// Queue a transaction for the next seal and return the index of the
    /// block it is expected to settle into. Never fails: inputs are
    /// accepted as given, including zero or negative amounts and fees (the
    /// permissive behavior is deliberate and kept).
    pub fn admit_transaction(
        &mut self,
        sender: &str,
        recipient: &str,
        amount: f64,
        fee: f64,
    ) -> u64 {
        self.mempool
            .push(Transaction::new(sender, recipient, amount, fee));
        self.last_block().index + 1
    }

    /// Seal the pending pool into a new block: read the last block's proof,
    /// search for a proof satisfying the gate against it, link to a freshly
    /// computed digest of the last block, flush the pool, append.
    ///
    /// All fallible work happens before the pool is drained or the chain
    /// touched, so a failed seal leaves the ledger unchanged.
    pub fn seal(&mut self, producer: &str) -> Result<Block> {
        let last = self.last_block();
        let previous_proof = last.proof;
        let previous_digest = last.digest()?;

        let proof = match self.config.max_proof_iterations {
            Some(limit) => pow::find_proof_bounded(previous_proof, self.config.difficulty, limit)?,
            None => pow::find_proof(previous_proof, self.config.difficulty),
        };

        let transactions = self.mempool.drain();
        let block = Block::new(
            self.blocks.len() as u64 + 1,
            previous_digest,
            timestamp_millis(),
            transactions,
            proof,
            producer.to_string(),
        );

        info!(
            "Sealed block {} with {} transactions (producer {})",
            block.index,
            block.transactions.len(),
            producer
        );

        self.blocks.push(block.clone());
        Ok(block)
    }

    /// The block at the given 1-based position, or `None` outside
    /// `[1, len]`.
    pub fn get_block(&self, index: u64) -> Option<&Block> {
        if index == 0 {
            return None;
        }
        self.blocks.get(index as usize - 1)
    }

    /// The most recently appended block. Total: the chain always contains
    /// at least genesis.
    pub fn last_block(&self) -> &Block {
        self.blocks.last().expect("chain always contains genesis")
    }

    /// Number of blocks in the chain, genesis included.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// All blocks in index order.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Transactions queued for the next seal, in submission order.
    pub fn pending_transactions(&self) -> &[Transaction] {
        self.mempool.transactions()
    }

    pub fn config(&self) -> &ChainConfig {
        &self.config
    }

    /// Check the whole chain: index continuity, digest linkage, and gate
    /// validity for every block after genesis. Genesis is exempt from both
    /// the linkage and the proof check.
    pub fn verify(&self) -> Result<()> {
        for window in self.blocks.windows(2) {
            let (prev, block) = (&window[0], &window[1]);

            if block.index != prev.index + 1 {
                return Err(ChainError::InvalidBlock(format!(
                    "Invalid block index. Expected {}, but got {}.",
                    prev.index + 1,
                    block.index
                )));
            }
            if block.previous_digest != prev.digest()? {
                return Err(ChainError::InvalidBlockLinkage);
            }
            if !pow::valid_proof(prev.proof, block.proof, self.config.difficulty) {
                return Err(ChainError::InvalidProofOfWork);
            }
        }
        Ok(())
    }
}

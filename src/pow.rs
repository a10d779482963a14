//! Proof-of-work admission gate

use crate::error::{ChainError, Result};
use sha2::{Digest, Sha256};
use tracing::debug;

/// Default Proof-of-Work difficulty (number of leading zeros in the hex
/// digest). A tunable constant, never derived from chain state; there is
/// deliberately no difficulty-adjustment algorithm.
pub const DEFAULT_DIFFICULTY: u32 = 4;

/// True iff the hex SHA-256 of the concatenated decimal representations of
/// both proofs starts with `difficulty` zero characters. The gate is a pure
/// function of its inputs.
pub fn valid_proof(previous_proof: u64, candidate: u64, difficulty: u32) -> bool {
    let guess = format!("{}{}", previous_proof, candidate);
    let digest = hex::encode(Sha256::digest(guess.as_bytes()));
    digest
        .as_bytes()
        .iter()
        .take(difficulty as usize)
        .all(|&b| b == b'0')
}

/// Smallest non-negative integer satisfying the gate against
/// `previous_proof`. Searches ascending from 0 and stops at the first hit,
/// so independent searchers agree on the answer. Unbounded: expected to
/// terminate after roughly 16^difficulty trials, but no upper bound exists.
pub fn find_proof(previous_proof: u64, difficulty: u32) -> u64 {
    let mut candidate = 0u64;
    while !valid_proof(previous_proof, candidate, difficulty) {
        candidate += 1;
    }
    debug!(
        "Proof search for previous proof {} finished at {}",
        previous_proof, candidate
    );
    candidate
}

/// Same search as [`find_proof`] with an iteration cap for test harnesses.
/// Production configs leave the search unbounded.
pub fn find_proof_bounded(
    previous_proof: u64,
    difficulty: u32,
    max_iterations: u64,
) -> Result<u64> {
    for candidate in 0..max_iterations {
        if valid_proof(previous_proof, candidate, difficulty) {
            return Ok(candidate);
        }
    }
    Err(ChainError::ProofSearchExhausted {
        limit: max_iterations,
    })
}

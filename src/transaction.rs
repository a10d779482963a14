//! Transaction type settled by the ledger

use serde::{Deserialize, Serialize};

/// A value transfer waiting in the pool or settled in a block.
///
/// Transactions carry no identity field; two transactions with the same
/// fields are the same value. Amounts and fees are accepted as given.
/// Admission performs no range checks, so zero and negative values pass
/// through unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub sender: String,
    pub recipient: String,
    pub amount: f64,
    pub fee: f64,
}

impl Transaction {
    pub fn new(sender: &str, recipient: &str, amount: f64, fee: f64) -> Self {
        Transaction {
            sender: sender.to_string(),
            recipient: recipient.to_string(),
            amount,
            fee,
        }
    }
}

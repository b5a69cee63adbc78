// Blocks chain transactions into history. Like transactions they are
// content-addressed; the previous-block hash makes the history tamper
// evident back to the genesis sentinel.

use serde::{Deserialize, Serialize};

use crate::core::transaction::Transaction;
use crate::error::Result;
use crate::utils::{serialize, sha256_digest};

/// The fixed sentinel referenced by the first block: an all-zero digest.
pub const GENESIS_PREV_HASH: [u8; 32] = [0u8; 32];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    id: Vec<u8>,
    prev_hash: Vec<u8>,
    transactions: Vec<Transaction>,
}

impl Block {
    pub fn new(prev_hash: Vec<u8>, transactions: Vec<Transaction>) -> Result<Block> {
        let id = Self::hash_contents(&transactions, &prev_hash)?;
        Ok(Block {
            id,
            prev_hash,
            transactions,
        })
    }

    /// Hash of `(transactions, prev_hash)` in canonical encoding.
    pub fn hash_contents(transactions: &[Transaction], prev_hash: &[u8]) -> Result<Vec<u8>> {
        let encoded = serialize(&(transactions, prev_hash))?;
        Ok(sha256_digest(&encoded))
    }

    pub fn id(&self) -> &[u8] {
        self.id.as_slice()
    }

    pub fn prev_hash(&self) -> &[u8] {
        self.prev_hash.as_slice()
    }

    pub fn transactions(&self) -> &[Transaction] {
        self.transactions.as_slice()
    }

    pub fn is_genesis(&self) -> bool {
        self.prev_hash == GENESIS_PREV_HASH
    }

    /// Recompute the id from the stored fields and compare.
    pub fn verify_id(&self) -> Result<bool> {
        Ok(Self::hash_contents(&self.transactions, &self.prev_hash)? == self.id)
    }
}

// Transactions batch operations under a random nonce and are
// content-addressed: the id is a hash over the other fields, so equal
// content always reproduces the same id.

use serde::{Deserialize, Serialize};

use crate::core::operation::Operation;
use crate::error::Result;
use crate::utils::{serialize, sha256_digest};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    id: Vec<u8>,
    operations: Vec<Operation>,
    /// Random 32-bit value separating transactions that carry identical
    /// operation lists.
    nonce: u32,
}

impl Transaction {
    pub fn new(operations: Vec<Operation>, nonce: u32) -> Result<Transaction> {
        let id = Self::hash_contents(&operations, nonce)?;
        Ok(Transaction {
            id,
            operations,
            nonce,
        })
    }

    /// Hash of `(operations, nonce)` in canonical encoding.
    pub fn hash_contents(operations: &[Operation], nonce: u32) -> Result<Vec<u8>> {
        let encoded = serialize(&(operations, nonce))?;
        Ok(sha256_digest(&encoded))
    }

    pub fn id(&self) -> &[u8] {
        self.id.as_slice()
    }

    pub fn operations(&self) -> &[Operation] {
        self.operations.as_slice()
    }

    pub fn nonce(&self) -> u32 {
        self.nonce
    }

    /// Recompute the id from the stored fields and compare. Content
    /// addressing means this must always hold for an untampered value.
    pub fn verify_id(&self) -> Result<bool> {
        Ok(Self::hash_contents(&self.operations, self.nonce)? == self.id)
    }
}

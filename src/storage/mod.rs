//! In-memory chain state backing stores
//!
//! The ledger is in-memory by design: the mempool stages pending
//! transactions and the coin index journals per-account spent/unspent
//! entries that the balance view is derived from.

pub mod coin_index;
pub mod mempool;

pub use coin_index::{CoinEntry, CoinIndex, EntryKind};
pub use mempool::Mempool;

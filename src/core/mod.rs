//! Core ledger functionality
//!
//! This module contains the ledger state machine and the value types it
//! chains together: operations, transactions, and blocks.

pub mod block;
pub mod ledger;
pub mod operation;
pub mod transaction;

pub use block::{Block, GENESIS_PREV_HASH};
pub use ledger::{ChainState, Ledger};
pub use operation::{AccountId, Asset, Operation, PropertyId};
pub use transaction::Transaction;

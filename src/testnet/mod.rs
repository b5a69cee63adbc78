//! Test utilities for ledger testing
//!
//! This module provides shared helpers for unit tests: accounts with
//! fast-to-generate keys and ledgers pre-seeded with a genesis
//! allocation.

pub mod test_utils;

pub use test_utils::*;

//! Test utilities for ledger testing

use crate::account::Account;
use crate::core::Ledger;
use crate::crypto::{KeyGenerator, SignatureEngine};
use crate::error::Result;

/// Prime width for test keys. Each prime must clear half the SHA-512
/// digest width, with headroom, or textbook verification cannot recover
/// the message representative.
pub const TEST_KEY_BITS: u64 = 320;

/// Install the env_logger subscriber so `RUST_LOG=debug cargo test`
/// shows ledger activity. Safe to call from every test; only the first
/// call wins.
pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Create an account backed by a fast test-sized key pair.
pub fn create_test_account() -> Result<Account> {
    init_test_logging();
    let generator = KeyGenerator::new(TEST_KEY_BITS);
    Account::generate(&generator)
}

/// Create an initialized ledger with `amount` coins allocated to a
/// fresh account.
pub fn create_seeded_ledger(amount: u64) -> Result<(Ledger, Account)> {
    let account = create_test_account()?;
    let mut ledger = Ledger::new(SignatureEngine::new());
    ledger.seed_genesis_allocation(account.account_id(), amount)?;
    ledger.init_blockchain()?;
    Ok((ledger, account))
}

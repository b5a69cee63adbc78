//! # Primer Chain - My Minimal Ledger Built From First Principles
//!
//! This is my educational cryptocurrency ledger where every
//! cryptographic primitive is built from scratch. When I come back to
//! this code, here's what I need to remember:
//!
//! ## What I Built
//! - **RSA From Scratch**: Probable-prime generation, key pairs, and
//!   textbook (unpadded!) signatures over big integers
//! - **Script Interpreter**: A tiny stack machine with DUP, HASH,
//!   EQUALVERIFY and CHECKSIG that decides whether a spend is authorized
//! - **UTXO/STXO Ledger**: Balances derived from per-account journals,
//!   with atomic block validation and double-spend rejection
//! - **Key Rotation**: Accounts hold a wallet of keys; identity follows
//!   the newest one
//! - **Digital Deeds**: Registered properties transfer ownership through
//!   the same operation pipeline as coins
//!
//! ## How I Organized My Code
//! - `crypto/`: Primes, key generation, and the signature engine
//! - `script/`: The opcode interpreter and the canonical spend program
//! - `core/`: Operations, transactions, blocks, and the ledger itself
//! - `account/`: Wallets, account ids, and base58check addresses
//! - `storage/`: The mempool and the coin index
//! - `config/`: Runtime settings with environment overrides
//! - `utils/`: Hashing, base58, and canonical serialization helpers
//!
//! ## The One Thing Never To Forget
//! The signatures here are textbook RSA with NO padding. That is the
//! whole point of the exercise and also the reason this must never
//! guard real money. Keep each prime wider than 256 bits or the SHA-512
//! message representative outgrows the modulus and nothing verifies.

pub mod account;
pub mod config;
pub mod core;
pub mod crypto;
pub mod error;
pub mod script;
pub mod storage;
pub mod utils;

#[cfg(test)]
pub mod testnet;

// Re-export commonly used types for convenience
pub use account::{account_address, derive_account_id, validate_address, Account};
pub use config::{Config, GLOBAL_CONFIG};
pub use core::{
    AccountId, Asset, Block, ChainState, Ledger, Operation, PropertyId, Transaction,
    GENESIS_PREV_HASH,
};
pub use crypto::{KeyGenerator, KeyPair, PrivateKey, PublicKey, SignatureEngine};
pub use error::{LedgerError, Result};
pub use script::{Opcode, Script};
pub use storage::{CoinIndex, Mempool};
pub use utils::{base58_decode, base58_encode, serialize, sha256_digest, sha512_digest};

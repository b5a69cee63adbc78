//! Error handling for the ledger
//!
//! One crate-wide error type. Structural faults (malformed key material,
//! malformed script text, unparseable signature bytes) abort the current
//! operation; plain verification mismatches are reported as boolean
//! outcomes, not as errors.

use std::fmt;

/// Result type alias for ledger operations
pub type Result<T> = std::result::Result<T, LedgerError>;

/// Error types for all ledger operations
#[derive(Debug, Clone)]
pub enum LedgerError {
    /// No usable public exponent found during RSA key generation
    KeyGeneration(String),
    /// Signature bytes cannot be parsed as the expected integer encoding
    Signature(String),
    /// Empty or structurally invalid opcode program
    ScriptFormat(String),
    /// Spend amount exceeds the sender's confirmed balance
    InsufficientFunds { required: u64, available: u64 },
    /// Property transfer attempted by a non-owner
    InvalidOwnership(String),
    /// Block contains a transaction id already committed to history
    DuplicateTransaction(String),
    /// Chain state machine misuse (e.g. re-initializing an active chain)
    Chain(String),
    /// Serialization/deserialization errors
    Serialization(String),
    /// Other cryptographic operation errors
    Crypto(String),
}

impl fmt::Display for LedgerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LedgerError::KeyGeneration(msg) => write!(f, "Key generation error: {msg}"),
            LedgerError::Signature(msg) => write!(f, "Signature error: {msg}"),
            LedgerError::ScriptFormat(msg) => write!(f, "Script format error: {msg}"),
            LedgerError::InsufficientFunds {
                required,
                available,
            } => {
                write!(
                    f,
                    "Insufficient funds: required {required}, available {available}"
                )
            }
            LedgerError::InvalidOwnership(msg) => write!(f, "Invalid ownership: {msg}"),
            LedgerError::DuplicateTransaction(msg) => {
                write!(f, "Duplicate transaction: {msg}")
            }
            LedgerError::Chain(msg) => write!(f, "Chain error: {msg}"),
            LedgerError::Serialization(msg) => write!(f, "Serialization error: {msg}"),
            LedgerError::Crypto(msg) => write!(f, "Cryptographic error: {msg}"),
        }
    }
}

impl std::error::Error for LedgerError {}

impl From<bincode::error::EncodeError> for LedgerError {
    fn from(err: bincode::error::EncodeError) -> Self {
        LedgerError::Serialization(err.to_string())
    }
}

impl From<bincode::error::DecodeError> for LedgerError {
    fn from(err: bincode::error::DecodeError) -> Self {
        LedgerError::Serialization(err.to_string())
    }
}

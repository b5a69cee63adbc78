//! Utility functions and helpers
//!
//! This module contains cryptographic digest utilities, encoding functions,
//! and the canonical serialization layer used for content addressing.

pub mod crypto;
pub mod serialization;

pub use crypto::{base58_decode, base58_encode, sha256_digest, sha512_digest};
pub use serialization::{deserialize, serialize};

// Textbook RSA signatures over a SHA-512 message representative.
//
// There is no padding step here on purpose. The original scheme this
// ledger preserves signs the raw digest integer, and verification
// assumes that form; adding PKCS#1 or PSS would change the observable
// behavior. Do not use this for anything beyond the educational ledger.

use log::warn;
use num_bigint::BigUint;
use num_traits::Zero;

use crate::crypto::keygen::{PrivateKey, PublicKey};
use crate::error::{LedgerError, Result};
use crate::utils::sha512_digest;

/// Signs and verifies byte messages with RSA key material.
///
/// Stateless; construct one and pass it to whoever needs it rather than
/// sharing a process-wide instance.
#[derive(Debug, Clone, Default)]
pub struct SignatureEngine;

impl SignatureEngine {
    pub fn new() -> SignatureEngine {
        SignatureEngine
    }

    /// Compute `sha512(message)^d mod n`, serialized as minimal
    /// big-endian bytes.
    pub fn sign(&self, key: &PrivateKey, message: &[u8]) -> Vec<u8> {
        if key.modulus().bits() <= 512 {
            // The digest integer would exceed n and verification could
            // never recover it; keys this small only appear in misuse.
            warn!(
                "signing with a {}-bit modulus, below the 512-bit digest width",
                key.modulus().bits()
            );
        }
        let h = BigUint::from_bytes_be(&sha512_digest(message));
        let s = h.modpow(key.exponent(), key.modulus());
        s.to_bytes_be()
    }

    /// Recompute the digest and compare it against `signature^e mod n`.
    ///
    /// A mismatched signature returns `Ok(false)`; only signature bytes
    /// that cannot be parsed as an integer are an error.
    pub fn verify(&self, signature: &[u8], key: &PublicKey, message: &[u8]) -> Result<bool> {
        if signature.is_empty() {
            return Err(LedgerError::Signature(
                "empty signature cannot be parsed as an integer".to_string(),
            ));
        }
        // A zero modulus can never verify anything; modpow would panic.
        if key.modulus().is_zero() {
            return Ok(false);
        }
        let h = BigUint::from_bytes_be(&sha512_digest(message));
        let recovered = BigUint::from_bytes_be(signature).modpow(key.exponent(), key.modulus());
        Ok(h == recovered)
    }
}

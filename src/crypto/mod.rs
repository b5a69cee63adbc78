//! Cryptographic core: from-scratch RSA
//!
//! This module implements RSA key generation over `num-bigint` and the
//! textbook (unpadded) signature scheme built on top of it. The lack of
//! padding is deliberate: the scheme is educational and verification
//! assumes the raw `h^d mod n` form.

pub mod keygen;
pub mod primes;
pub mod signature;

pub use keygen::{KeyGenerator, KeyPair, PrivateKey, PublicKey, DEFAULT_PUBLIC_EXPONENT};
pub use primes::{generate_probable_prime, is_probable_prime};
pub use signature::SignatureEngine;

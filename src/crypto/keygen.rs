// This is my RSA key material and generation - every key in the ledger
// comes from here, built from two freshly sampled probable primes
// The private half of a pair (d, p, q) is only reachable through
// private_key() and never rides along when the public key is serialized

use log::debug;
use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, Zero};
use serde::{Deserialize, Serialize};

use crate::crypto::primes::generate_probable_prime;
use crate::error::{LedgerError, Result};

/// Fixed starting candidate for the public exponent (F4).
pub const DEFAULT_PUBLIC_EXPONENT: u32 = 65537;

/// The public half of an RSA key pair: `(n, e)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicKey {
    n: BigUint,
    e: BigUint,
}

impl PublicKey {
    pub fn new(n: BigUint, e: BigUint) -> PublicKey {
        PublicKey { n, e }
    }

    pub fn modulus(&self) -> &BigUint {
        &self.n
    }

    pub fn exponent(&self) -> &BigUint {
        &self.e
    }
}

/// The private half of an RSA key pair: `(d, n)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrivateKey {
    d: BigUint,
    n: BigUint,
}

impl PrivateKey {
    pub fn modulus(&self) -> &BigUint {
        &self.n
    }

    pub fn exponent(&self) -> &BigUint {
        &self.d
    }
}

/// A complete RSA key pair, including the primes it was built from.
///
/// Invariant: `n = p * q` and `d * e ≡ 1 (mod lcm(p-1, q-1))`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPair {
    d: BigUint, // Private exponent, the signing secret
    e: BigUint, // Public exponent, usually 65537
    n: BigUint, // The modulus both halves share
    p: BigUint, // First prime factor of n
    q: BigUint, // Second prime factor of n
}

impl KeyPair {
    pub fn public_key(&self) -> PublicKey {
        PublicKey {
            n: self.n.clone(),
            e: self.e.clone(),
        }
    }

    pub fn private_key(&self) -> PrivateKey {
        PrivateKey {
            d: self.d.clone(),
            n: self.n.clone(),
        }
    }

    pub fn modulus(&self) -> &BigUint {
        &self.n
    }

    #[cfg(test)]
    pub(crate) fn primes(&self) -> (&BigUint, &BigUint) {
        (&self.p, &self.q)
    }

    #[cfg(test)]
    pub(crate) fn exponents(&self) -> (&BigUint, &BigUint) {
        (&self.d, &self.e)
    }
}

// My key factory: generates RSA key pairs at a fixed prime width
// I construct one explicitly and pass it to whoever needs keys; there
// is no process-wide generator instance hiding anywhere
pub struct KeyGenerator {
    bit_width: u64, // Width of each prime; the modulus is roughly double
}

impl Default for KeyGenerator {
    /// A generator at the configured prime width.
    fn default() -> KeyGenerator {
        KeyGenerator::new(crate::config::GLOBAL_CONFIG.get_key_bit_width())
    }
}

impl KeyGenerator {
    /// `bit_width` is the width of each prime; the modulus ends up at
    /// roughly twice that.
    pub fn new(bit_width: u64) -> KeyGenerator {
        KeyGenerator { bit_width }
    }

    pub fn bit_width(&self) -> u64 {
        self.bit_width
    }

    // When I want a brand new key pair from the fixed exponent 65537
    pub fn generate(&self) -> Result<KeyPair> {
        self.generate_with_exponent(&BigUint::from(DEFAULT_PUBLIC_EXPONENT))
    }

    // When an account rotates wallet keys I reuse its public exponent
    // candidate but always draw fresh primes, so the modulus is new on
    // every call
    pub fn generate_with_exponent(&self, exponent: &BigUint) -> Result<KeyPair> {
        let mut rng = rand::thread_rng();

        let p = generate_probable_prime(self.bit_width, &mut rng);
        let q = loop {
            let candidate = generate_probable_prime(self.bit_width, &mut rng);
            if candidate != p {
                break candidate;
            }
        };

        let n = &p * &q;
        let p_minus_one = &p - 1u32;
        let q_minus_one = &q - 1u32;
        let phi = &p_minus_one * &q_minus_one;

        // Walk upward from the candidate until it is coprime with phi(n).
        // Running past phi(n) means no usable exponent exists.
        let mut e = exponent.clone();
        loop {
            if e >= phi {
                return Err(LedgerError::KeyGeneration(
                    "no usable public exponent below phi(n)".to_string(),
                ));
            }
            if e.gcd(&phi).is_one() {
                break;
            }
            e += 1u32;
        }

        let lambda = p_minus_one.lcm(&q_minus_one);
        let d = mod_inverse(&e, &lambda).ok_or_else(|| {
            LedgerError::KeyGeneration(
                "public exponent has no inverse mod lcm(p-1, q-1)".to_string(),
            )
        })?;

        debug!(
            "generated RSA key pair: modulus {} bits, public exponent {} bits",
            n.bits(),
            e.bits()
        );

        Ok(KeyPair { d, e, n, p, q })
    }
}

/// Modular inverse via the extended Euclidean algorithm, `None` when the
/// inputs are not coprime.
fn mod_inverse(a: &BigUint, modulus: &BigUint) -> Option<BigUint> {
    let a = BigInt::from(a.clone());
    let modulus = BigInt::from(modulus.clone());
    let ext = a.extended_gcd(&modulus);
    if !ext.gcd.is_one() {
        return None;
    }
    let mut x = ext.x % &modulus;
    if x < BigInt::zero() {
        x += &modulus;
    }
    x.to_biguint()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_BIT_WIDTH: u64 = 128;

    #[test]
    fn test_generated_pair_satisfies_rsa_relations() {
        let generator = KeyGenerator::new(TEST_BIT_WIDTH);
        let pair = generator.generate().unwrap();

        let (p, q) = pair.primes();
        assert_ne!(p, q);
        assert_eq!(p * q, *pair.modulus());

        let (d, e) = pair.exponents();
        let lambda = (p - 1u32).lcm(&(q - 1u32));
        assert!((d * e % lambda).is_one());
    }

    #[test]
    fn test_public_key_carries_no_private_fields() {
        let generator = KeyGenerator::new(TEST_BIT_WIDTH);
        let pair = generator.generate().unwrap();
        let public = pair.public_key();

        assert_eq!(public.modulus(), pair.modulus());
        let (d, e) = pair.exponents();
        assert_eq!(public.exponent(), e);
        assert_ne!(public.exponent(), d);
    }

    #[test]
    fn test_rotation_reuses_exponent_with_fresh_modulus() {
        let generator = KeyGenerator::new(TEST_BIT_WIDTH);
        let first = generator.generate().unwrap();
        let exponent = first.public_key().exponent().clone();

        let second = generator.generate_with_exponent(&exponent).unwrap();
        let third = generator.generate_with_exponent(&exponent).unwrap();

        assert_ne!(second.modulus(), first.modulus());
        assert_ne!(third.modulus(), second.modulus());
    }

    #[test]
    fn test_mod_inverse_agrees_with_known_values() {
        // 7 * 103 = 721 = 1 (mod 120)
        let inv = mod_inverse(&BigUint::from(7u32), &BigUint::from(120u32)).unwrap();
        assert_eq!(inv, BigUint::from(103u32));
        // 2 and 120 share a factor, no inverse
        assert!(mod_inverse(&BigUint::from(2u32), &BigUint::from(120u32)).is_none());
    }

    #[test]
    fn test_even_exponent_candidate_steps_to_coprime() {
        let generator = KeyGenerator::new(TEST_BIT_WIDTH);
        // phi(n) is even, so an even candidate must be stepped upward
        let pair = generator
            .generate_with_exponent(&BigUint::from(65536u32))
            .unwrap();
        let (_, e) = pair.exponents();
        assert!(e >= &BigUint::from(65537u32));
    }
}

// Probable-prime sampling for RSA key generation. Candidates are drawn
// uniformly at the requested width, trial-divided by a table of small
// primes, then put through Miller-Rabin with randomized witnesses.

use num_bigint::{BigUint, RandBigInt};
use num_traits::{One, Zero};
use rand::RngCore;

/// Witness rounds for Miller-Rabin. 25 rounds bounds the error
/// probability by 4^-25 per accepted candidate.
const MILLER_RABIN_ROUNDS: usize = 25;

const SMALL_PRIMES: [u32; 54] = [
    2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89,
    97, 101, 103, 107, 109, 113, 127, 131, 137, 139, 149, 151, 157, 163, 167, 173, 179, 181, 191,
    193, 197, 199, 211, 223, 227, 229, 233, 239, 241, 251,
];

/// Draw a probable prime of exactly `bit_width` bits.
///
/// The top bit is forced so the product of two primes reaches the full
/// modulus width, and the low bit is forced so candidates are odd.
/// Retries until a candidate passes the primality test; the number of
/// retries is unbounded but geometrically distributed.
pub fn generate_probable_prime<R: RngCore>(bit_width: u64, rng: &mut R) -> BigUint {
    loop {
        let mut candidate = rng.gen_biguint(bit_width);
        candidate.set_bit(bit_width - 1, true);
        candidate.set_bit(0, true);
        if is_probable_prime(&candidate, MILLER_RABIN_ROUNDS, rng) {
            return candidate;
        }
    }
}

/// Miller-Rabin primality test with `rounds` random witnesses.
pub fn is_probable_prime<R: RngCore>(n: &BigUint, rounds: usize, rng: &mut R) -> bool {
    let one = BigUint::one();
    let two = BigUint::from(2u32);

    if n < &two {
        return false;
    }
    for &p in SMALL_PRIMES.iter() {
        let small = BigUint::from(p);
        if n == &small {
            return true;
        }
        if (n % &small).is_zero() {
            return false;
        }
    }

    // Write n - 1 = d * 2^s with d odd.
    let n_minus_one = n - &one;
    let s = n_minus_one.trailing_zeros().unwrap_or(0);
    let d = &n_minus_one >> s;

    'witness: for _ in 0..rounds {
        let a = rng.gen_biguint_range(&two, &n_minus_one);
        let mut x = a.modpow(&d, n);
        if x == one || x == n_minus_one {
            continue;
        }
        for _ in 0..s.saturating_sub(1) {
            x = x.modpow(&two, n);
            if x == n_minus_one {
                continue 'witness;
            }
        }
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_primes_accepted() {
        let mut rng = rand::thread_rng();
        for p in [2u32, 3, 5, 7, 97, 251] {
            assert!(is_probable_prime(&BigUint::from(p), 10, &mut rng), "{p}");
        }
    }

    #[test]
    fn test_known_large_prime_accepted() {
        let mut rng = rand::thread_rng();
        // 2^61 - 1, a Mersenne prime
        let p = (BigUint::one() << 61u32) - BigUint::one();
        assert!(is_probable_prime(&p, 25, &mut rng));
    }

    #[test]
    fn test_composites_rejected() {
        let mut rng = rand::thread_rng();
        for c in [0u32, 1, 4, 15, 100, 1001] {
            assert!(!is_probable_prime(&BigUint::from(c), 10, &mut rng), "{c}");
        }
    }

    #[test]
    fn test_carmichael_number_rejected() {
        let mut rng = rand::thread_rng();
        // 561 = 3 * 11 * 17 fools the plain Fermat test but not Miller-Rabin
        assert!(!is_probable_prime(&BigUint::from(561u32), 25, &mut rng));
        assert!(!is_probable_prime(&BigUint::from(41041u32), 25, &mut rng));
    }

    #[test]
    fn test_generated_prime_has_requested_width() {
        let mut rng = rand::thread_rng();
        let p = generate_probable_prime(64, &mut rng);
        assert_eq!(p.bits(), 64);
        assert!(p.bit(0), "candidates must be odd");
    }
}

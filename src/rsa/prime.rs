// Prime Generation
// Sieve-backed trial division plus Miller-Rabin probable-primality testing

use std::sync::OnceLock;

use num_bigint::RandBigInt;
use num_integer::Integer;
use num_traits::{One, Zero};
use rand::thread_rng;

use super::bigint::{from_u64, mod_pow, RsaBigInt};
use super::error::{CryptoError, CryptoResult};

/// Upper bound for the small-prime sieve used as a trial-division pre-filter
pub const SIEVE_BOUND: usize = 10_000;

/// Retry budget for a single prime request
const MAX_ATTEMPTS: u32 = 10_000;

/// Miller-Rabin witness rounds per candidate
const MILLER_RABIN_ROUNDS: u32 = 10;

static SMALL_PRIMES: OnceLock<Vec<u64>> = OnceLock::new();

/// All primes below `SIEVE_BOUND`, computed once per process.
/// Calling this early warms the cache before timing-sensitive work.
pub fn small_primes() -> &'static [u64] {
    SMALL_PRIMES.get_or_init(|| sieve(SIEVE_BOUND))
}

/// Sieve of Eratosthenes up to `bound` (exclusive)
fn sieve(bound: usize) -> Vec<u64> {
    let mut composite = vec![false; bound];
    let mut primes = Vec::new();

    for n in 2..bound {
        if composite[n] {
            continue;
        }
        primes.push(n as u64);
        let mut multiple = n * n;
        while multiple < bound {
            composite[multiple] = true;
            multiple += n;
        }
    }

    primes
}

/// Quick rejection of candidates with a small prime factor.
/// A candidate equal to a sieve prime is accepted as-is.
fn survives_trial_division(candidate: &RsaBigInt) -> bool {
    for &p in small_primes() {
        let p = from_u64(p);
        if &p * &p > *candidate {
            break;
        }
        if *candidate == p {
            return true;
        }
        if (candidate % &p).is_zero() {
            return false;
        }
    }
    true
}

/// Miller-Rabin primality test
/// Returns true if n is probably prime
pub fn is_probable_prime(n: &RsaBigInt, iterations: u32) -> bool {
    if n < &from_u64(2) {
        return false;
    }
    if n == &from_u64(2) || n == &from_u64(3) {
        return true;
    }
    if n.is_even() {
        return false;
    }

    // Write n-1 as d * 2^s with d odd
    let mut d = n.clone() - 1u8;
    let mut s = 0u32;
    while d.is_even() {
        d >>= 1;
        s += 1;
    }

    // Witness loop
    let mut rng = thread_rng();
    let two = from_u64(2);
    let n_minus_one = n - 1u8;
    let n_minus_two = n - from_u64(2);

    for _ in 0..iterations {
        // Pick random witness a in [2, n-2]
        let a = rng.gen_biguint_range(&two, &n_minus_two);

        // Compute x = a^d mod n
        let mut x = mod_pow(&a, &d, n);

        if x.is_one() || x == n_minus_one {
            continue;
        }

        let mut continue_outer = false;
        for _ in 1..s {
            x = mod_pow(&x, &two, n);
            if x == n_minus_one {
                continue_outer = true;
                break;
            }
        }

        if continue_outer {
            continue;
        }

        // Composite
        return false;
    }

    // Probably prime
    true
}

/// Generate a probable prime of approximately `bits` bits.
///
/// Draws odd candidates with the top bit forced, filters them through the
/// small-prime sieve, then confirms with Miller-Rabin. Exhausting the retry
/// budget fails with `CryptoError::PrimeGeneration` rather than looping
/// forever. Requests below 2 bits are widened to 2 so that degenerate key
/// splits still complete.
pub fn generate_prime(bits: u64) -> CryptoResult<RsaBigInt> {
    let bits = bits.max(2);
    let mut rng = thread_rng();
    let lower = RsaBigInt::one() << (bits - 1);
    let upper = RsaBigInt::one() << bits;

    for _ in 0..MAX_ATTEMPTS {
        let mut candidate = rng.gen_biguint_range(&lower, &upper);
        if candidate.is_even() {
            candidate += 1u8;
        }

        if !survives_trial_division(&candidate) {
            continue;
        }
        if is_probable_prime(&candidate, MILLER_RABIN_ROUNDS) {
            log::debug!("found {}-bit probable prime", candidate.bits());
            return Ok(candidate);
        }
    }

    Err(CryptoError::PrimeGeneration {
        bits,
        attempts: MAX_ATTEMPTS,
    })
}

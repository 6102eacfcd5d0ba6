// RSA Key Generation
// Implements RSA key pair generation (public and private keys)

use rand::{thread_rng, Rng};

use super::bigint::{from_u64, gcd, mod_inverse, RsaBigInt};
use super::codec::encode_key;
use super::error::{CryptoError, CryptoResult};
use super::prime::generate_prime;
use super::records::{PrivateKeyRecord, PublicKeyRecord};

/// Fixed public exponent
pub const PUBLIC_EXPONENT: u32 = 65_537;

/// RSA Public Key
#[derive(Debug, Clone, PartialEq)]
pub struct RsaPublicKey {
    pub n: RsaBigInt, // Modulus
    pub e: RsaBigInt, // Public exponent
}

/// RSA Private Key
#[derive(Debug, Clone, PartialEq)]
pub struct RsaPrivateKey {
    pub n: RsaBigInt, // Modulus (same as public)
    pub d: RsaBigInt, // Private exponent
}

/// Optional validations on top of the reference key-generation behavior.
/// Both default to off, which reproduces the original key format exactly;
/// turning them on rejects degenerate keys instead of emitting them.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeygenOptions {
    /// Reject a pair where the two primes came out equal
    pub require_distinct_primes: bool,
    /// Reject a totient that shares a factor with the public exponent
    pub require_coprime_exponent: bool,
}

/// Key-generation context: primes, modulus, totient, and both exponents
/// for one freshly generated pair. The key projections are pure reads.
#[derive(Debug, Clone)]
pub struct RsaContext {
    bits: u64,
    p_bits: u64,
    q_bits: u64,
    p: RsaBigInt,
    q: RsaBigInt,
    n: RsaBigInt,
    lambda: RsaBigInt,
    e: RsaBigInt,
    d: RsaBigInt,
}

impl RsaContext {
    /// Generate a key pair with a modulus of roughly `bits` bits.
    /// `bits` must be a positive multiple of 8; the CLI validates this
    /// up front and the core re-checks it here.
    pub fn new(bits: u64) -> CryptoResult<Self> {
        Self::with_options(bits, KeygenOptions::default())
    }

    pub fn with_options(bits: u64, options: KeygenOptions) -> CryptoResult<Self> {
        if bits == 0 || bits % 8 != 0 {
            return Err(CryptoError::InvalidKeySize(bits));
        }

        // Asymmetric split: p gets 20-30% extra bits over bits/2 so the
        // two primes never come out the same length.
        let half = bits / 2;
        let p_bits = half + random_offset(half);
        let q_bits = bits - p_bits;

        log::debug!("splitting {bits} key bits into p={p_bits}, q={q_bits}");

        let p = generate_prime(p_bits)?;
        let q = generate_prime(q_bits)?;

        if options.require_distinct_primes && p == q {
            return Err(CryptoError::KeyRejected(
                "prime factors are equal".to_string(),
            ));
        }

        let n = &p * &q;
        let lambda = (&p - 1u8) * (&q - 1u8);
        let e = RsaBigInt::from(PUBLIC_EXPONENT);

        if options.require_coprime_exponent && gcd(&e, &lambda) != from_u64(1) {
            return Err(CryptoError::KeyRejected(format!(
                "public exponent {PUBLIC_EXPONENT} shares a factor with the totient"
            )));
        }

        let d = mod_inverse(&e, &lambda)?;

        log::info!("generated key pair with a {}-bit modulus", n.bits());

        Ok(Self {
            bits,
            p_bits,
            q_bits,
            p,
            q,
            n,
            lambda,
            e,
            d,
        })
    }

    /// Public key material (e, n)
    pub fn public_key(&self) -> RsaPublicKey {
        RsaPublicKey {
            n: self.n.clone(),
            e: self.e.clone(),
        }
    }

    /// Private key material (d, n)
    pub fn private_key(&self) -> RsaPrivateKey {
        RsaPrivateKey {
            n: self.n.clone(),
            d: self.d.clone(),
        }
    }

    /// Public key record with an empty owner email and the encoded key
    pub fn public_record(&self) -> PublicKeyRecord {
        PublicKeyRecord::new(String::new(), encode_key(&self.e, &self.n))
    }

    /// Private key record with no registered counterparts yet
    pub fn private_record(&self) -> PrivateKeyRecord {
        PrivateKeyRecord::new(Vec::new(), encode_key(&self.d, &self.n))
    }

    pub fn bits(&self) -> u64 {
        self.bits
    }

    pub fn prime_bits(&self) -> (u64, u64) {
        (self.p_bits, self.q_bits)
    }

    pub fn modulus(&self) -> &RsaBigInt {
        &self.n
    }

    #[doc(hidden)]
    pub fn primes(&self) -> (&RsaBigInt, &RsaBigInt) {
        (&self.p, &self.q)
    }

    pub fn totient(&self) -> &RsaBigInt {
        &self.lambda
    }
}

/// Extra bits granted to p, drawn uniformly from [20%, 30%) of `half`
/// with integer truncation
fn random_offset(half: u64) -> u64 {
    let low = half * 2 / 10;
    let high = half * 3 / 10;
    if high <= low {
        return low;
    }
    thread_rng().gen_range(low..high)
}

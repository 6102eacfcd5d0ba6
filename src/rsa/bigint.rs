// RSA Big Integer Operations
// Wrapper around num-bigint for RSA-specific operations

use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, Zero};

use super::error::{CryptoError, CryptoResult};

/// RSA Big Integer type alias
pub type RsaBigInt = BigUint;

/// Create a big integer from u64
pub fn from_u64(n: u64) -> RsaBigInt {
    RsaBigInt::from(n)
}

/// Create a big integer from bytes (little-endian, unsigned)
pub fn from_bytes(bytes: &[u8]) -> RsaBigInt {
    RsaBigInt::from_bytes_le(bytes)
}

/// Convert big integer to its minimal byte representation (little-endian)
pub fn to_bytes(n: &RsaBigInt) -> Vec<u8> {
    n.to_bytes_le()
}

/// Modular exponentiation: base^exp mod modulus
/// Uses square-and-multiply algorithm
pub fn mod_pow(base: &RsaBigInt, exp: &RsaBigInt, modulus: &RsaBigInt) -> RsaBigInt {
    if modulus.is_one() {
        return RsaBigInt::zero();
    }

    let mut result = RsaBigInt::one();
    let mut base = base % modulus;
    let mut exp = exp.clone();

    while !exp.is_zero() {
        if exp.is_odd() {
            result = (&result * &base) % modulus;
        }
        base = (&base * &base) % modulus;
        exp >>= 1;
    }

    result
}

/// Compute modular inverse: a^(-1) mod n
///
/// Iterative extended Euclidean algorithm. The intermediate coefficients
/// can go negative, so the loop runs over signed integers and the result
/// is normalized into [0, n) at the end.
///
/// Returns `CryptoError::InverseNotFound` when gcd(a, n) != 1, so a
/// missing inverse is never conflated with a valid result.
pub fn mod_inverse(a: &RsaBigInt, n: &RsaBigInt) -> CryptoResult<RsaBigInt> {
    if n.is_zero() {
        return Err(CryptoError::InverseNotFound);
    }

    let modulus = BigInt::from(n.clone());
    let mut a = BigInt::from(a.clone());
    let mut i = modulus.clone();
    let mut v = BigInt::zero();
    let mut d = BigInt::one();

    while a > BigInt::zero() {
        let t = &i / &a;
        let x = a;
        a = &i % &x;
        i = x;
        let x = d;
        d = &v - &t * &x;
        v = x;
    }

    // i holds gcd(a, n) once a reaches zero
    if !i.is_one() {
        return Err(CryptoError::InverseNotFound);
    }

    v %= &modulus;
    if v < BigInt::zero() {
        v += &modulus;
    }

    Ok(v.magnitude().clone())
}

/// Greatest common divisor
pub fn gcd(a: &RsaBigInt, b: &RsaBigInt) -> RsaBigInt {
    a.gcd(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mod_pow() {
        // 3^5 mod 7 = 243 mod 7 = 5
        let base = from_u64(3);
        let exp = from_u64(5);
        let modulus = from_u64(7);
        let result = mod_pow(&base, &exp, &modulus);
        assert_eq!(result, from_u64(5));
    }

    #[test]
    fn test_mod_pow_large_exponent() {
        // 65^65537 mod 3233 = 2790
        let result = mod_pow(&from_u64(65), &from_u64(65537), &from_u64(3233));
        assert_eq!(result, from_u64(2790));
    }

    #[test]
    fn test_mod_inverse() {
        // 3 * 5 = 15 ≡ 1 mod 7, so inverse of 3 mod 7 is 5
        let a = from_u64(3);
        let m = from_u64(7);
        let inv = mod_inverse(&a, &m).unwrap();
        assert_eq!(inv, from_u64(5));

        // Verify: 3 * 5 = 15 ≡ 1 (mod 7)
        assert_eq!((a * inv) % m, from_u64(1));
    }

    #[test]
    fn test_mod_inverse_rsa_exponents() {
        // The classic p=61, q=53 example: d = 65537^-1 mod 3120 = 2753
        let e = from_u64(65537);
        let lambda = from_u64(3120);
        let d = mod_inverse(&e, &lambda).unwrap();
        assert_eq!(d, from_u64(2753));
        assert_eq!((e * d) % lambda, from_u64(1));
    }

    #[test]
    fn test_mod_inverse_missing() {
        // gcd(4, 8) = 4, no inverse exists
        let result = mod_inverse(&from_u64(4), &from_u64(8));
        assert!(matches!(result, Err(CryptoError::InverseNotFound)));
    }

    #[test]
    fn test_mod_inverse_property() {
        let n = from_u64(97);
        for a in 1u64..97 {
            let a = from_u64(a);
            let inv = mod_inverse(&a, &n).unwrap();
            assert_eq!((&a * &inv) % &n, RsaBigInt::one());
        }
    }

    #[test]
    fn test_bytes_round_trip() {
        let n = from_u64(0x0102_0304);
        let bytes = to_bytes(&n);
        assert_eq!(bytes, vec![0x04, 0x03, 0x02, 0x01]);
        assert_eq!(from_bytes(&bytes), n);
    }
}

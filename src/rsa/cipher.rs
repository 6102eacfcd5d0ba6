// RSA Message Encryption/Decryption
// Raw textbook RSA over UTF-8 text: c = m^e mod n, m = c^d mod n
//
// Plaintext and ciphertext bytes are both read as unsigned little-endian
// integers. The reference implementation read plaintext as signed and
// ciphertext as unsigned; one unsigned interpretation is used on both
// sides here so the two directions agree.

use base64::{engine::general_purpose::STANDARD, Engine as _};

use super::bigint::{from_bytes, mod_pow, to_bytes};
use super::error::{CryptoError, CryptoResult};
use super::keygen::{RsaPrivateKey, RsaPublicKey};
use super::records::Envelope;

/// Optional validations on top of the raw textbook behavior
#[derive(Debug, Clone, Copy, Default)]
pub struct CipherOptions {
    /// Fail when the plaintext integer is not strictly below the modulus,
    /// instead of letting the message corrupt silently
    pub reject_oversized: bool,
}

/// Encrypt a UTF-8 message under a public key; returns base64 ciphertext.
/// No length check by default: a message at or above the modulus wraps and
/// corrupts, matching the reference behavior.
pub fn encrypt(plaintext: &str, key: &RsaPublicKey) -> CryptoResult<String> {
    encrypt_with(plaintext, key, CipherOptions::default())
}

pub fn encrypt_with(
    plaintext: &str,
    key: &RsaPublicKey,
    options: CipherOptions,
) -> CryptoResult<String> {
    let m = from_bytes(plaintext.as_bytes());

    if options.reject_oversized && m >= key.n {
        return Err(CryptoError::MessageTooLarge {
            len: plaintext.len(),
            modulus_bytes: ((key.n.bits() + 7) / 8) as usize,
        });
    }

    let c = mod_pow(&m, &key.e, &key.n);
    Ok(STANDARD.encode(to_bytes(&c)))
}

/// Decrypt an envelope's base64 ciphertext under a private key and decode
/// the result as UTF-8
pub fn decrypt(envelope: &Envelope, key: &RsaPrivateKey) -> CryptoResult<String> {
    let cipher_bytes = STANDARD
        .decode(&envelope.content)
        .map_err(|e| CryptoError::Decryption(format!("invalid base64 ciphertext: {e}")))?;

    let c = from_bytes(&cipher_bytes);
    let m = mod_pow(&c, &key.d, &key.n);

    String::from_utf8(to_bytes(&m))
        .map_err(|e| CryptoError::Decryption(format!("plaintext is not valid UTF-8: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rsa::bigint::from_u64;
    use crate::rsa::keygen::RsaContext;

    fn fixed_pair() -> (RsaPublicKey, RsaPrivateKey) {
        // p=61, q=53: n=3233, lambda=3120, d=2753
        (
            RsaPublicKey {
                n: from_u64(3233),
                e: from_u64(65537),
            },
            RsaPrivateKey {
                n: from_u64(3233),
                d: from_u64(2753),
            },
        )
    }

    #[test]
    fn test_encrypt_known_vector() {
        let (public, _) = fixed_pair();
        // "A" is 65; 65^65537 mod 3233 = 2790 = 0x0AE6, little-endian "5go="
        assert_eq!(encrypt("A", &public).unwrap(), "5go=");
    }

    #[test]
    fn test_decrypt_known_vector() {
        let (_, private) = fixed_pair();
        let envelope = Envelope::new("alice@example.com".into(), "5go=".into());
        assert_eq!(decrypt(&envelope, &private).unwrap(), "A");
    }

    #[test]
    fn test_round_trip_generated_key() {
        let ctx = RsaContext::new(64).unwrap();
        let ciphertext = encrypt("hi", &ctx.public_key()).unwrap();
        let envelope = Envelope::new("bob@example.com".into(), ciphertext);
        assert_eq!(decrypt(&envelope, &ctx.private_key()).unwrap(), "hi");
    }

    #[test]
    fn test_round_trip_through_encoded_records() {
        // Full exchange path: records are serialized, decoded back into
        // key material, and used on both sides
        let ctx = RsaContext::new(128).unwrap();
        let public = ctx.public_record().decode().unwrap();
        let private = ctx.private_record().decode().unwrap();

        let ciphertext = encrypt("meet at noon", &public).unwrap();
        let envelope = Envelope::new("bob@example.com".into(), ciphertext);
        assert_eq!(decrypt(&envelope, &private).unwrap(), "meet at noon");
    }

    #[test]
    fn test_oversized_message_rejected_in_strict_mode() {
        let (public, _) = fixed_pair();
        // "hi" reads as 0x6968 = 26984, above n = 3233
        let options = CipherOptions {
            reject_oversized: true,
        };
        assert!(matches!(
            encrypt_with("hi", &public, options),
            Err(CryptoError::MessageTooLarge { .. })
        ));
    }

    #[test]
    fn test_oversized_message_corrupts_by_default() {
        let (public, private) = fixed_pair();
        let ciphertext = encrypt("hi", &public).unwrap();
        let envelope = Envelope::new(String::new(), ciphertext);
        let decrypted = decrypt(&envelope, &private);
        match decrypted {
            Ok(text) => assert_ne!(text, "hi"),
            Err(CryptoError::Decryption(_)) => {}
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_rejects_bad_ciphertext_base64() {
        let (_, private) = fixed_pair();
        let envelope = Envelope::new(String::new(), "@@@".into());
        assert!(matches!(
            decrypt(&envelope, &private),
            Err(CryptoError::Decryption(_))
        ));
    }
}

// RSA Error Types
// Typed failures surfaced by the core; the CLI decides presentation

use thiserror::Error;

/// Errors produced by key generation, key decoding, and message
/// encryption/decryption. The core never prints or exits on its own.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// No probable prime of the requested size was found within the
    /// retry budget.
    #[error("no probable prime of {bits} bits found after {attempts} attempts")]
    PrimeGeneration { bits: u64, attempts: u32 },

    /// The modular inverse does not exist (gcd of the operands is not 1).
    #[error("modular inverse does not exist")]
    InverseNotFound,

    /// Key buffer shorter than its length prefixes declare, or invalid base64.
    #[error("malformed key: {0}")]
    MalformedKey(String),

    /// Ciphertext did not decrypt to valid UTF-8, or was not valid base64.
    #[error("decryption failed: {0}")]
    Decryption(String),

    /// Strict mode only: the plaintext integer does not fit under the modulus.
    #[error("message of {len} bytes does not fit under a {modulus_bytes}-byte modulus")]
    MessageTooLarge { len: usize, modulus_bytes: usize },

    /// Strict mode only: the generated primes or exponent were rejected.
    #[error("generated key rejected: {0}")]
    KeyRejected(String),

    /// Key size is zero or not a multiple of 8.
    #[error("invalid key size {0}: must be a positive multiple of 8")]
    InvalidKeySize(u64),
}

/// Result type for core RSA operations
pub type CryptoResult<T> = Result<T, CryptoError>;

// RSA Module - Main module file
// Exports all RSA-related functionality

pub mod bigint;
pub mod cipher;
pub mod codec;
pub mod error;
pub mod keygen;
pub mod prime;
pub mod records;

pub use cipher::{decrypt, encrypt, encrypt_with, CipherOptions};
pub use codec::{decode_key, encode_key};
pub use error::{CryptoError, CryptoResult};
pub use keygen::{KeygenOptions, RsaContext, RsaPrivateKey, RsaPublicKey};
pub use records::{Envelope, PrivateKeyRecord, PublicKeyRecord};

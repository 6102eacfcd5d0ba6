// Key Records and Message Envelope
// Wire-compatible JSON shapes: {"email": ..., "key": ...} for keys and
// {"email": ..., "content": ...} for messages

use serde::{Deserialize, Serialize};

use super::codec::decode_key;
use super::error::CryptoResult;
use super::keygen::{RsaPrivateKey, RsaPublicKey};

/// A public key as exchanged with counterparts. `email` is empty for the
/// locally generated key and set to the counterpart's address once shared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicKeyRecord {
    pub email: String,
    pub key: String,
}

/// The locally held private key plus the counterparts it has been
/// registered against. The list only ever grows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrivateKeyRecord {
    pub email: Vec<String>,
    pub key: String,
}

/// One encrypted message in transit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub email: String,
    pub content: String,
}

impl PublicKeyRecord {
    pub fn new(email: String, key: String) -> Self {
        Self { email, key }
    }

    /// Unpack the encoded key into usable key material
    pub fn decode(&self) -> CryptoResult<RsaPublicKey> {
        let (e, n) = decode_key(&self.key)?;
        Ok(RsaPublicKey { e, n })
    }
}

impl PrivateKeyRecord {
    pub fn new(email: Vec<String>, key: String) -> Self {
        Self { email, key }
    }

    /// Unpack the encoded key into usable key material
    pub fn decode(&self) -> CryptoResult<RsaPrivateKey> {
        let (d, n) = decode_key(&self.key)?;
        Ok(RsaPrivateKey { d, n })
    }

    /// Record a counterpart this key is used with. Appends at most once;
    /// returns true when the list actually changed.
    pub fn register_email(&mut self, email: &str) -> bool {
        if self.email.iter().any(|known| known == email) {
            return false;
        }
        self.email.push(email.to_string());
        true
    }
}

impl Envelope {
    pub fn new(email: String, content: String) -> Self {
        Self { email, content }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rsa::bigint::from_u64;
    use crate::rsa::codec::encode_key;

    #[test]
    fn test_public_key_wire_shape() {
        let record = PublicKeyRecord::new("bob@example.com".into(), "AAAA".into());
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"email":"bob@example.com","key":"AAAA"}"#);

        let back: PublicKeyRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_private_key_wire_shape() {
        let record = PrivateKeyRecord::new(vec!["a@x.org".into()], "AAAA".into());
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"email":["a@x.org"],"key":"AAAA"}"#);
    }

    #[test]
    fn test_envelope_wire_shape() {
        let envelope = Envelope::new("bob@example.com".into(), "5go=".into());
        let json = serde_json::to_string(&envelope).unwrap();
        assert_eq!(json, r#"{"email":"bob@example.com","content":"5go="}"#);
    }

    #[test]
    fn test_register_email_is_idempotent() {
        let mut record = PrivateKeyRecord::new(Vec::new(), String::new());
        assert!(record.register_email("a@x.org"));
        assert!(record.register_email("b@x.org"));
        assert!(!record.register_email("a@x.org"));
        assert_eq!(record.email, vec!["a@x.org", "b@x.org"]);
    }

    #[test]
    fn test_record_decodes_to_key_material() {
        let record = PublicKeyRecord::new(
            String::new(),
            encode_key(&from_u64(65537), &from_u64(3233)),
        );
        let key = record.decode().unwrap();
        assert_eq!(key.e, from_u64(65537));
        assert_eq!(key.n, from_u64(3233));
    }

    #[test]
    fn test_record_rejects_garbage_key() {
        let record = PublicKeyRecord::new(String::new(), "////".into());
        assert!(record.decode().is_err());
    }
}

// Key File Operations
// Reads and writes the JSON key records in the working directory

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::rsa::records::{PrivateKeyRecord, PublicKeyRecord};

/// Default file name for the locally generated public key
pub const PUBLIC_KEY_FILE: &str = "public.key";

/// Default file name for the locally generated private key
pub const PRIVATE_KEY_FILE: &str = "private.key";

/// File name under which a counterpart's fetched public key is stored
pub fn counterpart_key_file(email: &str) -> String {
    format!("{email}.key")
}

pub fn read_public_key(path: impl AsRef<Path>) -> Result<PublicKeyRecord> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("cannot read public key file {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("{} is not a valid public key record", path.display()))
}

pub fn read_private_key(path: impl AsRef<Path>) -> Result<PrivateKeyRecord> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("cannot read private key file {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("{} is not a valid private key record", path.display()))
}

pub fn write_public_key(record: &PublicKeyRecord, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_string(record)?;
    fs::write(path, json)
        .with_context(|| format!("cannot write public key file {}", path.display()))
}

pub fn write_private_key(record: &PrivateKeyRecord, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_string(record)?;
    fs::write(path, json)
        .with_context(|| format!("cannot write private key file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        env::temp_dir().join(format!("rsa-courier-test-{}-{name}", std::process::id()))
    }

    #[test]
    fn test_public_key_round_trip() {
        let path = temp_path("public.key");
        let record = PublicKeyRecord::new("carol@example.com".into(), "AAAAAwEAAQAAAAKhDA==".into());

        write_public_key(&record, &path).unwrap();
        let back = read_public_key(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(back, record);
    }

    #[test]
    fn test_private_key_round_trip() {
        let path = temp_path("private.key");
        let mut record = PrivateKeyRecord::new(Vec::new(), "AAAAAwEAAQAAAAKhDA==".into());
        record.register_email("dave@example.com");

        write_private_key(&record, &path).unwrap();
        let back = read_private_key(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(back, record);
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = read_public_key("does-not-exist.key").unwrap_err();
        assert!(err.to_string().contains("does-not-exist.key"));
    }

    #[test]
    fn test_counterpart_key_file_name() {
        assert_eq!(counterpart_key_file("bob@example.com"), "bob@example.com.key");
    }
}

// CLI Actions
// One function per subcommand; core errors bubble up to main

use anyhow::{Context, Result};

use crate::net::KeyServer;
use crate::rsa::cipher::{self, CipherOptions};
use crate::rsa::keygen::{KeygenOptions, RsaContext};
use crate::rsa::prime;
use crate::rsa::records::Envelope;
use crate::util::keystore;

/// Generate a fresh key pair and store both records locally
pub fn keygen(bits: u64, strict: bool) -> Result<()> {
    // Fill the trial-division cache before the timed generation loop
    prime::small_primes();

    let options = KeygenOptions {
        require_distinct_primes: strict,
        require_coprime_exponent: strict,
    };
    let ctx = RsaContext::with_options(bits, options)?;

    keystore::write_public_key(&ctx.public_record(), keystore::PUBLIC_KEY_FILE)?;
    keystore::write_private_key(&ctx.private_record(), keystore::PRIVATE_KEY_FILE)?;

    println!("Keys generated successfully.");
    Ok(())
}

/// Register a counterpart on the private key and publish the public key
/// under their address
pub fn send_key(server: &KeyServer, email: &str) -> Result<()> {
    let mut private = keystore::read_private_key(keystore::PRIVATE_KEY_FILE)?;
    if private.register_email(email) {
        keystore::write_private_key(&private, keystore::PRIVATE_KEY_FILE)?;
        log::info!("registered {email} on the local private key");
    }

    let mut public = keystore::read_public_key(keystore::PUBLIC_KEY_FILE)?;
    public.email = email.to_string();

    server.put_public_key(email, &public)?;
    println!("Public key for {email} sent successfully.");
    Ok(())
}

/// Fetch a counterpart's public key and store it as <email>.key
pub fn get_key(server: &KeyServer, email: &str) -> Result<()> {
    let mut record = server.get_public_key(email)?;
    record.email = email.to_string();

    keystore::write_public_key(&record, keystore::counterpart_key_file(email))?;
    println!("Public key for {email} retrieved successfully.");
    Ok(())
}

/// Encrypt a message under a counterpart's public key and deliver it
pub fn send_msg(server: &KeyServer, email: &str, message: &str, strict: bool) -> Result<()> {
    let record = keystore::read_public_key(keystore::counterpart_key_file(email))
        .with_context(|| format!("no stored key for {email}; run get-key first"))?;
    let key = record.decode()?;

    let options = CipherOptions {
        reject_oversized: strict,
    };
    let content = cipher::encrypt_with(message, &key, options)?;
    let envelope = Envelope::new(email.to_string(), content);

    server.put_message(email, &envelope)?;
    println!("Message sent successfully.");
    Ok(())
}

/// Fetch the pending message for a counterpart exchange and decrypt it
/// with the local private key
pub fn get_msg(server: &KeyServer, email: &str) -> Result<()> {
    let envelope = server.get_message(email)?;

    let record = keystore::read_private_key(keystore::PRIVATE_KEY_FILE)?;
    let key = record.decode()?;

    let plaintext = cipher::decrypt(&envelope, &key)?;
    println!("Decrypted message: {plaintext}");
    Ok(())
}

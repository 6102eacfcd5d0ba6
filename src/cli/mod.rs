// CLI Module
// Argument parsing and subcommand dispatch

pub mod actions;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::net::KeyServer;

#[derive(Debug, Parser)]
#[command(name = "rsa-courier", version, about = "RSA key exchange and message encryption")]
pub struct Cli {
    /// Base URL of the key server
    #[arg(long, env = "RSA_COURIER_SERVER", default_value = "http://localhost:8080")]
    pub server: String,

    #[command(subcommand)]
    pub action: Action,
}

#[derive(Debug, Subcommand)]
pub enum Action {
    /// Generate a key pair and store public.key/private.key locally
    Keygen {
        /// Modulus size in bits; must be a positive multiple of 8
        #[arg(value_parser = parse_key_bits)]
        bits: u64,
        /// Reject degenerate keys (equal primes, non-coprime exponent)
        #[arg(long)]
        strict: bool,
    },
    /// Publish the local public key to the server for a counterpart
    SendKey { email: String },
    /// Fetch a counterpart's public key and store it as <email>.key
    GetKey { email: String },
    /// Encrypt a message with a counterpart's stored key and deliver it
    SendMsg {
        email: String,
        message: String,
        /// Fail instead of corrupting when the message exceeds the modulus
        #[arg(long)]
        strict: bool,
    },
    /// Fetch the pending message for a counterpart and decrypt it
    GetMsg { email: String },
}

/// Key sizes are validated here, before the core is ever constructed
fn parse_key_bits(value: &str) -> Result<u64, String> {
    let bits: u64 = value
        .parse()
        .map_err(|_| format!("`{value}` is not a number"))?;
    if bits == 0 || bits % 8 != 0 {
        return Err(format!("key size {bits} must be a positive multiple of 8"));
    }
    Ok(bits)
}

pub fn run(cli: Cli) -> Result<()> {
    let server = KeyServer::new(cli.server);

    match cli.action {
        Action::Keygen { bits, strict } => actions::keygen(bits, strict),
        Action::SendKey { email } => actions::send_key(&server, &email),
        Action::GetKey { email } => actions::get_key(&server, &email),
        Action::SendMsg {
            email,
            message,
            strict,
        } => actions::send_msg(&server, &email, &message, strict),
        Action::GetMsg { email } => actions::get_msg(&server, &email),
    }
}

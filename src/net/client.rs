// Key Server Client
// Blocking HTTP exchange of public keys and message envelopes, keyed by
// email address: PUT/GET {server}/Key/{email} and {server}/Message/{email}

use anyhow::{bail, Context, Result};
use reqwest::blocking::Client;
use reqwest::StatusCode;

use crate::rsa::records::{Envelope, PublicKeyRecord};

pub struct KeyServer {
    base_url: String,
    client: Client,
}

impl KeyServer {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            client: Client::new(),
        }
    }

    fn key_url(&self, email: &str) -> String {
        format!("{}/Key/{email}", self.base_url)
    }

    fn message_url(&self, email: &str) -> String {
        format!("{}/Message/{email}", self.base_url)
    }

    /// Publish the local public key under a counterpart's address
    pub fn put_public_key(&self, email: &str, record: &PublicKeyRecord) -> Result<()> {
        let url = self.key_url(email);
        log::debug!("PUT {url}");
        let response = self
            .client
            .put(&url)
            .json(record)
            .send()
            .with_context(|| format!("cannot reach key server at {url}"))?;

        match response.status() {
            status if status.is_success() || status == StatusCode::NO_CONTENT => Ok(()),
            status => bail!("key server rejected the key for {email}: {status}"),
        }
    }

    /// Fetch the public key a counterpart published
    pub fn get_public_key(&self, email: &str) -> Result<PublicKeyRecord> {
        let url = self.key_url(email);
        log::debug!("GET {url}");
        let response = self
            .client
            .get(&url)
            .send()
            .with_context(|| format!("cannot reach key server at {url}"))?;

        let status = response.status();
        if !status.is_success() {
            bail!("no key available for {email}: {status}");
        }
        response
            .json()
            .with_context(|| format!("key server returned an invalid key record for {email}"))
    }

    /// Deliver an encrypted message envelope for a counterpart
    pub fn put_message(&self, email: &str, envelope: &Envelope) -> Result<()> {
        let url = self.message_url(email);
        log::debug!("PUT {url}");
        let response = self
            .client
            .put(&url)
            .json(envelope)
            .send()
            .with_context(|| format!("cannot reach key server at {url}"))?;

        match response.status() {
            status if status.is_success() || status == StatusCode::NO_CONTENT => Ok(()),
            status => bail!("key server rejected the message for {email}: {status}"),
        }
    }

    /// Fetch the pending message envelope for a counterpart exchange
    pub fn get_message(&self, email: &str) -> Result<Envelope> {
        let url = self.message_url(email);
        log::debug!("GET {url}");
        let response = self
            .client
            .get(&url)
            .send()
            .with_context(|| format!("cannot reach key server at {url}"))?;

        let status = response.status();
        if !status.is_success() {
            bail!("no message available for {email}: {status}");
        }
        response
            .json()
            .with_context(|| format!("key server returned an invalid envelope for {email}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls_are_normalized() {
        let server = KeyServer::new("http://localhost:8080/");
        assert_eq!(
            server.key_url("bob@example.com"),
            "http://localhost:8080/Key/bob@example.com"
        );
        assert_eq!(
            server.message_url("bob@example.com"),
            "http://localhost:8080/Message/bob@example.com"
        );
    }
}

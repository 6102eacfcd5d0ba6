// Network Module
// HTTP transport to the key server

pub mod client;

pub use client::KeyServer;

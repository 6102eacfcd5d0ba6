// Utility Module
// Local persistence for key records

pub mod keystore;

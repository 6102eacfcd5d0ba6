// rsa-courier library root
// Core RSA arithmetic plus the thin CLI, keystore, and transport glue

pub mod cli;
pub mod net;
pub mod rsa;
pub mod util;

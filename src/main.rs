use std::process;

use clap::Parser;

fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();

    let cli = rsa_courier::cli::Cli::parse();
    if let Err(e) = rsa_courier::cli::run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

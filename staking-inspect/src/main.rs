//! Staking ledger inspector.
//!
//! Encodes and decodes stored delegation records so operators can look
//! inside raw key-value dumps.
//!
//! ```bash
//! staking-inspect encode-delegation --delegator stake1... --operator stakeoper1... --shares 1.5
//! staking-inspect decode-unbonding 0a00... --now 2024-05-01T12:00:00Z --json
//! ```

mod cli;
mod commands;
mod config;

use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::config::InspectConfig;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse_args();
    let config = InspectConfig::from_cli(&cli)?;

    // Set up logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(?config, "staking-inspect v{}", env!("CARGO_PKG_VERSION"));

    let output = commands::run(cli.command, &config)?;
    println!("{}", output);
    Ok(())
}

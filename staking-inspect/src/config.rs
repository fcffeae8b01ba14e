//! Inspector configuration.

use anyhow::Context;
use staking_core::Timestamp;

use crate::cli::{Cli, Command};

/// Settings shared by every command.
#[derive(Debug, Clone)]
pub struct InspectConfig {
    /// Print JSON instead of text.
    pub json: bool,

    /// Log level used when `RUST_LOG` is unset.
    pub log_level: String,

    /// Reference time for maturity checks.
    pub now: Option<Timestamp>,
}

impl InspectConfig {
    /// Create an inspector configuration from CLI arguments.
    pub fn from_cli(cli: &Cli) -> anyhow::Result<Self> {
        let now = match &cli.command {
            Command::DecodeUnbonding { now: Some(text), .. } => Some(
                Timestamp::parse_rfc3339(text)
                    .with_context(|| format!("invalid --now value {:?}", text))?,
            ),
            _ => None,
        };

        Ok(Self {
            json: cli.json,
            log_level: cli.log_level.clone(),
            now,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_now_is_parsed() {
        let cli = Cli::parse_from([
            "staking-inspect",
            "decode-unbonding",
            "00",
            "--now",
            "2024-05-01T12:00:00Z",
        ]);
        let config = InspectConfig::from_cli(&cli).unwrap();
        assert_eq!(config.now, Some(Timestamp::from_unix(1_714_564_800)));
    }

    #[test]
    fn test_bad_now_rejected() {
        let cli = Cli::parse_from(["staking-inspect", "decode-unbonding", "00", "--now", "yesterday"]);
        assert!(InspectConfig::from_cli(&cli).is_err());
    }
}

//! Command-line argument parsing.

use clap::{Parser, Subcommand};
use staking_core::{AccAddress, Dec, Int, OperAddress};

/// Encode and decode staking ledger records.
#[derive(Parser, Debug, Clone)]
#[command(name = "staking-inspect")]
#[command(about = "Operator tool for staking ledger records")]
#[command(version)]
pub struct Cli {
    /// Print JSON instead of text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Print the stored bytes of a delegation as hex.
    EncodeDelegation {
        /// Delegator address (canonical text).
        #[arg(long)]
        delegator: AccAddress,

        /// Operator address (canonical text).
        #[arg(long)]
        operator: OperAddress,

        /// Shares held, e.g. 1.5.
        #[arg(long)]
        shares: Dec,
    },

    /// Decode hex-encoded delegation bytes.
    DecodeDelegation {
        /// Record bytes as hex.
        hex: String,
    },

    /// Decode hex-encoded unbonding delegation bytes.
    DecodeUnbonding {
        /// Record bytes as hex.
        hex: String,

        /// Report entry maturity as of this RFC 3339 time.
        #[arg(long)]
        now: Option<String>,
    },

    /// Build the query projection of a delegation.
    Response {
        /// Delegator address (canonical text).
        #[arg(long)]
        delegator: AccAddress,

        /// Operator address (canonical text).
        #[arg(long)]
        operator: OperAddress,

        /// Shares held.
        #[arg(long)]
        shares: Dec,

        /// Token balance the shares are worth.
        #[arg(long)]
        amount: Int,

        /// Balance denomination.
        #[arg(long, default_value = "stake")]
        denom: String,
    },
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn acc() -> String {
        AccAddress::from_bytes([1u8; 20]).to_string()
    }

    fn oper() -> String {
        OperAddress::from_bytes([2u8; 20]).to_string()
    }

    #[test]
    fn test_default_values() {
        let cli = Cli::parse_from(["staking-inspect", "decode-delegation", "00"]);
        assert!(!cli.json);
        assert_eq!(cli.log_level, "warn");
        assert!(matches!(cli.command, Command::DecodeDelegation { .. }));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "staking-inspect",
            "decode-unbonding",
            "abcd",
            "--now",
            "2024-05-01T12:00:00Z",
            "--json",
        ]);
        assert!(cli.json);
        match cli.command {
            Command::DecodeUnbonding { hex, now } => {
                assert_eq!(hex, "abcd");
                assert_eq!(now.as_deref(), Some("2024-05-01T12:00:00Z"));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_addresses_are_parsed() {
        let acc = acc();
        let oper = oper();
        let cli = Cli::parse_from([
            "staking-inspect",
            "encode-delegation",
            "--delegator",
            acc.as_str(),
            "--operator",
            oper.as_str(),
            "--shares",
            "1.5",
        ]);
        match cli.command {
            Command::EncodeDelegation { delegator, shares, .. } => {
                assert_eq!(delegator, AccAddress::from_bytes([1u8; 20]));
                assert_eq!(shares, "1.5".parse::<Dec>().unwrap());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_swapped_address_kinds_rejected() {
        let acc = acc();
        let result = Cli::try_parse_from([
            "staking-inspect",
            "encode-delegation",
            "--delegator",
            acc.as_str(),
            "--operator",
            acc.as_str(),
            "--shares",
            "1",
        ]);
        assert!(result.is_err());
    }
}

//! Command handlers. Each returns the text to print.

use anyhow::Context;
use serde::Serialize;
use staking_core::{AccAddress, Coin, Dec, Int, OperAddress, Timestamp};
use staking_state::{Delegation, DelegationResponse, Record, UnbondingDelegation};
use tracing::debug;

use crate::cli::Command;
use crate::config::InspectConfig;

/// Run one command.
pub fn run(command: Command, config: &InspectConfig) -> anyhow::Result<String> {
    match command {
        Command::EncodeDelegation {
            delegator,
            operator,
            shares,
        } => encode_delegation(delegator, operator, shares, config),
        Command::DecodeDelegation { hex } => decode_delegation(&hex, config),
        Command::DecodeUnbonding { hex, .. } => decode_unbonding(&hex, config),
        Command::Response {
            delegator,
            operator,
            shares,
            amount,
            denom,
        } => response(delegator, operator, shares, amount, &denom, config),
    }
}

fn decode_hex(input: &str) -> anyhow::Result<Vec<u8>> {
    let trimmed = input.trim();
    let body = trimmed.strip_prefix("0x").unwrap_or(trimmed);
    hex::decode(body).with_context(|| format!("input is not valid hex: {:?}", input))
}

fn to_json<T: Serialize>(value: &T) -> anyhow::Result<String> {
    serde_json::to_string_pretty(value).context("JSON encoding failed")
}

fn encode_delegation(
    delegator: AccAddress,
    operator: OperAddress,
    shares: Dec,
    config: &InspectConfig,
) -> anyhow::Result<String> {
    let delegation = Delegation::new(delegator, operator, shares)?;
    let bytes = delegation.marshal()?;
    debug!(len = bytes.len(), "encoded delegation");

    let encoded = hex::encode(bytes);
    if config.json {
        return to_json(&serde_json::json!({ "hex": encoded }));
    }
    Ok(encoded)
}

fn decode_delegation(input: &str, config: &InspectConfig) -> anyhow::Result<String> {
    let bytes = decode_hex(input)?;
    let delegation = Delegation::unmarshal(&bytes)?;
    debug!(len = bytes.len(), "decoded delegation");

    if config.json {
        return to_json(&delegation);
    }
    Ok(delegation.to_string())
}

#[derive(Serialize)]
struct EntryStatus {
    index: usize,
    mature: bool,
}

#[derive(Serialize)]
struct UnbondingReport<'a> {
    unbonding: &'a UnbondingDelegation,
    #[serde(skip_serializing_if = "Option::is_none")]
    now: Option<Timestamp>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    maturity: Vec<EntryStatus>,
}

fn decode_unbonding(input: &str, config: &InspectConfig) -> anyhow::Result<String> {
    let bytes = decode_hex(input)?;
    let ubd = UnbondingDelegation::unmarshal(&bytes)?;
    debug!(len = bytes.len(), entries = ubd.len(), "decoded unbonding delegation");

    let maturity: Vec<EntryStatus> = match config.now {
        Some(now) => ubd
            .entries()
            .iter()
            .enumerate()
            .map(|(index, entry)| EntryStatus {
                index,
                mature: entry.is_mature(now),
            })
            .collect(),
        None => Vec::new(),
    };

    if config.json {
        return to_json(&UnbondingReport {
            unbonding: &ubd,
            now: config.now,
            maturity,
        });
    }

    let mut out = ubd.to_string();
    if let Some(now) = config.now {
        out.push_str(&format!("\nMaturity at {}:", now));
        for status in &maturity {
            let label = if status.mature { "mature" } else { "pending" };
            out.push_str(&format!("\n  Entry {}: {}", status.index, label));
        }
    }
    Ok(out)
}

fn response(
    delegator: AccAddress,
    operator: OperAddress,
    shares: Dec,
    amount: Int,
    denom: &str,
    config: &InspectConfig,
) -> anyhow::Result<String> {
    let balance = Coin::new(denom, amount)?;
    let response = DelegationResponse::new(delegator, operator, shares, balance)?;

    if config.json {
        return to_json(&response);
    }
    Ok(response.to_string())
}

//! Delegation records.
//!
//! A delegation states that a delegator holds `shares` of an operator's
//! stake pool. There is at most one per (delegator, operator) pair.

use std::fmt;

use serde::{Deserialize, Serialize};
use staking_core::{AccAddress, Dec, OperAddress};

use crate::codec::Record;
use crate::error::{StakingError, StakingResult};

/// Shares a delegator holds in an operator's pool.
///
/// Addresses are carried as structured values and serialized as their
/// canonical text, so a record whose addresses do not decode is rejected
/// by [`Record::unmarshal`] instead of surfacing later through an accessor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delegation {
    delegator_address: AccAddress,
    operator_address: OperAddress,
    shares: Dec,
}

impl Delegation {
    /// Create a delegation.
    ///
    /// Fails with [`StakingError::InvalidAddress`] if either address has no
    /// canonical text form, or [`StakingError::NegativeShares`] if `shares < 0`.
    pub fn new(delegator: AccAddress, operator: OperAddress, shares: Dec) -> StakingResult<Self> {
        let delegation = Delegation {
            delegator_address: delegator,
            operator_address: operator,
            shares,
        };
        delegation.validate()?;
        Ok(delegation)
    }

    /// The delegating account.
    pub fn delegator_address(&self) -> &AccAddress {
        &self.delegator_address
    }

    /// The operator delegated to.
    pub fn operator_address(&self) -> &OperAddress {
        &self.operator_address
    }

    /// Shares held.
    pub fn shares(&self) -> &Dec {
        &self.shares
    }

    /// True once every share has been removed.
    pub fn is_empty(&self) -> bool {
        self.shares.is_zero()
    }

    /// Increase the share balance.
    pub fn add_shares(&mut self, amount: &Dec) -> StakingResult<()> {
        if amount.is_negative() {
            return Err(StakingError::NegativeShares {
                shares: amount.clone(),
            });
        }
        self.shares = self.shares.checked_add(amount)?;
        Ok(())
    }

    /// Decrease the share balance. The balance never goes below zero.
    pub fn remove_shares(&mut self, amount: &Dec) -> StakingResult<()> {
        if amount.is_negative() {
            return Err(StakingError::NegativeShares {
                shares: amount.clone(),
            });
        }
        if *amount > self.shares {
            return Err(StakingError::InsufficientShares {
                available: self.shares.clone(),
                requested: amount.clone(),
            });
        }
        self.shares = self.shares.checked_sub(amount)?;
        Ok(())
    }

    pub(crate) fn into_parts(self) -> (AccAddress, OperAddress, Dec) {
        (self.delegator_address, self.operator_address, self.shares)
    }
}

impl Record for Delegation {
    const KIND: &'static str = "delegation";

    fn validate(&self) -> StakingResult<()> {
        self.delegator_address
            .verify()
            .map_err(|source| StakingError::InvalidAddress {
                role: "delegator",
                source,
            })?;
        self.operator_address
            .verify()
            .map_err(|source| StakingError::InvalidAddress {
                role: "operator",
                source,
            })?;
        if self.shares.is_negative() {
            return Err(StakingError::NegativeShares {
                shares: self.shares.clone(),
            });
        }
        Ok(())
    }
}

impl fmt::Display for Delegation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "delegator_address: {}", self.delegator_address)?;
        writeln!(f, "operator_address: {}", self.operator_address)?;
        write!(f, "shares: \"{}\"", self.shares)
    }
}

define_collection!(
    /// Collection of delegations.
    Delegations,
    Delegation
);

//! Reward-accounting snapshot taken when a delegation starts.

use std::fmt;

use serde::{Deserialize, Serialize};
use staking_core::Dec;

use crate::codec::Record;
use crate::error::{StakingError, StakingResult};

/// Stake of a delegation at the reward period it began in.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelegatorStartingInfo {
    /// Reward period that ended just before the delegation.
    pub previous_period: u64,
    /// Token value of the delegation's shares at that period.
    pub stake: Dec,
    /// Block height of the snapshot.
    pub height: u64,
}

impl DelegatorStartingInfo {
    /// Create a snapshot.
    pub fn new(previous_period: u64, stake: Dec, height: u64) -> Self {
        DelegatorStartingInfo {
            previous_period,
            stake,
            height,
        }
    }
}

impl Record for DelegatorStartingInfo {
    const KIND: &'static str = "delegator starting info";

    fn validate(&self) -> StakingResult<()> {
        if self.stake.is_negative() {
            return Err(StakingError::NegativeStake {
                stake: self.stake.clone(),
            });
        }
        Ok(())
    }
}

impl fmt::Display for DelegatorStartingInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "previous_period: {}", self.previous_period)?;
        writeln!(f, "stake: \"{}\"", self.stake)?;
        write!(f, "height: {}", self.height)
    }
}

//! Delegation share movements.

use staking_core::{AccAddress, Dec, OperAddress};
use tracing::debug;

use crate::error::{StakingError, StakingResult};
use crate::state::StakingStore;
use crate::types::{Delegation, DelegatorStartingInfo};

fn require_positive(shares: &Dec) -> StakingResult<()> {
    if !shares.is_positive() {
        return Err(StakingError::NonPositiveShares {
            shares: shares.clone(),
        });
    }
    Ok(())
}

/// Add `shares` to the delegation for the pair, creating it if absent.
///
/// Returns the updated delegation.
pub fn delegate<S: StakingStore>(
    store: &mut S,
    delegator: &AccAddress,
    operator: &OperAddress,
    shares: &Dec,
) -> StakingResult<Delegation> {
    require_positive(shares)?;

    let delegation = match store.get_delegation(delegator, operator)? {
        Some(mut existing) => {
            existing.add_shares(shares)?;
            existing
        }
        None => Delegation::new(delegator.clone(), operator.clone(), shares.clone())?,
    };
    store.set_delegation(&delegation)?;

    debug!(
        delegator = %delegator,
        operator = %operator,
        added = %shares,
        total = %delegation.shares(),
        "delegated"
    );
    Ok(delegation)
}

/// Remove `shares` from the delegation for the pair.
///
/// A delegation left with zero shares is deleted and `None` is returned.
pub fn undelegate<S: StakingStore>(
    store: &mut S,
    delegator: &AccAddress,
    operator: &OperAddress,
    shares: &Dec,
) -> StakingResult<Option<Delegation>> {
    require_positive(shares)?;

    let mut delegation =
        store
            .get_delegation(delegator, operator)?
            .ok_or_else(|| StakingError::DelegationNotFound {
                delegator: delegator.clone(),
                operator: operator.clone(),
            })?;
    delegation.remove_shares(shares)?;

    if delegation.is_empty() {
        store.remove_delegation(delegator, operator)?;
        debug!(delegator = %delegator, operator = %operator, "delegation closed");
        return Ok(None);
    }

    store.set_delegation(&delegation)?;
    debug!(
        delegator = %delegator,
        operator = %operator,
        removed = %shares,
        remaining = %delegation.shares(),
        "undelegated"
    );
    Ok(Some(delegation))
}

/// Record the reward snapshot for a delegation that just started or changed.
pub fn initialize_starting_info<S: StakingStore>(
    store: &mut S,
    delegator: &AccAddress,
    operator: &OperAddress,
    previous_period: u64,
    stake: Dec,
    height: u64,
) -> StakingResult<DelegatorStartingInfo> {
    let info = DelegatorStartingInfo::new(previous_period, stake, height);
    store.set_starting_info(operator, delegator, &info)?;
    debug!(
        delegator = %delegator,
        operator = %operator,
        previous_period,
        height,
        "starting info recorded"
    );
    Ok(info)
}

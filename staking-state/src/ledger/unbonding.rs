//! Unbonding entry creation and release.

use staking_core::{AccAddress, Int, OperAddress, Timestamp};
use tracing::debug;

use crate::error::{StakingError, StakingResult};
use crate::state::StakingStore;
use crate::types::UnbondingDelegation;

/// Append an unbonding entry for the pair, creating the record if absent.
pub fn record_unbonding_entry<S: StakingStore>(
    store: &mut S,
    delegator: &AccAddress,
    operator: &OperAddress,
    creation_height: i64,
    completion_time: Timestamp,
    balance: Int,
) -> StakingResult<UnbondingDelegation> {
    let ubd = match store.get_unbonding_delegation(delegator, operator)? {
        Some(mut existing) => {
            existing.add_entry(creation_height, completion_time, balance)?;
            existing
        }
        None => UnbondingDelegation::new(
            delegator.clone(),
            operator.clone(),
            creation_height,
            completion_time,
            balance,
        )?,
    };
    store.set_unbonding_delegation(&ubd)?;

    debug!(
        delegator = %delegator,
        operator = %operator,
        creation_height,
        completion_time = %completion_time,
        entries = ubd.len(),
        "unbonding entry recorded"
    );
    Ok(ubd)
}

/// Release every entry mature at `now` and return the sum of their balances.
///
/// Entries are scanned in full since creation order does not imply
/// completion order. The record is deleted once no entries remain.
pub fn complete_unbonding<S: StakingStore>(
    store: &mut S,
    delegator: &AccAddress,
    operator: &OperAddress,
    now: Timestamp,
) -> StakingResult<Int> {
    let mut ubd = store
        .get_unbonding_delegation(delegator, operator)?
        .ok_or_else(|| StakingError::UnbondingNotFound {
            delegator: delegator.clone(),
            operator: operator.clone(),
        })?;

    let mut released = Int::zero();
    let mut matured = 0usize;
    let mut i = 0;
    while i < ubd.len() {
        if ubd.entries()[i].is_mature(now) {
            let entry = ubd.remove_entry(i)?;
            released = released.checked_add(entry.balance())?;
            matured += 1;
        } else {
            i += 1;
        }
    }

    if ubd.is_empty() {
        store.remove_unbonding_delegation(delegator, operator)?;
    } else if matured > 0 {
        store.set_unbonding_delegation(&ubd)?;
    }

    debug!(
        delegator = %delegator,
        operator = %operator,
        matured,
        remaining = ubd.len(),
        released = %released,
        "unbonding completed"
    );
    Ok(released)
}

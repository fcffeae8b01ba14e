//! Read-side projections for query consumers.

use staking_core::{AccAddress, Coin, Dec, OperAddress};

use crate::error::{StakingError, StakingResult};
use crate::state::StakingReader;
use crate::types::{Delegation, DelegationResponse, DelegationResponses};

fn project(
    delegation: Delegation,
    tokens_per_share: &Dec,
    bond_denom: &str,
) -> StakingResult<DelegationResponse> {
    let amount = delegation.shares().mul_truncate(tokens_per_share)?.truncate_int();
    let balance = Coin::new(bond_denom, amount)?;
    DelegationResponse::from_delegation(delegation, balance)
}

/// Project the delegation for a pair into a response.
///
/// The balance is `shares * tokens_per_share`, truncated toward zero.
pub fn delegation_response<S: StakingReader>(
    store: &S,
    delegator: &AccAddress,
    operator: &OperAddress,
    tokens_per_share: &Dec,
    bond_denom: &str,
) -> StakingResult<DelegationResponse> {
    let delegation =
        store
            .get_delegation(delegator, operator)?
            .ok_or_else(|| StakingError::DelegationNotFound {
                delegator: delegator.clone(),
                operator: operator.clone(),
            })?;
    project(delegation, tokens_per_share, bond_denom)
}

/// Project every delegation of `delegator`.
///
/// `tokens_per_share` supplies the exchange rate of each operator's pool.
pub fn delegator_responses<S, F>(
    store: &S,
    delegator: &AccAddress,
    mut tokens_per_share: F,
    bond_denom: &str,
) -> StakingResult<DelegationResponses>
where
    S: StakingReader,
    F: FnMut(&OperAddress) -> StakingResult<Dec>,
{
    store
        .delegator_delegations(delegator)?
        .into_iter()
        .map(|delegation| {
            let rate = tokens_per_share(delegation.operator_address())?;
            project(delegation, &rate, bond_denom)
        })
        .collect::<StakingResult<Vec<_>>>()
        .map(DelegationResponses::from)
}

//! In-memory delegation state container.

use std::collections::BTreeMap;
use std::ops::Bound;

use staking_core::{AccAddress, OperAddress};

use super::store::{StakingReader, StakingWriter};
use crate::codec::Record;
use crate::error::StakingResult;
use crate::types::{Delegation, DelegatorStartingInfo, UnbondingDelegation};

/// In-memory delegation state backed by BTreeMaps.
///
/// Addresses order by length and then bytes, so per-delegator listings come
/// back in the same order as a prefix scan over the length-prefixed keys.
#[derive(Clone, Debug, Default)]
pub struct StakingState {
    /// Delegations per (delegator, operator).
    pub delegations: BTreeMap<(AccAddress, OperAddress), Delegation>,

    /// Unbonding delegations per (delegator, operator).
    pub unbonding_delegations: BTreeMap<(AccAddress, OperAddress), UnbondingDelegation>,

    /// Reward snapshots per (operator, delegator).
    pub starting_infos: BTreeMap<(OperAddress, AccAddress), DelegatorStartingInfo>,
}

impl StakingState {
    /// Create an empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored delegations.
    pub fn delegation_count(&self) -> usize {
        self.delegations.len()
    }

    /// Number of stored unbonding delegations.
    pub fn unbonding_count(&self) -> usize {
        self.unbonding_delegations.len()
    }
}

/// Values whose key starts with `delegator`, in key order.
fn range_for<'a, V>(
    map: &'a BTreeMap<(AccAddress, OperAddress), V>,
    delegator: &'a AccAddress,
) -> impl Iterator<Item = &'a V> + 'a {
    let start = (delegator.clone(), OperAddress::from_bytes(Vec::new()));
    map.range((Bound::Included(start), Bound::Unbounded))
        .take_while(move |((d, _), _)| d == delegator)
        .map(|(_, v)| v)
}

fn pair(delegator: &AccAddress, operator: &OperAddress) -> (AccAddress, OperAddress) {
    (delegator.clone(), operator.clone())
}

impl StakingReader for StakingState {
    fn get_delegation(
        &self,
        delegator: &AccAddress,
        operator: &OperAddress,
    ) -> StakingResult<Option<Delegation>> {
        Ok(self.delegations.get(&pair(delegator, operator)).cloned())
    }

    fn delegator_delegations(&self, delegator: &AccAddress) -> StakingResult<Vec<Delegation>> {
        Ok(range_for(&self.delegations, delegator).cloned().collect())
    }

    fn get_unbonding_delegation(
        &self,
        delegator: &AccAddress,
        operator: &OperAddress,
    ) -> StakingResult<Option<UnbondingDelegation>> {
        Ok(self
            .unbonding_delegations
            .get(&pair(delegator, operator))
            .cloned())
    }

    fn delegator_unbonding_delegations(
        &self,
        delegator: &AccAddress,
    ) -> StakingResult<Vec<UnbondingDelegation>> {
        Ok(range_for(&self.unbonding_delegations, delegator)
            .cloned()
            .collect())
    }

    fn get_starting_info(
        &self,
        operator: &OperAddress,
        delegator: &AccAddress,
    ) -> StakingResult<Option<DelegatorStartingInfo>> {
        Ok(self
            .starting_infos
            .get(&(operator.clone(), delegator.clone()))
            .cloned())
    }
}

impl StakingWriter for StakingState {
    fn set_delegation(&mut self, delegation: &Delegation) -> StakingResult<()> {
        delegation.validate()?;
        self.delegations.insert(
            pair(delegation.delegator_address(), delegation.operator_address()),
            delegation.clone(),
        );
        Ok(())
    }

    fn remove_delegation(
        &mut self,
        delegator: &AccAddress,
        operator: &OperAddress,
    ) -> StakingResult<bool> {
        Ok(self.delegations.remove(&pair(delegator, operator)).is_some())
    }

    fn set_unbonding_delegation(&mut self, ubd: &UnbondingDelegation) -> StakingResult<()> {
        ubd.validate()?;
        self.unbonding_delegations.insert(
            pair(ubd.delegator_address(), ubd.operator_address()),
            ubd.clone(),
        );
        Ok(())
    }

    fn remove_unbonding_delegation(
        &mut self,
        delegator: &AccAddress,
        operator: &OperAddress,
    ) -> StakingResult<bool> {
        Ok(self
            .unbonding_delegations
            .remove(&pair(delegator, operator))
            .is_some())
    }

    fn set_starting_info(
        &mut self,
        operator: &OperAddress,
        delegator: &AccAddress,
        info: &DelegatorStartingInfo,
    ) -> StakingResult<()> {
        info.validate()?;
        self.starting_infos
            .insert((operator.clone(), delegator.clone()), info.clone());
        Ok(())
    }

    fn remove_starting_info(
        &mut self,
        operator: &OperAddress,
        delegator: &AccAddress,
    ) -> StakingResult<bool> {
        Ok(self
            .starting_infos
            .remove(&(operator.clone(), delegator.clone()))
            .is_some())
    }
}

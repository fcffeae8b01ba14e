//! StakingReader implementation for PersistentState.

use staking_core::{AccAddress, OperAddress};
use staking_state::{
    Delegation, DelegatorStartingInfo, StakingReader, StakingResult, UnbondingDelegation,
};

use super::PersistentState;
use crate::keys::{delegator_prefix, KeyPrefix, StateKey};
use crate::kv::KvBackend;

impl<B: KvBackend> StakingReader for PersistentState<B> {
    fn get_delegation(
        &self,
        delegator: &AccAddress,
        operator: &OperAddress,
    ) -> StakingResult<Option<Delegation>> {
        let key = StateKey::Delegation(delegator.clone(), operator.clone()).to_bytes()?;
        self.load(&key)
    }

    fn delegator_delegations(&self, delegator: &AccAddress) -> StakingResult<Vec<Delegation>> {
        let prefix = delegator_prefix(KeyPrefix::Delegation, delegator)?;
        self.scan(&prefix)
    }

    fn get_unbonding_delegation(
        &self,
        delegator: &AccAddress,
        operator: &OperAddress,
    ) -> StakingResult<Option<UnbondingDelegation>> {
        let key = StateKey::UnbondingDelegation(delegator.clone(), operator.clone()).to_bytes()?;
        self.load(&key)
    }

    fn delegator_unbonding_delegations(
        &self,
        delegator: &AccAddress,
    ) -> StakingResult<Vec<UnbondingDelegation>> {
        let prefix = delegator_prefix(KeyPrefix::UnbondingDelegation, delegator)?;
        self.scan(&prefix)
    }

    fn get_starting_info(
        &self,
        operator: &OperAddress,
        delegator: &AccAddress,
    ) -> StakingResult<Option<DelegatorStartingInfo>> {
        let key = StateKey::StartingInfo(operator.clone(), delegator.clone()).to_bytes()?;
        self.load(&key)
    }
}

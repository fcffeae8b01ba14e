//! StakingWriter implementation for PersistentState.

use staking_core::{AccAddress, OperAddress};
use staking_state::{
    Delegation, DelegatorStartingInfo, StakingResult, StakingWriter, UnbondingDelegation,
};

use super::PersistentState;
use crate::keys::StateKey;
use crate::kv::KvBackend;

impl<B: KvBackend> StakingWriter for PersistentState<B> {
    fn set_delegation(&mut self, delegation: &Delegation) -> StakingResult<()> {
        let key = StateKey::Delegation(
            delegation.delegator_address().clone(),
            delegation.operator_address().clone(),
        )
        .to_bytes()?;
        self.save(&key, delegation)
    }

    fn remove_delegation(
        &mut self,
        delegator: &AccAddress,
        operator: &OperAddress,
    ) -> StakingResult<bool> {
        let key = StateKey::Delegation(delegator.clone(), operator.clone()).to_bytes()?;
        self.erase(&key)
    }

    fn set_unbonding_delegation(&mut self, ubd: &UnbondingDelegation) -> StakingResult<()> {
        let key = StateKey::UnbondingDelegation(
            ubd.delegator_address().clone(),
            ubd.operator_address().clone(),
        )
        .to_bytes()?;
        self.save(&key, ubd)
    }

    fn remove_unbonding_delegation(
        &mut self,
        delegator: &AccAddress,
        operator: &OperAddress,
    ) -> StakingResult<bool> {
        let key = StateKey::UnbondingDelegation(delegator.clone(), operator.clone()).to_bytes()?;
        self.erase(&key)
    }

    fn set_starting_info(
        &mut self,
        operator: &OperAddress,
        delegator: &AccAddress,
        info: &DelegatorStartingInfo,
    ) -> StakingResult<()> {
        let key = StateKey::StartingInfo(operator.clone(), delegator.clone()).to_bytes()?;
        self.save(&key, info)
    }

    fn remove_starting_info(
        &mut self,
        operator: &OperAddress,
        delegator: &AccAddress,
    ) -> StakingResult<bool> {
        let key = StateKey::StartingInfo(operator.clone(), delegator.clone()).to_bytes()?;
        self.erase(&key)
    }
}

//! State storage traits.
//!
//! These traits abstract over the backing store so ledger operations run
//! unchanged against the in-memory [`StakingState`](super::StakingState)
//! or a persistent key-value store.

use staking_core::{AccAddress, OperAddress};

use crate::error::StakingResult;
use crate::types::{Delegation, DelegatorStartingInfo, UnbondingDelegation};

/// Read access to delegation state.
///
/// Reads are fallible: a persistent implementation reports undecodable
/// bytes as [`StakingError::CorruptState`](crate::StakingError::CorruptState).
pub trait StakingReader {
    // === Delegation Queries ===

    /// Get the delegation for a pair.
    fn get_delegation(
        &self,
        delegator: &AccAddress,
        operator: &OperAddress,
    ) -> StakingResult<Option<Delegation>>;

    /// Every delegation of `delegator`, ordered by operator address bytes.
    fn delegator_delegations(&self, delegator: &AccAddress) -> StakingResult<Vec<Delegation>>;

    /// Check if a delegation exists.
    fn delegation_exists(
        &self,
        delegator: &AccAddress,
        operator: &OperAddress,
    ) -> StakingResult<bool> {
        Ok(self.get_delegation(delegator, operator)?.is_some())
    }

    // === Unbonding Queries ===

    /// Get the unbonding delegation for a pair.
    fn get_unbonding_delegation(
        &self,
        delegator: &AccAddress,
        operator: &OperAddress,
    ) -> StakingResult<Option<UnbondingDelegation>>;

    /// Every unbonding delegation of `delegator`, ordered by operator address bytes.
    fn delegator_unbonding_delegations(
        &self,
        delegator: &AccAddress,
    ) -> StakingResult<Vec<UnbondingDelegation>>;

    // === Starting Info Queries ===

    /// Get the reward snapshot for a pair.
    fn get_starting_info(
        &self,
        operator: &OperAddress,
        delegator: &AccAddress,
    ) -> StakingResult<Option<DelegatorStartingInfo>>;
}

/// Mutable access to delegation state.
///
/// Setters validate the record first; an invalid record is never stored.
pub trait StakingWriter: StakingReader {
    // === Delegation Mutations ===

    /// Insert or replace a delegation.
    fn set_delegation(&mut self, delegation: &Delegation) -> StakingResult<()>;

    /// Remove a delegation. Returns whether one existed.
    fn remove_delegation(
        &mut self,
        delegator: &AccAddress,
        operator: &OperAddress,
    ) -> StakingResult<bool>;

    // === Unbonding Mutations ===

    /// Insert or replace an unbonding delegation. Empty records are refused.
    fn set_unbonding_delegation(&mut self, ubd: &UnbondingDelegation) -> StakingResult<()>;

    /// Remove an unbonding delegation. Returns whether one existed.
    fn remove_unbonding_delegation(
        &mut self,
        delegator: &AccAddress,
        operator: &OperAddress,
    ) -> StakingResult<bool>;

    // === Starting Info Mutations ===

    /// Insert or replace the reward snapshot for a pair.
    fn set_starting_info(
        &mut self,
        operator: &OperAddress,
        delegator: &AccAddress,
        info: &DelegatorStartingInfo,
    ) -> StakingResult<()>;

    /// Remove the reward snapshot for a pair. Returns whether one existed.
    fn remove_starting_info(
        &mut self,
        operator: &OperAddress,
        delegator: &AccAddress,
    ) -> StakingResult<bool>;
}

/// Combined trait for full state access.
///
/// Any type implementing both `StakingReader` and `StakingWriter`
/// automatically implements `StakingStore`.
pub trait StakingStore: StakingReader + StakingWriter {}

impl<T: StakingReader + StakingWriter> StakingStore for T {}

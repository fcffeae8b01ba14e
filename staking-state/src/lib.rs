//! Delegation state model for the staking ledger.
//!
//! This crate holds the delegation records, their deterministic binary
//! codec, and the ledger operations that move shares and unbonding
//! entries. It does no networking and no persistence of its own; storage
//! sits behind the [`StakingStore`] trait.
//!
//! # Key Components
//!
//! - [`Delegation`], [`UnbondingDelegation`], [`DelegationResponse`]: Ledger records
//! - [`Record`]: Fallible `marshal` / `unmarshal` plus asserting `must_*` wrappers
//! - [`StakingReader`]/[`StakingWriter`]: Traits abstracting state access
//! - [`StakingState`]: In-memory state container backed by BTreeMaps
//! - [`StakingError`]: Error type separating recoverable from fatal failures
//!
//! # Example
//!
//! ```ignore
//! use staking_state::{delegate, StakingState};
//!
//! let mut state = StakingState::new();
//! let delegation = delegate(&mut state, &delegator, &operator, &shares)?;
//! ```

mod codec;
mod error;
mod ledger;
mod state;
mod types;

pub use codec::Record;
pub use error::{StakingError, StakingResult};
pub use ledger::{
    complete_unbonding, delegate, delegation_response, delegator_responses,
    initialize_starting_info, record_unbonding_entry, undelegate,
};
pub use state::{StakingReader, StakingState, StakingStore, StakingWriter};
pub use types::{
    Delegation, DelegationResponse, DelegationResponses, Delegations, DelegatorStartingInfo,
    UnbondingDelegation, UnbondingDelegationEntry, UnbondingDelegations,
};

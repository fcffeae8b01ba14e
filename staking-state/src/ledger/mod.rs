//! Ledger operations over any [`StakingStore`](crate::StakingStore).
//!
//! Each operation reads the affected record, mutates a transient copy and
//! writes it back. Callers serialize operations per (delegator, operator).

mod delegation;
mod query;
mod unbonding;

pub use delegation::{delegate, initialize_starting_info, undelegate};
pub use query::{delegation_response, delegator_responses};
pub use unbonding::{complete_unbonding, record_unbonding_entry};

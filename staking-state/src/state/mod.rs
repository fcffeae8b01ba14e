//! State container and storage traits.
//!
//! This module provides:
//! - [`StakingReader`]: Read-only access to delegation state
//! - [`StakingWriter`]: Mutable access to delegation state
//! - [`StakingStore`]: Combined trait for full state access
//! - [`StakingState`]: In-memory BTreeMap-backed implementation

mod store;
mod staking_state;

pub use store::{StakingReader, StakingWriter, StakingStore};
pub use staking_state::StakingState;

//! # Staking Storage
//!
//! Key-value persistence for the staking ledger.
//!
//! This crate provides:
//! - A deterministic key schema for delegation records
//! - A [`KvBackend`] abstraction with an in-memory implementation
//! - [`PersistentState`], which stores records as marshaled bytes
//!
//! ## Architecture
//!
//! The storage layer implements the `StakingReader` and `StakingWriter`
//! traits from `staking-state`, so it is a drop-in replacement for the
//! in-memory `StakingState`. Reads go through the trusted decode path:
//! bytes that no longer decode surface as a fatal `CorruptState` error.

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod keys;
pub mod kv;
pub mod state;

pub use error::StorageError;
pub use keys::{delegator_prefix, KeyPrefix, StateKey};
pub use kv::{KvBackend, MemoryBackend};
pub use state::PersistentState;

//! Persistent state implementation.
//!
//! This module provides `PersistentState`, which implements the
//! `StakingReader` and `StakingWriter` traits from `staking-state` over a
//! [`KvBackend`], storing each record under its [`StateKey`](crate::keys::StateKey).

mod reader;
mod writer;

use std::sync::Arc;

use staking_state::{Record, StakingResult};
use tracing::error;

use crate::kv::KvBackend;

/// Persistent state backed by a key-value store.
///
/// Drop-in replacement for the in-memory `StakingState`.
///
/// ## Usage
///
/// ```ignore
/// let backend = Arc::new(MemoryBackend::new());
/// let mut state = PersistentState::new(backend);
///
/// delegate(&mut state, &delegator, &operator, &shares)?;
/// ```
///
/// Bytes read back that no longer decode are logged with their key and
/// returned as a fatal `StakingError::CorruptState`.
pub struct PersistentState<B: KvBackend> {
    backend: Arc<B>,
}

impl<B: KvBackend> PersistentState<B> {
    /// Create a state view over `backend`.
    pub fn new(backend: Arc<B>) -> Self {
        Self { backend }
    }

    /// The underlying KV backend.
    pub fn backend(&self) -> &Arc<B> {
        &self.backend
    }

    fn load<R: Record>(&self, key: &[u8]) -> StakingResult<Option<R>> {
        match self.backend.get(key)? {
            Some(bytes) => decode_stored(key, &bytes).map(Some),
            None => Ok(None),
        }
    }

    fn scan<R: Record>(&self, prefix: &[u8]) -> StakingResult<Vec<R>> {
        self.backend
            .prefix_iterator(prefix)?
            .map(|(key, bytes)| decode_stored(&key, &bytes))
            .collect()
    }

    fn save<R: Record>(&self, key: &[u8], record: &R) -> StakingResult<()> {
        let bytes = record.marshal()?;
        self.backend.put(key, &bytes)?;
        Ok(())
    }

    fn erase(&self, key: &[u8]) -> StakingResult<bool> {
        if !self.backend.exists(key)? {
            return Ok(false);
        }
        self.backend.delete(key)?;
        Ok(true)
    }
}

fn decode_stored<R: Record>(key: &[u8], bytes: &[u8]) -> StakingResult<R> {
    R::unmarshal_stored(bytes).map_err(|e| {
        error!(
            key = %hex::encode(key),
            kind = R::KIND,
            error = %e,
            "stored record does not decode"
        );
        e
    })
}

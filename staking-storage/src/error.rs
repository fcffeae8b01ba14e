//! Storage error types.

use staking_state::StakingError;
use thiserror::Error;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Backend failure.
    #[error("Backend error: {0}")]
    Backend(String),

    /// Key cannot be built from the given addresses.
    #[error("Invalid key: {0}")]
    InvalidKey(String),
}

impl From<StorageError> for StakingError {
    fn from(e: StorageError) -> Self {
        StakingError::Storage(e.to_string())
    }
}

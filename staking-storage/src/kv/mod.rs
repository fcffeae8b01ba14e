//! Key-value storage backends.
//!
//! The ledger only needs point reads and writes plus ordered prefix scans.
//! `MemoryBackend` is the in-process implementation; a disk engine plugs
//! in by implementing [`KvBackend`].

mod memory_backend;

pub use memory_backend::MemoryBackend;

use crate::error::StorageError;

/// Type alias for the iterator returned by prefix_iterator.
pub type PrefixIterator<'a> = Box<dyn Iterator<Item = (Vec<u8>, Vec<u8>)> + 'a>;

/// Trait for key-value storage backends.
///
/// Implementations must iterate in ascending key order.
pub trait KvBackend: Send + Sync {
    /// Get a value by key.
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StorageError>;

    /// Put a key-value pair.
    fn put(&self, key: &[u8], value: &[u8]) -> Result<(), StorageError>;

    /// Delete a key.
    fn delete(&self, key: &[u8]) -> Result<(), StorageError>;

    /// Check if a key exists.
    fn exists(&self, key: &[u8]) -> Result<bool, StorageError> {
        Ok(self.get(key)?.is_some())
    }

    /// Iterate over all keys with a given prefix.
    fn prefix_iterator(&self, prefix: &[u8]) -> Result<PrefixIterator<'_>, StorageError>;
}

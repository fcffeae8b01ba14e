//! In-memory key-value backend.

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::{KvBackend, PrefixIterator};
use crate::error::StorageError;

type Map = BTreeMap<Vec<u8>, Vec<u8>>;

/// In-memory key-value backend using a BTreeMap.
///
/// Thread-safe, and keeps keys sorted so prefix scans come back in key order.
pub struct MemoryBackend {
    data: RwLock<Map>,
}

impl MemoryBackend {
    /// Create a new empty in-memory backend.
    pub fn new() -> Self {
        Self {
            data: RwLock::new(BTreeMap::new()),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Map>, StorageError> {
        self.data
            .read()
            .map_err(|_| StorageError::Backend("memory backend lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Map>, StorageError> {
        self.data
            .write()
            .map_err(|_| StorageError::Backend("memory backend lock poisoned".into()))
    }

    /// Get the number of entries in the store.
    pub fn len(&self) -> Result<usize, StorageError> {
        Ok(self.read()?.len())
    }

    /// Check if the store is empty.
    pub fn is_empty(&self) -> Result<bool, StorageError> {
        Ok(self.read()?.is_empty())
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl KvBackend for MemoryBackend {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StorageError> {
        Ok(self.read()?.get(key).cloned())
    }

    fn put(&self, key: &[u8], value: &[u8]) -> Result<(), StorageError> {
        self.write()?.insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    fn delete(&self, key: &[u8]) -> Result<(), StorageError> {
        self.write()?.remove(key);
        Ok(())
    }

    fn prefix_iterator(&self, prefix: &[u8]) -> Result<PrefixIterator<'_>, StorageError> {
        let data = self.read()?;

        // Snapshot the matches so the lock is not held by the iterator.
        let entries: Vec<(Vec<u8>, Vec<u8>)> = data
            .range(prefix.to_vec()..)
            .take_while(|(k, _)| k.starts_with(prefix))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        Ok(Box::new(entries.into_iter()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_empty() {
        let backend = MemoryBackend::new();
        assert!(backend.is_empty().unwrap());
        assert_eq!(backend.len().unwrap(), 0);
    }

    #[test]
    fn test_overwrite() {
        let backend = MemoryBackend::new();
        backend.put(b"key", b"value1").unwrap();
        backend.put(b"key", b"value2").unwrap();

        assert_eq!(backend.len().unwrap(), 1);
        assert_eq!(backend.get(b"key").unwrap(), Some(b"value2".to_vec()));
    }

    #[test]
    fn test_prefix_iterator_empty_prefix() {
        let backend = MemoryBackend::new();
        backend.put(b"a", b"1").unwrap();
        backend.put(b"b", b"2").unwrap();

        let items: Vec<_> = backend.prefix_iterator(b"").unwrap().collect();
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn test_prefix_iterator_no_matches() {
        let backend = MemoryBackend::new();
        backend.put(b"abc", b"1").unwrap();
        backend.put(b"abd", b"2").unwrap();

        assert_eq!(backend.prefix_iterator(b"xyz").unwrap().count(), 0);
    }

    #[test]
    fn test_prefix_boundary_byte() {
        let backend = MemoryBackend::new();
        backend.put(&[0x31, 0xFF], b"1").unwrap();
        backend.put(&[0x32], b"2").unwrap();

        let items: Vec<_> = backend.prefix_iterator(&[0x31]).unwrap().collect();
        assert_eq!(items, vec![(vec![0x31, 0xFF], b"1".to_vec())]);
    }
}

//! Binary codec for stored records.
//!
//! Each record type has a fallible `marshal` / `unmarshal` pair for bytes
//! of unknown origin, and `must_*` wrappers for call sites that have
//! already established the bytes came from trusted storage. Decode failure
//! on the trusted path is ledger corruption and aborts.

use serde::{de::DeserializeOwned, Serialize};
use staking_core::serialization::{deserialize, serialize};

use crate::error::{StakingError, StakingResult};

/// A record persisted in the ledger store.
pub trait Record: Serialize + DeserializeOwned + Sized {
    /// Short name used in error messages.
    const KIND: &'static str;

    /// Check the record's invariants.
    fn validate(&self) -> StakingResult<()>;

    /// Deterministic binary encoding. Invalid records are refused so that
    /// everything `marshal` produces round-trips through `unmarshal`.
    fn marshal(&self) -> StakingResult<Vec<u8>> {
        self.validate()?;
        serialize(self).map_err(|e| StakingError::Encode {
            kind: Self::KIND,
            reason: e.to_string(),
        })
    }

    /// Decode bytes of unknown origin.
    fn unmarshal(bytes: &[u8]) -> StakingResult<Self> {
        let record: Self = deserialize(bytes).map_err(|e| StakingError::Decode {
            kind: Self::KIND,
            reason: e.to_string(),
        })?;
        record.validate().map_err(|e| StakingError::Decode {
            kind: Self::KIND,
            reason: e.to_string(),
        })?;
        Ok(record)
    }

    /// Decode bytes read back from the ledger store. Failure is reported
    /// as [`StakingError::CorruptState`].
    fn unmarshal_stored(bytes: &[u8]) -> StakingResult<Self> {
        Self::unmarshal(bytes).map_err(StakingError::into_corrupt)
    }

    /// Encode a record known to be valid.
    ///
    /// # Panics
    ///
    /// Panics if the record violates its invariants.
    fn must_marshal(&self) -> Vec<u8> {
        self.marshal()
            .unwrap_or_else(|e| panic!("marshal {}: {}", Self::KIND, e))
    }

    /// Decode bytes known to come from the ledger store.
    ///
    /// # Panics
    ///
    /// Panics with [`StakingError::CorruptState`] if the bytes do not decode.
    fn must_unmarshal(bytes: &[u8]) -> Self {
        Self::unmarshal_stored(bytes).unwrap_or_else(|e| panic!("{}", e))
    }
}

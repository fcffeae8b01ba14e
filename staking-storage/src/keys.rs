//! Key schema encoding for storage.
//!
//! Every record key is a one-byte prefix followed by length-prefixed
//! address bytes. The length prefix keeps keys unambiguous for addresses
//! of different sizes, and putting the delegator first lets all records of
//! one delegator be scanned with a single prefix.

use staking_core::{AccAddress, OperAddress, MAX_ADDRESS_LEN};

use crate::error::StorageError;

/// Key prefixes for different record types.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyPrefix {
    /// Delegation: `0x31 || len(del) || del || len(op) || op`
    Delegation = 0x31,
    /// Unbonding delegation: `0x32 || len(del) || del || len(op) || op`
    UnbondingDelegation = 0x32,
    /// Delegator starting info: `0x33 || len(op) || op || len(del) || del`
    StartingInfo = 0x33,
}

/// State key for addressing stored records.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum StateKey {
    /// Delegation by (delegator, operator).
    Delegation(AccAddress, OperAddress),
    /// Unbonding delegation by (delegator, operator).
    UnbondingDelegation(AccAddress, OperAddress),
    /// Starting info by (operator, delegator).
    StartingInfo(OperAddress, AccAddress),
}

fn push_len_prefixed(key: &mut Vec<u8>, bytes: &[u8]) -> Result<(), StorageError> {
    if bytes.is_empty() || bytes.len() > MAX_ADDRESS_LEN {
        return Err(StorageError::InvalidKey(format!(
            "address length {} outside 1..={}",
            bytes.len(),
            MAX_ADDRESS_LEN
        )));
    }
    key.push(bytes.len() as u8);
    key.extend_from_slice(bytes);
    Ok(())
}

/// Split one length-prefixed segment off the front of `data`.
fn take_len_prefixed(data: &[u8]) -> Option<(&[u8], &[u8])> {
    let (&len, rest) = data.split_first()?;
    let len = len as usize;
    if len == 0 || rest.len() < len {
        return None;
    }
    Some(rest.split_at(len))
}

fn pair_key(prefix: KeyPrefix, first: &[u8], second: &[u8]) -> Result<Vec<u8>, StorageError> {
    let mut key = Vec::with_capacity(3 + first.len() + second.len());
    key.push(prefix as u8);
    push_len_prefixed(&mut key, first)?;
    push_len_prefixed(&mut key, second)?;
    Ok(key)
}

impl StateKey {
    /// Convert the state key to bytes for storage.
    pub fn to_bytes(&self) -> Result<Vec<u8>, StorageError> {
        match self {
            StateKey::Delegation(del, op) => {
                pair_key(KeyPrefix::Delegation, del.as_bytes(), op.as_bytes())
            }
            StateKey::UnbondingDelegation(del, op) => {
                pair_key(KeyPrefix::UnbondingDelegation, del.as_bytes(), op.as_bytes())
            }
            StateKey::StartingInfo(op, del) => {
                pair_key(KeyPrefix::StartingInfo, op.as_bytes(), del.as_bytes())
            }
        }
    }

    /// Parse a state key from bytes.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        let (&prefix, data) = bytes.split_first()?;
        let (first, rest) = take_len_prefixed(data)?;
        let (second, rest) = take_len_prefixed(rest)?;
        if !rest.is_empty() {
            return None;
        }

        match prefix {
            x if x == KeyPrefix::Delegation as u8 => Some(StateKey::Delegation(
                AccAddress::from_bytes(first),
                OperAddress::from_bytes(second),
            )),
            x if x == KeyPrefix::UnbondingDelegation as u8 => Some(StateKey::UnbondingDelegation(
                AccAddress::from_bytes(first),
                OperAddress::from_bytes(second),
            )),
            x if x == KeyPrefix::StartingInfo as u8 => Some(StateKey::StartingInfo(
                OperAddress::from_bytes(first),
                AccAddress::from_bytes(second),
            )),
            _ => None,
        }
    }
}

/// Prefix shared by every `prefix` record of `delegator`.
///
/// Only meaningful for [`KeyPrefix::Delegation`] and
/// [`KeyPrefix::UnbondingDelegation`], whose keys lead with the delegator.
pub fn delegator_prefix(prefix: KeyPrefix, delegator: &AccAddress) -> Result<Vec<u8>, StorageError> {
    let bytes = delegator.as_bytes();
    let mut key = Vec::with_capacity(2 + bytes.len());
    key.push(prefix as u8);
    push_len_prefixed(&mut key, bytes)?;
    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn acc(len: usize) -> AccAddress {
        AccAddress::from_bytes(vec![0xAA; len])
    }

    fn oper(len: usize) -> OperAddress {
        OperAddress::from_bytes(vec![0xBB; len])
    }

    #[test]
    fn test_delegation_key_layout() {
        let key = StateKey::Delegation(acc(2), oper(3)).to_bytes().unwrap();
        assert_eq!(key, vec![0x31, 2, 0xAA, 0xAA, 3, 0xBB, 0xBB, 0xBB]);
    }

    #[test]
    fn test_starting_info_key_leads_with_operator() {
        let key = StateKey::StartingInfo(oper(1), acc(1)).to_bytes().unwrap();
        assert_eq!(key, vec![0x33, 1, 0xBB, 1, 0xAA]);
    }

    #[test]
    fn test_key_roundtrip() {
        for key in [
            StateKey::Delegation(acc(20), oper(32)),
            StateKey::UnbondingDelegation(acc(255), oper(1)),
            StateKey::StartingInfo(oper(20), acc(20)),
        ] {
            let bytes = key.to_bytes().unwrap();
            assert_eq!(StateKey::from_bytes(&bytes), Some(key));
        }
    }

    #[test]
    fn test_from_bytes_rejects_malformed() {
        assert_eq!(StateKey::from_bytes(&[]), None);
        assert_eq!(StateKey::from_bytes(&[0x31]), None);
        assert_eq!(StateKey::from_bytes(&[0x31, 2, 0xAA]), None);
        assert_eq!(StateKey::from_bytes(&[0x31, 1, 0xAA, 1, 0xBB, 0x00]), None);
        assert_eq!(StateKey::from_bytes(&[0x31, 0, 1, 0xBB]), None);
        assert_eq!(StateKey::from_bytes(&[0x01, 1, 0xAA, 1, 0xBB]), None);
    }

    #[test]
    fn test_unrepresentable_address_rejected() {
        assert!(StateKey::Delegation(acc(0), oper(1)).to_bytes().is_err());
        assert!(StateKey::Delegation(acc(1), oper(256)).to_bytes().is_err());
    }

    #[test]
    fn test_delegator_prefix_matches_keys() {
        let prefix = delegator_prefix(KeyPrefix::Delegation, &acc(20)).unwrap();
        let key = StateKey::Delegation(acc(20), oper(20)).to_bytes().unwrap();
        assert!(key.starts_with(&prefix));

        // A longer delegator sharing the same leading bytes must not match.
        let other = StateKey::Delegation(acc(21), oper(20)).to_bytes().unwrap();
        assert!(!other.starts_with(&prefix));

        let ubd = StateKey::UnbondingDelegation(acc(20), oper(20)).to_bytes().unwrap();
        assert!(!ubd.starts_with(&prefix));
    }
}

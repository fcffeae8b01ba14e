//! Ledger addresses and their canonical text form.
//!
//! Addresses are raw byte strings in memory and checksummed text on the
//! wire. The canonical text is
//!
//! ```text
//! {hrp} "1" hex(bytes) hex(sha256(hrp || "1" || bytes)[..4])
//! ```
//!
//! with a distinct human-readable prefix (hrp) for accounts and for
//! operators, so an operator address can never be decoded where an
//! account address is expected. Equality and hashing work on the raw bytes.
//! Ordering is by length, then by bytes, which is the order of the
//! length-prefixed storage keys.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};

use crate::error::AddressError;

/// Maximum raw address length in bytes.
pub const MAX_ADDRESS_LEN: usize = 255;

/// Number of checksum bytes appended to the canonical text.
pub const CHECKSUM_LEN: usize = 4;

/// Human-readable prefix for account (delegator) addresses.
pub const ACCOUNT_HRP: &str = "stake";

/// Human-readable prefix for operator addresses.
pub const OPERATOR_HRP: &str = "stakeoper";

fn verify_format(bytes: &[u8]) -> Result<(), AddressError> {
    if bytes.is_empty() {
        return Err(AddressError::Empty);
    }
    if bytes.len() > MAX_ADDRESS_LEN {
        return Err(AddressError::TooLong {
            len: bytes.len(),
            max: MAX_ADDRESS_LEN,
        });
    }
    Ok(())
}

fn checksum(hrp: &str, bytes: &[u8]) -> [u8; CHECKSUM_LEN] {
    let mut hasher = Sha256::new();
    hasher.update(hrp.as_bytes());
    hasher.update(b"1");
    hasher.update(bytes);
    let hash = hasher.finalize();
    let mut out = [0u8; CHECKSUM_LEN];
    out.copy_from_slice(&hash[..CHECKSUM_LEN]);
    out
}

fn encode_text(hrp: &str, bytes: &[u8]) -> Result<String, AddressError> {
    verify_format(bytes)?;
    let mut text = String::with_capacity(hrp.len() + 1 + 2 * (bytes.len() + CHECKSUM_LEN));
    text.push_str(hrp);
    text.push('1');
    text.push_str(&hex::encode(bytes));
    text.push_str(&hex::encode(checksum(hrp, bytes)));
    Ok(text)
}

fn decode_text(hrp: &str, text: &str) -> Result<Vec<u8>, AddressError> {
    let body = text
        .strip_prefix(hrp)
        .and_then(|rest| rest.strip_prefix('1'))
        .ok_or_else(|| AddressError::WrongPrefix {
            expected: hrp.to_string(),
        })?;

    // Only the lowercase form is canonical.
    if body.bytes().any(|b| b.is_ascii_uppercase()) {
        return Err(AddressError::InvalidHex);
    }
    let raw = hex::decode(body).map_err(|_| AddressError::InvalidHex)?;

    let split = raw
        .len()
        .checked_sub(CHECKSUM_LEN)
        .ok_or(AddressError::ChecksumMismatch)?;
    let (bytes, sum) = raw.split_at(split);
    verify_format(bytes)?;

    if sum != checksum(hrp, bytes) {
        return Err(AddressError::ChecksumMismatch);
    }
    Ok(bytes.to_vec())
}

macro_rules! define_address {
    ($(#[$meta:meta])* $name:ident, $hrp:expr) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, Hash)]
        pub struct $name(Vec<u8>);

        impl Ord for $name {
            fn cmp(&self, other: &Self) -> Ordering {
                self.0
                    .len()
                    .cmp(&other.0.len())
                    .then_with(|| self.0.cmp(&other.0))
            }
        }

        impl PartialOrd for $name {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                Some(self.cmp(other))
            }
        }

        impl $name {
            /// Human-readable prefix of the canonical text.
            pub const HRP: &'static str = $hrp;

            /// Wrap raw address bytes. No validation happens here; it is
            /// deferred to [`Self::to_canonical_text`].
            pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
                Self(bytes.into())
            }

            /// Raw address bytes.
            pub fn as_bytes(&self) -> &[u8] {
                &self.0
            }

            /// Check that the raw bytes have a renderable length.
            pub fn verify(&self) -> Result<(), AddressError> {
                verify_format(&self.0)
            }

            /// Render the canonical checksummed text form.
            pub fn to_canonical_text(&self) -> Result<String, AddressError> {
                encode_text(Self::HRP, &self.0)
            }

            /// Parse the canonical text form.
            pub fn from_canonical_text(text: &str) -> Result<Self, AddressError> {
                decode_text(Self::HRP, text).map(Self)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self.to_canonical_text() {
                    Ok(text) => f.write_str(&text),
                    Err(_) => write!(f, "<invalid:{}>", hex::encode(&self.0)),
                }
            }
        }

        impl FromStr for $name {
            type Err = AddressError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_canonical_text(s)
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                let text = self
                    .to_canonical_text()
                    .map_err(serde::ser::Error::custom)?;
                serializer.serialize_str(&text)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let text = String::deserialize(deserializer)?;
                Self::from_canonical_text(&text).map_err(de::Error::custom)
            }
        }
    };
}

define_address!(
    /// Address of an account that delegates stake.
    AccAddress,
    ACCOUNT_HRP
);

define_address!(
    /// Address of a stake-pool operator that receives delegations.
    OperAddress,
    OPERATOR_HRP
);

//! Signed arbitrary-precision integer.

use std::fmt;
use std::str::FromStr;

use num_bigint::BigInt;
use num_traits::{Signed, ToPrimitive, Zero};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use super::split_sign;
use crate::error::MathError;

/// Maximum magnitude of an [`Int`] in bits.
pub const MAX_INT_BIT_LEN: u64 = 256;

/// Signed integer with a magnitude of at most 256 bits.
///
/// Used for token amounts: unbonding balances and coin amounts.
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Int(BigInt);

impl Int {
    /// Zero.
    pub fn zero() -> Self {
        Int(BigInt::zero())
    }

    /// Wrap a big integer, rejecting values wider than 256 bits.
    pub fn new(value: BigInt) -> Result<Self, MathError> {
        if value.bits() > MAX_INT_BIT_LEN {
            return Err(MathError::Overflow);
        }
        Ok(Int(value))
    }

    /// Wrap a value already known to fit.
    pub(crate) fn from_big(value: BigInt) -> Self {
        Int(value)
    }

    /// Borrow the underlying big integer.
    pub fn as_bigint(&self) -> &BigInt {
        &self.0
    }

    /// True if the value is zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// True if the value is strictly below zero.
    pub fn is_negative(&self) -> bool {
        self.0.is_negative()
    }

    /// True if the value is strictly above zero.
    pub fn is_positive(&self) -> bool {
        self.0.is_positive()
    }

    /// Addition that fails instead of exceeding 256 bits.
    pub fn checked_add(&self, other: &Int) -> Result<Int, MathError> {
        Int::new(&self.0 + &other.0)
    }

    /// Subtraction that fails instead of exceeding 256 bits.
    pub fn checked_sub(&self, other: &Int) -> Result<Int, MathError> {
        Int::new(&self.0 - &other.0)
    }

    /// Convert to `u64` if the value fits.
    pub fn to_u64(&self) -> Option<u64> {
        self.0.to_u64()
    }
}

impl From<u64> for Int {
    fn from(value: u64) -> Self {
        Int(BigInt::from(value))
    }
}

impl From<i64> for Int {
    fn from(value: i64) -> Self {
        Int(BigInt::from(value))
    }
}

impl From<u32> for Int {
    fn from(value: u32) -> Self {
        Int(BigInt::from(value))
    }
}

impl FromStr for Int {
    type Err = MathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (negative, digits) = split_sign(s, s)?;
        let magnitude = BigInt::parse_bytes(digits.as_bytes(), 10)
            .ok_or_else(|| MathError::InvalidNumber(s.to_string()))?;
        Int::new(if negative { -magnitude } else { magnitude })
    }
}

impl fmt::Display for Int {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for Int {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Int({})", self.0)
    }
}

impl Serialize for Int {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for Int {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let binary = !deserializer.is_human_readable();
        let text = String::deserialize(deserializer)?;
        let value: Int = text.parse().map_err(de::Error::custom)?;
        // Stored bytes must re-encode identically.
        if binary && value.to_string() != text {
            return Err(de::Error::custom(MathError::NonCanonical(text)));
        }
        Ok(value)
    }
}

//! Fixed-point decimal with 18 fractional digits.

use std::fmt;
use std::str::FromStr;

use num_bigint::BigInt;
use num_traits::{Signed, Zero};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use super::{split_sign, Int};
use crate::error::MathError;

/// Number of fractional decimal digits carried by a [`Dec`].
pub const DEC_PRECISION: usize = 18;

/// Maximum width of the scaled integer backing a [`Dec`] in bits
/// (256 integer bits plus 60 bits of fractional precision).
pub const MAX_DEC_BIT_LEN: u64 = 256 + 60;

const PRECISION_MULTIPLIER: u64 = 1_000_000_000_000_000_000;

fn multiplier() -> BigInt {
    BigInt::from(PRECISION_MULTIPLIER)
}

/// Signed decimal stored as an integer scaled by 10^18.
///
/// Shares are expressed as `Dec`. The textual form always carries all 18
/// fractional digits, e.g. `1.500000000000000000`.
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Dec(BigInt);

impl Dec {
    /// Zero.
    pub fn zero() -> Self {
        Dec(BigInt::zero())
    }

    /// One.
    pub fn one() -> Self {
        Dec(multiplier())
    }

    fn from_scaled(scaled: BigInt) -> Result<Self, MathError> {
        if scaled.bits() > MAX_DEC_BIT_LEN {
            return Err(MathError::Overflow);
        }
        Ok(Dec(scaled))
    }

    /// Decimal equal to an integer.
    pub fn from_int(value: &Int) -> Self {
        Dec(value.as_bigint() * multiplier())
    }

    /// `value * 10^-prec`, e.g. `with_prec(15, 1)` is `1.5`.
    pub fn with_prec(value: i64, prec: u32) -> Result<Self, MathError> {
        if prec as usize > DEC_PRECISION {
            return Err(MathError::TooPrecise {
                digits: prec as usize,
                max: DEC_PRECISION,
            });
        }
        let scale = BigInt::from(10u64.pow(DEC_PRECISION as u32 - prec));
        Dec::from_scaled(BigInt::from(value) * scale)
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

    /// Addition that fails instead of exceeding the bit bound.
    pub fn checked_add(&self, other: &Dec) -> Result<Dec, MathError> {
        Dec::from_scaled(&self.0 + &other.0)
    }

    /// Subtraction that fails instead of exceeding the bit bound.
    pub fn checked_sub(&self, other: &Dec) -> Result<Dec, MathError> {
        Dec::from_scaled(&self.0 - &other.0)
    }

    /// Multiplication truncating toward zero beyond 18 fractional digits.
    pub fn mul_truncate(&self, other: &Dec) -> Result<Dec, MathError> {
        Dec::from_scaled((&self.0 * &other.0) / multiplier())
    }

    /// Integer part, truncated toward zero.
    pub fn truncate_int(&self) -> Int {
        Int::from_big(&self.0 / multiplier())
    }
}

impl From<u64> for Dec {
    fn from(value: u64) -> Self {
        Dec(BigInt::from(value) * multiplier())
    }
}

impl FromStr for Dec {
    type Err = MathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (int_part, frac_part) = match s.split_once('.') {
            Some((i, f)) => (i, Some(f)),
            None => (s, None),
        };
        let (negative, int_digits) = split_sign(int_part, s)?;

        let mut digits = String::with_capacity(int_digits.len() + DEC_PRECISION);
        digits.push_str(int_digits);
        let frac_len = match frac_part {
            Some(frac) => {
                if frac.is_empty() || !frac.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(MathError::InvalidNumber(s.to_string()));
                }
                if frac.len() > DEC_PRECISION {
                    return Err(MathError::TooPrecise {
                        digits: frac.len(),
                        max: DEC_PRECISION,
                    });
                }
                digits.push_str(frac);
                frac.len()
            }
            None => 0,
        };
        digits.extend(std::iter::repeat('0').take(DEC_PRECISION - frac_len));

        let magnitude = BigInt::parse_bytes(digits.as_bytes(), 10)
            .ok_or_else(|| MathError::InvalidNumber(s.to_string()))?;
        Dec::from_scaled(if negative { -magnitude } else { magnitude })
    }
}

impl fmt::Display for Dec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.0.abs().to_string();
        let padded = if digits.len() <= DEC_PRECISION {
            format!("{:0>width$}", digits, width = DEC_PRECISION + 1)
        } else {
            digits
        };
        let (int_part, frac_part) = padded.split_at(padded.len() - DEC_PRECISION);
        if self.0.is_negative() {
            f.write_str("-")?;
        }
        write!(f, "{}.{}", int_part, frac_part)
    }
}

impl fmt::Debug for Dec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Dec({})", self)
    }
}

impl Serialize for Dec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Dec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let binary = !deserializer.is_human_readable();
        let text = String::deserialize(deserializer)?;
        let value: Dec = text.parse().map_err(de::Error::custom)?;
        // Stored bytes must re-encode identically.
        if binary && value.to_string() != text {
            return Err(de::Error::custom(MathError::NonCanonical(text)));
        }
        Ok(value)
    }
}

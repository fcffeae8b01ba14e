//! Token amounts tagged with a denomination.
//!
//! A denomination is 3 to 128 characters: an ASCII letter followed by
//! letters, digits, or any of `/ : . _ -` (e.g. "stake", "ibc/27A6").

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoinError;
use crate::math::Int;

const MIN_DENOM_LEN: usize = 3;
const MAX_DENOM_LEN: usize = 128;

/// Check a denomination against `[a-zA-Z][a-zA-Z0-9/:._-]{2,127}`.
pub fn validate_denom(denom: &str) -> Result<(), CoinError> {
    let bytes = denom.as_bytes();
    let valid_len = (MIN_DENOM_LEN..=MAX_DENOM_LEN).contains(&bytes.len());
    let valid_head = bytes.first().is_some_and(|b| b.is_ascii_alphabetic());
    let valid_tail = bytes
        .iter()
        .skip(1)
        .all(|&b| b.is_ascii_alphanumeric() || matches!(b, b'/' | b':' | b'.' | b'_' | b'-'));

    if valid_len && valid_head && valid_tail {
        Ok(())
    } else {
        Err(CoinError::InvalidDenom(denom.to_string()))
    }
}

/// A non-negative amount of a single denomination.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coin {
    /// Denomination, e.g. "stake".
    pub denom: String,
    /// Amount in the smallest unit.
    pub amount: Int,
}

impl Coin {
    /// Create a coin, validating the denomination and rejecting negative amounts.
    pub fn new(denom: impl Into<String>, amount: Int) -> Result<Self, CoinError> {
        let coin = Coin {
            denom: denom.into(),
            amount,
        };
        coin.validate()?;
        Ok(coin)
    }

    /// Check the denomination and amount of an existing coin.
    pub fn validate(&self) -> Result<(), CoinError> {
        validate_denom(&self.denom)?;
        if self.amount.is_negative() {
            return Err(CoinError::NegativeAmount);
        }
        Ok(())
    }

    /// True if the amount is zero.
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

//! Arbitrary-precision amounts.
//!
//! - [`Int`]: signed big integer for token amounts, bounded to 256 bits
//! - [`Dec`]: signed fixed-point decimal with 18 fractional digits, used for shares
//!
//! Both serialize as canonical decimal strings so the encoding is identical
//! across architectures and human-readable in query responses.

mod dec;
mod int;

pub use dec::{Dec, DEC_PRECISION, MAX_DEC_BIT_LEN};
pub use int::{Int, MAX_INT_BIT_LEN};

use crate::error::MathError;

/// Split an optional leading minus sign from a numeric string and check
/// that what remains is a non-empty run of ASCII digits.
pub(crate) fn split_sign<'a>(s: &'a str, whole: &str) -> Result<(bool, &'a str), MathError> {
    let (negative, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(MathError::InvalidNumber(whole.to_string()));
    }
    Ok((negative, digits))
}

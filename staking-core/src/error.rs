//! Error types for the staking core crate.
//!
//! Each primitive returns its own error; callers wrap them as needed.

use std::fmt;

/// Errors related to serialization and deserialization.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SerializationError {
    /// Failed to encode data to bytes.
    EncodeFailed(String),
    /// Failed to decode data from bytes.
    DecodeFailed(String),
}

impl fmt::Display for SerializationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SerializationError::EncodeFailed(msg) => write!(f, "encode failed: {}", msg),
            SerializationError::DecodeFailed(msg) => write!(f, "decode failed: {}", msg),
        }
    }
}

impl std::error::Error for SerializationError {}

/// Errors related to address canonical text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AddressError {
    /// Raw address has no bytes.
    Empty,
    /// Raw address is longer than the maximum length.
    TooLong {
        /// Actual length in bytes.
        len: usize,
        /// Maximum allowed length.
        max: usize,
    },
    /// Text does not start with the expected human-readable prefix.
    WrongPrefix {
        /// The prefix the text should have started with.
        expected: String,
    },
    /// Text body is not valid lowercase hex.
    InvalidHex,
    /// Checksum does not match the address bytes.
    ChecksumMismatch,
}

impl fmt::Display for AddressError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressError::Empty => write!(f, "address is empty"),
            AddressError::TooLong { len, max } => {
                write!(f, "address length {} exceeds maximum {}", len, max)
            }
            AddressError::WrongPrefix { expected } => {
                write!(f, "address must start with {}1", expected)
            }
            AddressError::InvalidHex => write!(f, "address body is not valid hex"),
            AddressError::ChecksumMismatch => write!(f, "address checksum mismatch"),
        }
    }
}

impl std::error::Error for AddressError {}

/// Errors related to arbitrary-precision integers and decimals.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MathError {
    /// Value does not fit within the allowed bit length.
    Overflow,
    /// String is not a valid number.
    InvalidNumber(String),
    /// Stored number text differs from its canonical rendering.
    NonCanonical(String),
    /// Decimal has more fractional digits than the fixed precision.
    TooPrecise {
        /// Fractional digits supplied.
        digits: usize,
        /// Fractional digits supported.
        max: usize,
    },
}

impl fmt::Display for MathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MathError::Overflow => write!(f, "arithmetic overflow"),
            MathError::InvalidNumber(s) => write!(f, "invalid number: {:?}", s),
            MathError::NonCanonical(s) => write!(f, "non-canonical number: {:?}", s),
            MathError::TooPrecise { digits, max } => {
                write!(f, "{} fractional digits exceeds precision {}", digits, max)
            }
        }
    }
}

impl std::error::Error for MathError {}

/// Errors related to coins.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CoinError {
    /// Denomination does not match `[a-zA-Z][a-zA-Z0-9/:._-]{2,127}`.
    InvalidDenom(String),
    /// Coin amount is negative.
    NegativeAmount,
}

impl fmt::Display for CoinError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoinError::InvalidDenom(d) => write!(f, "invalid denomination: {:?}", d),
            CoinError::NegativeAmount => write!(f, "coin amount is negative"),
        }
    }
}

impl std::error::Error for CoinError {}

/// Errors related to timestamps.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TimeError {
    /// Nanoseconds component is not below one second.
    InvalidNanos(u32),
    /// Timestamp is outside the representable range.
    OutOfRange,
    /// String is not a valid RFC 3339 timestamp.
    InvalidFormat(String),
}

impl fmt::Display for TimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeError::InvalidNanos(n) => write!(f, "nanos {} must be below 1_000_000_000", n),
            TimeError::OutOfRange => write!(f, "timestamp out of range"),
            TimeError::InvalidFormat(s) => write!(f, "invalid RFC 3339 timestamp: {:?}", s),
        }
    }
}

impl std::error::Error for TimeError {}

//! # Staking Core
//!
//! Primitives shared by every staking ledger crate:
//! - Account and operator addresses with checksummed canonical text
//! - Arbitrary-precision `Int` amounts and 18-digit `Dec` shares
//! - `Coin` amounts with denomination validation
//! - `Timestamp` block times supplied by the caller
//! - Deterministic binary serialization

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod address;
pub mod coin;
pub mod error;
pub mod math;
pub mod serialization;
pub mod time;

// Re-export commonly used types at crate root
pub use address::{AccAddress, OperAddress, ACCOUNT_HRP, MAX_ADDRESS_LEN, OPERATOR_HRP};
pub use coin::{validate_denom, Coin};
pub use error::{AddressError, CoinError, MathError, SerializationError, TimeError};
pub use math::{Dec, Int};
pub use time::Timestamp;

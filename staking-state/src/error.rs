//! Error types for delegation state operations.

use staking_core::{AccAddress, AddressError, CoinError, Dec, Int, MathError, OperAddress};
use thiserror::Error;

/// All failures surfaced by the staking state model.
///
/// Every variant except [`StakingError::CorruptState`] is recoverable and is
/// returned to the immediate caller. `CorruptState` means bytes read back
/// from trusted storage no longer decode; callers must stop processing.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum StakingError {
    // === Construction Errors ===
    /// Address cannot be rendered to canonical text.
    #[error("invalid {role} address: {source}")]
    InvalidAddress {
        role: &'static str,
        #[source]
        source: AddressError,
    },
    /// Delegation shares below zero.
    #[error("shares must not be negative: {shares}")]
    NegativeShares { shares: Dec },
    /// Starting-info stake below zero.
    #[error("stake must not be negative: {stake}")]
    NegativeStake { stake: Dec },
    /// Share movement must be strictly positive.
    #[error("shares must be positive: {shares}")]
    NonPositiveShares { shares: Dec },
    /// Token amount below zero.
    #[error("amount must not be negative: {amount}")]
    NegativeAmount { amount: Int },
    /// Invalid coin in a response balance.
    #[error("invalid balance: {0}")]
    Coin(#[from] CoinError),
    /// Big-number overflow.
    #[error("arithmetic error: {0}")]
    Math(#[from] MathError),

    // === Entry Errors ===
    /// Entry removal past the end of the list.
    #[error("entry index {index} out of range for {len} entries")]
    IndexOutOfRange { index: usize, len: usize },
    /// Attempt to raise an entry balance.
    #[error("entry balance cannot increase from {current} to {requested}")]
    BalanceIncrease { current: Int, requested: Int },
    /// Entry balance above its initial balance.
    #[error("entry balance {balance} exceeds initial balance {initial}")]
    BalanceExceedsInitial { balance: Int, initial: Int },
    /// Unbonding delegation with no entries.
    #[error("unbonding delegation has no entries")]
    EmptyUnbonding,

    // === Lifecycle Errors ===
    /// Removing more shares than the delegation holds.
    #[error("insufficient shares: have {available}, requested {requested}")]
    InsufficientShares { available: Dec, requested: Dec },
    /// No delegation for the pair.
    #[error("no delegation from {delegator} to {operator}")]
    DelegationNotFound {
        delegator: AccAddress,
        operator: OperAddress,
    },
    /// No unbonding delegation for the pair.
    #[error("no unbonding delegation from {delegator} to {operator}")]
    UnbondingNotFound {
        delegator: AccAddress,
        operator: OperAddress,
    },

    // === Codec Errors ===
    /// Record could not be encoded.
    #[error("encode {kind} failed: {reason}")]
    Encode { kind: &'static str, reason: String },
    /// Untrusted bytes did not decode to a valid record.
    #[error("decode {kind} failed: {reason}")]
    Decode { kind: &'static str, reason: String },
    /// Stored bytes did not decode. Fatal.
    #[error("corrupt state: stored {kind} does not decode: {reason}")]
    CorruptState { kind: &'static str, reason: String },

    // === Storage Errors ===
    /// Backend failure from the key-value store.
    #[error("storage error: {0}")]
    Storage(String),
}

impl StakingError {
    /// True for conditions that must halt the calling operation.
    pub fn is_fatal(&self) -> bool {
        matches!(self, StakingError::CorruptState { .. })
    }

    /// Reclassify a decode failure of trusted bytes as corruption.
    pub fn into_corrupt(self) -> Self {
        match self {
            StakingError::Decode { kind, reason } => StakingError::CorruptState { kind, reason },
            other => other,
        }
    }
}

/// Result type for staking state operations.
pub type StakingResult<T> = Result<T, StakingError>;

//! Unbonding delegations.
//!
//! Unbonding converts bonded stake back into liquid tokens after a delay.
//! Each request becomes one [`UnbondingDelegationEntry`]; all entries for a
//! (delegator, operator) pair live in a single [`UnbondingDelegation`] in
//! creation order.
//!
//! Entries are never re-sorted. If the unbonding duration shrinks between
//! requests, a later entry can mature before an earlier one, and callers
//! that release funds must scan every entry rather than stop at the first
//! immature one.

use std::fmt;

use serde::{Deserialize, Serialize};
use staking_core::{AccAddress, Int, OperAddress, Timestamp};

use crate::codec::Record;
use crate::error::{StakingError, StakingResult};

/// One unbonding request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnbondingDelegationEntry {
    creation_height: i64,
    completion_time: Timestamp,
    initial_balance: Int,
    balance: Int,
}

impl UnbondingDelegationEntry {
    /// Create an entry whose initial and current balance are both `balance`.
    pub fn new(creation_height: i64, completion_time: Timestamp, balance: Int) -> StakingResult<Self> {
        if balance.is_negative() {
            return Err(StakingError::NegativeAmount { amount: balance });
        }
        Ok(UnbondingDelegationEntry {
            creation_height,
            completion_time,
            initial_balance: balance.clone(),
            balance,
        })
    }

    /// Block height at which the unbonding was requested.
    pub fn creation_height(&self) -> i64 {
        self.creation_height
    }

    /// Time from which the entry may be released.
    pub fn completion_time(&self) -> Timestamp {
        self.completion_time
    }

    /// Amount requested, fixed at creation.
    pub fn initial_balance(&self) -> &Int {
        &self.initial_balance
    }

    /// Amount still to be released.
    pub fn balance(&self) -> &Int {
        &self.balance
    }

    /// True iff `now` is not before the completion time.
    pub fn is_mature(&self, now: Timestamp) -> bool {
        self.completion_time <= now
    }

    /// Lower the remaining balance, e.g. after a slash. Raising it is refused.
    pub fn set_balance(&mut self, balance: Int) -> StakingResult<()> {
        if balance.is_negative() {
            return Err(StakingError::NegativeAmount { amount: balance });
        }
        if balance > self.balance {
            return Err(StakingError::BalanceIncrease {
                current: self.balance.clone(),
                requested: balance,
            });
        }
        self.balance = balance;
        Ok(())
    }

    fn validate(&self) -> StakingResult<()> {
        if self.initial_balance.is_negative() {
            return Err(StakingError::NegativeAmount {
                amount: self.initial_balance.clone(),
            });
        }
        if self.balance.is_negative() {
            return Err(StakingError::NegativeAmount {
                amount: self.balance.clone(),
            });
        }
        if self.balance > self.initial_balance {
            return Err(StakingError::BalanceExceedsInitial {
                balance: self.balance.clone(),
                initial: self.initial_balance.clone(),
            });
        }
        Ok(())
    }
}

impl fmt::Display for UnbondingDelegationEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "creation_height: {}", self.creation_height)?;
        writeln!(f, "completion_time: {}", self.completion_time)?;
        writeln!(f, "initial_balance: \"{}\"", self.initial_balance)?;
        write!(f, "balance: \"{}\"", self.balance)
    }
}

/// All in-flight unbonding entries from one delegator to one operator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnbondingDelegation {
    delegator_address: AccAddress,
    operator_address: OperAddress,
    entries: Vec<UnbondingDelegationEntry>,
}

impl UnbondingDelegation {
    /// Create a record holding exactly one entry.
    pub fn new(
        delegator: AccAddress,
        operator: OperAddress,
        creation_height: i64,
        completion_time: Timestamp,
        balance: Int,
    ) -> StakingResult<Self> {
        let entry = UnbondingDelegationEntry::new(creation_height, completion_time, balance)?;
        let ubd = UnbondingDelegation {
            delegator_address: delegator,
            operator_address: operator,
            entries: vec![entry],
        };
        ubd.validate()?;
        Ok(ubd)
    }

    /// The unbonding account.
    pub fn delegator_address(&self) -> &AccAddress {
        &self.delegator_address
    }

    /// The operator being unbonded from.
    pub fn operator_address(&self) -> &OperAddress {
        &self.operator_address
    }

    /// Entries, oldest first.
    pub fn entries(&self) -> &[UnbondingDelegationEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True after the last entry has been removed. Such a record must be
    /// deleted from storage, not persisted.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append an entry. Entries stay in creation order.
    pub fn add_entry(
        &mut self,
        creation_height: i64,
        completion_time: Timestamp,
        balance: Int,
    ) -> StakingResult<()> {
        let entry = UnbondingDelegationEntry::new(creation_height, completion_time, balance)?;
        self.entries.push(entry);
        Ok(())
    }

    /// Remove and return the entry at `index`, shifting later entries left.
    pub fn remove_entry(&mut self, index: usize) -> StakingResult<UnbondingDelegationEntry> {
        if index >= self.entries.len() {
            return Err(StakingError::IndexOutOfRange {
                index,
                len: self.entries.len(),
            });
        }
        Ok(self.entries.remove(index))
    }

    /// Mutable access to one entry, for balance reductions.
    pub fn entry_mut(&mut self, index: usize) -> StakingResult<&mut UnbondingDelegationEntry> {
        let len = self.entries.len();
        self.entries
            .get_mut(index)
            .ok_or(StakingError::IndexOutOfRange { index, len })
    }

    /// Positions of the entries mature at `now`, in ascending order.
    pub fn mature_indices(&self, now: Timestamp) -> Vec<usize> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.is_mature(now))
            .map(|(i, _)| i)
            .collect()
    }
}

impl Record for UnbondingDelegation {
    const KIND: &'static str = "unbonding delegation";

    fn validate(&self) -> StakingResult<()> {
        self.delegator_address
            .verify()
            .map_err(|source| StakingError::InvalidAddress {
                role: "delegator",
                source,
            })?;
        self.operator_address
            .verify()
            .map_err(|source| StakingError::InvalidAddress {
                role: "operator",
                source,
            })?;
        if self.entries.is_empty() {
            return Err(StakingError::EmptyUnbonding);
        }
        self.entries.iter().try_for_each(UnbondingDelegationEntry::validate)
    }
}

impl fmt::Display for UnbondingDelegation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Unbonding Delegations between:")?;
        writeln!(f, "  Delegator:                 {}", self.delegator_address)?;
        writeln!(f, "  Operator:                  {}", self.operator_address)?;
        write!(f, "  Entries:")?;
        for (i, entry) in self.entries.iter().enumerate() {
            writeln!(f)?;
            writeln!(f, "    Unbonding Delegation {}:", i)?;
            writeln!(f, "      Creation Height:           {}", entry.creation_height)?;
            writeln!(f, "      Min time to unbond:        {}", entry.completion_time)?;
            write!(f, "      Expected balance:          {}", entry.balance)?;
        }
        Ok(())
    }
}

define_collection!(
    /// Collection of unbonding delegations.
    UnbondingDelegations,
    UnbondingDelegation
);

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    const DAY: Duration = Duration::from_secs(86_400);

    fn t0() -> Timestamp {
        Timestamp::from_unix(1_700_000_000)
    }

    fn days(n: u32) -> Timestamp {
        t0().checked_add(n * DAY).unwrap()
    }

    fn sample() -> UnbondingDelegation {
        UnbondingDelegation::new(
            AccAddress::from_bytes([1u8; 20]),
            OperAddress::from_bytes([2u8; 20]),
            100,
            days(21),
            Int::from(500u64),
        )
        .unwrap()
    }

    #[test]
    fn test_entry_new_sets_both_balances() {
        let entry = UnbondingDelegationEntry::new(7, t0(), Int::from(42u64)).unwrap();
        assert_eq!(entry.initial_balance(), &Int::from(42u64));
        assert_eq!(entry.balance(), &Int::from(42u64));
        assert_eq!(entry.creation_height(), 7);
        assert_eq!(entry.completion_time(), t0());
    }

    #[test]
    fn test_entry_rejects_negative_balance() {
        let result = UnbondingDelegationEntry::new(1, t0(), Int::from(-1i64));
        assert!(matches!(result, Err(StakingError::NegativeAmount { .. })));
    }

    #[test]
    fn test_maturity_boundary() {
        let entry = UnbondingDelegationEntry::new(1, t0(), Int::from(1u64)).unwrap();
        assert!(entry.is_mature(t0()));
        assert!(!entry.is_mature(t0().checked_sub(Duration::from_secs(1)).unwrap()));
        assert!(!entry.is_mature(t0().checked_sub(Duration::from_nanos(1)).unwrap()));
    }

    #[test]
    fn test_maturity_is_monotonic() {
        let entry = UnbondingDelegationEntry::new(1, t0(), Int::from(1u64)).unwrap();
        let mut now = t0().checked_sub(Duration::from_secs(5)).unwrap();
        let mut seen_mature = false;
        for _ in 0..10 {
            let mature = entry.is_mature(now);
            assert!(!seen_mature || mature, "became immature at {}", now);
            seen_mature |= mature;
            now = now.checked_add(Duration::from_secs(1)).unwrap();
        }
        assert!(seen_mature);
    }

    #[test]
    fn test_set_balance_only_decreases() {
        let mut entry = UnbondingDelegationEntry::new(1, t0(), Int::from(500u64)).unwrap();
        entry.set_balance(Int::from(300u64)).unwrap();
        assert_eq!(entry.balance(), &Int::from(300u64));
        assert_eq!(entry.initial_balance(), &Int::from(500u64));

        let err = entry.set_balance(Int::from(400u64)).unwrap_err();
        assert!(matches!(err, StakingError::BalanceIncrease { .. }));
        assert!(entry.set_balance(Int::from(-1i64)).is_err());
        entry.set_balance(Int::zero()).unwrap();
    }

    #[test]
    fn test_add_entry_scenario() {
        let mut ubd = sample();
        ubd.add_entry(105, days(22), Int::from(200u64)).unwrap();

        assert_eq!(ubd.len(), 2);
        let first = &ubd.entries()[0];
        let second = &ubd.entries()[1];
        assert_eq!(first.creation_height(), 100);
        assert_eq!(first.completion_time(), days(21));
        assert_eq!(first.initial_balance(), first.balance());
        assert_eq!(first.balance(), &Int::from(500u64));
        assert_eq!(second.creation_height(), 105);
        assert_eq!(second.completion_time(), days(22));
        assert_eq!(second.initial_balance(), second.balance());
        assert_eq!(second.balance(), &Int::from(200u64));
    }

    #[test]
    fn test_add_entry_keeps_creation_order() {
        // Unbonding time shrank: the newer entry matures first but stays last.
        let mut ubd = sample();
        ubd.add_entry(110, days(14), Int::from(1u64)).unwrap();
        assert_eq!(ubd.entries()[1].creation_height(), 110);
        assert!(ubd.entries()[1].completion_time() < ubd.entries()[0].completion_time());
        assert_eq!(ubd.mature_indices(days(14)), vec![1]);
    }

    #[test]
    fn test_remove_entry_preserves_order() {
        let mut ubd = sample();
        ubd.add_entry(101, days(22), Int::from(1u64)).unwrap();
        ubd.add_entry(102, days(23), Int::from(2u64)).unwrap();

        let removed = ubd.remove_entry(1).unwrap();
        assert_eq!(removed.creation_height(), 101);
        let heights: Vec<i64> = ubd.entries().iter().map(|e| e.creation_height()).collect();
        assert_eq!(heights, vec![100, 102]);
    }

    #[test]
    fn test_remove_entry_out_of_range() {
        let mut ubd = sample();
        let err = ubd.remove_entry(1).unwrap_err();
        assert_eq!(err, StakingError::IndexOutOfRange { index: 1, len: 1 });
        assert_eq!(ubd.len(), 1);

        ubd.remove_entry(0).unwrap();
        assert!(ubd.is_empty());
        assert_eq!(
            ubd.remove_entry(0),
            Err(StakingError::IndexOutOfRange { index: 0, len: 0 })
        );
    }

    #[test]
    fn test_entry_mut_for_slashing() {
        let mut ubd = sample();
        ubd.entry_mut(0).unwrap().set_balance(Int::from(450u64)).unwrap();
        assert_eq!(ubd.entries()[0].balance(), &Int::from(450u64));
        assert!(matches!(ubd.entry_mut(3), Err(StakingError::IndexOutOfRange { .. })));
    }

    #[test]
    fn test_marshal_roundtrip_preserves_entries() {
        let mut ubd = sample();
        ubd.add_entry(105, days(22), Int::from(200u64)).unwrap();
        ubd.add_entry(90, days(3), Int::zero()).unwrap();
        ubd.entry_mut(0).unwrap().set_balance(Int::from(499u64)).unwrap();

        let bytes = ubd.marshal().unwrap();
        let back = UnbondingDelegation::unmarshal(&bytes).unwrap();
        assert_eq!(back, ubd);
        assert_eq!(back.entries()[2].creation_height(), 90);
        assert_eq!(back.entries()[0].initial_balance(), &Int::from(500u64));
    }

    #[test]
    fn test_marshal_rejects_empty_record() {
        let mut ubd = sample();
        ubd.remove_entry(0).unwrap();
        assert_eq!(ubd.marshal(), Err(StakingError::EmptyUnbonding));
    }

    #[test]
    fn test_unmarshal_rejects_balance_above_initial() {
        #[derive(Serialize)]
        struct RawEntry {
            creation_height: i64,
            completion_time: Timestamp,
            initial_balance: Int,
            balance: Int,
        }
        #[derive(Serialize)]
        struct Raw {
            delegator_address: AccAddress,
            operator_address: OperAddress,
            entries: Vec<RawEntry>,
        }
        let bytes = staking_core::serialization::serialize(&Raw {
            delegator_address: AccAddress::from_bytes([1u8; 20]),
            operator_address: OperAddress::from_bytes([2u8; 20]),
            entries: vec![RawEntry {
                creation_height: 1,
                completion_time: t0(),
                initial_balance: Int::from(1u64),
                balance: Int::from(2u64),
            }],
        })
        .unwrap();
        let err = UnbondingDelegation::unmarshal(&bytes).unwrap_err();
        assert!(matches!(err, StakingError::Decode { kind: "unbonding delegation", .. }));
    }

    #[test]
    fn test_display() {
        let mut ubd = sample();
        ubd.add_entry(105, days(22), Int::from(200u64)).unwrap();
        let text = ubd.to_string();
        assert!(text.starts_with("Unbonding Delegations between:"));
        assert!(text.contains("Unbonding Delegation 0:"));
        assert!(text.contains("Unbonding Delegation 1:"));
        assert!(text.contains("Expected balance:          200"));
    }

    #[test]
    fn test_collection_display() {
        let all: UnbondingDelegations = vec![sample(), sample()].into_iter().collect();
        assert_eq!(all.to_string(), format!("{}\n{}", sample(), sample()));
    }
}

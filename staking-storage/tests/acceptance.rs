//! Acceptance tests for staking-storage.
//!
//! These tests drive the ledger operations through the persistent store:
//! 1. Persistence: records survive reopening a state over the same backend
//! 2. Lifecycle: delegate, unbond, release, close
//! 3. Parity: the persistent and in-memory stores agree on every result
//! 4. Corruption: undecodable stored bytes abort with a fatal error

use std::sync::Arc;
use std::time::Duration;

use staking_core::{AccAddress, Dec, Int, OperAddress, Timestamp};
use staking_state::{
    complete_unbonding, delegate, delegation_response, delegator_responses,
    initialize_starting_info, record_unbonding_entry, undelegate, StakingError, StakingReader,
    StakingState, StakingStore,
};
use staking_storage::{KvBackend, MemoryBackend, PersistentState, StateKey};

const DAY: Duration = Duration::from_secs(86_400);

/// Helper to create an account address with a specific seed.
fn delegator(seed: u32) -> AccAddress {
    let mut bytes = [0u8; 20];
    bytes[0..4].copy_from_slice(&seed.to_be_bytes());
    AccAddress::from_bytes(bytes)
}

/// Helper to create an operator address with a specific seed.
fn operator(seed: u32) -> OperAddress {
    let mut bytes = [0xFFu8; 20];
    bytes[0..4].copy_from_slice(&seed.to_be_bytes());
    OperAddress::from_bytes(bytes)
}

fn dec(s: &str) -> Dec {
    s.parse::<Dec>().unwrap()
}

fn genesis() -> Timestamp {
    Timestamp::from_unix(1_700_000_000)
}

fn days(n: u32) -> Timestamp {
    genesis().checked_add(n * DAY).unwrap()
}

/// Run the same scripted history against any store.
fn run_history<S: StakingStore>(store: &mut S) -> Vec<Int> {
    let mut released = Vec::new();
    for d in 0..5 {
        for o in 0..3 {
            delegate(store, &delegator(d), &operator(o), &dec("100")).unwrap();
        }
    }

    // Operators of different lengths under one delegator.
    for raw in [vec![0x01u8, 0x01], vec![0xFFu8]] {
        delegate(store, &delegator(3), &OperAddress::from_bytes(raw), &dec("7")).unwrap();
    }

    undelegate(store, &delegator(1), &operator(0), &dec("40")).unwrap();
    record_unbonding_entry(store, &delegator(1), &operator(0), 100, days(21), Int::from(40u64)).unwrap();
    undelegate(store, &delegator(1), &operator(0), &dec("60")).unwrap();
    record_unbonding_entry(store, &delegator(1), &operator(0), 105, days(14), Int::from(60u64)).unwrap();

    released.push(complete_unbonding(store, &delegator(1), &operator(0), days(14)).unwrap());
    released.push(complete_unbonding(store, &delegator(1), &operator(0), days(21)).unwrap());
    released
}

/// Acceptance Test 1: Persistence
///
/// Records written through one state are visible through a fresh one.
#[test]
fn test_persistence() {
    let backend = Arc::new(MemoryBackend::new());

    {
        let mut state = PersistentState::new(Arc::clone(&backend));
        for d in 0..50 {
            delegate(&mut state, &delegator(d), &operator(d % 4), &dec("12.5")).unwrap();
        }
        record_unbonding_entry(&mut state, &delegator(7), &operator(3), 10, days(21), Int::from(9u64))
            .unwrap();
        initialize_starting_info(&mut state, &delegator(7), &operator(3), 2, dec("12.5"), 10).unwrap();
    }

    // Reopen over the same backend
    let state = PersistentState::new(backend);
    for d in 0..50 {
        let found = state.get_delegation(&delegator(d), &operator(d % 4)).unwrap().unwrap();
        assert_eq!(found.shares(), &dec("12.5"));
    }
    let ubd = state.get_unbonding_delegation(&delegator(7), &operator(3)).unwrap().unwrap();
    assert_eq!(ubd.entries()[0].balance(), &Int::from(9u64));
    assert_eq!(
        state.get_starting_info(&operator(3), &delegator(7)).unwrap().unwrap().height,
        10
    );
}

/// Acceptance Test 2: Lifecycle
///
/// Unbonding entries created out of completion order are released by
/// maturity, and the record is deleted once the last entry is released.
#[test]
fn test_lifecycle() {
    let mut state = PersistentState::new(Arc::new(MemoryBackend::new()));
    let released = run_history(&mut state);

    // The newer, shorter entry matured first.
    assert_eq!(released, vec![Int::from(60u64), Int::from(40u64)]);
    assert_eq!(state.get_delegation(&delegator(1), &operator(0)).unwrap(), None);
    assert_eq!(state.get_unbonding_delegation(&delegator(1), &operator(0)).unwrap(), None);

    let key = StateKey::UnbondingDelegation(delegator(1), operator(0)).to_bytes().unwrap();
    assert!(!state.backend().exists(&key).unwrap());

    let operators: Vec<OperAddress> = state
        .delegator_delegations(&delegator(1))
        .unwrap()
        .iter()
        .map(|d| d.operator_address().clone())
        .collect();
    assert_eq!(operators, vec![operator(1), operator(2)]);
}

/// Acceptance Test 3: Parity
///
/// The persistent store matches the in-memory reference store.
#[test]
fn test_parity_with_memory_state() {
    let mut persistent = PersistentState::new(Arc::new(MemoryBackend::new()));
    let mut memory = StakingState::new();

    assert_eq!(run_history(&mut persistent), run_history(&mut memory));

    for d in 0..5 {
        assert_eq!(
            persistent.delegator_delegations(&delegator(d)).unwrap(),
            memory.delegator_delegations(&delegator(d)).unwrap()
        );
        let rate = |_: &OperAddress| Ok::<Dec, StakingError>(dec("1.25"));
        assert_eq!(
            delegator_responses(&persistent, &delegator(d), rate, "stake").unwrap(),
            delegator_responses(&memory, &delegator(d), rate, "stake").unwrap()
        );
    }

    let operators: Vec<OperAddress> = persistent
        .delegator_delegations(&delegator(3))
        .unwrap()
        .iter()
        .map(|d| d.operator_address().clone())
        .collect();
    assert_eq!(
        operators,
        vec![
            OperAddress::from_bytes([0xFFu8]),
            OperAddress::from_bytes([0x01u8, 0x01]),
            operator(0),
            operator(1),
            operator(2),
        ]
    );

    let response = delegation_response(&persistent, &delegator(2), &operator(1), &dec("1.25"), "stake")
        .unwrap();
    assert_eq!(response.balance().amount, Int::from(125u64));
}

/// Acceptance Test 4: Corruption
///
/// Truncated bytes under a live key abort every operation that reads them.
#[test]
fn test_corruption_is_fatal() {
    let mut state = PersistentState::new(Arc::new(MemoryBackend::new()));
    delegate(&mut state, &delegator(1), &operator(1), &dec("5")).unwrap();
    delegate(&mut state, &delegator(1), &operator(2), &dec("5")).unwrap();

    let key = StateKey::Delegation(delegator(1), operator(2)).to_bytes().unwrap();
    let mut bytes = state.backend().get(&key).unwrap().unwrap();
    bytes.truncate(bytes.len() / 2);
    state.backend().put(&key, &bytes).unwrap();

    let err = delegate(&mut state, &delegator(1), &operator(2), &dec("1")).unwrap_err();
    assert!(err.is_fatal());
    assert!(matches!(err, StakingError::CorruptState { kind: "delegation", .. }));

    // Listings that touch the bad record fail too.
    assert!(state.delegator_delegations(&delegator(1)).unwrap_err().is_fatal());

    // Untouched records stay readable.
    assert!(state.get_delegation(&delegator(1), &operator(1)).unwrap().is_some());
}

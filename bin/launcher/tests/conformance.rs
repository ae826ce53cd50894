//! Conformance harness for the token state machine.
//!
//! Drives operation sequences through `TokenState` and checks, after every
//! step, the guarantees the deployed contract must uphold:
//! - the total supply always equals the sum of all balances
//! - the owner is never simultaneously blacklisted
//! - a failed operation changes nothing and emits nothing
//! - renouncement closes the owner gate permanently
//!
//! These tests run offline against the in-memory model; the live-network
//! equivalents live in `deploy.rs` and `manage.rs`.

use alloy_primitives::{Address, U256};
use token::{initial_supply, TokenError, TokenEvent, TokenState};

const OWNER: Address = Address::new([0x11; 20]);
const ALICE: Address = Address::new([0xaa; 20]);
const BOB: Address = Address::new([0xbb; 20]);
const CAROL: Address = Address::new([0xcc; 20]);

/// One operation against the state machine, with an explicit caller.
#[derive(Debug, Clone)]
enum Op {
    Transfer(Address, Address, u64),
    Approve(Address, Address, u64),
    TransferFrom(Address, Address, Address, u64),
    IncreaseAllowance(Address, Address, u64),
    DecreaseAllowance(Address, Address, u64),
    Pause(Address),
    Unpause(Address),
    Blacklist(Address, Address),
    Unblacklist(Address, Address),
    Mint(Address, Address, u64),
    Burn(Address, u64),
    TransferOwnership(Address, Address),
    Renounce(Address),
}

fn apply(state: &mut TokenState, op: &Op) -> Result<Vec<TokenEvent>, TokenError> {
    match *op {
        Op::Transfer(caller, to, amount) => state.transfer(caller, to, U256::from(amount)),
        Op::Approve(caller, spender, amount) => {
            state.approve(caller, spender, U256::from(amount))
        }
        Op::TransferFrom(caller, from, to, amount) => {
            state.transfer_from(caller, from, to, U256::from(amount))
        }
        Op::IncreaseAllowance(caller, spender, amount) => {
            state.increase_allowance(caller, spender, U256::from(amount))
        }
        Op::DecreaseAllowance(caller, spender, amount) => {
            state.decrease_allowance(caller, spender, U256::from(amount))
        }
        Op::Pause(caller) => state.pause(caller),
        Op::Unpause(caller) => state.unpause(caller),
        Op::Blacklist(caller, account) => state.blacklist(caller, account),
        Op::Unblacklist(caller, account) => state.unblacklist(caller, account),
        Op::Mint(caller, to, amount) => state.mint(caller, to, U256::from(amount)),
        Op::Burn(caller, amount) => state.burn(caller, U256::from(amount)),
        Op::TransferOwnership(caller, new_owner) => state.transfer_ownership(caller, new_owner),
        Op::Renounce(caller) => state.renounce_ownership(caller),
    }
}

fn check_invariants(state: &TokenState) {
    assert_eq!(
        state.balances_total(),
        state.total_supply(),
        "sum of balances must equal total supply"
    );
    if state.owner() != Address::ZERO {
        assert!(
            !state.is_blacklisted(state.owner()),
            "owner must never be blacklisted"
        );
    }
}

/// Apply a sequence, checking invariants after every step and verifying
/// that failed steps leave the state byte-identical and emit nothing.
fn run_sequence(state: &mut TokenState, ops: &[Op]) -> Vec<Result<Vec<TokenEvent>, TokenError>> {
    let mut outcomes = Vec::with_capacity(ops.len());

    for op in ops {
        let before = state.clone();
        let outcome = apply(state, op);

        if outcome.is_err() {
            assert_eq!(
                *state, before,
                "failed operation {op:?} must not change state"
            );
        }
        check_invariants(state);
        outcomes.push(outcome);
    }

    outcomes
}

fn deployed() -> TokenState {
    let (state, _) = TokenState::deploy(OWNER, "Test Token", "TTK", 18);
    state
}

#[test]
fn deployment_scenario_with_18_decimals() {
    let (state, events) = TokenState::deploy(OWNER, "Test Token", "TTK", 18);

    let expected = U256::from(10_000_000u64) * U256::from(10u64).pow(U256::from(18u64));
    assert_eq!(state.total_supply(), expected);
    assert_eq!(state.balance_of(OWNER), expected);
    assert!(!state.paused());
    assert_eq!(events.len(), 2);
    check_invariants(&state);
}

#[test]
fn mint_scenario_emits_mint_and_zero_transfer() {
    let mut state = deployed();
    let supply_before = state.total_supply();

    let events = state.mint(OWNER, ALICE, U256::from(500u64)).unwrap();

    assert_eq!(state.total_supply(), supply_before + U256::from(500u64));
    assert_eq!(state.balance_of(ALICE), U256::from(500u64));
    assert_eq!(
        events,
        vec![
            TokenEvent::Mint {
                to: ALICE,
                amount: U256::from(500u64),
            },
            TokenEvent::Transfer {
                from: Address::ZERO,
                to: ALICE,
                value: U256::from(500u64),
            },
        ]
    );
    check_invariants(&state);
}

#[test]
fn burn_beyond_balance_changes_nothing_and_emits_nothing() {
    let mut state = deployed();
    let before = state.clone();
    let too_much = state.total_supply() + U256::from(1u64);

    let outcome = state.burn(OWNER, too_much);

    assert_eq!(outcome, Err(TokenError::InsufficientBalance));
    assert_eq!(state, before);
}

#[test]
fn pause_blocks_transfer_surface_but_not_administration() {
    let mut state = deployed();

    let outcomes = run_sequence(
        &mut state,
        &[
            Op::Transfer(OWNER, ALICE, 1_000),
            Op::Pause(OWNER),
            // Transfer surface fails while paused
            Op::Transfer(ALICE, BOB, 10),
            Op::Approve(ALICE, BOB, 10),
            Op::TransferFrom(BOB, ALICE, CAROL, 10),
            Op::IncreaseAllowance(ALICE, BOB, 10),
            Op::DecreaseAllowance(ALICE, BOB, 10),
            // Administration still works while paused
            Op::Blacklist(OWNER, BOB),
            Op::Unblacklist(OWNER, BOB),
            Op::Mint(OWNER, ALICE, 42),
            Op::Burn(OWNER, 42),
            Op::Unpause(OWNER),
            Op::Transfer(ALICE, BOB, 10),
        ],
    );

    assert!(outcomes[0].is_ok());
    assert!(outcomes[1].is_ok());
    for paused_failure in &outcomes[2..7] {
        assert_eq!(paused_failure.clone().unwrap_err(), TokenError::Paused);
    }
    for admin_success in &outcomes[7..12] {
        assert!(admin_success.is_ok());
    }
    assert!(outcomes[12].is_ok());
}

#[test]
fn blacklist_scenario_blocks_both_directions() {
    let mut state = deployed();

    let outcomes = run_sequence(
        &mut state,
        &[
            Op::Transfer(OWNER, ALICE, 500),
            Op::Blacklist(OWNER, ALICE),
            Op::Transfer(ALICE, BOB, 10),
            Op::Transfer(OWNER, ALICE, 10),
            Op::Approve(OWNER, ALICE, 10),
            Op::TransferFrom(ALICE, OWNER, BOB, 10),
            Op::Unblacklist(OWNER, ALICE),
            Op::Transfer(ALICE, BOB, 10),
        ],
    );

    assert!(outcomes[1].is_ok());
    assert_eq!(outcomes[2].clone().unwrap_err(), TokenError::Blacklisted);
    assert_eq!(outcomes[3].clone().unwrap_err(), TokenError::Blacklisted);
    // approve has no blacklist gate
    assert!(outcomes[4].is_ok());
    // Neither does the spender seat of transferFrom: only from/to are
    // gated, so a blacklisted spender can still move third-party funds
    assert!(outcomes[5].is_ok());
    assert!(outcomes[7].is_ok());
}

#[test]
fn blacklisting_the_owner_always_fails() {
    let mut state = deployed();
    assert_eq!(
        state.blacklist(OWNER, OWNER),
        Err(TokenError::CannotBlacklistOwner)
    );

    // Still true after an ownership handoff
    state.transfer_ownership(OWNER, ALICE).unwrap();
    assert_eq!(
        state.blacklist(ALICE, ALICE),
        Err(TokenError::CannotBlacklistOwner)
    );
    check_invariants(&state);
}

#[test]
fn renouncement_closes_every_owner_gate_permanently() {
    let mut state = deployed();
    state.renounce_ownership(OWNER).unwrap();

    let owner_gated = [
        Op::Pause(OWNER),
        Op::Unpause(OWNER),
        Op::Blacklist(OWNER, ALICE),
        Op::Unblacklist(OWNER, ALICE),
        Op::Mint(OWNER, ALICE, 1),
        Op::Burn(OWNER, 1),
        Op::TransferOwnership(OWNER, ALICE),
        Op::Renounce(OWNER),
    ];

    for caller in [OWNER, ALICE, Address::ZERO] {
        for op in &owner_gated {
            let rebound = rebind_caller(op, caller);
            let before = state.clone();
            assert_eq!(
                apply(&mut state, &rebound),
                Err(TokenError::NotOwner),
                "op {rebound:?} must be unreachable after renouncement"
            );
            assert_eq!(state, before);
        }
    }

    // The transfer surface survives renouncement
    state.transfer(OWNER, ALICE, U256::from(1u64)).unwrap();
    check_invariants(&state);
}

fn rebind_caller(op: &Op, caller: Address) -> Op {
    match *op {
        Op::Pause(_) => Op::Pause(caller),
        Op::Unpause(_) => Op::Unpause(caller),
        Op::Blacklist(_, account) => Op::Blacklist(caller, account),
        Op::Unblacklist(_, account) => Op::Unblacklist(caller, account),
        Op::Mint(_, to, amount) => Op::Mint(caller, to, amount),
        Op::Burn(_, amount) => Op::Burn(caller, amount),
        Op::TransferOwnership(_, new_owner) => Op::TransferOwnership(caller, new_owner),
        Op::Renounce(_) => Op::Renounce(caller),
        ref other => other.clone(),
    }
}

#[test]
fn allowance_lifecycle_preserves_invariants() {
    let mut state = deployed();

    let outcomes = run_sequence(
        &mut state,
        &[
            Op::Approve(OWNER, ALICE, 100),
            Op::TransferFrom(ALICE, OWNER, BOB, 60),
            // Remaining allowance is 40; this must fail
            Op::TransferFrom(ALICE, OWNER, BOB, 41),
            Op::IncreaseAllowance(OWNER, ALICE, 1),
            Op::TransferFrom(ALICE, OWNER, BOB, 41),
            Op::DecreaseAllowance(OWNER, ALICE, 1),
        ],
    );

    assert_eq!(
        outcomes[2].clone().unwrap_err(),
        TokenError::InsufficientAllowance
    );
    assert!(outcomes[4].is_ok());
    assert_eq!(
        outcomes[5].clone().unwrap_err(),
        TokenError::AllowanceUnderflow
    );
    assert_eq!(state.balance_of(BOB), U256::from(101u64));
}

#[test]
fn long_mixed_sequence_holds_invariants_at_every_step() {
    let mut state = deployed();

    // A deterministic interleaving of successes and failures across the
    // whole operation surface.
    let ops = vec![
        Op::Transfer(OWNER, ALICE, 10_000),
        Op::Transfer(OWNER, BOB, 5_000),
        Op::Approve(ALICE, CAROL, 2_000),
        Op::TransferFrom(CAROL, ALICE, BOB, 1_500),
        Op::Mint(OWNER, CAROL, 777),
        Op::Burn(OWNER, 333),
        Op::Transfer(BOB, CAROL, 6_000),
        Op::Transfer(BOB, CAROL, 60_000), // exceeds balance
        Op::Pause(OWNER),
        Op::Transfer(ALICE, BOB, 1), // paused
        Op::Mint(OWNER, ALICE, 1),
        Op::Unpause(OWNER),
        Op::Blacklist(OWNER, BOB),
        Op::Transfer(CAROL, BOB, 1), // recipient blacklisted
        Op::Unblacklist(OWNER, BOB),
        Op::TransferOwnership(OWNER, ALICE),
        Op::Pause(OWNER), // former owner
        Op::Pause(ALICE),
        Op::Unpause(ALICE),
        Op::Renounce(ALICE),
        Op::Mint(ALICE, CAROL, 1), // after renouncement
        Op::Transfer(ALICE, CAROL, 100),
    ];

    let outcomes = run_sequence(&mut state, &ops);

    // Spot-check the interesting failures
    assert_eq!(
        outcomes[7].clone().unwrap_err(),
        TokenError::InsufficientBalance
    );
    assert_eq!(outcomes[9].clone().unwrap_err(), TokenError::Paused);
    assert_eq!(outcomes[13].clone().unwrap_err(), TokenError::Blacklisted);
    assert_eq!(outcomes[16].clone().unwrap_err(), TokenError::NotOwner);
    assert_eq!(outcomes[20].clone().unwrap_err(), TokenError::NotOwner);
    assert!(outcomes[21].is_ok());

    // Supply reflects exactly the confirmed mints and burns
    let expected_supply =
        initial_supply(18) + U256::from(777u64) + U256::from(1u64) - U256::from(333u64);
    assert_eq!(state.total_supply(), expected_supply);
    assert_eq!(state.owner(), Address::ZERO);
}

extern crate std;

use crate::test::{Fixture, REWARD_SUPPLY};
use crate::ContractError;

const DAY: u64 = 86_400;
const DEPOSIT_AT: u64 = 2_000;

/// Pool 0 locks deposits for a day; emission is set at t=1_000, before any
/// deposit. One staker deposits 1_000 at height 100, t=2_000.
fn locked_fixture() -> (Fixture, soroban_sdk::Address) {
    let f = Fixture::new();
    f.client.add_pool(&f.admin, &f.stake_token, &1, &0, &DAY);
    f.client.set_emission_rate(&f.admin, &10);
    f.client.set_start_height(&f.admin, &100);
    f.fund(REWARD_SUPPLY);

    let staker = f.staker(2_000);
    f.at(100);
    f.at_time(DEPOSIT_AT);
    f.client.deposit(&staker, &0, &1_000);

    (f, staker)
}

#[test]
fn test_deposit_sets_unlock_time() {
    let (f, staker) = locked_fixture();
    assert_eq!(f.client.get_position(&0, &staker).unlock_at, DEPOSIT_AT + DAY);
    assert!(!f.client.is_unlocked(&0, &staker));
}

#[test]
fn test_withdraw_before_unlock_fails() {
    let (f, staker) = locked_fixture();

    f.at(110);
    f.at_time(DEPOSIT_AT + 3_600);
    let result = f.client.try_withdraw(&staker, &0, &1_000);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::StillLocked),
        _ => unreachable!("Expected StillLocked error"),
    }
    assert_eq!(f.client.get_staked(&0, &staker), 1_000);
}

#[test]
fn test_withdraw_after_unlock_clears_lock() {
    let (f, staker) = locked_fixture();

    f.at(110);
    f.at_time(DEPOSIT_AT + DAY);
    f.client.withdraw(&staker, &0, &400);

    let position = f.client.get_position(&0, &staker);
    assert_eq!(position.unlock_at, 0);
    assert_eq!(position.staked, 600);

    // The remainder is free as well.
    f.client.withdraw(&staker, &0, &600);
    assert_eq!(f.balance(&f.stake_token, &staker), 2_000);
}

#[test]
fn test_top_up_relocks_whole_position() {
    let (f, staker) = locked_fixture();

    f.at_time(50_000);
    f.client.deposit(&staker, &0, &1_000);
    assert_eq!(f.client.get_position(&0, &staker).unlock_at, 50_000 + DAY);

    f.at_time(DEPOSIT_AT + DAY);
    assert_eq!(
        f.client.try_withdraw(&staker, &0, &100),
        Err(Ok(ContractError::StillLocked))
    );
}

#[test]
fn test_closed_window_lifts_lock() {
    let (f, staker) = locked_fixture();
    f.client.set_close_height(&f.admin, &150);

    f.at(150);
    f.at_time(DEPOSIT_AT + 60);
    assert!(f.client.is_unlocked(&0, &staker));
    f.client.withdraw(&staker, &0, &1_000);
    assert_eq!(f.client.get_staked(&0, &staker), 0);
}

#[test]
fn test_rate_change_after_deposit_lifts_lock() {
    let (f, staker) = locked_fixture();

    f.at(120);
    f.at_time(DEPOSIT_AT + 500);
    f.client.set_emission_rate(&f.admin, &20);

    f.at_time(DEPOSIT_AT + 600);
    assert!(f.client.is_unlocked(&0, &staker));
    f.client.withdraw(&staker, &0, &1_000);

    // Rewards earned while locked stay claimable.
    assert_eq!(f.client.claim(&staker, &0).paid, 200);
}

#[test]
fn test_zero_withdraw_while_locked_keeps_lock() {
    let (f, staker) = locked_fixture();

    f.at(110);
    f.at_time(DEPOSIT_AT + 10);
    f.client.withdraw(&staker, &0, &0);

    let position = f.client.get_position(&0, &staker);
    assert_eq!(position.unlock_at, DEPOSIT_AT + DAY);
    assert_eq!(position.pending_reward, 100);
}

#[test]
fn test_pool_without_lockup_never_locks() {
    let f = Fixture::single_pool(10, 100, REWARD_SUPPLY);
    let staker = f.staker(1_000);

    f.at(100);
    f.client.deposit(&staker, &0, &1_000);
    assert_eq!(f.client.get_position(&0, &staker).unlock_at, 0);
    f.client.withdraw(&staker, &0, &1_000);
}

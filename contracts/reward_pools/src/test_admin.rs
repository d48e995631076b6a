extern crate std;

use common::access::AdminTier;
use soroban_sdk::{testutils::Address as _, Address, Env};

use crate::test::Fixture;
use crate::{ContractError, RewardPoolsContract, RewardPoolsContractClient, MAX_POOLS};

// ── Lifecycle guards ─────────────────────────────────────────────────────────

#[test]
fn test_calls_before_initialize_fail() {
    let env = Env::default();
    env.mock_all_auths();
    let contract = env.register(RewardPoolsContract, ());
    let client = RewardPoolsContractClient::new(&env, &contract);
    let someone = Address::generate(&env);

    assert!(!client.is_initialized());
    assert_eq!(
        client.try_deposit(&someone, &0, &10),
        Err(Ok(ContractError::NotInitialized))
    );
    assert_eq!(
        client.try_set_emission_rate(&someone, &10),
        Err(Ok(ContractError::NotInitialized))
    );
    assert_eq!(client.try_get_admin(), Err(Ok(ContractError::NotInitialized)));
}

#[test]
fn test_admin_is_super_admin_after_init() {
    let f = Fixture::new();
    assert_eq!(f.client.get_admin_tier(&f.admin), Some(AdminTier::SuperAdmin));
    assert_eq!(f.client.list_admins().len(), 1);
}

// ── Reward token ─────────────────────────────────────────────────────────────

#[test]
fn test_reward_token_set_once() {
    let f = Fixture::new();
    let other = Address::generate(&f.env);

    assert_eq!(
        f.client.try_set_reward_token(&f.admin, &other),
        Err(Ok(ContractError::RewardTokenAlreadySet))
    );
    assert_eq!(f.client.get_reward_token(), Some(f.reward_token.clone()));
}

#[test]
fn test_claim_without_reward_token_fails() {
    let env = Env::default();
    env.mock_all_auths();
    let contract = env.register(RewardPoolsContract, ());
    let client = RewardPoolsContractClient::new(&env, &contract);
    let admin = Address::generate(&env);
    client.initialize(&admin);

    assert_eq!(client.try_claim(&admin, &0), Err(Ok(ContractError::RewardTokenNotSet)));
    assert_eq!(client.reward_balance(), 0);
}

// ── Pool registry ────────────────────────────────────────────────────────────

#[test]
fn test_add_pool_records_parameters() {
    let f = Fixture::new();

    let first = f.client.add_pool(&f.admin, &f.stake_token, &3, &5_000, &600);
    let second = f.client.add_pool(&f.admin, &f.reward_token, &2, &0, &0);
    assert_eq!((first, second), (0, 1));

    let pool = f.client.get_pool(&0);
    assert_eq!(pool.stake_token, f.stake_token);
    assert_eq!(pool.weight, 3);
    assert_eq!(pool.stake_cap, 5_000);
    assert_eq!(pool.lockup_duration, 600);
    assert_eq!(pool.total_staked, 0);
    assert_eq!(pool.reward_per_share, 0);

    let state = f.client.get_global_state();
    assert_eq!(state.total_weight, 5);
    assert_eq!(state.pool_count, 2);
}

#[test]
fn test_add_pool_rejects_bad_parameters() {
    let f = Fixture::new();

    assert_eq!(
        f.client.try_add_pool(&f.admin, &f.stake_token, &0, &0, &0),
        Err(Ok(ContractError::InvalidInput))
    );
    assert_eq!(
        f.client.try_add_pool(&f.admin, &f.stake_token, &1, &-5, &0),
        Err(Ok(ContractError::InvalidInput))
    );
}

#[test]
fn test_pool_limit() {
    let f = Fixture::new();
    for _ in 0..MAX_POOLS {
        f.client.add_pool(&f.admin, &f.stake_token, &1, &0, &0);
    }

    assert_eq!(
        f.client.try_add_pool(&f.admin, &f.stake_token, &1, &0, &0),
        Err(Ok(ContractError::PoolLimitReached))
    );
    assert_eq!(f.client.pool_count(), MAX_POOLS);
}

#[test]
fn test_pools_frozen_after_start() {
    let f = Fixture::new();
    f.client.add_pool(&f.admin, &f.stake_token, &1, &0, &0);
    f.client.set_start_height(&f.admin, &100);

    assert_eq!(
        f.client.try_add_pool(&f.admin, &f.stake_token, &1, &0, &0),
        Err(Ok(ContractError::PoolsFrozen))
    );
}

// ── Window ───────────────────────────────────────────────────────────────────

#[test]
fn test_start_height_rules() {
    let f = Fixture::new();

    assert_eq!(
        f.client.try_set_start_height(&f.admin, &100),
        Err(Ok(ContractError::NoPools))
    );

    f.client.add_pool(&f.admin, &f.stake_token, &1, &0, &0);
    assert_eq!(
        f.client.try_set_start_height(&f.admin, &0),
        Err(Ok(ContractError::InvalidWindow))
    );

    f.client.set_start_height(&f.admin, &100);
    assert_eq!(
        f.client.try_set_start_height(&f.admin, &200),
        Err(Ok(ContractError::StartHeightAlreadySet))
    );
    assert_eq!(f.client.get_global_state().start_height, 100);
}

#[test]
fn test_close_height_rules() {
    let f = Fixture::new();
    f.client.add_pool(&f.admin, &f.stake_token, &1, &0, &0);

    assert_eq!(
        f.client.try_set_close_height(&f.admin, &200),
        Err(Ok(ContractError::StartHeightNotSet))
    );

    f.client.set_start_height(&f.admin, &100);
    assert_eq!(
        f.client.try_set_close_height(&f.admin, &100),
        Err(Ok(ContractError::InvalidWindow))
    );

    // Cannot close the window behind the current ledger.
    f.at(180);
    assert_eq!(
        f.client.try_set_close_height(&f.admin, &150),
        Err(Ok(ContractError::InvalidWindow))
    );
    assert_eq!(f.client.get_global_state().close_height, 0);

    f.client.set_close_height(&f.admin, &200);
    assert_eq!(
        f.client.try_set_close_height(&f.admin, &300),
        Err(Ok(ContractError::CloseHeightAlreadySet))
    );
    assert_eq!(f.client.get_global_state().close_height, 200);
}

// ── Emission rate ────────────────────────────────────────────────────────────

#[test]
fn test_emission_rate_must_be_positive() {
    let f = Fixture::new();

    assert_eq!(
        f.client.try_set_emission_rate(&f.admin, &0),
        Err(Ok(ContractError::InvalidInput))
    );
    assert_eq!(
        f.client.try_set_emission_rate(&f.admin, &-10),
        Err(Ok(ContractError::InvalidInput))
    );
}

#[test]
fn test_emission_rate_records_change_time() {
    let f = Fixture::new();
    f.at_time(42_000);

    f.client.set_emission_rate(&f.admin, &25);
    let state = f.client.get_global_state();
    assert_eq!(state.emission_rate, 25);
    assert_eq!(state.last_rate_change, 42_000);
}

// ── Tiered authorization ─────────────────────────────────────────────────────

#[test]
fn test_non_admin_cannot_configure() {
    let f = Fixture::new();
    let intruder = Address::generate(&f.env);

    assert_eq!(
        f.client.try_set_emission_rate(&intruder, &999),
        Err(Ok(ContractError::Unauthorized))
    );
    assert_eq!(
        f.client.try_add_pool(&intruder, &f.stake_token, &1, &0, &0),
        Err(Ok(ContractError::Unauthorized))
    );
    assert_eq!(
        f.client.try_sweep_remainder(&intruder),
        Err(Ok(ContractError::Unauthorized))
    );
}

#[test]
fn test_emissions_tier_limited_to_rate() {
    let f = Fixture::new();
    let operator = Address::generate(&f.env);
    f.client.promote_admin(&f.admin, &operator, &AdminTier::Emissions);

    f.client.set_emission_rate(&operator, &50);
    assert_eq!(f.client.get_global_state().emission_rate, 50);

    assert_eq!(
        f.client.try_add_pool(&operator, &f.stake_token, &1, &0, &0),
        Err(Ok(ContractError::Unauthorized))
    );
}

#[test]
fn test_config_tier_cannot_sweep() {
    let f = Fixture::new();
    let config = Address::generate(&f.env);
    f.client.promote_admin(&f.admin, &config, &AdminTier::Config);

    f.client.add_pool(&config, &f.stake_token, &1, &0, &0);
    f.client.set_start_height(&config, &10);
    f.client.set_close_height(&config, &20);
    f.at(30);

    assert_eq!(
        f.client.try_sweep_remainder(&config),
        Err(Ok(ContractError::Unauthorized))
    );
    assert_eq!(f.client.sweep_remainder(&f.admin), 0);
}

#[test]
fn test_only_super_admin_manages_tiers() {
    let f = Fixture::new();
    let config = Address::generate(&f.env);
    let target = Address::generate(&f.env);
    f.client.promote_admin(&f.admin, &config, &AdminTier::Config);

    assert_eq!(
        f.client.try_promote_admin(&config, &target, &AdminTier::Emissions),
        Err(Ok(ContractError::Unauthorized))
    );
    assert_eq!(
        f.client.try_demote_admin(&config, &f.admin),
        Err(Ok(ContractError::Unauthorized))
    );

    f.client.demote_admin(&f.admin, &config);
    assert_eq!(f.client.get_admin_tier(&config), None);
    assert_eq!(
        f.client.try_set_emission_rate(&config, &5),
        Err(Ok(ContractError::Unauthorized))
    );
}

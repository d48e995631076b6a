#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env};

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the contract is bootstrapped.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub admin: Address,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardTokenSetEvent {
    pub token: Address,
    pub timestamp: u64,
}

/// Fired when a pool is registered.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolAddedEvent {
    pub pool_id: u32,
    pub stake_token: Address,
    pub weight: u32,
    pub stake_cap: i128,
    pub lockup_duration: u64,
    pub total_weight: u32,
}

/// Fired after all pools were settled and the new rate stored.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RateChangedEvent {
    pub old_rate: i128,
    pub new_rate: i128,
    pub height: u32,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HeightSetEvent {
    pub height: u32,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DepositEvent {
    pub account: Address,
    pub pool_id: u32,
    pub amount: i128,
    pub new_total_staked: i128,
    pub unlock_at: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawEvent {
    pub account: Address,
    pub pool_id: u32,
    pub amount: i128,
    pub new_total_staked: i128,
}

/// Fired on every claim that paid something. `requested - paid` stays pending.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClaimEvent {
    pub account: Address,
    pub pool_id: u32,
    pub requested: i128,
    pub paid: i128,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FundedEvent {
    pub funder: Address,
    pub amount: i128,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RemainderSweptEvent {
    pub recipient: Address,
    pub amount: i128,
    pub reserved: i128,
    pub timestamp: u64,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(env: &Env, admin: Address) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            admin,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_reward_token_set(env: &Env, token: Address) {
    env.events().publish(
        (symbol_short!("RWD_TOK"),),
        RewardTokenSetEvent {
            token,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_pool_added(
    env: &Env,
    pool_id: u32,
    stake_token: Address,
    weight: u32,
    stake_cap: i128,
    lockup_duration: u64,
    total_weight: u32,
) {
    env.events().publish(
        (symbol_short!("POOL_ADD"), pool_id),
        PoolAddedEvent {
            pool_id,
            stake_token,
            weight,
            stake_cap,
            lockup_duration,
            total_weight,
        },
    );
}

pub fn publish_rate_changed(env: &Env, old_rate: i128, new_rate: i128) {
    env.events().publish(
        (symbol_short!("RATE_CHG"),),
        RateChangedEvent {
            old_rate,
            new_rate,
            height: env.ledger().sequence(),
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_start_height_set(env: &Env, height: u32) {
    env.events().publish(
        (symbol_short!("START_SET"),),
        HeightSetEvent {
            height,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_close_height_set(env: &Env, height: u32) {
    env.events().publish(
        (symbol_short!("CLOSE_SET"),),
        HeightSetEvent {
            height,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_deposit(
    env: &Env,
    account: Address,
    pool_id: u32,
    amount: i128,
    new_total_staked: i128,
    unlock_at: u64,
) {
    env.events().publish(
        (symbol_short!("DEPOSIT"), account.clone(), pool_id),
        DepositEvent {
            account,
            pool_id,
            amount,
            new_total_staked,
            unlock_at,
        },
    );
}

pub fn publish_withdraw(
    env: &Env,
    account: Address,
    pool_id: u32,
    amount: i128,
    new_total_staked: i128,
) {
    env.events().publish(
        (symbol_short!("WITHDRAW"), account.clone(), pool_id),
        WithdrawEvent {
            account,
            pool_id,
            amount,
            new_total_staked,
        },
    );
}

pub fn publish_claim(env: &Env, account: Address, pool_id: u32, requested: i128, paid: i128) {
    env.events().publish(
        (symbol_short!("CLAIM"), account.clone(), pool_id),
        ClaimEvent {
            account,
            pool_id,
            requested,
            paid,
        },
    );
}

pub fn publish_funded(env: &Env, funder: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("FUNDED"), funder.clone()),
        FundedEvent { funder, amount },
    );
}

pub fn publish_remainder_swept(env: &Env, recipient: Address, amount: i128, reserved: i128) {
    env.events().publish(
        (symbol_short!("SWEPT"), recipient.clone()),
        RemainderSweptEvent {
            recipient,
            amount,
            reserved,
            timestamp: env.ledger().timestamp(),
        },
    );
}

use soroban_sdk::{symbol_short, Address, Env, Symbol};

use crate::pool::Pool;
use crate::position::UserPosition;

// ── Instance keys (global state) ────────────────────────────────────────────

const ADMIN: Symbol = symbol_short!("ADMIN");
const INITIALIZED: Symbol = symbol_short!("INIT");
const REWARD_TOKEN: Symbol = symbol_short!("RWD_TOK");
const EMISSION_RATE: Symbol = symbol_short!("EMIT_RT");
const START_HEIGHT: Symbol = symbol_short!("START_HT");
const CLOSE_HEIGHT: Symbol = symbol_short!("CLOSE_HT");
const TOTAL_WEIGHT: Symbol = symbol_short!("TOT_WGT");
const LAST_RATE_CHANGE: Symbol = symbol_short!("RATE_TS");
const POOL_COUNT: Symbol = symbol_short!("POOL_CNT");

// Persistent keys are tuples: (prefix, pool_id) and (prefix, pool_id, account).
const POOL: Symbol = symbol_short!("POOL");
const POSITION: Symbol = symbol_short!("POS");

const DAY_IN_LEDGERS: u32 = 17_280;
const INSTANCE_TTL_THRESHOLD: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_TTL_EXTEND_TO: u32 = 30 * DAY_IN_LEDGERS;
const PERSISTENT_TTL_THRESHOLD: u32 = 30 * DAY_IN_LEDGERS;
const PERSISTENT_TTL_EXTEND_TO: u32 = 90 * DAY_IN_LEDGERS;

pub fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_EXTEND_TO);
}

// ── Lifecycle ───────────────────────────────────────────────────────────────

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&INITIALIZED)
}

pub fn set_initialized(env: &Env, admin: &Address) {
    env.storage().instance().set(&INITIALIZED, &true);
    env.storage().instance().set(&ADMIN, admin);
}

pub fn get_admin(env: &Env) -> Option<Address> {
    env.storage().instance().get(&ADMIN)
}

// ── Global parameters ───────────────────────────────────────────────────────

pub fn get_reward_token(env: &Env) -> Option<Address> {
    env.storage().instance().get(&REWARD_TOKEN)
}

pub fn set_reward_token(env: &Env, token: &Address) {
    env.storage().instance().set(&REWARD_TOKEN, token);
}

/// Reward units emitted per block across all pools. Zero until first set.
pub fn get_emission_rate(env: &Env) -> i128 {
    env.storage().instance().get(&EMISSION_RATE).unwrap_or(0)
}

pub fn set_emission_rate(env: &Env, rate: i128) {
    env.storage().instance().set(&EMISSION_RATE, &rate);
}

/// Zero means the start height has not been set.
pub fn get_start_height(env: &Env) -> u32 {
    env.storage().instance().get(&START_HEIGHT).unwrap_or(0)
}

pub fn set_start_height(env: &Env, height: u32) {
    env.storage().instance().set(&START_HEIGHT, &height);
}

/// Zero means the window is open-ended.
pub fn get_close_height(env: &Env) -> u32 {
    env.storage().instance().get(&CLOSE_HEIGHT).unwrap_or(0)
}

pub fn set_close_height(env: &Env, height: u32) {
    env.storage().instance().set(&CLOSE_HEIGHT, &height);
}

pub fn get_total_weight(env: &Env) -> u32 {
    env.storage().instance().get(&TOTAL_WEIGHT).unwrap_or(0)
}

pub fn set_total_weight(env: &Env, weight: u32) {
    env.storage().instance().set(&TOTAL_WEIGHT, &weight);
}

pub fn get_last_rate_change(env: &Env) -> u64 {
    env.storage().instance().get(&LAST_RATE_CHANGE).unwrap_or(0)
}

pub fn set_last_rate_change(env: &Env, timestamp: u64) {
    env.storage().instance().set(&LAST_RATE_CHANGE, &timestamp);
}

pub fn get_pool_count(env: &Env) -> u32 {
    env.storage().instance().get(&POOL_COUNT).unwrap_or(0)
}

pub fn set_pool_count(env: &Env, count: u32) {
    env.storage().instance().set(&POOL_COUNT, &count);
}

// ── Pools ───────────────────────────────────────────────────────────────────

fn pool_key(pool_id: u32) -> (Symbol, u32) {
    (POOL, pool_id)
}

pub fn get_pool(env: &Env, pool_id: u32) -> Option<Pool> {
    env.storage().persistent().get(&pool_key(pool_id))
}

pub fn set_pool(env: &Env, pool_id: u32, pool: &Pool) {
    let key = pool_key(pool_id);
    env.storage().persistent().set(&key, pool);
    env.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_EXTEND_TO);
}

// ── Positions ───────────────────────────────────────────────────────────────

fn position_key(pool_id: u32, account: &Address) -> (Symbol, u32, Address) {
    (POSITION, pool_id, account.clone())
}

pub fn get_position(env: &Env, pool_id: u32, account: &Address) -> Option<UserPosition> {
    env.storage()
        .persistent()
        .get(&position_key(pool_id, account))
}

pub fn has_position(env: &Env, pool_id: u32, account: &Address) -> bool {
    env.storage().persistent().has(&position_key(pool_id, account))
}

pub fn set_position(env: &Env, pool_id: u32, account: &Address, position: &UserPosition) {
    let key = position_key(pool_id, account);
    env.storage().persistent().set(&key, position);
    env.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_EXTEND_TO);
}

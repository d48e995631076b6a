use soroban_sdk::{contracttype, Address, Env};

use crate::{storage, ContractError};

/// Upper bound on the number of pools a deployment may register.
pub const MAX_POOLS: u32 = 10;

/// One weighted staking pool.
///
/// `weight`, `stake_cap`, `lockup_duration` and `stake_token` are fixed at
/// registration. The remaining fields are the pool's accrual state and are
/// only ever moved forward by settlement and by stake changes.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Pool {
    /// Token accepted as stake in this pool.
    pub stake_token: Address,
    /// Relative share of the global emission rate.
    pub weight: u32,
    /// Maximum `total_staked`; zero means unlimited.
    pub stake_cap: i128,
    /// Seconds a deposit stays locked; zero disables the lockup.
    pub lockup_duration: u64,
    /// Effective height the index was last advanced to (0 = never settled).
    pub last_settled_height: u32,
    /// Reward-per-share index, scaled by `rewards::PRECISION`.
    pub reward_per_share: i128,
    pub total_staked: i128,
    /// Rewards credited to the pool over its lifetime.
    pub awarded: i128,
    /// Rewards actually paid out of the pool.
    pub claimed: i128,
}

impl Pool {
    pub fn new(stake_token: Address, weight: u32, stake_cap: i128, lockup_duration: u64) -> Self {
        Self {
            stake_token,
            weight,
            stake_cap,
            lockup_duration,
            last_settled_height: 0,
            reward_per_share: 0,
            total_staked: 0,
            awarded: 0,
            claimed: 0,
        }
    }

    /// Whether `amount` more stake fits under the cap.
    pub fn admits(&self, amount: i128) -> bool {
        self.stake_cap == 0 || self.stake_cap >= self.total_staked.saturating_add(amount)
    }

    /// Awarded but not yet paid; never negative.
    pub fn outstanding(&self) -> i128 {
        self.awarded.saturating_sub(self.claimed)
    }
}

/// Append a pool to the registry and fold its weight into the total.
///
/// Registration closes for good once a start height is set.
pub fn register(
    env: &Env,
    stake_token: Address,
    weight: u32,
    stake_cap: i128,
    lockup_duration: u64,
) -> Result<u32, ContractError> {
    if weight == 0 || stake_cap < 0 {
        return Err(ContractError::InvalidInput);
    }
    if storage::get_start_height(env) != 0 {
        return Err(ContractError::PoolsFrozen);
    }

    let pool_id = storage::get_pool_count(env);
    if pool_id >= MAX_POOLS {
        return Err(ContractError::PoolLimitReached);
    }
    let total_weight = storage::get_total_weight(env)
        .checked_add(weight)
        .ok_or(ContractError::InvalidInput)?;

    storage::set_pool(
        env,
        pool_id,
        &Pool::new(stake_token, weight, stake_cap, lockup_duration),
    );
    storage::set_pool_count(env, pool_id + 1);
    storage::set_total_weight(env, total_weight);

    Ok(pool_id)
}

pub fn load(env: &Env, pool_id: u32) -> Result<Pool, ContractError> {
    storage::get_pool(env, pool_id).ok_or(ContractError::PoolNotFound)
}

pub fn save(env: &Env, pool_id: u32, pool: &Pool) {
    storage::set_pool(env, pool_id, pool);
}

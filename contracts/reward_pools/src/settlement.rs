//! Lazy per-pool reward settlement.
//!
//! Nothing accrues in the background. Every entry point that touches a pool
//! first calls [`settle`], which prices the blocks elapsed since the pool was
//! last touched at the emission rate currently stored, folds the result into
//! the pool's reward-per-share index, and records the new settled height.
//! Because the rate is only ever changed after [`settle_all`], past blocks are
//! always priced at the rate that was in effect while they elapsed.

use soroban_sdk::{log, Address, Env};

use crate::pool::{self, Pool};
use crate::position::{self, UserPosition};
use crate::{rewards, storage, window, ContractError};

/// Global inputs to a settlement, read once per call.
#[derive(Clone, Copy, Debug)]
pub struct Emission {
    pub height: u32,
    pub start_height: u32,
    pub rate: i128,
    pub total_weight: u32,
}

impl Emission {
    pub fn current(env: &Env) -> Self {
        Self {
            height: window::effective_height(env),
            start_height: storage::get_start_height(env),
            rate: storage::get_emission_rate(env),
            total_weight: storage::get_total_weight(env),
        }
    }
}

/// The pool state settlement would produce.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Advance {
    pub settled_height: u32,
    pub reward: i128,
    pub index: i128,
}

/// Compute how far `pool` moves when settled under `emission`.
///
/// `None` when there is nothing to do: the window has not opened or the pool
/// is already settled to the effective height. A pool that has never been
/// settled is measured from the start height. When the pool is empty the
/// height advances but the reward is zero: blocks without stakers are
/// forfeited, not credited to the next depositor.
pub fn advance(pool: &Pool, emission: &Emission) -> Option<Advance> {
    if emission.height == 0 {
        return None;
    }

    let from = if pool.last_settled_height == 0 {
        emission.start_height
    } else {
        pool.last_settled_height
    };
    if emission.height <= from {
        return None;
    }

    if pool.total_staked == 0 {
        return Some(Advance {
            settled_height: emission.height,
            reward: 0,
            index: pool.reward_per_share,
        });
    }

    let reward = rewards::pool_reward(
        emission.height - from,
        emission.rate,
        pool.weight,
        emission.total_weight,
    );

    Some(Advance {
        settled_height: emission.height,
        reward,
        index: rewards::advance_index(pool.reward_per_share, reward, pool.total_staked),
    })
}

/// Settle a loaded pool in place. The caller persists it.
pub fn settle(env: &Env, pool: &mut Pool) {
    let emission = Emission::current(env);
    let Some(step) = advance(pool, &emission) else {
        return;
    };

    if pool.total_staked == 0 {
        log!(
            env,
            "forfeit: empty pool {} -> {}",
            pool.last_settled_height,
            step.settled_height
        );
    }

    pool.awarded = pool.awarded.saturating_add(step.reward);
    pool.reward_per_share = step.index;
    pool.last_settled_height = step.settled_height;
}

/// Load, settle and persist one pool.
pub fn settle_pool(env: &Env, pool_id: u32) -> Result<Pool, ContractError> {
    let mut pool = pool::load(env, pool_id)?;
    settle(env, &mut pool);
    pool::save(env, pool_id, &pool);
    Ok(pool)
}

/// Settle every registered pool.
pub fn settle_all(env: &Env) {
    for pool_id in 0..storage::get_pool_count(env) {
        if let Some(mut pool) = storage::get_pool(env, pool_id) {
            settle(env, &mut pool);
            pool::save(env, pool_id, &pool);
        }
    }
}

/// Settle `pool_id` and bring `account`'s position up to date with it.
///
/// Both records are returned for the caller to mutate and persist.
pub fn sync(
    env: &Env,
    pool_id: u32,
    account: &Address,
) -> Result<(Pool, UserPosition), ContractError> {
    let pool = settle_pool(env, pool_id)?;
    let mut position = position::load(env, pool_id, account);
    position.refresh(pool.reward_per_share);
    Ok((pool, position))
}

/// What `account`'s pending reward would be after a settlement at the
/// current height, without writing anything.
pub fn preview_pending(env: &Env, pool_id: u32, account: &Address) -> Result<i128, ContractError> {
    let pool = pool::load(env, pool_id)?;
    let position = position::load(env, pool_id, account);

    if pool.total_staked == 0 {
        return Ok(position.pending_reward);
    }

    let index = advance(&pool, &Emission::current(env))
        .map(|step| step.index)
        .unwrap_or(pool.reward_per_share);

    Ok(position.pending_reward.saturating_add(rewards::earned_since(
        position.staked,
        index,
        position.reward_debt,
    )))
}

use soroban_sdk::{contracttype, log, token, Address, Env};

use crate::storage;

/// Result of a fail-soft reward transfer.
///
/// `paid` is at most `requested`; the difference stays owed to the account.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Payout {
    pub requested: i128,
    pub paid: i128,
}

impl Payout {
    pub fn shortfall(&self) -> i128 {
        self.requested.saturating_sub(self.paid)
    }
}

/// Engine balance of `token`.
pub fn balance(env: &Env, token: &Address) -> i128 {
    token::Client::new(env, token).balance(&env.current_contract_address())
}

/// Stake principal held in `reward_token`, summed over the pools that stake
/// the reward token itself. Rewards are never paid out of it.
pub fn principal_in(env: &Env, reward_token: &Address) -> i128 {
    let mut principal: i128 = 0;
    for pool_id in 0..storage::get_pool_count(env) {
        if let Some(pool) = storage::get_pool(env, pool_id) {
            if pool.stake_token == *reward_token {
                principal = principal.saturating_add(pool.total_staked);
            }
        }
    }
    principal
}

/// Everything the engine owes out of its reward-token balance: principal
/// staked in the reward token plus rewards awarded but not yet claimed.
pub fn reserved(env: &Env, reward_token: &Address) -> i128 {
    let mut owed: i128 = 0;
    for pool_id in 0..storage::get_pool_count(env) {
        if let Some(pool) = storage::get_pool(env, pool_id) {
            owed = owed.saturating_add(pool.outstanding());
        }
    }
    owed.saturating_add(principal_in(env, reward_token))
}

/// Decide how much of `requested` can be paid out of the engine's balance of
/// `token` without touching the first `reserve` units.
///
/// Never fails for lack of funds: the payout is clamped to what is free.
pub fn quote(env: &Env, token: &Address, requested: i128, reserve: i128) -> Payout {
    if requested <= 0 {
        return Payout::default();
    }

    let available = balance(env, token).saturating_sub(reserve).max(0);
    let paid = requested.min(available);
    if paid < requested {
        log!(env, "payout clamped: requested {} paid {}", requested, paid);
    }

    Payout { requested, paid }
}

/// Move a quoted payout to `to`. No-op for an empty payout.
pub fn transfer(env: &Env, token: &Address, to: &Address, payout: &Payout) {
    if payout.paid <= 0 {
        return;
    }
    token::Client::new(env, token).transfer(&env.current_contract_address(), to, &payout.paid);
}

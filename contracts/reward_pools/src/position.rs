use soroban_sdk::{contracttype, Address, Env};

use crate::{rewards, storage};

/// An account's stake in one pool.
///
/// Created on first deposit and never removed, so pending rewards survive a
/// full withdrawal.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct UserPosition {
    pub staked: i128,
    /// `staked × index / PRECISION` at the last settlement.
    pub reward_debt: i128,
    /// Earned but not yet paid.
    pub pending_reward: i128,
    /// Timestamp the stake unlocks at; zero when unlocked.
    pub unlock_at: u64,
}

impl UserPosition {
    /// Move everything earned since the last snapshot into `pending_reward`
    /// and re-snapshot against `index`.
    ///
    /// `index` must be the freshly settled pool index.
    pub fn refresh(&mut self, index: i128) {
        let earned = rewards::earned_since(self.staked, index, self.reward_debt);
        if earned > 0 {
            self.pending_reward = self.pending_reward.saturating_add(earned);
        }
        self.checkpoint(index);
    }

    /// Reset the reward debt after `staked` changed.
    pub fn checkpoint(&mut self, index: i128) {
        self.reward_debt = rewards::accumulated(self.staked, index);
    }
}

pub fn load(env: &Env, pool_id: u32, account: &Address) -> UserPosition {
    storage::get_position(env, pool_id, account).unwrap_or_default()
}

/// Persist `position`. An all-zero position for an account with no stored
/// entry is not written; entries are created by the first real deposit.
pub fn save(env: &Env, pool_id: u32, account: &Address, position: &UserPosition) {
    if *position == UserPosition::default() && !storage::has_position(env, pool_id, account) {
        return;
    }
    storage::set_position(env, pool_id, account, position);
}

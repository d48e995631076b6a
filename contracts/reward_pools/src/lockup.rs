use soroban_sdk::Env;

use crate::pool::Pool;
use crate::position::UserPosition;
use crate::{storage, window};

/// Start (or restart) the lock on a position after a deposit.
///
/// A top-up relocks the whole position for the pool's full duration. Pools
/// without a lockup leave `unlock_at` untouched.
pub fn lock(env: &Env, pool: &Pool, position: &mut UserPosition) {
    if pool.lockup_duration == 0 {
        return;
    }
    position.unlock_at = env
        .ledger()
        .timestamp()
        .saturating_add(pool.lockup_duration);
}

/// Clear the lock after a successful withdrawal.
pub fn release(position: &mut UserPosition) {
    position.unlock_at = 0;
}

/// Whether `position` may withdraw from `pool` right now.
pub fn is_unlocked(env: &Env, pool: &Pool, position: &UserPosition) -> bool {
    unlocked(
        env.ledger().timestamp(),
        window::is_closed(env),
        storage::get_last_rate_change(env),
        pool.lockup_duration,
        position.unlock_at,
    )
}

/// The lock is lifted when any of these hold:
///
/// 1. `now` has reached `unlock_at`;
/// 2. the reward window has closed;
/// 3. `last_rate_change + lockup_duration` lands after `unlock_at`, i.e. an
///    emission-rate change made after the deposit, extended by the pool's
///    lockup, would have produced a later unlock than the one recorded.
pub fn unlocked(
    now: u64,
    window_closed: bool,
    last_rate_change: u64,
    lockup_duration: u64,
    unlock_at: u64,
) -> bool {
    now >= unlock_at
        || window_closed
        || last_rate_change.saturating_add(lockup_duration) > unlock_at
}

use soroban_sdk::Env;

use crate::storage;

/// Settlement upper bound for a given chain height.
///
/// Zero while the window has not opened (start unset or not yet reached);
/// otherwise `current`, clamped to `close` when a close height is set. A
/// zero `start` or `close` means "unset".
pub fn clamp(current: u32, start: u32, close: u32) -> u32 {
    if start == 0 || current < start {
        return 0;
    }
    if close != 0 && current > close {
        return close;
    }
    current
}

/// The effective settlement height at the current ledger sequence.
pub fn effective_height(env: &Env) -> u32 {
    clamp(
        env.ledger().sequence(),
        storage::get_start_height(env),
        storage::get_close_height(env),
    )
}

/// True once a close height is set and the ledger has reached it.
pub fn is_closed(env: &Env) -> bool {
    let close = storage::get_close_height(env);
    close != 0 && env.ledger().sequence() >= close
}

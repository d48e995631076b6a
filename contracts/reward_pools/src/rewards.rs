/// Fixed-point scale of the reward-per-share index.
///
/// Index values are multiplied by this constant so that per-unit rewards
/// smaller than one token unit survive integer division. The scale never
/// leaves the contract; every externally visible amount is unscaled.
pub const PRECISION: i128 = 1_000_000_000_000;

// ── Emission split ──────────────────────────────────────────────────────────

/// Reward emitted to one pool over `blocks` blocks.
///
/// ```text
/// reward = blocks × emission_rate × weight / total_weight
/// ```
///
/// Division truncates toward zero and happens once, after the full product,
/// so a pool that holds all the weight receives exactly
/// `blocks × emission_rate`.
#[allow(clippy::arithmetic_side_effects)]
pub fn pool_reward(blocks: u32, emission_rate: i128, weight: u32, total_weight: u32) -> i128 {
    if total_weight == 0 || blocks == 0 {
        return 0;
    }

    (blocks as i128)
        .saturating_mul(emission_rate)
        .saturating_mul(weight as i128)
        / total_weight as i128
}

// ── Index ───────────────────────────────────────────────────────────────────

/// Fold `reward` into the reward-per-share index.
///
/// ```text
/// new_index = index + reward × PRECISION / total_staked
/// ```
///
/// Returns `index` unchanged when nothing is staked; the caller decides what
/// happens to the reward in that case (it is forfeited).
#[allow(clippy::arithmetic_side_effects)]
pub fn advance_index(index: i128, reward: i128, total_staked: i128) -> i128 {
    if total_staked <= 0 {
        return index;
    }

    let delta = reward.saturating_mul(PRECISION) / total_staked;
    index.saturating_add(delta)
}

/// `staked × index / PRECISION`: the reward a stake would have collected had
/// it been present since the index was zero. Stored as the position's reward
/// debt after every settlement.
#[allow(clippy::arithmetic_side_effects)]
pub fn accumulated(staked: i128, index: i128) -> i128 {
    staked.saturating_mul(index) / PRECISION
}

/// Reward earned since the last snapshot, never negative.
pub fn earned_since(staked: i128, index: i128, reward_debt: i128) -> i128 {
    accumulated(staked, index).saturating_sub(reward_debt).max(0)
}

// ── Unit tests ──────────────────────────────────────────────────────────────

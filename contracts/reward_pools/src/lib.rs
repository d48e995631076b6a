#![no_std]

pub mod events;
pub mod lockup;
pub mod payout;
pub mod pool;
pub mod position;
pub mod rewards;
pub mod settlement;
pub mod storage;
pub mod window;

use common::access::{self, AdminTier};
use soroban_sdk::{contract, contractimpl, contracttype, token, Address, Env, Vec};

pub use payout::Payout;
pub use pool::{Pool, MAX_POOLS};
pub use position::UserPosition;

// ── Contract errors ──────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    InvalidInput = 4,
    RewardTokenAlreadySet = 5,
    RewardTokenNotSet = 6,
    PoolLimitReached = 7,
    PoolsFrozen = 8,
    NoPools = 9,
    StartHeightAlreadySet = 10,
    StartHeightNotSet = 11,
    CloseHeightAlreadySet = 12,
    InvalidWindow = 13,
    WindowNotClosed = 14,
    WindowClosed = 15,
    PoolNotFound = 16,
    StakeCapExceeded = 17,
    InsufficientStake = 18,
    StillLocked = 19,
}

// ── Public-facing types ──────────────────────────────────────────────────────

/// Snapshot of the global emission parameters returned by `get_global_state`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GlobalState {
    pub emission_rate: i128,
    /// Zero while unset.
    pub start_height: u32,
    /// Zero while unset (open-ended window).
    pub close_height: u32,
    pub total_weight: u32,
    pub last_rate_change: u64,
    pub pool_count: u32,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct RewardPoolsContract;

#[contractimpl]
impl RewardPoolsContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the contract and make `admin` its SuperAdmin.
    pub fn initialize(env: Env, admin: Address) -> Result<(), ContractError> {
        admin.require_auth();
        Self::bootstrap(&env, &admin)
    }

    /// Bootstrap a single-pool farm: one pool of weight 1 staking
    /// `stake_token`, paying `reward_token`, with no cap and no lockup.
    ///
    /// Returns the id of the farm's pool (always 0).
    pub fn initialize_farm(
        env: Env,
        admin: Address,
        stake_token: Address,
        reward_token: Address,
    ) -> Result<u32, ContractError> {
        admin.require_auth();
        Self::bootstrap(&env, &admin)?;
        Self::apply_reward_token(&env, reward_token)?;
        Self::apply_pool(&env, stake_token, 1, 0, 0)
    }

    // ── Configuration ───────────────────────────────────────────────────────

    /// Set the token rewards are paid in. Settable once.
    pub fn set_reward_token(env: Env, caller: Address, token: Address) -> Result<(), ContractError> {
        Self::require_tier(&env, &caller, &AdminTier::Config)?;
        Self::apply_reward_token(&env, token)
    }

    /// Register a pool and return its id.
    ///
    /// * `weight`          – share of the emission rate, relative to the sum
    ///                       of all weights; must be positive.
    /// * `stake_cap`       – maximum total stake; 0 for unlimited.
    /// * `lockup_duration` – seconds each deposit stays locked; 0 for none.
    ///
    /// Only possible before the start height is set, and for at most
    /// [`MAX_POOLS`] pools.
    pub fn add_pool(
        env: Env,
        caller: Address,
        stake_token: Address,
        weight: u32,
        stake_cap: i128,
        lockup_duration: u64,
    ) -> Result<u32, ContractError> {
        Self::require_tier(&env, &caller, &AdminTier::Config)?;
        Self::apply_pool(&env, stake_token, weight, stake_cap, lockup_duration)
    }

    /// Change the per-block emission rate.
    ///
    /// Every pool is settled at the old rate first, so blocks that already
    /// elapsed are never repriced.
    pub fn set_emission_rate(env: Env, caller: Address, rate: i128) -> Result<(), ContractError> {
        Self::require_tier(&env, &caller, &AdminTier::Emissions)?;
        if rate <= 0 {
            return Err(ContractError::InvalidInput);
        }

        settlement::settle_all(&env);

        let old_rate = storage::get_emission_rate(&env);
        storage::set_emission_rate(&env, rate);
        storage::set_last_rate_change(&env, env.ledger().timestamp());
        storage::extend_instance_ttl(&env);

        events::publish_rate_changed(&env, old_rate, rate);
        Ok(())
    }

    /// Open the reward window at `height`. Settable once; freezes the pool set.
    pub fn set_start_height(env: Env, caller: Address, height: u32) -> Result<(), ContractError> {
        Self::require_tier(&env, &caller, &AdminTier::Config)?;
        if height == 0 {
            return Err(ContractError::InvalidWindow);
        }
        if storage::get_start_height(&env) != 0 {
            return Err(ContractError::StartHeightAlreadySet);
        }
        if storage::get_pool_count(&env) == 0 {
            return Err(ContractError::NoPools);
        }

        storage::set_start_height(&env, height);
        storage::extend_instance_ttl(&env);

        events::publish_start_height_set(&env, height);
        Ok(())
    }

    /// Close the reward window at `height`. Settable once, after the start
    /// height, strictly above it and not below the current ledger sequence.
    pub fn set_close_height(env: Env, caller: Address, height: u32) -> Result<(), ContractError> {
        Self::require_tier(&env, &caller, &AdminTier::Config)?;
        if storage::get_close_height(&env) != 0 {
            return Err(ContractError::CloseHeightAlreadySet);
        }
        let start = storage::get_start_height(&env);
        if start == 0 {
            return Err(ContractError::StartHeightNotSet);
        }
        if height <= start || height < env.ledger().sequence() {
            return Err(ContractError::InvalidWindow);
        }

        storage::set_close_height(&env, height);
        storage::extend_instance_ttl(&env);

        events::publish_close_height_set(&env, height);
        Ok(())
    }

    /// Move `amount` reward tokens from `funder` into the contract.
    pub fn fund(env: Env, funder: Address, amount: i128) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        funder.require_auth();
        if amount <= 0 {
            return Err(ContractError::InvalidInput);
        }
        let reward_token = Self::reward_token(&env)?;

        token::Client::new(&env, &reward_token).transfer(
            &funder,
            &env.current_contract_address(),
            &amount,
        );

        events::publish_funded(&env, funder, amount);
        Ok(())
    }

    // ── Staking ─────────────────────────────────────────────────────────────

    /// Stake `amount` of the pool's stake token.
    ///
    /// The pool is settled and the account's earnings banked before the stake
    /// changes, so the new tokens only earn from this height on. A zero
    /// amount is allowed and only checkpoints the position.
    pub fn deposit(
        env: Env,
        account: Address,
        pool_id: u32,
        amount: i128,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        account.require_auth();

        if amount < 0 {
            return Err(ContractError::InvalidInput);
        }
        let current = pool::load(&env, pool_id)?;
        if amount > 0 && window::is_closed(&env) {
            return Err(ContractError::WindowClosed);
        }
        if !current.admits(amount) {
            return Err(ContractError::StakeCapExceeded);
        }

        let (mut pool, mut position) = settlement::sync(&env, pool_id, &account)?;

        if amount > 0 {
            token::Client::new(&env, &pool.stake_token).transfer(
                &account,
                &env.current_contract_address(),
                &amount,
            );
            position.staked = position.staked.saturating_add(amount);
            pool.total_staked = pool.total_staked.saturating_add(amount);
            lockup::lock(&env, &pool, &mut position);
        }
        position.checkpoint(pool.reward_per_share);

        pool::save(&env, pool_id, &pool);
        position::save(&env, pool_id, &account, &position);
        storage::extend_instance_ttl(&env);

        events::publish_deposit(
            &env,
            account,
            pool_id,
            amount,
            pool.total_staked,
            position.unlock_at,
        );
        Ok(())
    }

    /// Return `amount` of staked tokens to `account`.
    ///
    /// Fails with `StillLocked` while the position's lock holds. Pending
    /// rewards stay in the position; use `claim` to collect them. A zero
    /// amount is allowed and only checkpoints the position.
    pub fn withdraw(
        env: Env,
        account: Address,
        pool_id: u32,
        amount: i128,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        account.require_auth();

        if amount < 0 {
            return Err(ContractError::InvalidInput);
        }
        let current = pool::load(&env, pool_id)?;
        let existing = position::load(&env, pool_id, &account);
        if existing.staked < amount {
            return Err(ContractError::InsufficientStake);
        }
        if amount > 0 && !lockup::is_unlocked(&env, &current, &existing) {
            return Err(ContractError::StillLocked);
        }

        let (mut pool, mut position) = settlement::sync(&env, pool_id, &account)?;

        if amount > 0 {
            position.staked = position.staked.saturating_sub(amount);
            pool.total_staked = pool.total_staked.saturating_sub(amount);
            lockup::release(&mut position);
        }
        position.checkpoint(pool.reward_per_share);

        pool::save(&env, pool_id, &pool);
        position::save(&env, pool_id, &account, &position);
        storage::extend_instance_ttl(&env);

        if amount > 0 {
            token::Client::new(&env, &pool.stake_token).transfer(
                &env.current_contract_address(),
                &account,
                &amount,
            );
        }

        events::publish_withdraw(&env, account, pool_id, amount, pool.total_staked);
        Ok(())
    }

    // ── Rewards ─────────────────────────────────────────────────────────────

    /// Pay out `account`'s pending reward in `pool_id`.
    ///
    /// Pays as much as the contract's free reward balance allows and never
    /// fails for lack of funds; the unpaid part stays pending for a later
    /// claim.
    pub fn claim(env: Env, account: Address, pool_id: u32) -> Result<Payout, ContractError> {
        Self::require_initialized(&env)?;
        account.require_auth();
        let reward_token = Self::reward_token(&env)?;

        let (mut pool, mut position) = settlement::sync(&env, pool_id, &account)?;

        let reserve = payout::principal_in(&env, &reward_token);
        let payout = payout::quote(&env, &reward_token, position.pending_reward, reserve);

        position.pending_reward = position.pending_reward.saturating_sub(payout.paid);
        pool.claimed = pool.claimed.saturating_add(payout.paid);

        pool::save(&env, pool_id, &pool);
        position::save(&env, pool_id, &account, &position);
        storage::extend_instance_ttl(&env);

        if payout.paid > 0 {
            payout::transfer(&env, &reward_token, &account, &payout);
            events::publish_claim(&env, account, pool_id, payout.requested, payout.paid);
        }

        Ok(payout)
    }

    /// Settle one pool to the current effective height. Permissionless.
    pub fn settle(env: Env, pool_id: u32) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        settlement::settle_pool(&env, pool_id)?;
        Ok(())
    }

    /// Settle every pool to the current effective height. Permissionless.
    pub fn settle_all(env: Env) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        settlement::settle_all(&env);
        Ok(())
    }

    /// Send the reward balance nobody can ever claim to `caller`.
    ///
    /// Only after the close height. All pools are settled first so that
    /// rewards earned up to the close are reserved before the surplus is
    /// measured. Returns the amount swept.
    pub fn sweep_remainder(env: Env, caller: Address) -> Result<i128, ContractError> {
        Self::require_tier(&env, &caller, &AdminTier::SuperAdmin)?;
        if !window::is_closed(&env) {
            return Err(ContractError::WindowNotClosed);
        }
        let reward_token = Self::reward_token(&env)?;

        settlement::settle_all(&env);

        let reserved = payout::reserved(&env, &reward_token);
        let available = payout::balance(&env, &reward_token).saturating_sub(reserved);
        if available <= 0 {
            return Ok(0);
        }

        token::Client::new(&env, &reward_token).transfer(
            &env.current_contract_address(),
            &caller,
            &available,
        );

        events::publish_remainder_swept(&env, caller, available, reserved);
        Ok(available)
    }

    // ── View functions ───────────────────────────────────────────────────────

    /// The account's position in a pool; all zeros if it never deposited.
    pub fn get_position(env: Env, pool_id: u32, account: Address) -> UserPosition {
        position::load(&env, pool_id, &account)
    }

    pub fn get_staked(env: Env, pool_id: u32, account: Address) -> i128 {
        position::load(&env, pool_id, &account).staked
    }

    /// Real-time pending reward, as a settlement at the current height would
    /// compute it, without mutating state.
    pub fn pending_reward(env: Env, pool_id: u32, account: Address) -> Result<i128, ContractError> {
        settlement::preview_pending(&env, pool_id, &account)
    }

    pub fn get_pool(env: Env, pool_id: u32) -> Result<Pool, ContractError> {
        pool::load(&env, pool_id)
    }

    pub fn pool_count(env: Env) -> u32 {
        storage::get_pool_count(&env)
    }

    pub fn get_global_state(env: Env) -> GlobalState {
        GlobalState {
            emission_rate: storage::get_emission_rate(&env),
            start_height: storage::get_start_height(&env),
            close_height: storage::get_close_height(&env),
            total_weight: storage::get_total_weight(&env),
            last_rate_change: storage::get_last_rate_change(&env),
            pool_count: storage::get_pool_count(&env),
        }
    }

    /// The clamped height settlement runs up to right now.
    pub fn effective_height(env: Env) -> u32 {
        window::effective_height(&env)
    }

    /// Reward-token balance held by the contract; 0 before the token is set.
    pub fn reward_balance(env: Env) -> i128 {
        storage::get_reward_token(&env)
            .map(|token| payout::balance(&env, &token))
            .unwrap_or(0)
    }

    pub fn get_reward_token(env: Env) -> Option<Address> {
        storage::get_reward_token(&env)
    }

    /// Whether the account could withdraw a positive amount right now.
    pub fn is_unlocked(env: Env, pool_id: u32, account: Address) -> Result<bool, ContractError> {
        let pool = pool::load(&env, pool_id)?;
        let position = position::load(&env, pool_id, &account);
        Ok(lockup::is_unlocked(&env, &pool, &position))
    }

    pub fn is_initialized(env: Env) -> bool {
        storage::is_initialized(&env)
    }

    pub fn get_admin(env: Env) -> Result<Address, ContractError> {
        storage::get_admin(&env).ok_or(ContractError::NotInitialized)
    }

    // ── Admin tier management ────────────────────────────────────────────────

    /// Assign `tier` to `target`. SuperAdmin only.
    pub fn promote_admin(
        env: Env,
        caller: Address,
        target: Address,
        tier: AdminTier,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        if !access::promote(&env, &caller, &target, tier) {
            return Err(ContractError::Unauthorized);
        }
        Ok(())
    }

    /// Remove every tier from `target`. SuperAdmin only.
    pub fn demote_admin(env: Env, caller: Address, target: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        if !access::demote(&env, &caller, &target) {
            return Err(ContractError::Unauthorized);
        }
        Ok(())
    }

    pub fn get_admin_tier(env: Env, admin: Address) -> Option<AdminTier> {
        access::get_admin_tier(&env, &admin)
    }

    pub fn list_admins(env: Env) -> Vec<Address> {
        access::list_admins(&env)
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    fn require_initialized(env: &Env) -> Result<(), ContractError> {
        if !storage::is_initialized(env) {
            return Err(ContractError::NotInitialized);
        }
        Ok(())
    }

    /// Guard: authenticate `caller` and require at least `min_tier`.
    fn require_tier(env: &Env, caller: &Address, min_tier: &AdminTier) -> Result<(), ContractError> {
        Self::require_initialized(env)?;
        caller.require_auth();
        if !access::is_authorized(env, caller, min_tier) {
            return Err(ContractError::Unauthorized);
        }
        Ok(())
    }

    fn reward_token(env: &Env) -> Result<Address, ContractError> {
        storage::get_reward_token(env).ok_or(ContractError::RewardTokenNotSet)
    }

    fn bootstrap(env: &Env, admin: &Address) -> Result<(), ContractError> {
        if storage::is_initialized(env) {
            return Err(ContractError::AlreadyInitialized);
        }

        storage::set_initialized(env, admin);
        access::bootstrap(env, admin);
        storage::extend_instance_ttl(env);

        events::publish_initialized(env, admin.clone());
        Ok(())
    }

    fn apply_reward_token(env: &Env, token: Address) -> Result<(), ContractError> {
        if storage::get_reward_token(env).is_some() {
            return Err(ContractError::RewardTokenAlreadySet);
        }

        storage::set_reward_token(env, &token);
        storage::extend_instance_ttl(env);

        events::publish_reward_token_set(env, token);
        Ok(())
    }

    fn apply_pool(
        env: &Env,
        stake_token: Address,
        weight: u32,
        stake_cap: i128,
        lockup_duration: u64,
    ) -> Result<u32, ContractError> {
        let pool_id = pool::register(env, stake_token.clone(), weight, stake_cap, lockup_duration)?;
        storage::extend_instance_ttl(env);

        events::publish_pool_added(
            env,
            pool_id,
            stake_token,
            weight,
            stake_cap,
            lockup_duration,
            storage::get_total_weight(env),
        );
        Ok(pool_id)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────


#[cfg(test)]
mod test_admin;


#[cfg(test)]
mod test_lockup;

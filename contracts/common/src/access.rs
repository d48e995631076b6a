use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol, Vec};

// ── Storage keys ─────────────────────────────────────────────────────────────

const ADMIN_TIER_PREFIX: Symbol = symbol_short!("ADM_TIER");
const ADMIN_LIST: Symbol = symbol_short!("ADM_LIST");

const TTL_THRESHOLD: u32 = 518_400;
const TTL_EXTEND_TO: u32 = 1_555_200;

// ── Tiers ────────────────────────────────────────────────────────────────────

/// Administrative capability levels, ordered by rank.
///
/// - `Emissions`  – may change the global emission rate.
/// - `Config`     – may additionally set the reward token, register pools and
///                  set the start/close heights.
/// - `SuperAdmin` – may do everything, including sweeping the undistributed
///                  remainder and promoting/demoting other admins.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum AdminTier {
    Emissions = 1,
    Config = 2,
    SuperAdmin = 3,
}

impl AdminTier {
    pub fn rank(&self) -> u32 {
        match self {
            AdminTier::Emissions => 1,
            AdminTier::Config => 2,
            AdminTier::SuperAdmin => 3,
        }
    }

    /// Returns true if this tier is at least as high as `min_tier`.
    pub fn has_at_least(&self, min_tier: &AdminTier) -> bool {
        self.rank() >= min_tier.rank()
    }
}

// ── Storage helpers ──────────────────────────────────────────────────────────

fn tier_key(admin: &Address) -> (Symbol, Address) {
    (ADMIN_TIER_PREFIX, admin.clone())
}

fn bump(env: &Env, key: &(Symbol, Address)) {
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Assigns `tier` to `admin`. Callers verify authorization beforehand.
pub fn set_admin_tier(env: &Env, admin: &Address, tier: AdminTier) {
    let key = tier_key(admin);
    env.storage().persistent().set(&key, &tier);
    bump(env, &key);
}

pub fn get_admin_tier(env: &Env, admin: &Address) -> Option<AdminTier> {
    let key = tier_key(admin);
    let tier: Option<AdminTier> = env.storage().persistent().get(&key);
    if tier.is_some() {
        bump(env, &key);
    }
    tier
}

pub fn remove_admin_tier(env: &Env, admin: &Address) {
    env.storage().persistent().remove(&tier_key(admin));
}

/// The authorization check consumed by every administrative operation.
///
/// Returns `false` when `caller` holds no tier or a tier below `min_tier`.
pub fn is_authorized(env: &Env, caller: &Address, min_tier: &AdminTier) -> bool {
    get_admin_tier(env, caller).is_some_and(|tier| tier.has_at_least(min_tier))
}

// ── Bootstrap ────────────────────────────────────────────────────────────────

/// Grants the deploying admin `SuperAdmin` and lists it.
pub fn bootstrap(env: &Env, admin: &Address) {
    set_admin_tier(env, admin, AdminTier::SuperAdmin);
    track_admin(env, admin);
}

// ── Promote / demote ─────────────────────────────────────────────────────────

/// Assigns `tier` to `target`. Only a `SuperAdmin` may do this; `caller` must
/// already have passed `require_auth()`.
///
/// Returns `false` without writing anything if `caller` lacks the tier.
pub fn promote(env: &Env, caller: &Address, target: &Address, tier: AdminTier) -> bool {
    if !is_authorized(env, caller, &AdminTier::SuperAdmin) {
        return false;
    }
    set_admin_tier(env, target, tier);
    track_admin(env, target);
    true
}

/// Strips every tier from `target`. Same rules as [`promote`].
pub fn demote(env: &Env, caller: &Address, target: &Address) -> bool {
    if !is_authorized(env, caller, &AdminTier::SuperAdmin) {
        return false;
    }
    remove_admin_tier(env, target);
    untrack_admin(env, target);
    true
}

// ── Admin list ───────────────────────────────────────────────────────────────

pub fn list_admins(env: &Env) -> Vec<Address> {
    env.storage()
        .persistent()
        .get(&ADMIN_LIST)
        .unwrap_or(Vec::new(env))
}

fn track_admin(env: &Env, admin: &Address) {
    let mut admins = list_admins(env);
    if !admins.contains(admin) {
        admins.push_back(admin.clone());
        env.storage().persistent().set(&ADMIN_LIST, &admins);
    }
}

fn untrack_admin(env: &Env, admin: &Address) {
    let mut admins = list_admins(env);
    if let Some(index) = admins.first_index_of(admin) {
        admins.remove(index);
        env.storage().persistent().set(&ADMIN_LIST, &admins);
    }
}

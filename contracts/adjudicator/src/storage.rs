use lease_lib::{Balance, Challenge, ContractError, Lease, LeaseKey};
use soroban_sdk::{contracttype, Address, BytesN, Env, IntoVal, TryFromVal, Val, Vec};

/// TTLs in ledgers (~5 s each). Every touch of an entry pushes its expiry
/// out again, so anything an open lease depends on outlives the lease.
const INSTANCE_TTL_THRESHOLD: u32 = 518_400; // ~30 days
const INSTANCE_TTL_EXTEND: u32 = 1_036_800; // ~60 days
const ENTRY_TTL_THRESHOLD: u32 = 518_400;
const ENTRY_TTL_EXTEND: u32 = 1_036_800;
const LEDGER_SECONDS: u64 = 5;

/// Entry of an account's open-lease index.
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct OpenLease {
    pub key: LeaseKey,
    /// Earliest time the lease can settle: its end, or one second past the
    /// window of an active challenge.
    pub due_at: u64,
}

#[derive(Clone)]
#[contracttype]
pub enum DataKey {
    /// Custodied asset (token contract address)
    Asset,
    /// Share of the bond paid to the lessee on challenge timeout, in bps
    PenaltyToLesseeBps,
    /// Balance partition per account
    Account(Address),
    /// Ed25519 key an account signs lease terms with
    Signer(Address),
    /// Sealed, unsettled lease
    Lease(LeaseKey),
    /// Latest challenge of a lease
    Challenge(LeaseKey),
    /// Lease keys are single-use; set on seal, never cleared
    NonceUsed(LeaseKey),
    /// Unsettled leases an account is party to
    OpenLeases(Address),
}

/* ---------------- TTL ---------------- */

pub fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_EXTEND);
}

fn bump(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, ENTRY_TTL_THRESHOLD, ENTRY_TTL_EXTEND);
}

/// Reads a persistent entry and bumps it if present.
fn load<T: TryFromVal<Env, Val>>(env: &Env, key: &DataKey) -> Option<T> {
    let value = env.storage().persistent().get(key);
    if value.is_some() {
        bump(env, key);
    }
    value
}

fn store<T: IntoVal<Env, Val>>(env: &Env, key: &DataKey, value: &T) {
    env.storage().persistent().set(key, value);
    bump(env, key);
}

/// Keeps the entries `lease` settles through alive until well past its end,
/// however long the lease runs.
pub fn bump_for_lease(env: &Env, lease: &Lease) {
    let remaining = lease.end.saturating_sub(env.ledger().timestamp()) / LEDGER_SECONDS;
    let ttl = u32::try_from(remaining)
        .unwrap_or(u32::MAX)
        .saturating_add(ENTRY_TTL_EXTEND)
        .min(env.storage().max_ttl());

    let terms = &lease.terms;
    let keys = [
        DataKey::Lease(lease.key()),
        DataKey::Challenge(lease.key()),
        DataKey::Account(terms.lessee.clone()),
        DataKey::Account(terms.lessor.clone()),
        DataKey::OpenLeases(terms.lessee.clone()),
        DataKey::OpenLeases(terms.lessor.clone()),
    ];
    for key in keys.iter() {
        if env.storage().persistent().has(key) {
            env.storage().persistent().extend_ttl(key, ttl, ttl);
        }
    }
    env.storage().instance().extend_ttl(ttl, ttl);
}

/* ---------------- CONFIG ---------------- */

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Asset)
}

pub fn set_asset(env: &Env, asset: &Address) {
    env.storage().instance().set(&DataKey::Asset, asset);
    bump_instance(env);
}

/// Also keeps the instance alive; every state-changing entry point goes
/// through here or calls `bump_instance` itself.
pub fn get_asset(env: &Env) -> Result<Address, ContractError> {
    let asset = env
        .storage()
        .instance()
        .get(&DataKey::Asset)
        .ok_or(ContractError::NotInitialized)?;
    bump_instance(env);
    Ok(asset)
}

pub fn set_penalty_to_lessee_bps(env: &Env, bps: u32) {
    env.storage()
        .instance()
        .set(&DataKey::PenaltyToLesseeBps, &bps);
}

pub fn get_penalty_to_lessee_bps(env: &Env) -> Result<u32, ContractError> {
    env.storage()
        .instance()
        .get(&DataKey::PenaltyToLesseeBps)
        .ok_or(ContractError::NotInitialized)
}

/* ---------------- ACCOUNTS ---------------- */

pub fn get_balance(env: &Env, user: &Address) -> Balance {
    load(env, &DataKey::Account(user.clone())).unwrap_or_default()
}

pub fn set_balance(env: &Env, user: &Address, balance: &Balance) {
    store(env, &DataKey::Account(user.clone()), balance);
}

/* ---------------- SIGNERS ---------------- */

pub fn set_signer(env: &Env, user: &Address, key: &BytesN<32>) {
    store(env, &DataKey::Signer(user.clone()), key);
}

pub fn get_signer(env: &Env, user: &Address) -> Option<BytesN<32>> {
    load(env, &DataKey::Signer(user.clone()))
}

/* ---------------- LEASES ---------------- */

pub fn set_lease(env: &Env, lease: &Lease) {
    store(env, &DataKey::Lease(lease.key()), lease);
}

pub fn get_lease(env: &Env, key: &LeaseKey) -> Option<Lease> {
    load(env, &DataKey::Lease(key.clone()))
}

pub fn remove_lease(env: &Env, key: &LeaseKey) {
    env.storage().persistent().remove(&DataKey::Lease(key.clone()));
}

pub fn mark_nonce_used(env: &Env, key: &LeaseKey) {
    store(env, &DataKey::NonceUsed(key.clone()), &true);
}

pub fn is_nonce_used(env: &Env, key: &LeaseKey) -> bool {
    load::<bool>(env, &DataKey::NonceUsed(key.clone())).is_some()
}

/* ---------------- CHALLENGES ---------------- */

pub fn set_challenge(env: &Env, key: &LeaseKey, challenge: &Challenge) {
    store(env, &DataKey::Challenge(key.clone()), challenge);
}

pub fn get_challenge(env: &Env, key: &LeaseKey) -> Option<Challenge> {
    load(env, &DataKey::Challenge(key.clone()))
}

pub fn remove_challenge(env: &Env, key: &LeaseKey) {
    env.storage()
        .persistent()
        .remove(&DataKey::Challenge(key.clone()));
}

/* ---------------- OPEN LEASE INDEX ---------------- */

/// The index carries each lease's due time so callers can find due leases
/// without loading the leases themselves.
pub fn get_open_leases(env: &Env, user: &Address) -> Vec<OpenLease> {
    load(env, &DataKey::OpenLeases(user.clone())).unwrap_or_else(|| Vec::new(env))
}

fn set_open_leases(env: &Env, user: &Address, entries: &Vec<OpenLease>) {
    let key = DataKey::OpenLeases(user.clone());
    if entries.is_empty() {
        env.storage().persistent().remove(&key);
    } else {
        store(env, &key, entries);
    }
}

fn position(entries: &Vec<OpenLease>, key: &LeaseKey) -> Option<u32> {
    entries
        .iter()
        .position(|entry| &entry.key == key)
        .map(|i| i as u32)
}

pub fn open_leases_append(env: &Env, user: &Address, key: &LeaseKey, due_at: u64) {
    let mut entries = get_open_leases(env, user);
    if position(&entries, key).is_none() {
        entries.push_back(OpenLease {
            key: key.clone(),
            due_at,
        });
        set_open_leases(env, user, &entries);
    }
}

/// Moves the due time of `key` in `user`'s index.
pub fn open_leases_reschedule(env: &Env, user: &Address, key: &LeaseKey, due_at: u64) {
    let mut entries = get_open_leases(env, user);
    if let Some(index) = position(&entries, key) {
        entries.set(
            index,
            OpenLease {
                key: key.clone(),
                due_at,
            },
        );
        set_open_leases(env, user, &entries);
    }
}

pub fn open_leases_remove(env: &Env, user: &Address, key: &LeaseKey) {
    let mut entries = get_open_leases(env, user);
    if let Some(index) = position(&entries, key) {
        entries.remove(index);
        set_open_leases(env, user, &entries);
    }
}

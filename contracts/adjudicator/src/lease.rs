//! Lease sealing and settlement.

use lease_lib::{
    signature, validation, ContractError, Lease, LeaseKey, LeaseTerms, Settlement,
    SettlementOutcome, MAX_SETTLEMENTS_PER_CALL,
};
use soroban_sdk::{log, Address, BytesN, Env};

use crate::{challenge, events, ledger, storage};

/// Verifies both co-signatures over `terms`, locks rent and bond, and stores
/// the lease under `(lessor, nonce)`.
pub fn seal(
    env: &Env,
    terms: &LeaseTerms,
    lessee_sig: &BytesN<64>,
    lessor_sig: &BytesN<64>,
) -> Result<Lease, ContractError> {
    validation::validate_terms(terms)?;
    let asset = storage::get_asset(env)?;

    signature::verify_cosignatures(
        env,
        &asset,
        terms,
        storage::get_signer(env, &terms.lessee),
        storage::get_signer(env, &terms.lessor),
        lessee_sig,
        lessor_sig,
    )?;

    let key = terms.key();
    if storage::is_nonce_used(env, &key) {
        return Err(ContractError::LeaseAlreadyExists);
    }

    let now = env.ledger().timestamp();
    if now > terms.last_valid_seal_ts {
        return Err(ContractError::SealDeadlinePassed);
    }

    settle_due(env, &terms.lessee)?;
    settle_due(env, &terms.lessor)?;

    if ledger::balance_of(env, &terms.lessee).available < terms.price {
        return Err(ContractError::LesseeInsufficientBalance);
    }
    if ledger::balance_of(env, &terms.lessor).available < terms.penalty {
        return Err(ContractError::LessorInsufficientBalance);
    }

    let end = now
        .checked_add(terms.lease_duration)
        .ok_or(ContractError::Overflow)?;

    ledger::lock_rent(env, &terms.lessee, terms.price)?;
    ledger::lock_penalty(env, &terms.lessor, terms.penalty)?;

    let lease = Lease {
        terms: terms.clone(),
        sealed_at: now,
        end,
    };
    storage::set_lease(env, &lease);
    storage::mark_nonce_used(env, &key);
    storage::open_leases_append(env, &terms.lessee, &key, end);
    storage::open_leases_append(env, &terms.lessor, &key, end);
    storage::bump_for_lease(env, &lease);

    events::lease_sealed(env, &terms.lessee, &terms.lessor, terms.nonce, end);
    log!(env, "lease sealed", terms.lessor.clone(), terms.nonce, end);

    Ok(lease)
}

/// The settlement `lease` is due for at `now`, if any.
///
/// An unanswered challenge past its window takes precedence over the lease
/// end; a challenge still inside its window blocks settlement.
pub fn due_outcome(env: &Env, lease: &Lease, now: u64) -> Option<SettlementOutcome> {
    match storage::get_challenge(env, &lease.key()) {
        Some(c) if c.is_expired(now) => Some(SettlementOutcome::ChallengeTimedOut),
        Some(c) if c.is_pending(now) => None,
        _ if lease.has_ended(now) => Some(SettlementOutcome::Completed),
        _ => None,
    }
}

pub fn settle(env: &Env, key: &LeaseKey) -> Result<Settlement, ContractError> {
    let lease = storage::get_lease(env, key).ok_or(ContractError::LeaseNotFound)?;
    let now = env.ledger().timestamp();
    let outcome = due_outcome(env, &lease, now).ok_or(ContractError::NothingToSettle)?;

    let settlement = match outcome {
        SettlementOutcome::Completed => release_completed(env, &lease)?,
        SettlementOutcome::ChallengeTimedOut => challenge::settle_timeout(env, &lease)?,
    };
    close(env, &lease, outcome);

    Ok(settlement)
}

/// Settles up to `MAX_SETTLEMENTS_PER_CALL` due leases of `user`, oldest
/// first. Returns how many were settled. Only leases the index marks as due
/// are loaded, so the cost does not grow with the number of open leases.
pub fn settle_due(env: &Env, user: &Address) -> Result<u32, ContractError> {
    let now = env.ledger().timestamp();
    let mut settled = 0u32;

    for entry in storage::get_open_leases(env, user).iter() {
        if settled == MAX_SETTLEMENTS_PER_CALL {
            break;
        }
        if entry.due_at > now {
            continue;
        }
        let Some(lease) = storage::get_lease(env, &entry.key) else {
            continue;
        };
        if due_outcome(env, &lease, now).is_some() {
            settle(env, &entry.key)?;
            settled += 1;
        }
    }

    Ok(settled)
}

/// Lease ran its course: rent goes to the lessor, bond back to the lessor.
fn release_completed(env: &Env, lease: &Lease) -> Result<Settlement, ContractError> {
    let terms = &lease.terms;
    ledger::release_rent(env, &terms.lessee, &terms.lessor, terms.price)?;
    ledger::release_penalty(env, &terms.lessor, &terms.lessor, terms.penalty)?;

    Ok(Settlement {
        key: lease.key(),
        outcome: SettlementOutcome::Completed,
        lessee_payout: 0,
        lessor_payout: terms
            .price
            .checked_add(terms.penalty)
            .ok_or(ContractError::Overflow)?,
    })
}

fn close(env: &Env, lease: &Lease, outcome: SettlementOutcome) {
    let key = lease.key();
    let terms = &lease.terms;

    storage::remove_lease(env, &key);
    storage::remove_challenge(env, &key);
    storage::open_leases_remove(env, &terms.lessee, &key);
    storage::open_leases_remove(env, &terms.lessor, &key);

    events::lease_settled(env, &terms.lessee, &terms.lessor, terms.nonce, outcome);
    log!(env, "lease settled", terms.lessor.clone(), terms.nonce, outcome);
}

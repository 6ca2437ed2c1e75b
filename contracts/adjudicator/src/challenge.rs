//! Storage challenges: NoChallenge -> Pending -> {Resolved, Expired}.

use lease_lib::{
    merkle, validation, Challenge, ChallengeStatus, ContractError, Lease, LeaseKey, Settlement,
    SettlementOutcome, BPS_DENOMINATOR, CHALLENGE_WINDOW_SECONDS,
};
use soroban_sdk::{log, Address, Bytes, BytesN, Env, Vec};

use crate::{events, ledger, storage};

/// Lessee demands proof that block `storage_block_index` is still stored.
pub fn open(
    env: &Env,
    lessee: &Address,
    lessor: &Address,
    nonce: u64,
    storage_block_index: u64,
) -> Result<Challenge, ContractError> {
    let key = LeaseKey {
        lessor: lessor.clone(),
        nonce,
    };
    let lease = storage::get_lease(env, &key).ok_or(ContractError::LeaseNotFound)?;
    if &lease.terms.lessee != lessee {
        return Err(ContractError::NotLessee);
    }

    if storage::get_challenge(env, &key).is_some_and(|c| c.active) {
        return Err(ContractError::ChallengeInProgress);
    }

    // A full response window has to fit before the lease ends.
    let now = env.ledger().timestamp();
    let challenge_end = now
        .checked_add(CHALLENGE_WINDOW_SECONDS)
        .ok_or(ContractError::Overflow)?;
    if lease.has_ended(now) || challenge_end > lease.end {
        return Err(ContractError::LeaseEndingOrEnded);
    }

    if storage_block_index >= lease.terms.total_blocks() {
        return Err(ContractError::BlockOutOfRange);
    }

    let challenge = Challenge {
        storage_block_index,
        challenge_end,
        active: true,
    };
    storage::set_challenge(env, &key, &challenge);

    // Unanswered, the lease times out the second after the window closes.
    let due_at = challenge_end.checked_add(1).ok_or(ContractError::Overflow)?;
    storage::open_leases_reschedule(env, lessee, &key, due_at);
    storage::open_leases_reschedule(env, lessor, &key, due_at);
    storage::bump_for_lease(env, &lease);

    events::challenged(
        env,
        lessee,
        lessor,
        nonce,
        storage_block_index,
        challenge_end,
    );
    log!(env, "challenge opened", lessor.clone(), nonce, storage_block_index);

    Ok(challenge)
}

/// Lessor answers the pending challenge with the block and its Merkle path.
pub fn respond(
    env: &Env,
    lessor: &Address,
    lessee: &Address,
    nonce: u64,
    block_data: &Bytes,
    proof: &Vec<BytesN<32>>,
) -> Result<(), ContractError> {
    validation::validate_response_nonce(nonce)?;

    let key = LeaseKey {
        lessor: lessor.clone(),
        nonce,
    };
    let lease = storage::get_lease(env, &key)
        .filter(|l| &l.terms.lessee == lessee)
        .ok_or(ContractError::LeaseNotFound)?;

    let mut challenge = storage::get_challenge(env, &key)
        .filter(|c| c.active)
        .ok_or(ContractError::NotChallenged)?;
    if challenge.is_expired(env.ledger().timestamp()) {
        return Err(ContractError::ChallengeExpired);
    }

    merkle::verify_block_proof(
        env,
        &lease.terms.merkle_root,
        lease.terms.total_blocks(),
        challenge.storage_block_index,
        block_data,
        proof,
    )?;

    challenge.active = false;
    storage::set_challenge(env, &key, &challenge);
    storage::open_leases_reschedule(env, lessee, &key, lease.end);
    storage::open_leases_reschedule(env, lessor, &key, lease.end);

    events::challenge_resolved(env, lessee, lessor, nonce);
    log!(env, "challenge resolved", lessor.clone(), nonce);

    Ok(())
}

pub fn status(env: &Env, key: &LeaseKey) -> ChallengeStatus {
    let now = env.ledger().timestamp();
    match storage::get_challenge(env, key) {
        Some(c) if c.is_pending(now) => ChallengeStatus::Pending,
        Some(c) if c.is_expired(now) => ChallengeStatus::Expired,
        _ => ChallengeStatus::None,
    }
}

/// Lessee's cut of a forfeited bond, rounded down.
pub fn penalty_share(penalty: i128, to_lessee_bps: u32) -> Result<i128, ContractError> {
    let scaled = penalty
        .checked_mul(to_lessee_bps as i128)
        .ok_or(ContractError::Overflow)?;
    Ok(scaled / BPS_DENOMINATOR as i128)
}

/// The lessor failed to prove storage: rent is refunded to the lessee and
/// the bond is split between the parties per the instance policy.
pub fn settle_timeout(env: &Env, lease: &Lease) -> Result<Settlement, ContractError> {
    let terms = &lease.terms;
    let bps = storage::get_penalty_to_lessee_bps(env)?;
    let to_lessee = penalty_share(terms.penalty, bps)?;
    let to_lessor = terms.penalty - to_lessee;

    ledger::release_rent(env, &terms.lessee, &terms.lessee, terms.price)?;
    ledger::release_penalty(env, &terms.lessor, &terms.lessee, to_lessee)?;
    ledger::release_penalty(env, &terms.lessor, &terms.lessor, to_lessor)?;

    Ok(Settlement {
        key: lease.key(),
        outcome: SettlementOutcome::ChallengeTimedOut,
        lessee_payout: terms
            .price
            .checked_add(to_lessee)
            .ok_or(ContractError::Overflow)?,
        lessor_payout: to_lessor,
    })
}

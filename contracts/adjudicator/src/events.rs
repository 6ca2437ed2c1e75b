use lease_lib::{
    SettlementOutcome, CHALLENGED_TOPIC, CHALLENGE_RESOLVED_TOPIC, DEPOSITED_TOPIC,
    LEASE_SEALED_TOPIC, LEASE_SETTLED_TOPIC, WITHDRAWN_TOPIC,
};
use soroban_sdk::{Address, Env, Symbol};

/// topics: (Deposited, user) data: amount
pub fn deposited(env: &Env, user: &Address, amount: i128) {
    env.events()
        .publish((Symbol::new(env, DEPOSITED_TOPIC), user.clone()), amount);
}

/// topics: (Withdrawn, user) data: amount
pub fn withdrawn(env: &Env, user: &Address, amount: i128) {
    env.events()
        .publish((Symbol::new(env, WITHDRAWN_TOPIC), user.clone()), amount);
}

/// topics: (LeaseSealed, lessee, lessor) data: (nonce, end)
pub fn lease_sealed(env: &Env, lessee: &Address, lessor: &Address, nonce: u64, end: u64) {
    env.events().publish(
        (
            Symbol::new(env, LEASE_SEALED_TOPIC),
            lessee.clone(),
            lessor.clone(),
        ),
        (nonce, end),
    );
}

/// topics: (Challenged, lessee, lessor) data: (nonce, storage_block_index, challenge_end)
pub fn challenged(
    env: &Env,
    lessee: &Address,
    lessor: &Address,
    nonce: u64,
    storage_block_index: u64,
    challenge_end: u64,
) {
    env.events().publish(
        (
            Symbol::new(env, CHALLENGED_TOPIC),
            lessee.clone(),
            lessor.clone(),
        ),
        (nonce, storage_block_index, challenge_end),
    );
}

/// topics: (ChallengeResolved, lessee, lessor) data: nonce
pub fn challenge_resolved(env: &Env, lessee: &Address, lessor: &Address, nonce: u64) {
    env.events().publish(
        (
            Symbol::new(env, CHALLENGE_RESOLVED_TOPIC),
            lessee.clone(),
            lessor.clone(),
        ),
        nonce,
    );
}

/// topics: (LeaseSettled, lessee, lessor) data: (nonce, outcome)
pub fn lease_settled(
    env: &Env,
    lessee: &Address,
    lessor: &Address,
    nonce: u64,
    outcome: SettlementOutcome,
) {
    env.events().publish(
        (
            Symbol::new(env, LEASE_SETTLED_TOPIC),
            lessee.clone(),
            lessor.clone(),
        ),
        (nonce, outcome),
    );
}

#![no_std]

mod challenge;
mod events;
mod ledger;
mod lease;
mod storage;

#[cfg(test)]
mod testutils;

use lease_lib::{
    validation, Balance, Challenge, ChallengeStatus, ContractError, Lease, LeaseKey, LeaseTerms,
    Settlement, DEFAULT_PENALTY_TO_LESSEE_BPS,
};
use soroban_sdk::{contract, contractimpl, log, Address, Bytes, BytesN, Env, Vec};

#[contract]
pub struct Adjudicator;

#[contractimpl]
impl Adjudicator {
    /// Bind this instance to `asset`. `penalty_to_lessee_bps` is the share of
    /// a lessor's bond paid to the lessee when a challenge times out.
    pub fn init_contract(
        env: Env,
        asset: Address,
        penalty_to_lessee_bps: Option<u32>,
    ) -> Result<(), ContractError> {
        if storage::is_initialized(&env) {
            return Err(ContractError::AlreadyInitialized);
        }

        let bps = penalty_to_lessee_bps.unwrap_or(DEFAULT_PENALTY_TO_LESSEE_BPS);
        validation::validate_policy_bps(bps)?;

        storage::set_asset(&env, &asset);
        storage::set_penalty_to_lessee_bps(&env, bps);
        log!(&env, "adjudicator initialized", asset, bps);
        Ok(())
    }

    pub fn asset(env: Env) -> Result<Address, ContractError> {
        storage::get_asset(&env)
    }

    pub fn settlement_policy(env: Env) -> Result<u32, ContractError> {
        storage::get_penalty_to_lessee_bps(&env)
    }

    /// Bind the ed25519 key `user` co-signs lease terms with.
    pub fn bind_signer(env: Env, user: Address, key: BytesN<32>) -> Result<(), ContractError> {
        storage::get_asset(&env)?;
        user.require_auth();
        storage::set_signer(&env, &user, &key);
        Ok(())
    }

    pub fn signer_of(env: Env, user: Address) -> Option<BytesN<32>> {
        storage::get_signer(&env, &user)
    }

    /* ---------------- LEDGER ---------------- */

    /// Pull `amount` from `from` into custody and credit it to `on_behalf_of`.
    pub fn deposit(
        env: Env,
        from: Address,
        amount: i128,
        on_behalf_of: Address,
    ) -> Result<(), ContractError> {
        validation::validate_amount(amount)?;
        let asset = storage::get_asset(&env)?;
        from.require_auth();

        lease::settle_due(&env, &on_behalf_of)?;
        ledger::pull(&env, &asset, &from, amount)?;
        ledger::credit_available(&env, &on_behalf_of, amount)?;

        events::deposited(&env, &on_behalf_of, amount);
        Ok(())
    }

    /// Pay `amount` of `user`'s available balance out to `to`.
    pub fn withdraw(
        env: Env,
        user: Address,
        amount: i128,
        to: Address,
    ) -> Result<(), ContractError> {
        validation::validate_amount(amount)?;
        let asset = storage::get_asset(&env)?;
        user.require_auth();

        lease::settle_due(&env, &user)?;
        ledger::debit_available(&env, &user, amount)?;
        ledger::push(&env, &asset, &to, amount)?;

        events::withdrawn(&env, &user, amount);
        Ok(())
    }

    /// Balance partition of `user`, after settling due leases of `user`
    /// (at most `MAX_SETTLEMENTS_PER_CALL` per call; `settle` handles the rest).
    pub fn balance(env: Env, user: Address) -> Result<Balance, ContractError> {
        storage::get_asset(&env)?;
        lease::settle_due(&env, &user)?;
        Ok(ledger::balance_of(&env, &user))
    }

    /* ---------------- LEASES ---------------- */

    /// Seal co-signed `terms`. Anyone may submit; the signatures authorize.
    pub fn seal_lease(
        env: Env,
        terms: LeaseTerms,
        lessee_sig: BytesN<64>,
        lessor_sig: BytesN<64>,
    ) -> Result<Lease, ContractError> {
        lease::seal(&env, &terms, &lessee_sig, &lessor_sig)
    }

    pub fn get_lease(env: Env, lessor: Address, nonce: u64) -> Option<Lease> {
        storage::get_lease(&env, &LeaseKey { lessor, nonce })
    }

    pub fn open_leases(env: Env, user: Address) -> Vec<LeaseKey> {
        let mut keys = Vec::new(&env);
        for entry in storage::get_open_leases(&env, &user).iter() {
            keys.push_back(entry.key);
        }
        keys
    }

    /// Settle a lease whose end or unanswered challenge has passed.
    pub fn settle(env: Env, lessor: Address, nonce: u64) -> Result<Settlement, ContractError> {
        storage::get_asset(&env)?;
        lease::settle(&env, &LeaseKey { lessor, nonce })
    }

    /* ---------------- CHALLENGES ---------------- */

    pub fn challenge(
        env: Env,
        lessee: Address,
        lessor: Address,
        nonce: u64,
        storage_block_index: u64,
    ) -> Result<Challenge, ContractError> {
        lessee.require_auth();
        storage::bump_instance(&env);
        challenge::open(&env, &lessee, &lessor, nonce, storage_block_index)
    }

    pub fn response(
        env: Env,
        lessor: Address,
        lessee: Address,
        nonce: u64,
        block_data: Bytes,
        proof: Vec<BytesN<32>>,
    ) -> Result<(), ContractError> {
        lessor.require_auth();
        storage::bump_instance(&env);
        challenge::respond(&env, &lessor, &lessee, nonce, &block_data, &proof)
    }

    pub fn challenge_status(env: Env, lessor: Address, nonce: u64) -> ChallengeStatus {
        challenge::status(&env, &LeaseKey { lessor, nonce })
    }
}

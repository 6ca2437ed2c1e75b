//! Per-account custody ledger.
//!
//! Each account's custody is split into `available`, `locked_rents` and
//! `locked_penalties`. Only this module writes balances; sealing, challenge
//! and settlement code move funds through the functions below.

use lease_lib::{Balance, ContractError};
use soroban_sdk::{token, Address, Env};

use crate::storage;

pub fn balance_of(env: &Env, user: &Address) -> Balance {
    storage::get_balance(env, user)
}

fn add(a: i128, b: i128) -> Result<i128, ContractError> {
    a.checked_add(b).ok_or(ContractError::Overflow)
}

/// `a - b`, failing with `short` when the result would go negative.
fn sub(a: i128, b: i128, short: ContractError) -> Result<i128, ContractError> {
    if a < b {
        return Err(short);
    }
    Ok(a - b)
}

pub fn credit_available(env: &Env, user: &Address, amount: i128) -> Result<(), ContractError> {
    let mut balance = balance_of(env, user);
    balance.available = add(balance.available, amount)?;
    storage::set_balance(env, user, &balance);
    Ok(())
}

pub fn debit_available(env: &Env, user: &Address, amount: i128) -> Result<(), ContractError> {
    let mut balance = balance_of(env, user);
    balance.available = sub(balance.available, amount, ContractError::InsufficientHoldings)?;
    storage::set_balance(env, user, &balance);
    Ok(())
}

/// available -> locked_rents
pub fn lock_rent(env: &Env, lessee: &Address, amount: i128) -> Result<(), ContractError> {
    let mut balance = balance_of(env, lessee);
    balance.available = sub(
        balance.available,
        amount,
        ContractError::LesseeInsufficientBalance,
    )?;
    balance.locked_rents = add(balance.locked_rents, amount)?;
    storage::set_balance(env, lessee, &balance);
    Ok(())
}

/// available -> locked_penalties
pub fn lock_penalty(env: &Env, lessor: &Address, amount: i128) -> Result<(), ContractError> {
    let mut balance = balance_of(env, lessor);
    balance.available = sub(
        balance.available,
        amount,
        ContractError::LessorInsufficientBalance,
    )?;
    balance.locked_penalties = add(balance.locked_penalties, amount)?;
    storage::set_balance(env, lessor, &balance);
    Ok(())
}

/// lessee.locked_rents -> beneficiary.available
pub fn release_rent(
    env: &Env,
    lessee: &Address,
    beneficiary: &Address,
    amount: i128,
) -> Result<(), ContractError> {
    let mut balance = balance_of(env, lessee);
    balance.locked_rents = sub(
        balance.locked_rents,
        amount,
        ContractError::InsufficientLocked,
    )?;
    storage::set_balance(env, lessee, &balance);
    credit_available(env, beneficiary, amount)
}

/// lessor.locked_penalties -> beneficiary.available
pub fn release_penalty(
    env: &Env,
    lessor: &Address,
    beneficiary: &Address,
    amount: i128,
) -> Result<(), ContractError> {
    let mut balance = balance_of(env, lessor);
    balance.locked_penalties = sub(
        balance.locked_penalties,
        amount,
        ContractError::InsufficientLocked,
    )?;
    storage::set_balance(env, lessor, &balance);
    credit_available(env, beneficiary, amount)
}

/* ---------------- EXTERNAL ASSET ---------------- */

/// Moves `amount` of `asset` from `from` into custody.
pub fn pull(env: &Env, asset: &Address, from: &Address, amount: i128) -> Result<(), ContractError> {
    let token = token::Client::new(env, asset);
    match token.try_transfer(from, &env.current_contract_address(), &amount) {
        Ok(Ok(())) => Ok(()),
        _ => Err(ContractError::TransferFailed),
    }
}

/// Moves `amount` of `asset` out of custody to `to`.
pub fn push(env: &Env, asset: &Address, to: &Address, amount: i128) -> Result<(), ContractError> {
    let token = token::Client::new(env, asset);
    match token.try_transfer(&env.current_contract_address(), to, &amount) {
        Ok(Ok(())) => Ok(()),
        _ => Err(ContractError::TransferFailed),
    }
}

use soroban_sdk::{Address, Env};

use crate::{errors::ContractError, CREATOR_KEY};

/// Records `creator` as the single writer. Fails if one is already set.
pub fn set_creator(env: &Env, creator: &Address) -> Result<(), ContractError> {
    if env.storage().instance().has(&CREATOR_KEY) {
        return Err(ContractError::AlreadyInitialized);
    }
    env.storage().instance().set(&CREATOR_KEY, creator);
    Ok(())
}

pub fn get_creator(env: &Env) -> Result<Address, ContractError> {
    env.storage()
        .instance()
        .get(&CREATOR_KEY)
        .ok_or(ContractError::NotInitialized)
}

pub fn verify_creator(env: &Env, caller: &Address) -> Result<(), ContractError> {
    let creator = get_creator(env)?;
    if &creator != caller {
        return Err(ContractError::Unauthorized);
    }
    Ok(())
}

use crate::{errors::ContractError, LeaseTerms, BPS_DENOMINATOR};

/// Deposits and withdrawals must move a strictly positive amount.
pub fn validate_amount(amount: i128) -> Result<(), ContractError> {
    if amount <= 0 {
        return Err(ContractError::InvalidAmount);
    }
    Ok(())
}

pub fn validate_seal_nonce(nonce: u64) -> Result<(), ContractError> {
    if nonce == 0 {
        return Err(ContractError::NonceZero);
    }
    Ok(())
}

pub fn validate_response_nonce(nonce: u64) -> Result<(), ContractError> {
    if nonce == 0 {
        return Err(ContractError::InvalidNonce);
    }
    Ok(())
}

/// Shape checks on terms that need no state: nonce, then amounts.
pub fn validate_terms(terms: &LeaseTerms) -> Result<(), ContractError> {
    validate_seal_nonce(terms.nonce)?;
    if terms.price < 0 || terms.penalty < 0 {
        return Err(ContractError::InvalidAmount);
    }
    Ok(())
}

pub fn validate_policy_bps(bps: u32) -> Result<(), ContractError> {
    if bps > BPS_DENOMINATOR {
        return Err(ContractError::InvalidPolicy);
    }
    Ok(())
}

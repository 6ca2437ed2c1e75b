//! Co-signature verification for lease terms.
//!
//! Both parties sign the SHA-256 digest of the canonical encoding of the terms
//! with their ed25519 key. Verification uses `ed25519-dalek`'s strict mode so a
//! bad signature comes back as an error value instead of trapping the host.

use ed25519_dalek::{Signature, VerifyingKey};
use soroban_sdk::{xdr::ToXdr, Address, Bytes, BytesN, Env};

use crate::{errors::ContractError, LeaseTerms};

/// Canonical byte encoding of `terms`, domain-separated by the asset the
/// adjudicator custodies. Field order is fixed.
pub fn encode_terms(env: &Env, asset: &Address, terms: &LeaseTerms) -> Bytes {
    let mut out = Bytes::new(env);
    out.append(&asset.clone().to_xdr(env));
    out.append(&terms.lessee.clone().to_xdr(env));
    out.append(&terms.lessor.clone().to_xdr(env));
    out.extend_from_array(&terms.nonce.to_be_bytes());
    out.extend_from_array(&terms.merkle_root.to_array());
    out.extend_from_array(&terms.size_bytes.to_be_bytes());
    out.extend_from_array(&terms.price.to_be_bytes());
    out.extend_from_array(&terms.penalty.to_be_bytes());
    out.extend_from_array(&terms.lease_duration.to_be_bytes());
    out.extend_from_array(&terms.last_valid_seal_ts.to_be_bytes());
    out
}

/// The 32-byte message both parties sign.
pub fn lease_digest(env: &Env, asset: &Address, terms: &LeaseTerms) -> BytesN<32> {
    env.crypto().sha256(&encode_terms(env, asset, terms)).into()
}

/// Checks `signature` over `digest` against `key`.
pub fn verify_signature(
    key: &BytesN<32>,
    digest: &BytesN<32>,
    signature: &BytesN<64>,
) -> Result<(), ed25519_dalek::SignatureError> {
    let key = VerifyingKey::from_bytes(&key.to_array())?;
    let signature = Signature::from_bytes(&signature.to_array());
    key.verify_strict(&digest.to_array(), &signature)
}

/// Verifies both co-signatures over `terms`: lessee first, then lessor.
///
/// A party without a bound key, a malformed key or signature, and a signature
/// by anyone else all map to the same per-party error.
pub fn verify_cosignatures(
    env: &Env,
    asset: &Address,
    terms: &LeaseTerms,
    lessee_key: Option<BytesN<32>>,
    lessor_key: Option<BytesN<32>>,
    lessee_sig: &BytesN<64>,
    lessor_sig: &BytesN<64>,
) -> Result<BytesN<32>, ContractError> {
    let digest = lease_digest(env, asset, terms);

    let lessee_key = lessee_key.ok_or(ContractError::LesseeSignatureInvalid)?;
    verify_signature(&lessee_key, &digest, lessee_sig)
        .map_err(|_| ContractError::LesseeSignatureInvalid)?;

    let lessor_key = lessor_key.ok_or(ContractError::LessorSignatureInvalid)?;
    verify_signature(&lessor_key, &digest, lessor_sig)
        .map_err(|_| ContractError::LessorSignatureInvalid)?;

    Ok(digest)
}

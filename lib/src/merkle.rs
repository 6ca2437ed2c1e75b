//! Merkle proof verification for stored data blocks.
//!
//! The committed tree has `total_blocks` leaves, `sha256(block)` each, padded
//! with zeroed 32-byte leaves up to the next power of two. Internal nodes are
//! `sha256(left || right)`. A proof lists sibling hashes from the leaf level
//! upwards; bit `i` of the block index tells whether the running hash is the
//! left (0) or right (1) child at level `i`.

use soroban_sdk::{Bytes, BytesN, Env, Vec};

use crate::errors::ContractError;

/// Number of siblings a proof must carry for a tree of `total_blocks` leaves.
pub fn expected_proof_len(total_blocks: u64) -> u32 {
    if total_blocks <= 1 {
        return 0;
    }
    u64::BITS - (total_blocks - 1).leading_zeros()
}

pub fn hash_leaf(env: &Env, block: &Bytes) -> BytesN<32> {
    env.crypto().sha256(block).into()
}

pub fn hash_pair(env: &Env, left: &BytesN<32>, right: &BytesN<32>) -> BytesN<32> {
    let mut combined = Bytes::new(env);
    combined.append(&left.clone().into());
    combined.append(&right.clone().into());
    env.crypto().sha256(&combined).into()
}

/// Folds `leaf` up the tree along `proof`. The proof length is not checked here.
pub fn compute_root(
    env: &Env,
    leaf: &BytesN<32>,
    index: u64,
    proof: &Vec<BytesN<32>>,
) -> BytesN<32> {
    let mut current = leaf.clone();
    let mut path = index;

    for sibling in proof.iter() {
        current = if path & 1 == 0 {
            hash_pair(env, &current, &sibling)
        } else {
            hash_pair(env, &sibling, &current)
        };
        path >>= 1;
    }

    current
}

/// Verify that `block` is stored at `index` under `root`.
///
/// The proof shape is validated against the tree size before any hashing.
pub fn verify_block_proof(
    env: &Env,
    root: &BytesN<32>,
    total_blocks: u64,
    index: u64,
    block: &Bytes,
    proof: &Vec<BytesN<32>>,
) -> Result<(), ContractError> {
    if index >= total_blocks {
        return Err(ContractError::BlockOutOfRange);
    }

    let expected = expected_proof_len(total_blocks);
    if proof.len() < expected {
        return Err(ContractError::ProofMissingData);
    }
    if proof.len() > expected {
        return Err(ContractError::ProofTooMuchData);
    }

    let leaf = hash_leaf(env, block);
    if compute_root(env, &leaf, index, proof) != *root {
        return Err(ContractError::ProofWrongHash);
    }
    Ok(())
}

#![cfg(any(test, feature = "testutils"))]

use ed25519_dalek::{Signer, SigningKey};
use soroban_sdk::{Address, Bytes, BytesN, Env, Vec};

use crate::merkle::{hash_leaf, hash_pair};
use crate::signature::lease_digest;
use crate::{LeaseTerms, BLOCK_SIZE};

/// Deterministic ed25519 signer for tests.
pub struct TestSigner {
    key: SigningKey,
}

impl TestSigner {
    pub fn from_seed(seed: u8) -> Self {
        Self {
            key: SigningKey::from_bytes(&[seed; 32]),
        }
    }

    pub fn public_key(&self, env: &Env) -> BytesN<32> {
        BytesN::from_array(env, &self.key.verifying_key().to_bytes())
    }

    pub fn sign(&self, env: &Env, message: &[u8]) -> BytesN<64> {
        BytesN::from_array(env, &self.key.sign(message).to_bytes())
    }

    pub fn sign_terms(&self, env: &Env, asset: &Address, terms: &LeaseTerms) -> BytesN<64> {
        let digest = lease_digest(env, asset, terms);
        self.sign(env, &digest.to_array())
    }
}

/// Splits `data` into `BLOCK_SIZE` blocks; the last one may be short.
pub fn split_blocks(env: &Env, data: &Bytes) -> Vec<Bytes> {
    let mut blocks = Vec::new(env);
    let block_size = BLOCK_SIZE as u32;
    let mut start = 0u32;
    while start < data.len() {
        let end = (start + block_size).min(data.len());
        blocks.push_back(data.slice(start..end));
        start = end;
    }
    blocks
}

/// Full Merkle tree in the layout `merkle::verify_block_proof` expects.
pub struct MerkleTree {
    levels: Vec<Vec<BytesN<32>>>,
}

impl MerkleTree {
    pub fn build(env: &Env, blocks: &Vec<Bytes>) -> Self {
        let width = (blocks.len() as u64).max(1).next_power_of_two();

        let mut level = Vec::new(env);
        for block in blocks.iter() {
            level.push_back(hash_leaf(env, &block));
        }
        while (level.len() as u64) < width {
            level.push_back(BytesN::from_array(env, &[0u8; 32]));
        }

        let mut levels = Vec::new(env);
        levels.push_back(level.clone());
        while level.len() > 1 {
            let mut next = Vec::new(env);
            let mut i = 0;
            while i < level.len() {
                next.push_back(hash_pair(
                    env,
                    &level.get_unchecked(i),
                    &level.get_unchecked(i + 1),
                ));
                i += 2;
            }
            levels.push_back(next.clone());
            level = next;
        }

        Self { levels }
    }

    pub fn root(&self) -> BytesN<32> {
        self.levels.last_unchecked().get_unchecked(0)
    }

    /// Sibling path for leaf `index`, leaf level first.
    pub fn proof(&self, index: u64) -> Vec<BytesN<32>> {
        let mut proof = Vec::new(self.levels.env());
        let mut position = index as u32;
        for depth in 0..self.levels.len() - 1 {
            let level = self.levels.get_unchecked(depth);
            proof.push_back(level.get_unchecked(position ^ 1));
            position >>= 1;
        }
        proof
    }
}

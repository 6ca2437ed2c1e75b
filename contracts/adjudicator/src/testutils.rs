#![cfg(test)]

use lease_lib::testutils::{split_blocks, MerkleTree, TestSigner};
use lease_lib::{Lease, LeaseTerms};
use soroban_sdk::testutils::{Address as _, Events, Ledger};
use soroban_sdk::{token, Address, Bytes, BytesN, Env, Val, Vec};

use crate::{Adjudicator, AdjudicatorClient};

pub const SEAL_DEADLINE: u64 = 1_000;
pub const THIRTY_DAYS: u64 = 30 * 86_400;

pub struct Party {
    pub address: Address,
    pub signer: TestSigner,
}

impl Party {
    fn new(env: &Env, seed: u8) -> Self {
        Party {
            address: Address::generate(env),
            signer: TestSigner::from_seed(seed),
        }
    }
}

/// Data a lessor stores for a lease, with its Merkle tree.
pub struct StoredData {
    pub blocks: Vec<Bytes>,
    pub tree: MerkleTree,
    pub size_bytes: u64,
}

impl StoredData {
    pub fn new(env: &Env, size_bytes: u32) -> Self {
        let mut data = Bytes::new(env);
        for i in 0..size_bytes {
            data.push_back((i % 251) as u8);
        }
        let blocks = split_blocks(env, &data);
        let tree = MerkleTree::build(env, &blocks);
        StoredData {
            blocks,
            tree,
            size_bytes: size_bytes as u64,
        }
    }

    pub fn root(&self) -> BytesN<32> {
        self.tree.root()
    }

    pub fn block(&self, index: u64) -> Bytes {
        self.blocks.get_unchecked(index as u32)
    }

    pub fn proof(&self, index: u64) -> Vec<BytesN<32>> {
        self.tree.proof(index)
    }
}

pub struct TestSetup {
    pub env: Env,
    pub contract_id: Address,
    pub asset: Address,
    pub lessee: Party,
    pub lessor: Party,
}

impl TestSetup {
    pub fn new() -> Self {
        Self::with_policy(None)
    }

    pub fn with_policy(penalty_to_lessee_bps: Option<u32>) -> Self {
        let env = Env::default();
        env.mock_all_auths();

        let issuer = Address::generate(&env);
        let asset = env.register_stellar_asset_contract_v2(issuer).address();
        let contract_id = env.register(Adjudicator, ());
        AdjudicatorClient::new(&env, &contract_id).init_contract(&asset, &penalty_to_lessee_bps);

        let lessee = Party::new(&env, 1);
        let lessor = Party::new(&env, 2);

        let setup = TestSetup {
            env,
            contract_id,
            asset,
            lessee,
            lessor,
        };
        setup.bind(&setup.lessee);
        setup.bind(&setup.lessor);
        setup
    }

    pub fn client(&self) -> AdjudicatorClient<'_> {
        AdjudicatorClient::new(&self.env, &self.contract_id)
    }

    pub fn bind(&self, party: &Party) {
        self.client()
            .bind_signer(&party.address, &party.signer.public_key(&self.env));
    }

    pub fn mint(&self, to: &Address, amount: i128) {
        token::StellarAssetClient::new(&self.env, &self.asset).mint(to, &amount);
    }

    pub fn token_balance(&self, who: &Address) -> i128 {
        token::Client::new(&self.env, &self.asset).balance(who)
    }

    /// Mint `amount` to `who` and deposit all of it for them.
    pub fn fund(&self, who: &Address, amount: i128) {
        self.mint(who, amount);
        self.client().deposit(who, &amount, who);
    }

    pub fn terms(
        &self,
        nonce: u64,
        price: i128,
        penalty: i128,
        merkle_root: BytesN<32>,
        size_bytes: u64,
        lease_duration: u64,
    ) -> LeaseTerms {
        LeaseTerms {
            lessee: self.lessee.address.clone(),
            lessor: self.lessor.address.clone(),
            nonce,
            merkle_root,
            size_bytes,
            price,
            penalty,
            lease_duration,
            last_valid_seal_ts: SEAL_DEADLINE,
        }
    }

    /// A five-byte, one-day lease.
    pub fn example_terms(&self, nonce: u64, price: i128, penalty: i128) -> LeaseTerms {
        let root = self
            .env
            .crypto()
            .sha256(&Bytes::from_slice(&self.env, b"test"))
            .into();
        self.terms(nonce, price, penalty, root, 5, 86_400)
    }

    /// A thirty-day lease over `data`.
    pub fn data_terms(
        &self,
        nonce: u64,
        price: i128,
        penalty: i128,
        data: &StoredData,
    ) -> LeaseTerms {
        self.terms(nonce, price, penalty, data.root(), data.size_bytes, THIRTY_DAYS)
    }

    pub fn sign(&self, terms: &LeaseTerms) -> (BytesN<64>, BytesN<64>) {
        (
            self.lessee.signer.sign_terms(&self.env, &self.asset, terms),
            self.lessor.signer.sign_terms(&self.env, &self.asset, terms),
        )
    }

    pub fn seal(&self, terms: &LeaseTerms) -> Lease {
        let (lessee_sig, lessor_sig) = self.sign(terms);
        self.client().seal_lease(terms, &lessee_sig, &lessor_sig)
    }

    pub fn now(&self) -> u64 {
        self.env.ledger().timestamp()
    }

    pub fn advance(&self, seconds: u64) {
        self.env.ledger().with_mut(|li| li.timestamp += seconds);
    }

    /// Moves time and the ledger sequence together, one ledger per five
    /// seconds, so entry TTLs run down as they would on a live network.
    pub fn advance_ledgers(&self, seconds: u64) {
        self.env.ledger().with_mut(|li| {
            li.timestamp += seconds;
            li.sequence_number += (seconds / 5) as u32;
        });
    }

    /// The most recent event, as a one-element vector for deep comparison.
    pub fn last_event(&self) -> Vec<(Address, Vec<Val>, Val)> {
        let all = self.env.events().all();
        all.slice(all.len() - 1..)
    }
}

use soroban_sdk::{contracttype, Address, BytesN};

use crate::BLOCK_SIZE;

/// Lease terms as agreed off-band and co-signed by both parties.
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct LeaseTerms {
    pub lessee: Address,
    pub lessor: Address,
    /// Non-zero, unique per lessor.
    pub nonce: u64,
    /// Commitment to the stored data, see `merkle`.
    pub merkle_root: BytesN<32>,
    pub size_bytes: u64,
    /// Rent, locked from the lessee.
    pub price: i128,
    /// Bond, locked from the lessor.
    pub penalty: i128,
    /// Seconds.
    pub lease_duration: u64,
    /// Sealing deadline for the signed offer.
    pub last_valid_seal_ts: u64,
}

impl LeaseTerms {
    pub fn key(&self) -> LeaseKey {
        LeaseKey {
            lessor: self.lessor.clone(),
            nonce: self.nonce,
        }
    }

    pub fn total_blocks(&self) -> u64 {
        total_blocks(self.size_bytes)
    }
}

/// Number of `BLOCK_SIZE` blocks needed to hold `size_bytes`.
pub fn total_blocks(size_bytes: u64) -> u64 {
    size_bytes.div_ceil(BLOCK_SIZE)
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct LeaseKey {
    pub lessor: Address,
    pub nonce: u64,
}

/// A sealed lease.
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct Lease {
    pub terms: LeaseTerms,
    pub sealed_at: u64,
    /// `sealed_at + lease_duration`
    pub end: u64,
}

impl Lease {
    pub fn key(&self) -> LeaseKey {
        self.terms.key()
    }

    pub fn has_ended(&self, now: u64) -> bool {
        now >= self.end
    }
}

/// Storage challenge attached to a lease. At most one is active at a time.
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct Challenge {
    pub storage_block_index: u64,
    pub challenge_end: u64,
    pub active: bool,
}

impl Challenge {
    /// Responses are accepted up to and including `challenge_end`.
    pub fn is_pending(&self, now: u64) -> bool {
        self.active && now <= self.challenge_end
    }

    pub fn is_expired(&self, now: u64) -> bool {
        self.active && now > self.challenge_end
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[contracttype]
#[repr(u32)]
pub enum ChallengeStatus {
    None = 0,
    Pending = 1,
    Expired = 2,
}

/// Custody balance partition of one account.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[contracttype]
pub struct Balance {
    pub available: i128,
    pub locked_rents: i128,
    pub locked_penalties: i128,
}

impl Balance {
    pub fn total(&self) -> i128 {
        self.available + self.locked_rents + self.locked_penalties
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[contracttype]
#[repr(u32)]
pub enum SettlementOutcome {
    /// Lease ran to its end; rent earned, bond returned.
    Completed = 0,
    /// Challenge went unanswered; rent refunded, bond split.
    ChallengeTimedOut = 1,
}

/// Funds released to `available` when a lease was settled.
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct Settlement {
    pub key: LeaseKey,
    pub outcome: SettlementOutcome,
    pub lessee_payout: i128,
    pub lessor_payout: i128,
}

/// Registry entry mapping an asset to its adjudicator instance.
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct Deployment {
    pub asset: Address,
    pub adjudicator: Address,
}

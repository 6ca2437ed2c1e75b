#![no_std]
pub mod creator;
pub mod errors;
pub mod merkle;
pub mod signature;
pub mod storage_keys;
pub mod types;
pub mod validation;

#[cfg(any(test, feature = "testutils"))]
pub mod testutils;

pub use errors::ContractError;
pub use storage_keys::*;
pub use types::*;

// Storage geometry
pub const BLOCK_SIZE: u64 = 1024; // bytes per stored data block

// Dispute timing
pub const ONE_DAY_SECONDS: u64 = 24 * 60 * 60;
pub const CHALLENGE_WINDOW_SECONDS: u64 = ONE_DAY_SECONDS;

// Due leases settled as a side effect of one ledger call
pub const MAX_SETTLEMENTS_PER_CALL: u32 = 4;

// Settlement policy: basis points (bps). 10000 bps = 100%.
pub const BPS_DENOMINATOR: u32 = 10_000;
pub const DEFAULT_PENALTY_TO_LESSEE_BPS: u32 = 5_000; // 50% of the bond on timeout

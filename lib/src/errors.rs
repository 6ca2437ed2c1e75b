use soroban_sdk::contracterror;

/// Every failure surfaced by the lease contracts.
///
/// Discriminants are part of the public interface: clients match on
/// `Error(Contract, #N)`, so never renumber existing variants.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ContractError {
    // Lifecycle
    AlreadyInitialized = 1,
    NotInitialized = 2,
    Unauthorized = 3,
    InvalidPolicy = 4,

    // Ledger
    InvalidAmount = 10,
    TransferFailed = 11,
    InsufficientHoldings = 12,
    Overflow = 13,
    InsufficientLocked = 14,

    // Sealing
    NonceZero = 20,
    LesseeSignatureInvalid = 21,
    LessorSignatureInvalid = 22,
    LesseeInsufficientBalance = 23,
    LessorInsufficientBalance = 24,
    LeaseAlreadyExists = 25,
    SealDeadlinePassed = 26,

    // Disputes
    LeaseNotFound = 30,
    ChallengeInProgress = 31,
    LeaseEndingOrEnded = 32,
    BlockOutOfRange = 33,
    InvalidNonce = 34,
    NotChallenged = 35,
    ChallengeExpired = 36,
    NotLessee = 37,
    NothingToSettle = 38,

    // Proofs
    ProofMissingData = 40,
    ProofTooMuchData = 41,
    ProofWrongHash = 42,
}

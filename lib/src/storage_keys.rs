use soroban_sdk::{symbol_short, Symbol};

pub const CREATOR_KEY: Symbol = symbol_short!("creator");
pub const DEPLOYMENTS_KEY: Symbol = symbol_short!("deploys");

// Event topics
pub const DEPOSITED_TOPIC: &str = "Deposited";
pub const WITHDRAWN_TOPIC: &str = "Withdrawn";
pub const LEASE_SEALED_TOPIC: &str = "LeaseSealed";
pub const CHALLENGED_TOPIC: &str = "Challenged";
pub const CHALLENGE_RESOLVED_TOPIC: &str = "ChallengeResolved";
pub const LEASE_SETTLED_TOPIC: &str = "LeaseSettled";
pub const DEPLOYED_TOPIC: &str = "Deployed";

#![no_std]


use lease_lib::{creator, ContractError, Deployment, DEPLOYED_TOPIC, DEPLOYMENTS_KEY};
use soroban_sdk::{contract, contractimpl, log, Address, Env, Symbol, Vec};

const INSTANCE_TTL_THRESHOLD: u32 = 518_400; // ~30 days
const INSTANCE_TTL_EXTEND: u32 = 1_036_800; // ~60 days

fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_EXTEND);
}

#[contract]
pub struct DeploymentRegistry;

#[contractimpl]
impl DeploymentRegistry {
    pub fn init_contract(env: Env, creator: Address) -> Result<(), ContractError> {
        creator.require_auth();
        creator::set_creator(&env, &creator)?;
        env.storage()
            .instance()
            .set(&DEPLOYMENTS_KEY, &Vec::<Deployment>::new(&env));
        bump_instance(&env);
        Ok(())
    }

    pub fn creator(env: Env) -> Result<Address, ContractError> {
        creator::get_creator(&env)
    }

    /// Point `asset` at `adjudicator`. A later registration for the same
    /// asset replaces the earlier one and keeps its position.
    pub fn register_deployment(
        env: Env,
        caller: Address,
        asset: Address,
        adjudicator: Address,
    ) -> Result<(), ContractError> {
        caller.require_auth();
        creator::verify_creator(&env, &caller)?;

        let mut deployments = Self::deployments(env.clone());
        let record = Deployment {
            asset: asset.clone(),
            adjudicator: adjudicator.clone(),
        };
        match deployments.iter().position(|d| d.asset == asset) {
            Some(i) => deployments.set(i as u32, record),
            None => deployments.push_back(record),
        }
        env.storage().instance().set(&DEPLOYMENTS_KEY, &deployments);
        bump_instance(&env);

        env.events().publish(
            (Symbol::new(&env, DEPLOYED_TOPIC), asset.clone()),
            adjudicator.clone(),
        );
        log!(&env, "deployment registered", asset, adjudicator);
        Ok(())
    }

    pub fn deployments(env: Env) -> Vec<Deployment> {
        env.storage()
            .instance()
            .get(&DEPLOYMENTS_KEY)
            .unwrap_or_else(|| Vec::new(&env))
    }

    pub fn adjudicator_for(env: Env, asset: Address) -> Option<Address> {
        Self::deployments(env)
            .iter()
            .find(|d| d.asset == asset)
            .map(|d| d.adjudicator)
    }
}

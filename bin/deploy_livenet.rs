//! Deploy the yield optimizer to Casper livenet/testnet using Odra livenet environment.
//!
//! Usage:
//!   cargo run --bin deploy_livenet --release
//!
//! Requires .env file with:
//!   ODRA_CASPER_LIVENET_SECRET_KEY_PATH=/path/to/secret_key.pem
//!   ODRA_CASPER_LIVENET_NODE_ADDRESS=https://node.testnet.casper.network
//!   ODRA_CASPER_LIVENET_CHAIN_NAME=casper-test
//!   ODRA_CASPER_LIVENET_PAYMENT_AMOUNT=200000000000
//!   YIELD_STAKING_PROTOCOL=hash-...
//!   YIELD_LENDING_PROTOCOL=hash-...

use odra::casper_types::Key;
use odra::host::{Deployer, HostRef};
use odra::prelude::*;

use yield_compounder_contracts::optimizer::{YieldOptimizer, YieldOptimizerInitArgs};

const DEFAULT_PAYMENT_AMOUNT: u64 = 200_000_000_000;

#[derive(Debug, thiserror::Error)]
enum DeployError {
    #[error("missing environment variable {0}")]
    MissingVar(&'static str),
    #[error("{var} is not a formatted Casper key: {value}")]
    InvalidKey { var: &'static str, value: String },
    #[error("{var} does not name an account or contract: {value}")]
    InvalidAddress { var: &'static str, value: String },
}

/// Read a formatted key (`hash-...` / `account-hash-...`) from the environment
fn address_from_env(var: &'static str) -> Result<Address, DeployError> {
    let value = std::env::var(var).map_err(|_| DeployError::MissingVar(var))?;
    let key = Key::from_formatted_str(&value).map_err(|_| DeployError::InvalidKey {
        var,
        value: value.clone(),
    })?;
    Address::try_from(key).map_err(|_| DeployError::InvalidAddress { var, value })
}

fn main() {
    // Load environment from .env file
    dotenv::dotenv().ok();

    if let Err(err) = run() {
        eprintln!("Deployment failed: {}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<(), DeployError> {
    println!("=== Yield Compounder Livenet Deployment ===");
    println!();

    let staking_protocol = address_from_env("YIELD_STAKING_PROTOCOL")?;
    let lending_protocol = address_from_env("YIELD_LENDING_PROTOCOL")?;

    // Initialize Odra livenet environment
    let env = odra_casper_livenet_env::env();

    // Configure payment amount for deployments/calls (required for Casper 2.0 txs)
    let payment_amount: u64 = std::env::var("ODRA_CASPER_LIVENET_PAYMENT_AMOUNT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_PAYMENT_AMOUNT);
    env.set_gas(payment_amount);

    let deployer = env.caller();
    println!("Deployer:          {:?}", deployer);
    println!("Staking protocol:  {:?}", staking_protocol);
    println!("Lending protocol:  {:?}", lending_protocol);
    println!();

    println!("Deploying YieldOptimizer...");
    let optimizer = YieldOptimizer::deploy(
        &env,
        YieldOptimizerInitArgs {
            staking_protocol,
            lending_protocol,
        },
    );
    let optimizer_addr = optimizer.address().clone();
    println!("YieldOptimizer deployed at: {:?}", optimizer_addr);

    println!();
    println!("=== Deployment Complete ===");
    println!();

    let chain_name = std::env::var("ODRA_CASPER_LIVENET_CHAIN_NAME").unwrap_or_default();
    let summary = serde_json::json!({
        "chain": chain_name,
        "deployer": format!("{:?}", deployer),
        "yield_optimizer": format!("{:?}", optimizer_addr),
        "staking_protocol": format!("{:?}", staking_protocol),
        "lending_protocol": format!("{:?}", lending_protocol),
    });
    println!("{}", summary);

    Ok(())
}

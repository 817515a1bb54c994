//! Yield Compounder Contracts
//!
//! Stakes a CEP-18 asset into an external staking pool, records the deposit,
//! and reinvests staking rewards into an external lending market.
//!
//! ## Architecture
//!
//! - **Holding**: transient in-transaction token value with exact splitting
//! - **Flows**: stake, manual compound and auto-compound, generic over the
//!   collaborator traits in `interfaces`
//! - **YieldOptimizer**: Odra contract exposing the flows, owning the stake
//!   ledger and binding collaborators to cross-contract calls
//!
//! ## Atomicity
//!
//! Every entry point runs as one Casper transaction. A failed split, pool,
//! market or token call reverts the whole call tree, so no partial state
//! (orphaned remainder, orphaned entry, claim without supply) is observable.

#![cfg_attr(target_arch = "wasm32", no_std)]

#[cfg(target_arch = "wasm32")]
extern crate alloc;

// Re-export odra for downstream usage
pub use odra;

// Core module declarations
pub mod types;
pub mod errors;
pub mod holding;
pub mod interfaces;
pub mod flows;

// Contract modules
pub mod optimizer;

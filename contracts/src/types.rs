//! Common types used across the yield compounder.

use odra::prelude::*;
use odra::casper_types::U256;

/// Proof that a principal staked `amount` into `pool_id` at `timestamp`.
///
/// Fields are write-once: an entry is built by a stake flow and then only read.
#[odra::odra_type]
pub struct StakeLedgerEntry {
    /// Unique entry id (starts at 1, never reused)
    id: u64,
    /// Staking pool the amount was forwarded to
    pool_id: Address,
    /// Amount forwarded to the pool
    amount: U256,
    /// Block time at creation
    timestamp: u64,
}

impl StakeLedgerEntry {
    pub(crate) fn new(id: u64, pool_id: Address, amount: U256, timestamp: u64) -> Self {
        Self {
            id,
            pool_id,
            amount,
            timestamp,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn pool_id(&self) -> Address {
        self.pool_id
    }

    pub fn amount(&self) -> U256 {
        self.amount
    }

    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }
}

/// Index key for the per-owner entry list.
#[odra::odra_type]
#[derive(Copy)]
pub struct OwnerEntryIndex {
    /// Owner address
    pub owner: Address,
    /// 0-based index into the owner's entry list
    pub index: u64,
}

/// External protocols the optimizer talks to
#[odra::odra_type]
pub struct OptimizerConfig {
    /// Staking protocol contract hosting the pools
    pub staking_protocol: Address,
    /// Lending protocol contract hosting the markets
    pub lending_protocol: Address,
}

/// Invocation context handed to every flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallContext {
    /// Immediate caller of the entry point
    pub principal: Address,
    /// Block time in milliseconds
    pub epoch: u64,
}

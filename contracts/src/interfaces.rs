//! Collaborator interfaces used by the flows.
//!
//! Flows in `crate::flows` are generic over these traits. The optimizer
//! contract implements them with cross-contract calls; tests substitute
//! in-memory fakes.

use odra::prelude::*;
use odra::casper_types::U256;
use crate::errors::YieldResult;
use crate::holding::Holding;
use crate::types::{CallContext, StakeLedgerEntry};

/// External staking pool protocol
pub trait StakingPool {
    /// Deposit the full value of `holding` into `pool_id`, credited to the caller.
    fn stake(&mut self, holding: Holding, pool_id: Address, ctx: &CallContext) -> YieldResult<()>;

    /// Accrued, unclaimed rewards of `wallet` in `pool_id`. No side effects.
    fn get_rewards(&self, wallet: Address, pool_id: Address, ctx: &CallContext) -> YieldResult<U256>;

    /// Withdraw exactly `amount` of `wallet`'s accrued rewards.
    fn claim_rewards(
        &mut self,
        wallet: Address,
        pool_id: Address,
        amount: U256,
        ctx: &CallContext,
    ) -> YieldResult<Holding>;
}

/// External lending market protocol
pub trait LendingMarket {
    /// Supply the full value of `holding` to `market_id` as liquidity of `on_behalf_of`.
    fn supply(
        &mut self,
        holding: Holding,
        market_id: Address,
        on_behalf_of: Address,
        ctx: &CallContext,
    ) -> YieldResult<()>;
}

/// Moves ownership of values to principals and allocates entry ids.
pub trait OwnershipLedger {
    fn next_entry_id(&mut self) -> u64;

    fn transfer_entry(&mut self, entry: StakeLedgerEntry, principal: Address) -> YieldResult<()>;

    fn transfer_holding(&mut self, holding: Holding, principal: Address) -> YieldResult<()>;
}

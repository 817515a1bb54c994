//! Stake and compounding flows.
//!
//! Each flow is one transactional unit: any `Err` is turned into a revert by
//! the caller, which rolls back every effect already performed in the same
//! call. Flows therefore never try to undo earlier steps themselves.

use odra::prelude::*;
use odra::casper_types::U256;
use crate::errors::YieldResult;
use crate::holding::Holding;
use crate::interfaces::{LendingMarket, OwnershipLedger, StakingPool};
use crate::types::{CallContext, StakeLedgerEntry};

/// Result of a successful stake
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StakeOutcome {
    /// Entry now owned by the principal
    pub entry: StakeLedgerEntry,
    /// Value handed back to the principal
    pub remainder: U256,
}

/// Result of a successful manual compound
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompoundOutcome {
    /// Value supplied to the market
    pub supplied: U256,
    /// Value handed back to the principal
    pub remainder: U256,
}

/// Stake `amount` out of `holding` into `pool_id` and record it.
pub fn stake<H>(
    host: &mut H,
    mut holding: Holding,
    amount: U256,
    pool_id: Address,
    ctx: &CallContext,
) -> YieldResult<StakeOutcome>
where
    H: StakingPool + OwnershipLedger,
{
    let staked = holding.split(amount)?;
    host.stake(staked, pool_id, ctx)?;

    let entry = StakeLedgerEntry::new(host.next_entry_id(), pool_id, amount, ctx.epoch);
    host.transfer_entry(entry.clone(), ctx.principal)?;

    let remainder = holding.value();
    host.transfer_holding(holding, ctx.principal)?;

    Ok(StakeOutcome { entry, remainder })
}

/// Supply `amount` out of `holding` to `lend_market`; the rest goes back to the principal.
///
/// No ledger entry is produced.
pub fn compound<H>(
    host: &mut H,
    mut holding: Holding,
    amount: U256,
    lend_market: Address,
    ctx: &CallContext,
) -> YieldResult<CompoundOutcome>
where
    H: LendingMarket + OwnershipLedger,
{
    let supplied = holding.split(amount)?;
    host.supply(supplied, lend_market, ctx.principal, ctx)?;

    let remainder = holding.value();
    host.transfer_holding(holding, ctx.principal)?;

    Ok(CompoundOutcome {
        supplied: amount,
        remainder,
    })
}

/// Claim all accrued rewards of `wallet` in `pool_id` and supply them to `lend_market`.
///
/// Returns the compounded amount. Zero rewards is a no-op.
pub fn auto_compound<H>(
    host: &mut H,
    wallet: Address,
    pool_id: Address,
    lend_market: Address,
    ctx: &CallContext,
) -> YieldResult<U256>
where
    H: StakingPool + LendingMarket,
{
    let accrued = host.get_rewards(wallet, pool_id, ctx)?;
    if accrued.is_zero() {
        return Ok(U256::zero());
    }

    let claimed = host.claim_rewards(wallet, pool_id, accrued, ctx)?;
    host.supply(claimed, lend_market, wallet, ctx)?;

    Ok(accrued)
}

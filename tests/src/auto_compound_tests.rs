//! Auto-compound flow: reward query, claim and supply.

use pretty_assertions::assert_eq;
use yield_compounder_contracts::errors::YieldError;

use crate::fixture::{units, Fixture, REWARD_RESERVE};

#[test]
fn test_no_rewards_is_repeatable_noop() {
    let mut f = Fixture::new();

    for _ in 0..2 {
        let amount = f.optimizer.auto_compound(f.user, f.pool_id, f.market_id);
        assert_eq!(amount, units(0));
    }

    assert_eq!(f.reward_token.balance_of(f.staking_address), units(REWARD_RESERVE));
    assert_eq!(f.reward_token.balance_of(f.lending_address), units(0));
    assert_eq!(f.lending.supplied_of(f.market_id, f.user), units(0));
}

#[test]
fn test_accrued_rewards_are_fully_reinvested() {
    let mut f = Fixture::new();
    f.staking.accrue_rewards(f.user, f.pool_id, units(25));

    let amount = f.optimizer.auto_compound(f.user, f.pool_id, f.market_id);

    assert_eq!(amount, units(25));
    assert_eq!(f.staking.get_rewards(f.user, f.pool_id), units(0));
    assert_eq!(f.lending.supplied_of(f.market_id, f.user), units(25));
    assert_eq!(f.lending.total_supplied(f.reward_asset), units(25));
    assert_eq!(f.reward_token.balance_of(f.lending_address), units(25));
    assert_eq!(f.reward_token.balance_of(f.staking_address), units(REWARD_RESERVE - 25));
    // Nothing reaches the wallet or stays in the optimizer
    assert_eq!(f.reward_token.balance_of(f.user), units(0));
    assert_eq!(f.reward_token.balance_of(f.optimizer_address), units(0));
    assert_eq!(f.optimizer.total_entries(), 0);

    // Rewards are gone, so a second run is a no-op
    assert_eq!(f.optimizer.auto_compound(f.user, f.pool_id, f.market_id), units(0));
    assert_eq!(f.lending.supplied_of(f.market_id, f.user), units(25));
}

#[test]
fn test_supply_failure_rolls_back_claim() {
    let mut f = Fixture::new();
    f.staking.accrue_rewards(f.user, f.pool_id, units(25));
    f.lending.set_paused(f.market_id, true);

    let result = f.optimizer.try_auto_compound(f.user, f.pool_id, f.market_id);

    assert_eq!(result, Err(YieldError::InvalidTarget.into()));
    assert_eq!(f.staking.get_rewards(f.user, f.pool_id), units(25));
    assert_eq!(f.reward_token.balance_of(f.staking_address), units(REWARD_RESERVE));
    assert_eq!(f.reward_token.balance_of(f.optimizer_address), units(0));
    assert_eq!(f.lending.supplied_of(f.market_id, f.user), units(0));
}

#[test]
fn test_paused_pool_blocks_claim() {
    let mut f = Fixture::new();
    f.staking.accrue_rewards(f.user, f.pool_id, units(25));
    f.staking.set_paused(f.pool_id, true);

    let result = f.optimizer.try_auto_compound(f.user, f.pool_id, f.market_id);

    assert_eq!(result, Err(YieldError::InvalidTarget.into()));
    assert_eq!(f.staking.get_rewards(f.user, f.pool_id), units(25));
}

#[test]
fn test_short_payout_is_rejected() {
    let mut f = Fixture::new();
    f.staking.accrue_rewards(f.user, f.pool_id, units(25));
    f.staking.set_claim_shortfall(units(1));

    let result = f.optimizer.try_auto_compound(f.user, f.pool_id, f.market_id);

    assert_eq!(result, Err(YieldError::InsufficientRewards.into()));
    assert_eq!(f.staking.get_rewards(f.user, f.pool_id), units(25));
    assert_eq!(f.reward_token.balance_of(f.staking_address), units(REWARD_RESERVE));
}

#[test]
fn test_stranger_cannot_compound_for_wallet() {
    let mut f = Fixture::new();
    f.staking.accrue_rewards(f.user, f.pool_id, units(25));

    f.env.set_caller(f.stranger);
    let result = f.optimizer.try_auto_compound(f.user, f.pool_id, f.market_id);

    assert_eq!(result, Err(YieldError::Unauthorized.into()));
    assert_eq!(f.staking.get_rewards(f.user, f.pool_id), units(25));
}

#[test]
fn test_approved_operator_compounds_for_wallet() {
    let mut f = Fixture::new();
    f.staking.accrue_rewards(f.user, f.pool_id, units(25));
    f.optimizer.set_operator(f.keeper, true);

    f.env.set_caller(f.keeper);
    let amount = f.optimizer.auto_compound(f.user, f.pool_id, f.market_id);

    assert_eq!(amount, units(25));
    assert_eq!(f.lending.supplied_of(f.market_id, f.user), units(25));
    assert_eq!(f.lending.supplied_of(f.market_id, f.keeper), units(0));
}

#[test]
fn test_revoked_operator_is_rejected() {
    let mut f = Fixture::new();
    f.staking.accrue_rewards(f.user, f.pool_id, units(25));
    f.optimizer.set_operator(f.keeper, true);
    f.optimizer.set_operator(f.keeper, false);

    f.env.set_caller(f.keeper);
    let result = f.optimizer.try_auto_compound(f.user, f.pool_id, f.market_id);

    assert_eq!(result, Err(YieldError::Unauthorized.into()));
}

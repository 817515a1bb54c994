//! Yield Optimizer Contract
//!
//! Entry point of the protocol. Handles:
//! - Staking a CEP-18 holding into an external staking pool, with a ledger entry
//! - Manual compounding of a reward holding into an external lending market
//! - Automated claim-and-supply of accrued staking rewards
//!
//! Holdings are pulled from the caller with `transfer_from` (the caller must
//! approve this contract first) and forwarded by transferring the tokens to
//! the target protocol before notifying it. Every entry point is atomic: a
//! failed step reverts the whole call.

use odra::prelude::*;
use odra::casper_types::{U256, runtime_args};
use odra::CallDef;
use crate::errors::{YieldError, YieldResult};
use crate::flows;
use crate::holding::Holding;
use crate::interfaces::{LendingMarket, OwnershipLedger, StakingPool};
use crate::types::{CallContext, OptimizerConfig, OwnerEntryIndex, StakeLedgerEntry};

/// Emitted when a stake entry is created
#[odra::event]
pub struct Staked {
    pub entry_id: u64,
    pub owner: Address,
    pub pool_id: Address,
    pub amount: U256,
    pub remainder: U256,
    pub timestamp: u64,
}

/// Emitted when a holding is manually supplied to a lending market
#[odra::event]
pub struct Compounded {
    pub principal: Address,
    pub lend_market: Address,
    pub amount: U256,
    pub remainder: U256,
}

/// Emitted when accrued rewards are claimed and supplied
#[odra::event]
pub struct AutoCompounded {
    pub wallet: Address,
    pub pool_id: Address,
    pub lend_market: Address,
    pub amount: U256,
}

/// Emitted when a wallet approves or revokes a compounding operator
#[odra::event]
pub struct OperatorUpdated {
    pub wallet: Address,
    pub operator: Address,
    pub approved: bool,
}

/// Yield Optimizer Contract
#[odra::module(events = [Staked, Compounded, AutoCompounded, OperatorUpdated])]
pub struct YieldOptimizer {
    /// External protocol addresses
    config: Var<OptimizerConfig>,
    /// Next entry id (starts at 1)
    next_entry_id: Var<u64>,
    /// Stake ledger entries by id
    entries: Mapping<u64, StakeLedgerEntry>,
    /// Owner of each entry
    entry_owners: Mapping<u64, Address>,
    /// Entry count per owner
    owner_entry_count: Mapping<Address, u64>,
    /// Mapping from (owner, index) to entry id for enumeration
    owner_entries: Mapping<OwnerEntryIndex, u64>,
    /// Operators allowed to auto-compound for a wallet: (wallet, operator) -> approved
    operators: Mapping<(Address, Address), bool>,
}

#[odra::module]
impl YieldOptimizer {
    /// Initialize with the staking and lending protocol contracts
    pub fn init(&mut self, staking_protocol: Address, lending_protocol: Address) {
        if staking_protocol == lending_protocol {
            self.env().revert(YieldError::InvalidConfig);
        }
        self.config.set(OptimizerConfig {
            staking_protocol,
            lending_protocol,
        });
        self.next_entry_id.set(1);
    }

    // ========== Flows ==========

    /// Stake `amount` of a `holding`-sized deposit of `asset` into `pool_id`.
    ///
    /// Pulls `holding` tokens from the caller, stakes `amount` and returns the
    /// rest. Returns the id of the new stake entry, owned by the caller.
    pub fn stake(&mut self, asset: Address, holding: U256, amount: U256, pool_id: Address) -> u64 {
        let ctx = self.context();
        let deposit = self.take_holding(asset, ctx.principal, holding);

        let outcome = match flows::stake(self, deposit, amount, pool_id, &ctx) {
            Ok(outcome) => outcome,
            Err(error) => self.env().revert(error),
        };

        self.env().emit_event(Staked {
            entry_id: outcome.entry.id(),
            owner: ctx.principal,
            pool_id,
            amount,
            remainder: outcome.remainder,
            timestamp: outcome.entry.timestamp(),
        });

        outcome.entry.id()
    }

    /// Supply `amount` of a `holding`-sized deposit of `asset` to `lend_market`.
    ///
    /// The rest goes back to the caller. Returns the supplied amount.
    pub fn compound(&mut self, asset: Address, holding: U256, amount: U256, lend_market: Address) -> U256 {
        let ctx = self.context();
        let deposit = self.take_holding(asset, ctx.principal, holding);

        let outcome = match flows::compound(self, deposit, amount, lend_market, &ctx) {
            Ok(outcome) => outcome,
            Err(error) => self.env().revert(error),
        };

        self.env().emit_event(Compounded {
            principal: ctx.principal,
            lend_market,
            amount: outcome.supplied,
            remainder: outcome.remainder,
        });

        outcome.supplied
    }

    /// Claim `wallet`'s accrued rewards in `pool_id` and supply them to `lend_market`.
    ///
    /// Callable by the wallet or an approved operator. Returns the compounded
    /// amount; zero rewards is a no-op.
    pub fn auto_compound(&mut self, wallet: Address, pool_id: Address, lend_market: Address) -> U256 {
        let ctx = self.context();
        self.require_wallet_or_operator(wallet, ctx.principal);

        let amount = match flows::auto_compound(self, wallet, pool_id, lend_market, &ctx) {
            Ok(amount) => amount,
            Err(error) => self.env().revert(error),
        };

        if !amount.is_zero() {
            self.env().emit_event(AutoCompounded {
                wallet,
                pool_id,
                lend_market,
                amount,
            });
        }

        amount
    }

    // ========== Operators ==========

    /// Approve or revoke `operator` to auto-compound for the caller
    pub fn set_operator(&mut self, operator: Address, approved: bool) {
        let wallet = self.env().caller();
        self.operators.set(&(wallet, operator), approved);
        self.env().emit_event(OperatorUpdated {
            wallet,
            operator,
            approved,
        });
    }

    /// Check if `operator` may auto-compound for `wallet`
    pub fn is_operator(&self, wallet: Address, operator: Address) -> bool {
        self.operators.get(&(wallet, operator)).unwrap_or(false)
    }

    // ========== View Functions ==========

    /// Get a stake entry by id
    pub fn get_entry(&self, entry_id: u64) -> Option<StakeLedgerEntry> {
        self.entries.get(&entry_id)
    }

    /// Get the owner of a stake entry
    pub fn owner_of(&self, entry_id: u64) -> Option<Address> {
        self.entry_owners.get(&entry_id)
    }

    /// Number of entries owned by `owner`
    pub fn entry_count_of(&self, owner: Address) -> u64 {
        self.owner_entry_count.get(&owner).unwrap_or(0)
    }

    /// Entry id at `index` in `owner`'s list
    pub fn entry_id_of(&self, owner: Address, index: u64) -> Option<u64> {
        self.owner_entries.get(&OwnerEntryIndex { owner, index })
    }

    /// Total entries ever created
    pub fn total_entries(&self) -> u64 {
        self.next_entry_id.get().unwrap_or(1) - 1
    }

    /// Get protocol configuration
    pub fn get_config(&self) -> Option<OptimizerConfig> {
        self.config.get()
    }

    // ========== Internal Functions ==========

    fn context(&self) -> CallContext {
        CallContext {
            principal: self.env().caller(),
            epoch: self.env().get_block_time(),
        }
    }

    fn require_config(&self) -> OptimizerConfig {
        match self.config.get() {
            Some(config) => config,
            None => self.env().revert(YieldError::InvalidConfig),
        }
    }

    fn require_wallet_or_operator(&self, wallet: Address, caller: Address) {
        if caller != wallet && !self.is_operator(wallet, caller) {
            self.env().revert(YieldError::Unauthorized);
        }
    }

    /// Pull `value` of `asset` from `owner` into a holding owned by this contract
    fn take_holding(&self, asset: Address, owner: Address, value: U256) -> Holding {
        if !value.is_zero() {
            let args = runtime_args! {
                "owner" => owner,
                "recipient" => self.env().self_address(),
                "amount" => value
            };
            let call_def = CallDef::new("transfer_from", true, args);
            let success: bool = self.env().call_contract(asset, call_def);
            if !success {
                self.env().revert(YieldError::TokenTransferFailed);
            }
        }
        Holding::new(asset, value)
    }

    /// Move the tokens behind `holding` from this contract to `recipient`
    fn send_tokens(&self, holding: Holding, recipient: Address) -> YieldResult<()> {
        let (asset, value) = holding.into_parts();
        if value.is_zero() {
            return Ok(());
        }
        let args = runtime_args! {
            "recipient" => recipient,
            "amount" => value
        };
        let call_def = CallDef::new("transfer", true, args);
        let success: bool = self.env().call_contract(asset, call_def);
        if success {
            Ok(())
        } else {
            Err(YieldError::TokenTransferFailed)
        }
    }

    fn token_balance(&self, asset: Address) -> U256 {
        let args = runtime_args! {
            "account" => self.env().self_address()
        };
        let call_def = CallDef::new("balance_of", false, args);
        self.env().call_contract(asset, call_def)
    }
}

impl StakingPool for YieldOptimizer {
    fn stake(&mut self, holding: Holding, pool_id: Address, ctx: &CallContext) -> YieldResult<()> {
        let staking_protocol = self.require_config().staking_protocol;
        let (asset, amount) = (holding.asset(), holding.value());
        self.send_tokens(holding, staking_protocol)?;

        let args = runtime_args! {
            "pool_id" => pool_id,
            "asset" => asset,
            "amount" => amount,
            "beneficiary" => ctx.principal
        };
        let call_def = CallDef::new("stake", true, args);
        self.env().call_contract::<()>(staking_protocol, call_def);
        Ok(())
    }

    fn get_rewards(&self, wallet: Address, pool_id: Address, _ctx: &CallContext) -> YieldResult<U256> {
        let staking_protocol = self.require_config().staking_protocol;
        let args = runtime_args! {
            "wallet" => wallet,
            "pool_id" => pool_id
        };
        let call_def = CallDef::new("get_rewards", false, args);
        Ok(self.env().call_contract(staking_protocol, call_def))
    }

    fn claim_rewards(
        &mut self,
        wallet: Address,
        pool_id: Address,
        amount: U256,
        _ctx: &CallContext,
    ) -> YieldResult<Holding> {
        let staking_protocol = self.require_config().staking_protocol;

        let args = runtime_args! {
            "pool_id" => pool_id
        };
        let call_def = CallDef::new("reward_asset", false, args);
        let reward_asset: Address = self.env().call_contract(staking_protocol, call_def);

        let balance_before = self.token_balance(reward_asset);

        let args = runtime_args! {
            "wallet" => wallet,
            "pool_id" => pool_id,
            "amount" => amount
        };
        let call_def = CallDef::new("claim_rewards", true, args);
        self.env().call_contract::<()>(staking_protocol, call_def);

        let balance_after = self.token_balance(reward_asset);
        if balance_after < balance_before || balance_after - balance_before < amount {
            return Err(YieldError::InsufficientRewards);
        }

        Ok(Holding::new(reward_asset, amount))
    }
}

impl LendingMarket for YieldOptimizer {
    fn supply(
        &mut self,
        holding: Holding,
        market_id: Address,
        on_behalf_of: Address,
        _ctx: &CallContext,
    ) -> YieldResult<()> {
        let lending_protocol = self.require_config().lending_protocol;
        let (asset, amount) = (holding.asset(), holding.value());
        self.send_tokens(holding, lending_protocol)?;

        let args = runtime_args! {
            "market_id" => market_id,
            "asset" => asset,
            "amount" => amount,
            "on_behalf_of" => on_behalf_of
        };
        let call_def = CallDef::new("supply", true, args);
        self.env().call_contract::<()>(lending_protocol, call_def);
        Ok(())
    }
}

impl OwnershipLedger for YieldOptimizer {
    fn next_entry_id(&mut self) -> u64 {
        let id = self.next_entry_id.get().unwrap_or(1);
        self.next_entry_id.set(id.saturating_add(1));
        id
    }

    fn transfer_entry(&mut self, entry: StakeLedgerEntry, principal: Address) -> YieldResult<()> {
        let entry_id = entry.id();
        self.entries.set(&entry_id, entry);
        self.entry_owners.set(&entry_id, principal);

        let count = self.owner_entry_count.get(&principal).unwrap_or(0);
        let index = OwnerEntryIndex {
            owner: principal,
            index: count,
        };
        self.owner_entries.set(&index, entry_id);
        self.owner_entry_count.set(&principal, count + 1);
        Ok(())
    }

    fn transfer_holding(&mut self, holding: Holding, principal: Address) -> YieldResult<()> {
        self.send_tokens(holding, principal)
    }
}

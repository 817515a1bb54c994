//! Transient fungible-asset holdings.
//!
//! A `Holding` is the in-transaction view of CEP-18 tokens the optimizer
//! currently owns on behalf of a flow. It is deliberately not `Clone`: value
//! only moves by splitting or by being consumed by a collaborator.

use odra::prelude::*;
use odra::casper_types::U256;
use crate::errors::{YieldError, YieldResult};

/// A quantity of one fungible asset.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "a holding must be forwarded or transferred"]
pub struct Holding {
    asset: Address,
    value: U256,
}

impl Holding {
    pub fn new(asset: Address, value: U256) -> Self {
        Self { asset, value }
    }

    /// Token contract of the held asset
    pub fn asset(&self) -> Address {
        self.asset
    }

    pub fn value(&self) -> U256 {
        self.value
    }

    /// Split off exactly `amount`, leaving the remainder in `self`.
    ///
    /// Fails with `InsufficientBalance` when `amount` exceeds the value; `self`
    /// is left untouched in that case.
    pub fn split(&mut self, amount: U256) -> YieldResult<Holding> {
        if amount > self.value {
            return Err(YieldError::InsufficientBalance);
        }
        self.value = self.value - amount;
        Ok(Holding {
            asset: self.asset,
            value: amount,
        })
    }

    /// Consume the holding, yielding its asset and value.
    pub fn into_parts(self) -> (Address, U256) {
        (self.asset, self.value)
    }
}

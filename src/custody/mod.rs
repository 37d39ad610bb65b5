//! Custody Adapters
//!
//! The asset-transfer mechanism that moves value in and out of the pool's
//! custody. The pool calls into it but never implements it.

pub mod memory;

pub use memory::MemoryCustody;

use crate::core_types::{AccountId, Amount, AssetId};
use std::fmt::Debug;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CustodyError {
    #[error("Insufficient funds at source")]
    InsufficientFunds,
    #[error("Transfer rejected: {0}")]
    Rejected(String),
}

/// Custody adapter trait
///
/// A call that returns `Err` must not have moved anything.
pub trait CustodyAdapter: Send + Sync + Debug {
    /// Get adapter name for logging
    fn name(&self) -> &'static str;

    /// Move `amount` of `asset` from the external holder `from` into custody
    fn transfer_in(&self, asset: AssetId, from: AccountId, amount: Amount)
    -> Result<(), CustodyError>;

    /// Move `amount` of `asset` out of custody to `to`
    fn transfer_out(&self, asset: AssetId, to: AccountId, amount: Amount)
    -> Result<(), CustodyError>;

    /// Total custodial holding of `asset`
    fn balance_held(&self, asset: AssetId) -> Amount;
}

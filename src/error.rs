//! Ledger Error Types
//!
//! Every failure aborts the enclosing operation with no state change.
//! Nothing here is retried by the ledger; callers own retry policy.

use crate::balance::BalanceError;
use crate::core_types::{Amount, AssetId};
use crate::custody::CustodyError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    // === Access Errors ===
    #[error("Caller is not the administrator")]
    Unauthorized,

    // === Asset Errors ===
    #[error("Invalid asset identifier")]
    InvalidAsset,

    #[error("Asset not supported: {0}")]
    UnsupportedAsset(AssetId),

    #[error("Cannot swap an asset into itself")]
    SameAsset,

    #[error("Exchange rate not set: {from} -> {to}")]
    RateNotSet { from: AssetId, to: AssetId },

    // === Amount Errors ===
    #[error("Amount must be greater than zero")]
    ZeroAmount,

    #[error("Insufficient balance: available {available}, requested {requested}")]
    InsufficientBalance { available: Amount, requested: Amount },

    #[error("Amount would cause overflow")]
    Overflow,

    // === Collaborator Errors ===
    #[error("Transfer failed: {0}")]
    TransferFailed(#[from] CustodyError),

    // === Execution Errors ===
    #[error("Another ledger operation is in progress")]
    Reentrant,
}

impl LedgerError {
    /// Stable error code for callers and logs
    pub fn code(&self) -> &'static str {
        match self {
            LedgerError::Unauthorized => "UNAUTHORIZED",
            LedgerError::InvalidAsset => "INVALID_ASSET",
            LedgerError::UnsupportedAsset(_) => "UNSUPPORTED_ASSET",
            LedgerError::SameAsset => "SAME_ASSET",
            LedgerError::RateNotSet { .. } => "RATE_NOT_SET",
            LedgerError::ZeroAmount => "ZERO_AMOUNT",
            LedgerError::InsufficientBalance { .. } => "INSUFFICIENT_BALANCE",
            LedgerError::Overflow => "OVERFLOW",
            LedgerError::TransferFailed(_) => "TRANSFER_FAILED",
            LedgerError::Reentrant => "REENTRANT",
        }
    }
}

impl From<BalanceError> for LedgerError {
    fn from(err: BalanceError) -> Self {
        match err {
            BalanceError::Insufficient {
                available,
                requested,
            } => LedgerError::InsufficientBalance {
                available,
                requested,
            },
            BalanceError::Overflow => LedgerError::Overflow,
        }
    }
}

pub type Result<T> = std::result::Result<T, LedgerError>;

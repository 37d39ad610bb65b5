/// ENFORCED BALANCE TYPE - Used by the liquidity pool
///
/// This is the SINGLE source of truth for balance arithmetic.
/// ALL balance mutations MUST go through these methods.
///
/// # Enforcement Strategy:
/// 1. Fields are PRIVATE - no direct access
/// 2. All mutations return Result - errors are explicit
/// 3. Version auto-increments - audit trail
/// 4. checked_add/sub - overflow and underflow protection
use crate::core_types::Amount;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BalanceError {
    #[error("insufficient funds: available {available}, requested {requested}")]
    Insufficient { available: Amount, requested: Amount },

    #[error("credit overflow")]
    Overflow,
}

/// Balance of one asset held by one account
///
/// # Invariants (ENFORCED by private fields):
/// - amount is never negative (unsigned + checked subtraction)
/// - version increments on every successful mutation
/// - a failed mutation leaves both fields untouched
///
/// # Usage:
/// ```ignore
/// let mut balance = Balance::default();
/// balance.credit(1000)?;   // amount = 1000, version = 1
/// balance.debit(400)?;     // amount = 600, version = 2
/// ```
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Balance {
    amount: Amount, // PRIVATE - ONLY modified through credit/debit
    version: u64,   // PRIVATE - incremented on each mutation
}

impl Balance {
    // ============================================================
    // READ-ONLY GETTERS
    // ============================================================

    #[inline(always)]
    pub const fn amount(&self) -> Amount {
        self.amount
    }

    #[inline(always)]
    pub const fn version(&self) -> u64 {
        self.version
    }

    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.amount == 0
    }

    // ============================================================
    // VALIDATED MUTATIONS
    // ============================================================

    /// Add funds
    ///
    /// # Errors
    /// - `Overflow` if the result does not fit in `Amount`
    pub fn credit(&mut self, amount: Amount) -> Result<(), BalanceError> {
        self.amount = self.checked_credit(amount)?;
        self.version = self.version.wrapping_add(1);
        Ok(())
    }

    /// Remove funds
    ///
    /// # Errors
    /// - `Insufficient` if amount exceeds the balance
    pub fn debit(&mut self, amount: Amount) -> Result<(), BalanceError> {
        self.amount = self.checked_debit(amount)?;
        self.version = self.version.wrapping_add(1);
        Ok(())
    }

    /// Balance after a credit, without applying it
    pub fn checked_credit(&self, amount: Amount) -> Result<Amount, BalanceError> {
        self.amount.checked_add(amount).ok_or(BalanceError::Overflow)
    }

    /// Balance after a debit, without applying it
    pub fn checked_debit(&self, amount: Amount) -> Result<Amount, BalanceError> {
        self.amount
            .checked_sub(amount)
            .ok_or(BalanceError::Insufficient {
                available: self.amount,
                requested: amount,
            })
    }
}

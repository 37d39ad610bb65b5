use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

pub use crate::balance::{Balance, BalanceError};
use crate::core_types::{AccountId, Amount, AssetId};

/// Account represents one holder's balances across multiple assets.
///
/// # Data Structure:
/// Asset ids are opaque addresses, so balances live in an `FxHashMap`
/// keyed by asset. A slot is created on first credit and never removed;
/// an empty slot reads the same as a missing one.
///
/// # Invariants (enforced by private fields):
/// 1. account_id is immutable after creation
/// 2. balances can only be accessed through the balance methods
/// 3. All mutations go through validated operations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    account_id: AccountId,
    balances: FxHashMap<AssetId, Balance>,
}

impl Account {
    pub fn new(account_id: AccountId) -> Self {
        Self {
            account_id,
            balances: FxHashMap::default(),
        }
    }

    #[inline(always)]
    pub fn account_id(&self) -> AccountId {
        self.account_id
    }

    /// Current amount of an asset, zero if never credited.
    #[inline]
    pub fn amount(&self, asset: &AssetId) -> Amount {
        self.balances.get(asset).map(Balance::amount).unwrap_or(0)
    }

    pub fn get_balance(&self, asset: &AssetId) -> Option<&Balance> {
        self.balances.get(asset)
    }

    /// Credit funds to an asset.
    /// This is the ONLY way to create a new asset slot.
    pub fn credit(&mut self, asset: AssetId, amount: Amount) -> Result<(), BalanceError> {
        self.balances.entry(asset).or_default().credit(amount)
    }

    /// Debit funds from an asset.
    ///
    /// A missing slot behaves as a zero balance.
    pub fn debit(&mut self, asset: &AssetId, amount: Amount) -> Result<(), BalanceError> {
        match self.balances.get_mut(asset) {
            Some(balance) => balance.debit(amount),
            None => Balance::default().debit(amount),
        }
    }

    /// Check that a credit would succeed without applying it
    pub fn can_credit(&self, asset: &AssetId, amount: Amount) -> Result<(), BalanceError> {
        self.balances
            .get(asset)
            .copied()
            .unwrap_or_default()
            .checked_credit(amount)
            .map(|_| ())
    }

    /// Debit `amount_in` of one asset and credit `amount_out` of another.
    ///
    /// Atomic - both legs are validated before either is applied, so an
    /// error leaves the account untouched.
    pub fn settle_swap(
        &mut self,
        asset_in: AssetId,
        amount_in: Amount,
        asset_out: AssetId,
        amount_out: Amount,
    ) -> Result<(), BalanceError> {
        debug_assert_ne!(asset_in, asset_out);

        // Validate first
        self.balances
            .get(&asset_in)
            .copied()
            .unwrap_or_default()
            .checked_debit(amount_in)?;
        self.can_credit(&asset_out, amount_out)?;

        // Apply
        self.debit(&asset_in, amount_in)?;
        self.credit(asset_out, amount_out)
    }

    /// Put back a previously captured balance, version included.
    /// Used to undo a debit whose payout failed.
    pub(crate) fn restore(&mut self, asset: AssetId, balance: Balance) {
        self.balances.insert(asset, balance);
    }

    /// Read-only iterator over all asset slots
    pub fn balances(&self) -> impl Iterator<Item = (&AssetId, &Balance)> {
        self.balances.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::Address;

    const A: AssetId = Address::from_low_u8(0xa);
    const B: AssetId = Address::from_low_u8(0xb);

    #[test]
    fn test_missing_slot_reads_zero() {
        let account = Account::new(Address::from_low_u8(1));
        assert_eq!(account.amount(&A), 0);
        assert!(account.get_balance(&A).is_none());
    }

    #[test]
    fn test_debit_missing_slot_is_insufficient() {
        let mut account = Account::new(Address::from_low_u8(1));
        assert_eq!(
            account.debit(&A, 1),
            Err(BalanceError::Insufficient {
                available: 0,
                requested: 1
            })
        );
        assert!(account.get_balance(&A).is_none());
    }

    #[test]
    fn test_settle_swap_moves_both_legs() {
        let mut account = Account::new(Address::from_low_u8(1));
        account.credit(A, 100).unwrap();

        account.settle_swap(A, 10, B, 20).unwrap();
        assert_eq!(account.amount(&A), 90);
        assert_eq!(account.amount(&B), 20);
    }

    #[test]
    fn test_settle_swap_is_atomic_on_overflow() {
        let mut account = Account::new(Address::from_low_u8(1));
        account.credit(A, 100).unwrap();
        account.credit(B, Amount::MAX).unwrap();

        assert_eq!(
            account.settle_swap(A, 10, B, 1),
            Err(BalanceError::Overflow)
        );
        assert_eq!(account.amount(&A), 100);
        assert_eq!(account.amount(&B), Amount::MAX);
    }

    #[test]
    fn test_settle_swap_is_atomic_on_insufficient() {
        let mut account = Account::new(Address::from_low_u8(1));
        account.credit(A, 5).unwrap();

        assert!(account.settle_swap(A, 10, B, 20).is_err());
        assert_eq!(account.amount(&A), 5);
        assert_eq!(account.amount(&B), 0);
    }
}

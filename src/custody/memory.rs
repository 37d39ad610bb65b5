//! In-memory custody
//!
//! Models external wallets and the pool's custodial holdings in process.
//! Used by the demo binary and the test suites; failure switches let tests
//! force either transfer direction to fail.

use super::{CustodyAdapter, CustodyError};
use crate::core_types::{AccountId, Amount, AssetId};
use rustc_hash::FxHashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
struct Vault {
    /// Funds held by external accounts, outside custody
    wallets: FxHashMap<(AccountId, AssetId), Amount>,
    /// Funds held by the pool
    held: FxHashMap<AssetId, Amount>,
}

#[derive(Debug, Default)]
pub struct MemoryCustody {
    vault: Mutex<Vault>,
    fail_transfer_in: AtomicBool,
    fail_transfer_out: AtomicBool,
    transfer_in_count: AtomicUsize,
    transfer_out_count: AtomicUsize,
}

impl MemoryCustody {
    pub fn new() -> Self {
        Self::default()
    }

    fn vault(&self) -> MutexGuard<'_, Vault> {
        self.vault.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Create funds in an external wallet
    pub fn mint(&self, holder: AccountId, asset: AssetId, amount: Amount) {
        let mut vault = self.vault();
        let slot = vault.wallets.entry((holder, asset)).or_insert(0);
        *slot = slot.saturating_add(amount);
    }

    /// Funds an external holder has outside custody
    pub fn wallet_balance(&self, holder: AccountId, asset: AssetId) -> Amount {
        self.vault()
            .wallets
            .get(&(holder, asset))
            .copied()
            .unwrap_or(0)
    }

    pub fn set_fail_transfer_in(&self, fail: bool) {
        self.fail_transfer_in.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_transfer_out(&self, fail: bool) {
        self.fail_transfer_out.store(fail, Ordering::SeqCst);
    }

    /// Number of successful inbound transfers
    pub fn transfer_in_count(&self) -> usize {
        self.transfer_in_count.load(Ordering::SeqCst)
    }

    /// Number of successful outbound transfers
    pub fn transfer_out_count(&self) -> usize {
        self.transfer_out_count.load(Ordering::SeqCst)
    }
}

impl CustodyAdapter for MemoryCustody {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn transfer_in(
        &self,
        asset: AssetId,
        from: AccountId,
        amount: Amount,
    ) -> Result<(), CustodyError> {
        if self.fail_transfer_in.load(Ordering::SeqCst) {
            return Err(CustodyError::Rejected("transfer_in disabled".into()));
        }

        let mut vault = self.vault();
        let wallet = vault.wallets.get(&(from, asset)).copied().unwrap_or(0);
        let remaining = wallet
            .checked_sub(amount)
            .ok_or(CustodyError::InsufficientFunds)?;
        let held = vault.held.get(&asset).copied().unwrap_or(0);
        let new_held = held
            .checked_add(amount)
            .ok_or_else(|| CustodyError::Rejected("custody overflow".into()))?;

        vault.wallets.insert((from, asset), remaining);
        vault.held.insert(asset, new_held);
        self.transfer_in_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn transfer_out(
        &self,
        asset: AssetId,
        to: AccountId,
        amount: Amount,
    ) -> Result<(), CustodyError> {
        if self.fail_transfer_out.load(Ordering::SeqCst) {
            return Err(CustodyError::Rejected("transfer_out disabled".into()));
        }

        let mut vault = self.vault();
        let held = vault.held.get(&asset).copied().unwrap_or(0);
        let remaining = held
            .checked_sub(amount)
            .ok_or(CustodyError::InsufficientFunds)?;

        vault.held.insert(asset, remaining);
        let wallet = vault.wallets.entry((to, asset)).or_insert(0);
        *wallet = wallet.saturating_add(amount);
        self.transfer_out_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn balance_held(&self, asset: AssetId) -> Amount {
        self.vault().held.get(&asset).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::Address;

    const TOKEN: AssetId = Address::from_low_u8(0xa);
    const ALICE: AccountId = Address::from_low_u8(1);
    const BOB: AccountId = Address::from_low_u8(2);

    #[test]
    fn test_transfer_in_moves_wallet_to_custody() {
        let custody = MemoryCustody::new();
        custody.mint(ALICE, TOKEN, 100);

        custody.transfer_in(TOKEN, ALICE, 60).unwrap();
        assert_eq!(custody.wallet_balance(ALICE, TOKEN), 40);
        assert_eq!(custody.balance_held(TOKEN), 60);
        assert_eq!(custody.transfer_in_count(), 1);
    }

    #[test]
    fn test_transfer_in_insufficient_wallet() {
        let custody = MemoryCustody::new();
        custody.mint(ALICE, TOKEN, 10);

        assert_eq!(
            custody.transfer_in(TOKEN, ALICE, 11),
            Err(CustodyError::InsufficientFunds)
        );
        assert_eq!(custody.wallet_balance(ALICE, TOKEN), 10);
        assert_eq!(custody.balance_held(TOKEN), 0);
        assert_eq!(custody.transfer_in_count(), 0);
    }

    #[test]
    fn test_transfer_out_pays_recipient() {
        let custody = MemoryCustody::new();
        custody.mint(ALICE, TOKEN, 100);
        custody.transfer_in(TOKEN, ALICE, 100).unwrap();

        custody.transfer_out(TOKEN, BOB, 30).unwrap();
        assert_eq!(custody.balance_held(TOKEN), 70);
        assert_eq!(custody.wallet_balance(BOB, TOKEN), 30);
    }

    #[test]
    fn test_transfer_out_more_than_held() {
        let custody = MemoryCustody::new();
        assert_eq!(
            custody.transfer_out(TOKEN, BOB, 1),
            Err(CustodyError::InsufficientFunds)
        );
    }

    #[test]
    fn test_failure_switches() {
        let custody = MemoryCustody::new();
        custody.mint(ALICE, TOKEN, 100);

        custody.set_fail_transfer_in(true);
        assert!(matches!(
            custody.transfer_in(TOKEN, ALICE, 1),
            Err(CustodyError::Rejected(_))
        ));
        custody.set_fail_transfer_in(false);
        custody.transfer_in(TOKEN, ALICE, 50).unwrap();

        custody.set_fail_transfer_out(true);
        assert!(custody.transfer_out(TOKEN, ALICE, 1).is_err());
        assert_eq!(custody.balance_held(TOKEN), 50);
    }
}

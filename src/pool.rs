//! LiquidityPool - Ledger & Exchange Engine
//!
//! The authoritative state machine for custodial balances.
//!
//! # Responsibilities
//!
//! 1. **Balance State** - per (account, asset) amounts and per-asset totals
//! 2. **Exchange** - fixed-rate swaps between supported assets
//! 3. **Administration** - asset registry, rate table, emergency recovery
//!
//! # Ordering
//!
//! ```text
//! deposit:   validate → custody.transfer_in  → credit
//! withdraw:  validate → debit → custody.transfer_out  (restore on failure)
//! swap:      validate → debit + credit (no custody call)
//! emergency: custody.transfer_out(all held) → owner  (balances untouched)
//! ```
//!
//! # Serialization
//!
//! Every mutating operation holds the [`ReentrancyGuard`] from start to
//! finish; operations from other threads wait their turn and reads wait
//! for the running operation to finish. A custody adapter that calls back
//! into the pool from inside an operation gets `LedgerError::Reentrant`.
//! The state mutex is never held across a custody call.

use crate::account::Account;
use crate::audit::AuditWriter;
use crate::balance::Balance;
use crate::config::PoolConfig;
use crate::core_types::{AccountId, Amount, AssetId, Rate, SeqNum};
use crate::custody::CustodyAdapter;
use crate::error::{LedgerError, Result};
use crate::events::{EventKind, PoolEvent};
use crate::guard::ReentrancyGuard;
use crate::money::parse_units_allow_zero;
use crate::rates::{RATE_DECIMALS, RateTable, convert};
use crate::registry::AssetRegistry;

use rustc_hash::FxHashMap;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, error, info, warn};

/// Events kept in memory by default; older ones are dropped first
pub const DEFAULT_EVENT_CAPACITY: usize = 10_000;

/// Mutable ledger state, only touched under the state mutex
#[derive(Debug)]
struct PoolState {
    registry: AssetRegistry,
    rates: RateTable,
    accounts: FxHashMap<AccountId, Account>,
    /// Sum of all account balances per asset
    totals: FxHashMap<AssetId, Amount>,
    events: VecDeque<PoolEvent>,
    event_capacity: usize,
    next_seq: SeqNum,
}

impl PoolState {
    fn new(event_capacity: usize) -> Self {
        Self {
            registry: AssetRegistry::new(),
            rates: RateTable::new(),
            accounts: FxHashMap::default(),
            totals: FxHashMap::default(),
            events: VecDeque::new(),
            event_capacity,
            next_seq: 0,
        }
    }

    fn amount(&self, account: &AccountId, asset: &AssetId) -> Amount {
        self.accounts
            .get(account)
            .map(|a| a.amount(asset))
            .unwrap_or(0)
    }

    fn total(&self, asset: &AssetId) -> Amount {
        self.totals.get(asset).copied().unwrap_or(0)
    }

    fn account_mut(&mut self, account: AccountId) -> &mut Account {
        self.accounts
            .entry(account)
            .or_insert_with(|| Account::new(account))
    }

    /// Check that crediting `amount` fits both the account and the total
    fn check_credit(&self, account: &AccountId, asset: &AssetId, amount: Amount) -> Result<()> {
        if let Some(acc) = self.accounts.get(account) {
            acc.can_credit(asset, amount)?;
        }
        self.total(asset)
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        Ok(())
    }

    fn credit(&mut self, account: AccountId, asset: AssetId, amount: Amount) -> Result<()> {
        let new_total = self
            .total(&asset)
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        self.account_mut(account).credit(asset, amount)?;
        self.totals.insert(asset, new_total);
        Ok(())
    }

    fn debit(&mut self, account: AccountId, asset: AssetId, amount: Amount) -> Result<()> {
        match self.accounts.get_mut(&account) {
            Some(acc) => acc.debit(&asset, amount)?,
            None => Balance::default().debit(amount)?,
        }
        let total = self.total(&asset);
        // Total covers every account balance, so this cannot go below zero
        self.totals.insert(asset, total.saturating_sub(amount));
        Ok(())
    }

    fn emit(&mut self, kind: EventKind) -> PoolEvent {
        self.next_seq += 1;
        let event = PoolEvent::new(self.next_seq, kind);
        if self.event_capacity > 0 {
            if self.events.len() == self.event_capacity {
                self.events.pop_front();
            }
            self.events.push_back(event.clone());
        }
        event
    }
}

/// Ledger & exchange engine
///
/// The administrator is fixed at construction and cannot change.
pub struct LiquidityPool {
    owner: AccountId,
    custody: Arc<dyn CustodyAdapter>,
    state: Mutex<PoolState>,
    guard: ReentrancyGuard,
    audit: Option<Mutex<AuditWriter>>,
}

impl std::fmt::Debug for LiquidityPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LiquidityPool")
            .field("owner", &self.owner)
            .field("custody", &self.custody.name())
            .field("audit", &self.audit.is_some())
            .finish_non_exhaustive()
    }
}

impl LiquidityPool {
    pub fn new(owner: AccountId, custody: Arc<dyn CustodyAdapter>) -> Self {
        info!(owner = %owner, custody = custody.name(), "Liquidity pool created");
        Self {
            owner,
            custody,
            state: Mutex::new(PoolState::new(DEFAULT_EVENT_CAPACITY)),
            guard: ReentrancyGuard::new(),
            audit: None,
        }
    }

    /// Mirror every event to an audit log.
    ///
    /// Best effort: a failed audit write is logged at `error` level and the
    /// operation that produced the event still succeeds.
    pub fn with_audit(mut self, writer: AuditWriter) -> Self {
        self.audit = Some(Mutex::new(writer));
        self
    }

    /// Number of events kept for [`events`](Self::events). Zero disables
    /// the in-memory buffer, e.g. when an audit log already keeps them.
    pub fn with_event_capacity(mut self, capacity: usize) -> Self {
        let state = self.state.get_mut().unwrap_or_else(PoisonError::into_inner);
        state.event_capacity = capacity;
        while state.events.len() > capacity {
            state.events.pop_front();
        }
        self
    }

    /// Build a pool from configuration.
    ///
    /// Registers the configured assets and rates as the owner, and opens the
    /// audit log if one is configured.
    pub fn bootstrap(
        config: &PoolConfig,
        custody: Arc<dyn CustodyAdapter>,
    ) -> std::result::Result<Self, crate::config::ConfigError> {
        let mut pool = Self::new(config.owner, custody);
        if let Some(path) = &config.audit_log {
            pool = pool.with_audit(AuditWriter::open(path)?);
        }

        for asset in &config.assets {
            pool.add_supported_asset(config.owner, asset.address)?;
        }
        for entry in &config.rates {
            let from = config.asset_by_symbol(&entry.from)?;
            let to = config.asset_by_symbol(&entry.to)?;
            let rate = parse_units_allow_zero(&entry.rate, RATE_DECIMALS)?;
            pool.set_exchange_rate(config.owner, from.address, to.address, rate)?;
        }

        info!(
            assets = config.assets.len(),
            rates = config.rates.len(),
            "Liquidity pool bootstrapped"
        );
        Ok(pool)
    }

    fn state(&self) -> MutexGuard<'_, PoolState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn ensure_owner(&self, caller: &AccountId) -> Result<()> {
        if *caller != self.owner {
            warn!(caller = %caller, "Rejected privileged call");
            return Err(LedgerError::Unauthorized);
        }
        Ok(())
    }

    fn publish(&self, event: &PoolEvent) {
        if let Some(audit) = &self.audit {
            let mut writer = audit.lock().unwrap_or_else(PoisonError::into_inner);
            if let Err(e) = writer.write_event(event) {
                // State is already committed; the audit trail is best effort
                error!(seq = event.seq, error = %e, "Audit write failed");
            }
        }
    }

    fn commit_event(&self, state: &mut PoolState, kind: EventKind) {
        let event = state.emit(kind);
        self.publish(&event);
    }

    // ============================================================
    // ASSET REGISTRY
    // ============================================================

    /// # Errors
    /// - `Unauthorized` if caller is not the administrator
    /// - `InvalidAsset` for the null identifier
    pub fn add_supported_asset(&self, caller: AccountId, asset: AssetId) -> Result<()> {
        let _entered = self.guard.enter()?;
        self.ensure_owner(&caller)?;

        let mut state = self.state();
        state.registry.add(asset)?;
        self.commit_event(&mut state, EventKind::AssetAdded { asset });
        info!(asset = %asset, "Asset supported");
        Ok(())
    }

    /// Blocks future deposits and swaps of `asset`. Held balances stay
    /// withdrawable and rates are kept.
    ///
    /// # Errors
    /// - `Unauthorized` if caller is not the administrator
    pub fn remove_supported_asset(&self, caller: AccountId, asset: AssetId) -> Result<()> {
        let _entered = self.guard.enter()?;
        self.ensure_owner(&caller)?;

        let mut state = self.state();
        state.registry.remove(asset);
        self.commit_event(&mut state, EventKind::AssetRemoved { asset });
        info!(asset = %asset, "Asset unsupported");
        Ok(())
    }

    pub fn is_supported(&self, asset: &AssetId) -> bool {
        let _observed = self.guard.observe();
        self.state().registry.is_supported(asset)
    }

    pub fn supported_assets(&self) -> Vec<AssetId> {
        let _observed = self.guard.observe();
        self.state().registry.supported_assets()
    }

    // ============================================================
    // RATES
    // ============================================================

    /// Set the rate for `from -> to`, scaled by `RATE_SCALE`.
    ///
    /// No check against the inverse direction; zero disables swaps from
    /// `from` into `to`.
    ///
    /// # Errors
    /// - `Unauthorized` if caller is not the administrator
    pub fn set_exchange_rate(
        &self,
        caller: AccountId,
        from: AssetId,
        to: AssetId,
        rate: Rate,
    ) -> Result<()> {
        let _entered = self.guard.enter()?;
        self.ensure_owner(&caller)?;

        let mut state = self.state();
        state.rates.set(from, to, rate);
        self.commit_event(&mut state, EventKind::RateSet { from, to, rate });
        info!(from = %from, to = %to, rate = %rate, "Exchange rate set");
        Ok(())
    }

    /// Rate for `from -> to`; zero if unset
    pub fn get_exchange_rate(&self, from: &AssetId, to: &AssetId) -> Rate {
        let _observed = self.guard.observe();
        self.state().rates.get(from, to)
    }

    /// All configured non-zero rates, sorted by pair
    pub fn exchange_rates(&self) -> Vec<(AssetId, AssetId, Rate)> {
        let _observed = self.guard.observe();
        self.state().rates.entries()
    }

    // ============================================================
    // ACCOUNT OPERATIONS
    // ============================================================

    /// Move `amount` into custody, then credit it to `account`.
    ///
    /// # Errors
    /// - `UnsupportedAsset` if the asset is not registered
    /// - `ZeroAmount` if amount is zero
    /// - `Overflow` if the credit would not fit
    /// - `TransferFailed` if custody did not take the funds
    pub fn deposit(&self, account: AccountId, asset: AssetId, amount: Amount) -> Result<()> {
        let _entered = self.guard.enter()?;

        {
            let state = self.state();
            state.registry.ensure_supported(&asset)?;
            if amount == 0 {
                return Err(LedgerError::ZeroAmount);
            }
            // Never pull in funds that cannot be credited
            state.check_credit(&account, &asset, amount)?;
        }

        if let Err(e) = self.custody.transfer_in(asset, account, amount) {
            warn!(account = %account, asset = %asset, amount = %amount, error = %e, "Deposit transfer failed");
            return Err(e.into());
        }

        let mut state = self.state();
        if let Err(e) = state.credit(account, asset, amount) {
            // Unreachable while the guard is held; return the funds anyway
            drop(state);
            error!(account = %account, asset = %asset, error = %e, "Credit failed after transfer, refunding");
            if let Err(refund) = self.custody.transfer_out(asset, account, amount) {
                error!(account = %account, asset = %asset, error = %refund, "Refund failed");
            }
            return Err(e);
        }
        self.commit_event(
            &mut state,
            EventKind::Deposited {
                account,
                asset,
                amount,
            },
        );
        info!(account = %account, asset = %asset, amount = %amount, "Deposit credited");
        Ok(())
    }

    /// Debit `account`, then move `amount` out of custody to it.
    ///
    /// Not gated on the asset being supported. If custody fails to pay,
    /// the balance is restored exactly.
    ///
    /// # Errors
    /// - `ZeroAmount` if amount is zero
    /// - `InsufficientBalance` if amount exceeds the balance
    /// - `TransferFailed` if custody did not release the funds
    pub fn withdraw(&self, account: AccountId, asset: AssetId, amount: Amount) -> Result<()> {
        let _entered = self.guard.enter()?;
        if amount == 0 {
            return Err(LedgerError::ZeroAmount);
        }

        let (snapshot, total_before) = {
            let mut state = self.state();
            let snapshot = state
                .accounts
                .get(&account)
                .and_then(|acc| acc.get_balance(&asset))
                .copied()
                .unwrap_or_default();
            let total_before = state.total(&asset);
            state.debit(account, asset, amount)?;
            (snapshot, total_before)
        };
        debug!(account = %account, asset = %asset, amount = %amount, "Balance debited before transfer");

        if let Err(e) = self.custody.transfer_out(asset, account, amount) {
            let mut state = self.state();
            state.account_mut(account).restore(asset, snapshot);
            state.totals.insert(asset, total_before);
            warn!(account = %account, asset = %asset, amount = %amount, error = %e, "Withdraw transfer failed, balance restored");
            return Err(e.into());
        }

        let mut state = self.state();
        self.commit_event(
            &mut state,
            EventKind::Withdrawn {
                account,
                asset,
                amount,
            },
        );
        info!(account = %account, asset = %asset, amount = %amount, "Withdrawal paid");
        Ok(())
    }

    /// Convert `amount_in` of `asset_in` into `asset_out` at the configured
    /// rate. Pure bookkeeping; custody is not called.
    ///
    /// Returns the amount credited: floor(amount_in * rate / RATE_SCALE).
    ///
    /// # Errors
    /// - `SameAsset` if both assets are the same
    /// - `UnsupportedAsset` if either asset is not registered
    /// - `ZeroAmount` if amount_in is zero
    /// - `InsufficientBalance` if amount_in exceeds the balance
    /// - `RateNotSet` if the rate for the direction is zero
    /// - `Overflow` if the credit would not fit
    pub fn swap(
        &self,
        account: AccountId,
        asset_in: AssetId,
        asset_out: AssetId,
        amount_in: Amount,
    ) -> Result<Amount> {
        let _entered = self.guard.enter()?;
        if asset_in == asset_out {
            return Err(LedgerError::SameAsset);
        }

        let mut state = self.state();
        state.registry.ensure_supported(&asset_in)?;
        state.registry.ensure_supported(&asset_out)?;
        if amount_in == 0 {
            return Err(LedgerError::ZeroAmount);
        }

        let available = state.amount(&account, &asset_in);
        if available < amount_in {
            return Err(LedgerError::InsufficientBalance {
                available,
                requested: amount_in,
            });
        }

        let rate = state.rates.get(&asset_in, &asset_out);
        if rate == 0 {
            return Err(LedgerError::RateNotSet {
                from: asset_in,
                to: asset_out,
            });
        }
        let amount_out = convert(amount_in, rate)?;

        let new_total_out = state
            .total(&asset_out)
            .checked_add(amount_out)
            .ok_or(LedgerError::Overflow)?;
        let new_total_in = state.total(&asset_in).saturating_sub(amount_in);

        state
            .account_mut(account)
            .settle_swap(asset_in, amount_in, asset_out, amount_out)?;
        state.totals.insert(asset_in, new_total_in);
        state.totals.insert(asset_out, new_total_out);

        self.commit_event(
            &mut state,
            EventKind::Swapped {
                account,
                asset_in,
                amount_in,
                asset_out,
                amount_out,
            },
        );
        info!(
            account = %account,
            asset_in = %asset_in,
            amount_in = %amount_in,
            asset_out = %asset_out,
            amount_out = %amount_out,
            "Swap settled"
        );
        Ok(amount_out)
    }

    /// Recorded balance; zero if never deposited
    pub fn balance_of(&self, account: &AccountId, asset: &AssetId) -> Amount {
        let _observed = self.guard.observe();
        self.state().amount(account, asset)
    }

    // ============================================================
    // EMERGENCY RECOVERY
    // ============================================================

    /// Send the pool's ENTIRE custodial holding of `asset` to the
    /// administrator.
    ///
    /// Account balances are NOT reduced. Afterwards the recorded balances
    /// for `asset` may exceed what custody holds; see
    /// [`custody_shortfall`](Self::custody_shortfall). Withdrawals against
    /// the missing funds fail with `TransferFailed`.
    ///
    /// Returns the amount moved. A zero holding moves nothing.
    ///
    /// # Errors
    /// - `Unauthorized` if caller is not the administrator
    /// - `TransferFailed` if custody did not release the funds
    pub fn emergency_withdraw(&self, caller: AccountId, asset: AssetId) -> Result<Amount> {
        let _entered = self.guard.enter()?;
        self.ensure_owner(&caller)?;

        let held = self.custody.balance_held(asset);
        if held == 0 {
            info!(asset = %asset, "Emergency withdraw: nothing held");
            return Ok(0);
        }

        if let Err(e) = self.custody.transfer_out(asset, self.owner, held) {
            warn!(asset = %asset, amount = %held, error = %e, "Emergency withdraw transfer failed");
            return Err(e.into());
        }

        let mut state = self.state();
        let recorded = state.total(&asset);
        self.commit_event(
            &mut state,
            EventKind::EmergencyWithdrawn {
                asset,
                to: self.owner,
                amount: held,
            },
        );
        if recorded > 0 {
            warn!(
                asset = %asset,
                drained = %held,
                recorded = %recorded,
                "Emergency withdraw left recorded balances without custody backing"
            );
        } else {
            info!(asset = %asset, drained = %held, "Emergency withdraw completed");
        }
        Ok(held)
    }

    // ============================================================
    // QUERIES
    // ============================================================

    pub fn owner(&self) -> AccountId {
        self.owner
    }

    pub fn custody(&self) -> &Arc<dyn CustodyAdapter> {
        &self.custody
    }

    /// Sum of all recorded account balances for `asset`
    pub fn total_recorded(&self, asset: &AssetId) -> Amount {
        let _observed = self.guard.observe();
        self.state().total(asset)
    }

    /// How far recorded balances exceed custody; zero when fully backed.
    ///
    /// Non-zero after an emergency withdraw against a funded asset, or after
    /// swaps credit an asset nobody deposited.
    pub fn custody_shortfall(&self, asset: &AssetId) -> Amount {
        let _observed = self.guard.observe();
        let recorded = self.state().total(asset);
        recorded.saturating_sub(self.custody.balance_held(*asset))
    }

    /// Buffered events, oldest first.
    ///
    /// Holds at most the configured capacity
    /// ([`DEFAULT_EVENT_CAPACITY`] unless changed with
    /// [`with_event_capacity`](Self::with_event_capacity)); older events are
    /// dropped. The audit log, when attached, keeps every event.
    pub fn events(&self) -> Vec<PoolEvent> {
        let _observed = self.guard.observe();
        self.state().events.iter().cloned().collect()
    }

    /// Take all buffered events. Sequence numbers keep counting.
    pub fn drain_events(&self) -> Vec<PoolEvent> {
        let _observed = self.guard.observe();
        self.state().events.drain(..).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::Address;
    use crate::custody::MemoryCustody;
    use crate::rates::RATE_SCALE;

    const OWNER: AccountId = Address::from_low_u8(0xf0);
    const ALICE: AccountId = Address::from_low_u8(1);
    const TKA: AssetId = Address::from_low_u8(0xa);
    const TKB: AssetId = Address::from_low_u8(0xb);

    fn setup() -> (LiquidityPool, Arc<MemoryCustody>) {
        let custody = Arc::new(MemoryCustody::new());
        let pool = LiquidityPool::new(OWNER, custody.clone());
        pool.add_supported_asset(OWNER, TKA).unwrap();
        pool.add_supported_asset(OWNER, TKB).unwrap();
        pool.set_exchange_rate(OWNER, TKA, TKB, 2 * RATE_SCALE).unwrap();
        custody.mint(ALICE, TKA, 1_000);
        (pool, custody)
    }

    #[test]
    fn test_deposit_credits_after_transfer() {
        let (pool, custody) = setup();
        pool.deposit(ALICE, TKA, 100).unwrap();

        assert_eq!(pool.balance_of(&ALICE, &TKA), 100);
        assert_eq!(pool.total_recorded(&TKA), 100);
        assert_eq!(custody.balance_held(TKA), 100);
        assert_eq!(custody.wallet_balance(ALICE, TKA), 900);
    }

    #[test]
    fn test_deposit_zero_amount() {
        let (pool, custody) = setup();
        assert_eq!(pool.deposit(ALICE, TKA, 0), Err(LedgerError::ZeroAmount));
        assert_eq!(custody.transfer_in_count(), 0);
    }

    #[test]
    fn test_unsupported_checked_before_zero() {
        let (pool, _) = setup();
        let other = Address::from_low_u8(0xc);
        assert_eq!(
            pool.deposit(ALICE, other, 0),
            Err(LedgerError::UnsupportedAsset(other))
        );
    }

    #[test]
    fn test_withdraw_unknown_account_is_insufficient() {
        let (pool, _) = setup();
        assert_eq!(
            pool.withdraw(ALICE, TKA, 1),
            Err(LedgerError::InsufficientBalance {
                available: 0,
                requested: 1
            })
        );
    }

    #[test]
    fn test_withdraw_restores_version_on_failure() {
        let (pool, custody) = setup();
        pool.deposit(ALICE, TKA, 100).unwrap();
        let before = pool.state().accounts[&ALICE].get_balance(&TKA).copied();

        custody.set_fail_transfer_out(true);
        assert!(matches!(
            pool.withdraw(ALICE, TKA, 40),
            Err(LedgerError::TransferFailed(_))
        ));

        let after = pool.state().accounts[&ALICE].get_balance(&TKA).copied();
        assert_eq!(before, after);
        assert_eq!(pool.total_recorded(&TKA), 100);
    }

    #[test]
    fn test_events_are_sequenced() {
        let (pool, _) = setup();
        pool.deposit(ALICE, TKA, 100).unwrap();
        let _ = pool.withdraw(ALICE, TKA, 500); // fails, no event

        let events = pool.events();
        let seqs: Vec<SeqNum> = events.iter().map(|e| e.seq).collect();
        assert_eq!(seqs, vec![1, 2, 3, 4]);
        assert!(matches!(
            events.last().map(|e| &e.kind),
            Some(EventKind::Deposited { amount: 100, .. })
        ));

        let drained = pool.drain_events();
        assert_eq!(drained.len(), 4);
        assert!(pool.events().is_empty());

        pool.withdraw(ALICE, TKA, 10).unwrap();
        assert_eq!(pool.events()[0].seq, 5);
    }

    #[test]
    fn test_guard_released_after_error() {
        let (pool, _) = setup();
        assert!(pool.swap(ALICE, TKA, TKA, 1).is_err());
        assert!(!pool.guard.is_entered());
        pool.deposit(ALICE, TKA, 1).unwrap();
    }

    #[test]
    fn test_event_buffer_keeps_newest() {
        let (pool, _) = setup();
        let pool = pool.with_event_capacity(2);
        assert_eq!(pool.events().len(), 2);

        pool.deposit(ALICE, TKA, 10).unwrap();
        pool.deposit(ALICE, TKA, 20).unwrap();
        let seqs: Vec<SeqNum> = pool.events().iter().map(|e| e.seq).collect();
        assert_eq!(seqs, vec![4, 5]);
    }

    #[test]
    fn test_zero_event_capacity_buffers_nothing() {
        let (pool, _) = setup();
        let pool = pool.with_event_capacity(0);
        pool.deposit(ALICE, TKA, 10).unwrap();
        assert!(pool.events().is_empty());
    }

    // ============================================================
    // BOOTSTRAP
    // ============================================================

    mod bootstrap_from_config {
        use super::*;
        use crate::config::{AppConfig, ConfigError};
        use crate::money::MoneyError;

        fn pool_yaml(audit: Option<&std::path::Path>, tkb_address: &str, rates: &str) -> String {
            let audit_line = audit
                .map(|p| format!("  audit_log: \"{}\"\n", p.display()))
                .unwrap_or_default();
            format!(
                r#"
log_level: info
log_dir: ./logs
log_file: ledger.log
use_json: false
rotation: never
pool:
  owner: "0x00000000000000000000000000000000000000f0"
{audit_line}  assets:
    - symbol: TKA
      address: "0x000000000000000000000000000000000000000a"
      decimals: 18
    - symbol: TKB
      address: "{tkb_address}"
      decimals: 18
  rates:
{rates}
"#
            )
        }

        const TKB_HEX: &str = "0x000000000000000000000000000000000000000b";
        const BOTH_RATES: &str =
            "    - { from: TKA, to: TKB, rate: \"2\" }\n    - { from: TKB, to: TKA, rate: \"0.5\" }";

        fn bootstrap(yaml: &str) -> std::result::Result<LiquidityPool, ConfigError> {
            let config = AppConfig::from_yaml(yaml).unwrap();
            LiquidityPool::bootstrap(&config.pool, Arc::new(MemoryCustody::new()))
        }

        #[test]
        fn test_bootstrap_registers_assets_rates_and_audits() {
            let path = std::env::temp_dir().join(format!(
                "liquidity_ledger_bootstrap_{}.jsonl",
                Address::random()
            ));
            let pool = bootstrap(&pool_yaml(Some(&path), TKB_HEX, BOTH_RATES)).unwrap();

            assert_eq!(pool.owner(), OWNER);
            assert_eq!(pool.supported_assets(), vec![TKA, TKB]);
            assert_eq!(pool.get_exchange_rate(&TKA, &TKB), 2 * RATE_SCALE);
            assert_eq!(pool.get_exchange_rate(&TKB, &TKA), RATE_SCALE / 2);

            let events = pool.events();
            assert_eq!(events.len(), 4);
            let content = std::fs::read_to_string(&path).unwrap();
            let lines: Vec<&str> = content.lines().collect();
            assert_eq!(lines.len(), events.len());
            let last: PoolEvent = serde_json::from_str(lines[3]).unwrap();
            assert_eq!(last, events[3]);

            std::fs::remove_file(&path).ok();
        }

        #[test]
        fn test_bootstrap_unknown_symbol() {
            let rates = "    - { from: TKA, to: XYZ, rate: \"1\" }";
            assert!(matches!(
                bootstrap(&pool_yaml(None, TKB_HEX, rates)),
                Err(ConfigError::UnknownSymbol(symbol)) if symbol == "XYZ"
            ));
        }

        #[test]
        fn test_bootstrap_null_asset_address() {
            let null = "0x0000000000000000000000000000000000000000";
            assert!(matches!(
                bootstrap(&pool_yaml(None, null, BOTH_RATES)),
                Err(ConfigError::Ledger(LedgerError::InvalidAsset))
            ));
        }

        #[test]
        fn test_bootstrap_unparsable_rate() {
            let rates = "    - { from: TKA, to: TKB, rate: \"two\" }";
            assert!(matches!(
                bootstrap(&pool_yaml(None, TKB_HEX, rates)),
                Err(ConfigError::Money(MoneyError::InvalidFormat(_)))
            ));
        }
    }
}

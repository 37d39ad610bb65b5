//! Exchange rate table
//!
//! All rates use 10^18 precision: 2 * 10^18 = 1 unit in -> 2 units out.
//! Directions are independent; nothing ties rate(A, B) to rate(B, A).

use crate::core_types::{Amount, AssetId, Rate};
use crate::error::LedgerError;
use num_bigint::BigUint;
use rustc_hash::FxHashMap;

/// Rate precision (10^18)
pub const RATE_SCALE: Rate = 1_000_000_000_000_000_000;

/// Decimal places implied by [`RATE_SCALE`]
pub const RATE_DECIMALS: u32 = 18;

/// Ordered-pair rate table. Unset pairs read as zero.
#[derive(Debug, Clone, Default)]
pub struct RateTable {
    rates: FxHashMap<(AssetId, AssetId), Rate>,
}

impl RateTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the rate for `from -> to`. Zero disables the direction.
    pub fn set(&mut self, from: AssetId, to: AssetId, rate: Rate) {
        self.rates.insert((from, to), rate);
    }

    #[inline]
    pub fn get(&self, from: &AssetId, to: &AssetId) -> Rate {
        self.rates.get(&(*from, *to)).copied().unwrap_or(0)
    }

    /// Configured pairs with non-zero rates, sorted
    pub fn entries(&self) -> Vec<(AssetId, AssetId, Rate)> {
        let mut entries: Vec<_> = self
            .rates
            .iter()
            .filter(|(_, rate)| **rate > 0)
            .map(|((from, to), rate)| (*from, *to, *rate))
            .collect();
        entries.sort();
        entries
    }
}

/// Convert an amount at a scaled rate.
///
/// Formula: floor(amount * rate / RATE_SCALE)
///
/// The product is computed in arbitrary precision, so only a result that
/// does not fit `Amount` fails. Remainders are dropped, never rounded up.
///
/// # Example
/// ```
/// use liquidity_ledger::rates::{convert, RATE_SCALE};
/// // 10 units at 2.0 -> 20 units
/// assert_eq!(convert(10, 2 * RATE_SCALE).unwrap(), 20);
/// // 3 units at 0.5 -> 1 unit (1.5 floored)
/// assert_eq!(convert(3, RATE_SCALE / 2).unwrap(), 1);
/// ```
pub fn convert(amount: Amount, rate: Rate) -> Result<Amount, LedgerError> {
    if let Some(product) = amount.checked_mul(rate) {
        return Ok(product / RATE_SCALE);
    }

    let out = BigUint::from(amount) * BigUint::from(rate) / BigUint::from(RATE_SCALE);
    Amount::try_from(&out).map_err(|_| LedgerError::Overflow)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::Address;

    const A: AssetId = Address::from_low_u8(0xa);
    const B: AssetId = Address::from_low_u8(0xb);
    const ONE: Amount = 1_000_000_000_000_000_000;

    #[test]
    fn test_unset_rate_is_zero() {
        let table = RateTable::new();
        assert_eq!(table.get(&A, &B), 0);
    }

    #[test]
    fn test_directions_are_independent() {
        let mut table = RateTable::new();
        table.set(A, B, 2 * RATE_SCALE);
        assert_eq!(table.get(&A, &B), 2 * RATE_SCALE);
        assert_eq!(table.get(&B, &A), 0);

        // Asymmetric rates are accepted as-is
        table.set(B, A, 3 * RATE_SCALE);
        assert_eq!(table.get(&B, &A), 3 * RATE_SCALE);
    }

    #[test]
    fn test_entries_skip_disabled_pairs() {
        let mut table = RateTable::new();
        table.set(A, B, RATE_SCALE);
        table.set(B, A, RATE_SCALE);
        table.set(B, A, 0);
        assert_eq!(table.entries(), vec![(A, B, RATE_SCALE)]);
    }

    #[test]
    fn test_convert_basic() {
        // 10 A at 2.0 = 20 B
        assert_eq!(convert(10 * ONE, 2 * RATE_SCALE).unwrap(), 20 * ONE);
        // 20 B at 0.5 = 10 A
        assert_eq!(convert(20 * ONE, RATE_SCALE / 2).unwrap(), 10 * ONE);
    }

    #[test]
    fn test_convert_floors() {
        // 1 unit at 0.5 -> 0.5 floored to 0
        assert_eq!(convert(1, RATE_SCALE / 2).unwrap(), 0);
        // 7 units at 1/3 -> 2
        assert_eq!(convert(7, RATE_SCALE / 3).unwrap(), 2);
    }

    #[test]
    fn test_convert_wide_product() {
        // amount * rate exceeds u128 but the result fits
        let amount = Amount::MAX / 2;
        assert_eq!(convert(amount, RATE_SCALE).unwrap(), amount);
        assert_eq!(convert(amount, RATE_SCALE / 2).unwrap(), amount / 2);
    }

    #[test]
    fn test_convert_overflow() {
        assert!(matches!(
            convert(Amount::MAX, 2 * RATE_SCALE),
            Err(LedgerError::Overflow)
        ));
    }
}

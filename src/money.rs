//! Money Conversion Module
//!
//! Conversion between the internal `u128` representation and human-facing
//! decimal strings. Config files and logs go through here.
//!
//! ## Internal Representation
//! - All amounts are stored as `u128` in the asset's smallest unit
//! - The scale factor is `10^decimals` (e.g., 10^18 for ETH = wei)
//! - Rates use the same encoding with 18 decimals
//!
//! ## Usage
//! ```
//! use liquidity_ledger::money::{parse_units, format_units};
//!
//! let internal = parse_units("1.5", 18).unwrap();
//! assert_eq!(internal, 1_500_000_000_000_000_000);
//!
//! assert_eq!(format_units(internal, 18, 4), "1.5000");
//! ```

use crate::core_types::Amount;
use thiserror::Error;

/// Largest supported decimals; 10^38 is the biggest power of ten in u128
pub const MAX_DECIMALS: u32 = 38;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyError {
    #[error("Precision overflow: provided {provided} decimals, max allowed {max}")]
    PrecisionOverflow { provided: u32, max: u32 },

    #[error("Amount must be positive")]
    InvalidAmount,

    #[error("Amount too large, would overflow")]
    Overflow,

    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}

/// `10^decimals`
pub fn unit(decimals: u32) -> Result<Amount, MoneyError> {
    10u128.checked_pow(decimals).ok_or(MoneyError::PrecisionOverflow {
        provided: decimals,
        max: MAX_DECIMALS,
    })
}

// ============================================================================
// Parse: Human → Internal
// ============================================================================

/// Convert a decimal string to internal units, rejecting zero.
///
/// # Errors
/// * `PrecisionOverflow` - more fractional digits than `decimals`
/// * `InvalidAmount` - zero or signed input
/// * `Overflow` - result does not fit in `u128`
/// * `InvalidFormat` - anything that is not plain `digits[.digits]`
pub fn parse_units(amount_str: &str, decimals: u32) -> Result<Amount, MoneyError> {
    let amount = parse_units_allow_zero(amount_str, decimals)?;
    if amount == 0 {
        return Err(MoneyError::InvalidAmount);
    }
    Ok(amount)
}

/// Same as [`parse_units`] but accepts zero. For rates, where zero
/// disables a direction.
pub fn parse_units_allow_zero(amount_str: &str, decimals: u32) -> Result<Amount, MoneyError> {
    let amount_str = amount_str.trim();
    if amount_str.is_empty() {
        return Err(MoneyError::InvalidFormat("empty string".into()));
    }

    if amount_str.starts_with('-') || amount_str.starts_with('+') {
        return Err(MoneyError::InvalidAmount);
    }

    let multiplier = unit(decimals)?;

    let (whole, frac) = match amount_str.split_once('.') {
        None => (amount_str, ""),
        Some((whole, frac)) => {
            // Require both sides of the dot: no ".5" or "5."
            if whole.is_empty() {
                return Err(MoneyError::InvalidFormat(
                    "missing leading zero (e.g., use 0.5 instead of .5)".into(),
                ));
            }
            if frac.is_empty() {
                return Err(MoneyError::InvalidFormat(
                    "missing fractional part (e.g., use 5.0 instead of 5.)".into(),
                ));
            }
            if decimals == 0 {
                return Err(MoneyError::InvalidFormat(
                    "decimals is 0, but dot provided".into(),
                ));
            }
            (whole, frac)
        }
    };

    if !whole.bytes().all(|b| b.is_ascii_digit()) {
        return Err(MoneyError::InvalidFormat(format!(
            "invalid character in whole part: {}",
            whole
        )));
    }
    if !frac.bytes().all(|b| b.is_ascii_digit()) {
        return Err(MoneyError::InvalidFormat(format!(
            "invalid character in fractional part: {}",
            frac
        )));
    }

    // No silent truncation
    if frac.len() > decimals as usize {
        return Err(MoneyError::PrecisionOverflow {
            provided: frac.len() as u32,
            max: decimals,
        });
    }

    let whole_num: Amount = whole.parse().map_err(|_| MoneyError::Overflow)?;
    let frac_num: Amount = if frac.is_empty() {
        0
    } else {
        let padded = format!("{:0<width$}", frac, width = decimals as usize);
        padded
            .parse()
            .map_err(|_| MoneyError::InvalidFormat("invalid fractional part".into()))?
    };

    whole_num
        .checked_mul(multiplier)
        .and_then(|v| v.checked_add(frac_num))
        .ok_or(MoneyError::Overflow)
}

// ============================================================================
// Format: Internal → Human
// ============================================================================

/// Convert internal units to a display string, truncating to
/// `display_decimals` fractional digits.
pub fn format_units(value: Amount, decimals: u32, display_decimals: u32) -> String {
    let Ok(multiplier) = unit(decimals) else {
        return value.to_string();
    };
    let whole = value / multiplier;
    if display_decimals == 0 || decimals == 0 {
        return whole.to_string();
    }

    let frac = format!(
        "{:0>width$}",
        value % multiplier,
        width = decimals as usize
    );
    let shown = display_decimals.min(decimals) as usize;
    let mut out = format!("{}.{}", whole, &frac[..shown]);
    // Pad when asked for more digits than the asset has
    for _ in shown..display_decimals as usize {
        out.push('0');
    }
    out
}

/// Full precision string, for storage and exchange between services
pub fn format_units_full(value: Amount, decimals: u32) -> String {
    format_units(value, decimals, decimals)
}

//! Core types used throughout the ledger
//!
//! These are fundamental type aliases used by all modules.
//! They provide semantic meaning and keep arithmetic widths in one place.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Byte width of an [`Address`].
pub const ADDRESS_LEN: usize = 20;

/// Opaque 20-byte identifier for accounts and assets.
///
/// # Constraints:
/// - **Immutable**: Once chosen, NEVER changes
/// - **Comparable**: Ordered bytewise, usable as a map key
/// - **Null**: the all-zero address is reserved and never a valid asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Address([u8; ADDRESS_LEN]);

impl Address {
    /// The null identifier (all zero bytes)
    pub const ZERO: Address = Address([0u8; ADDRESS_LEN]);

    pub const fn new(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }

    /// Address whose last byte is `n`, rest zero. Handy for fixtures.
    pub const fn from_low_u8(n: u8) -> Self {
        let mut bytes = [0u8; ADDRESS_LEN];
        bytes[ADDRESS_LEN - 1] = n;
        Self(bytes)
    }

    /// Fresh random address
    pub fn random() -> Self {
        Self(rand::random())
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; ADDRESS_LEN]
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AddressParseError {
    #[error("address must start with 0x")]
    MissingPrefix,
    #[error("address must be {expected} hex characters, got {actual}")]
    BadLength { expected: usize, actual: usize },
    #[error("invalid hex: {0}")]
    InvalidHex(String),
}

impl FromStr for Address {
    type Err = AddressParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let body = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .ok_or(AddressParseError::MissingPrefix)?;
        if body.len() != ADDRESS_LEN * 2 {
            return Err(AddressParseError::BadLength {
                expected: ADDRESS_LEN * 2,
                actual: body.len(),
            });
        }
        let mut bytes = [0u8; ADDRESS_LEN];
        hex::decode_to_slice(body, &mut bytes)
            .map_err(|e| AddressParseError::InvalidHex(e.to_string()))?;
        Ok(Self(bytes))
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Account ID - the external holder an entry belongs to.
pub type AccountId = Address;

/// Asset ID - a distinct fungible asset, including [`NATIVE_ASSET`].
pub type AssetId = Address;

/// Sentinel identifier for the chain's native currency.
///
/// Distinct from [`Address::ZERO`], which is never a valid asset.
pub const NATIVE_ASSET: AssetId = Address([0xee; ADDRESS_LEN]);

/// Amount in the asset's smallest unit (e.g. wei for 18-decimal assets).
pub type Amount = u128;

/// Exchange rate scaled by [`crate::rates::RATE_SCALE`].
pub type Rate = u128;

/// Sequence number for ordering events
pub type SeqNum = u64;

//! Pool events
//!
//! Every successful mutation emits exactly one event. Sequence numbers are
//! gapless and start at 1; failed operations emit nothing.

use crate::core_types::{AccountId, Amount, AssetId, Rate, SeqNum};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Amounts are written as decimal strings; 18-decimal values exceed
/// what most JSON readers hold exactly.
mod amount_str {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &u128, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u128, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventKind {
    AssetAdded {
        asset: AssetId,
    },
    AssetRemoved {
        asset: AssetId,
    },
    RateSet {
        from: AssetId,
        to: AssetId,
        #[serde(with = "amount_str")]
        rate: Rate,
    },
    Deposited {
        account: AccountId,
        asset: AssetId,
        #[serde(with = "amount_str")]
        amount: Amount,
    },
    Withdrawn {
        account: AccountId,
        asset: AssetId,
        #[serde(with = "amount_str")]
        amount: Amount,
    },
    Swapped {
        account: AccountId,
        asset_in: AssetId,
        #[serde(with = "amount_str")]
        amount_in: Amount,
        asset_out: AssetId,
        #[serde(with = "amount_str")]
        amount_out: Amount,
    },
    /// Custody drained to the administrator; account balances untouched
    EmergencyWithdrawn {
        asset: AssetId,
        to: AccountId,
        #[serde(with = "amount_str")]
        amount: Amount,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolEvent {
    pub seq: SeqNum,
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub kind: EventKind,
}

impl PoolEvent {
    pub fn new(seq: SeqNum, kind: EventKind) -> Self {
        Self {
            seq,
            timestamp: Utc::now(),
            kind,
        }
    }
}

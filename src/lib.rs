//! Liquidity Ledger - Custodial Pool Engine
//!
//! Holds fungible assets on behalf of accounts, records per-account
//! balances, and converts between supported assets at administrator-set
//! fixed rates.
//!
//! # Modules
//!
//! - [`core_types`] - Core type definitions (Address, AssetId, Amount, etc.)
//! - [`balance`] - Enforced balance type
//! - [`account`] - Per-holder balances
//! - [`registry`] - Supported asset registry
//! - [`rates`] - Directional rate table and fixed-point conversion
//! - [`custody`] - Asset transfer adapter seam
//! - [`pool`] - Ledger & exchange engine
//! - [`events`] - Pool event records
//! - [`audit`] - JSON-lines audit log
//! - [`money`] - Decimal string conversion
//! - [`config`] - YAML configuration
//! - [`logging`] - Tracing subscriber setup

// Core types - must be first!
pub mod core_types;

// Ledger components
pub mod account;
pub mod balance;
pub mod error;
pub mod guard;
pub mod rates;
pub mod registry;

// Engine
pub mod custody;
pub mod events;
pub mod pool;

// Ambient
pub mod audit;
pub mod config;
pub mod logging;
pub mod money;

// Convenient re-exports at crate root
pub use account::Account;
pub use audit::AuditWriter;
pub use balance::Balance;
pub use core_types::{AccountId, Address, Amount, AssetId, NATIVE_ASSET, Rate, SeqNum};
pub use custody::{CustodyAdapter, CustodyError, MemoryCustody};
pub use error::LedgerError;
pub use events::{EventKind, PoolEvent};
pub use pool::LiquidityPool;
pub use rates::RATE_SCALE;
pub use registry::AssetRegistry;

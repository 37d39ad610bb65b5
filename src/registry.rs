//! Asset registry
//!
//! The set of assets eligible for deposits and swaps. Access control lives
//! in the pool; the registry only validates identifiers.

use crate::core_types::AssetId;
use crate::error::LedgerError;
use rustc_hash::FxHashMap;

/// Supported-asset flags keyed by asset id
#[derive(Debug, Clone, Default)]
pub struct AssetRegistry {
    supported: FxHashMap<AssetId, bool>,
}

impl AssetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark an asset supported. Idempotent.
    ///
    /// # Errors
    /// - `InvalidAsset` for the null identifier; the registry is unchanged
    pub fn add(&mut self, asset: AssetId) -> Result<(), LedgerError> {
        if asset.is_zero() {
            return Err(LedgerError::InvalidAsset);
        }
        self.supported.insert(asset, true);
        Ok(())
    }

    /// Mark an asset unsupported.
    ///
    /// Balances and rates referencing the asset are left alone.
    pub fn remove(&mut self, asset: AssetId) {
        self.supported.insert(asset, false);
    }

    #[inline]
    pub fn is_supported(&self, asset: &AssetId) -> bool {
        self.supported.get(asset).copied().unwrap_or(false)
    }

    /// Gate used by deposit and swap
    pub fn ensure_supported(&self, asset: &AssetId) -> Result<(), LedgerError> {
        if self.is_supported(asset) {
            Ok(())
        } else {
            Err(LedgerError::UnsupportedAsset(*asset))
        }
    }

    /// Currently supported assets, sorted
    pub fn supported_assets(&self) -> Vec<AssetId> {
        let mut assets: Vec<AssetId> = self
            .supported
            .iter()
            .filter(|(_, on)| **on)
            .map(|(asset, _)| *asset)
            .collect();
        assets.sort();
        assets
    }
}

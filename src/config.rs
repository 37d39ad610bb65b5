use crate::core_types::{AccountId, AssetId};
use crate::error::LedgerError;
use crate::money::MoneyError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to parse config yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Audit log: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid rate: {0}")]
    Money(#[from] MoneyError),

    #[error("Unknown asset symbol: {0}")]
    UnknownSymbol(String),

    #[error("Pool setup rejected: {0}")]
    Ledger(#[from] LedgerError),
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub log_dir: String,
    pub log_file: String,
    pub use_json: bool,
    pub rotation: String,
    /// Level for the ledger's own events; `log_level` applies when absent
    #[serde(default)]
    pub ledger_log_level: Option<String>,
    pub pool: PoolConfig,
}

/// Pool bootstrap settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PoolConfig {
    /// Administrator; fixed for the pool's lifetime
    pub owner: AccountId,
    #[serde(default)]
    pub assets: Vec<AssetConfig>,
    #[serde(default)]
    pub rates: Vec<RateConfig>,
    /// JSON-lines audit file, disabled when absent
    #[serde(default)]
    pub audit_log: Option<PathBuf>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AssetConfig {
    pub symbol: String,
    pub address: AssetId,
    /// Display precision only; amounts are always in smallest units
    pub decimals: u32,
}

/// Rate for one direction, as a decimal string ("2.5" = 2.5 units out per unit in)
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RateConfig {
    pub from: String,
    pub to: String,
    pub rate: String,
}

impl PoolConfig {
    pub fn asset_by_symbol(&self, symbol: &str) -> Result<&AssetConfig, ConfigError> {
        self.assets
            .iter()
            .find(|a| a.symbol.eq_ignore_ascii_case(symbol))
            .ok_or_else(|| ConfigError::UnknownSymbol(symbol.to_string()))
    }
}

impl AppConfig {
    pub fn load(env: &str) -> Result<Self, ConfigError> {
        let config_path = format!("config/{}.yaml", env);
        let content = fs::read_to_string(&config_path).map_err(|source| ConfigError::Read {
            path: config_path.clone(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(content)?)
    }
}

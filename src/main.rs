//! Liquidity Ledger - custodial pool bootstrap
//!
//! ```text
//! ┌──────────┐    ┌───────────────┐    ┌──────────────┐
//! │  Config  │───▶│ LiquidityPool │───▶│   Custody    │
//! │  (YAML)  │    │ (ledger+rates)│    │  (adapter)   │
//! └──────────┘    └───────────────┘    └──────────────┘
//! ```
//!
//! Loads `config/{env}.yaml`, registers its assets and rates, and prints
//! the resulting pool. Runs against in-memory custody.

use std::sync::Arc;

use anyhow::Context;
use liquidity_ledger::config::AppConfig;
use liquidity_ledger::core_types::AssetId;
use liquidity_ledger::custody::MemoryCustody;
use liquidity_ledger::logging::init_logging;
use liquidity_ledger::money::format_units;
use liquidity_ledger::pool::LiquidityPool;
use liquidity_ledger::rates::RATE_DECIMALS;

fn get_env() -> String {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if (args[i] == "--env" || args[i] == "-e") && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }
    "dev".to_string()
}

fn main() -> anyhow::Result<()> {
    let env = get_env();
    let app_config =
        AppConfig::load(&env).with_context(|| format!("loading config for env '{}'", env))?;
    let _log_guard = init_logging(&app_config);

    tracing::info!(
        build = env!("GIT_HASH"),
        "Starting Liquidity Ledger in {} mode",
        env
    );

    let custody = Arc::new(MemoryCustody::new());
    let pool = LiquidityPool::bootstrap(&app_config.pool, custody)
        .context("bootstrapping liquidity pool")?;

    println!("=== Liquidity Ledger ({}) ===", env);
    println!("Owner: {}", pool.owner());

    println!("\nSupported assets:");
    for asset in &app_config.pool.assets {
        let status = if pool.is_supported(&asset.address) {
            "active"
        } else {
            "inactive"
        };
        println!(
            "  {:<8} {} decimals={:<2} {}",
            asset.symbol, asset.address, asset.decimals, status
        );
    }

    let label = |id: AssetId| {
        app_config
            .pool
            .assets
            .iter()
            .find(|a| a.address == id)
            .map(|a| a.symbol.clone())
            .unwrap_or_else(|| id.to_string())
    };

    println!("\nExchange rates:");
    for (from, to, rate) in pool.exchange_rates() {
        println!(
            "  {:<8} -> {:<8} {}",
            label(from),
            label(to),
            format_units(rate, RATE_DECIMALS, 6)
        );
    }

    tracing::info!(
        assets = pool.supported_assets().len(),
        events = pool.events().len(),
        "Pool ready"
    );
    Ok(())
}

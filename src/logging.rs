//! Tracing subscriber setup
//!
//! Ledger events go to a rolling file through a non-blocking writer, and
//! to stdout as well in text mode. `RUST_LOG` overrides the configured
//! filter.

use crate::config::AppConfig;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Target of every event this crate emits
pub const LEDGER_TARGET: &str = env!("CARGO_CRATE_NAME");

/// Filter directives: `log_level` for dependencies, with the ledger's own
/// target raised or lowered by `ledger_log_level`.
pub fn filter_directives(config: &AppConfig) -> String {
    match &config.ledger_log_level {
        Some(level) => format!("{},{}={}", config.log_level, LEDGER_TARGET, level),
        None => config.log_level.clone(),
    }
}

fn file_appender(config: &AppConfig) -> RollingFileAppender {
    match config.rotation.as_str() {
        "hourly" => tracing_appender::rolling::hourly(&config.log_dir, &config.log_file),
        "daily" => tracing_appender::rolling::daily(&config.log_dir, &config.log_file),
        _ => tracing_appender::rolling::never(&config.log_dir, &config.log_file),
    }
}

/// Install the global subscriber. Keep the returned guard alive for the
/// life of the process or buffered lines are lost.
pub fn init_logging(config: &AppConfig) -> WorkerGuard {
    let (writer, guard) = tracing_appender::non_blocking(file_appender(config));

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directives(config)));
    let registry = tracing_subscriber::registry().with(filter);

    if config.use_json {
        // Structured fields (account, asset, amount) stay queryable
        let file_layer = fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(false)
            .with_writer(writer)
            .with_ansi(false);
        registry.with(file_layer).init();
    } else {
        let file_layer = fmt::layer()
            .with_target(false)
            .with_writer(writer)
            .with_ansi(false);
        let stdout_layer = fmt::layer().with_target(false).with_ansi(true);
        registry.with(file_layer).with(stdout_layer).init();
    }

    guard
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PoolConfig;
    use crate::core_types::Address;

    fn config(ledger_log_level: Option<&str>) -> AppConfig {
        AppConfig {
            log_level: "warn".into(),
            log_dir: "./logs".into(),
            log_file: "ledger.log".into(),
            use_json: false,
            rotation: "never".into(),
            ledger_log_level: ledger_log_level.map(Into::into),
            pool: PoolConfig {
                owner: Address::from_low_u8(0xf0),
                assets: vec![],
                rates: vec![],
                audit_log: None,
            },
        }
    }

    #[test]
    fn test_filter_without_ledger_level() {
        assert_eq!(filter_directives(&config(None)), "warn");
    }

    #[test]
    fn test_filter_with_ledger_level() {
        assert_eq!(
            filter_directives(&config(Some("debug"))),
            "warn,liquidity_ledger=debug"
        );
        assert!(EnvFilter::try_new(filter_directives(&config(Some("debug")))).is_ok());
    }
}

//! # Auction Telemetry
//!
//! Logging, configuration and metrics shared by the asset auction crates.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use auction_telemetry::{init_telemetry, TelemetryConfig};
//!
//! let config = TelemetryConfig::from_env();
//! init_telemetry(&config).expect("Failed to init telemetry");
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `AUCTION_SERVICE_NAME` | `asset-auction` | Service name in logs |
//! | `AUCTION_LOG_LEVEL` | `info` | Log level filter (falls back to `RUST_LOG`) |
//! | `AUCTION_JSON_LOGS` | `false` | JSON log lines |
//! | `AUCTION_CONSOLE_OUTPUT` | `true` | Install a console subscriber |
//! | `AUCTION_METRICS_PORT` | `9100` | Prometheus scrape port |
//! | `AUCTION_NETWORK` | `devnet` | Network label |

#![warn(missing_docs)]

mod config;
pub mod logging;
pub mod metrics;

pub use config::TelemetryConfig;
pub use logging::init_logging;
pub use metrics::{
    encode_metrics, record_operation, record_signature_check, register_metrics, HistogramTimer,
    AUCTIONS_STARTED, LIFECYCLE_OPERATIONS, OPERATION_DURATION, OWNERSHIP_TRANSFERS,
    SIGNATURE_VERIFICATIONS,
};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// Subscriber could not be installed.
    #[error("Failed to initialize logging: {0}")]
    LoggingInit(String),

    /// Metric registration or encoding failed.
    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),

    /// Configuration value rejected.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Register metrics and install the log subscriber.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    register_metrics()?;
    init_logging(config)?;
    Ok(())
}

/// Convenience macro for recording a metric increment.
#[macro_export]
macro_rules! metric_inc {
    ($metric:expr) => {
        $metric.inc()
    };
    ($metric:expr, $labels:expr) => {
        $metric.with_label_values($labels).inc()
    };
}

//! Structured logging.
//!
//! Every line carries the same core fields so log pipelines can parse them:
//! - `level`: Log level (trace, debug, info, warn, error)
//! - `subsystem`: Always `asset-auction` for lifecycle events
//! - `message`: Log message
//! - Operation context (`asset_id`, `auction_id`, `status`, ...)

use crate::{TelemetryConfig, TelemetryError};
use tracing_subscriber::EnvFilter;

/// Subsystem label attached by [`log_auction_event!`](crate::log_auction_event).
pub const SUBSYSTEM: &str = "asset-auction";

/// Install the global `tracing` subscriber.
///
/// Does nothing when console output is disabled. Fails if a global subscriber
/// is already installed.
pub fn init_logging(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    if !config.console_output {
        return Ok(());
    }

    let filter = EnvFilter::try_new(&config.log_level)
        .map_err(|e| TelemetryError::Config(format!("log level {}: {}", config.log_level, e)))?;

    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);
    let installed = if config.json_logs {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(|e| TelemetryError::LoggingInit(e.to_string()))?;

    tracing::debug!(
        service = %config.full_service_name(),
        json_logs = config.json_logs,
        "Structured logging initialized"
    );
    Ok(())
}

/// Log a lifecycle event with the subsystem field attached.
///
/// ```rust,ignore
/// log_auction_event!(info, "Auction started", auction_id = 3, asset_id = %id);
/// ```
#[macro_export]
macro_rules! log_auction_event {
    ($level:ident, $msg:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            subsystem = $crate::logging::SUBSYSTEM,
            $($($field)*,)?
            $msg
        )
    };
}

//! Telemetry configuration from environment variables.

use std::env;

/// Configuration for logging and metrics.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Service name attached to logs
    pub service_name: String,

    /// Log level filter (trace, debug, info, warn, error)
    pub log_level: String,

    /// Whether to install a console subscriber at all
    pub console_output: bool,

    /// Whether to enable JSON formatted logs
    pub json_logs: bool,

    /// Ledger network identifier (devnet, testnet, mainnet)
    pub network: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "asset-auction".to_string(),
            log_level: "info".to_string(),
            console_output: true,
            json_logs: false,
            network: "devnet".to_string(),
        }
    }
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `AUCTION_SERVICE_NAME`: Service name (default: asset-auction)
    /// - `AUCTION_LOG_LEVEL` or `RUST_LOG`: Log level (default: info)
    /// - `AUCTION_CONSOLE_OUTPUT`: Enable console output (default: true)
    /// - `AUCTION_JSON_LOGS`: Enable JSON logs (default: false)
    /// - `AUCTION_NETWORK`: Network name (default: devnet)
    pub fn from_env() -> Self {
        Self {
            service_name: env::var("AUCTION_SERVICE_NAME")
                .unwrap_or_else(|_| "asset-auction".to_string()),

            log_level: env::var("AUCTION_LOG_LEVEL")
                .or_else(|_| env::var("RUST_LOG"))
                .unwrap_or_else(|_| "info".to_string()),

            console_output: env::var("AUCTION_CONSOLE_OUTPUT")
                .map(|v| v.to_lowercase() != "false" && v != "0")
                .unwrap_or(true),

            json_logs: env::var("AUCTION_JSON_LOGS")
                .map(|v| v.to_lowercase() == "true" || v == "1")
                .unwrap_or(false),

            network: env::var("AUCTION_NETWORK").unwrap_or_else(|_| "devnet".to_string()),
        }
    }

    /// Service name qualified by network, e.g. `asset-auction-testnet`.
    pub fn full_service_name(&self) -> String {
        format!("{}-{}", self.service_name, self.network)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TelemetryConfig::default();
        assert_eq!(config.service_name, "asset-auction");
        assert_eq!(config.log_level, "info");
        assert!(config.console_output);
        assert!(!config.json_logs);
    }

    #[test]
    fn test_from_env_has_service_name() {
        let config = TelemetryConfig::from_env();
        assert!(!config.service_name.is_empty());
        assert!(!config.log_level.is_empty());
    }

    #[test]
    fn test_full_service_name() {
        let mut config = TelemetryConfig::default();
        assert_eq!(config.full_service_name(), "asset-auction-devnet");

        config.network = "mainnet".to_string();
        assert_eq!(config.full_service_name(), "asset-auction-mainnet");
    }
}

//! Prometheus metrics for the asset auction ledger.
//!
//! All metrics follow the naming convention: `auction_<metric>_<unit>`

use lazy_static::lazy_static;
use prometheus::{
    exponential_buckets, Counter, CounterVec, Encoder, Histogram, HistogramOpts, HistogramVec,
    Opts, Registry, TextEncoder,
};

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    /// Lifecycle operations by operation and outcome
    pub static ref LIFECYCLE_OPERATIONS: CounterVec = CounterVec::new(
        Opts::new("auction_lifecycle_operations_total", "Lifecycle operations executed"),
        &["operation", "outcome"]  // outcome: ok or an error kind
    ).expect("metric creation failed");

    /// Lifecycle operation duration
    pub static ref OPERATION_DURATION: HistogramVec = HistogramVec::new(
        HistogramOpts::new(
            "auction_operation_duration_seconds",
            "Time spent executing lifecycle operations"
        ).buckets(exponential_buckets(0.00001, 2.0, 15).expect("valid buckets")),
        &["operation"]
    ).expect("metric creation failed");

    /// Auction result signature checks
    pub static ref SIGNATURE_VERIFICATIONS: CounterVec = CounterVec::new(
        Opts::new("auction_signature_verifications_total", "Auction result signature checks"),
        &["result"]  // result: valid/invalid
    ).expect("metric creation failed");

    /// Auctions opened
    pub static ref AUCTIONS_STARTED: Counter = Counter::new(
        "auction_auctions_started_total",
        "Total number of auctions started"
    ).expect("metric creation failed");

    /// Assets that changed owner at finalization
    pub static ref OWNERSHIP_TRANSFERS: Counter = Counter::new(
        "auction_ownership_transfers_total",
        "Total number of asset ownership transfers"
    ).expect("metric creation failed");
}

/// Register all metrics with the global registry.
///
/// Safe to call more than once; already-registered collectors are skipped.
pub fn register_metrics() -> Result<(), TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(LIFECYCLE_OPERATIONS.clone()),
        Box::new(OPERATION_DURATION.clone()),
        Box::new(SIGNATURE_VERIFICATIONS.clone()),
        Box::new(AUCTIONS_STARTED.clone()),
        Box::new(OWNERSHIP_TRANSFERS.clone()),
    ];

    for metric in metrics {
        match REGISTRY.register(metric) {
            Ok(()) | Err(prometheus::Error::AlreadyReg) => {}
            Err(e) => return Err(TelemetryError::MetricsInit(e.to_string())),
        }
    }
    Ok(())
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}

/// Record the outcome of one lifecycle operation.
pub fn record_operation(operation: &str, outcome: &str) {
    LIFECYCLE_OPERATIONS
        .with_label_values(&[operation, outcome])
        .inc();
}

/// Record one signature check.
pub fn record_signature_check(valid: bool) {
    let result = if valid { "valid" } else { "invalid" };
    SIGNATURE_VERIFICATIONS.with_label_values(&[result]).inc();
}

/// Timer guard for automatic histogram observation.
pub struct HistogramTimer {
    histogram: Histogram,
    start: std::time::Instant,
}

impl HistogramTimer {
    /// Start a new timer for the given histogram.
    pub fn new(histogram: &Histogram) -> Self {
        Self {
            histogram: histogram.clone(),
            start: std::time::Instant::now(),
        }
    }

    /// Start a timer for one operation's duration.
    pub fn for_operation(operation: &str) -> Self {
        Self::new(&OPERATION_DURATION.with_label_values(&[operation]))
    }
}

impl Drop for HistogramTimer {
    fn drop(&mut self) {
        let duration = self.start.elapsed().as_secs_f64();
        self.histogram.observe(duration);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_metrics_twice() {
        assert!(register_metrics().is_ok());
        assert!(register_metrics().is_ok());
    }

    #[test]
    fn test_record_operation() {
        let before = LIFECYCLE_OPERATIONS
            .with_label_values(&["add_asset", "ok"])
            .get();
        record_operation("add_asset", "ok");
        assert!(
            LIFECYCLE_OPERATIONS
                .with_label_values(&["add_asset", "ok"])
                .get()
                >= before + 1.0
        );
    }

    #[test]
    fn test_encode_contains_registered_metric() {
        register_metrics().unwrap();
        record_signature_check(true);
        let text = encode_metrics().unwrap();
        assert!(text.contains("auction_signature_verifications_total"));
    }

    #[test]
    fn test_histogram_timer() {
        let _timer = HistogramTimer::for_operation("close_auction");
        std::thread::sleep(std::time::Duration::from_millis(1));
    }
}

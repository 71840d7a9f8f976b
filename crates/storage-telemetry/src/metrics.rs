//! Prometheus metrics for the storage protocol adapter and its bus.
//!
//! All metrics follow the naming convention: `storage_<component>_<metric>_<unit>`

use lazy_static::lazy_static;
use prometheus::{Counter, CounterVec, Encoder, Opts, Registry, TextEncoder};

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    // =========================================================================
    // PROTOCOL ADAPTER
    // =========================================================================

    /// Replies produced by command envelopes, by reply mode
    pub static ref REPLIES_MADE: CounterVec = CounterVec::new(
        Opts::new("storage_mbusprot_replies_made_total", "Total replies made by command envelopes"),
        &["mode"]  // mode: augment/passthrough/custom
    ).expect("metric creation failed");

    /// Bucket summaries overwritten with the placeholder value
    pub static ref BUCKET_INFO_OVERWRITTEN: Counter = Counter::new(
        "storage_mbusprot_bucket_info_overwritten_total",
        "Total bucket-info summaries replaced by the placeholder value"
    ).expect("metric creation failed");

    /// Reply factory failures passed through to the caller
    pub static ref REPLY_FACTORY_FAILURES: Counter = Counter::new(
        "storage_mbusprot_reply_factory_failures_total",
        "Total storage command reply factory failures"
    ).expect("metric creation failed");

    // =========================================================================
    // MESSAGE BUS
    // =========================================================================

    /// Messages accepted by the bus
    pub static ref BUS_MESSAGES_SENT: Counter = Counter::new(
        "storage_bus_messages_sent_total",
        "Total messages accepted for delivery"
    ).expect("metric creation failed");

    /// Replies the bus synthesized itself, by error code
    pub static ref BUS_REPLIES_SYNTHESIZED: CounterVec = CounterVec::new(
        Opts::new("storage_bus_replies_synthesized_total", "Total replies synthesized by the bus"),
        &["code"]
    ).expect("metric creation failed");
}

/// Register all metrics with the global registry.
///
/// # Errors
///
/// `MetricsInit` if any metric is already registered.
pub fn register_metrics() -> Result<(), TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        // Protocol adapter
        Box::new(REPLIES_MADE.clone()),
        Box::new(BUCKET_INFO_OVERWRITTEN.clone()),
        Box::new(REPLY_FACTORY_FAILURES.clone()),
        // Message bus
        Box::new(BUS_MESSAGES_SENT.clone()),
        Box::new(BUS_REPLIES_SYNTHESIZED.clone()),
    ];

    for metric in metrics {
        REGISTRY
            .register(metric)
            .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
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

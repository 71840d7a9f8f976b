//! # Storage Telemetry
//!
//! Observability for the storage message-bus adapter.
//!
//! ## Components
//!
//! - **Tracing**: `tracing-subscriber` with env filtering, pretty or JSON output
//! - **Metrics**: Prometheus counters for reply construction and bus delivery
//!
//! ## Usage
//!
//! ```rust,ignore
//! use storage_telemetry::{init_tracing, register_metrics, TelemetryConfig};
//!
//! fn main() {
//!     let config = TelemetryConfig::from_env();
//!     init_tracing(&config).expect("Failed to init tracing");
//!     register_metrics().expect("Failed to register metrics");
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `STORAGE_SERVICE_NAME` | `storage-mbusprot` | Service name in logs |
//! | `STORAGE_LOG_LEVEL` | `info` | Log level filter (falls back to `RUST_LOG`) |
//! | `STORAGE_JSON_LOGS` | `false` | Emit JSON formatted logs |
//! | `STORAGE_CONSOLE_OUTPUT` | `true` | Write logs to the console |

mod config;
pub mod metrics;
mod tracing_setup;

pub use config::TelemetryConfig;
pub use metrics::{encode_metrics, register_metrics};
pub use tracing_setup::init_tracing;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to initialize tracing subscriber: {0}")]
    TracerInit(String),

    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
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

//! Telemetry module
//!
//! Structured logging and Prometheus metrics export. Logging is
//! initialized for every command; the metrics exporter only for the
//! long-running scan loop.

mod logging;
mod metrics;

pub use self::logging::init_logging;
pub use self::metrics::{init_metrics, metric};

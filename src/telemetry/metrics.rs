//! Prometheus metrics
//!
//! Per-event drops are silent by design; these counters are how they stay
//! observable in production.

use metrics::describe_counter;
use metrics_exporter_prometheus::PrometheusBuilder;

/// Metric names used across the scanner
pub mod metric {
    /// Feed events processed, all variants
    pub const EVENTS_TOTAL: &str = "movescan_events_total";
    /// Quotes dropped: instrument id had no symbol mapping yet
    pub const QUOTES_UNMAPPED_TOTAL: &str = "movescan_quotes_unmapped_total";
    /// Quotes dropped: one or both book sides empty
    pub const QUOTES_EMPTY_BOOK_TOTAL: &str = "movescan_quotes_empty_book_total";
    /// Quotes dropped: symbol not in the reference universe
    pub const QUOTES_OUT_OF_UNIVERSE_TOTAL: &str = "movescan_quotes_out_of_universe_total";
    /// Quotes dropped: reference price zero or negative
    pub const QUOTES_DEGENERATE_REFERENCE_TOTAL: &str =
        "movescan_quotes_degenerate_reference_total";
    /// Alerts emitted
    pub const ALERTS_EMITTED_TOTAL: &str = "movescan_alerts_emitted_total";
}

/// Install the Prometheus exporter and describe the scanner's counters
pub fn init_metrics(port: u16) -> anyhow::Result<()> {
    PrometheusBuilder::new()
        .with_http_listener(([0, 0, 0, 0], port))
        .install()
        .map_err(|e| anyhow::anyhow!("Failed to install metrics exporter: {}", e))?;

    describe_counter!(metric::EVENTS_TOTAL, "Feed events processed");
    describe_counter!(
        metric::QUOTES_UNMAPPED_TOTAL,
        "Quotes dropped for an unmapped instrument id"
    );
    describe_counter!(
        metric::QUOTES_EMPTY_BOOK_TOTAL,
        "Quotes dropped with an empty book side"
    );
    describe_counter!(
        metric::QUOTES_OUT_OF_UNIVERSE_TOTAL,
        "Quotes dropped for symbols outside the reference universe"
    );
    describe_counter!(
        metric::QUOTES_DEGENERATE_REFERENCE_TOTAL,
        "Quotes dropped against a zero or negative reference price"
    );
    describe_counter!(metric::ALERTS_EMITTED_TOTAL, "Alerts emitted");

    tracing::info!(port, "Prometheus exporter listening");
    Ok(())
}

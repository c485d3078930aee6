//! Alert sinks
//!
//! The engine hands each alert to a sink; formatting and delivery live
//! here, not in the engine. The console sink prints the operator-facing
//! line, the log sink emits a structured record for aggregation.

use crate::scanner::Alert;
use async_trait::async_trait;
use chrono::SecondsFormat;

/// Destination for emitted alerts
#[async_trait]
pub trait AlertSink: Send + Sync {
    /// Deliver one alert
    async fn publish(&self, alert: &Alert) -> anyhow::Result<()>;
}

/// Prints alerts to stdout
pub struct ConsoleSink;

impl ConsoleSink {
    pub fn new() -> Self {
        Self
    }

    fn format_line(alert: &Alert) -> String {
        format!(
            "[{}] {} moved by {:.2}% (current: {:.4}, previous: {:.4})",
            alert.ts_event.to_rfc3339_opts(SecondsFormat::Nanos, true),
            alert.symbol,
            alert.percent(),
            alert.mid,
            alert.reference,
        )
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AlertSink for ConsoleSink {
    async fn publish(&self, alert: &Alert) -> anyhow::Result<()> {
        println!("{}", Self::format_line(alert));
        Ok(())
    }
}

/// Emits alerts as structured log records
pub struct LogSink;

impl LogSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AlertSink for LogSink {
    async fn publish(&self, alert: &Alert) -> anyhow::Result<()> {
        tracing::info!(
            alert_id = %alert.id,
            symbol = %alert.symbol,
            ts_event = %alert.ts_event,
            mid = %alert.mid,
            reference = %alert.reference,
            move_pct = %alert.move_pct,
            "Price movement alert"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use rust_decimal_macros::dec;

    fn nvda_alert() -> Alert {
        Alert::new(
            "NVDA".to_string(),
            DateTime::from_timestamp_nanos(1_745_395_201_688_717_194),
            dec!(98.19),
            dec!(102.71),
            dec!(0.0440),
        )
    }

    #[test]
    fn test_console_line_format() {
        let line = ConsoleSink::format_line(&nvda_alert());
        assert_eq!(
            line,
            "[2025-04-23T08:00:01.688717194Z] NVDA moved by 4.40% (current: 98.1900, previous: 102.7100)"
        );
    }

    #[tokio::test]
    async fn test_console_publish_ok() {
        let sink = ConsoleSink::new();
        assert!(sink.publish(&nvda_alert()).await.is_ok());
    }

    #[tokio::test]
    async fn test_log_publish_ok() {
        let sink = LogSink::new();
        assert!(sink.publish(&nvda_alert()).await.is_ok());
    }
}

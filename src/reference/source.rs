//! Bulk historical data source
//!
//! Client for the daily-OHLCV service that supplies the prior session's
//! closing price for every symbol in the universe.

use super::ReferenceError;
use crate::config::ReferenceConfig;
use async_trait::async_trait;
use chrono::{Days, NaiveDate};
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::time::Duration;

/// One symbol's closing price as returned by the historical service
#[derive(Debug, Clone, Deserialize)]
pub struct CloseRow {
    pub symbol: String,
    pub close: Decimal,
}

/// Source of prior-session closing prices for the full universe
#[async_trait]
pub trait ReferenceSource: Send + Sync {
    /// Closing prices of the trading session before `session`
    async fn prior_close(&self, session: NaiveDate) -> Result<Vec<CloseRow>, ReferenceError>;
}

/// HTTP client for the bulk historical-data service
pub struct HistoricalClient {
    config: ReferenceConfig,
    client: Client,
}

impl HistoricalClient {
    /// Create a new client from the `[reference]` configuration
    pub fn new(config: ReferenceConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Date range queried for a session: the calendar day before it.
    /// The service resolves weekends and holidays on its side.
    fn query_window(session: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
        let start = session.checked_sub_days(Days::new(1))?;
        Some((start, session))
    }
}

#[async_trait]
impl ReferenceSource for HistoricalClient {
    async fn prior_close(&self, session: NaiveDate) -> Result<Vec<CloseRow>, ReferenceError> {
        let (start, end) = Self::query_window(session)
            .ok_or_else(|| ReferenceError::DataUnavailable("session date out of range".into()))?;

        let url = format!("{}/v1/ohlcv/daily", self.config.base_url);

        tracing::debug!(url = %url, %start, %end, "Fetching prior-session closes");

        let mut request = self.client.get(&url).query(&[
            ("dataset", self.config.dataset.clone()),
            ("symbols", "ALL_SYMBOLS".to_string()),
            ("start", start.to_string()),
            ("end", end.to_string()),
        ]);

        if let Some(key) = &self.config.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ReferenceError::DataUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ReferenceError::DataUnavailable(format!(
                "{}: {}",
                status, body
            )));
        }

        let rows: Vec<CloseRow> = response
            .json()
            .await
            .map_err(|e| ReferenceError::DataUnavailable(e.to_string()))?;

        tracing::info!(rows = rows.len(), "Historical response received");
        Ok(rows)
    }
}

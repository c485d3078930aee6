//! Reference price table
//!
//! One closing price per symbol for the full instrument universe, captured
//! from the bulk historical source before live scanning starts. The table
//! is read-only from the moment it is handed to a scan engine.
//!
//! Reference prices are consumed as already adjusted for overnight
//! corporate actions; no adjustment happens here.

mod source;

pub use source::{CloseRow, HistoricalClient, ReferenceSource};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::HashMap;
use thiserror::Error;

/// Errors building the reference table. Both variants are fatal to
/// startup: the scanner never starts against a partial universe.
#[derive(Debug, Error)]
pub enum ReferenceError {
    /// The historical source could not supply a full-universe response
    #[error("historical data unavailable: {0}")]
    DataUnavailable(String),
    /// The source answered but supplied no rows
    #[error("historical source returned no closing prices")]
    EmptyUniverse,
}

/// Immutable-after-load mapping of symbol to prior-session close
#[derive(Debug, Clone)]
pub struct ReferencePrices {
    closes: HashMap<String, Decimal>,
}

impl ReferencePrices {
    /// Build the table from source rows.
    ///
    /// Duplicate symbols resolve last-write-wins in source order. That is
    /// a documented default for an upstream data-quality issue, not a
    /// correctness claim, so each duplicate is logged.
    pub fn from_rows(rows: Vec<CloseRow>) -> Self {
        let mut closes = HashMap::with_capacity(rows.len());
        for row in rows {
            if let Some(previous) = closes.insert(row.symbol.clone(), row.close) {
                tracing::warn!(
                    symbol = %row.symbol,
                    kept = %row.close,
                    discarded = %previous,
                    "Duplicate symbol in historical response, keeping later row"
                );
            }
        }
        Self { closes }
    }

    /// Prior close for a symbol, if it is part of the scanned universe
    pub fn get(&self, symbol: &str) -> Option<Decimal> {
        self.closes.get(symbol).copied()
    }

    /// Iterate over the symbols in the universe
    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.closes.keys().map(String::as_str)
    }

    /// Number of symbols in the universe
    pub fn len(&self) -> usize {
        self.closes.len()
    }

    /// Whether the table holds no symbols
    pub fn is_empty(&self) -> bool {
        self.closes.is_empty()
    }
}

/// Fetch the prior session's closes and build the reference table.
///
/// Fails with [`ReferenceError`] if the source errors or yields an empty
/// universe; there is no degraded start.
pub async fn build(
    source: &dyn ReferenceSource,
    session: NaiveDate,
) -> Result<ReferencePrices, ReferenceError> {
    let rows = source.prior_close(session).await?;
    if rows.is_empty() {
        return Err(ReferenceError::EmptyUniverse);
    }

    let table = ReferencePrices::from_rows(rows);
    tracing::info!(symbols = table.len(), %session, "Reference price table built");
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use rust_decimal_macros::dec;

    fn row(symbol: &str, close: Decimal) -> CloseRow {
        CloseRow {
            symbol: symbol.to_string(),
            close,
        }
    }

    struct FixedSource {
        rows: Vec<CloseRow>,
    }

    #[async_trait]
    impl ReferenceSource for FixedSource {
        async fn prior_close(&self, _session: NaiveDate) -> Result<Vec<CloseRow>, ReferenceError> {
            Ok(self.rows.clone())
        }
    }

    struct FailingSource;

    #[async_trait]
    impl ReferenceSource for FailingSource {
        async fn prior_close(&self, _session: NaiveDate) -> Result<Vec<CloseRow>, ReferenceError> {
            Err(ReferenceError::DataUnavailable("connection refused".into()))
        }
    }

    fn session() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, 25).unwrap()
    }

    #[test]
    fn test_from_rows_basic() {
        let table = ReferencePrices::from_rows(vec![
            row("NVDA", dec!(102.71)),
            row("AMZN", dec!(180.60)),
        ]);

        assert_eq!(table.len(), 2);
        assert_eq!(table.get("NVDA"), Some(dec!(102.71)));
        assert_eq!(table.get("TSLA"), None);
    }

    #[test]
    fn test_from_rows_duplicate_last_write_wins() {
        let table = ReferencePrices::from_rows(vec![
            row("NVDA", dec!(100.00)),
            row("NVDA", dec!(102.71)),
        ]);

        assert_eq!(table.len(), 1);
        assert_eq!(table.get("NVDA"), Some(dec!(102.71)));
    }

    #[test]
    fn test_missing_symbol_is_absent_not_zero() {
        let table = ReferencePrices::from_rows(vec![row("NVDA", dec!(102.71))]);
        assert_eq!(table.get("ZZZZ"), None);
    }

    #[tokio::test]
    async fn test_build_from_source() {
        let source = FixedSource {
            rows: vec![row("NVDA", dec!(102.71))],
        };
        let table = build(&source, session()).await.unwrap();
        assert_eq!(table.len(), 1);
    }

    #[tokio::test]
    async fn test_build_empty_universe_is_fatal() {
        let source = FixedSource { rows: vec![] };
        let err = build(&source, session()).await.unwrap_err();
        assert!(matches!(err, ReferenceError::EmptyUniverse));
    }

    #[tokio::test]
    async fn test_build_source_failure_is_fatal() {
        let err = build(&FailingSource, session()).await.unwrap_err();
        assert!(matches!(err, ReferenceError::DataUnavailable(_)));
    }
}

//! Scan command implementation

use crate::alert::{AlertSink, ConsoleSink};
use crate::config::Config;
use crate::feed::{GatewayFeed, MarketFeed, ReplayFeed};
use crate::reference::{self, HistoricalClient};
use crate::scanner::ScanEngine;
use chrono::{NaiveDate, Utc};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Session date (YYYY-MM-DD); defaults to today UTC
    #[arg(short, long)]
    pub date: Option<NaiveDate>,

    /// Replay a gateway capture file instead of connecting live
    #[arg(long, value_name = "FILE")]
    pub replay: Option<PathBuf>,
}

impl ScanArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let session = self.date.unwrap_or_else(|| Utc::now().date_naive());

        // Startup is the only fatal path: no reference table, no scanner
        let source = HistoricalClient::new(config.reference.clone());
        let table = reference::build(&source, session).await?;

        tracing::info!(
            symbols = table.len(),
            %session,
            threshold = %config.scanner.threshold,
            "Reference table ready, starting scan"
        );

        let mut engine = ScanEngine::new(Arc::new(table), config.scanner.threshold);
        let sink = ConsoleSink::new();

        let feed: Box<dyn MarketFeed> = match &self.replay {
            Some(path) => Box::new(ReplayFeed::new(path.clone())),
            None => Box::new(GatewayFeed::new(config.feed.clone())),
        };

        let mut events = feed.subscribe().await?;
        while let Some(event) = events.recv().await {
            if let Some(alert) = engine.handle(event) {
                sink.publish(&alert).await?;
            }
        }

        tracing::info!(alerts = engine.fired_count(), "Event stream ended");
        Ok(())
    }
}

//! Reference command implementation
//!
//! Fetches the reference table without scanning, for checking the
//! historical service wiring before the session opens.

use crate::config::Config;
use crate::reference::{self, HistoricalClient};
use chrono::{NaiveDate, Utc};
use clap::Args;

#[derive(Args, Debug)]
pub struct ReferenceArgs {
    /// Session date (YYYY-MM-DD); defaults to today UTC
    #[arg(short, long)]
    pub date: Option<NaiveDate>,

    /// Print at most this many rows
    #[arg(long, default_value_t = 10)]
    pub limit: usize,
}

impl ReferenceArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let session = self.date.unwrap_or_else(|| Utc::now().date_naive());

        let source = HistoricalClient::new(config.reference.clone());
        let table = reference::build(&source, session).await?;

        println!("{} symbols with a prior close for {}", table.len(), session);

        let mut symbols: Vec<&str> = table.symbols().collect();
        symbols.sort_unstable();
        for symbol in symbols.into_iter().take(self.limit) {
            if let Some(close) = table.get(symbol) {
                println!("  {:<8} {:>12}", symbol, format!("{:.4}", close));
            }
        }

        Ok(())
    }
}

//! Capture replay feed
//!
//! Replays gateway wire messages from a JSON-lines capture file in file
//! order. Used for deterministic end-to-end runs and in tests; the `scan`
//! command exposes it behind `--replay`.

use super::gateway::parse_message;
use super::{MarketEvent, MarketFeed};
use anyhow::Context;
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

/// Feed that replays a capture file of gateway messages
pub struct ReplayFeed {
    path: PathBuf,
}

impl ReplayFeed {
    /// Create a replay feed over the given capture file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl MarketFeed for ReplayFeed {
    async fn subscribe(&self) -> anyhow::Result<mpsc::Receiver<MarketEvent>> {
        let file = tokio::fs::File::open(&self.path)
            .await
            .with_context(|| format!("opening capture file {}", self.path.display()))?;

        tracing::info!(path = %self.path.display(), "Replaying capture file");

        let (event_tx, event_rx) = mpsc::channel(1024);

        tokio::spawn(async move {
            let mut lines = BufReader::new(file).lines();
            let mut skipped = 0u64;

            while let Ok(Some(line)) = lines.next_line().await {
                if line.trim().is_empty() {
                    continue;
                }
                match parse_message(&line) {
                    Some(event) => {
                        if event_tx.send(event).await.is_err() {
                            tracing::debug!("Event receiver dropped, stopping replay");
                            return;
                        }
                    }
                    None => skipped += 1,
                }
            }

            if skipped > 0 {
                tracing::warn!(skipped, "Capture lines did not parse as gateway messages");
            }
            tracing::info!("Replay finished");
        });

        Ok(event_rx)
    }
}

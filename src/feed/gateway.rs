//! Live market-data gateway feed
//!
//! Connects to the internal gateway's WebSocket stream, subscribes to the
//! configured dataset for the full symbol universe, and forwards typed
//! events. Wire messages are JSON objects discriminated by a `type` field;
//! message types the scanner has no use for are skipped at the parse layer.

use super::{MarketEvent, MarketFeed, QuoteUpdate, SymbolMapping};
use crate::config::FeedConfig;
use crate::ws::{WsClient, WsConfig, WsMessage};
use async_trait::async_trait;
use chrono::DateTime;
use serde::Deserialize;
use std::time::Duration;
use tokio::sync::mpsc;

/// Wire message from the gateway
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum GatewayMessage {
    Mapping {
        instrument_id: u32,
        symbol: String,
    },
    Quote {
        instrument_id: u32,
        /// Exchange event time, nanoseconds since epoch
        ts_event: u64,
        bid_px: i64,
        ask_px: i64,
    },
    Heartbeat {},
}

/// Parse one gateway wire message into a typed event.
///
/// Returns `None` for malformed lines and for message types this build
/// does not know, so a gateway rollout with new message kinds does not
/// break running scanners.
pub(crate) fn parse_message(msg: &str) -> Option<MarketEvent> {
    let parsed: GatewayMessage = serde_json::from_str(msg).ok()?;

    let event = match parsed {
        GatewayMessage::Mapping {
            instrument_id,
            symbol,
        } => MarketEvent::Mapping(SymbolMapping {
            instrument_id,
            symbol,
        }),
        GatewayMessage::Quote {
            instrument_id,
            ts_event,
            bid_px,
            ask_px,
        } => MarketEvent::Quote(QuoteUpdate {
            instrument_id,
            ts_event: DateTime::from_timestamp_nanos(ts_event as i64),
            bid_px,
            ask_px,
        }),
        GatewayMessage::Heartbeat {} => MarketEvent::Heartbeat,
    };

    Some(event)
}

/// WebSocket feed from the market-data gateway
pub struct GatewayFeed {
    config: FeedConfig,
}

impl GatewayFeed {
    /// Create a new gateway feed
    pub fn new(config: FeedConfig) -> Self {
        Self { config }
    }

    /// Build the subscribe request sent on each (re)connect
    fn subscribe_request(&self) -> String {
        serde_json::json!({
            "action": "subscribe",
            "dataset": self.config.dataset,
            "schema": "mbp-1",
            "symbols": "ALL_SYMBOLS",
        })
        .to_string()
    }

    /// Run the message processing loop
    async fn run_message_loop(
        mut ws_rx: mpsc::Receiver<WsMessage>,
        event_tx: mpsc::Sender<MarketEvent>,
    ) {
        while let Some(msg) = ws_rx.recv().await {
            match msg {
                WsMessage::Text(text) => {
                    if let Some(event) = parse_message(&text) {
                        if event_tx.send(event).await.is_err() {
                            tracing::debug!("Event receiver dropped, stopping feed");
                            break;
                        }
                    }
                }
                WsMessage::Connected => {
                    tracing::info!("Gateway feed connected");
                }
                WsMessage::Disconnected => {
                    tracing::warn!("Gateway feed disconnected");
                    break;
                }
                WsMessage::Reconnecting { attempt } => {
                    tracing::warn!(attempt, "Gateway feed reconnecting...");
                }
                WsMessage::Binary(_) => {
                    // The gateway stream is text-only
                }
            }
        }
    }
}

#[async_trait]
impl MarketFeed for GatewayFeed {
    async fn subscribe(&self) -> anyhow::Result<mpsc::Receiver<MarketEvent>> {
        let (event_tx, event_rx) = mpsc::channel(1024);

        tracing::info!(
            url = %self.config.gateway_url,
            dataset = %self.config.dataset,
            "Subscribing to gateway feed"
        );

        let config = WsConfig::new(&self.config.gateway_url)
            .subscribe_message(self.subscribe_request())
            .max_reconnects(10)
            .initial_delay(Duration::from_secs(1))
            .max_delay(Duration::from_secs(60))
            .ping_interval(Duration::from_secs(30));

        let client = WsClient::new(config);
        let ws_rx = client.connect();

        tokio::spawn(async move {
            Self::run_message_loop(ws_rx, event_tx).await;
        });

        Ok(event_rx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::PX_NULL;

    fn feed() -> GatewayFeed {
        GatewayFeed::new(FeedConfig {
            gateway_url: "wss://gateway.example.com/stream".to_string(),
            dataset: "EQUS.MINI".to_string(),
        })
    }

    #[test]
    fn test_subscribe_request_contents() {
        let req = feed().subscribe_request();
        assert!(req.contains(r#""dataset":"EQUS.MINI""#));
        assert!(req.contains(r#""schema":"mbp-1""#));
        assert!(req.contains(r#""symbols":"ALL_SYMBOLS""#));
    }

    #[test]
    fn test_parse_mapping_message() {
        let msg = r#"{"type":"mapping","instrument_id":1144,"symbol":"NVDA"}"#;
        let event = parse_message(msg).unwrap();
        assert_eq!(
            event,
            MarketEvent::Mapping(SymbolMapping {
                instrument_id: 1144,
                symbol: "NVDA".to_string(),
            })
        );
    }

    #[test]
    fn test_parse_quote_message() {
        let msg = r#"{
            "type": "quote",
            "instrument_id": 1144,
            "ts_event": 1745395201688717194,
            "bid_px": 97950000000,
            "ask_px": 98430000000
        }"#;

        match parse_message(msg).unwrap() {
            MarketEvent::Quote(q) => {
                assert_eq!(q.instrument_id, 1144);
                assert_eq!(q.bid_px, 97_950_000_000);
                assert_eq!(q.ask_px, 98_430_000_000);
                assert_eq!(q.ts_event.timestamp_subsec_nanos(), 688_717_194);
            }
            other => panic!("expected quote, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_quote_with_null_side() {
        let msg = format!(
            r#"{{"type":"quote","instrument_id":7,"ts_event":0,"bid_px":{},"ask_px":100000000}}"#,
            PX_NULL
        );
        match parse_message(&msg).unwrap() {
            MarketEvent::Quote(q) => assert_eq!(q.bid_px, PX_NULL),
            other => panic!("expected quote, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_heartbeat() {
        let msg = r#"{"type":"heartbeat"}"#;
        assert_eq!(parse_message(msg).unwrap(), MarketEvent::Heartbeat);
    }

    #[test]
    fn test_parse_unknown_type_skipped() {
        let msg = r#"{"type":"imbalance","instrument_id":7,"paired_qty":100}"#;
        assert!(parse_message(msg).is_none());
    }

    #[test]
    fn test_parse_invalid_json() {
        assert!(parse_message("not valid json").is_none());
    }

    #[tokio::test]
    async fn test_message_loop_forwards_events() {
        let (ws_tx, ws_rx) = mpsc::channel(10);
        let (event_tx, mut event_rx) = mpsc::channel(10);

        let handle = tokio::spawn(async move {
            GatewayFeed::run_message_loop(ws_rx, event_tx).await;
        });

        let msg = r#"{"type":"mapping","instrument_id":5,"symbol":"AMZN"}"#;
        ws_tx.send(WsMessage::Text(msg.to_string())).await.unwrap();

        let event = event_rx.recv().await.unwrap();
        assert!(matches!(event, MarketEvent::Mapping(_)));

        ws_tx.send(WsMessage::Disconnected).await.unwrap();
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_message_loop_skips_invalid() {
        let (ws_tx, ws_rx) = mpsc::channel(10);
        let (event_tx, mut event_rx) = mpsc::channel(10);

        let handle = tokio::spawn(async move {
            GatewayFeed::run_message_loop(ws_rx, event_tx).await;
        });

        ws_tx
            .send(WsMessage::Text("garbage".to_string()))
            .await
            .unwrap();
        ws_tx
            .send(WsMessage::Text(r#"{"type":"heartbeat"}"#.to_string()))
            .await
            .unwrap();

        // Only the heartbeat makes it through
        let event = event_rx.recv().await.unwrap();
        assert_eq!(event, MarketEvent::Heartbeat);

        ws_tx.send(WsMessage::Disconnected).await.unwrap();
        handle.await.unwrap();
    }
}

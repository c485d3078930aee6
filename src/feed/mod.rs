//! Market data feed module
//!
//! Delivers the live event sequence the scan engine consumes: symbol
//! mappings, top-of-book quotes, and gateway heartbeats.
//!
//! Feed ordering contract: the gateway emits the symbol mapping for an
//! instrument before its first quote update. The engine drops quotes that
//! arrive ahead of their mapping rather than failing.

mod gateway;
mod replay;
mod types;

pub use gateway::GatewayFeed;
pub use replay::ReplayFeed;
pub use types::{
    InstrumentId, MarketEvent, QuoteUpdate, SymbolMapping, PX_DECIMALS, PX_NULL,
};

use async_trait::async_trait;
use tokio::sync::mpsc;

/// Trait for market event feed implementations
#[async_trait]
pub trait MarketFeed: Send + Sync {
    /// Subscribe to the event stream
    async fn subscribe(&self) -> anyhow::Result<mpsc::Receiver<MarketEvent>>;
}

//! Market event types
//!
//! The gateway delivers prices as fixed-point integers with nine implied
//! decimal places. A side of the book with no resting orders carries the
//! null sentinel instead of a price.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Instrument identifier assigned by the feed. Only valid within the
/// session it was received in.
pub type InstrumentId = u32;

/// Implied decimal places of a fixed-point wire price.
pub const PX_DECIMALS: u32 = 9;

/// Sentinel wire price meaning "no quote on this side of the book".
pub const PX_NULL: i64 = i64::MAX;

/// Binds an instrument id to its ticker symbol for the session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolMapping {
    pub instrument_id: InstrumentId,
    pub symbol: String,
}

/// Top-of-book snapshot for a single instrument
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteUpdate {
    pub instrument_id: InstrumentId,
    /// Exchange event time (nanosecond precision)
    pub ts_event: DateTime<Utc>,
    /// Best bid, fixed-point, or [`PX_NULL`]
    pub bid_px: i64,
    /// Best ask, fixed-point, or [`PX_NULL`]
    pub ask_px: i64,
}

impl QuoteUpdate {
    /// Whether both sides of the book carry a real price
    pub fn has_both_sides(&self) -> bool {
        self.bid_px != PX_NULL && self.ask_px != PX_NULL
    }

    /// Midpoint of best bid and ask in real currency units.
    ///
    /// Returns `None` when either side of the book is empty. The sum is
    /// widened to `i128` so two near-sentinel prices cannot overflow.
    pub fn mid_price(&self) -> Option<Decimal> {
        if !self.has_both_sides() {
            return None;
        }
        let sum = self.bid_px as i128 + self.ask_px as i128;
        Some(Decimal::from_i128_with_scale(sum, PX_DECIMALS) / Decimal::TWO)
    }
}

/// A single message from the live feed
///
/// Dispatched exhaustively by the scan engine: a new feed message variant
/// has to be handled (or explicitly ignored) at compile time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MarketEvent {
    /// Instrument id to symbol binding; may repeat
    Mapping(SymbolMapping),
    /// Top-of-book update
    Quote(QuoteUpdate),
    /// Gateway liveness message, not relevant to scanning
    Heartbeat,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn quote(bid_px: i64, ask_px: i64) -> QuoteUpdate {
        QuoteUpdate {
            instrument_id: 1,
            ts_event: Utc::now(),
            bid_px,
            ask_px,
        }
    }

    #[test]
    fn test_mid_price_exact() {
        // 97.95 / 98.43 at nine implied decimals
        let q = quote(97_950_000_000, 98_430_000_000);
        assert_eq!(q.mid_price().unwrap(), dec!(98.19));
    }

    #[test]
    fn test_mid_price_null_bid() {
        let q = quote(PX_NULL, 98_430_000_000);
        assert!(!q.has_both_sides());
        assert!(q.mid_price().is_none());
    }

    #[test]
    fn test_mid_price_null_ask() {
        let q = quote(97_950_000_000, PX_NULL);
        assert!(q.mid_price().is_none());
    }

    #[test]
    fn test_mid_price_no_overflow_near_sentinel() {
        // Two maximal real prices must not overflow the sum
        let q = quote(i64::MAX - 1, i64::MAX - 1);
        assert!(q.mid_price().is_some());
    }

    #[test]
    fn test_event_serde_round_trip() {
        let event = MarketEvent::Mapping(SymbolMapping {
            instrument_id: 42,
            symbol: "NVDA".to_string(),
        });
        let json = serde_json::to_string(&event).unwrap();
        let back: MarketEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}

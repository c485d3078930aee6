//! Scan engine types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Per-symbol alert state for the session
///
/// Every symbol in the reference universe starts `Armed`. `Fired` is
/// terminal: the engine never re-arms a symbol within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuoteState {
    /// No alert emitted yet
    Armed,
    /// Alert emitted; further crossings are suppressed
    Fired,
}

/// A detected price movement past the configured threshold
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    /// Unique alert identifier
    pub id: Uuid,
    /// Ticker symbol
    pub symbol: String,
    /// Exchange event time of the triggering quote (nanosecond precision)
    pub ts_event: DateTime<Utc>,
    /// Mid-price that crossed the threshold
    pub mid: Decimal,
    /// Prior-session close the move is measured against
    pub reference: Decimal,
    /// Relative move as a fraction (0.044 = 4.4%)
    pub move_pct: Decimal,
}

impl Alert {
    /// Create a new alert
    pub fn new(
        symbol: String,
        ts_event: DateTime<Utc>,
        mid: Decimal,
        reference: Decimal,
        move_pct: Decimal,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            symbol,
            ts_event,
            mid,
            reference,
            move_pct,
        }
    }

    /// Relative move expressed in percent
    pub fn percent(&self) -> Decimal {
        self.move_pct * Decimal::ONE_HUNDRED
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_alert_percent() {
        let alert = Alert::new(
            "NVDA".to_string(),
            Utc::now(),
            dec!(98.19),
            dec!(102.71),
            dec!(0.044),
        );
        assert_eq!(alert.percent(), dec!(4.400));
    }

    #[test]
    fn test_alert_ids_unique() {
        let a = Alert::new("A".into(), Utc::now(), dec!(1), dec!(2), dec!(0.5));
        let b = Alert::new("A".into(), Utc::now(), dec!(1), dec!(2), dec!(0.5));
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_quote_state_transitions_one_way() {
        // Fired is terminal; there is no constructor back to Armed
        assert_ne!(QuoteState::Armed, QuoteState::Fired);
    }
}

//! Price movement scan engine
//!
//! Stateful, single-threaded consumer of the live event sequence. For each
//! quote it resolves the instrument to a symbol, computes the mid-price,
//! measures the relative move against the prior-session close, and emits at
//! most one alert per symbol per session.
//!
//! Every per-event drop (unmapped instrument, empty book side, symbol
//! outside the universe, degenerate reference) is silent to the caller and
//! counted in metrics; only startup data acquisition can fail the scanner.

use crate::feed::{InstrumentId, MarketEvent, QuoteUpdate, SymbolMapping};
use crate::reference::ReferencePrices;
use crate::telemetry::metric;
use metrics::counter;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;

use super::types::{Alert, QuoteState};

/// Scan engine instance
///
/// Owns its resolution and alert-state maps exclusively; the reference
/// table is shared read-only. Multiple independent engines (per test, per
/// feed partition) do not interfere.
pub struct ScanEngine {
    /// Minimum relative move to alert, strictly exceeded
    threshold: Decimal,

    /// Prior-session closes for the scanned universe
    reference: Arc<ReferencePrices>,

    /// Instrument id to symbol, grown from mapping events
    resolution: HashMap<InstrumentId, String>,

    /// Armed/fired state per universe symbol
    state: HashMap<String, QuoteState>,
}

impl ScanEngine {
    /// Create an engine over the given reference table and threshold.
    ///
    /// Every symbol in the table starts `Armed`; symbols outside the table
    /// are never tracked.
    pub fn new(reference: Arc<ReferencePrices>, threshold: Decimal) -> Self {
        let state = reference
            .symbols()
            .map(|symbol| (symbol.to_string(), QuoteState::Armed))
            .collect();

        Self {
            threshold,
            reference,
            resolution: HashMap::new(),
            state,
        }
    }

    /// Process one feed event, producing an alert if a threshold was
    /// crossed for a still-armed symbol.
    pub fn handle(&mut self, event: MarketEvent) -> Option<Alert> {
        counter!(metric::EVENTS_TOTAL).increment(1);

        match event {
            MarketEvent::Mapping(mapping) => {
                self.apply_mapping(mapping);
                None
            }
            MarketEvent::Quote(quote) => self.evaluate_quote(quote),
            MarketEvent::Heartbeat => None,
        }
    }

    /// Number of instrument ids currently resolved
    pub fn resolved_instruments(&self) -> usize {
        self.resolution.len()
    }

    /// Number of symbols that have fired this session
    pub fn fired_count(&self) -> usize {
        self.state
            .values()
            .filter(|s| **s == QuoteState::Fired)
            .count()
    }

    /// Insert or overwrite a resolution entry. Re-delivery of the same
    /// mapping is a no-op; entries are never removed during a session.
    fn apply_mapping(&mut self, mapping: SymbolMapping) {
        self.resolution.insert(mapping.instrument_id, mapping.symbol);
    }

    fn evaluate_quote(&mut self, quote: QuoteUpdate) -> Option<Alert> {
        // Feed contract says the mapping precedes the first quote; a quote
        // that beats its mapping is dropped, not an error
        let Some(symbol) = self.resolution.get(&quote.instrument_id) else {
            counter!(metric::QUOTES_UNMAPPED_TOTAL).increment(1);
            return None;
        };

        let Some(mid) = quote.mid_price() else {
            counter!(metric::QUOTES_EMPTY_BOOK_TOTAL).increment(1);
            return None;
        };

        let Some(reference) = self.reference.get(symbol) else {
            // Resolved, but not part of the scanned universe
            counter!(metric::QUOTES_OUT_OF_UNIVERSE_TOTAL).increment(1);
            return None;
        };

        if reference <= Decimal::ZERO {
            // A close of zero or below is an upstream data anomaly; the
            // move is undefined, never a crash
            counter!(metric::QUOTES_DEGENERATE_REFERENCE_TOTAL).increment(1);
            return None;
        }

        let move_pct = ((mid - reference) / reference).abs();
        if move_pct <= self.threshold {
            return None;
        }

        match self.state.get_mut(symbol.as_str()) {
            Some(state) if *state == QuoteState::Armed => {
                *state = QuoteState::Fired;
                counter!(metric::ALERTS_EMITTED_TOTAL).increment(1);
                Some(Alert::new(
                    symbol.clone(),
                    quote.ts_event,
                    mid,
                    reference,
                    move_pct,
                ))
            }
            _ => None,
        }
    }
}

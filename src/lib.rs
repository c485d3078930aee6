//! movescan: Real-time price movement scanner for the US equities universe
//!
//! This library provides the core components for:
//! - Reference price table built from the bulk historical service
//! - Live market event feed from the internal gateway WebSocket
//! - Capture replay for deterministic runs
//! - Per-instrument scan engine with one-shot alert semantics
//! - Console and log alert sinks
//! - Structured logging and Prometheus metrics

pub mod alert;
pub mod cli;
pub mod config;
pub mod feed;
pub mod reference;
pub mod scanner;
pub mod telemetry;
pub mod ws;

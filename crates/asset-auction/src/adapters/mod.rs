//! # Adapters
//!
//! Outbound port implementations: in-memory world state with transactions,
//! and notification sinks.

pub mod event_sink;
pub mod memory_ledger;

pub use event_sink::{RecordingEventEmitter, TracingEventEmitter};
pub use memory_ledger::{EmittedEvent, InMemoryLedger, LedgerTransaction};

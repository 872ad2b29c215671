//! # Event Sinks
//!
//! Standalone [`EventEmitter`] adapters. Notifications emitted inside a
//! [`LedgerTransaction`](super::LedgerTransaction) go to the ledger instead.

use super::memory_ledger::EmittedEvent;
use crate::ports::{EmitError, EventEmitter};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::info;

/// Keeps every notification in memory. Can be told to fail.
#[derive(Default)]
pub struct RecordingEventEmitter {
    events: RwLock<Vec<EmittedEvent>>,
    fail: AtomicBool,
}

impl RecordingEventEmitter {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent emit fail.
    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    /// Everything emitted so far.
    pub fn events(&self) -> Vec<EmittedEvent> {
        self.events.read().clone()
    }

    /// Most recent notification.
    pub fn last(&self) -> Option<EmittedEvent> {
        self.events.read().last().cloned()
    }
}

impl EventEmitter for RecordingEventEmitter {
    fn emit(&self, topic: &str, payload: &[u8]) -> Result<(), EmitError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(EmitError("event channel closed".to_string()));
        }
        self.events.write().push(EmittedEvent {
            topic: topic.to_string(),
            payload: payload.to_vec(),
        });
        Ok(())
    }
}

/// Writes every notification to the log.
#[derive(Clone, Debug, Default)]
pub struct TracingEventEmitter;

impl EventEmitter for TracingEventEmitter {
    fn emit(&self, topic: &str, payload: &[u8]) -> Result<(), EmitError> {
        info!(
            topic,
            payload = %String::from_utf8_lossy(payload),
            "Ledger notification"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_emitter() {
        let emitter = RecordingEventEmitter::new();
        emitter.emit("AddAsset", b"Asset added: a1").unwrap();

        let last = emitter.last().unwrap();
        assert_eq!(last.topic, "AddAsset");
        assert_eq!(last.payload_str(), "Asset added: a1");
    }

    #[test]
    fn test_recording_emitter_failure() {
        let emitter = RecordingEventEmitter::new();
        emitter.set_failing(true);
        assert!(emitter.emit("AddAsset", b"x").is_err());
        assert!(emitter.events().is_empty());
    }

    #[test]
    fn test_tracing_emitter_never_fails() {
        assert!(TracingEventEmitter.emit("CloseAuction", b"Auction closing: 1").is_ok());
    }
}

//! # In-Memory Ledger
//!
//! Reference world state for tests and local runs. Each key carries a
//! version that bumps on every committed write.
//!
//! [`InMemoryLedger::begin`] opens a [`LedgerTransaction`] that behaves like
//! the host transaction a lifecycle operation runs in:
//!
//! - writes and notifications are buffered, reads see buffered writes
//! - the versions of every key read are remembered
//! - [`LedgerTransaction::commit`] applies everything at once, or fails with
//!   [`LedgerError::Conflict`] if another commit touched a key this
//!   transaction read
//! - dropping the transaction discards everything
//!
//! Writing straight to the ledger through its own [`LedgerStore`] impl
//! bypasses all of this and is meant for seeding fixtures.

use crate::ports::{EmitError, EventEmitter, LedgerError, LedgerStore};
use parking_lot::{Mutex, RwLock};
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::debug;

/// A notification that reached the ledger.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmittedEvent {
    /// Topic
    pub topic: String,
    /// Raw payload
    pub payload: Vec<u8>,
}

impl EmittedEvent {
    /// Payload as text, lossy.
    pub fn payload_str(&self) -> String {
        String::from_utf8_lossy(&self.payload).into_owned()
    }
}

#[derive(Clone, Debug)]
struct VersionedValue {
    value: Vec<u8>,
    version: u64,
}

/// In-memory world state with committed notification log.
#[derive(Default)]
pub struct InMemoryLedger {
    state: RwLock<HashMap<String, VersionedValue>>,
    events: RwLock<Vec<EmittedEvent>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl InMemoryLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a buffered transaction.
    pub fn begin(&self) -> LedgerTransaction<'_> {
        LedgerTransaction {
            ledger: self,
            read_versions: Mutex::new(BTreeMap::new()),
            writes: Mutex::new(BTreeMap::new()),
            events: Mutex::new(Vec::new()),
        }
    }

    /// Make every subsequent read fail.
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent write (and commit) fail.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Committed bytes at `key`, bypassing failure injection.
    pub fn raw(&self, key: &str) -> Option<Vec<u8>> {
        self.state.read().get(key).map(|v| v.value.clone())
    }

    /// Check if a key has been committed.
    pub fn contains_key(&self, key: &str) -> bool {
        self.state.read().contains_key(key)
    }

    /// Number of committed keys.
    pub fn len(&self) -> usize {
        self.state.read().len()
    }

    /// Check if nothing has been committed.
    pub fn is_empty(&self) -> bool {
        self.state.read().is_empty()
    }

    /// Committed version of `key`; 0 when absent.
    pub fn version(&self, key: &str) -> u64 {
        self.state.read().get(key).map_or(0, |v| v.version)
    }

    /// Notifications from committed transactions, oldest first.
    pub fn committed_events(&self) -> Vec<EmittedEvent> {
        self.events.read().clone()
    }

    fn check_reads(&self) -> Result<(), LedgerError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(LedgerError::Io("injected read failure".to_string()));
        }
        Ok(())
    }

    fn check_writes(&self) -> Result<(), LedgerError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(LedgerError::Io("injected write failure".to_string()));
        }
        Ok(())
    }

    fn read_versioned(&self, key: &str) -> Result<(Option<Vec<u8>>, u64), LedgerError> {
        self.check_reads()?;
        let state = self.state.read();
        Ok(match state.get(key) {
            Some(v) => (Some(v.value.clone()), v.version),
            None => (None, 0),
        })
    }
}

impl LedgerStore for InMemoryLedger {
    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, LedgerError> {
        self.read_versioned(key).map(|(value, _)| value)
    }

    fn put_state(&self, key: &str, value: Vec<u8>) -> Result<(), LedgerError> {
        self.check_writes()?;
        let mut state = self.state.write();
        let version = state.get(key).map_or(0, |v| v.version) + 1;
        state.insert(key.to_string(), VersionedValue { value, version });
        Ok(())
    }
}

/// Buffered unit of work over an [`InMemoryLedger`].
pub struct LedgerTransaction<'a> {
    ledger: &'a InMemoryLedger,
    read_versions: Mutex<BTreeMap<String, u64>>,
    writes: Mutex<BTreeMap<String, Vec<u8>>>,
    events: Mutex<Vec<EmittedEvent>>,
}

impl<'a> LedgerTransaction<'a> {
    /// Apply all buffered writes and notifications atomically.
    ///
    /// Returns the number of keys written.
    pub fn commit(self) -> Result<usize, LedgerError> {
        self.ledger.check_writes()?;

        let read_versions = self.read_versions.into_inner();
        let writes = self.writes.into_inner();
        let events = self.events.into_inner();

        let mut state = self.ledger.state.write();
        for (key, seen) in &read_versions {
            let current = state.get(key).map_or(0, |v| v.version);
            if current != *seen {
                debug!(key = %key, seen, current, "Read conflict, rejecting commit");
                return Err(LedgerError::Conflict(key.clone()));
            }
        }

        // Held with the state lock so notification order follows commit order.
        let mut log = self.ledger.events.write();
        let written = writes.len();
        for (key, value) in writes {
            let version = state.get(&key).map_or(0, |v| v.version) + 1;
            state.insert(key, VersionedValue { value, version });
        }
        log.extend(events);
        drop(log);
        drop(state);

        debug!(written, "Transaction committed");
        Ok(written)
    }
}

impl LedgerStore for LedgerTransaction<'_> {
    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, LedgerError> {
        if let Some(value) = self.writes.lock().get(key) {
            return Ok(Some(value.clone()));
        }

        let (value, version) = self.ledger.read_versioned(key)?;
        self.read_versions
            .lock()
            .entry(key.to_string())
            .or_insert(version);
        Ok(value)
    }

    fn put_state(&self, key: &str, value: Vec<u8>) -> Result<(), LedgerError> {
        self.ledger.check_writes()?;
        self.writes.lock().insert(key.to_string(), value);
        Ok(())
    }
}

impl EventEmitter for LedgerTransaction<'_> {
    fn emit(&self, topic: &str, payload: &[u8]) -> Result<(), EmitError> {
        self.events.lock().push(EmittedEvent {
            topic: topic.to_string(),
            payload: payload.to_vec(),
        });
        Ok(())
    }
}

//! # Outbound Ports
//!
//! Traits for the host collaborators: the byte-oriented ledger, the
//! notification channel, and signer recovery.
//!
//! The host runs each lifecycle operation as one atomic unit. Adapters do not
//! need to be transactional themselves, but whatever sits behind
//! [`LedgerStore`] must apply an operation's writes all-or-nothing.

use crate::domain::{AuctionError, Digest};
use thiserror::Error;

/// Ledger I/O failures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LedgerError {
    /// Backend rejected or could not complete the request.
    #[error("Ledger I/O error: {0}")]
    Io(String),

    /// Backend unreachable.
    #[error("Ledger unavailable")]
    Unavailable,

    /// A key read by the transaction changed before it committed.
    #[error("Read conflict on key {0}")]
    Conflict(String),
}

impl From<LedgerError> for AuctionError {
    fn from(err: LedgerError) -> Self {
        AuctionError::StoreFailure(err.to_string())
    }
}

/// Notification channel failure.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct EmitError(pub String);

/// Byte-oriented key-value world state - outbound port.
pub trait LedgerStore {
    /// Read a key. `Ok(None)` when absent.
    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, LedgerError>;

    /// Write a key.
    fn put_state(&self, key: &str, value: Vec<u8>) -> Result<(), LedgerError>;
}

/// Notification channel - outbound port.
pub trait EventEmitter {
    /// Publish one notification.
    fn emit(&self, topic: &str, payload: &[u8]) -> Result<(), EmitError>;
}

/// Signer recovery - outbound port.
///
/// A predicate: malformed input yields `false`, never an error.
pub trait SignatureVerifier {
    /// Check that `signature` over `digest` recovers to `claimed_address`.
    fn verify(&self, digest: &Digest, signature: &[u8], claimed_address: &str) -> bool;
}

impl<T: LedgerStore + ?Sized> LedgerStore for &T {
    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, LedgerError> {
        (**self).get_state(key)
    }

    fn put_state(&self, key: &str, value: Vec<u8>) -> Result<(), LedgerError> {
        (**self).put_state(key, value)
    }
}

impl<T: EventEmitter + ?Sized> EventEmitter for &T {
    fn emit(&self, topic: &str, payload: &[u8]) -> Result<(), EmitError> {
        (**self).emit(topic, payload)
    }
}

impl<T: SignatureVerifier + ?Sized> SignatureVerifier for &T {
    fn verify(&self, digest: &Digest, signature: &[u8], claimed_address: &str) -> bool {
        (**self).verify(digest, signature, claimed_address)
    }
}

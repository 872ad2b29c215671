//! # Domain Errors
//!
//! Error types for the asset/auction lifecycle.
//!
//! Every failure carries a closed [`ErrorKind`] so callers can branch on the
//! kind instead of parsing message text.

use super::value_objects::{AuctionId, AuctionStatus};
use thiserror::Error;

/// Closed classification of lifecycle failures.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Asset or auction absent.
    NotFound,
    /// Duplicate asset id.
    AlreadyExists,
    /// Asset already has an open or closing auction.
    AuctionPending,
    /// Auction result signature check failed.
    InvalidResult,
    /// Underlying ledger read/write (or notification) failure.
    StoreFailure,
    /// Caller-supplied arguments could not be decoded.
    MalformedInput,
    /// Status transition rejected. Only produced with strict transitions.
    InvalidTransition,
}

impl ErrorKind {
    /// Stable lowercase label, used for metrics and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::AlreadyExists => "already_exists",
            Self::AuctionPending => "auction_pending",
            Self::InvalidResult => "invalid_result",
            Self::StoreFailure => "store_failure",
            Self::MalformedInput => "malformed_input",
            Self::InvalidTransition => "invalid_transition",
        }
    }
}

/// Asset/auction lifecycle errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuctionError {
    /// No asset stored under this id.
    #[error("Asset not found: {0}")]
    AssetNotFound(String),

    /// No auction stored under this id.
    #[error("Auction not found: {0}")]
    AuctionNotFound(AuctionId),

    /// An asset with this id already exists.
    #[error("Asset with ID {0} already exists")]
    AssetAlreadyExists(String),

    /// The asset is already tied to an open or closing auction.
    #[error("Pending auction {auction_id} on asset {asset_id}")]
    AuctionPending {
        /// Asset id
        asset_id: String,
        /// Auction currently holding the asset
        auction_id: AuctionId,
    },

    /// The submitted auction result is not signed by its claimed bidder.
    #[error("Invalid auction result for auction {auction_id}")]
    InvalidResult {
        /// Auction the result refers to
        auction_id: AuctionId,
    },

    /// Ledger read or write failed.
    #[error("Store failure: {0}")]
    StoreFailure(String),

    /// A persisted record could not be decoded.
    #[error("Corrupt record at key {key}: {reason}")]
    CorruptRecord {
        /// Ledger key
        key: String,
        /// Decoder message
        reason: String,
    },

    /// The notification for a completed operation could not be emitted.
    #[error("Error setting event {topic}: {reason}")]
    EventEmission {
        /// Event topic
        topic: String,
        /// Emitter message
        reason: String,
    },

    /// Caller arguments could not be decoded or validated.
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// Status transition rejected by strict transition checking.
    #[error("Invalid auction transition: {from} -> {to}")]
    InvalidTransition {
        /// Current status
        from: AuctionStatus,
        /// Attempted status
        to: AuctionStatus,
    },
}

impl AuctionError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::AssetNotFound(_) | Self::AuctionNotFound(_) => ErrorKind::NotFound,
            Self::AssetAlreadyExists(_) => ErrorKind::AlreadyExists,
            Self::AuctionPending { .. } => ErrorKind::AuctionPending,
            Self::InvalidResult { .. } => ErrorKind::InvalidResult,
            // Emission is part of the same host transaction as the writes.
            Self::StoreFailure(_) | Self::CorruptRecord { .. } | Self::EventEmission { .. } => {
                ErrorKind::StoreFailure
            }
            Self::MalformedInput(_) => ErrorKind::MalformedInput,
            Self::InvalidTransition { .. } => ErrorKind::InvalidTransition,
        }
    }
}

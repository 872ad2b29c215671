//! # Domain Value Objects
//!
//! Identifiers, digests and the auction status machine.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Auction identifier. Allocated from the ledger counter, starting at 1.
pub type AuctionId = u64;

/// 32-byte SHA3-256 digest of a canonical field encoding.
pub type Digest = [u8; 32];

/// Sentinel stored in `Asset::pending_auction_id` when no auction is in flight.
pub const NO_PENDING_AUCTION: AuctionId = 0;

/// Auction status machine.
///
/// ```text
/// open ──close──→ closing ──finalize──→ closed
///   │                │                    ↑
///   └────cancel──────┴──────cancel────────┘
/// ```
///
/// `closed` is terminal; nothing moves an auction backward.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuctionStatus {
    /// Accepting bids on the external venue.
    #[default]
    Open,
    /// Bidding stopped, awaiting the signed result.
    Closing,
    /// Finalized or cancelled.
    Closed,
}

impl AuctionStatus {
    /// Check if terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Closed)
    }

    /// Persisted representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closing => "closing",
            Self::Closed => "closed",
        }
    }
}

impl fmt::Display for AuctionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle operations that move an auction's status.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    /// `CloseAuction`
    Close,
    /// `CancelAuction`
    Cancel,
    /// `FinalizeAuction`
    Finalize,
}

impl Transition {
    /// Status the auction ends up in.
    pub fn target(&self) -> AuctionStatus {
        match self {
            Self::Close => AuctionStatus::Closing,
            Self::Cancel | Self::Finalize => AuctionStatus::Closed,
        }
    }

    /// Whether a strict lifecycle accepts this transition from `current`.
    pub fn allowed_from(&self, current: AuctionStatus) -> bool {
        match self {
            Self::Close => current == AuctionStatus::Open,
            Self::Cancel => !current.is_terminal(),
            Self::Finalize => current == AuctionStatus::Closing,
        }
    }
}

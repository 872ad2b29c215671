//! # Lifecycle Notifications
//!
//! One notification is emitted as the last step of every mutating operation.
//!
//! | Operation | Topic | Payload |
//! |-----------|-------|---------|
//! | `AddAsset` | `AddAsset` | `Asset added: <id>` |
//! | `StartAuction` | `StartAuction` | `Auction start: <n>` |
//! | `CancelAuction` | `CancelAuction` | `Auction cancel: <n>` |
//! | `CloseAuction` | `CloseAuction` | `Auction closing: <n>` |
//! | `FinalizeAuction` | `AuctionClosed` | `Owner changed for asset: <id>` / `Owner no change for asset: <id>` |

use crate::domain::AuctionId;

/// Notification topics.
pub mod topics {
    /// Asset registered.
    pub const ADD_ASSET: &str = "AddAsset";
    /// Auction opened.
    pub const START_AUCTION: &str = "StartAuction";
    /// Auction cancelled.
    pub const CANCEL_AUCTION: &str = "CancelAuction";
    /// Auction stopped accepting bids.
    pub const CLOSE_AUCTION: &str = "CloseAuction";
    /// Auction finalized.
    pub const AUCTION_CLOSED: &str = "AuctionClosed";
}

/// A lifecycle notification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuctionEvent {
    /// Asset registered.
    AssetAdded {
        /// Asset id
        asset_id: String,
    },
    /// Auction opened.
    AuctionStarted {
        /// Allocated auction id
        auction_id: AuctionId,
    },
    /// Auction cancelled and asset released.
    AuctionCancelled {
        /// Auction id
        auction_id: AuctionId,
    },
    /// Auction closing.
    AuctionClosing {
        /// Auction id
        auction_id: AuctionId,
    },
    /// Auction finalized and asset released.
    AuctionFinalized {
        /// Asset the auction was over
        asset_id: String,
        /// Whether ownership moved to the highest bidder
        owner_changed: bool,
    },
}

impl AuctionEvent {
    /// Topic string.
    pub fn topic(&self) -> &'static str {
        match self {
            Self::AssetAdded { .. } => topics::ADD_ASSET,
            Self::AuctionStarted { .. } => topics::START_AUCTION,
            Self::AuctionCancelled { .. } => topics::CANCEL_AUCTION,
            Self::AuctionClosing { .. } => topics::CLOSE_AUCTION,
            Self::AuctionFinalized { .. } => topics::AUCTION_CLOSED,
        }
    }

    /// Human-readable payload.
    pub fn payload(&self) -> String {
        match self {
            Self::AssetAdded { asset_id } => format!("Asset added: {}", asset_id),
            Self::AuctionStarted { auction_id } => format!("Auction start: {}", auction_id),
            Self::AuctionCancelled { auction_id } => format!("Auction cancel: {}", auction_id),
            Self::AuctionClosing { auction_id } => format!("Auction closing: {}", auction_id),
            Self::AuctionFinalized {
                asset_id,
                owner_changed: true,
            } => format!("Owner changed for asset: {}", asset_id),
            Self::AuctionFinalized {
                asset_id,
                owner_changed: false,
            } => format!("Owner no change for asset: {}", asset_id),
        }
    }
}

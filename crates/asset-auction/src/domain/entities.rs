//! # Domain Entities
//!
//! Assets, auctions, and the caller-submitted auction result.
//!
//! Persisted records keep the field tags already present in ledger data
//! (`"ID"`, `"Owner"`, `"PendingAuctionID"`, ...), so existing world state
//! decodes unchanged.

use super::errors::AuctionError;
use super::invariants::invariant_transition_allowed;
use super::value_objects::{AuctionId, AuctionStatus, Transition, NO_PENDING_AUCTION};
use serde::{Deserialize, Serialize};
use serde_with::{base64::Base64, serde_as};

/// A uniquely identified item whose ownership is tracked.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    /// Asset identifier.
    #[serde(rename = "ID")]
    pub id: String,
    /// Current owner.
    #[serde(rename = "Owner")]
    pub owner: String,
    /// In-flight auction, or [`NO_PENDING_AUCTION`].
    #[serde(rename = "PendingAuctionID", default)]
    pub pending_auction_id: AuctionId,
}

impl Asset {
    /// Create an asset with no auction in flight.
    pub fn new(id: impl Into<String>, owner: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            owner: owner.into(),
            pending_auction_id: NO_PENDING_AUCTION,
        }
    }

    /// Check if an open or closing auction holds this asset.
    pub fn has_pending_auction(&self) -> bool {
        self.pending_auction_id != NO_PENDING_AUCTION
    }

    /// Tie the asset to a newly started auction.
    pub fn attach_auction(&mut self, auction_id: AuctionId) {
        self.pending_auction_id = auction_id;
    }

    /// Release the asset from its auction.
    pub fn release(&mut self) {
        self.pending_auction_id = NO_PENDING_AUCTION;
    }
}

/// An auction over one asset, run on an external venue.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Auction {
    /// Unique, counter-allocated id (> 0).
    #[serde(rename = "ID")]
    pub id: AuctionId,
    /// Asset being auctioned.
    #[serde(rename = "AssetID")]
    pub asset_id: String,
    /// Auction contract address on the Ethereum venue.
    #[serde(rename = "EthAddr")]
    pub eth_addr: String,
    /// Auction contract address on the Quorum venue.
    #[serde(rename = "QuorumAddr")]
    pub quorum_addr: String,
    /// Current status.
    #[serde(rename = "Status")]
    pub status: AuctionStatus,
    /// Winning bid, recorded at finalization.
    #[serde(rename = "HighestBid", default)]
    pub highest_bid: u64,
    /// Winning bidder address, recorded at finalization.
    #[serde(rename = "HighestBidder", default)]
    pub highest_bidder: String,
    /// Venue that produced the winning bid, recorded at finalization.
    #[serde(rename = "HighestBidPlatform", default)]
    pub highest_bid_platform: String,
}

impl Auction {
    /// Open a new auction for a start request.
    pub fn open(id: AuctionId, request: &StartAuctionRequest) -> Self {
        Self {
            id,
            asset_id: request.asset_id.clone(),
            eth_addr: request.eth_addr.clone(),
            quorum_addr: request.quorum_addr.clone(),
            status: AuctionStatus::Open,
            highest_bid: 0,
            highest_bidder: String::new(),
            highest_bid_platform: String::new(),
        }
    }

    /// Apply a lifecycle transition.
    ///
    /// With `strict` unset the target status is written regardless of the
    /// current one, matching the behaviour existing ledgers rely on.
    pub fn apply(&mut self, transition: Transition, strict: bool) -> Result<(), AuctionError> {
        if strict {
            invariant_transition_allowed(self, transition)?;
        }
        self.status = transition.target();
        Ok(())
    }

    /// Record a verified result as the auction outcome.
    pub fn record_result(&mut self, result: &AuctionResult) {
        self.highest_bid = result.highest_bid;
        self.highest_bidder = result.highest_bidder.clone();
        self.highest_bid_platform = result.platform.clone();
    }
}

/// Request to start an auction over an asset.
#[serde_as]
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartAuctionRequest {
    /// Asset to auction.
    #[serde(rename = "AssetID")]
    pub asset_id: String,
    /// Ethereum auction contract address.
    #[serde(rename = "EthAddr")]
    pub eth_addr: String,
    /// Quorum auction contract address.
    #[serde(rename = "QuorumAddr")]
    pub quorum_addr: String,
    /// Auctioneer acknowledgement over the request digest. Carried, not checked.
    #[serde_as(as = "Base64")]
    #[serde(rename = "Signature", default)]
    pub signature: Vec<u8>,
}

/// Auction outcome produced and signed on the external venue.
///
/// The signature covers every other field; see
/// [`AuctionResult::digest`](crate::domain::hashing).
#[serde_as]
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuctionResult {
    /// Venue that ran the bidding.
    #[serde(rename = "Platform")]
    pub platform: String,
    /// Ledger auction this result settles.
    #[serde(rename = "AuctionID")]
    pub auction_id: AuctionId,
    /// Venue-side auction contract address.
    #[serde(rename = "AuctionAddr")]
    pub auction_addr: String,
    /// Winning bid.
    #[serde(rename = "HighestBid")]
    pub highest_bid: u64,
    /// Winning bidder address; also the expected signer.
    #[serde(rename = "HighestBidder")]
    pub highest_bidder: String,
    /// 65-byte recoverable secp256k1 signature (`r || s || v`).
    #[serde_as(as = "Base64")]
    #[serde(rename = "Signature", alias = "Signatrue", default)]
    pub signature: Vec<u8>,
}

/// Lifecycle configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuctionConfig {
    /// Reject status transitions that skip or repeat a stage.
    pub strict_transitions: bool,
    /// Ledger key holding the last allocated auction id.
    pub counter_key: String,
    /// Key prefix for asset records.
    pub asset_key_prefix: String,
    /// Key prefix for auction records.
    pub auction_key_prefix: String,
}

impl Default for AuctionConfig {
    fn default() -> Self {
        Self {
            strict_transitions: false,
            counter_key: "lastAuction".to_string(),
            asset_key_prefix: "assets".to_string(),
            auction_key_prefix: "auctions".to_string(),
        }
    }
}

impl AuctionConfig {
    /// Create configuration from environment variables.
    ///
    /// - `AUCTION_STRICT_TRANSITIONS`: enable strict transitions (default: false)
    pub fn from_env() -> Self {
        let strict_transitions = std::env::var("AUCTION_STRICT_TRANSITIONS")
            .map(|v| v.to_lowercase() == "true" || v == "1")
            .unwrap_or(false);

        Self {
            strict_transitions,
            ..Self::default()
        }
    }

    /// Enable strict transitions.
    pub fn strict(mut self) -> Self {
        self.strict_transitions = true;
        self
    }
}

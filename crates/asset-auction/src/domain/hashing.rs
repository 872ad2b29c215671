//! # Canonical Hashing
//!
//! Fixed-order byte encodings of start requests and auction results, and their
//! SHA3-256 digests. These digests are the messages the external venue signs.
//!
//! Fields are written as raw UTF-8 in the listed order with no separators.
//! Integers use their decimal string form, so the encoding never depends on
//! platform endianness or locale.

use super::entities::{AuctionResult, StartAuctionRequest};
use super::value_objects::{AuctionId, Digest};
use sha3::{Digest as _, Sha3_256};

/// Digest of an auction start request: `assetID || ethAddr || quorumAddr`.
pub fn hash_start_request(asset_id: &str, eth_addr: &str, quorum_addr: &str) -> Digest {
    let mut hasher = Sha3_256::new();
    hasher.update(asset_id.as_bytes());
    hasher.update(eth_addr.as_bytes());
    hasher.update(quorum_addr.as_bytes());
    hasher.finalize().into()
}

/// Digest of an auction result:
/// `platform || auctionID || auctionAddr || highestBid || highestBidder`.
///
/// The signature is not part of the signed message.
pub fn hash_auction_result(
    platform: &str,
    auction_id: AuctionId,
    auction_addr: &str,
    highest_bid: u64,
    highest_bidder: &str,
) -> Digest {
    let mut hasher = Sha3_256::new();
    hasher.update(platform.as_bytes());
    hasher.update(auction_id.to_string().as_bytes());
    hasher.update(auction_addr.as_bytes());
    hasher.update(highest_bid.to_string().as_bytes());
    hasher.update(highest_bidder.as_bytes());
    hasher.finalize().into()
}

impl StartAuctionRequest {
    /// Canonical digest of this request.
    pub fn digest(&self) -> Digest {
        hash_start_request(&self.asset_id, &self.eth_addr, &self.quorum_addr)
    }
}

impl AuctionResult {
    /// Canonical digest of this result, excluding its signature.
    pub fn digest(&self) -> Digest {
        hash_auction_result(
            &self.platform,
            self.auction_id,
            &self.auction_addr,
            self.highest_bid,
            &self.highest_bidder,
        )
    }
}

//! # Domain Invariants
//!
//! Business rules for the asset/auction lifecycle.

use super::entities::{Asset, Auction};
use super::errors::AuctionError;
use super::value_objects::{AuctionId, Transition};

/// Invariant: One auction per asset.
///
/// A new auction may only start while the asset holds no pending auction.
pub fn invariant_no_pending_auction(asset: &Asset) -> Result<(), AuctionError> {
    if asset.has_pending_auction() {
        return Err(AuctionError::AuctionPending {
            asset_id: asset.id.clone(),
            auction_id: asset.pending_auction_id,
        });
    }
    Ok(())
}

/// Invariant: Strict lifecycle ordering.
///
/// Only enforced when strict transitions are configured.
pub fn invariant_transition_allowed(
    auction: &Auction,
    transition: Transition,
) -> Result<(), AuctionError> {
    if !transition.allowed_from(auction.status) {
        return Err(AuctionError::InvalidTransition {
            from: auction.status,
            to: transition.target(),
        });
    }
    Ok(())
}

/// Invariant: Auction ids strictly increase.
///
/// The next id is the last allocated one plus one; the counter never wraps.
pub fn invariant_next_auction_id(last: AuctionId) -> Result<AuctionId, AuctionError> {
    last.checked_add(1)
        .ok_or_else(|| AuctionError::StoreFailure("auction counter exhausted".to_string()))
}

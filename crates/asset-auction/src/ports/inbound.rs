//! # Inbound Ports
//!
//! API trait defining what the asset/auction lifecycle can do.
//!
//! Arguments are already typed; decoding caller input is the job of
//! [`crate::ipc`].

use crate::domain::{Asset, Auction, AuctionError, AuctionId, AuctionResult, StartAuctionRequest};

/// Asset/auction lifecycle API - inbound port.
pub trait AssetAuctionApi {
    /// Register a new asset with no auction in flight.
    fn add_asset(&self, id: &str, owner: &str) -> Result<(), AuctionError>;

    /// Open an auction over an asset. Returns the allocated auction id.
    fn start_auction(&self, request: &StartAuctionRequest) -> Result<AuctionId, AuctionError>;

    /// Cancel an auction and release its asset.
    fn cancel_auction(&self, auction_id: AuctionId) -> Result<(), AuctionError>;

    /// Stop bidding. The asset stays pending until finalize or cancel.
    fn close_auction(&self, auction_id: AuctionId) -> Result<(), AuctionError>;

    /// Verify a signed result, close the auction and, if `proceed`, transfer
    /// the asset to the highest bidder.
    fn finalize_auction(&self, result: &AuctionResult, proceed: bool)
        -> Result<(), AuctionError>;

    /// Load an asset.
    fn get_asset(&self, id: &str) -> Result<Asset, AuctionError>;

    /// Load an auction.
    fn get_auction(&self, auction_id: AuctionId) -> Result<Auction, AuctionError>;

    /// Last allocated auction id, 0 when none has been allocated.
    fn get_last_auction_id(&self) -> Result<AuctionId, AuctionError>;
}

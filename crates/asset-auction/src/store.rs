//! # Entity Stores
//!
//! Typed accessors over the byte-oriented [`LedgerStore`]: asset records,
//! auction records and the auction id counter.
//!
//! These accessors do not enforce business rules; the lifecycle service does.
//!
//! ## Counter
//!
//! The last allocated auction id is a single record holding a bare JSON
//! integer. Its value doubles as its version: the host's atomic
//! read-modify-write over the whole operation is what keeps concurrent
//! `StartAuction` calls from allocating the same id. Nothing here locks.

use crate::domain::{Asset, Auction, AuctionConfig, AuctionError, AuctionId};
use crate::ports::LedgerStore;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

/// Ledger key for an asset.
pub fn asset_key(config: &AuctionConfig, id: &str) -> String {
    format!("{}_{}", config.asset_key_prefix, id)
}

/// Ledger key for an auction.
pub fn auction_key(config: &AuctionConfig, id: AuctionId) -> String {
    format!("{}_{}", config.auction_key_prefix, id)
}

fn read_record<L, T>(ledger: &L, key: &str) -> Result<Option<T>, AuctionError>
where
    L: LedgerStore,
    T: DeserializeOwned,
{
    let Some(bytes) = ledger.get_state(key)? else {
        debug!(key, "Ledger miss");
        return Ok(None);
    };

    serde_json::from_slice(&bytes)
        .map(Some)
        .map_err(|e| AuctionError::CorruptRecord {
            key: key.to_string(),
            reason: e.to_string(),
        })
}

fn write_record<L, T>(ledger: &L, key: &str, value: &T) -> Result<(), AuctionError>
where
    L: LedgerStore,
    T: Serialize,
{
    let bytes = serde_json::to_vec(value).map_err(|e| AuctionError::StoreFailure(e.to_string()))?;
    debug!(key, len = bytes.len(), "Ledger write");
    ledger.put_state(key, bytes)?;
    Ok(())
}

/// Asset records (`<asset_key_prefix>_<id>`).
pub struct AssetStore<'a, L> {
    ledger: &'a L,
    config: &'a AuctionConfig,
}

impl<'a, L: LedgerStore> AssetStore<'a, L> {
    /// Bind to a ledger.
    pub fn new(ledger: &'a L, config: &'a AuctionConfig) -> Self {
        Self { ledger, config }
    }

    /// Load an asset, `Ok(None)` when absent.
    pub fn find(&self, id: &str) -> Result<Option<Asset>, AuctionError> {
        read_record(self.ledger, &asset_key(self.config, id))
    }

    /// Load an asset, failing with `NotFound` when absent.
    pub fn get(&self, id: &str) -> Result<Asset, AuctionError> {
        self.find(id)?
            .ok_or_else(|| AuctionError::AssetNotFound(id.to_string()))
    }

    /// Persist an asset under its own id.
    pub fn put(&self, asset: &Asset) -> Result<(), AuctionError> {
        write_record(self.ledger, &asset_key(self.config, &asset.id), asset)
    }
}

/// Auction records (`<auction_key_prefix>_<id>`) and the id counter.
pub struct AuctionStore<'a, L> {
    ledger: &'a L,
    config: &'a AuctionConfig,
}

impl<'a, L: LedgerStore> AuctionStore<'a, L> {
    /// Bind to a ledger.
    pub fn new(ledger: &'a L, config: &'a AuctionConfig) -> Self {
        Self { ledger, config }
    }

    /// Load an auction, failing with `NotFound` when absent.
    pub fn get(&self, id: AuctionId) -> Result<Auction, AuctionError> {
        read_record(self.ledger, &auction_key(self.config, id))?
            .ok_or(AuctionError::AuctionNotFound(id))
    }

    /// Persist an auction under its own id.
    pub fn put(&self, auction: &Auction) -> Result<(), AuctionError> {
        write_record(self.ledger, &auction_key(self.config, auction.id), auction)
    }

    /// Last allocated auction id; 0 when the counter was never written.
    pub fn get_counter(&self) -> Result<AuctionId, AuctionError> {
        Ok(read_record(self.ledger, &self.config.counter_key)?.unwrap_or(0))
    }

    /// Overwrite the counter.
    pub fn set_counter(&self, value: AuctionId) -> Result<(), AuctionError> {
        write_record(self.ledger, &self.config.counter_key, &value)
    }
}

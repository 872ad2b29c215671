//! # Auction Lifecycle Service
//!
//! Application service that implements the [`AssetAuctionApi`] trait.
//!
//! ## Architecture
//!
//! This is the hexagonal "application service" that:
//! - Implements the inbound port (`AssetAuctionApi`)
//! - Reads and writes entities through the outbound `LedgerStore`
//! - Emits exactly one notification per mutating operation, as its last step
//! - Delegates signer recovery to the outbound `SignatureVerifier`
//!
//! ## Atomicity
//!
//! The service holds no locks and caches nothing between calls. A failure
//! after some writes leaves those writes in the `LedgerStore`; the host
//! transaction around the call is what discards them. `StartAuction`'s
//! counter read-modify-write is only safe under that guarantee.

use crate::domain::{
    invariant_next_auction_id, invariant_no_pending_auction, Asset, Auction, AuctionConfig,
    AuctionError, AuctionId, AuctionResult, StartAuctionRequest, Transition,
};
use crate::events::AuctionEvent;
use crate::ports::{AssetAuctionApi, EventEmitter, LedgerStore, SignatureVerifier};
use crate::store::{AssetStore, AuctionStore};
use auction_telemetry::{
    log_auction_event, metric_inc, record_operation, record_signature_check, HistogramTimer,
    AUCTIONS_STARTED, OWNERSHIP_TRANSFERS,
};
use tracing::{debug, info_span, warn};

/// Asset/auction lifecycle service.
pub struct AuctionLifecycleService<L, E, V> {
    ledger: L,
    emitter: E,
    verifier: V,
    config: AuctionConfig,
}

impl<L, E, V> AuctionLifecycleService<L, E, V>
where
    L: LedgerStore,
    E: EventEmitter,
    V: SignatureVerifier,
{
    /// Create a service with default configuration.
    pub fn new(ledger: L, emitter: E, verifier: V) -> Self {
        Self::with_config(ledger, emitter, verifier, AuctionConfig::default())
    }

    /// Create with custom configuration.
    pub fn with_config(ledger: L, emitter: E, verifier: V, config: AuctionConfig) -> Self {
        Self {
            ledger,
            emitter,
            verifier,
            config,
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &AuctionConfig {
        &self.config
    }

    fn assets(&self) -> AssetStore<'_, L> {
        AssetStore::new(&self.ledger, &self.config)
    }

    fn auctions(&self) -> AuctionStore<'_, L> {
        AuctionStore::new(&self.ledger, &self.config)
    }

    fn emit(&self, event: AuctionEvent) -> Result<(), AuctionError> {
        self.emitter
            .emit(event.topic(), event.payload().as_bytes())
            .map_err(|e| AuctionError::EventEmission {
                topic: event.topic().to_string(),
                reason: e.to_string(),
            })
    }

    fn transition(&self, auction: &mut Auction, transition: Transition) -> Result<(), AuctionError> {
        let from = auction.status;
        auction.apply(transition, self.config.strict_transitions)?;
        if from.is_terminal() {
            // Permissive mode only; strict mode rejected it above.
            warn!(auction_id = auction.id, ?transition, "Transition applied to a closed auction");
        }
        Ok(())
    }

    fn do_add_asset(&self, id: &str, owner: &str) -> Result<(), AuctionError> {
        let assets = self.assets();
        if assets.find(id)?.is_some() {
            warn!(asset_id = id, "Asset already exists");
            return Err(AuctionError::AssetAlreadyExists(id.to_string()));
        }

        assets.put(&Asset::new(id, owner))?;
        self.emit(AuctionEvent::AssetAdded {
            asset_id: id.to_string(),
        })?;

        log_auction_event!(info, "Asset added", asset_id = id, owner = owner);
        Ok(())
    }

    fn do_start_auction(&self, request: &StartAuctionRequest) -> Result<AuctionId, AuctionError> {
        let assets = self.assets();
        let auctions = self.auctions();

        let mut asset = assets.get(&request.asset_id)?;
        if let Err(e) = invariant_no_pending_auction(&asset) {
            warn!(asset_id = %asset.id, pending = asset.pending_auction_id, "Asset already under auction");
            return Err(e);
        }

        debug!(
            asset_id = %request.asset_id,
            digest = %hex::encode(request.digest()),
            signature_len = request.signature.len(),
            "Start request digest"
        );

        let auction_id = invariant_next_auction_id(auctions.get_counter()?)?;
        let auction = Auction::open(auction_id, request);
        auctions.put(&auction)?;
        auctions.set_counter(auction_id)?;

        asset.attach_auction(auction_id);
        assets.put(&asset)?;

        self.emit(AuctionEvent::AuctionStarted { auction_id })?;

        metric_inc!(AUCTIONS_STARTED);
        log_auction_event!(
            info,
            "Auction started",
            auction_id = auction_id,
            asset_id = %request.asset_id,
            status = %auction.status
        );
        Ok(auction_id)
    }

    fn do_cancel_auction(&self, auction_id: AuctionId) -> Result<(), AuctionError> {
        let auctions = self.auctions();
        let assets = self.assets();

        let mut auction = auctions.get(auction_id)?;
        self.transition(&mut auction, Transition::Cancel)?;
        auctions.put(&auction)?;

        let mut asset = assets.get(&auction.asset_id)?;
        asset.release();
        assets.put(&asset)?;

        self.emit(AuctionEvent::AuctionCancelled { auction_id })?;

        log_auction_event!(
            info,
            "Auction cancelled",
            auction_id = auction_id,
            asset_id = %auction.asset_id,
            status = %auction.status
        );
        Ok(())
    }

    fn do_close_auction(&self, auction_id: AuctionId) -> Result<(), AuctionError> {
        let auctions = self.auctions();

        let mut auction = auctions.get(auction_id)?;
        self.transition(&mut auction, Transition::Close)?;
        auctions.put(&auction)?;

        self.emit(AuctionEvent::AuctionClosing { auction_id })?;

        log_auction_event!(
            info,
            "Auction closing",
            auction_id = auction_id,
            status = %auction.status
        );
        Ok(())
    }

    fn do_finalize_auction(&self, result: &AuctionResult, proceed: bool) -> Result<(), AuctionError> {
        let auctions = self.auctions();
        let assets = self.assets();

        let mut auction = auctions.get(result.auction_id)?;

        let digest = result.digest();
        let valid = self
            .verifier
            .verify(&digest, &result.signature, &result.highest_bidder);
        record_signature_check(valid);
        if !valid {
            warn!(
                auction_id = result.auction_id,
                claimed_signer = %result.highest_bidder,
                digest = %hex::encode(digest),
                "Auction result signature rejected"
            );
            return Err(AuctionError::InvalidResult {
                auction_id: result.auction_id,
            });
        }

        self.transition(&mut auction, Transition::Finalize)?;
        auction.record_result(result);
        auctions.put(&auction)?;

        let mut asset = assets.get(&auction.asset_id)?;
        let previous_owner = asset.owner.clone();
        if proceed {
            asset.owner = result.highest_bidder.clone();
        }
        asset.release();
        assets.put(&asset)?;

        self.emit(AuctionEvent::AuctionFinalized {
            asset_id: asset.id.clone(),
            owner_changed: proceed,
        })?;

        if proceed {
            metric_inc!(OWNERSHIP_TRANSFERS);
        }
        log_auction_event!(
            info,
            "Auction finalized",
            auction_id = auction.id,
            asset_id = %asset.id,
            previous_owner = %previous_owner,
            owner = %asset.owner,
            highest_bid = result.highest_bid,
            proceed = proceed
        );
        Ok(())
    }
}

/// Time an operation and count its outcome.
fn instrumented<T>(
    operation: &'static str,
    f: impl FnOnce() -> Result<T, AuctionError>,
) -> Result<T, AuctionError> {
    let _timer = HistogramTimer::for_operation(operation);
    let result = f();
    let outcome = match &result {
        Ok(_) => "ok",
        Err(e) => e.kind().as_str(),
    };
    record_operation(operation, outcome);
    result
}

impl<L, E, V> AssetAuctionApi for AuctionLifecycleService<L, E, V>
where
    L: LedgerStore,
    E: EventEmitter,
    V: SignatureVerifier,
{
    fn add_asset(&self, id: &str, owner: &str) -> Result<(), AuctionError> {
        let _span = info_span!("add_asset", asset_id = id).entered();
        instrumented("add_asset", || self.do_add_asset(id, owner))
    }

    fn start_auction(&self, request: &StartAuctionRequest) -> Result<AuctionId, AuctionError> {
        let _span = info_span!("start_auction", asset_id = %request.asset_id).entered();
        instrumented("start_auction", || self.do_start_auction(request))
    }

    fn cancel_auction(&self, auction_id: AuctionId) -> Result<(), AuctionError> {
        let _span = info_span!("cancel_auction", auction_id).entered();
        instrumented("cancel_auction", || self.do_cancel_auction(auction_id))
    }

    fn close_auction(&self, auction_id: AuctionId) -> Result<(), AuctionError> {
        let _span = info_span!("close_auction", auction_id).entered();
        instrumented("close_auction", || self.do_close_auction(auction_id))
    }

    fn finalize_auction(&self, result: &AuctionResult, proceed: bool) -> Result<(), AuctionError> {
        let _span = info_span!("finalize_auction", auction_id = result.auction_id, proceed).entered();
        instrumented("finalize_auction", || self.do_finalize_auction(result, proceed))
    }

    fn get_asset(&self, id: &str) -> Result<Asset, AuctionError> {
        self.assets().get(id)
    }

    fn get_auction(&self, auction_id: AuctionId) -> Result<Auction, AuctionError> {
        self.auctions().get(auction_id)
    }

    fn get_last_auction_id(&self) -> Result<AuctionId, AuctionError> {
        self.auctions().get_counter()
    }
}

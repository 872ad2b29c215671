//! # Asset Auction Ledger
//!
//! Asset ownership records whose transfers are decided by auctions run on
//! external Ethereum-style venues.
//!
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Purpose
//!
//! - Register assets and track their owner
//! - Open, close, cancel and finalize one auction per asset at a time
//! - Accept an auction outcome only when it carries a secp256k1 signature
//!   recovering to the winning bidder's address
//!
//! ## Lifecycle
//!
//! ```text
//! AddAsset ──→ StartAuction ──→ CloseAuction ──→ FinalizeAuction
//!                   │                 │
//!                   └──CancelAuction──┘
//! ```
//!
//! ## Security Features
//!
//! | Defense | Description |
//! |---------|-------------|
//! | Signed results | Result digest must recover to `HighestBidder` |
//! | Low-S only | High-S (malleable) signatures rejected |
//! | One auction per asset | `PendingAuctionID` guards concurrent auctions |
//! | Atomic operations | Every call runs in one ledger transaction |
//!
//! ## Module Structure
//!
//! ```text
//! asset-auction/
//! ├── domain/          # Asset, Auction, results, hashing, signatures, errors
//! ├── ports/           # AssetAuctionApi, LedgerStore, EventEmitter, SignatureVerifier
//! ├── store.rs         # Typed entity accessors and the id counter
//! ├── events.rs        # Notification topics and payloads
//! ├── service.rs       # AuctionLifecycleService
//! ├── ipc/             # Argument decoding and transactional dispatch
//! └── adapters/        # In-memory ledger, event sinks
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod events;
pub mod ipc;
pub mod ports;
pub mod service;
pub mod store;

// Re-exports
pub use adapters::{
    EmittedEvent, InMemoryLedger, LedgerTransaction, RecordingEventEmitter, TracingEventEmitter,
};
pub use domain::{
    hash_auction_result, hash_start_request, Asset, Auction, AuctionConfig, AuctionError,
    AuctionId, AuctionResult, AuctionStatus, Digest, EcdsaVerifier, ErrorKind,
    StartAuctionRequest, Transition, NO_PENDING_AUCTION,
};
pub use events::AuctionEvent;
pub use ipc::{ContractCall, ContractHandler};
pub use ports::{
    AssetAuctionApi, EmitError, EventEmitter, LedgerError, LedgerStore, SignatureVerifier,
};
pub use service::AuctionLifecycleService;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

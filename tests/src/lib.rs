//! # Asset Auction Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs      # Signing bidders, request builders
//! └── integration/     # Multi-operation scenarios
//!     ├── flows.rs         # Full lifecycles through ContractHandler
//!     └── concurrency.rs   # Conflicting transactions on shared keys
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p auction-tests
//! cargo bench -p auction-tests
//! ```

pub mod fixtures;
pub mod integration;

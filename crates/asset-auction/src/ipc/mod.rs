//! # Invocation Boundary
//!
//! Typed decoding of caller arguments and transactional dispatch.

pub mod handler;
pub mod requests;

pub use handler::ContractHandler;
pub use requests::{parse_auction_id, parse_bool, ContractCall};

//! # Domain Module
//!
//! Core domain types for the asset/auction lifecycle.

pub mod entities;
pub mod errors;
pub mod hashing;
pub mod invariants;
pub mod signature;
pub mod value_objects;

pub use entities::*;
pub use errors::*;
pub use hashing::{hash_auction_result, hash_start_request};
pub use invariants::*;
pub use signature::{
    format_address, parse_address, recover_address, verify_signature, Address, EcdsaVerifier,
    SignatureError,
};
pub use value_objects::*;

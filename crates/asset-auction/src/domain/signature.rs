//! # Signature Verification (secp256k1)
//!
//! Recovers the signer of an auction result digest and compares it with the
//! address the result claims.
//!
//! ## Signature format
//!
//! 65 bytes, `r (32) || s (32) || v (1)`, as produced by Ethereum-style
//! signers. `v` may be 0, 1, 27 or 28.
//!
//! ## Security Notes
//!
//! - **Malleability**: a high-S signature is normalized to its low-S twin
//!   (and the recovery id's y-parity flipped) before recovery, so both forms
//!   recover the same signer
//! - Addresses are the last 20 bytes of Keccak-256 over the uncompressed
//!   public key without its `0x04` prefix
//! - Verification is a predicate: any recovery failure yields `false`

use super::value_objects::Digest;
use crate::ports::outbound::SignatureVerifier;
use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};
use sha3::{Digest as _, Keccak256};
use thiserror::Error;
use tracing::debug;

/// Ethereum-style address.
pub type Address = [u8; 20];

/// Length of a recoverable signature.
pub const SIGNATURE_LENGTH: usize = 65;

/// Reasons a signer could not be recovered.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SignatureError {
    /// Signature is not 65 bytes.
    #[error("Invalid signature length: {0}")]
    InvalidLength(usize),

    /// `r`/`s` are not valid scalars.
    #[error("Invalid signature format")]
    InvalidFormat,

    /// Invalid recovery ID (v must be 0, 1, 27, or 28)
    #[error("Invalid recovery ID: {0}")]
    InvalidRecoveryId(u8),

    /// No public key recoverable for this digest/signature pair.
    #[error("Failed to recover public key")]
    RecoveryFailed,
}

/// secp256k1 recoverable-signature verifier.
#[derive(Debug, Clone, Default)]
pub struct EcdsaVerifier;

impl EcdsaVerifier {
    /// Create a new ECDSA verifier.
    pub fn new() -> Self {
        Self
    }
}

impl SignatureVerifier for EcdsaVerifier {
    fn verify(&self, digest: &Digest, signature: &[u8], claimed_address: &str) -> bool {
        verify_signature(digest, signature, claimed_address)
    }
}

/// Check that `signature` over `digest` was produced by `claimed_address`.
///
/// Hex comparison is case-insensitive and the `0x` prefix is optional.
pub fn verify_signature(digest: &Digest, signature: &[u8], claimed_address: &str) -> bool {
    let Some(claimed) = parse_address(claimed_address) else {
        debug!(claimed = claimed_address, "Claimed signer is not a 20-byte hex address");
        return false;
    };

    match recover_address(digest, signature) {
        Ok(recovered) => recovered == claimed,
        Err(e) => {
            debug!(error = %e, "Signer recovery failed");
            false
        }
    }
}

/// Recover the signer's address from a digest and a 65-byte signature.
pub fn recover_address(digest: &Digest, signature: &[u8]) -> Result<Address, SignatureError> {
    if signature.len() != SIGNATURE_LENGTH {
        return Err(SignatureError::InvalidLength(signature.len()));
    }

    let mut recovery_id = parse_recovery_id(signature[64])?;
    let mut sig =
        Signature::from_slice(&signature[..64]).map_err(|_| SignatureError::InvalidFormat)?;

    // Negating s mirrors R across the x-axis.
    if let Some(normalized) = sig.normalize_s() {
        sig = normalized;
        recovery_id = RecoveryId::new(!recovery_id.is_y_odd(), recovery_id.is_x_reduced());
    }

    let recovered_key = VerifyingKey::recover_from_prehash(digest, &sig, recovery_id)
        .map_err(|_| SignatureError::RecoveryFailed)?;

    Ok(address_from_pubkey(&recovered_key))
}

/// Keccak256 hash function.
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    Keccak256::digest(data).into()
}

/// Derive Ethereum address from public key.
pub fn address_from_pubkey(public_key: &VerifyingKey) -> Address {
    let pubkey_bytes = public_key.to_encoded_point(false);
    let hash = keccak256(&pubkey_bytes.as_bytes()[1..]);

    let mut address = [0u8; 20];
    address.copy_from_slice(&hash[12..]);
    address
}

/// Parse a hex address, with or without `0x`, in any letter case.
pub fn parse_address(address: &str) -> Option<Address> {
    let trimmed = address
        .strip_prefix("0x")
        .or_else(|| address.strip_prefix("0X"))
        .unwrap_or(address);
    let bytes = hex::decode(trimmed).ok()?;
    bytes.try_into().ok()
}

/// Render an address as lowercase `0x`-prefixed hex.
pub fn format_address(address: &Address) -> String {
    format!("0x{}", hex::encode(address))
}

/// Parse recovery ID from v value.
fn parse_recovery_id(v: u8) -> Result<RecoveryId, SignatureError> {
    let id = match v {
        0 | 27 => 0,
        1 | 28 => 1,
        _ => return Err(SignatureError::InvalidRecoveryId(v)),
    };

    RecoveryId::try_from(id).map_err(|_| SignatureError::InvalidRecoveryId(v))
}

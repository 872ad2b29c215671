//! Shared fixtures: bidders that sign auction results, JSON argument builders.

use asset_auction::domain::signature::{address_from_pubkey, format_address};
use asset_auction::{AuctionId, AuctionResult};
use k256::ecdsa::SigningKey;

/// An off-ledger bidder with its own secp256k1 key.
pub struct Bidder {
    key: SigningKey,
    /// `0x`-prefixed lowercase address
    pub address: String,
}

impl Bidder {
    /// Fresh random bidder.
    pub fn random() -> Self {
        let key = SigningKey::random(&mut rand::thread_rng());
        let address = format_address(&address_from_pubkey(key.verifying_key()));
        Self { key, address }
    }

    /// A result naming this bidder as winner, signed by this bidder.
    pub fn winning_result(&self, platform: &str, auction_id: AuctionId, bid: u64) -> AuctionResult {
        let mut result = AuctionResult {
            platform: platform.to_string(),
            auction_id,
            auction_addr: format!("0x{}", hex::encode([auction_id as u8; 20])),
            highest_bid: bid,
            highest_bidder: self.address.clone(),
            signature: vec![],
        };
        result.signature = self.sign(&result.digest());
        result
    }

    /// 65-byte `r || s || v` signature, `v` in {27, 28}.
    pub fn sign(&self, digest: &[u8; 32]) -> Vec<u8> {
        let (sig, recid) = self
            .key
            .sign_prehash_recoverable(digest)
            .expect("signing failed");
        let mut bytes = sig.to_bytes().to_vec();
        bytes.push(recid.to_byte() + 27);
        bytes
    }
}

/// `StartAuction` JSON argument.
pub fn start_args(asset_id: &str) -> String {
    serde_json::json!({
        "AssetID": asset_id,
        "EthAddr": "0xEth",
        "QuorumAddr": "0xQuorum",
    })
    .to_string()
}

/// `FinAuction` JSON argument.
pub fn result_args(result: &AuctionResult) -> String {
    serde_json::to_string(result).expect("result encodes")
}

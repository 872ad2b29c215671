//! # Lifecycle Flows
//!
//! Full auction lifecycles driven through `ContractHandler`, the way a ledger
//! client invokes the contract: string arguments in, bytes out, one
//! transaction per call.

#[cfg(test)]
mod tests {
    use crate::fixtures::{result_args, start_args, Bidder};
    use asset_auction::{Asset, Auction, AuctionStatus, ContractHandler, ErrorKind, InMemoryLedger};
    use std::sync::Arc;

    fn handler() -> ContractHandler {
        ContractHandler::new(Arc::new(InMemoryLedger::new()))
    }

    fn asset(handler: &ContractHandler, id: &str) -> Asset {
        serde_json::from_slice(&handler.invoke("GetAsset", &[id]).unwrap()).unwrap()
    }

    fn auction(handler: &ContractHandler, id: &str) -> Auction {
        serde_json::from_slice(&handler.invoke("GetAuction", &[id]).unwrap()).unwrap()
    }

    #[test]
    fn test_full_auction_transfers_asset() {
        let handler = handler();
        let bidder = Bidder::random();

        handler.invoke("AddAsset", &["a1", "alice"]).unwrap();
        handler.invoke("StartAuction", &[start_args("a1").as_str()]).unwrap();
        handler.invoke("CloseAuction", &["1"]).unwrap();
        let result = bidder.winning_result("ethereum", 1, 2_500);
        handler
            .invoke("FinAuction", &[result_args(&result).as_str(), "true"])
            .unwrap();

        let asset = asset(&handler, "a1");
        assert_eq!(asset.owner, bidder.address);
        assert_eq!(asset.pending_auction_id, 0);

        let auction = auction(&handler, "1");
        assert_eq!(auction.status, AuctionStatus::Closed);
        assert_eq!(auction.highest_bid, 2_500);
        assert_eq!(auction.highest_bidder, bidder.address);

        let events = handler.ledger().committed_events();
        let payloads: Vec<_> = events.iter().map(|e| e.payload_str()).collect();
        assert_eq!(
            payloads,
            [
                "Asset added: a1",
                "Auction start: 1",
                "Auction closing: 1",
                "Owner changed for asset: a1",
            ]
        );
    }

    #[test]
    fn test_new_owner_can_resell() {
        let handler = handler();
        let first = Bidder::random();
        let second = Bidder::random();

        handler.invoke("AddAsset", &["a1", "alice"]).unwrap();
        handler.invoke("StartAuction", &[start_args("a1").as_str()]).unwrap();
        handler.invoke("CloseAuction", &["1"]).unwrap();
        let result = first.winning_result("ethereum", 1, 10);
        handler
            .invoke("FinAuction", &[result_args(&result).as_str(), "true"])
            .unwrap();

        assert_eq!(
            handler.invoke("StartAuction", &[start_args("a1").as_str()]).unwrap(),
            b"2"
        );
        handler.invoke("CloseAuction", &["2"]).unwrap();
        let result = second.winning_result("quorum", 2, 20);
        handler
            .invoke("FinalizeAuction", &[result_args(&result).as_str(), "1"])
            .unwrap();

        assert_eq!(asset(&handler, "a1").owner, second.address);
        assert_eq!(auction(&handler, "2").highest_bid_platform, "quorum");
    }

    #[test]
    fn test_declined_result_releases_asset() {
        let handler = handler();
        let bidder = Bidder::random();

        handler.invoke("AddAsset", &["a1", "alice"]).unwrap();
        handler.invoke("StartAuction", &[start_args("a1").as_str()]).unwrap();
        handler.invoke("CloseAuction", &["1"]).unwrap();
        let result = bidder.winning_result("ethereum", 1, 1);
        handler
            .invoke("FinAuction", &[result_args(&result).as_str(), "false"])
            .unwrap();

        let asset = asset(&handler, "a1");
        assert_eq!(asset.owner, "alice");
        assert_eq!(asset.pending_auction_id, 0);
        let last = handler.ledger().committed_events().pop().unwrap();
        assert_eq!(last.topic, "AuctionClosed");
        assert_eq!(last.payload_str(), "Owner no change for asset: a1");
    }

    #[test]
    fn test_forged_result_changes_nothing() {
        let handler = handler();
        let winner = Bidder::random();
        let forger = Bidder::random();

        handler.invoke("AddAsset", &["a1", "alice"]).unwrap();
        handler.invoke("StartAuction", &[start_args("a1").as_str()]).unwrap();
        handler.invoke("CloseAuction", &["1"]).unwrap();

        let mut result = winner.winning_result("ethereum", 1, 99);
        result.signature = forger.sign(&result.digest());
        let err = handler
            .invoke("FinAuction", &[result_args(&result).as_str(), "true"])
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InvalidResult);
        assert_eq!(asset(&handler, "a1").owner, "alice");
        assert_eq!(asset(&handler, "a1").pending_auction_id, 1);
        assert_eq!(auction(&handler, "1").status, AuctionStatus::Closing);
    }

    #[test]
    fn test_cancel_then_restart() {
        let handler = handler();

        handler.invoke("AddAsset", &["a1", "alice"]).unwrap();
        handler.invoke("StartAuction", &[start_args("a1").as_str()]).unwrap();
        let err = handler
            .invoke("StartAuction", &[start_args("a1").as_str()])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AuctionPending);

        handler.invoke("CancelAuction", &["1"]).unwrap();
        assert_eq!(auction(&handler, "1").status, AuctionStatus::Closed);
        assert_eq!(
            handler.invoke("StartAuction", &[start_args("a1").as_str()]).unwrap(),
            b"2"
        );
        assert_eq!(handler.invoke("GetLastAuctionID", &[]).unwrap(), b"2");
    }

    #[test]
    fn test_uppercase_bidder_address_accepted() {
        let handler = handler();
        let bidder = Bidder::random();

        handler.invoke("AddAsset", &["a1", "alice"]).unwrap();
        handler.invoke("StartAuction", &[start_args("a1").as_str()]).unwrap();

        let mut result = bidder.winning_result("ethereum", 1, 7);
        result.highest_bidder = format!("0x{}", bidder.address[2..].to_uppercase());
        result.signature = bidder.sign(&result.digest());
        handler
            .invoke("FinAuction", &[result_args(&result).as_str(), "true"])
            .unwrap();

        assert_eq!(asset(&handler, "a1").owner, result.highest_bidder);
    }

    #[test]
    fn test_legacy_signature_field_name() {
        let handler = handler();
        let bidder = Bidder::random();
        handler.invoke("AddAsset", &["a1", "alice"]).unwrap();
        handler.invoke("StartAuction", &[start_args("a1").as_str()]).unwrap();

        let result = bidder.winning_result("ethereum", 1, 3);
        let legacy = result_args(&result).replace("\"Signature\"", "\"Signatrue\"");
        handler.invoke("FinAuction", &[legacy.as_str(), "true"]).unwrap();

        assert_eq!(asset(&handler, "a1").owner, bidder.address);
    }
}

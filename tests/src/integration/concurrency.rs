//! # Conflicting Transactions
//!
//! The lifecycle service takes no locks. Two operations that race on the
//! same keys are kept apart only by the ledger rejecting the later commit.

#[cfg(test)]
mod tests {
    use asset_auction::{
        AssetAuctionApi, AuctionLifecycleService, EcdsaVerifier, InMemoryLedger, LedgerError,
        LedgerStore, StartAuctionRequest,
    };

    fn request(asset_id: &str) -> StartAuctionRequest {
        StartAuctionRequest {
            asset_id: asset_id.to_string(),
            eth_addr: "0xEth".to_string(),
            quorum_addr: "0xQuorum".to_string(),
            signature: vec![],
        }
    }

    fn seed(ledger: &InMemoryLedger, ids: &[&str]) {
        let tx = ledger.begin();
        let service = AuctionLifecycleService::new(&tx, &tx, EcdsaVerifier::new());
        for id in ids {
            service.add_asset(id, "alice").unwrap();
        }
        drop(service);
        tx.commit().unwrap();
    }

    #[test]
    fn test_racing_starts_on_different_assets_conflict_on_counter() {
        let ledger = InMemoryLedger::new();
        seed(&ledger, &["a1", "a2"]);

        let first = ledger.begin();
        let second = ledger.begin();
        let id_first = AuctionLifecycleService::new(&first, &first, EcdsaVerifier::new())
            .start_auction(&request("a1"))
            .unwrap();
        let id_second = AuctionLifecycleService::new(&second, &second, EcdsaVerifier::new())
            .start_auction(&request("a2"))
            .unwrap();

        // Both read the same counter value.
        assert_eq!(id_first, 1);
        assert_eq!(id_second, 1);

        first.commit().unwrap();
        assert_eq!(
            second.commit(),
            Err(LedgerError::Conflict("lastAuction".to_string()))
        );

        assert_eq!(ledger.get_state("lastAuction").unwrap(), Some(b"1".to_vec()));
        assert!(!ledger.contains_key("auctions_2"));
        let a2: asset_auction::Asset =
            serde_json::from_slice(&ledger.raw("assets_a2").unwrap()).unwrap();
        assert_eq!(a2.pending_auction_id, 0);
    }

    #[test]
    fn test_retry_after_conflict_allocates_next_id() {
        let ledger = InMemoryLedger::new();
        seed(&ledger, &["a1", "a2"]);

        let first = ledger.begin();
        let second = ledger.begin();
        AuctionLifecycleService::new(&first, &first, EcdsaVerifier::new())
            .start_auction(&request("a1"))
            .unwrap();
        AuctionLifecycleService::new(&second, &second, EcdsaVerifier::new())
            .start_auction(&request("a2"))
            .unwrap();
        first.commit().unwrap();
        assert!(second.commit().is_err());

        let retry = ledger.begin();
        let id = AuctionLifecycleService::new(&retry, &retry, EcdsaVerifier::new())
            .start_auction(&request("a2"))
            .unwrap();
        retry.commit().unwrap();
        assert_eq!(id, 2);
    }

    #[test]
    fn test_racing_starts_on_same_asset() {
        let ledger = InMemoryLedger::new();
        seed(&ledger, &["a1"]);

        let first = ledger.begin();
        let second = ledger.begin();
        AuctionLifecycleService::new(&first, &first, EcdsaVerifier::new())
            .start_auction(&request("a1"))
            .unwrap();
        AuctionLifecycleService::new(&second, &second, EcdsaVerifier::new())
            .start_auction(&request("a1"))
            .unwrap();

        first.commit().unwrap();
        assert!(matches!(second.commit(), Err(LedgerError::Conflict(_))));
        assert_eq!(ledger.committed_events().len(), 2);
    }
}

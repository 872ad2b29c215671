//! # Contract Handler
//!
//! Invocation boundary over an [`InMemoryLedger`]. Each call:
//!
//! 1. decodes the function name and arguments into a [`ContractCall`]
//! 2. opens one ledger transaction
//! 3. runs the lifecycle operation against that transaction
//! 4. commits on success; on any error the transaction is dropped, so
//!    writes made before the failure never reach the ledger
//!
//! Responses are raw bytes: empty for mutations, the decimal id for
//! `StartAuction`, JSON records for the getters.

use super::requests::ContractCall;
use crate::adapters::InMemoryLedger;
use crate::domain::{AuctionConfig, AuctionError, EcdsaVerifier};
use crate::ports::{AssetAuctionApi, SignatureVerifier};
use crate::service::AuctionLifecycleService;
use auction_telemetry::record_operation;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

/// Decodes, executes and commits contract invocations.
pub struct ContractHandler<V = EcdsaVerifier> {
    ledger: Arc<InMemoryLedger>,
    verifier: V,
    config: AuctionConfig,
}

impl ContractHandler<EcdsaVerifier> {
    /// Create a handler with the secp256k1 verifier and default configuration.
    pub fn new(ledger: Arc<InMemoryLedger>) -> Self {
        Self::with_config(ledger, EcdsaVerifier::new(), AuctionConfig::default())
    }
}

impl<V: SignatureVerifier> ContractHandler<V> {
    /// Create with custom verifier and configuration.
    pub fn with_config(ledger: Arc<InMemoryLedger>, verifier: V, config: AuctionConfig) -> Self {
        Self {
            ledger,
            verifier,
            config,
        }
    }

    /// Underlying ledger.
    pub fn ledger(&self) -> &Arc<InMemoryLedger> {
        &self.ledger
    }

    /// Execute one invocation as a single transaction.
    pub fn invoke(&self, function: &str, args: &[&str]) -> Result<Vec<u8>, AuctionError> {
        let call = match ContractCall::decode(function, args) {
            Ok(call) => call,
            Err(e) => {
                warn!(function, error = %e, "Rejected invocation");
                record_operation("decode", e.kind().as_str());
                return Err(e);
            }
        };

        let tx = self.ledger.begin();
        let response = {
            let service =
                AuctionLifecycleService::with_config(&tx, &tx, &self.verifier, self.config.clone());
            execute(&service, call.clone())?
        };
        if call.is_read_only() {
            return Ok(response);
        }

        let written = tx.commit().map_err(|e| {
            warn!(operation = call.operation(), error = %e, "Commit rejected");
            AuctionError::from(e)
        })?;
        debug!(operation = call.operation(), written, "Invocation committed");
        Ok(response)
    }
}

fn execute<A: AssetAuctionApi>(api: &A, call: ContractCall) -> Result<Vec<u8>, AuctionError> {
    match call {
        ContractCall::AddAsset { id, owner } => api.add_asset(&id, &owner).map(|_| Vec::new()),
        ContractCall::StartAuction(request) => api
            .start_auction(&request)
            .map(|id| id.to_string().into_bytes()),
        ContractCall::CancelAuction(id) => api.cancel_auction(id).map(|_| Vec::new()),
        ContractCall::CloseAuction(id) => api.close_auction(id).map(|_| Vec::new()),
        ContractCall::FinalizeAuction { result, proceed } => {
            api.finalize_auction(&result, proceed).map(|_| Vec::new())
        }
        ContractCall::GetAsset(id) => to_json(&api.get_asset(&id)?),
        ContractCall::GetAuction(id) => to_json(&api.get_auction(id)?),
        ContractCall::GetLastAuctionId => to_json(&api.get_last_auction_id()?),
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<Vec<u8>, AuctionError> {
    serde_json::to_vec(value).map_err(|e| AuctionError::StoreFailure(e.to_string()))
}

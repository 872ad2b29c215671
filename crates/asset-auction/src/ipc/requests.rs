//! # Contract Call Decoding
//!
//! Turns a function name and its string arguments into a typed
//! [`ContractCall`]. Every decoding failure is `MalformedInput`; the
//! lifecycle service never sees raw arguments.
//!
//! | Function | Arguments |
//! |----------|-----------|
//! | `AddAsset` | `id`, `owner` |
//! | `StartAuction` | JSON `{"AssetID","EthAddr","QuorumAddr","Signature"}` |
//! | `CancelAuction` | decimal auction id |
//! | `CloseAuction` | decimal auction id |
//! | `FinAuction` / `FinalizeAuction` | JSON auction result, boolean `proceed` |
//! | `GetAsset` | `id` |
//! | `GetAuction` | decimal auction id |
//! | `GetLastAuctionID` | none |

use crate::domain::{AuctionError, AuctionId, AuctionResult, StartAuctionRequest};
use serde::de::DeserializeOwned;

/// A decoded contract invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ContractCall {
    /// Register an asset.
    AddAsset {
        /// Asset id
        id: String,
        /// Initial owner
        owner: String,
    },
    /// Open an auction.
    StartAuction(StartAuctionRequest),
    /// Cancel an auction.
    CancelAuction(AuctionId),
    /// Stop bidding.
    CloseAuction(AuctionId),
    /// Settle an auction with a signed result.
    FinalizeAuction {
        /// Signed result
        result: AuctionResult,
        /// Transfer ownership to the highest bidder
        proceed: bool,
    },
    /// Read an asset.
    GetAsset(String),
    /// Read an auction.
    GetAuction(AuctionId),
    /// Read the auction id counter.
    GetLastAuctionId,
}

impl ContractCall {
    /// Decode an invocation.
    pub fn decode(function: &str, args: &[&str]) -> Result<Self, AuctionError> {
        match function {
            "AddAsset" => {
                expect_arity(function, args, 2)?;
                Ok(Self::AddAsset {
                    id: non_blank("asset id", args[0])?,
                    owner: args[1].to_string(),
                })
            }
            "StartAuction" => {
                expect_arity(function, args, 1)?;
                let request: StartAuctionRequest = decode_json(function, args[0])?;
                non_blank("AssetID", &request.asset_id)?;
                Ok(Self::StartAuction(request))
            }
            "CancelAuction" => {
                expect_arity(function, args, 1)?;
                Ok(Self::CancelAuction(parse_auction_id(args[0])?))
            }
            "CloseAuction" => {
                expect_arity(function, args, 1)?;
                Ok(Self::CloseAuction(parse_auction_id(args[0])?))
            }
            "FinAuction" | "FinalizeAuction" => {
                expect_arity(function, args, 2)?;
                let result: AuctionResult = decode_json(function, args[0])?;
                if result.auction_id == 0 {
                    return Err(AuctionError::MalformedInput(
                        "AuctionID must be positive".to_string(),
                    ));
                }
                Ok(Self::FinalizeAuction {
                    result,
                    proceed: parse_bool(args[1])?,
                })
            }
            "GetAsset" => {
                expect_arity(function, args, 1)?;
                Ok(Self::GetAsset(non_blank("asset id", args[0])?))
            }
            "GetAuction" => {
                expect_arity(function, args, 1)?;
                Ok(Self::GetAuction(parse_auction_id(args[0])?))
            }
            "GetLastAuctionID" => {
                expect_arity(function, args, 0)?;
                Ok(Self::GetLastAuctionId)
            }
            other => Err(AuctionError::MalformedInput(format!(
                "unknown function {}",
                other
            ))),
        }
    }

    /// Operation label used in logs and metrics.
    pub fn operation(&self) -> &'static str {
        match self {
            Self::AddAsset { .. } => "add_asset",
            Self::StartAuction(_) => "start_auction",
            Self::CancelAuction(_) => "cancel_auction",
            Self::CloseAuction(_) => "close_auction",
            Self::FinalizeAuction { .. } => "finalize_auction",
            Self::GetAsset(_) => "get_asset",
            Self::GetAuction(_) => "get_auction",
            Self::GetLastAuctionId => "get_last_auction_id",
        }
    }

    /// Check if the call only reads world state.
    pub fn is_read_only(&self) -> bool {
        matches!(
            self,
            Self::GetAsset(_) | Self::GetAuction(_) | Self::GetLastAuctionId
        )
    }
}

fn expect_arity(function: &str, args: &[&str], expected: usize) -> Result<(), AuctionError> {
    if args.len() != expected {
        return Err(AuctionError::MalformedInput(format!(
            "{} expects {} argument(s), got {}",
            function,
            expected,
            args.len()
        )));
    }
    Ok(())
}

fn non_blank(field: &str, value: &str) -> Result<String, AuctionError> {
    if value.trim().is_empty() {
        return Err(AuctionError::MalformedInput(format!("{} is blank", field)));
    }
    Ok(value.to_string())
}

fn decode_json<T: DeserializeOwned>(function: &str, raw: &str) -> Result<T, AuctionError> {
    serde_json::from_str(raw)
        .map_err(|e| AuctionError::MalformedInput(format!("{} argument: {}", function, e)))
}

/// Parse a positive decimal auction id.
pub fn parse_auction_id(raw: &str) -> Result<AuctionId, AuctionError> {
    match raw.trim().parse::<AuctionId>() {
        Ok(0) => Err(AuctionError::MalformedInput(
            "auction id must be positive".to_string(),
        )),
        Ok(id) => Ok(id),
        Err(e) => Err(AuctionError::MalformedInput(format!(
            "auction id {:?}: {}",
            raw, e
        ))),
    }
}

/// Parse a boolean flag. Accepts `1 t T TRUE true True` and
/// `0 f F FALSE false False`.
pub fn parse_bool(raw: &str) -> Result<bool, AuctionError> {
    match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(AuctionError::MalformedInput(format!(
            "invalid boolean {:?}",
            raw
        ))),
    }
}

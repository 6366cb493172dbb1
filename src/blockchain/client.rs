// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Algorand node (algod v2) client.

use std::time::Duration;

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine};
use reqwest::{header::CONTENT_TYPE, Client, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Deserialize};

use super::address::Address;
use super::transaction::VALIDITY_WINDOW;
use super::types::{AccountInformation, TransactionParams};
use crate::config::NodeConnectionInfo;
use crate::error::WalletError;

/// Header algod reads the API token from.
pub const API_TOKEN_HEADER: &str = "X-Algo-API-Token";

/// Default request timeout for node calls.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Remote ledger operations the wallet depends on.
#[async_trait]
pub trait LedgerClient: Send + Sync {
    /// Fetch suggested parameters for a new transaction.
    async fn transaction_params(&self) -> Result<TransactionParams, WalletError>;

    /// Fetch account state. `Ok(None)` when the node returned no data.
    async fn account_information(
        &self,
        address: &Address,
    ) -> Result<Option<AccountInformation>, WalletError>;

    /// Submit one or more signed transactions; returns the transaction id.
    async fn send_raw_transactions(&self, signed: &[Vec<u8>]) -> Result<String, WalletError>;
}

/// `GET /v2/transactions/params` body.
#[derive(Debug, Deserialize)]
struct ParamsResponse {
    #[serde(rename = "consensus-version", default)]
    consensus_version: String,
    fee: u64,
    #[serde(rename = "genesis-hash")]
    genesis_hash: String,
    #[serde(rename = "genesis-id")]
    genesis_id: String,
    #[serde(rename = "last-round")]
    last_round: u64,
    #[serde(rename = "min-fee")]
    min_fee: u64,
}

impl TryFrom<ParamsResponse> for TransactionParams {
    type Error = WalletError;

    fn try_from(raw: ParamsResponse) -> Result<Self, Self::Error> {
        let hash = STANDARD
            .decode(raw.genesis_hash.as_bytes())
            .map_err(|e| WalletError::InvalidResponse(format!("genesis-hash: {e}")))?;
        let genesis_hash: [u8; 32] = hash.try_into().map_err(|v: Vec<u8>| {
            WalletError::InvalidResponse(format!("genesis-hash: expected 32 bytes, got {}", v.len()))
        })?;

        let last_valid = raw.last_round.checked_add(VALIDITY_WINDOW).ok_or_else(|| {
            WalletError::InvalidResponse(format!("last-round {} out of range", raw.last_round))
        })?;

        Ok(TransactionParams {
            fee_per_byte: raw.fee,
            min_fee: raw.min_fee,
            first_valid: raw.last_round,
            last_valid,
            genesis_id: raw.genesis_id,
            genesis_hash,
            consensus_version: raw.consensus_version,
        })
    }
}

#[derive(Debug, Deserialize)]
struct SubmitResponse {
    #[serde(rename = "txId")]
    tx_id: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    message: String,
}

/// HTTP client for an algod node.
#[derive(Debug, Clone)]
pub struct AlgodClient {
    /// Base URL without trailing slash
    base_url: String,
    token: String,
    http: Client,
}

impl AlgodClient {
    /// Create a client for the given node. No request is made here.
    pub fn new(node: &NodeConnectionInfo) -> Result<Self, WalletError> {
        let base_url = node.algod_base_url()?;
        let http = Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(|e| WalletError::Http(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url,
            token: node.token.clone(),
            http,
        })
    }

    /// Base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        if self.token.is_empty() {
            request
        } else {
            request.header(API_TOKEN_HEADER, &self.token)
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>, WalletError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .authorize(self.http.get(&url))
            .send()
            .await
            .map_err(|e| WalletError::Http(e.to_string()))?;

        let body = ensure_success(response)
            .await?
            .bytes()
            .await
            .map_err(|e| WalletError::Http(e.to_string()))?;

        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }

        serde_json::from_slice(&body)
            .map(Some)
            .map_err(|e| WalletError::InvalidResponse(format!("{path}: {e}")))
    }
}

/// Turn a non-2xx response into [`WalletError::NodeRejected`], keeping
/// algod's `message` when the body carries one.
async fn ensure_success(response: Response) -> Result<Response, WalletError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.map_err(|e| e.to_string());
    Err(WalletError::NodeRejected {
        status: status.as_u16(),
        message: rejection_message(status, body),
    })
}

/// algod's `message` if present, else the raw body, else the status reason.
fn rejection_message(status: StatusCode, body: Result<String, String>) -> String {
    let reason = status.canonical_reason().unwrap_or("unknown status");
    match body {
        Ok(text) if text.trim().is_empty() => reason.to_string(),
        Ok(text) => serde_json::from_str::<ErrorResponse>(&text)
            .map(|e| e.message)
            .unwrap_or(text),
        Err(e) => format!("{reason} (failed to read body: {e})"),
    }
}

#[async_trait]
impl LedgerClient for AlgodClient {
    async fn transaction_params(&self) -> Result<TransactionParams, WalletError> {
        let raw: ParamsResponse = self
            .get_json("/v2/transactions/params")
            .await?
            .ok_or_else(|| WalletError::InvalidResponse("empty transaction params".to_string()))?;
        raw.try_into()
    }

    async fn account_information(
        &self,
        address: &Address,
    ) -> Result<Option<AccountInformation>, WalletError> {
        self.get_json(&format!("/v2/accounts/{address}")).await
    }

    async fn send_raw_transactions(&self, signed: &[Vec<u8>]) -> Result<String, WalletError> {
        let body = signed.concat();
        let url = format!("{}/v2/transactions", self.base_url);
        let response = self
            .authorize(self.http.post(&url))
            .header(CONTENT_TYPE, "application/x-binary")
            .body(body)
            .send()
            .await
            .map_err(|e| WalletError::Http(e.to_string()))?;

        let submitted: SubmitResponse = ensure_success(response)
            .await?
            .json()
            .await
            .map_err(|e| WalletError::InvalidResponse(format!("/v2/transactions: {e}")))?;

        Ok(submitted.tx_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(server: &str, port: &str) -> NodeConnectionInfo {
        NodeConnectionInfo {
            token: String::new(),
            server: server.to_string(),
            port: port.to_string(),
            metadata_url: crate::blockchain::ALGORAND_MAINNET.metadata_url.to_string(),
        }
    }

    #[test]
    fn test_base_url_without_port() {
        let client = AlgodClient::new(&node("https://node.algoexplorerapi.io/", "")).unwrap();
        assert_eq!(client.base_url(), "https://node.algoexplorerapi.io");
    }

    #[test]
    fn test_base_url_with_port() {
        let client = AlgodClient::new(&node("http://localhost", "4001")).unwrap();
        assert_eq!(client.base_url(), "http://localhost:4001");
    }

    #[test]
    fn test_params_conversion() {
        let raw: ParamsResponse = serde_json::from_str(
            r#"{
                "consensus-version": "future",
                "fee": 0,
                "genesis-hash": "SGO1GKSzyE7IEPItTxCByw9x8FmnrCDexi9/cOUJOiI=",
                "genesis-id": "testnet-v1.0",
                "last-round": 41000000,
                "min-fee": 1000
            }"#,
        )
        .unwrap();
        let params: TransactionParams = raw.try_into().unwrap();
        assert_eq!(params.first_valid, 41_000_000);
        assert_eq!(params.last_valid, 41_001_000);
        assert_eq!(params.min_fee, 1000);
        assert_eq!(params.fee_per_byte, 0);
        assert_eq!(params.genesis_id, "testnet-v1.0");
        assert_eq!(params.genesis_hash[0], 0x48);
    }

    #[test]
    fn test_params_rejects_overflowing_round() {
        let raw = ParamsResponse {
            consensus_version: String::new(),
            fee: 0,
            genesis_hash: STANDARD.encode([1u8; 32]),
            genesis_id: "x".to_string(),
            last_round: u64::MAX - 10,
            min_fee: 1000,
        };
        let err = TransactionParams::try_from(raw).unwrap_err();
        assert!(matches!(err, WalletError::InvalidResponse(ref m) if m.contains("last-round")));
    }

    #[test]
    fn test_rejection_message_prefers_algod_message() {
        let body = Ok(r#"{"message":"TransactionPool.Remember: overspend"}"#.to_string());
        assert_eq!(
            rejection_message(StatusCode::BAD_REQUEST, body),
            "TransactionPool.Remember: overspend"
        );
        let body = Ok("plain text failure".to_string());
        assert_eq!(
            rejection_message(StatusCode::BAD_REQUEST, body),
            "plain text failure"
        );
    }

    #[test]
    fn test_rejection_message_falls_back_to_reason() {
        assert_eq!(
            rejection_message(StatusCode::SERVICE_UNAVAILABLE, Ok("  ".to_string())),
            "Service Unavailable"
        );
        let message = rejection_message(
            StatusCode::BAD_GATEWAY,
            Err("connection reset".to_string()),
        );
        assert_eq!(message, "Bad Gateway (failed to read body: connection reset)");
    }

    #[test]
    fn test_params_rejects_short_genesis_hash() {
        let raw = ParamsResponse {
            consensus_version: String::new(),
            fee: 0,
            genesis_hash: STANDARD.encode([1u8; 16]),
            genesis_id: "x".to_string(),
            last_round: 1,
            min_fee: 1000,
        };
        let err = TransactionParams::try_from(raw).unwrap_err();
        assert!(matches!(err, WalletError::InvalidResponse(_)));
    }
}

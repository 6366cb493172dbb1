// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! End-to-end wallet calls against a local fake algod + metadata server.

use std::sync::{Arc, Mutex};

use algo_minimal_wallet::blockchain::{mnemonic_from_seed, AccountSigner, Address};
use algo_minimal_wallet::{
    AlgoWallet, NodeConnectionInfo, SendAlgo, SendAsa, WalletCredentials, WalletError,
    WalletOptions,
};
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

const TOKEN: &str = "secret-token";
const USDC: u64 = 31566704;

#[derive(Default)]
struct FakeNode {
    reject_submissions: bool,
    holdings: Vec<(u64, u64)>,
    tokens: Mutex<Vec<Option<String>>>,
    content_types: Mutex<Vec<String>>,
    submitted: Mutex<Vec<Vec<u8>>>,
}

type Shared = Arc<FakeNode>;

impl FakeNode {
    fn record_token(&self, headers: &HeaderMap) {
        let token = headers
            .get("x-algo-api-token")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        self.tokens.lock().unwrap().push(token);
    }
}

async fn params(State(node): State<Shared>, headers: HeaderMap) -> Json<serde_json::Value> {
    node.record_token(&headers);
    Json(json!({
        "consensus-version": "future",
        "fee": 0,
        "genesis-hash": "SGO1GKSzyE7IEPItTxCByw9x8FmnrCDexi9/cOUJOiI=",
        "genesis-id": "testnet-v1.0",
        "last-round": 41000000,
        "min-fee": 1000
    }))
}

async fn account(
    State(node): State<Shared>,
    Path(address): Path<String>,
    headers: HeaderMap,
) -> Json<serde_json::Value> {
    node.record_token(&headers);
    let assets: Vec<_> = node
        .holdings
        .iter()
        .map(|(id, amount)| json!({"asset-id": id, "amount": amount, "is-frozen": false}))
        .collect();
    Json(json!({
        "address": address,
        "amount": 5_000_000u64,
        "assets": assets,
        "status": "Offline"
    }))
}

async fn submit(State(node): State<Shared>, headers: HeaderMap, body: Bytes) -> Response {
    node.record_token(&headers);
    if let Some(content_type) = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()) {
        node.content_types
            .lock()
            .unwrap()
            .push(content_type.to_string());
    }

    if node.reject_submissions {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"message": "TransactionPool.Remember: overspend"})),
        )
            .into_response();
    }

    node.submitted.lock().unwrap().push(body.to_vec());
    Json(json!({"txId": "SERVERTXID"})).into_response()
}

async fn asset(Path(id): Path<u64>) -> Response {
    match id {
        USDC => Json(json!({
            "asset_id": USDC,
            "name": "USDC",
            "unit_name": "USDC",
            "fraction_decimals": 6
        }))
        .into_response(),
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn spawn(node: Shared) -> String {
    let app = Router::new()
        .route("/v2/transactions/params", get(params))
        .route("/v2/accounts/{address}", get(account))
        .route("/v2/transactions", post(submit))
        .route("/v1/assets/{id}/", get(asset))
        .with_state(node);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn credentials() -> WalletCredentials {
    let phrase = mnemonic_from_seed(&[11u8; 32]);
    let address = AccountSigner::from_mnemonic(&phrase)
        .unwrap()
        .address()
        .to_string();
    WalletCredentials::new(address, phrase)
}

async fn wallet_for(node: FakeNode) -> (AlgoWallet, Shared) {
    let node = Arc::new(node);
    let base = spawn(node.clone()).await;
    let connection = NodeConnectionInfo::new(TOKEN, &base, "").with_metadata_url(&base);
    let wallet = AlgoWallet::new(WalletOptions::new(connection, credentials())).unwrap();
    (wallet, node)
}

#[derive(Deserialize)]
struct SubmittedTxn {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    amt: u64,
    #[serde(default)]
    aamt: u64,
    #[serde(default)]
    xaid: u64,
    fee: u64,
    fv: u64,
    lv: u64,
    gen: String,
}

#[derive(Deserialize)]
struct Submitted {
    sig: serde_bytes::ByteBuf,
    txn: SubmittedTxn,
}

#[tokio::test]
async fn balances_over_http() {
    let (wallet, node) = wallet_for(FakeNode {
        holdings: vec![(USDC, 1_500_000)],
        ..Default::default()
    })
    .await;

    let balances = wallet.get_balances().await.unwrap();
    assert_eq!(balances.len(), 2);
    assert_eq!(balances.get("ALGO"), Some(&5.0));
    assert_eq!(balances.get("USDC"), Some(&1.5));

    let tokens = node.tokens.lock().unwrap().clone();
    assert!(!tokens.is_empty());
    assert!(tokens.iter().all(|t| t.as_deref() == Some(TOKEN)));
}

#[tokio::test]
async fn unknown_asset_fails_balances() {
    let (wallet, _node) = wallet_for(FakeNode {
        holdings: vec![(USDC, 1), (999, 1)],
        ..Default::default()
    })
    .await;

    let err = wallet.get_balances().await.unwrap_err();
    assert!(matches!(err, WalletError::Metadata { asset_id: 999, .. }));
}

#[tokio::test]
async fn send_algo_over_http() {
    let (wallet, node) = wallet_for(FakeNode::default()).await;
    let to = Address::new([9u8; 32]).to_string();

    let result = wallet
        .send_algo(SendAlgo {
            to,
            amount: 0.3,
            note: None,
        })
        .await
        .unwrap();
    assert_eq!(result.tx_id, "SERVERTXID");

    let submitted = node.submitted.lock().unwrap().clone();
    assert_eq!(submitted.len(), 1);
    let decoded: Submitted = rmp_serde::from_slice(&submitted[0]).unwrap();
    assert_eq!(decoded.sig.len(), 64);
    assert_eq!(decoded.txn.kind, "pay");
    assert_eq!(decoded.txn.amt, 300_000);
    assert_eq!(decoded.txn.fee, 1000);
    assert_eq!(decoded.txn.fv, 41_000_000);
    assert_eq!(decoded.txn.lv, 41_001_000);
    assert_eq!(decoded.txn.gen, "testnet-v1.0");

    let content_types = node.content_types.lock().unwrap().clone();
    assert_eq!(content_types, vec!["application/x-binary".to_string()]);
}

#[tokio::test]
async fn send_asa_over_http() {
    let (wallet, node) = wallet_for(FakeNode::default()).await;

    wallet
        .send_asa(SendAsa {
            to: Address::new([9u8; 32]).to_string(),
            asset_id: USDC,
            amount: 2.5,
            note: Some("invoice 7".to_string()),
        })
        .await
        .unwrap();

    let submitted = node.submitted.lock().unwrap().clone();
    let decoded: Submitted = rmp_serde::from_slice(&submitted[0]).unwrap();
    assert_eq!(decoded.txn.kind, "axfer");
    assert_eq!(decoded.txn.xaid, USDC);
    assert_eq!(decoded.txn.aamt, 2_500_000);
}

#[tokio::test]
async fn node_rejection_surfaces_message() {
    let (wallet, node) = wallet_for(FakeNode {
        reject_submissions: true,
        ..Default::default()
    })
    .await;

    let err = wallet
        .send_algo(SendAlgo {
            to: Address::new([9u8; 32]).to_string(),
            amount: 1.0,
            note: None,
        })
        .await
        .unwrap_err();

    match err {
        WalletError::NodeRejected { status, message } => {
            assert_eq!(status, 400);
            assert!(message.contains("overspend"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(node.submitted.lock().unwrap().is_empty());
}

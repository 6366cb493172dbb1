// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Blockchain types and constants.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::amount::{base_units_to_decimal, decimal_to_base_units};
use crate::error::WalletError;

/// Algorand network configuration.
#[derive(Debug, Clone)]
pub struct NetworkConfig {
    /// Network name for display
    pub name: &'static str,
    /// Genesis ID reported by algod
    pub genesis_id: &'static str,
    /// Public algod endpoint
    pub algod_url: &'static str,
    /// Asset metadata service base URL
    pub metadata_url: &'static str,
    /// Block explorer URL
    pub explorer_url: &'static str,
}

/// Algorand MainNet configuration.
pub const ALGORAND_MAINNET: NetworkConfig = NetworkConfig {
    name: "Algorand MainNet",
    genesis_id: "mainnet-v1.0",
    algod_url: "https://mainnet-api.algonode.cloud",
    metadata_url: "https://mainnet.api.perawallet.app",
    explorer_url: "https://allo.info",
};

/// Algorand TestNet configuration.
pub const ALGORAND_TESTNET: NetworkConfig = NetworkConfig {
    name: "Algorand TestNet",
    genesis_id: "testnet-v1.0",
    algod_url: "https://testnet-api.algonode.cloud",
    metadata_url: "https://testnet.api.perawallet.app",
    explorer_url: "https://testnet.allo.info",
};

/// Asset id reserved for the native coin.
pub const ALGO_ASSET_ID: u64 = 0;

/// Unit name of the native coin.
pub const ALGO_UNIT_NAME: &str = "ALGO";

/// 1 ALGO = 10^6 microAlgos.
pub const ALGO_DECIMALS: u8 = 6;

/// Largest decimal precision an Algorand asset may declare.
pub const MAX_FRACTION_DECIMALS: u8 = 19;

/// Display metadata for ALGO or an ASA.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetMetadata {
    pub id: u64,
    pub unit_name: String,
    pub fraction_decimals: u8,
}

impl AssetMetadata {
    /// Metadata of the native coin. Never fetched from the network.
    pub fn algo() -> Self {
        Self {
            id: ALGO_ASSET_ID,
            unit_name: ALGO_UNIT_NAME.to_string(),
            fraction_decimals: ALGO_DECIMALS,
        }
    }

    /// Convert an amount in base units to a human-readable decimal.
    pub fn to_decimal(&self, base_units: u64) -> f64 {
        base_units_to_decimal(base_units, self.fraction_decimals)
    }

    /// Convert a human-readable amount to base units, rounding to nearest.
    pub fn to_base_units(&self, amount: f64) -> Result<u64, WalletError> {
        decimal_to_base_units(amount, self.fraction_decimals)
    }
}

/// Balance snapshot keyed by unit name.
///
/// Two assets sharing a unit name collapse into one entry; the asset listed
/// later in the account's holdings wins.
pub type Balances = BTreeMap<String, f64>;

/// Suggested parameters for building a transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionParams {
    /// Fee per byte of the signed transaction, in microAlgos
    pub fee_per_byte: u64,
    /// Minimum flat fee, in microAlgos
    pub min_fee: u64,
    pub first_valid: u64,
    pub last_valid: u64,
    pub genesis_id: String,
    pub genesis_hash: [u8; 32],
    pub consensus_version: String,
}

/// One asset holding of an account.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AssetHolding {
    #[serde(rename = "asset-id")]
    pub asset_id: u64,
    pub amount: u64,
    #[serde(rename = "is-frozen", default)]
    pub is_frozen: bool,
}

/// Account state as reported by `GET /v2/accounts/{address}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AccountInformation {
    #[serde(default)]
    pub address: String,
    /// MicroAlgo balance
    pub amount: u64,
    #[serde(default)]
    pub assets: Vec<AssetHolding>,
}

/// Native ALGO transfer request.
#[derive(Debug, Clone, PartialEq)]
pub struct SendAlgo {
    /// Destination address
    pub to: String,
    /// Amount in ALGO (not microAlgos)
    pub amount: f64,
    /// Optional UTF-8 note
    pub note: Option<String>,
}

/// ASA transfer request.
#[derive(Debug, Clone, PartialEq)]
pub struct SendAsa {
    /// Destination address
    pub to: String,
    pub asset_id: u64,
    /// Amount in the asset's display units
    pub amount: f64,
    /// Optional UTF-8 note
    pub note: Option<String>,
}

/// A transfer of either kind.
#[derive(Debug, Clone, PartialEq)]
pub enum TransferRequest {
    Native(SendAlgo),
    Asset(SendAsa),
}

impl From<SendAlgo> for TransferRequest {
    fn from(request: SendAlgo) -> Self {
        Self::Native(request)
    }
}

impl From<SendAsa> for TransferRequest {
    fn from(request: SendAsa) -> Self {
        Self::Asset(request)
    }
}

/// Result of a successful submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendResult {
    /// Transaction id assigned by the node
    #[serde(rename = "txId")]
    pub tx_id: String,
}

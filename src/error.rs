// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Error taxonomy for wallet operations.
//!
//! Every public operation returns [`WalletError`]. Errors coming from the
//! algod node or the asset metadata service are carried through unchanged;
//! nothing is retried or swallowed locally.

/// Errors that can occur while configuring the wallet or talking to the network.
#[derive(Debug, thiserror::Error)]
pub enum WalletError {
    /// Missing or malformed connection/credential fields.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Invalid mnemonic: {0}")]
    InvalidMnemonic(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid note: {0}")]
    InvalidNote(String),

    /// Transport-level failure reaching the node.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The node answered with a non-success status (overspend, bad txn, ...).
    #[error("Node rejected request (HTTP {status}): {message}")]
    NodeRejected { status: u16, message: String },

    /// The node answered 2xx but the body did not match the expected shape.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Asset metadata lookup failed for asset {asset_id}: {message}")]
    Metadata { asset_id: u64, message: String },

    #[error("Encoding error: {0}")]
    Encoding(String),
}

impl WalletError {
    /// True when the error originates from the algod node refusing a request.
    pub fn is_node_rejection(&self) -> bool {
        matches!(self, Self::NodeRejected { .. })
    }
}

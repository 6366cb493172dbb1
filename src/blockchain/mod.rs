// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Algorand integration module.
//!
//! This module provides functionality for:
//! - Address and 25-word mnemonic encoding
//! - Canonical msgpack transaction building and Ed25519 signing
//! - algod v2 queries and submission
//! - Asset metadata lookups (unit name, decimals)

pub mod address;
pub mod amount;
pub mod client;
pub mod metadata;
pub mod mnemonic;
pub mod signing;
pub mod transaction;
pub mod types;

pub use address::Address;
pub use client::{AlgodClient, LedgerClient};
pub use metadata::{resolve_asset, AssetMetadataService, PeraAssetClient};
pub use mnemonic::{mnemonic_from_seed, seed_from_mnemonic};
pub use signing::AccountSigner;
pub use transaction::{build_transaction, SignedTransaction, Transaction, TransactionKind};
pub use types::*;

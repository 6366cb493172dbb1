// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Algo Minimal Wallet - single-account Algorand wallet helper
//!
//! Reads ALGO and ASA balances and signs and submits transfers for one
//! account. Keys are derived locally from the account mnemonic; only signed
//! transactions leave the process.
//!
//! ## Modules
//!
//! - `blockchain` - Algorand encoding, signing, algod and metadata clients
//! - `config` - Node connection info and wallet credentials
//! - `error` - Crate error type
//! - `logging` - Tracing subscriber setup
//! - `wallet` - The [`AlgoWallet`] facade

pub mod blockchain;
pub mod config;
pub mod error;
pub mod logging;
pub mod wallet;

pub use blockchain::{Balances, SendAlgo, SendAsa, SendResult, TransferRequest};
pub use config::{NodeConnectionInfo, WalletCredentials, WalletOptions};
pub use error::WalletError;
pub use wallet::AlgoWallet;

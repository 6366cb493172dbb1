// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Wallet Configuration
//!
//! Connection parameters for the algod node and the credentials of the single
//! account the wallet operates on. Options can be built in code or loaded from
//! the environment.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `ALGOD_SERVER` | algod base URL (`http`/`https`) | Required |
//! | `ALGOD_PORT` | algod port, empty to use the URL's | empty |
//! | `ALGOD_TOKEN` | API token sent as `X-Algo-API-Token` | empty |
//! | `ASSET_METADATA_URL` | Asset metadata service base URL | `https://mainnet.api.perawallet.app` |
//! | `WALLET_ADDRESS` | Account address | Required |
//! | `WALLET_MNEMONIC` | 25-word account mnemonic | Required |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info` |
//!
//! Only the *shape* of the options is checked here. The address and mnemonic
//! are decoded lazily, on the first operation that needs them.

use std::fmt;

use url::Url;
use zeroize::Zeroizing;

use crate::blockchain::{NetworkConfig, ALGORAND_MAINNET};
use crate::error::WalletError;

/// Environment variable name for the algod server URL.
pub const ALGOD_SERVER_ENV: &str = "ALGOD_SERVER";

/// Environment variable name for the algod port.
pub const ALGOD_PORT_ENV: &str = "ALGOD_PORT";

/// Environment variable name for the algod API token.
pub const ALGOD_TOKEN_ENV: &str = "ALGOD_TOKEN";

/// Environment variable name for the asset metadata service base URL.
pub const ASSET_METADATA_URL_ENV: &str = "ASSET_METADATA_URL";

/// Environment variable name for the account address.
pub const WALLET_ADDRESS_ENV: &str = "WALLET_ADDRESS";

/// Environment variable name for the account mnemonic.
///
/// Prefer a secrets manager over plain environment variables in production.
pub const WALLET_MNEMONIC_ENV: &str = "WALLET_MNEMONIC";

/// Environment variable selecting the log output format.
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

/// Static connection parameters for the ledger node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeConnectionInfo {
    pub token: String,
    pub server: String,
    pub port: String,
    /// Base URL of the asset metadata service
    pub metadata_url: String,
}

impl NodeConnectionInfo {
    pub fn new(
        token: impl Into<String>,
        server: impl Into<String>,
        port: impl Into<String>,
    ) -> Self {
        Self {
            token: token.into(),
            server: server.into(),
            port: port.into(),
            metadata_url: ALGORAND_MAINNET.metadata_url.to_string(),
        }
    }

    /// Connection info for one of the public network presets.
    pub fn for_network(network: &NetworkConfig) -> Self {
        Self {
            token: String::new(),
            server: network.algod_url.to_string(),
            port: String::new(),
            metadata_url: network.metadata_url.to_string(),
        }
    }

    /// Override the asset metadata service base URL.
    pub fn with_metadata_url(mut self, url: impl Into<String>) -> Self {
        self.metadata_url = url.into();
        self
    }

    /// Resolve `server` + `port` into a base URL with no trailing slash.
    pub fn algod_base_url(&self) -> Result<String, WalletError> {
        let mut url = parse_http_url("server", &self.server)?;

        let port = self.port.trim();
        if !port.is_empty() {
            let port: u16 = port
                .parse()
                .map_err(|_| WalletError::InvalidConfig(format!("port `{port}` is not a number")))?;
            url.set_port(Some(port))
                .map_err(|_| WalletError::InvalidConfig("server URL cannot carry a port".into()))?;
        }

        Ok(url.as_str().trim_end_matches('/').to_string())
    }

    /// Metadata service base URL with no trailing slash.
    pub fn metadata_base_url(&self) -> Result<String, WalletError> {
        let url = parse_http_url("metadata_url", &self.metadata_url)?;
        Ok(url.as_str().trim_end_matches('/').to_string())
    }
}

fn parse_http_url(field: &str, raw: &str) -> Result<Url, WalletError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(WalletError::InvalidConfig(format!("{field} is required")));
    }

    let url = Url::parse(raw)
        .map_err(|e| WalletError::InvalidConfig(format!("{field} `{raw}` is not a URL: {e}")))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(WalletError::InvalidConfig(format!(
            "{field} must be http or https, got `{other}`"
        ))),
    }
}

/// Credentials of the account the wallet acts for.
///
/// The mnemonic is zeroized on drop and redacted from `Debug` output.
#[derive(Clone)]
pub struct WalletCredentials {
    address: String,
    mnemonic_phrase: Zeroizing<String>,
}

impl WalletCredentials {
    pub fn new(address: impl Into<String>, mnemonic_phrase: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            mnemonic_phrase: Zeroizing::new(mnemonic_phrase.into()),
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub(crate) fn mnemonic_phrase(&self) -> &str {
        &self.mnemonic_phrase
    }

    /// Reject missing fields. Formats are not checked.
    pub fn validate(&self) -> Result<(), WalletError> {
        if self.address.trim().is_empty() {
            return Err(WalletError::InvalidConfig("wallet address is required".into()));
        }
        if self.mnemonic_phrase.trim().is_empty() {
            return Err(WalletError::InvalidConfig("wallet mnemonic is required".into()));
        }
        Ok(())
    }
}

impl fmt::Debug for WalletCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WalletCredentials")
            .field("address", &self.address)
            .field("mnemonic_phrase", &"<redacted>")
            .finish()
    }
}

/// Everything needed to construct a wallet.
#[derive(Debug, Clone)]
pub struct WalletOptions {
    pub node: NodeConnectionInfo,
    pub wallet: WalletCredentials,
}

impl WalletOptions {
    pub fn new(node: NodeConnectionInfo, wallet: WalletCredentials) -> Self {
        Self { node, wallet }
    }

    /// Load options from the process environment.
    pub fn from_env() -> Result<Self, WalletError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load options through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, WalletError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| WalletError::InvalidConfig(format!("{key} is not set")))
        };

        let mut node = NodeConnectionInfo::new(
            lookup(ALGOD_TOKEN_ENV).unwrap_or_default(),
            required(ALGOD_SERVER_ENV)?,
            lookup(ALGOD_PORT_ENV).unwrap_or_default(),
        );
        if let Some(url) = lookup(ASSET_METADATA_URL_ENV).filter(|v| !v.trim().is_empty()) {
            node = node.with_metadata_url(url);
        }

        let wallet = WalletCredentials::new(required(WALLET_ADDRESS_ENV)?, required(WALLET_MNEMONIC_ENV)?);

        let options = Self::new(node, wallet);
        options.validate()?;
        Ok(options)
    }

    /// Shape validation: required fields present, URLs and port well formed.
    pub fn validate(&self) -> Result<(), WalletError> {
        self.node.algod_base_url()?;
        self.node.metadata_base_url()?;
        self.wallet.validate()
    }
}

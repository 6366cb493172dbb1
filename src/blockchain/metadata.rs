// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Asset metadata lookups (unit name, decimals).
//!
//! ALGO is answered from a constant. Every ASA id costs one
//! `GET <base>/v1/assets/{id}/` request; nothing is cached.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::client::DEFAULT_TIMEOUT;
use super::types::{AssetMetadata, ALGO_ASSET_ID, MAX_FRACTION_DECIMALS};
use crate::config::NodeConnectionInfo;
use crate::error::WalletError;

/// Remote lookup of asset display metadata.
#[async_trait]
pub trait AssetMetadataService: Send + Sync {
    async fn asset_metadata(&self, asset_id: u64) -> Result<AssetMetadata, WalletError>;
}

/// Resolve metadata for `asset_id`, answering ALGO locally.
pub async fn resolve_asset<M>(service: &M, asset_id: u64) -> Result<AssetMetadata, WalletError>
where
    M: AssetMetadataService + ?Sized,
{
    if asset_id == ALGO_ASSET_ID {
        return Ok(AssetMetadata::algo());
    }
    service.asset_metadata(asset_id).await
}

/// `GET /v1/assets/{id}/` body. Only the fields we read.
#[derive(Debug, Deserialize)]
struct AssetResponse {
    #[serde(alias = "asset_id")]
    id: u64,
    unit_name: Option<String>,
    fraction_decimals: u8,
}

impl AssetResponse {
    fn into_metadata(self, requested: u64) -> Result<AssetMetadata, WalletError> {
        if self.id != requested {
            return Err(WalletError::Metadata {
                asset_id: requested,
                message: format!("service answered for asset {}", self.id),
            });
        }
        if self.fraction_decimals > MAX_FRACTION_DECIMALS {
            return Err(WalletError::Metadata {
                asset_id: requested,
                message: format!("fraction_decimals {} out of range", self.fraction_decimals),
            });
        }
        Ok(AssetMetadata {
            id: self.id,
            unit_name: self.unit_name.unwrap_or_default(),
            fraction_decimals: self.fraction_decimals,
        })
    }
}

/// HTTP client for the Pera asset metadata API.
#[derive(Debug, Clone)]
pub struct PeraAssetClient {
    /// Base URL without trailing slash
    base_url: String,
    http: Client,
}

impl PeraAssetClient {
    pub fn new(node: &NodeConnectionInfo) -> Result<Self, WalletError> {
        let base_url = node.metadata_base_url()?;
        let http = Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(|e| WalletError::Http(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { base_url, http })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn asset_url(&self, asset_id: u64) -> String {
        format!("{}/v1/assets/{asset_id}/", self.base_url)
    }
}

#[async_trait]
impl AssetMetadataService for PeraAssetClient {
    async fn asset_metadata(&self, asset_id: u64) -> Result<AssetMetadata, WalletError> {
        let lookup_error = |message: String| WalletError::Metadata { asset_id, message };

        let response = self
            .http
            .get(self.asset_url(asset_id))
            .send()
            .await
            .map_err(|e| lookup_error(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(lookup_error(format!("HTTP {status}")));
        }

        let body: AssetResponse = response
            .json()
            .await
            .map_err(|e| lookup_error(format!("invalid response: {e}")))?;

        body.into_metadata(asset_id)
    }
}

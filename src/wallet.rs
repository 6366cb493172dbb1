// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Single-account wallet facade.
//!
//! [`AlgoWallet`] holds one account's credentials plus handles to the algod
//! node and the asset metadata service, and exposes three operations:
//!
//! - [`AlgoWallet::get_balances`] - ALGO + ASA balances keyed by unit name
//! - [`AlgoWallet::send_algo`] - native ALGO payment
//! - [`AlgoWallet::send_asa`] - ASA transfer
//!
//! Every call fetches fresh network parameters and metadata. Failures from
//! either collaborator are returned as-is; nothing is retried.

use futures::future::try_join_all;

use crate::blockchain::{
    build_transaction, resolve_asset, AccountSigner, Address, AlgodClient, AssetMetadata,
    AssetMetadataService, Balances, LedgerClient, PeraAssetClient, SendAlgo, SendAsa, SendResult,
    TransactionKind, TransferRequest,
};
use crate::config::{WalletCredentials, WalletOptions};
use crate::error::WalletError;

/// Wallet bound to one account.
pub struct AlgoWallet<L = AlgodClient, M = PeraAssetClient> {
    credentials: WalletCredentials,
    ledger: L,
    metadata: M,
}

impl AlgoWallet {
    /// Create a wallet talking to a real algod node and the Pera asset API.
    ///
    /// Only the shape of `options` is checked; no request is made. An invalid
    /// address or mnemonic surfaces on the first operation that uses it.
    pub fn new(options: WalletOptions) -> Result<Self, WalletError> {
        options.validate()?;
        let ledger = AlgodClient::new(&options.node)?;
        let metadata = PeraAssetClient::new(&options.node)?;
        Self::with_clients(options.wallet, ledger, metadata)
    }
}

impl<L, M> AlgoWallet<L, M>
where
    L: LedgerClient,
    M: AssetMetadataService,
{
    /// Create a wallet on top of custom collaborator implementations.
    pub fn with_clients(
        credentials: WalletCredentials,
        ledger: L,
        metadata: M,
    ) -> Result<Self, WalletError> {
        credentials.validate()?;
        Ok(Self {
            credentials,
            ledger,
            metadata,
        })
    }

    /// The configured account address, as given.
    pub fn address(&self) -> &str {
        self.credentials.address()
    }

    fn sender(&self) -> Result<Address, WalletError> {
        self.credentials.address().parse()
    }

    async fn asset_info(&self, asset_id: u64) -> Result<AssetMetadata, WalletError> {
        resolve_asset(&self.metadata, asset_id).await
    }

    /// ALGO and ASA balances of the account, keyed by unit name.
    ///
    /// `ALGO` is always present when the node returns account data (0 for an
    /// empty account). Asset metadata lookups run concurrently; the first
    /// failure fails the whole call. When two assets share a unit name the
    /// one listed later in the account's holdings wins.
    pub async fn get_balances(&self) -> Result<Balances, WalletError> {
        let address = self.sender()?;

        let Some(account) = self.ledger.account_information(&address).await? else {
            tracing::debug!(%address, "Node returned no account data");
            return Ok(Balances::new());
        };

        let mut balances = Balances::new();
        let algo = self.asset_info(0).await?;
        balances.insert(algo.unit_name.clone(), algo.to_decimal(account.amount));

        let lookups = account.assets.iter().map(|holding| async move {
            let info = self.asset_info(holding.asset_id).await?;
            let amount = info.to_decimal(holding.amount);
            Ok::<_, WalletError>((info.unit_name, amount))
        });

        for (unit_name, amount) in try_join_all(lookups).await? {
            balances.insert(unit_name, amount);
        }

        tracing::debug!(
            %address,
            assets = account.assets.len(),
            entries = balances.len(),
            "Fetched balances"
        );

        Ok(balances)
    }

    /// Send ALGO. `amount` is in ALGO, not microAlgos.
    pub async fn send_algo(&self, request: SendAlgo) -> Result<SendResult, WalletError> {
        let algo = self.asset_info(0).await?;
        let receiver: Address = request.to.parse()?;
        let amount = algo.to_base_units(request.amount)?;

        let kind = TransactionKind::Payment { receiver, amount };
        self.submit(kind, request.note.as_deref()).await
    }

    /// Send an ASA. `amount` is in the asset's display units.
    pub async fn send_asa(&self, request: SendAsa) -> Result<SendResult, WalletError> {
        let asset = self.asset_info(request.asset_id).await?;
        let receiver: Address = request.to.parse()?;
        let amount = asset.to_base_units(request.amount)?;

        let kind = TransactionKind::AssetTransfer {
            receiver,
            asset_id: request.asset_id,
            amount,
        };
        self.submit(kind, request.note.as_deref()).await
    }

    /// Send either kind of transfer.
    pub async fn send(&self, request: TransferRequest) -> Result<SendResult, WalletError> {
        match request {
            TransferRequest::Native(request) => self.send_algo(request).await,
            TransferRequest::Asset(request) => self.send_asa(request).await,
        }
    }

    /// Build with fresh params, sign locally, submit.
    async fn submit(
        &self,
        kind: TransactionKind,
        note: Option<&str>,
    ) -> Result<SendResult, WalletError> {
        let sender = self.sender()?;
        let params = self.ledger.transaction_params().await?;
        let transaction = build_transaction(&params, sender, kind, note)?;

        let signed = AccountSigner::from_mnemonic(self.credentials.mnemonic_phrase())?
            .sign(transaction)?;
        let local_id = signed.id()?;

        let tx_id = self.ledger.send_raw_transactions(&[signed.encode()?]).await?;

        tracing::info!(
            tx_id = %tx_id,
            kind = signed.transaction.kind.type_tag(),
            fee = signed.transaction.fee,
            "Transaction submitted"
        );
        if tx_id != local_id {
            tracing::debug!(%tx_id, %local_id, "Node reported a different transaction id");
        }

        Ok(SendResult { tx_id })
    }
}

// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Transaction building and canonical encoding for Algorand.
//!
//! Transactions are serialised as canonical msgpack: map keys sorted,
//! zero/empty fields omitted, minimal-width integers. The wire structs below
//! declare their fields in key order so `rmp-serde` emits them sorted.
//!
//! The transaction id is the base32 form of `SHA-512/256("TX" || msgpack)`;
//! the same prefixed bytes are what the account key signs.

use data_encoding::BASE32_NOPAD;
use serde::Serialize;
use serde_bytes::Bytes;
use sha2::{Digest, Sha512_256};

use super::address::Address;
use super::types::TransactionParams;
use crate::error::WalletError;

/// Domain separation prefix for transaction signatures and ids.
const TX_PREFIX: &[u8] = b"TX";

/// Rounds a transaction stays valid after `first_valid`.
pub const VALIDITY_WINDOW: u64 = 1000;

/// Largest note the network accepts, in bytes.
pub const MAX_NOTE_LEN: usize = 1024;

/// What a transaction does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionKind {
    /// `pay`: move microAlgos.
    Payment { receiver: Address, amount: u64 },
    /// `axfer`: move ASA base units.
    AssetTransfer {
        receiver: Address,
        asset_id: u64,
        amount: u64,
    },
    /// `appl` with NoOp on-completion.
    ApplicationCall {
        app_id: u64,
        app_args: Vec<Vec<u8>>,
        accounts: Vec<Address>,
        foreign_assets: Vec<u64>,
    },
}

impl TransactionKind {
    /// The `type` field value.
    pub fn type_tag(&self) -> &'static str {
        match self {
            Self::Payment { .. } => "pay",
            Self::AssetTransfer { .. } => "axfer",
            Self::ApplicationCall { .. } => "appl",
        }
    }
}

/// An unsigned transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub sender: Address,
    /// Flat fee in microAlgos
    pub fee: u64,
    pub first_valid: u64,
    pub last_valid: u64,
    pub genesis_id: String,
    pub genesis_hash: [u8; 32],
    pub note: Vec<u8>,
    pub kind: TransactionKind,
}

fn is_zero(value: &u64) -> bool {
    *value == 0
}

fn is_empty_str(value: &&str) -> bool {
    value.is_empty()
}

fn is_empty_bytes(value: &&Bytes) -> bool {
    value.is_empty()
}

fn is_empty_slice<T>(value: &&[T]) -> bool {
    value.is_empty()
}

#[derive(Serialize)]
struct WireTransaction<'a> {
    #[serde(skip_serializing_if = "is_zero")]
    aamt: u64,
    #[serde(skip_serializing_if = "is_zero")]
    amt: u64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    apaa: Vec<&'a Bytes>,
    #[serde(skip_serializing_if = "is_empty_slice")]
    apas: &'a [u64],
    #[serde(skip_serializing_if = "is_empty_slice")]
    apat: &'a [Address],
    #[serde(skip_serializing_if = "is_zero")]
    apid: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    arcv: Option<&'a Address>,
    #[serde(skip_serializing_if = "is_zero")]
    fee: u64,
    #[serde(skip_serializing_if = "is_zero")]
    fv: u64,
    #[serde(skip_serializing_if = "is_empty_str")]
    gen: &'a str,
    gh: &'a Bytes,
    #[serde(skip_serializing_if = "is_zero")]
    lv: u64,
    #[serde(skip_serializing_if = "is_empty_bytes")]
    note: &'a Bytes,
    #[serde(skip_serializing_if = "Option::is_none")]
    rcv: Option<&'a Address>,
    snd: &'a Address,
    #[serde(rename = "type")]
    kind: &'static str,
    #[serde(skip_serializing_if = "is_zero")]
    xaid: u64,
}

#[derive(Serialize)]
struct WireSignedTransaction<'a> {
    sig: &'a Bytes,
    txn: WireTransaction<'a>,
}

impl Transaction {
    fn wire(&self) -> WireTransaction<'_> {
        let mut wire = WireTransaction {
            aamt: 0,
            amt: 0,
            apaa: Vec::new(),
            apas: &[],
            apat: &[],
            apid: 0,
            arcv: None,
            fee: self.fee,
            fv: self.first_valid,
            gen: &self.genesis_id,
            gh: Bytes::new(&self.genesis_hash),
            lv: self.last_valid,
            note: Bytes::new(&self.note),
            rcv: None,
            snd: &self.sender,
            kind: self.kind.type_tag(),
            xaid: 0,
        };

        match &self.kind {
            TransactionKind::Payment { receiver, amount } => {
                wire.rcv = Some(receiver);
                wire.amt = *amount;
            }
            TransactionKind::AssetTransfer {
                receiver,
                asset_id,
                amount,
            } => {
                wire.arcv = Some(receiver);
                wire.xaid = *asset_id;
                wire.aamt = *amount;
            }
            TransactionKind::ApplicationCall {
                app_id,
                app_args,
                accounts,
                foreign_assets,
            } => {
                wire.apid = *app_id;
                wire.apaa = app_args.iter().map(|arg| Bytes::new(arg)).collect();
                wire.apat = accounts.as_slice();
                wire.apas = foreign_assets.as_slice();
            }
        }

        wire
    }

    /// Canonical msgpack encoding of the unsigned transaction.
    pub fn encode(&self) -> Result<Vec<u8>, WalletError> {
        rmp_serde::to_vec_named(&self.wire()).map_err(|e| WalletError::Encoding(e.to_string()))
    }

    /// `"TX" || msgpack`, the message covered by the signature.
    pub fn bytes_to_sign(&self) -> Result<Vec<u8>, WalletError> {
        let encoded = self.encode()?;
        let mut msg = Vec::with_capacity(TX_PREFIX.len() + encoded.len());
        msg.extend_from_slice(TX_PREFIX);
        msg.extend_from_slice(&encoded);
        Ok(msg)
    }

    /// Transaction id (52 base32 characters).
    pub fn id(&self) -> Result<String, WalletError> {
        let digest = Sha512_256::digest(self.bytes_to_sign()?);
        Ok(BASE32_NOPAD.encode(&digest))
    }

    /// Size of the signed encoding, used for per-byte fee estimation.
    ///
    /// Measured with a widest-width fee so the estimate never undercounts the
    /// `fee` field the final encoding carries.
    fn estimate_signed_size(&self) -> Result<u64, WalletError> {
        let placeholder = SignedTransaction {
            transaction: Transaction {
                fee: u64::MAX,
                ..self.clone()
            },
            signature: [0u8; 64],
        };
        Ok(placeholder.encode()?.len() as u64)
    }
}

/// A transaction together with its Ed25519 signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTransaction {
    pub transaction: Transaction,
    pub signature: [u8; 64],
}

impl SignedTransaction {
    /// Canonical msgpack `{sig, txn}`, the body `POST /v2/transactions` expects.
    pub fn encode(&self) -> Result<Vec<u8>, WalletError> {
        let wire = WireSignedTransaction {
            sig: Bytes::new(&self.signature),
            txn: self.transaction.wire(),
        };
        rmp_serde::to_vec_named(&wire).map_err(|e| WalletError::Encoding(e.to_string()))
    }

    pub fn id(&self) -> Result<String, WalletError> {
        self.transaction.id()
    }
}

/// Encode an optional note as raw UTF-8.
///
/// An absent note and an empty note are the same thing: no bytes, and the
/// field is left out of the encoding.
pub fn encode_note(note: Option<&str>) -> Result<Vec<u8>, WalletError> {
    let bytes = note.map(|n| n.as_bytes().to_vec()).unwrap_or_default();
    if bytes.len() > MAX_NOTE_LEN {
        return Err(WalletError::InvalidNote(format!(
            "note is {} bytes, max is {MAX_NOTE_LEN}",
            bytes.len()
        )));
    }
    Ok(bytes)
}

/// Build an unsigned transaction from freshly fetched suggested parameters.
///
/// The fee is `max(fee_per_byte * signed_size, min_fee)`, where `signed_size`
/// is an upper bound on the size of the signed encoding, fee field included.
pub fn build_transaction(
    params: &TransactionParams,
    sender: Address,
    kind: TransactionKind,
    note: Option<&str>,
) -> Result<Transaction, WalletError> {
    let mut transaction = Transaction {
        sender,
        fee: 0,
        first_valid: params.first_valid,
        last_valid: params.last_valid,
        genesis_id: params.genesis_id.clone(),
        genesis_hash: params.genesis_hash,
        note: encode_note(note)?,
        kind,
    };

    let size = transaction.estimate_signed_size()?;
    transaction.fee = params
        .fee_per_byte
        .saturating_mul(size)
        .max(params.min_fee);

    Ok(transaction)
}

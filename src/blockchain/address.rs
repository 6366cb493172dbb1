// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Algorand address encoding and validation.
//!
//! An address is the base32 (RFC 4648, no padding) encoding of the 32-byte
//! Ed25519 public key followed by a 4-byte checksum: the last four bytes of
//! `SHA-512/256(public_key)`. The result is always 58 characters.

use std::fmt;
use std::str::FromStr;

use data_encoding::BASE32_NOPAD;
use serde::{Serialize, Serializer};
use sha2::{Digest, Sha512_256};

use crate::error::WalletError;

const PUBLIC_KEY_LEN: usize = 32;
const CHECKSUM_LEN: usize = 4;

/// Length of an encoded address string.
pub const ADDRESS_LEN: usize = 58;

/// A decoded Algorand address (raw public key bytes).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address([u8; PUBLIC_KEY_LEN]);

impl Address {
    pub const fn new(public_key: [u8; PUBLIC_KEY_LEN]) -> Self {
        Self(public_key)
    }

    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LEN] {
        &self.0
    }

    /// Encode to the 58-character checksummed form.
    pub fn encode(&self) -> String {
        let mut buf = Vec::with_capacity(PUBLIC_KEY_LEN + CHECKSUM_LEN);
        buf.extend_from_slice(&self.0);
        buf.extend_from_slice(&checksum(&self.0));
        BASE32_NOPAD.encode(&buf)
    }
}

fn checksum(public_key: &[u8]) -> [u8; CHECKSUM_LEN] {
    let digest = Sha512_256::digest(public_key);
    let mut out = [0u8; CHECKSUM_LEN];
    out.copy_from_slice(&digest[digest.len() - CHECKSUM_LEN..]);
    out
}

impl FromStr for Address {
    type Err = WalletError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != ADDRESS_LEN {
            return Err(WalletError::InvalidAddress(format!(
                "expected {ADDRESS_LEN} characters, got {}",
                s.len()
            )));
        }

        let bytes = BASE32_NOPAD
            .decode(s.as_bytes())
            .map_err(|e| WalletError::InvalidAddress(format!("base32 decode failed: {e}")))?;

        if bytes.len() != PUBLIC_KEY_LEN + CHECKSUM_LEN {
            return Err(WalletError::InvalidAddress(format!(
                "expected {} bytes, got {}",
                PUBLIC_KEY_LEN + CHECKSUM_LEN,
                bytes.len()
            )));
        }

        let (key, sum) = bytes.split_at(PUBLIC_KEY_LEN);
        if checksum(key) != sum {
            return Err(WalletError::InvalidAddress("checksum mismatch".to_string()));
        }

        let mut public_key = [0u8; PUBLIC_KEY_LEN];
        public_key.copy_from_slice(key);
        Ok(Self(public_key))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.encode())
    }
}

/// Addresses go on the wire as msgpack `bin`, not as strings.
impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bytes(&self.0)
    }
}

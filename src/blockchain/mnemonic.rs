// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Algorand 25-word mnemonics.
//!
//! The 32-byte Ed25519 seed is split into 11-bit groups (little-endian bit
//! order), each indexing the BIP-39 English word list, giving 24 words. The
//! 25th word is a checksum: the first 11-bit group of `SHA-512/256(seed)`.
//!
//! This is NOT a BIP-39 mnemonic; only the word list is shared.

use bip39::Language;
use sha2::{Digest, Sha512_256};
use zeroize::Zeroizing;

use crate::error::WalletError;

/// Number of words in an Algorand mnemonic.
pub const MNEMONIC_LEN: usize = 25;

const SEED_LEN: usize = 32;
const KEY_WORDS: usize = MNEMONIC_LEN - 1;

/// Pack bytes into 11-bit values, least significant bits first.
fn to_u11(bytes: &[u8]) -> Vec<u16> {
    let mut out = Vec::with_capacity(bytes.len() * 8 / 11 + 1);
    let mut acc: u32 = 0;
    let mut bits = 0;
    for &byte in bytes {
        acc |= u32::from(byte) << bits;
        bits += 8;
        if bits >= 11 {
            out.push((acc & 0x7ff) as u16);
            acc >>= 11;
            bits -= 11;
        }
    }
    if bits > 0 {
        out.push(acc as u16);
    }
    out
}

/// Unpack 11-bit values into bytes, least significant bits first.
fn from_u11(values: &[u16]) -> Vec<u8> {
    let mut out = Vec::with_capacity(values.len() * 11 / 8 + 1);
    let mut acc: u32 = 0;
    let mut bits = 0;
    for &value in values {
        acc |= u32::from(value) << bits;
        bits += 11;
        while bits >= 8 {
            out.push((acc & 0xff) as u8);
            acc >>= 8;
            bits -= 8;
        }
    }
    if bits > 0 {
        out.push(acc as u8);
    }
    out
}

fn checksum_word(seed: &[u8]) -> &'static str {
    let digest = Sha512_256::digest(seed);
    let index = to_u11(&digest)[0];
    Language::English.word_list()[usize::from(index)]
}

/// Encode a 32-byte seed as a 25-word mnemonic.
pub fn mnemonic_from_seed(seed: &[u8; SEED_LEN]) -> String {
    let words = Language::English.word_list();
    let mut phrase: Vec<&str> = to_u11(seed)
        .into_iter()
        .map(|index| words[usize::from(index)])
        .collect();
    phrase.push(checksum_word(seed));
    phrase.join(" ")
}

/// Decode a 25-word mnemonic into its 32-byte seed.
///
/// Words are matched exactly (lowercase) against the English list.
pub fn seed_from_mnemonic(phrase: &str) -> Result<Zeroizing<[u8; SEED_LEN]>, WalletError> {
    let words: Vec<&str> = phrase.split_whitespace().collect();
    if words.len() != MNEMONIC_LEN {
        return Err(WalletError::InvalidMnemonic(format!(
            "expected {MNEMONIC_LEN} words, got {}",
            words.len()
        )));
    }

    let indices = words[..KEY_WORDS]
        .iter()
        .map(|word| {
            Language::English
                .find_word(word)
                .ok_or_else(|| WalletError::InvalidMnemonic("unknown word".to_string()))
        })
        .collect::<Result<Vec<u16>, _>>()?;

    // 24 * 11 = 264 bits: the seed plus one zero byte of padding
    let bytes = Zeroizing::new(from_u11(&indices));
    if bytes.len() != SEED_LEN + 1 || bytes[SEED_LEN] != 0 {
        return Err(WalletError::InvalidMnemonic(
            "words do not encode a 32-byte key".to_string(),
        ));
    }

    let mut seed = Zeroizing::new([0u8; SEED_LEN]);
    seed.copy_from_slice(&bytes[..SEED_LEN]);

    if checksum_word(&seed[..]) != words[KEY_WORDS] {
        return Err(WalletError::InvalidMnemonic("checksum mismatch".to_string()));
    }

    Ok(seed)
}

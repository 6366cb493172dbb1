// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Transaction signing for Algorand accounts.
//!
//! The Ed25519 key is derived from the account mnemonic on demand and dropped
//! (zeroized) as soon as the signature is produced. The wallet never keeps a
//! derived key between calls.

use std::fmt;

use ed25519_dalek::{Signer, SigningKey};

use super::address::Address;
use super::mnemonic::seed_from_mnemonic;
use super::transaction::{SignedTransaction, Transaction};
use crate::error::WalletError;

/// Local Ed25519 signer for one account.
pub struct AccountSigner {
    key: SigningKey,
}

impl AccountSigner {
    /// Derive the signing key from a 25-word mnemonic.
    ///
    /// # Returns
    /// * `Ok(AccountSigner)` - A signer ready to sign transactions
    /// * `Err(WalletError::InvalidMnemonic)` - If the phrase does not decode
    pub fn from_mnemonic(phrase: &str) -> Result<Self, WalletError> {
        let seed = seed_from_mnemonic(phrase)?;
        Ok(Self {
            key: SigningKey::from_bytes(&seed),
        })
    }

    /// Address of the public key behind this signer.
    pub fn address(&self) -> Address {
        Address::new(self.key.verifying_key().to_bytes())
    }

    /// Sign `"TX" || msgpack(transaction)`.
    pub fn sign(&self, transaction: Transaction) -> Result<SignedTransaction, WalletError> {
        let message = transaction.bytes_to_sign()?;
        let signature = self.key.sign(&message);
        Ok(SignedTransaction {
            transaction,
            signature: signature.to_bytes(),
        })
    }
}

impl fmt::Debug for AccountSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountSigner")
            .field("address", &self.address())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use ed25519_dalek::{Signature, Verifier, VerifyingKey};

    use super::*;
    use crate::blockchain::mnemonic::mnemonic_from_seed;
    use crate::blockchain::transaction::TransactionKind;

    fn sample_transaction(sender: Address) -> Transaction {
        Transaction {
            sender,
            fee: 1000,
            first_valid: 10,
            last_valid: 1010,
            genesis_id: "testnet-v1.0".to_string(),
            genesis_hash: [3u8; 32],
            note: b"memo".to_vec(),
            kind: TransactionKind::Payment {
                receiver: Address::new([4u8; 32]),
                amount: 42,
            },
        }
    }

    #[test]
    fn test_signer_from_mnemonic() {
        let phrase = mnemonic_from_seed(&[5u8; 32]);
        let signer = AccountSigner::from_mnemonic(&phrase).unwrap();
        let expected = SigningKey::from_bytes(&[5u8; 32]).verifying_key().to_bytes();
        assert_eq!(signer.address().as_bytes(), &expected);
    }

    #[test]
    fn test_signer_matches_known_account() {
        let phrase = "hollow sustain tumble staff antenna victory eyebrow stuff duty neck toy \
                      first beef december myth shoulder syrup wheel credit copper mango employ \
                      maximum absent input";
        let signer = AccountSigner::from_mnemonic(phrase).unwrap();
        assert_eq!(
            signer.address().to_string(),
            "4N2DB7ZFERQZD6FPZ4TGYHYBG4WOS3SQCWFJO25LBQFMA7TMSLUPUBYNJI"
        );
    }

    #[test]
    fn test_signer_rejects_bad_mnemonic() {
        let err = AccountSigner::from_mnemonic("nothing").unwrap_err();
        assert!(matches!(err, WalletError::InvalidMnemonic(_)));
    }

    #[test]
    fn test_signature_verifies() {
        let phrase = mnemonic_from_seed(&[6u8; 32]);
        let signer = AccountSigner::from_mnemonic(&phrase).unwrap();
        let txn = sample_transaction(signer.address());
        let message = txn.bytes_to_sign().unwrap();

        let signed = signer.sign(txn).unwrap();
        let verifying = VerifyingKey::from_bytes(signer.address().as_bytes()).unwrap();
        let signature = Signature::from_bytes(&signed.signature);
        assert!(verifying.verify(&message, &signature).is_ok());
        assert!(message.starts_with(b"TX"));
    }

    #[test]
    fn test_debug_hides_key() {
        let phrase = mnemonic_from_seed(&[7u8; 32]);
        let signer = AccountSigner::from_mnemonic(&phrase).unwrap();
        let debug = format!("{signer:?}");
        assert!(debug.contains(&signer.address().to_string()));
        assert!(!debug.contains("key"));
    }
}

//! Transaction signing with Ed25519 keypairs.
//!
//! Every signer signs the same 32-byte digest, [`WireTransaction::digest`].
//! Signatures are collected on a [`SignedTransaction`]; gathering them from
//! counterparties is someone else's problem.

use serde::{Deserialize, Serialize};

use super::builder::WireTransaction;
use super::verification::TransactionError;
use crate::crypto::keys::{PartyKey, PartyKeypair, PartySignature};

/// One party's signature over a transaction digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionSignature {
    /// Key that produced the signature.
    pub by: PartyKey,
    pub signature: PartySignature,
}

/// A wire transaction plus the signatures collected so far.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedTransaction<S, C> {
    pub tx: WireTransaction<S, C>,
    pub signatures: Vec<TransactionSignature>,
}

impl<S, C> SignedTransaction<S, C> {
    /// Wraps an unsigned transaction.
    pub fn new(tx: WireTransaction<S, C>) -> Self {
        Self {
            tx,
            signatures: Vec::new(),
        }
    }

    pub fn is_signed_by(&self, key: &PartyKey) -> bool {
        self.signatures.iter().any(|s| &s.by == key)
    }
}

/// Signs a transaction in place.
///
/// Signing twice with the same key replaces the earlier signature rather
/// than stacking a duplicate.
///
/// # Errors
///
/// [`TransactionError::Encoding`] if the transaction cannot be encoded.
///
/// # Example
///
/// ```
/// use tally_protocol::crypto::keys::PartyKeypair;
/// use tally_protocol::transaction::{sign_transaction, SignedTransaction, TransactionBuilder};
///
/// let kp = PartyKeypair::generate();
/// let tx = TransactionBuilder::<String, String>::new()
///     .output("state".to_string())
///     .command("Issue".to_string())
///     .build()
///     .unwrap();
/// let mut stx = SignedTransaction::new(tx);
/// sign_transaction(&mut stx, &kp).unwrap();
/// assert!(stx.is_signed_by(&kp.public_key()));
/// ```
pub fn sign_transaction<'a, S: Serialize, C: Serialize>(
    stx: &'a mut SignedTransaction<S, C>,
    keypair: &PartyKeypair,
) -> Result<&'a SignedTransaction<S, C>, TransactionError> {
    let digest = stx.tx.digest()?;
    let signature = TransactionSignature {
        by: keypair.public_key(),
        signature: keypair.sign(&digest),
    };

    match stx.signatures.iter_mut().find(|s| s.by == signature.by) {
        Some(existing) => *existing = signature,
        None => stx.signatures.push(signature),
    }
    Ok(stx)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Signature verification for signed transactions.
//!
//! [`verify_signatures`] turns a [`SignedTransaction`] into the one thing
//! contracts need from it: the set of keys that provably signed. Checks run
//! cheapest first.

use serde::Serialize;
use std::collections::BTreeSet;
use thiserror::Error;

use super::signing::SignedTransaction;
use crate::config::MAX_TX_SIGNATURES;
use crate::crypto::keys::PartyKey;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors from building, signing or verifying a transaction.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransactionError {
    #[error("too many inputs: {count} (max {max})")]
    TooManyInputs { count: usize, max: usize },

    #[error("too many outputs: {count} (max {max})")]
    TooManyOutputs { count: usize, max: usize },

    #[error("too many commands: {count} (max {max})")]
    TooManyCommands { count: usize, max: usize },

    /// A state or command failed to encode canonically.
    #[error("encoding failed: {0}")]
    Encoding(String),

    /// The id does not match the digest of the transaction's contents.
    #[error("transaction ID mismatch: expected {expected}, got {actual}")]
    IdMismatch { expected: String, actual: String },

    #[error("transaction carries no signatures")]
    MissingSignatures,

    #[error("too many signatures: {count} (max {max})")]
    TooManySignatures { count: usize, max: usize },

    /// A signature does not verify against the key it claims.
    #[error("invalid signature by {signer}")]
    InvalidSignature { signer: String },
}

// ---------------------------------------------------------------------------
// Verification
// ---------------------------------------------------------------------------

/// Verifies every signature on a transaction and returns the signer set.
///
/// The checks, in order:
///
/// 1. **Limits** — input, output and command counts.
/// 2. **Transaction ID** — must equal the digest of the contents.
/// 3. **Signatures present** — at least one.
/// 4. **Signature count** — at most [`MAX_TX_SIGNATURES`].
/// 5. **Signatures valid** — each one against the key it names.
///
/// Whether the signer set is the *right* one is a contract question and is
/// not answered here.
///
/// # Errors
///
/// The first failing check as a [`TransactionError`].
pub fn verify_signatures<S: Serialize, C: Serialize>(
    stx: &SignedTransaction<S, C>,
) -> Result<BTreeSet<PartyKey>, TransactionError> {
    // 1. Limits.
    stx.tx.check_limits()?;

    // 2. Id integrity.
    let digest = stx.tx.digest()?;
    let expected_id = hex::encode(digest);
    if stx.tx.id != expected_id {
        return Err(TransactionError::IdMismatch {
            expected: expected_id,
            actual: stx.tx.id.clone(),
        });
    }

    // 3. At least one signature.
    if stx.signatures.is_empty() {
        return Err(TransactionError::MissingSignatures);
    }

    // 4. Bounded signature count.
    if stx.signatures.len() > MAX_TX_SIGNATURES {
        return Err(TransactionError::TooManySignatures {
            count: stx.signatures.len(),
            max: MAX_TX_SIGNATURES,
        });
    }

    // 5. Every signature must verify.
    let mut signers = BTreeSet::new();
    for sig in &stx.signatures {
        if !sig.by.verify(&digest, &sig.signature) {
            tracing::warn!(tx_id = %stx.tx.id, signer = %sig.by, "invalid transaction signature");
            return Err(TransactionError::InvalidSignature {
                signer: sig.by.to_string(),
            });
        }
        signers.insert(sig.by);
    }

    tracing::trace!(tx_id = %stx.tx.id, signers = signers.len(), "signatures verified");
    Ok(signers)
}

impl<S: Serialize, C: Serialize> SignedTransaction<S, C> {
    /// Method form of [`verify_signatures`].
    pub fn verify_signatures(&self) -> Result<BTreeSet<PartyKey>, TransactionError> {
        verify_signatures(self)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

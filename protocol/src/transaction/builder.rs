//! Transaction construction via the builder pattern.
//!
//! A [`WireTransaction`] is generic over the state type `S` and command type
//! `C` so that contract crates can plug in their own closed families of
//! states and commands. The ledger layer only needs them to be serializable.
//!
//! The builder does not sign; that happens in [`super::signing`].

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::verification::TransactionError;
use crate::config::{MAX_TX_COMMANDS, MAX_TX_INPUTS, MAX_TX_OUTPUTS, TX_DOMAIN_TAG, TX_VERSION};
use crate::crypto::hash::double_sha256;

// ---------------------------------------------------------------------------
// WireTransaction
// ---------------------------------------------------------------------------

/// An unsigned, fully resolved transaction.
///
/// Inputs are carried as the consumed states themselves rather than as
/// references into a vault; resolving references is the job of whoever
/// assembles the transaction.
///
/// The `id` is `hex(double_sha256(signable_bytes))` and does not change when
/// signatures are attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireTransaction<S, C> {
    /// Transaction id, hex encoded.
    pub id: String,
    /// Wire version the transaction was built for.
    pub version: u16,
    /// States consumed by this transaction.
    pub inputs: Vec<S>,
    /// States produced by this transaction.
    pub outputs: Vec<S>,
    /// Declared intents.
    pub commands: Vec<C>,
    /// Unix milliseconds at build time.
    pub timestamp: u64,
}

/// The fields covered by the id, in canonical order.
#[derive(Serialize)]
struct SignableBody<'a, S, C> {
    version: u16,
    inputs: &'a [S],
    outputs: &'a [S],
    commands: &'a [C],
    timestamp: u64,
}

impl<S: Serialize, C: Serialize> WireTransaction<S, C> {
    /// Canonical bytes covered by the id and, through it, every signature.
    ///
    /// Layout: the domain tag, a null byte, then the bincode encoding of
    /// version, inputs, outputs, commands and timestamp. bincode's fixed
    /// field order makes the encoding deterministic for a given value.
    pub fn signable_bytes(&self) -> Result<Vec<u8>, TransactionError> {
        let body = SignableBody {
            version: self.version,
            inputs: &self.inputs,
            outputs: &self.outputs,
            commands: &self.commands,
            timestamp: self.timestamp,
        };
        let encoded =
            bincode::serialize(&body).map_err(|e| TransactionError::Encoding(e.to_string()))?;

        let mut buf = Vec::with_capacity(TX_DOMAIN_TAG.len() + 1 + encoded.len());
        buf.extend_from_slice(TX_DOMAIN_TAG.as_bytes());
        buf.push(0x00);
        buf.extend_from_slice(&encoded);
        Ok(buf)
    }

    /// The 32-byte digest every signature is made over.
    pub fn digest(&self) -> Result<[u8; 32], TransactionError> {
        Ok(double_sha256(&self.signable_bytes()?))
    }

    /// Recomputes the id from the current field values.
    pub fn compute_id(&self) -> Result<String, TransactionError> {
        Ok(hex::encode(self.digest()?))
    }

    /// Checks the input, output and command counts against the protocol
    /// limits. Run at build time and again at verification time, since a
    /// deserialized transaction never went through the builder.
    pub fn check_limits(&self) -> Result<(), TransactionError> {
        if self.inputs.len() > MAX_TX_INPUTS {
            return Err(TransactionError::TooManyInputs {
                count: self.inputs.len(),
                max: MAX_TX_INPUTS,
            });
        }
        if self.outputs.len() > MAX_TX_OUTPUTS {
            return Err(TransactionError::TooManyOutputs {
                count: self.outputs.len(),
                max: MAX_TX_OUTPUTS,
            });
        }
        if self.commands.len() > MAX_TX_COMMANDS {
            return Err(TransactionError::TooManyCommands {
                count: self.commands.len(),
                max: MAX_TX_COMMANDS,
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// TransactionBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`WireTransaction`].
///
/// `version` defaults to [`TX_VERSION`] and `timestamp` to the current UTC
/// time at build. Both can be overridden; tests pin the timestamp so ids are
/// reproducible.
pub struct TransactionBuilder<S, C> {
    version: u16,
    inputs: Vec<S>,
    outputs: Vec<S>,
    commands: Vec<C>,
    timestamp: Option<u64>,
}

impl<S: Serialize, C: Serialize> TransactionBuilder<S, C> {
    pub fn new() -> Self {
        Self {
            version: TX_VERSION,
            inputs: Vec::new(),
            outputs: Vec::new(),
            commands: Vec::new(),
            timestamp: None,
        }
    }

    /// Only needed for testing version upgrades.
    pub fn version(mut self, version: u16) -> Self {
        self.version = version;
        self
    }

    pub fn input(mut self, state: S) -> Self {
        self.inputs.push(state);
        self
    }

    pub fn output(mut self, state: S) -> Self {
        self.outputs.push(state);
        self
    }

    pub fn command(mut self, command: C) -> Self {
        self.commands.push(command);
        self
    }

    /// Unix milliseconds. Defaults to now.
    pub fn timestamp(mut self, timestamp: u64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Produces the unsigned transaction with its id filled in.
    ///
    /// # Errors
    ///
    /// [`TransactionError::TooManyInputs`] and friends when a limit in
    /// [`crate::config`] is exceeded; [`TransactionError::Encoding`] if a
    /// state or command fails to serialize.
    pub fn build(self) -> Result<WireTransaction<S, C>, TransactionError> {
        let timestamp = self
            .timestamp
            .unwrap_or_else(|| Utc::now().timestamp_millis() as u64);

        let mut tx = WireTransaction {
            id: String::new(),
            version: self.version,
            inputs: self.inputs,
            outputs: self.outputs,
            commands: self.commands,
            timestamp,
        };
        tx.check_limits()?;
        tx.id = tx.compute_id()?;
        Ok(tx)
    }
}

impl<S: Serialize, C: Serialize> Default for TransactionBuilder<S, C> {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! # Protocol Configuration & Constants
//!
//! Every limit the ledger layer enforces lives here. Contracts read these
//! values; they never hardcode their own.
//!
//! Changing a limit after parties have started exchanging transactions is
//! a protocol change, not a tuning knob. Treat edits accordingly.

// ---------------------------------------------------------------------------
// Protocol Version
// ---------------------------------------------------------------------------

/// Wire version stamped into every transaction built by this crate.
/// Validators use it to pick the rule set a transaction was written for.
pub const TX_VERSION: u16 = 1;

/// The full crate-level protocol version string.
pub const PROTOCOL_VERSION: &str = "0.1.0";

/// Domain tag mixed into every transaction hash so that a signature over a
/// Tally transaction can never be replayed as a signature over something else.
pub const TX_DOMAIN_TAG: &str = "tally/tx/v1";

// ---------------------------------------------------------------------------
// Contract Identifiers
// ---------------------------------------------------------------------------

/// Identifier of the IOU contract. Appears in logs and rejection reports.
pub const IOU_CONTRACT_ID: &str = "tally.contracts.iou";

/// Identifier of the cash contract whose states serve as payment evidence.
pub const CASH_CONTRACT_ID: &str = "tally.contracts.cash";

// ---------------------------------------------------------------------------
// Cryptographic Parameters
// ---------------------------------------------------------------------------

/// Ed25519 public (verifying) key length in bytes.
pub const VERIFYING_KEY_LENGTH: usize = 32;

/// Ed25519 signature length in bytes. Always 64.
pub const SIGNATURE_LENGTH: usize = 64;

// ---------------------------------------------------------------------------
// Transaction Limits
// ---------------------------------------------------------------------------

/// Maximum number of input states per transaction. Keeps validation bounded.
pub const MAX_TX_INPUTS: usize = 256;

/// Maximum number of output states per transaction.
pub const MAX_TX_OUTPUTS: usize = 256;

/// Maximum number of commands per transaction. A well-formed IOU transaction
/// carries one IOU command and, for settlements, a cash command or two.
pub const MAX_TX_COMMANDS: usize = 16;

/// Maximum number of signatures attached to a transaction. The largest
/// required signer set (a transfer) has three members.
pub const MAX_TX_SIGNATURES: usize = 16;

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

/// Maximum party name length in bytes.
pub const MAX_PARTY_NAME_LEN: usize = 128;

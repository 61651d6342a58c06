//! # Tally Contracts
//!
//! Transition rules for Tally ledger states. The crate ships one contract,
//! the IOU: a bilateral debt between a lender and a borrower that can be
//! issued, settled with cash, and transferred to a new lender.
//!
//! - **iou** — The IOU state and helpers that build its next version.
//! - **states** — The closed families of states and commands in a
//!   transaction.
//! - **view** — The read-only transaction projection the validator consumes.
//! - **rules** — Named rules, rejections and verdicts.
//! - **signers** — Exact signer-set comparison.
//! - **validator** — Command dispatch and the issue, settle and transfer
//!   rule-sets.
//!
//! ## Design Principles
//!
//! 1. Validation is a pure function of a [`TransactionView`]: no clock, no
//!    storage, no global state. Any number of threads may validate at once.
//! 2. The first failing rule decides; each rejection names its rule.
//! 3. Amount arithmetic is checked. A currency mismatch is a rejection, never
//!    a panic.
//! 4. Every public data type is serializable (serde) for wire transport.

pub mod iou;
pub mod rules;
pub mod signers;
pub mod states;
pub mod validator;
pub mod view;

pub use iou::IouState;
pub use rules::{Rejection, RejectionKind, Rule, Verdict};
pub use states::{
    CashCommand, Command, IouCommand, LedgerState, LedgerTransaction, SignedLedgerTransaction,
};
pub use validator::{validate, verdict};
pub use view::TransactionView;

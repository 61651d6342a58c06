//! # Transaction Module
//!
//! Everything a contract's collaborators need to put a transaction in front
//! of it.
//!
//! ## Architecture
//!
//! ```text
//! types.rs        — Amount, Currency, LinearId
//! builder.rs      — WireTransaction and its fluent builder
//! signing.rs      — SignedTransaction and Ed25519 signing
//! verification.rs — Signature verification, yielding the signer key set
//! ```
//!
//! ## Lifecycle
//!
//! 1. **Build** — [`TransactionBuilder`] assembles inputs, outputs, commands.
//! 2. **Sign** — each required party calls [`sign_transaction`].
//! 3. **Verify** — [`verify_signatures`] checks the id and every signature
//!    and hands back the set of keys that signed.
//! 4. **Validate** — a contract judges the transition (not in this crate).

pub mod builder;
pub mod signing;
pub mod types;
pub mod verification;

pub use builder::{TransactionBuilder, WireTransaction};
pub use signing::{sign_transaction, SignedTransaction, TransactionSignature};
pub use types::{Amount, AmountError, Currency, LinearId};
pub use verification::{verify_signatures, TransactionError};

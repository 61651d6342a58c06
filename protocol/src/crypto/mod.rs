//! # Cryptographic Primitives
//!
//! Thin, type-safe wrappers around audited implementations:
//!
//! - **Ed25519** (`ed25519-dalek`) for party keys and transaction signatures.
//! - **SHA-256** (`sha2`) for transaction ids.

pub mod hash;
pub mod keys;

pub use hash::{double_sha256, sha256};
pub use keys::{KeyError, PartyKey, PartyKeypair, PartySignature};

//! # Identity Module
//!
//! A [`Party`] is a named principal bound to the Ed25519 key that signs on
//! its behalf. Two parties are the same party exactly when their names
//! match; the key is what the signer-set checks compare.

pub mod party;

pub use party::{Party, PartyError};

// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # Tally Protocol — Ledger Primitives
//!
//! The vocabulary every Tally contract speaks: who the parties are, how
//! money is counted, what a transaction looks like on the wire, and how
//! signatures over it are produced and checked.
//!
//! Contracts (see the `tally-contracts` crate) never touch the network or a
//! database. They receive an already-assembled transaction and answer one
//! question: is this a legal transition? Everything in this crate exists to
//! make that question well-typed.
//!
//! ## Architecture
//!
//! - **config** — Protocol constants and transaction limits.
//! - **crypto** — Ed25519 party keys and the hashes used for transaction ids.
//! - **identity** — Named parties bound to their verification keys.
//! - **transaction** — Amounts, linear ids, the wire transaction, builder,
//!   signing and signature verification.
//! - **vault** — Cash states, the payment evidence consumed by settlements.
//! - **logging** — `tracing` subscriber setup for binaries and tests.
//!
//! ## Design Philosophy
//!
//! 1. Integers only for money. Currency mismatches are errors, not panics.
//! 2. Every public data type is serde-serializable.
//! 3. Nothing here keeps state between calls.

pub mod config;
pub mod crypto;
pub mod identity;
pub mod logging;
pub mod transaction;
pub mod vault;

//! # Vault Module
//!
//! States that represent value held by a party. Only cash lives here; it is
//! the payment evidence IOU settlements are checked against.

pub mod cash;

pub use cash::{sum_cash, sum_cash_or_zero, CashState, Issuer};

//! # Cash States
//!
//! A [`CashState`] is an amount of money owned by a party and vouched for by
//! an issuer. In an IOU settlement the cash outputs are the payment evidence:
//! who got paid, and how much.
//!
//! Summation ignores the issuer. A dollar from one bank settles a debt as
//! well as a dollar from another; only the currency has to line up.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::identity::Party;
use crate::transaction::types::{Amount, AmountError, Currency};

/// Who stands behind a cash state, plus an issuer-side reference
/// (account number, deposit slip). Opaque to contracts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issuer {
    pub party: Party,
    pub reference: String,
}

impl Issuer {
    pub fn new(party: Party, reference: impl Into<String>) -> Self {
        Self {
            party,
            reference: reference.into(),
        }
    }
}

/// Money owned by a party.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashState {
    pub owner: Party,
    pub amount: Amount,
    pub issuer: Issuer,
}

impl CashState {
    pub fn new(amount: Amount, owner: Party, issuer: Issuer) -> Self {
        Self {
            owner,
            amount,
            issuer,
        }
    }

    /// The same money, now owned by `owner`.
    pub fn with_new_owner(&self, owner: Party) -> Self {
        Self {
            owner,
            ..self.clone()
        }
    }
}

impl fmt::Display for CashState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} owned by {} (issued by {})",
            self.amount, self.owner, self.issuer.party
        )
    }
}

/// Sums cash amounts, ignoring issuers.
///
/// Returns `Ok(None)` for an empty iterator: there is no currency to put a
/// zero in.
///
/// # Errors
///
/// [`AmountError::CurrencyMismatch`] when the states mix currencies,
/// [`AmountError::Overflow`] when the total exceeds `u64`.
pub fn sum_cash<'a, I>(states: I) -> Result<Option<Amount>, AmountError>
where
    I: IntoIterator<Item = &'a CashState>,
{
    let mut total: Option<Amount> = None;
    for state in states {
        total = Some(match total {
            None => state.amount.clone(),
            Some(acc) => acc.checked_add(&state.amount)?,
        });
    }
    Ok(total)
}

/// Like [`sum_cash`] but yields zero in `currency` for an empty iterator and
/// insists every state is in `currency`.
pub fn sum_cash_or_zero<'a, I>(states: I, currency: &Currency) -> Result<Amount, AmountError>
where
    I: IntoIterator<Item = &'a CashState>,
{
    let zero = Amount::zero(currency.clone());
    match sum_cash(states)? {
        Some(total) => zero.checked_add(&total),
        None => Ok(zero),
    }
}

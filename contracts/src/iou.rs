//! # IOU State
//!
//! A two-party debt: the borrower owes the lender `amount`, of which `paid`
//! has been settled. Every version of one obligation shares a
//! [`LinearId`].
//!
//! Lifecycle:
//!
//! 1. **Issue** — the first version appears with `paid` at zero.
//! 2. **Settle** — `paid` grows; once it reaches `amount` no further
//!    version exists and the linear id retires.
//! 3. **Transfer** — the lender changes; everything else is frozen.
//!
//! The helpers here build the *next* version of a state. They never decide
//! whether a transition is legal; that is [`crate::validator`]'s job.

use serde::{Deserialize, Serialize};
use std::fmt;

use tally_protocol::identity::Party;
use tally_protocol::transaction::{Amount, AmountError, LinearId};

/// One version of an IOU.
///
/// Two versions are equal when every field matches and both parties match
/// by name *and* owning key (see [`Party::same_identity`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IouState {
    /// Principal owed.
    pub amount: Amount,
    pub lender: Party,
    pub borrower: Party,
    /// Settled so far, in the principal's currency.
    pub paid: Amount,
    pub linear_id: LinearId,
}

impl IouState {
    /// A freshly issued IOU: nothing paid, new linear id.
    pub fn new(amount: Amount, lender: Party, borrower: Party) -> Self {
        let paid = Amount::zero(amount.currency.clone());
        Self {
            amount,
            lender,
            borrower,
            paid,
            linear_id: LinearId::new(),
        }
    }

    /// Outstanding balance, `amount - paid`.
    pub fn remaining(&self) -> Result<Amount, AmountError> {
        self.amount.checked_sub(&self.paid)
    }

    pub fn is_fully_paid(&self) -> Result<bool, AmountError> {
        Ok(self.remaining()?.is_zero())
    }

    /// The next version after a payment of `amount`.
    ///
    /// Does not check the payment against the balance; an overpaid version
    /// is representable so that the validator can reject it.
    pub fn pay(&self, amount: &Amount) -> Result<Self, AmountError> {
        Ok(Self {
            paid: self.paid.checked_add(amount)?,
            ..self.clone()
        })
    }

    /// The next version with `lender` replaced.
    pub fn with_new_lender(&self, lender: Party) -> Self {
        Self {
            lender,
            ..self.clone()
        }
    }

    /// The parties that must jointly authorize any change.
    pub fn participants(&self) -> [&Party; 2] {
        [&self.lender, &self.borrower]
    }

}

impl PartialEq for IouState {
    fn eq(&self, other: &Self) -> bool {
        self.amount == other.amount
            && self.paid == other.paid
            && self.linear_id == other.linear_id
            && self.lender.same_identity(&other.lender)
            && self.borrower.same_identity(&other.borrower)
    }
}

impl Eq for IouState {}

impl fmt::Display for IouState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "IOU {}: {} owes {} {} ({} paid)",
            self.linear_id, self.borrower, self.lender, self.amount, self.paid.quantity
        )
    }
}

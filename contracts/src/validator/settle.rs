//! Settle rule-set: an obligation is paid down with cash.
//!
//! The cash outputs of the transaction are the payment evidence. All of them
//! must go to the lender, and together they may not exceed what is still
//! owed. A payment that clears the balance retires the obligation: no IOU
//! output may remain. Anything less produces exactly one next version with
//! only `paid` moved forward.

use std::cmp::Ordering;

use tally_protocol::config::CASH_CONTRACT_ID;
use tally_protocol::transaction::Amount;
use tally_protocol::vault::{sum_cash_or_zero, CashState};

use crate::rules::{Rejection, RejectionKind, Rule};
use crate::signers::{required_keys, SignerDiff};
use crate::view::{IouGroup, TransactionView};

pub const SINGLE_OBLIGATION: Rule = Rule::new(
    RejectionKind::MultipleObligationsInOneTransaction,
    "settle.single-obligation",
    "Only one IOU may be settled per transaction",
);

pub const ONE_INPUT: Rule = Rule::new(
    RejectionKind::StructuralViolation,
    "settle.one-input",
    "There must be one input IOU",
);

pub const CASH_PRESENT: Rule = Rule::new(
    RejectionKind::StructuralViolation,
    "settle.cash-present",
    "There must be output cash",
);

pub const CASH_TO_LENDER: Rule = Rule::new(
    RejectionKind::FieldInvariantViolation,
    "settle.cash-to-lender",
    "All output cash must be paid to the lender",
);

pub const POSITIVE_PAYMENT: Rule = Rule::new(
    RejectionKind::FieldInvariantViolation,
    "settle.positive-payment",
    "The cash paid must be more than zero",
);

pub const NO_OVERPAYMENT: Rule = Rule::new(
    RejectionKind::OverpaymentViolation,
    "settle.no-overpayment",
    "The amount settled cannot be more than the amount outstanding",
);

pub const FULLY_SETTLED_NO_OUTPUT: Rule = Rule::new(
    RejectionKind::StructuralViolation,
    "settle.fully-settled-no-output",
    "There must be no output IOU as it has been fully settled",
);

pub const PARTIAL_ONE_OUTPUT: Rule = Rule::new(
    RejectionKind::StructuralViolation,
    "settle.partial-one-output",
    "There must be one output IOU",
);

pub const BORROWER_UNCHANGED: Rule = Rule::new(
    RejectionKind::FieldInvariantViolation,
    "settle.borrower-unchanged",
    "The borrower may not change when settling",
);

pub const AMOUNT_UNCHANGED: Rule = Rule::new(
    RejectionKind::FieldInvariantViolation,
    "settle.amount-unchanged",
    "The amount may not change when settling",
);

pub const LENDER_UNCHANGED: Rule = Rule::new(
    RejectionKind::FieldInvariantViolation,
    "settle.lender-unchanged",
    "The lender may not change when settling",
);

pub const PAID_ADVANCES: Rule = Rule::new(
    RejectionKind::FieldInvariantViolation,
    "settle.paid-advances",
    "The paid amount must grow by exactly the cash paid",
);

pub const SIGNERS: Rule = Rule::new(
    RejectionKind::SignerSetViolation,
    "settle.signers",
    "Both lender and borrower together only must sign IOU settle transaction",
);

pub(crate) fn verify(tx: &TransactionView) -> Result<(), Rejection> {
    let groups = tx.iou_groups();
    SINGLE_OBLIGATION.ensure_with(groups.len() <= 1, || {
        format!("found {} linear ids", groups.len())
    })?;
    let group = groups.into_values().next().unwrap_or_default();

    let input = match group.inputs.as_slice() {
        [only] => *only,
        other => return Err(ONE_INPUT.reject_with(format!("found {}", other.len()))),
    };

    let cash: Vec<&CashState> = tx.cash_outputs().collect();
    CASH_PRESENT.ensure(!cash.is_empty())?;
    let diverted = cash
        .iter()
        .filter(|c| !c.owner.same_identity(&input.lender))
        .count();
    CASH_TO_LENDER.ensure_with(diverted == 0, || {
        format!("{} cash output(s) not owned by {}", diverted, input.lender)
    })?;

    let remaining = input.remaining()?;
    let paid_now = sum_cash_or_zero(cash.iter().copied(), &input.amount.currency)?;
    tracing::trace!(
        evidence = CASH_CONTRACT_ID,
        states = cash.len(),
        %paid_now,
        %remaining,
        "settlement cash summed"
    );
    POSITIVE_PAYMENT.ensure(!paid_now.is_zero())?;
    NO_OVERPAYMENT.ensure_with(remaining.try_cmp(&paid_now)? != Ordering::Less, || {
        format!("paying {} against {} outstanding", paid_now, remaining)
    })?;

    if remaining.checked_sub(&paid_now)?.is_zero() {
        FULLY_SETTLED_NO_OUTPUT.ensure_with(group.outputs.is_empty(), || {
            format!("found {}", group.outputs.len())
        })?;
    } else {
        verify_partial(&group, &paid_now)?;
    }

    let required = required_keys(input.participants());
    let diff = SignerDiff::between(&tx.signers, &required);
    SIGNERS.ensure_with(diff.is_empty(), || &diff)?;

    Ok(())
}

fn verify_partial(group: &IouGroup<'_>, paid_now: &Amount) -> Result<(), Rejection> {
    let (input, output) = match (group.inputs.as_slice(), group.outputs.as_slice()) {
        ([input], [output]) => (*input, *output),
        (_, outputs) => {
            return Err(PARTIAL_ONE_OUTPUT.reject_with(format!("found {}", outputs.len())))
        }
    };

    BORROWER_UNCHANGED.ensure(output.borrower.same_identity(&input.borrower))?;
    AMOUNT_UNCHANGED.ensure(output.amount == input.amount)?;
    LENDER_UNCHANGED.ensure(output.lender.same_identity(&input.lender))?;

    let expected = input.paid.checked_add(paid_now)?;
    PAID_ADVANCES.ensure_with(output.paid == expected, || {
        format!("expected {}, found {}", expected, output.paid)
    })?;
    Ok(())
}

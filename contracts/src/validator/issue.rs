//! Issue rule-set: a new obligation enters the ledger.

use crate::rules::{Rejection, RejectionKind, Rule};
use crate::signers::{required_keys, SignerDiff};
use crate::view::TransactionView;

pub const NO_INPUTS: Rule = Rule::new(
    RejectionKind::StructuralViolation,
    "issue.no-inputs",
    "No inputs should be consumed when issuing an IOU",
);

pub const ONE_OUTPUT: Rule = Rule::new(
    RejectionKind::StructuralViolation,
    "issue.one-output",
    "Only one output state should be created when issuing an IOU",
);

pub const POSITIVE_AMOUNT: Rule = Rule::new(
    RejectionKind::FieldInvariantViolation,
    "issue.positive-amount",
    "A newly issued IOU must have a positive amount",
);

pub const DISTINCT_PARTIES: Rule = Rule::new(
    RejectionKind::FieldInvariantViolation,
    "issue.distinct-parties",
    "The lender and borrower cannot share a name or an owning key",
);

pub const NOTHING_PAID: Rule = Rule::new(
    RejectionKind::FieldInvariantViolation,
    "issue.nothing-paid",
    "A newly issued IOU must start with nothing paid, in the currency of its amount",
);

pub const SIGNERS: Rule = Rule::new(
    RejectionKind::SignerSetViolation,
    "issue.signers",
    "Both lender and borrower together only may sign IOU issue transaction",
);

pub(crate) fn verify(tx: &TransactionView) -> Result<(), Rejection> {
    NO_INPUTS.ensure_with(tx.inputs.is_empty(), || format!("found {}", tx.inputs.len()))?;

    let iou = match tx.outputs.as_slice() {
        [only] => only.as_iou(),
        _ => None,
    };
    let iou = iou.ok_or_else(|| {
        ONE_OUTPUT.reject_with(format!("found {} output(s)", tx.outputs.len()))
    })?;

    POSITIVE_AMOUNT.ensure(iou.amount.quantity > 0)?;
    DISTINCT_PARTIES.ensure(iou.lender.is_distinct_from(&iou.borrower))?;
    NOTHING_PAID.ensure_with(
        iou.paid.is_zero() && iou.paid.currency == iou.amount.currency,
        || format!("paid is {}", iou.paid),
    )?;

    let required = required_keys(iou.participants());
    let diff = SignerDiff::between(&tx.signers, &required);
    SIGNERS.ensure_with(diff.is_empty(), || &diff)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::iou::IouState;
    use crate::states::{Command, IouCommand, LedgerState};
    use std::collections::BTreeSet;
    use tally_protocol::crypto::PartyKeypair;
    use tally_protocol::identity::Party;
    use tally_protocol::transaction::{Amount, Currency};

    struct Fixture {
        lender: Party,
        borrower: Party,
    }

    fn fixture() -> Fixture {
        Fixture {
            lender: Party::new("Lender", PartyKeypair::generate().public_key()),
            borrower: Party::new("Borrower", PartyKeypair::generate().public_key()),
        }
    }

    fn issue_view(iou: IouState, signers: &[&Party]) -> TransactionView {
        TransactionView::new(
            vec![],
            vec![LedgerState::Iou(iou)],
            vec![Command::Iou(IouCommand::Issue)],
            signers.iter().map(|p| p.owning_key()).collect::<BTreeSet<_>>(),
        )
    }

    fn iou(f: &Fixture, quantity: u64) -> IouState {
        IouState::new(
            Amount::new(quantity, Currency::USD),
            f.lender.clone(),
            f.borrower.clone(),
        )
    }

    #[test]
    fn valid_issue_passes() {
        let f = fixture();
        assert!(verify(&issue_view(iou(&f, 100), &[&f.lender, &f.borrower])).is_ok());
    }

    #[test]
    fn consuming_an_input_fails() {
        let f = fixture();
        let mut view = issue_view(iou(&f, 100), &[&f.lender, &f.borrower]);
        view.inputs.push(LedgerState::Iou(iou(&f, 100)));
        assert_eq!(verify(&view).unwrap_err().rule, NO_INPUTS.name);
    }

    #[test]
    fn two_outputs_fail() {
        let f = fixture();
        let mut view = issue_view(iou(&f, 100), &[&f.lender, &f.borrower]);
        view.outputs.push(LedgerState::Iou(iou(&f, 5)));
        let r = verify(&view).unwrap_err();
        assert_eq!(r.rule, ONE_OUTPUT.name);
        assert_eq!(r.kind, RejectionKind::StructuralViolation);
    }

    #[test]
    fn zero_amount_fails() {
        let f = fixture();
        let r = verify(&issue_view(iou(&f, 0), &[&f.lender, &f.borrower])).unwrap_err();
        assert_eq!(r.rule, POSITIVE_AMOUNT.name);
        assert_eq!(r.kind, RejectionKind::FieldInvariantViolation);
    }

    #[test]
    fn self_lending_fails() {
        let f = fixture();
        let state = IouState::new(
            Amount::new(10, Currency::USD),
            f.lender.clone(),
            f.lender.clone(),
        );
        let r = verify(&issue_view(state, &[&f.lender])).unwrap_err();
        assert_eq!(r.rule, DISTINCT_PARTIES.name);
    }

    #[test]
    fn one_key_behind_both_parties_fails() {
        let f = fixture();
        let alias = Party::new("Borrower", f.lender.owning_key());
        let state = IouState::new(
            Amount::new(10, Currency::USD),
            f.lender.clone(),
            alias,
        );
        let r = verify(&issue_view(state, &[&f.lender])).unwrap_err();
        assert_eq!(r.rule, DISTINCT_PARTIES.name);
        assert_eq!(r.kind, RejectionKind::FieldInvariantViolation);
    }

    #[test]
    fn prepaid_issue_fails() {
        let f = fixture();
        let mut state = iou(&f, 100);
        state.paid = Amount::new(10, Currency::USD);
        let r = verify(&issue_view(state, &[&f.lender, &f.borrower])).unwrap_err();
        assert_eq!(r.rule, NOTHING_PAID.name);
    }

    #[test]
    fn paid_in_other_currency_fails() {
        let f = fixture();
        let mut state = iou(&f, 100);
        state.paid = Amount::zero(Currency::EUR);
        let r = verify(&issue_view(state, &[&f.lender, &f.borrower])).unwrap_err();
        assert_eq!(r.rule, NOTHING_PAID.name);
    }

    #[test]
    fn missing_or_extra_signer_fails() {
        let f = fixture();
        let r = verify(&issue_view(iou(&f, 100), &[&f.lender])).unwrap_err();
        assert_eq!(r.rule, SIGNERS.name);
        assert_eq!(r.kind, RejectionKind::SignerSetViolation);

        let stranger = Party::new("Stranger", PartyKeypair::generate().public_key());
        let r = verify(&issue_view(iou(&f, 100), &[&f.lender, &f.borrower, &stranger]))
            .unwrap_err();
        assert_eq!(r.rule, SIGNERS.name);
    }

    #[test]
    fn first_failing_rule_wins() {
        // Zero amount and missing signatures: the amount rule comes first.
        let f = fixture();
        let r = verify(&issue_view(iou(&f, 0), &[])).unwrap_err();
        assert_eq!(r.rule, POSITIVE_AMOUNT.name);
    }
}

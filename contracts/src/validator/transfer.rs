//! Transfer rule-set: an obligation moves to a new lender.

use crate::rules::{Rejection, RejectionKind, Rule};
use crate::signers::{required_keys, SignerDiff};
use crate::view::TransactionView;

pub const ONE_IN_ONE_OUT: Rule = Rule::new(
    RejectionKind::StructuralViolation,
    "transfer.one-in-one-out",
    "An IOU transfer transaction should only consume one input state and create one output state",
);

pub const ONLY_LENDER_CHANGES: Rule = Rule::new(
    RejectionKind::FieldInvariantViolation,
    "transfer.only-lender-changes",
    "Only the lender property may change",
);

pub const LENDER_CHANGES: Rule = Rule::new(
    RejectionKind::FieldInvariantViolation,
    "transfer.lender-changes",
    "The lender must change to a party with a different name and owning key",
);

pub const NEW_LENDER_NOT_BORROWER: Rule = Rule::new(
    RejectionKind::FieldInvariantViolation,
    "transfer.new-lender-not-borrower",
    "The new lender cannot share a name or an owning key with the borrower",
);

pub const SIGNERS: Rule = Rule::new(
    RejectionKind::SignerSetViolation,
    "transfer.signers",
    "The borrower, old lender and new lender only must sign an IOU transfer transaction",
);

pub(crate) fn verify(tx: &TransactionView) -> Result<(), Rejection> {
    let inputs: Vec<_> = tx.iou_inputs().collect();
    let outputs: Vec<_> = tx.iou_outputs().collect();
    let (input, output) = match (inputs.as_slice(), outputs.as_slice()) {
        ([input], [output]) => (*input, *output),
        (i, o) => {
            return Err(ONE_IN_ONE_OUT.reject_with(format!(
                "found {} input(s), {} output(s)",
                i.len(),
                o.len()
            )))
        }
    };

    ONLY_LENDER_CHANGES.ensure(output.with_new_lender(input.lender.clone()) == *input)?;
    LENDER_CHANGES.ensure(output.lender.is_distinct_from(&input.lender))?;
    NEW_LENDER_NOT_BORROWER.ensure(output.lender.is_distinct_from(&output.borrower))?;

    let required = required_keys([&input.borrower, &input.lender, &output.lender]);
    let diff = SignerDiff::between(&tx.signers, &required);
    SIGNERS.ensure_with(diff.is_empty(), || &diff)?;

    Ok(())
}

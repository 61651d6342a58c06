//! # Transition Validator
//!
//! Entry point of the IOU contract. [`validate`] finds the single IOU command
//! in a [`TransactionView`] and hands the view to the rule-set for that
//! command:
//!
//! - [`issue`] — a new obligation appears.
//! - [`settle`] — an obligation is paid down, partially or in full.
//! - [`transfer`] — an obligation moves to a new lender.
//!
//! Validation is a pure function of the view. The first rule that fails
//! decides the verdict; the rule order inside each rule-set is part of the
//! contract and is asserted by the tests.

pub mod issue;
pub mod settle;
pub mod transfer;

use tally_protocol::config::IOU_CONTRACT_ID;

use crate::rules::{Rejection, RejectionKind, Rule, Verdict};
use crate::states::IouCommand;
use crate::view::TransactionView;

/// Exactly one IOU command per transaction.
pub const SINGLE_COMMAND: Rule = Rule::new(
    RejectionKind::MalformedCommand,
    "command.single",
    "A transaction must carry exactly one IOU command",
);

/// Validates a proposed IOU transition.
///
/// # Errors
///
/// The [`Rejection`] of the first rule that does not hold.
pub fn validate(tx: &TransactionView) -> Result<(), Rejection> {
    let result = dispatch(tx);
    match &result {
        Ok(()) => tracing::trace!(contract = IOU_CONTRACT_ID, "transaction accepted"),
        Err(rejection) => tracing::debug!(
            contract = IOU_CONTRACT_ID,
            rule = rejection.rule,
            kind = %rejection.kind,
            reason = %rejection.reason,
            "transaction rejected"
        ),
    }
    result
}

/// [`validate`] as a value.
pub fn verdict(tx: &TransactionView) -> Verdict {
    validate(tx).into()
}

fn dispatch(tx: &TransactionView) -> Result<(), Rejection> {
    let commands = tx.iou_commands();
    let command = match commands.as_slice() {
        [single] => *single,
        other => return Err(SINGLE_COMMAND.reject_with(format!("found {}", other.len()))),
    };

    match command {
        IouCommand::Issue => issue::verify(tx),
        IouCommand::Settle => settle::verify(tx),
        IouCommand::Transfer => transfer::verify(tx),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::states::{CashCommand, Command};
    use std::collections::BTreeSet;

    fn view_with(commands: Vec<Command>) -> TransactionView {
        TransactionView::new(vec![], vec![], commands, BTreeSet::new())
    }

    #[test]
    fn no_command_is_malformed() {
        let r = validate(&view_with(vec![])).unwrap_err();
        assert_eq!(r.kind, RejectionKind::MalformedCommand);
        assert_eq!(r.rule, SINGLE_COMMAND.name);
    }

    #[test]
    fn only_foreign_commands_is_malformed() {
        let r = validate(&view_with(vec![Command::Cash(CashCommand::Move)])).unwrap_err();
        assert_eq!(r.kind, RejectionKind::MalformedCommand);
    }

    #[test]
    fn two_iou_commands_is_malformed() {
        let r = validate(&view_with(vec![
            Command::Iou(IouCommand::Issue),
            Command::Iou(IouCommand::Issue),
        ]))
        .unwrap_err();
        assert_eq!(r.kind, RejectionKind::MalformedCommand);
        assert!(r.reason.ends_with("found 2"));
    }

    #[test]
    fn single_command_reaches_its_rule_set() {
        // An empty issuance passes the command check and fails inside the
        // issue rule-set instead.
        let r = validate(&view_with(vec![Command::Iou(IouCommand::Issue)])).unwrap_err();
        assert_eq!(r.rule, issue::ONE_OUTPUT.name);
    }

    #[test]
    fn verdict_wraps_validate() {
        let v = verdict(&view_with(vec![]));
        assert!(!v.is_accepted());
        assert_eq!(v.rejection().map(|r| r.kind), Some(RejectionKind::MalformedCommand));
    }
}

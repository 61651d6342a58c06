//! # Transaction View
//!
//! The read-only projection the validator works on: inputs, outputs,
//! commands, and the set of keys that actually signed. A view is built per
//! validation call and nothing in this crate holds on to it afterwards.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tally_protocol::crypto::PartyKey;
use tally_protocol::transaction::TransactionError;
use tally_protocol::vault::CashState;

use crate::iou::IouState;
use crate::states::{Command, IouCommand, LedgerState, SignedLedgerTransaction};

/// A proposed transaction as the validator sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionView {
    pub inputs: Vec<LedgerState>,
    pub outputs: Vec<LedgerState>,
    pub commands: Vec<Command>,
    /// Keys whose signatures are present and valid.
    pub signers: BTreeSet<PartyKey>,
}

/// IOU states of one linear id, split by side.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct IouGroup<'a> {
    pub inputs: Vec<&'a IouState>,
    pub outputs: Vec<&'a IouState>,
}

impl TransactionView {
    pub fn new(
        inputs: Vec<LedgerState>,
        outputs: Vec<LedgerState>,
        commands: Vec<Command>,
        signers: BTreeSet<PartyKey>,
    ) -> Self {
        Self {
            inputs,
            outputs,
            commands,
            signers,
        }
    }

    /// Builds a view from a signed transaction, taking the signer set from
    /// its verified signatures.
    ///
    /// # Errors
    ///
    /// Any [`TransactionError`] from signature verification. A transaction
    /// whose signatures do not check out never becomes a view.
    pub fn from_signed(stx: &SignedLedgerTransaction) -> Result<Self, TransactionError> {
        let signers = stx.verify_signatures()?;
        Ok(Self {
            inputs: stx.tx.inputs.clone(),
            outputs: stx.tx.outputs.clone(),
            commands: stx.tx.commands.clone(),
            signers,
        })
    }

    pub fn iou_inputs(&self) -> impl Iterator<Item = &IouState> {
        self.inputs.iter().filter_map(LedgerState::as_iou)
    }

    pub fn iou_outputs(&self) -> impl Iterator<Item = &IouState> {
        self.outputs.iter().filter_map(LedgerState::as_iou)
    }

    pub fn cash_outputs(&self) -> impl Iterator<Item = &CashState> {
        self.outputs.iter().filter_map(LedgerState::as_cash)
    }

    /// Commands of the IOU family, in declaration order.
    pub fn iou_commands(&self) -> Vec<IouCommand> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                Command::Iou(cmd) => Some(*cmd),
                Command::Cash(_) => None,
            })
            .collect()
    }

    /// Partitions IOU inputs and outputs by linear id. Ordered by id so the
    /// partition is the same on every call.
    pub fn iou_groups(&self) -> BTreeMap<Uuid, IouGroup<'_>> {
        let mut groups: BTreeMap<Uuid, IouGroup<'_>> = BTreeMap::new();
        for iou in self.iou_inputs() {
            groups.entry(iou.linear_id.id).or_default().inputs.push(iou);
        }
        for iou in self.iou_outputs() {
            groups.entry(iou.linear_id.id).or_default().outputs.push(iou);
        }
        groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::states::CashCommand;
    use tally_protocol::crypto::PartyKeypair;
    use tally_protocol::identity::Party;
    use tally_protocol::transaction::{sign_transaction, Amount, Currency, TransactionBuilder};
    use tally_protocol::vault::Issuer;

    fn party(kp: &PartyKeypair, name: &str) -> Party {
        Party::new(name, kp.public_key())
    }

    #[test]
    fn iou_commands_skip_other_families() {
        let view = TransactionView::new(
            vec![],
            vec![],
            vec![
                Command::Cash(CashCommand::Move),
                Command::Iou(IouCommand::Settle),
            ],
            BTreeSet::new(),
        );
        assert_eq!(view.iou_commands(), vec![IouCommand::Settle]);
    }

    #[test]
    fn groups_by_linear_id() {
        let (lk, bk) = (PartyKeypair::generate(), PartyKeypair::generate());
        let a = IouState::new(Amount::new(10, Currency::USD), party(&lk, "L"), party(&bk, "B"));
        let a_next = a.pay(&Amount::new(5, Currency::USD)).unwrap();
        let other = IouState::new(Amount::new(7, Currency::USD), party(&lk, "L"), party(&bk, "B"));

        let view = TransactionView::new(
            vec![a.clone().into(), other.clone().into()],
            vec![a_next.into()],
            vec![Command::Iou(IouCommand::Settle)],
            BTreeSet::new(),
        );
        let groups = view.iou_groups();
        assert_eq!(groups.len(), 2);
        let group_a = &groups[&a.linear_id.id];
        assert_eq!((group_a.inputs.len(), group_a.outputs.len()), (1, 1));
        let group_other = &groups[&other.linear_id.id];
        assert_eq!((group_other.inputs.len(), group_other.outputs.len()), (1, 0));
    }

    #[test]
    fn cash_outputs_filter() {
        let lk = PartyKeypair::generate();
        let cash = CashState::new(
            Amount::new(3, Currency::USD),
            party(&lk, "L"),
            Issuer::new(party(&lk, "Bank"), "r"),
        );
        let view = TransactionView::new(
            vec![],
            vec![cash.clone().into()],
            vec![],
            BTreeSet::new(),
        );
        assert_eq!(view.cash_outputs().collect::<Vec<_>>(), vec![&cash]);
        assert_eq!(view.iou_outputs().count(), 0);
    }

    #[test]
    fn from_signed_collects_verified_signers() {
        let (lk, bk) = (PartyKeypair::generate(), PartyKeypair::generate());
        let iou = IouState::new(Amount::new(10, Currency::USD), party(&lk, "L"), party(&bk, "B"));
        let tx = TransactionBuilder::new()
            .output(LedgerState::Iou(iou))
            .command(Command::Iou(IouCommand::Issue))
            .build()
            .unwrap();
        let mut stx = SignedLedgerTransaction::new(tx);
        sign_transaction(&mut stx, &lk).unwrap();
        sign_transaction(&mut stx, &bk).unwrap();

        let view = TransactionView::from_signed(&stx).unwrap();
        assert_eq!(view.signers.len(), 2);
        assert!(view.signers.contains(&lk.public_key()));
        assert_eq!(view.iou_commands(), vec![IouCommand::Issue]);
    }

    #[test]
    fn from_signed_refuses_unsigned() {
        let tx = TransactionBuilder::new()
            .command(Command::Iou(IouCommand::Issue))
            .build()
            .unwrap();
        let stx = SignedLedgerTransaction::new(tx);
        assert_eq!(
            TransactionView::from_signed(&stx),
            Err(TransactionError::MissingSignatures)
        );
    }
}

//! The closed families of states and commands a Tally transaction carries.
//!
//! Both are plain enums. Adding a variant forces every `match` over them to
//! be revisited, which is exactly the point: there is no catch-all arm in
//! the validator for a new command to slip through.

use serde::{Deserialize, Serialize};
use std::fmt;

use tally_protocol::transaction::{SignedTransaction, WireTransaction};
use tally_protocol::vault::CashState;

use crate::iou::IouState;

/// A state as it appears among a transaction's inputs or outputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerState {
    Iou(IouState),
    Cash(CashState),
}

impl LedgerState {
    pub fn as_iou(&self) -> Option<&IouState> {
        match self {
            Self::Iou(iou) => Some(iou),
            Self::Cash(_) => None,
        }
    }

    pub fn as_cash(&self) -> Option<&CashState> {
        match self {
            Self::Cash(cash) => Some(cash),
            Self::Iou(_) => None,
        }
    }
}

impl From<IouState> for LedgerState {
    fn from(iou: IouState) -> Self {
        Self::Iou(iou)
    }
}

impl From<CashState> for LedgerState {
    fn from(cash: CashState) -> Self {
        Self::Cash(cash)
    }
}

/// Intents understood by the IOU contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IouCommand {
    /// Create a new obligation.
    Issue,
    /// Pay down an obligation, partially or in full.
    Settle,
    /// Hand the obligation to a new lender.
    Transfer,
}

impl fmt::Display for IouCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Issue => write!(f, "Issue"),
            Self::Settle => write!(f, "Settle"),
            Self::Transfer => write!(f, "Transfer"),
        }
    }
}

/// Intents of the cash contract. They ride along in settlements; the IOU
/// contract ignores them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CashCommand {
    Issue,
    Move,
}

/// Any command a transaction may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    Iou(IouCommand),
    Cash(CashCommand),
}

impl From<IouCommand> for Command {
    fn from(cmd: IouCommand) -> Self {
        Self::Iou(cmd)
    }
}

impl From<CashCommand> for Command {
    fn from(cmd: CashCommand) -> Self {
        Self::Cash(cmd)
    }
}

/// Unsigned transaction over the ledger's state and command families.
pub type LedgerTransaction = WireTransaction<LedgerState, Command>;

/// Signed transaction over the ledger's state and command families.
pub type SignedLedgerTransaction = SignedTransaction<LedgerState, Command>;

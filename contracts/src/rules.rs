//! # Rules, Rejections and Verdicts
//!
//! Each rule-set is an ordered list of named [`Rule`]s. A rule pairs a stable
//! dotted name (`settle.no-overpayment`) with a [`RejectionKind`] and a
//! human-readable reason. Evaluation stops at the first rule that does not
//! hold, and that rule alone becomes the [`Rejection`]; there is no
//! accumulation of reasons.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

use tally_protocol::transaction::AmountError;

/// Category of a rejected transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RejectionKind {
    /// Zero or several IOU commands.
    MalformedCommand,
    /// A settlement touching more than one linear id.
    MultipleObligationsInOneTransaction,
    /// Wrong number of inputs or outputs for the command.
    StructuralViolation,
    /// A frozen field changed or a field relationship broke.
    FieldInvariantViolation,
    /// A settlement paying more than is outstanding.
    OverpaymentViolation,
    /// Signers differ from the required set.
    SignerSetViolation,
    /// Amount arithmetic failed: mixed currencies or overflow. Points at a
    /// broken transaction builder upstream rather than a user mistake.
    MalformedAmount,
}

impl fmt::Display for RejectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::MalformedCommand => "MalformedCommand",
            Self::MultipleObligationsInOneTransaction => "MultipleObligationsInOneTransaction",
            Self::StructuralViolation => "StructuralViolation",
            Self::FieldInvariantViolation => "FieldInvariantViolation",
            Self::OverpaymentViolation => "OverpaymentViolation",
            Self::SignerSetViolation => "SignerSetViolation",
            Self::MalformedAmount => "MalformedAmount",
        };
        write!(f, "{}", s)
    }
}

/// A named requirement of a rule-set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub kind: RejectionKind,
    /// Stable identifier, safe to match on in tests and dashboards.
    pub name: &'static str,
    pub reason: &'static str,
}

impl Rule {
    pub const fn new(kind: RejectionKind, name: &'static str, reason: &'static str) -> Self {
        Self { kind, name, reason }
    }

    /// `Ok` if the requirement holds, this rule's rejection otherwise.
    pub fn ensure(&self, holds: bool) -> Result<(), Rejection> {
        if holds {
            Ok(())
        } else {
            Err(self.reject())
        }
    }

    /// Like [`ensure`](Self::ensure), appending detail to the reason. The
    /// detail closure only runs on failure.
    pub fn ensure_with<D, F>(&self, holds: bool, detail: F) -> Result<(), Rejection>
    where
        D: fmt::Display,
        F: FnOnce() -> D,
    {
        if holds {
            Ok(())
        } else {
            Err(self.reject_with(detail()))
        }
    }

    pub fn reject(&self) -> Rejection {
        Rejection {
            kind: self.kind,
            rule: self.name,
            reason: self.reason.to_string(),
        }
    }

    pub fn reject_with(&self, detail: impl fmt::Display) -> Rejection {
        Rejection {
            kind: self.kind,
            rule: self.name,
            reason: format!("{}: {}", self.reason, detail),
        }
    }
}

/// Catch-all rule for amount arithmetic that cannot be evaluated.
pub const MALFORMED_AMOUNT: Rule = Rule::new(
    RejectionKind::MalformedAmount,
    "amount.well-formed",
    "Amounts compared or combined must share a currency and stay in range",
);

/// Why a transaction was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{kind} ({rule}): {reason}")]
pub struct Rejection {
    pub kind: RejectionKind,
    /// Name of the first rule that failed.
    pub rule: &'static str,
    pub reason: String,
}

impl From<AmountError> for Rejection {
    fn from(err: AmountError) -> Self {
        MALFORMED_AMOUNT.reject_with(err)
    }
}

/// Outcome of validating one transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Verdict {
    Accepted,
    Rejected(Rejection),
}

impl Verdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }

    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            Self::Accepted => None,
            Self::Rejected(r) => Some(r),
        }
    }
}

impl From<Result<(), Rejection>> for Verdict {
    fn from(result: Result<(), Rejection>) -> Self {
        match result {
            Ok(()) => Self::Accepted,
            Err(r) => Self::Rejected(r),
        }
    }
}

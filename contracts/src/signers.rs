//! Signer-set checking.
//!
//! Both sides of the comparison are `BTreeSet<PartyKey>`, ordered by raw key
//! bytes, so equality is a straight walk over two sorted sequences and never
//! depends on insertion order or hashing.

use std::collections::BTreeSet;
use std::fmt;

use tally_protocol::crypto::PartyKey;
use tally_protocol::identity::Party;

/// The exact key set that must sign for `parties`.
pub fn required_keys<'a, I>(parties: I) -> BTreeSet<PartyKey>
where
    I: IntoIterator<Item = &'a Party>,
{
    parties.into_iter().map(Party::owning_key).collect()
}

/// `true` when `signers` is exactly the key set of `parties`: nobody missing,
/// nobody extra.
pub fn signers_match<'a, I>(signers: &BTreeSet<PartyKey>, parties: I) -> bool
where
    I: IntoIterator<Item = &'a Party>,
{
    *signers == required_keys(parties)
}

/// Difference between the signers present and the signers required.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SignerDiff {
    pub missing: BTreeSet<PartyKey>,
    pub unexpected: BTreeSet<PartyKey>,
}

impl SignerDiff {
    pub fn between(signers: &BTreeSet<PartyKey>, required: &BTreeSet<PartyKey>) -> Self {
        Self {
            missing: required.difference(signers).copied().collect(),
            unexpected: signers.difference(required).copied().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.missing.is_empty() && self.unexpected.is_empty()
    }
}

impl fmt::Display for SignerDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let join = |keys: &BTreeSet<PartyKey>| {
            keys.iter()
                .map(PartyKey::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        };
        write!(
            f,
            "missing [{}], unexpected [{}]",
            join(&self.missing),
            join(&self.unexpected)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tally_protocol::crypto::PartyKeypair;

    fn party(name: &str) -> Party {
        Party::new(name, PartyKeypair::generate().public_key())
    }

    #[test]
    fn exact_match_passes() {
        let (l, b) = (party("L"), party("B"));
        let signers: BTreeSet<_> = [b.owning_key(), l.owning_key()].into_iter().collect();
        assert!(signers_match(&signers, [&l, &b]));
    }

    #[test]
    fn missing_or_extra_fails() {
        let (l, b, x) = (party("L"), party("B"), party("X"));

        let only_lender: BTreeSet<_> = [l.owning_key()].into_iter().collect();
        assert!(!signers_match(&only_lender, [&l, &b]));

        let with_extra: BTreeSet<_> = [l.owning_key(), b.owning_key(), x.owning_key()]
            .into_iter()
            .collect();
        assert!(!signers_match(&with_extra, [&l, &b]));
    }

    #[test]
    fn duplicate_parties_collapse() {
        let l = party("L");
        let signers: BTreeSet<_> = [l.owning_key()].into_iter().collect();
        assert!(signers_match(&signers, [&l, &l]));
    }

    #[test]
    fn diff_reports_both_sides() {
        let (l, b, x) = (party("L"), party("B"), party("X"));
        let signers: BTreeSet<_> = [l.owning_key(), x.owning_key()].into_iter().collect();
        let diff = SignerDiff::between(&signers, &required_keys([&l, &b]));

        assert!(!diff.is_empty());
        assert_eq!(diff.missing, [b.owning_key()].into_iter().collect());
        assert_eq!(diff.unexpected, [x.owning_key()].into_iter().collect());
        assert!(diff.to_string().contains(&b.owning_key().to_string()));
    }
}

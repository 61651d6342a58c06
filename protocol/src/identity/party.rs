//! Named ledger parties.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use thiserror::Error;

use crate::config::MAX_PARTY_NAME_LEN;
use crate::crypto::keys::PartyKey;

/// Errors constructing a [`Party`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PartyError {
    #[error("party name must not be empty")]
    EmptyName,

    #[error("party name is {len} bytes, maximum is {max}")]
    NameTooLong { len: usize, max: usize },
}

/// A principal on the ledger: an identifier plus its verification key.
///
/// Equality, ordering and hashing use the name only. Code that must pin a
/// party to the key it signs with (frozen fields, payees) compares with
/// [`same_identity`](Self::same_identity) instead of `==`.
#[derive(Clone, Serialize, Deserialize)]
pub struct Party {
    name: String,
    owning_key: PartyKey,
}

impl Party {
    /// Creates a party without validating the name. Prefer
    /// [`try_new`](Self::try_new) for names from outside the process.
    pub fn new(name: impl Into<String>, owning_key: PartyKey) -> Self {
        Self {
            name: name.into(),
            owning_key,
        }
    }

    /// Creates a party, rejecting empty or oversized names.
    pub fn try_new(name: impl Into<String>, owning_key: PartyKey) -> Result<Self, PartyError> {
        let name = name.into();
        if name.is_empty() {
            return Err(PartyError::EmptyName);
        }
        if name.len() > MAX_PARTY_NAME_LEN {
            return Err(PartyError::NameTooLong {
                len: name.len(),
                max: MAX_PARTY_NAME_LEN,
            });
        }
        Ok(Self { name, owning_key })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The key that must sign on this party's behalf.
    pub fn owning_key(&self) -> PartyKey {
        self.owning_key
    }

    /// Same name and same owning key.
    pub fn same_identity(&self, other: &Party) -> bool {
        self.name == other.name && self.owning_key == other.owning_key
    }

    /// Neither the name nor the owning key is shared. Two parties behind one
    /// key are one signer, whatever they are called.
    pub fn is_distinct_from(&self, other: &Party) -> bool {
        self.name != other.name && self.owning_key != other.owning_key
    }
}

impl PartialEq for Party {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Party {}

impl PartialOrd for Party {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Party {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }
}

impl Hash for Party {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Display for Party {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl fmt::Debug for Party {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Party({}, {:?})", self.name, self.owning_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::keys::PartyKeypair;
    use std::collections::HashSet;

    #[test]
    fn equality_is_by_name_only() {
        let a = Party::new("Alice", PartyKeypair::generate().public_key());
        let a_rotated = Party::new("Alice", PartyKeypair::generate().public_key());
        let b = Party::new("Bob", a.owning_key());

        assert_eq!(a, a_rotated);
        assert_ne!(a, b);

        let set: HashSet<_> = [a.clone(), a_rotated].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn same_identity_needs_name_and_key() {
        let a = Party::new("Alice", PartyKeypair::generate().public_key());
        let a_rotated = Party::new("Alice", PartyKeypair::generate().public_key());

        assert!(a.same_identity(&a.clone()));
        assert!(!a.same_identity(&a_rotated));
        assert!(!a.same_identity(&Party::new("Alicia", a.owning_key())));
    }

    #[test]
    fn distinct_parties_share_neither_name_nor_key() {
        let a = Party::new("Alice", PartyKeypair::generate().public_key());
        let b = Party::new("Bob", PartyKeypair::generate().public_key());

        assert!(a.is_distinct_from(&b));
        assert!(!a.is_distinct_from(&Party::new("Bob", a.owning_key())));
        assert!(!a.is_distinct_from(&Party::new("Alice", b.owning_key())));
    }

    #[test]
    fn try_new_validates_name() {
        let key = PartyKeypair::generate().public_key();
        assert_eq!(Party::try_new("", key), Err(PartyError::EmptyName));

        let long = "x".repeat(MAX_PARTY_NAME_LEN + 1);
        assert!(matches!(
            Party::try_new(long, key),
            Err(PartyError::NameTooLong { .. })
        ));

        assert!(Party::try_new("Lender Bank", key).is_ok());
    }

    #[test]
    fn serde_preserves_key() {
        let party = Party::new("Carol", PartyKeypair::generate().public_key());
        let json = serde_json::to_string(&party).unwrap();
        let back: Party = serde_json::from_str(&json).unwrap();
        assert_eq!(back.name(), "Carol");
        assert_eq!(back.owning_key(), party.owning_key());
    }
}

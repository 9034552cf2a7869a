//! Traits which, typically, may be imported without concern: `use hcitool_builder::prelude::*`.
use std::collections::{BTreeSet, HashSet};
use std::hash::Hash;

use crate::constant::LIST_DELIMITER;

/// Behaviour for multiple (0 to many) items T to be collected together.
// Needs to be imported in order to implement a custom `Collectable`.
pub trait Collectable<T> {
    /// Add a value to this `Collectable`.
    fn add(&mut self, item: T);
}

impl<T> Collectable<T> for Vec<T> {
    fn add(&mut self, item: T) {
        self.push(item);
    }
}

impl<T: Ord> Collectable<T> for BTreeSet<T> {
    fn add(&mut self, item: T) {
        self.insert(item);
    }
}

impl<T: Eq + Hash> Collectable<T> for HashSet<T> {
    fn add(&mut self, item: T) {
        self.insert(item);
    }
}

/// A value identified on the command line by one of a fixed set of (case-insensitive) names.
pub trait Keyword: Sized + Copy + PartialEq + 'static {
    /// The recognized names, each paired with its value.
    const KEYWORDS: &'static [(&'static str, Self)];

    /// Look up `token` amongst the keywords, ignoring case.
    fn from_keyword(token: &str) -> Option<Self> {
        Self::KEYWORDS
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(token))
            .map(|(_, value)| *value)
    }

    /// The canonical keyword for this value.
    fn keyword(&self) -> Option<&'static str> {
        Self::KEYWORDS
            .iter()
            .find(|(_, value)| value == self)
            .map(|(name, _)| *name)
    }
}

/// A keyword that contributes bits to a mask.
pub trait Flag: Keyword {
    /// The bits of this flag.
    fn bits(&self) -> u64;
}

/// Parse a comma separated list of flag keywords, combining them into a single mask.
///
/// Every entry must be a known keyword; a single unknown entry rejects the whole list.
pub fn parse_flag_list<F: Flag>(token: &str) -> Option<u64> {
    let mut mask = 0;

    for part in token.split(LIST_DELIMITER) {
        let flag = F::from_keyword(part.trim())?;
        mask |= flag.bits();
    }

    Some(mask)
}

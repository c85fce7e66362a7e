//! Entry module consists of the unit of evidence passed between stages.

use std::fmt::{self, Display};

/// A `(key, value)` contribution emitted by the mapper.
///
/// The key borrows from the source token set, so mapping never copies words.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Pair<'a> {
    pub key: &'a str,
    pub value: u64,
}

impl<'a> Pair<'a> {
    /// A single occurrence of `key`.
    pub fn new(key: &'a str) -> Pair<'a> {
        Pair { key, value: 1 }
    }

    pub fn with_value(key: &'a str, value: u64) -> Pair<'a> {
        Pair { key, value }
    }
}

impl<'a> Display for Pair<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "({}, {})", self.key, self.value)
    }
}

//! Mapper

use crate::entry::Pair;

/// Tag every token of one group as a single occurrence, keeping group order.
pub fn map<S: AsRef<str>>(group: &[S]) -> Vec<Pair<'_>> {
    group.iter().map(|token| Pair::new(token.as_ref())).collect()
}

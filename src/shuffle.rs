//! Shuffle stage.
//!
//! Mapper outputs from every group are merged under their key, so a word seen
//! in several groups ends up with all its contributions in one list. The
//! merge can run in a single batch over all pairs, or incrementally through
//! a [`Shuffler`] fed once per group.

use std::collections::HashMap;

use crate::entry::Pair;

mod shuffler;

pub use self::shuffler::Shuffler;

/// Distinct key to the contributions observed for it, in arrival order.
pub type FrequencyTable<'a> = HashMap<&'a str, Vec<u64>>;

/// Merge a whole pair sequence in one pass.
pub fn shuffle<'a, I>(pairs: I) -> FrequencyTable<'a>
where
    I: IntoIterator<Item = Pair<'a>>,
{
    let mut shuffler = Shuffler::new();
    shuffler.feed(pairs);
    shuffler.into_table()
}

//! Internal implementation of shuffler.

use log;

use crate::entry::Pair;
use crate::shuffle::FrequencyTable;

/// Accumulates mapper output into one frequency table.
///
/// Feeding is a read-modify-write per key, so a shuffler has a single writer;
/// concurrent mappers hand their pairs over before it is fed.
#[derive(Debug, Default)]
pub struct Shuffler<'a> {
    table: FrequencyTable<'a>,
    pairs: usize,
}

impl<'a> Shuffler<'a> {
    /// Create a new shuffler.
    pub fn new() -> Shuffler<'a> {
        Shuffler::default()
    }

    /// Merge one batch of pairs, typically the output of a single group.
    pub fn feed<I>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = Pair<'a>>,
    {
        let before = self.pairs;

        for pair in pairs {
            log::trace!("Shuffle pair {}.", pair);
            self.table.entry(pair.key).or_insert_with(Vec::new).push(pair.value);
            self.pairs += 1;
        }

        log::trace!(
            "Shuffled {} pairs, {} distinct keys so far.",
            self.pairs - before,
            self.table.len()
        );
    }

    /// Number of pairs merged so far.
    #[inline]
    pub fn pairs(&self) -> usize {
        self.pairs
    }

    /// Number of distinct keys merged so far.
    #[inline]
    pub fn keys(&self) -> usize {
        self.table.len()
    }

    pub fn into_table(self) -> FrequencyTable<'a> {
        self.table
    }
}

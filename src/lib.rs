//! Count word frequency with a map, shuffle and reduce pipeline.
//!
//! Words are split into groups, one per node. Each group is mapped into
//! `(word, 1)` pairs, the pairs of every group are shuffled together by word,
//! and each word's contributions are reduced into its total.

use std::collections::HashMap;

use log;

mod entry;
mod error;
mod map;
mod map_reduce;
mod partition;
mod reduce;
mod shuffle;
mod tokenizer;

pub use crate::entry::Pair;
pub use crate::error::Error;
pub use crate::map::map;
pub use crate::map_reduce::{Execution, MapReduce, DEFAULT_NODES};
pub use crate::partition::partition;
pub use crate::reduce::reduce;
pub use crate::shuffle::{shuffle, FrequencyTable, Shuffler};
pub use crate::tokenizer::{tokenize, DELIMITERS};

/// Main entry function: tokenize `text` and count its words on `nodes` nodes.
pub fn count_words(text: &str, nodes: i64) -> Result<HashMap<String, u64>, Error> {
    let words = tokenize(text);

    log::debug!("Tokenized {} words from {} bytes.", words.len(), text.len());

    MapReduce::new(words, nodes).map(|model| model.process())
}

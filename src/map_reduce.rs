//! MapReduce based implementation.
//!
//! The workflow is illustrated as following:
//!
//! The coordinator splits the token set into `nodes` contiguous groups, maps
//! every group into `(word, 1)` pairs, shuffles all pairs into one table keyed
//! by word and finally reduces every key into its total count.
//!
//! Nodes are logical partitions inside the process. With
//! [`Execution::Threaded`] the groups are spread over a bounded set of worker
//! threads, and every worker is joined before the shuffle starts.

use std::cmp::Reverse;
use std::collections::HashMap;
use std::convert::TryFrom;
use std::num::NonZeroUsize;
use std::panic;
use std::thread;

use log;

use crate::entry::Pair;
use crate::error::Error;
use crate::map::map;
use crate::partition::partition;
use crate::reduce::reduce;
use crate::shuffle::{FrequencyTable, Shuffler};

/// Node count used by the binary when none is requested.
pub const DEFAULT_NODES: usize = 8;

/// How the map stage runs over the groups.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Execution {
    /// Map every group in turn on the calling thread.
    Sequential,
    /// Spread the groups over at most `available_parallelism` threads.
    Threaded,
}

impl Default for Execution {
    fn default() -> Execution {
        Execution::Sequential
    }
}

/// Word frequency over a fixed token set, split across a number of nodes.
#[derive(Debug, Clone)]
pub struct MapReduce {
    tokens: Vec<String>,
    nodes: usize,
    execution: Execution,
}

impl MapReduce {
    /// Create a model over `tokens` processed by `nodes` nodes.
    ///
    /// Fails with [`Error::InvalidArgument`] if `tokens` is empty and with
    /// [`Error::OutOfRange`] unless `1 <= nodes <= tokens.len()`.
    pub fn new<I, S>(tokens: I, nodes: i64) -> Result<MapReduce, Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tokens = tokens.into_iter().map(Into::into).collect();
        MapReduce::from_source(Some(tokens), nodes)
    }

    /// Same as [`MapReduce::new`] for a token set that may be absent, which
    /// is rejected with [`Error::NullArgument`].
    pub fn from_source(tokens: Option<Vec<String>>, nodes: i64) -> Result<MapReduce, Error> {
        let tokens = validate_tokens(tokens)?;
        let nodes = validate_nodes(nodes, tokens.len())?;

        log::debug!(
            "Create map reduce model over {} words with {} nodes.",
            tokens.len(),
            nodes
        );

        Ok(MapReduce {
            tokens,
            nodes,
            execution: Execution::default(),
        })
    }

    pub fn with_execution(mut self, execution: Execution) -> MapReduce {
        self.execution = execution;
        self
    }

    #[inline]
    pub fn execution(&self) -> Execution {
        self.execution
    }

    pub fn set_execution(&mut self, execution: Execution) {
        self.execution = execution;
    }

    #[inline]
    pub fn nodes(&self) -> usize {
        self.nodes
    }

    /// Change the node count, validated against the current token set.
    ///
    /// On failure the previous node count is kept.
    pub fn set_nodes(&mut self, nodes: i64) -> Result<(), Error> {
        self.nodes = validate_nodes(nodes, self.tokens.len())?;
        Ok(())
    }

    #[inline]
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Calculate the frequency of every distinct word.
    ///
    /// The result is the same for every valid node count.
    pub fn process(&self) -> HashMap<String, u64> {
        log::info!(
            "Start processing {} words on {} nodes ({:?}).",
            self.tokens.len(),
            self.nodes,
            self.execution
        );

        let groups = partition(&self.tokens, self.nodes);

        log::debug!(
            "Partitioned words into groups of sizes {:?}.",
            groups.iter().map(|group| group.len()).collect::<Vec<_>>()
        );

        let mapped = match self.execution {
            Execution::Sequential => map_sequential(&groups),
            Execution::Threaded => map_threaded(&groups),
        };

        let mut shuffler = Shuffler::new();
        for pairs in mapped {
            shuffler.feed(pairs);
        }

        log::debug!(
            "Shuffled {} pairs into {} distinct words.",
            shuffler.pairs(),
            shuffler.keys()
        );

        let result = reduce_table(shuffler.into_table());

        log::info!("Found {} distinct words.", result.len());

        result
    }

    /// Same as [`MapReduce::process`], ordered by descending count and then
    /// by word.
    pub fn process_sorted(&self) -> Vec<(String, u64)> {
        let mut entries: Vec<(String, u64)> = self.process().into_iter().collect();
        entries.sort_by(|(left_key, left), (right_key, right)| {
            (Reverse(left), left_key).cmp(&(Reverse(right), right_key))
        });
        entries
    }
}

fn validate_tokens(tokens: Option<Vec<String>>) -> Result<Vec<String>, Error> {
    match tokens {
        None => {
            log::warn!("Reject missing array of words.");
            Err(Error::NullArgument)
        }
        Some(ref tokens) if tokens.is_empty() => {
            log::warn!("Reject empty array of words.");
            Err(Error::InvalidArgument)
        }
        Some(tokens) => Ok(tokens),
    }
}

fn validate_nodes(nodes: i64, tokens: usize) -> Result<usize, Error> {
    let out_of_range = Error::OutOfRange { nodes, tokens };

    if nodes < 1 {
        log::warn!("Reject {} nodes for {} words.", nodes, tokens);
        return Err(out_of_range);
    }

    match usize::try_from(nodes) {
        Ok(count) if count <= tokens => Ok(count),
        _ => {
            log::warn!("Reject {} nodes for {} words.", nodes, tokens);
            Err(out_of_range)
        }
    }
}

fn map_sequential<'a>(groups: &[&'a [String]]) -> Vec<Vec<Pair<'a>>> {
    groups
        .iter()
        .enumerate()
        .map(|(index, &group)| {
            log::trace!("Map {} words on node {}.", group.len(), index);
            map(group)
        })
        .collect()
}

fn map_threaded<'a>(groups: &[&'a [String]]) -> Vec<Vec<Pair<'a>>> {
    let workers = worker_count(groups.len());

    log::debug!("Map {} groups on {} worker threads.", groups.len(), workers);

    thread::scope(|scope| {
        let handles: Vec<_> = partition(groups, workers)
            .into_iter()
            .enumerate()
            .map(|(worker, batch)| {
                scope.spawn(move || {
                    log::trace!("Map {} groups on worker thread {}.", batch.len(), worker);
                    map_sequential(batch)
                })
            })
            .collect();

        // Batches are contiguous, so joining in spawn order keeps partition order.
        handles
            .into_iter()
            .flat_map(|handle| handle.join().unwrap_or_else(|cause| panic::resume_unwind(cause)))
            .collect()
    })
}

/// Worker threads for `groups` groups: never more than the machine offers.
fn worker_count(groups: usize) -> usize {
    let parallelism = thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1);

    parallelism.min(groups).max(1)
}

fn reduce_table(table: FrequencyTable<'_>) -> HashMap<String, u64> {
    table
        .into_iter()
        .map(|(key, values)| (key.to_string(), reduce(&values)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(source: &[&str]) -> Vec<String> {
        source.iter().map(|word| word.to_string()).collect()
    }

    #[test]
    fn test_process_single_word() {
        for &nodes in &[1, 3] {
            let model = MapReduce::new(vec!["a", "a", "a"], nodes).unwrap();

            let result = model.process();

            assert_eq!(result.len(), 1);
            assert_eq!(result["a"], 3);
        }
    }

    #[test]
    fn test_new_rejects_missing_words() {
        assert_eq!(
            MapReduce::from_source(None, 4).unwrap_err(),
            Error::NullArgument
        );
    }

    #[test]
    fn test_new_rejects_empty_words() {
        assert_eq!(
            MapReduce::new(Vec::<String>::new(), 4).unwrap_err(),
            Error::InvalidArgument
        );
    }

    #[test]
    fn test_new_rejects_out_of_range_nodes() {
        for &nodes in &[0, -1, 3] {
            assert_eq!(
                MapReduce::new(vec!["x", "y"], nodes).unwrap_err(),
                Error::OutOfRange { nodes, tokens: 2 }
            );
        }
    }

    #[test]
    fn test_new_accepts_one_word_per_node() {
        let model = MapReduce::new(vec!["x", "y"], 2).unwrap();

        let result = model.process();

        assert_eq!(result.len(), 2);
        assert_eq!(result["x"], 1);
        assert_eq!(result["y"], 1);
    }

    #[test]
    fn test_set_nodes_validates_against_current_words() {
        let mut model = MapReduce::new(vec!["x", "y", "z"], 1).unwrap();

        assert_eq!(model.set_nodes(3), Ok(()));
        assert_eq!(model.nodes(), 3);

        assert_eq!(
            model.set_nodes(4),
            Err(Error::OutOfRange {
                nodes: 4,
                tokens: 3
            })
        );
        assert_eq!(
            model.set_nodes(0),
            Err(Error::OutOfRange {
                nodes: 0,
                tokens: 3
            })
        );
        assert_eq!(model.nodes(), 3);
    }

    #[test]
    fn test_process_is_repeatable() {
        let model = MapReduce::new(vec!["b", "a", "b", "c", "b"], 2).unwrap();

        let first = model.process();
        let second = model.process();

        assert_eq!(first, second);
        assert_eq!(model.tokens(), &words(&["b", "a", "b", "c", "b"])[..]);
    }

    #[test]
    fn test_threaded_matches_sequential() {
        let source = words(&["b", "a", "b", "c", "b", "a", "d"]);

        for nodes in 1..=source.len() as i64 {
            let sequential = MapReduce::new(source.clone(), nodes).unwrap();
            let threaded = sequential.clone().with_execution(Execution::Threaded);

            assert_eq!(threaded.execution(), Execution::Threaded);
            assert_eq!(sequential.process(), threaded.process());
        }
    }

    #[test]
    fn test_set_execution_switches_strategy() {
        let mut model = MapReduce::new(vec!["b", "a", "b"], 3).unwrap();
        assert_eq!(model.execution(), Execution::Sequential);

        let sequential = model.process();
        model.set_execution(Execution::Threaded);

        assert_eq!(model.execution(), Execution::Threaded);
        assert_eq!(model.process(), sequential);
    }

    #[test]
    fn test_worker_count_is_bounded() {
        let parallelism = thread::available_parallelism()
            .map(NonZeroUsize::get)
            .unwrap_or(1);

        assert_eq!(worker_count(1), 1);
        assert_eq!(worker_count(0), 1);
        assert_eq!(worker_count(200_000), parallelism.min(200_000));
    }

    #[test]
    fn test_map_threaded_keeps_partition_order() {
        let source = words(&["a", "b", "c", "d", "e", "f", "g"]);
        let groups = partition(&source, source.len());

        assert_eq!(map_threaded(&groups), map_sequential(&groups));
    }

    #[test]
    fn test_process_sorted_orders_by_count_then_word() {
        let model = MapReduce::new(vec!["b", "a", "b", "c", "a", "b"], 3).unwrap();

        assert_eq!(
            model.process_sorted(),
            vec![
                ("b".to_string(), 3),
                ("a".to_string(), 2),
                ("c".to_string(), 1),
            ]
        );
    }
}

//! Errors raised while configuring a map reduce run.

use failure::Fail;

/// Caller contract violations detected at construction or reconfiguration time.
#[derive(Debug, Clone, Eq, PartialEq, Fail)]
pub enum Error {
    #[fail(display = "Array of the words cannot be null.")]
    NullArgument,

    #[fail(display = "Array of the words cannot be empty.")]
    InvalidArgument,

    #[fail(
        display = "Count of nodes ({}) must be in range 1..={} (count of the words).",
        nodes, tokens
    )]
    OutOfRange { nodes: i64, tokens: usize },
}

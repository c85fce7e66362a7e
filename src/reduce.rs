//! Reducer

use std::iter::Sum;

/// Collapse the contributions of one key into its total.
///
/// This is a plain sum; an empty list reduces to zero.
pub fn reduce<'a, T>(values: &'a [T]) -> T
where
    T: Sum<&'a T>,
{
    values.iter().sum()
}

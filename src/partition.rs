//! Split the token sequence into contiguous groups, one per node.

/// Split `items` into `nodes` contiguous, order-preserving groups.
///
/// Group sizes differ by at most one: the first `len % nodes` groups hold one
/// extra item. Concatenating the groups in order reproduces `items` exactly.
/// When `nodes > len` the trailing groups are empty, and `nodes == 0` yields
/// no groups at all.
pub fn partition<T>(items: &[T], nodes: usize) -> Vec<&[T]> {
    if nodes == 0 {
        return Vec::new();
    }

    let base = items.len() / nodes;
    let remainder = items.len() % nodes;

    let mut groups = Vec::with_capacity(nodes);
    let mut rest = items;

    for index in 0..nodes {
        let size = if index < remainder { base + 1 } else { base };
        let (group, tail) = rest.split_at(size);
        groups.push(group);
        rest = tail;
    }

    debug_assert!(rest.is_empty());

    groups
}

//! Merging operation streams into one chronological sequence.

use crate::op::Operation;

/// Concatenates any number of operation collections and sorts the union
/// ascending by `op_time`.
///
/// No deduplication: if upstream stages emit overlapping events they all
/// persist. The sort is stable, but relative order among equal timestamps
/// carries no meaning and must not be relied upon.
pub fn merge_ops<I>(collections: I) -> Vec<Operation>
where
    I: IntoIterator<Item = Vec<Operation>>,
{
    let mut merged: Vec<Operation> = collections.into_iter().flatten().collect();
    merged.sort_by_key(|op| op.op_time);
    merged
}

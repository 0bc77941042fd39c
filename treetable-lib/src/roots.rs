//! Root resolution.

use std::collections::HashSet;

use crate::model::{TreeEntry, TreeId};

/// Determines the root ids the indexer starts from.
///
/// An explicit list is returned verbatim: order and duplicates are kept and
/// ids without an entry are left for the indexer to reject. Without one,
/// every entry never listed as anyone's child is a root, in source order.
///
/// # Example
///
/// ```
/// use treetable_lib::model::{TreeEntry, TreeId};
/// use treetable_lib::roots::resolve_roots;
///
/// let data = vec![
///     TreeEntry::new(0).child(1),
///     TreeEntry::new(1),
///     TreeEntry::new(2),
/// ];
/// assert_eq!(resolve_roots(&data, None), vec![TreeId::Int(0), TreeId::Int(2)]);
///
/// let explicit = [TreeId::Int(1)];
/// assert_eq!(resolve_roots(&data, Some(&explicit)), vec![TreeId::Int(1)]);
/// ```
pub fn resolve_roots(entries: &[TreeEntry], explicit_roots: Option<&[TreeId]>) -> Vec<TreeId> {
    if let Some(roots) = explicit_roots {
        return roots.to_vec();
    }

    let listed_as_child: HashSet<&TreeId> = entries
        .iter()
        .flat_map(|entry| entry.children.iter())
        .collect();

    entries
        .iter()
        .filter(|entry| !listed_as_child.contains(&entry.id))
        .map(|entry| entry.id.clone())
        .collect()
}

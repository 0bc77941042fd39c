//! Conversion between node indices and id paths.

use crate::model::TreeId;
use crate::source::TreeSource;

use super::node::NodeIndex;

/// Ids from the root down to `index`, inclusive.
///
/// This is the identity to hand out to selection callbacks and to persist:
/// unlike a [`NodeIndex`] it still means something after the tree is
/// rebuilt. Returns an empty path for an unknown index.
pub fn id_path<S: TreeSource + ?Sized>(tree: &S, index: NodeIndex) -> Vec<TreeId> {
    let mut path = Vec::new();
    let mut current = Some(index);
    while let Some(node) = current {
        let Some(entry) = tree.tree_entry(node) else {
            break;
        };
        path.push(entry.id.clone());
        current = tree.parent(node);
    }
    path.reverse();
    path
}

/// Finds the node an id path leads to, following roots then children.
///
/// Materializes the children along the path. Returns `None` if the path is
/// empty or any step has no matching node.
pub fn resolve_id_path<S: TreeSource + ?Sized>(tree: &S, path: &[TreeId]) -> Option<NodeIndex> {
    let (first, rest) = path.split_first()?;
    let mut current = find_by_id(tree, tree.roots(), first)?;
    for id in rest {
        current = find_by_id(tree, tree.children(current), id)?;
    }
    Some(current)
}

fn find_by_id<S: TreeSource + ?Sized>(
    tree: &S,
    candidates: Vec<NodeIndex>,
    id: &TreeId,
) -> Option<NodeIndex> {
    candidates
        .into_iter()
        .find(|&candidate| tree.tree_entry(candidate).is_some_and(|entry| &entry.id == id))
}

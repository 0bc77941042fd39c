//! Read-only capability handed to tree renderers.

use std::collections::BTreeSet;

use crate::error::TreeError;
use crate::index::{DisplayData, IndexedTree, NodeIndex};
use crate::model::TreeEntry;

/// What a renderer needs from a tree: navigation by [`NodeIndex`] and the
/// data to paint.
///
/// Renderers own their UI state (expanded nodes, selection) and only call
/// into this interface; a source never calls back.
pub trait TreeSource {
    /// Root nodes, in display order.
    fn roots(&self) -> Vec<NodeIndex>;

    /// Children of a node, in display order.
    fn children(&self, index: NodeIndex) -> Vec<NodeIndex>;

    /// Whether a node can be expanded.
    fn has_children(&self, index: NodeIndex) -> bool;

    /// Parent of a node; `None` for roots.
    fn parent(&self, index: NodeIndex) -> Option<NodeIndex>;

    /// Depth of a node (roots are 0).
    fn depth(&self, index: NodeIndex) -> Option<usize>;

    /// Row to display for a node.
    fn display_data(&self, index: NodeIndex) -> Option<DisplayData<'_>>;

    /// The entry a node was created from.
    fn tree_entry(&self, index: NodeIndex) -> Option<&TreeEntry>;

    /// Every node below `index`.
    ///
    /// Sources that cannot enumerate descendants keep this default, which
    /// fails with [`TreeError::UnsupportedOperation`].
    fn all_descendants(&self, _index: NodeIndex) -> Result<BTreeSet<NodeIndex>, TreeError> {
        Err(TreeError::unsupported("all_descendants"))
    }
}

impl TreeSource for IndexedTree {
    fn roots(&self) -> Vec<NodeIndex> {
        self.get_roots().to_vec()
    }

    fn children(&self, index: NodeIndex) -> Vec<NodeIndex> {
        self.get_children(index)
    }

    fn has_children(&self, index: NodeIndex) -> bool {
        IndexedTree::has_children(self, index)
    }

    fn parent(&self, index: NodeIndex) -> Option<NodeIndex> {
        self.get_parent(index)
    }

    fn depth(&self, index: NodeIndex) -> Option<usize> {
        self.get_depth(index)
    }

    fn display_data(&self, index: NodeIndex) -> Option<DisplayData<'_>> {
        self.get_display_data(index)
    }

    fn tree_entry(&self, index: NodeIndex) -> Option<&TreeEntry> {
        self.get_tree_entry(index)
    }

    fn all_descendants(&self, index: NodeIndex) -> Result<BTreeSet<NodeIndex>, TreeError> {
        Ok(self.get_all_descendants(index))
    }
}

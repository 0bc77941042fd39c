//! Node storage for an indexed tree.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::model::{Row, TreeId};

use super::node::NodeIndex;

/// Ids on the path from a root down to (and including) a node, restricted to
/// ids that lie on a cycle of the data.
///
/// Shared between a node and every child created from it; extended by
/// copying only when a cyclic id is added, never mutated in place, so
/// sibling branches stay independent.
pub(super) type SeenIds = Arc<HashSet<TreeId>>;

/// One occurrence of an entry.
#[derive(Debug)]
pub(super) struct NodeRecord {
    /// Position of the originating entry in the source data.
    pub entry: usize,
    /// Mapped row, if a mapper is configured.
    pub mapped: Option<Arc<Row>>,
    /// Depth in tree (0 = root).
    pub depth: usize,
    pub parent: Option<NodeIndex>,
    /// This id already appeared on the path above; never expanded.
    pub was_seen: bool,
    /// Ids handed down to children for cycle detection.
    pub seen: SeenIds,
    /// Resolved on first access.
    pub children: Option<Vec<NodeIndex>>,
}

/// Dense node table plus the memoization cache.
///
/// The cache is keyed by entry position rather than id; positions come from
/// the id lookup, where the first entry with an id wins, so the two are
/// interchangeable.
#[derive(Debug, Default)]
pub(super) struct Arena {
    nodes: Vec<NodeRecord>,
    cache: HashMap<(usize, Option<NodeIndex>), NodeIndex>,
}

impl Arena {
    pub fn get(&self, index: NodeIndex) -> Option<&NodeRecord> {
        self.nodes.get(index.get())
    }

    pub fn get_mut(&mut self, index: NodeIndex) -> Option<&mut NodeRecord> {
        self.nodes.get_mut(index.get())
    }

    pub fn lookup(&self, entry: usize, parent: Option<NodeIndex>) -> Option<NodeIndex> {
        self.cache.get(&(entry, parent)).copied()
    }

    /// Stores a new node and memoizes it under `(entry, parent)`.
    pub fn insert(&mut self, record: NodeRecord) -> NodeIndex {
        let index = NodeIndex::new(self.nodes.len());
        self.cache.insert((record.entry, record.parent), index);
        self.nodes.push(record);
        index
    }

    /// Entry positions from the root down to `index`, inclusive.
    pub fn entry_path(&self, index: NodeIndex) -> Vec<usize> {
        let mut path = Vec::new();
        let mut current = self.get(index);
        while let Some(node) = current {
            path.push(node.entry);
            current = node.parent.and_then(|parent| self.get(parent));
        }
        path.reverse();
        path
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }
}

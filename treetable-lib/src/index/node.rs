//! NodeIndex type

use serde::Deserialize;
use serde::Serialize;

/// Identifier of one occurrence of an entry within an [`IndexedTree`].
///
/// Indices are handed out in creation order and never reused within one
/// tree. They mean nothing to a different tree instance; use
/// [`id_path`](super::id_path) for an identity that survives rebuilds.
///
/// [`IndexedTree`]: super::IndexedTree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeIndex(usize);

impl NodeIndex {
    /// Wraps a raw index.
    pub const fn new(raw: usize) -> Self {
        Self(raw)
    }

    /// Returns the raw index.
    pub const fn get(self) -> usize {
        self.0
    }
}

impl From<usize> for NodeIndex {
    fn from(raw: usize) -> Self {
        Self(raw)
    }
}

impl std::fmt::Display for NodeIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

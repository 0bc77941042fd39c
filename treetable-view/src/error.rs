//! View error types

use thiserror::Error;
use treetable_lib::{NodeIndex, TreeError};

/// Errors returned by [`SimpleTreeView`](crate::SimpleTreeView).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ViewError {
    /// Building the tree failed; the previous state is kept.
    #[error(transparent)]
    Tree(#[from] TreeError),

    /// The index does not belong to the current tree.
    #[error("Node {0} is not part of the current tree")]
    UnknownNode(NodeIndex),

    /// A thread panicked while holding the view state.
    #[error("View state lock poisoned")]
    Poisoned,
}

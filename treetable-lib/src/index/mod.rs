//! The tree indexer.
//!
//! [`IndexedTree`] assigns a [`NodeIndex`] to every occurrence of an entry
//! under a given parent. Children are materialized lazily on first access
//! and cached, so large trees only pay for the parts a consumer looks at.
//!
//! Occurrences are memoized by `(id, parent)`: an entry reachable through
//! two parents gets two indices, while asking twice for the same child of
//! the same parent yields the same index. An occurrence whose id already
//! appears on its own root path is a cycle repetition; it is materialized
//! but never has children.

mod arena;
mod cycles;
mod display;
mod node;
mod path;
mod tree;

pub use display::DisplayData;
pub use node::NodeIndex;
pub use path::{id_path, resolve_id_path};
pub use tree::IndexedTree;

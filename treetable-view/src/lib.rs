//! Headless tree-table view state.
//!
//! [`SimpleTreeView`] wraps a [`TransformedTree`](treetable_lib::TransformedTree)
//! with the state a renderer owns: which nodes are expanded and which one is
//! selected. It flattens the expanded part of the tree into rows, rebuilds
//! the index when its inputs change, and reports selections as id paths so
//! callbacks stay meaningful across rebuilds.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use treetable_lib::TreeConfig;
//! use treetable_lib::model::TreeEntry;
//! use treetable_view::SimpleTreeView;
//!
//! let data = vec![
//!     TreeEntry::new(0).set("main", "Root").set("size", 3).with_children([1, 2]),
//!     TreeEntry::new(1).set("main", "C1").set("size", 1),
//!     TreeEntry::new(2).set("main", "C2").set("size", 2),
//! ];
//! let view = SimpleTreeView::new(Arc::new(data), TreeConfig::default()).unwrap();
//! assert_eq!(view.visible_rows().len(), 1);
//!
//! let root = view.visible_rows()[0].index;
//! view.expand(root).unwrap();
//! let rows = view.visible_rows();
//! assert_eq!(rows.len(), 3);
//! assert_eq!(rows[1].main.to_string(), "C1");
//! assert_eq!(rows[1].depth, 1);
//! ```

mod error;
mod row;
mod state;

pub use error::ViewError;
pub use row::VisibleRow;
pub use state::{ExpandedCallback, SelectionCallback, SimpleTreeView};

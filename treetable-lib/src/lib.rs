//! Tree indexing and transformation engine for hierarchical tables.
//!
//! Takes a flat adjacency list of [`TreeEntry`](model::TreeEntry) values
//! (ids, optional children, column data) and produces an [`IndexedTree`]:
//! a lazily expanded, cycle-safe view where every occurrence of an entry
//! under a given parent gets a stable [`NodeIndex`].
//!
//! # Example
//!
//! ```
//! use treetable_lib::model::TreeEntry;
//! use treetable_lib::{TreeConfig, transform_tree};
//!
//! let data = vec![
//!     TreeEntry::new(0).set("main", "Root").set("size", 1000).with_children([1, 2]),
//!     TreeEntry::new(1).set("main", "C1").set("size", 400),
//!     TreeEntry::new(2).set("main", "C2").set("size", 600),
//! ];
//!
//! let transformed = transform_tree(data, &TreeConfig::default()).unwrap();
//! let tree = &transformed.tree;
//!
//! let root = tree.get_roots()[0];
//! let children = tree.get_children(root);
//! assert_eq!(children.len(), 2);
//! assert_eq!(tree.get_display_data(children[0]).unwrap()["main"], "C1".into());
//! assert_eq!(transformed.fixed_columns[0].name, "size");
//! ```

pub mod columns;
pub mod config;
pub mod error;
pub mod index;
pub mod mapper;
pub mod model;
pub mod roots;
pub mod sorter;
pub mod source;

mod transform;

pub use config::TreeConfig;
pub use error::TreeError;
pub use index::{DisplayData, IndexedTree, NodeIndex, id_path, resolve_id_path};
pub use source::TreeSource;
pub use transform::{TransformedTree, transform_tree};

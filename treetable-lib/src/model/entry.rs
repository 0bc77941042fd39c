//! Tree entries as they arrive from the data source

use indexmap::IndexMap;
use serde::Deserialize;
use serde::Serialize;

use super::DisplayValue;
use super::TreeId;

/// Column name to value mapping for one entry, in source key order.
pub type Row = IndexMap<String, DisplayValue>;

/// The source collection: an ordered list of entries.
pub type TreeData = Vec<TreeEntry>;

/// One entry of the adjacency list describing a tree.
///
/// Entries reference their children by id. Nothing prevents the data from
/// being cyclic or from listing the same child twice; the indexer deals
/// with both.
///
/// # Example
///
/// ```
/// use treetable_lib::model::{TreeData, TreeEntry, TreeId};
///
/// let data: TreeData = serde_json::from_str(r#"[
///     { "id": 0, "data": { "main": "Root", "size": 1000 }, "children": [1] },
///     { "id": 1, "data": { "main": "C1", "size": 1000 } }
/// ]"#).unwrap();
///
/// assert_eq!(data[0].children, vec![TreeId::Int(1)]);
/// assert!(data[1].children.is_empty());
/// assert_eq!(data[1], TreeEntry::new(1).set("main", "C1").set("size", 1000));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeEntry {
    /// Identifier of this entry.
    pub id: TreeId,
    /// Ids of the child entries, in display order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeId>,
    /// Column values.
    pub data: Row,
}

impl TreeEntry {
    /// Creates an entry with no children and no data.
    pub fn new(id: impl Into<TreeId>) -> Self {
        Self {
            id: id.into(),
            children: Vec::new(),
            data: Row::new(),
        }
    }

    /// Appends a child id.
    pub fn child(mut self, id: impl Into<TreeId>) -> Self {
        self.children.push(id.into());
        self
    }

    /// Appends several child ids.
    pub fn with_children<I>(mut self, ids: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<TreeId>,
    {
        self.children.extend(ids.into_iter().map(Into::into));
        self
    }

    /// Sets a column value.
    pub fn set(mut self, column: impl Into<String>, value: impl Into<DisplayValue>) -> Self {
        self.data.insert(column.into(), value.into());
        self
    }

    /// Returns the value of a column, if present.
    pub fn get(&self, column: &str) -> Option<&DisplayValue> {
        self.data.get(column)
    }

    /// Returns `true` if the entry declares any children.
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

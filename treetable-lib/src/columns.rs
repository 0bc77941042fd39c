//! Fixed column descriptors and inference.

use indexmap::IndexSet;
use serde::Deserialize;
use serde::Serialize;

use crate::model::TreeEntry;

/// A non-tree column of the table: the data key it reads and its header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedColumn {
    /// Data key read from each row.
    pub name: String,
    /// Header text.
    pub title: String,
}

impl FixedColumn {
    /// Creates a column whose title is its name.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            title: name.clone(),
            name,
        }
    }

    /// Sets the header text.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
}

/// Collects every data key used by any entry, except the main column.
///
/// Keys are returned in first-seen order, so a table can be rendered
/// without declaring its columns up front.
///
/// # Example
///
/// ```
/// use treetable_lib::columns::{FixedColumn, infer_fixed_columns};
/// use treetable_lib::model::TreeEntry;
///
/// let data = vec![
///     TreeEntry::new(0).set("main", "Root").set("size", 10),
///     TreeEntry::new(1).set("main", "Leaf").set("owner", "root").set("size", 3),
/// ];
/// assert_eq!(
///     infer_fixed_columns(&data, "main"),
///     vec![FixedColumn::new("size"), FixedColumn::new("owner")],
/// );
/// ```
pub fn infer_fixed_columns(entries: &[TreeEntry], main_column: &str) -> Vec<FixedColumn> {
    let found: IndexSet<&str> = entries
        .iter()
        .flat_map(|entry| entry.data.keys())
        .map(String::as_str)
        .filter(|key| *key != main_column)
        .collect();

    found.into_iter().map(FixedColumn::new).collect()
}

/// Builds descriptors for an explicit list of column names.
pub fn columns_from_names<I>(names: I) -> Vec<FixedColumn>
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    names.into_iter().map(FixedColumn::new).collect()
}

//! Per-column data mapping.

use std::sync::Arc;

use indexmap::IndexMap;

use crate::model::{DisplayValue, Row, TreeEntry};

/// Transform applied to one column.
///
/// Receives the raw value (or [`DisplayValue::Null`] if the entry has no
/// such column), the row as mapped so far and the root-to-node entry path
/// ending with the entry itself.
pub type ColumnMapFn = dyn Fn(&DisplayValue, &Row, &[&TreeEntry]) -> DisplayValue + Send + Sync;

/// Column name to transform mapping, applied in insertion order.
///
/// # Example
///
/// ```
/// use treetable_lib::mapper::DataMapper;
/// use treetable_lib::model::{DisplayValue, TreeEntry};
///
/// let mapper = DataMapper::new()
///     .column("size", |value, _, _| match value.as_i64() {
///         Some(bytes) => format!("{} KiB", bytes / 1024).into(),
///         None => DisplayValue::Null,
///     })
///     .column("label", |_, row, path| {
///         format!("{} ({})", row["main"], path.len()).into()
///     });
///
/// let entry = TreeEntry::new(0).set("main", "src").set("size", 4096);
/// let row = mapper.apply(&entry.data, &[&entry]);
/// assert_eq!(row["size"], "4 KiB".into());
/// assert_eq!(row["label"], "src (1)".into());
/// ```
#[derive(Clone, Default)]
pub struct DataMapper {
    columns: IndexMap<String, Arc<ColumnMapFn>>,
}

impl DataMapper {
    /// Creates an empty mapper.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) the transform for a column.
    pub fn column<F>(mut self, name: impl Into<String>, transform: F) -> Self
    where
        F: Fn(&DisplayValue, &Row, &[&TreeEntry]) -> DisplayValue + Send + Sync + 'static,
    {
        self.columns.insert(name.into(), Arc::new(transform));
        self
    }

    /// Names of the mapped columns, in application order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    /// Returns `true` if no column has a transform.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Produces the display row for an entry.
    ///
    /// Starts from a copy of `raw`; each transform sees the values written by
    /// the transforms before it. Columns without a transform pass through.
    pub fn apply(&self, raw: &Row, path: &[&TreeEntry]) -> Row {
        let mut mapped = raw.clone();
        for (column, transform) in &self.columns {
            let value = raw.get(column).unwrap_or(&DisplayValue::Null);
            let next = transform(value, &mapped, path);
            mapped.insert(column.clone(), next);
        }
        mapped
    }
}

impl std::fmt::Debug for DataMapper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataMapper")
            .field("columns", &self.columns.keys().collect::<Vec<_>>())
            .finish()
    }
}

//! Sibling ordering.

use std::cmp::Ordering;
use std::sync::Arc;

use crate::model::{DisplayValue, Row};

/// Comparator over display rows, applied to the children of each node.
///
/// Sorting is stable, so siblings that compare equal keep their source
/// order. Rows are the mapped display data, not the raw entries.
///
/// # Example
///
/// ```
/// use treetable_lib::model::Row;
/// use treetable_lib::sorter::Sorter;
///
/// let by_size = Sorter::by_column("size").reversed();
///
/// let mut small = Row::new();
/// small.insert("size".into(), 1.into());
/// let mut large = Row::new();
/// large.insert("size".into(), 9.into());
///
/// assert!(by_size.compare(&large, &small).is_lt());
/// ```
#[derive(Clone)]
pub struct Sorter(Arc<dyn Fn(&Row, &Row) -> Ordering + Send + Sync>);

impl Sorter {
    /// Wraps a comparator.
    pub fn new<F>(compare: F) -> Self
    where
        F: Fn(&Row, &Row) -> Ordering + Send + Sync + 'static,
    {
        Self(Arc::new(compare))
    }

    /// Ascending order of one column, using [`DisplayValue::compare`].
    ///
    /// Rows missing the column sort as null.
    pub fn by_column(column: impl Into<String>) -> Self {
        let column = column.into();
        Self::new(move |a, b| {
            let a = a.get(&column).unwrap_or(&DisplayValue::Null);
            let b = b.get(&column).unwrap_or(&DisplayValue::Null);
            a.compare(b)
        })
    }

    /// The same comparator with its result flipped.
    pub fn reversed(self) -> Self {
        let inner = self.0;
        Self::new(move |a, b| inner(a, b).reverse())
    }

    /// Compares two rows.
    pub fn compare(&self, a: &Row, b: &Row) -> Ordering {
        (self.0)(a, b)
    }
}

impl std::fmt::Debug for Sorter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Sorter(..)")
    }
}

use std::ops::Deref;
use std::sync::Arc;

use crate::model::Row;

/// Display data of a node.
///
/// Without a mapper this borrows the entry's own row; with one it shares
/// the mapped row built when the node was created. Either way it
/// dereferences to a [`Row`].
#[derive(Debug, Clone)]
pub enum DisplayData<'a> {
    /// The raw row of the originating entry.
    Raw(&'a Row),
    /// A row produced by the data mapper.
    Mapped(Arc<Row>),
}

impl DisplayData<'_> {
    /// Returns `true` if a mapper produced this row.
    pub fn is_mapped(&self) -> bool {
        matches!(self, DisplayData::Mapped(_))
    }

    /// Copies the row out.
    pub fn to_row(&self) -> Row {
        self.deref().clone()
    }
}

impl Deref for DisplayData<'_> {
    type Target = Row;

    fn deref(&self) -> &Row {
        match self {
            DisplayData::Raw(row) => row,
            DisplayData::Mapped(row) => row,
        }
    }
}

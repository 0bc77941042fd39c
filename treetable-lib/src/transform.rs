//! The full data-to-table transform.

use std::sync::Arc;

use crate::columns::{FixedColumn, columns_from_names, infer_fixed_columns};
use crate::config::TreeConfig;
use crate::error::TreeError;
use crate::index::IndexedTree;
use crate::model::TreeData;
use crate::roots::resolve_roots;

/// An indexed tree plus the columns to show next to the tree column.
#[derive(Debug)]
pub struct TransformedTree {
    pub tree: IndexedTree,
    pub fixed_columns: Vec<FixedColumn>,
}

impl TransformedTree {
    /// Descriptor of the tree column.
    pub fn main_column(&self) -> FixedColumn {
        FixedColumn::new(self.tree.main_column())
    }
}

/// Resolves roots, indexes the data and works out the fixed columns.
///
/// Call again whenever the data or any part of `config` changes; the result
/// is not meant to be patched.
pub fn transform_tree(
    entries: impl Into<Arc<TreeData>>,
    config: &TreeConfig,
) -> Result<TransformedTree, TreeError> {
    let entries = entries.into();
    let roots = resolve_roots(&entries, config.roots.as_deref());

    let fixed_columns = match &config.fixed_columns {
        Some(names) => columns_from_names(names.iter().cloned()),
        None => infer_fixed_columns(&entries, &config.main_column),
    };

    let tree = IndexedTree::build(
        entries,
        config.main_column.clone(),
        &roots,
        config.data_mapper.clone(),
        config.sorter.clone(),
    )?;

    log::debug!(
        "[transform] Built tree with {} roots and {} fixed columns",
        tree.get_roots().len(),
        fixed_columns.len()
    );

    Ok(TransformedTree {
        tree,
        fixed_columns,
    })
}

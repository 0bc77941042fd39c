//! Flattened rows.

use std::collections::BTreeSet;

use treetable_lib::columns::FixedColumn;
use treetable_lib::model::{DisplayValue, TreeId};
use treetable_lib::{IndexedTree, NodeIndex};

/// A node as it appears in the flattened, expanded tree.
#[derive(Debug, Clone, PartialEq)]
pub struct VisibleRow {
    pub index: NodeIndex,
    pub id: TreeId,
    /// Depth in tree (0 = root).
    pub depth: usize,
    pub has_children: bool,
    pub is_expanded: bool,
    pub is_selected: bool,
    /// Value of the main column.
    pub main: DisplayValue,
    /// Values of the fixed columns, in column order.
    pub cells: Vec<DisplayValue>,
}

/// Inputs shared by every step of the flattening walk.
pub(crate) struct Flatten<'a> {
    pub tree: &'a IndexedTree,
    pub fixed_columns: &'a [FixedColumn],
    pub expanded: &'a BTreeSet<NodeIndex>,
    pub selected: Option<NodeIndex>,
    pub max_node_depth: usize,
}

impl Flatten<'_> {
    /// Collects the rows of `nodes` and of every expanded descendant, never
    /// going deeper than `max_node_depth`.
    pub fn collect(&self, nodes: &[NodeIndex], out: &mut Vec<VisibleRow>) {
        for &index in nodes {
            let Some(row) = self.row(index) else {
                continue;
            };
            let descend = row.is_expanded && row.has_children && row.depth + 1 < self.max_node_depth;
            out.push(row);

            if descend {
                self.collect(&self.tree.get_children(index), out);
            }
        }
    }

    fn row(&self, index: NodeIndex) -> Option<VisibleRow> {
        let depth = self.tree.get_depth(index)?;
        if depth >= self.max_node_depth {
            return None;
        }
        let entry = self.tree.get_tree_entry(index)?;
        let display = self.tree.get_display_data(index)?;
        let cell = |column: &str| display.get(column).cloned().unwrap_or_default();

        Some(VisibleRow {
            index,
            id: entry.id.clone(),
            depth,
            has_children: self.tree.has_children(index),
            is_expanded: self.expanded.contains(&index),
            is_selected: self.selected == Some(index),
            main: cell(self.tree.main_column()),
            cells: self.fixed_columns.iter().map(|c| cell(&c.name)).collect(),
        })
    }
}

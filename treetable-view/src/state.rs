//! SimpleTreeView state.

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use treetable_lib::columns::FixedColumn;
use treetable_lib::model::{TreeData, TreeId};
use treetable_lib::{NodeIndex, TransformedTree, TreeConfig, id_path, resolve_id_path, transform_tree};

use crate::error::ViewError;
use crate::row::{Flatten, VisibleRow};

/// Called with the root-to-node id path of the new selection, or an empty
/// path when the selection is cleared.
pub type SelectionCallback = Arc<dyn Fn(&[TreeId]) + Send + Sync>;

/// Called with the full set of expanded nodes after it changes.
pub type ExpandedCallback = Arc<dyn Fn(&[NodeIndex]) + Send + Sync>;

/// Internal state for the view.
struct ViewInner {
    data: Arc<TreeData>,
    config: TreeConfig,
    transformed: TransformedTree,
    /// Expanded nodes of the current tree.
    expanded: BTreeSet<NodeIndex>,
    selected: Option<NodeIndex>,
    /// Flattened visible rows (rebuilt on expand/collapse and rebuilds).
    visible: Vec<VisibleRow>,
    on_selection_change: Option<SelectionCallback>,
    on_expanded_change: Option<ExpandedCallback>,
}

impl ViewInner {
    fn contains(&self, index: NodeIndex) -> bool {
        self.transformed.tree.get_depth(index).is_some()
    }

    fn rebuild_visible(&mut self) {
        let flatten = Flatten {
            tree: &self.transformed.tree,
            fixed_columns: &self.transformed.fixed_columns,
            expanded: &self.expanded,
            selected: self.selected,
            max_node_depth: self.config.max_node_depth,
        };
        let mut visible = Vec::new();
        flatten.collect(self.transformed.tree.get_roots(), &mut visible);
        self.visible = visible;
    }

    fn mark_selected(&mut self) {
        let selected = self.selected;
        for row in &mut self.visible {
            row.is_selected = selected == Some(row.index);
        }
    }

    fn expanded_notification(&self) -> Option<(ExpandedCallback, Vec<NodeIndex>)> {
        self.on_expanded_change
            .clone()
            .map(|callback| (callback, self.expanded.iter().copied().collect()))
    }
}

/// Headless state of a simple tree table.
///
/// Owns the indexed tree together with the UI state keyed by its node
/// indices. Changing the data, the config or the roots rebuilds the tree
/// from scratch; expanded nodes and the selection are carried over through
/// their id paths, and dropped if they no longer exist.
///
/// Cloning is cheap and clones share state.
pub struct SimpleTreeView {
    inner: Arc<RwLock<ViewInner>>,
    /// Dirty flag for re-render.
    dirty: Arc<AtomicBool>,
}

impl SimpleTreeView {
    /// Builds the tree for `data` and starts with everything collapsed.
    pub fn new(data: Arc<TreeData>, config: TreeConfig) -> Result<Self, ViewError> {
        let transformed = transform_tree(Arc::clone(&data), &config)?;
        let mut inner = ViewInner {
            data,
            config,
            transformed,
            expanded: BTreeSet::new(),
            selected: None,
            visible: Vec::new(),
            on_selection_change: None,
            on_expanded_change: None,
        };
        inner.rebuild_visible();

        Ok(Self {
            inner: Arc::new(RwLock::new(inner)),
            dirty: Arc::new(AtomicBool::new(true)),
        })
    }

    /// Registers the selection callback.
    pub fn on_selection_change(&self, callback: impl Fn(&[TreeId]) + Send + Sync + 'static) {
        if let Ok(mut guard) = self.inner.write() {
            guard.on_selection_change = Some(Arc::new(callback));
        }
    }

    /// Registers the expanded-set callback.
    pub fn on_expanded_change(&self, callback: impl Fn(&[NodeIndex]) + Send + Sync + 'static) {
        if let Ok(mut guard) = self.inner.write() {
            guard.on_expanded_change = Some(Arc::new(callback));
        }
    }

    // -------------------------------------------------------------------------
    // Inputs
    // -------------------------------------------------------------------------

    /// The current source data.
    pub fn data(&self) -> Option<Arc<TreeData>> {
        self.inner.read().ok().map(|g| Arc::clone(&g.data))
    }

    /// The current configuration.
    pub fn config(&self) -> Option<TreeConfig> {
        self.inner.read().ok().map(|g| g.config.clone())
    }

    /// Replaces the source data. Passing the same `Arc` again is a no-op.
    pub fn set_data(&self, data: Arc<TreeData>) -> Result<(), ViewError> {
        let config = {
            let guard = self.inner.read().map_err(|_| ViewError::Poisoned)?;
            if Arc::ptr_eq(&guard.data, &data) {
                return Ok(());
            }
            guard.config.clone()
        };
        self.rebuild(data, config)
    }

    /// Replaces the configuration.
    pub fn set_config(&self, config: TreeConfig) -> Result<(), ViewError> {
        let data = self.inner.read().map_err(|_| ViewError::Poisoned)?.data.clone();
        self.rebuild(data, config)
    }

    /// Replaces the explicit roots; `None` goes back to inferred roots.
    pub fn set_roots(&self, roots: Option<Vec<TreeId>>) -> Result<(), ViewError> {
        let (data, mut config) = {
            let guard = self.inner.read().map_err(|_| ViewError::Poisoned)?;
            (Arc::clone(&guard.data), guard.config.clone())
        };
        if config.roots == roots {
            return Ok(());
        }
        config.roots = roots;
        self.rebuild(data, config)
    }

    /// Builds a new tree and moves the UI state onto it.
    ///
    /// On failure the previous tree and state stay in place.
    fn rebuild(&self, data: Arc<TreeData>, config: TreeConfig) -> Result<(), ViewError> {
        let transformed = transform_tree(Arc::clone(&data), &config)?;

        let (selection_cleared, expanded_notify) = {
            let mut guard = self.inner.write().map_err(|_| ViewError::Poisoned)?;

            let expanded_paths: Vec<Vec<TreeId>> = guard
                .expanded
                .iter()
                .map(|&index| id_path(&guard.transformed.tree, index))
                .collect();
            let selected_path = guard
                .selected
                .map(|index| id_path(&guard.transformed.tree, index));

            let expanded: BTreeSet<NodeIndex> = expanded_paths
                .iter()
                .filter_map(|path| resolve_id_path(&transformed.tree, path))
                .collect();
            let selected = selected_path
                .as_deref()
                .and_then(|path| resolve_id_path(&transformed.tree, path));

            log::debug!(
                "[view] Rebuilt tree, kept {}/{} expanded nodes, selection {}",
                expanded.len(),
                expanded_paths.len(),
                if selected.is_some() { "kept" } else { "none" }
            );

            let selection_cleared = guard.selected.is_some() && selected.is_none();
            let expanded_changed = guard.expanded != expanded;

            guard.data = data;
            guard.config = config;
            guard.transformed = transformed;
            guard.expanded = expanded;
            guard.selected = selected;
            guard.rebuild_visible();
            self.dirty.store(true, Ordering::SeqCst);

            let selection_cleared = if selection_cleared {
                guard.on_selection_change.clone()
            } else {
                None
            };
            let expanded_notify = if expanded_changed {
                guard.expanded_notification()
            } else {
                None
            };
            (selection_cleared, expanded_notify)
        };

        if let Some(callback) = selection_cleared {
            callback(&[]);
        }
        if let Some((callback, nodes)) = expanded_notify {
            callback(&nodes);
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Tree access
    // -------------------------------------------------------------------------

    /// Runs `f` against the current indexed tree.
    pub fn with_tree<R>(&self, f: impl FnOnce(&TransformedTree) -> R) -> Option<R> {
        self.inner.read().ok().map(|g| f(&g.transformed))
    }

    /// The main column followed by the fixed columns.
    pub fn columns(&self) -> Vec<FixedColumn> {
        self.inner
            .read()
            .map(|g| {
                let mut columns = vec![g.transformed.main_column()];
                columns.extend(g.transformed.fixed_columns.iter().cloned());
                columns
            })
            .unwrap_or_default()
    }

    /// The flattened rows a renderer should paint, in order.
    pub fn visible_rows(&self) -> Vec<VisibleRow> {
        self.inner
            .read()
            .map(|g| g.visible.clone())
            .unwrap_or_default()
    }

    /// Number of visible rows.
    pub fn visible_len(&self) -> usize {
        self.inner.read().map(|g| g.visible.len()).unwrap_or(0)
    }

    // -------------------------------------------------------------------------
    // Expand/Collapse
    // -------------------------------------------------------------------------

    /// Expands a node. Returns whether anything changed.
    pub fn expand(&self, index: NodeIndex) -> Result<bool, ViewError> {
        self.update_expanded(index, |expanded| expanded.insert(index))
    }

    /// Collapses a node. Returns whether anything changed.
    pub fn collapse(&self, index: NodeIndex) -> Result<bool, ViewError> {
        self.update_expanded(index, |expanded| expanded.remove(&index))
    }

    /// Toggles a node between expanded and collapsed.
    pub fn toggle(&self, index: NodeIndex) -> Result<bool, ViewError> {
        self.update_expanded(index, |expanded| {
            if !expanded.remove(&index) {
                expanded.insert(index);
            }
            true
        })
    }

    /// Check if a node is expanded.
    pub fn is_expanded(&self, index: NodeIndex) -> bool {
        self.inner
            .read()
            .map(|g| g.expanded.contains(&index))
            .unwrap_or(false)
    }

    /// Expanded nodes in index order.
    pub fn expanded_nodes(&self) -> Vec<NodeIndex> {
        self.inner
            .read()
            .map(|g| g.expanded.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Expands every node with children above the depth ceiling.
    pub fn expand_all(&self) {
        let notify = match self.inner.write() {
            Ok(mut guard) => {
                let before = guard.expanded.len();
                let max_node_depth = guard.config.max_node_depth;
                let mut expandable = BTreeSet::new();
                let tree = &guard.transformed.tree;
                let mut stack = tree.get_roots().to_vec();
                while let Some(node) = stack.pop() {
                    let depth = tree.get_depth(node).unwrap_or(0);
                    if tree.has_children(node)
                        && depth + 1 < max_node_depth
                        && expandable.insert(node)
                    {
                        stack.extend(tree.get_children(node));
                    }
                }
                guard.expanded.extend(expandable);

                if guard.expanded.len() == before {
                    None
                } else {
                    guard.rebuild_visible();
                    self.dirty.store(true, Ordering::SeqCst);
                    guard.expanded_notification()
                }
            }
            Err(_) => None,
        };
        if let Some((callback, nodes)) = notify {
            callback(&nodes);
        }
    }

    /// Collapse all nodes.
    pub fn collapse_all(&self) {
        let notify = match self.inner.write() {
            Ok(mut guard) if !guard.expanded.is_empty() => {
                guard.expanded.clear();
                guard.rebuild_visible();
                self.dirty.store(true, Ordering::SeqCst);
                guard.expanded_notification()
            }
            _ => None,
        };
        if let Some((callback, nodes)) = notify {
            callback(&nodes);
        }
    }

    fn update_expanded(
        &self,
        index: NodeIndex,
        change: impl FnOnce(&mut BTreeSet<NodeIndex>) -> bool,
    ) -> Result<bool, ViewError> {
        let notify = {
            let mut guard = self.inner.write().map_err(|_| ViewError::Poisoned)?;
            if !guard.contains(index) {
                return Err(ViewError::UnknownNode(index));
            }
            if !change(&mut guard.expanded) {
                return Ok(false);
            }
            guard.rebuild_visible();
            self.dirty.store(true, Ordering::SeqCst);
            guard.expanded_notification()
        };
        if let Some((callback, nodes)) = notify {
            callback(&nodes);
        }
        Ok(true)
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    /// Selects a node and returns its id path.
    ///
    /// The selection callback receives the same path, only if the selection
    /// actually changed.
    pub fn select(&self, index: NodeIndex) -> Result<Vec<TreeId>, ViewError> {
        let (path, notify) = {
            let mut guard = self.inner.write().map_err(|_| ViewError::Poisoned)?;
            if !guard.contains(index) {
                return Err(ViewError::UnknownNode(index));
            }
            let path = id_path(&guard.transformed.tree, index);
            if guard.selected == Some(index) {
                (path, None)
            } else {
                guard.selected = Some(index);
                guard.mark_selected();
                self.dirty.store(true, Ordering::SeqCst);
                (path, guard.on_selection_change.clone())
            }
        };
        if let Some(callback) = notify {
            callback(&path);
        }
        Ok(path)
    }

    /// Selects the node an id path leads to, if it exists.
    pub fn select_path(&self, path: &[TreeId]) -> Result<Option<NodeIndex>, ViewError> {
        let index = {
            let guard = self.inner.read().map_err(|_| ViewError::Poisoned)?;
            resolve_id_path(&guard.transformed.tree, path)
        };
        match index {
            Some(index) => self.select(index).map(|_| Some(index)),
            None => Ok(None),
        }
    }

    /// Clears the selection.
    pub fn clear_selection(&self) {
        let notify = match self.inner.write() {
            Ok(mut guard) if guard.selected.is_some() => {
                guard.selected = None;
                guard.mark_selected();
                self.dirty.store(true, Ordering::SeqCst);
                guard.on_selection_change.clone()
            }
            _ => None,
        };
        if let Some(callback) = notify {
            callback(&[]);
        }
    }

    /// The selected node.
    pub fn selected(&self) -> Option<NodeIndex> {
        self.inner.read().ok().and_then(|g| g.selected)
    }

    /// Id path of the selected node.
    pub fn selected_path(&self) -> Option<Vec<TreeId>> {
        self.inner.read().ok().and_then(|g| {
            g.selected
                .map(|index| id_path(&g.transformed.tree, index))
        })
    }

    // -------------------------------------------------------------------------
    // Dirty tracking
    // -------------------------------------------------------------------------

    /// Check if the view has changed since the last render.
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    /// Clear the dirty flag.
    pub fn clear_dirty(&self) {
        self.dirty.store(false, Ordering::SeqCst);
    }
}

impl Clone for SimpleTreeView {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            dirty: Arc::clone(&self.dirty),
        }
    }
}

impl std::fmt::Debug for SimpleTreeView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut debug = f.debug_struct("SimpleTreeView");
        if let Ok(guard) = self.inner.read() {
            debug
                .field("tree", &guard.transformed.tree)
                .field("expanded", &guard.expanded)
                .field("selected", &guard.selected)
                .field("visible", &guard.visible.len());
        }
        debug.field("dirty", &self.is_dirty()).finish()
    }
}

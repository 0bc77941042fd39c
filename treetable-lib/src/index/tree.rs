//! IndexedTree construction and read interface.

use std::collections::hash_map::Entry;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::{Arc, RwLock};

use crate::error::TreeError;
use crate::mapper::DataMapper;
use crate::model::{TreeData, TreeEntry, TreeId};
use crate::sorter::Sorter;

use super::arena::{Arena, NodeRecord, SeenIds};
use super::cycles::cyclic_entries;
use super::display::DisplayData;
use super::node::NodeIndex;

/// A lazily expanded, cycle-safe index over tree data.
///
/// Built once from immutable inputs and never patched: when the data, the
/// roots, the mapper or the sorter change, build a new one and drop this
/// one. Every read method takes `&self`; children are materialized on first
/// access behind an internal lock, so a tree can be shared across threads.
///
/// Methods given an index this tree did not hand out return `None`, an
/// empty list or `false`.
///
/// # Example
///
/// ```
/// use treetable_lib::IndexedTree;
/// use treetable_lib::model::{TreeEntry, TreeId};
///
/// // An entry listing itself as a child.
/// let data = vec![TreeEntry::new("a").child("a")];
/// let tree = IndexedTree::build(data, "main", &[TreeId::from("a")], None, None).unwrap();
///
/// let root = tree.get_roots()[0];
/// let repeat = tree.get_children(root)[0];
/// assert_eq!(tree.get_depth(repeat), Some(1));
/// assert!(!tree.has_children(repeat));
/// assert!(tree.get_children(repeat).is_empty());
/// ```
pub struct IndexedTree {
    entries: Arc<TreeData>,
    main_column: String,
    /// First position of each id in `entries`.
    lookup: HashMap<TreeId, usize>,
    /// Entry positions that lie on a cycle of the data.
    cyclic: Vec<bool>,
    mapper: Option<DataMapper>,
    sorter: Option<Sorter>,
    roots: Vec<NodeIndex>,
    arena: RwLock<Arena>,
}

impl IndexedTree {
    /// Indexes `entries` starting from `roots`.
    ///
    /// Every id reachable from the roots is checked before anything is
    /// materialized, so a missing root or child fails the whole build with
    /// [`TreeError::MalformedTree`] and later lazy expansion cannot fail.
    pub fn build(
        entries: impl Into<Arc<TreeData>>,
        main_column: impl Into<String>,
        roots: &[TreeId],
        mapper: Option<DataMapper>,
        sorter: Option<Sorter>,
    ) -> Result<Self, TreeError> {
        let entries = entries.into();
        let lookup = build_lookup(&entries);
        validate_reachable(&entries, &lookup, roots)?;
        let cyclic = cyclic_entries(&entries, &lookup);

        let mut tree = Self {
            entries,
            main_column: main_column.into(),
            lookup,
            cyclic,
            mapper: mapper.filter(|mapper| !mapper.is_empty()),
            sorter,
            roots: Vec::with_capacity(roots.len()),
            arena: RwLock::new(Arena::default()),
        };

        let mut arena = Arena::default();
        let no_ancestors = SeenIds::default();
        let mut generated = Vec::with_capacity(roots.len());
        for id in roots {
            generated.push(tree.generate_index(&mut arena, id, None, &no_ancestors)?);
        }
        tree.roots = generated;
        tree.arena = RwLock::new(arena);

        log::debug!(
            "[tree] Indexed {} entries: {} roots, {} distinct ids",
            tree.entries.len(),
            tree.roots.len(),
            tree.lookup.len()
        );
        Ok(tree)
    }

    // -------------------------------------------------------------------------
    // Read interface
    // -------------------------------------------------------------------------

    /// Root nodes, in root-list order.
    pub fn get_roots(&self) -> &[NodeIndex] {
        &self.roots
    }

    /// Display data of a node: the mapped row, or the raw row when no
    /// mapper is configured.
    pub fn get_display_data(&self, index: NodeIndex) -> Option<DisplayData<'_>> {
        let (entry, mapped) = self
            .arena
            .read()
            .ok()
            .and_then(|arena| arena.get(index).map(|n| (n.entry, n.mapped.clone())))?;
        Some(match mapped {
            Some(row) => DisplayData::Mapped(row),
            None => DisplayData::Raw(&self.entries[entry].data),
        })
    }

    /// Whether a node has children.
    ///
    /// `false` for cycle repetitions, whatever the entry declares. Does not
    /// materialize the children.
    pub fn has_children(&self, index: NodeIndex) -> bool {
        self.arena
            .read()
            .ok()
            .and_then(|arena| {
                arena
                    .get(index)
                    .map(|n| !n.was_seen && self.entries[n.entry].has_children())
            })
            .unwrap_or(false)
    }

    /// Children of a node, sorted by the sorter if one is configured.
    ///
    /// Resolved on the first call and cached; later calls return the same
    /// indices.
    pub fn get_children(&self, index: NodeIndex) -> Vec<NodeIndex> {
        let cached = self
            .arena
            .read()
            .ok()
            .and_then(|arena| arena.get(index).and_then(|n| n.children.clone()));
        match cached {
            Some(children) => children,
            None => self.resolve_children(index),
        }
    }

    /// Parent of a node; `None` for roots.
    pub fn get_parent(&self, index: NodeIndex) -> Option<NodeIndex> {
        self.arena
            .read()
            .ok()
            .and_then(|arena| arena.get(index).and_then(|n| n.parent))
    }

    /// Depth of a node. Roots have depth 0.
    pub fn get_depth(&self, index: NodeIndex) -> Option<usize> {
        self.arena
            .read()
            .ok()
            .and_then(|arena| arena.get(index).map(|n| n.depth))
    }

    /// The entry this node was created from.
    pub fn get_tree_entry(&self, index: NodeIndex) -> Option<&TreeEntry> {
        let entry = self
            .arena
            .read()
            .ok()
            .and_then(|arena| arena.get(index).map(|n| n.entry))?;
        self.entries.get(entry)
    }

    /// Entries from the root down to this node, inclusive.
    pub fn get_path(&self, index: NodeIndex) -> Vec<&TreeEntry> {
        let positions = self
            .arena
            .read()
            .map(|arena| arena.entry_path(index))
            .unwrap_or_default();
        positions.into_iter().map(|p| &self.entries[p]).collect()
    }

    /// Whether this node repeats an id already on its root path.
    pub fn is_cycle(&self, index: NodeIndex) -> bool {
        self.arena
            .read()
            .ok()
            .and_then(|arena| arena.get(index).map(|n| n.was_seen))
            .unwrap_or(false)
    }

    /// Every node below `index`, materializing them as needed.
    ///
    /// Terminates on cyclic data because cycle repetitions have no children.
    pub fn get_all_descendants(&self, index: NodeIndex) -> BTreeSet<NodeIndex> {
        let mut descendants = BTreeSet::new();
        let mut stack = self.get_children(index);
        while let Some(next) = stack.pop() {
            if descendants.insert(next) {
                stack.extend(self.get_children(next));
            }
        }
        descendants
    }

    /// Number of nodes materialized so far.
    pub fn len(&self) -> usize {
        self.arena.read().map(|arena| arena.len()).unwrap_or(0)
    }

    /// Returns `true` if the tree has no roots.
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Name of the tree column.
    pub fn main_column(&self) -> &str {
        &self.main_column
    }

    /// The source data this tree was built from.
    pub fn entries(&self) -> &Arc<TreeData> {
        &self.entries
    }

    // -------------------------------------------------------------------------
    // Construction
    // -------------------------------------------------------------------------

    /// Returns the index for `id` under `parent`, creating the node on first
    /// request.
    fn generate_index(
        &self,
        arena: &mut Arena,
        id: &TreeId,
        parent: Option<NodeIndex>,
        seen: &SeenIds,
    ) -> Result<NodeIndex, TreeError> {
        let Some(&entry) = self.lookup.get(id) else {
            let referenced_by = parent
                .and_then(|p| arena.get(p))
                .map(|n| self.entries[n.entry].id.clone());
            return Err(TreeError::malformed(id, referenced_by));
        };
        if let Some(index) = arena.lookup(entry, parent) {
            return Ok(index);
        }

        let was_seen = seen.contains(id);

        let depth = parent
            .and_then(|p| arena.get(p))
            .map_or(0, |parent| parent.depth + 1);

        let mapped = self.mapper.as_ref().map(|mapper| {
            let mut node_path = parent.map(|p| arena.entry_path(p)).unwrap_or_default();
            node_path.push(entry);
            let path_entries: Vec<&TreeEntry> =
                node_path.iter().map(|&p| &self.entries[p]).collect();
            Arc::new(mapper.apply(&self.entries[entry].data, &path_entries))
        });

        let child_seen = if was_seen || !self.cyclic[entry] {
            Arc::clone(seen)
        } else {
            let mut extended = HashSet::clone(seen);
            extended.insert(id.clone());
            Arc::new(extended)
        };

        let index = arena.insert(NodeRecord {
            entry,
            mapped,
            depth,
            parent,
            was_seen,
            seen: child_seen,
            children: None,
        });
        if was_seen {
            log::trace!("[tree] Cycle at {} (id '{}'), not expanding", index, id);
        }
        Ok(index)
    }

    /// Materializes, sorts and caches the children of a node.
    fn resolve_children(&self, index: NodeIndex) -> Vec<NodeIndex> {
        let Ok(mut arena) = self.arena.write() else {
            return Vec::new();
        };
        let Some(node) = arena.get(index) else {
            return Vec::new();
        };
        // Another reader may have resolved them while we waited for the lock.
        if let Some(children) = &node.children {
            return children.clone();
        }

        let children = if node.was_seen {
            Vec::new()
        } else {
            let entry = node.entry;
            let seen = Arc::clone(&node.seen);

            let mut children = Vec::with_capacity(self.entries[entry].children.len());
            for child_id in &self.entries[entry].children {
                match self.generate_index(&mut arena, child_id, Some(index), &seen) {
                    Ok(child) => children.push(child),
                    // Unreachable after validation in `build`.
                    Err(err) => log::error!("[tree] {}", err),
                }
            }
            self.sort_siblings(&arena, &mut children);
            children
        };

        if let Some(node) = arena.get_mut(index) {
            node.children = Some(children.clone());
        }
        children
    }

    fn sort_siblings(&self, arena: &Arena, children: &mut [NodeIndex]) {
        let Some(sorter) = &self.sorter else {
            return;
        };
        let row = |index: &NodeIndex| {
            arena.get(*index).map(|n| match &n.mapped {
                Some(row) => row.as_ref(),
                None => &self.entries[n.entry].data,
            })
        };
        // `sort_by` is stable: equal siblings keep their source order.
        children.sort_by(|a, b| match (row(a), row(b)) {
            (Some(a), Some(b)) => sorter.compare(a, b),
            _ => std::cmp::Ordering::Equal,
        });
    }
}

impl std::fmt::Debug for IndexedTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndexedTree")
            .field("main_column", &self.main_column)
            .field("entries", &self.entries.len())
            .field("roots", &self.roots)
            .field("nodes", &self.len())
            .field("mapper", &self.mapper)
            .field("sorter", &self.sorter)
            .finish()
    }
}

/// Maps each id to the position of its first entry.
fn build_lookup(entries: &[TreeEntry]) -> HashMap<TreeId, usize> {
    let mut lookup = HashMap::with_capacity(entries.len());
    for (position, entry) in entries.iter().enumerate() {
        match lookup.entry(entry.id.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(position);
            }
            Entry::Occupied(first) => {
                log::debug!(
                    "[tree] Duplicate id '{}' at position {}, keeping position {}",
                    entry.id,
                    position,
                    first.get()
                );
            }
        }
    }
    lookup
}

/// Checks that every id reachable from `roots` has an entry.
fn validate_reachable(
    entries: &[TreeEntry],
    lookup: &HashMap<TreeId, usize>,
    roots: &[TreeId],
) -> Result<(), TreeError> {
    let mut visited: HashSet<&TreeId> = HashSet::new();
    let mut stack: Vec<(&TreeId, Option<&TreeId>)> =
        roots.iter().rev().map(|id| (id, None)).collect();

    while let Some((id, referenced_by)) = stack.pop() {
        if !visited.insert(id) {
            continue;
        }
        let Some(&position) = lookup.get(id) else {
            return Err(TreeError::malformed(id, referenced_by.cloned()));
        };
        let entry = &entries[position];
        stack.extend(
            entry
                .children
                .iter()
                .rev()
                .map(|child| (child, Some(&entry.id))),
        );
    }
    Ok(())
}

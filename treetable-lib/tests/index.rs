//! Tests for the tree indexer.

use std::cmp::Ordering;
use std::sync::Arc;
use std::thread;

use treetable_lib::mapper::DataMapper;
use treetable_lib::model::{DisplayValue, TreeEntry, TreeId};
use treetable_lib::sorter::Sorter;
use treetable_lib::{IndexedTree, NodeIndex, TreeError, TreeSource};

fn sample_data() -> Vec<TreeEntry> {
    vec![
        TreeEntry::new(0).set("main", "Root").with_children([1, 2]),
        TreeEntry::new(1).set("main", "C1"),
        TreeEntry::new(2).set("main", "C2"),
    ]
}

fn build(data: Vec<TreeEntry>, roots: &[TreeId]) -> IndexedTree {
    IndexedTree::build(data, "main", roots, None, None).unwrap()
}

fn main_of(tree: &IndexedTree, index: NodeIndex) -> String {
    tree.get_display_data(index).unwrap()["main"].to_string()
}

/// Walks the whole tree depth-first, returning `(index, parent, depth)`.
fn walk(tree: &IndexedTree) -> Vec<(NodeIndex, Option<NodeIndex>, usize)> {
    let mut out = Vec::new();
    let mut stack: Vec<NodeIndex> = tree.get_roots().iter().rev().copied().collect();
    while let Some(node) = stack.pop() {
        out.push((node, tree.get_parent(node), tree.get_depth(node).unwrap()));
        stack.extend(tree.get_children(node).into_iter().rev());
    }
    out
}

// =============================================================================
// Basic navigation
// =============================================================================

#[test]
fn test_end_to_end_example() {
    let tree = build(sample_data(), &[TreeId::Int(0)]);

    let roots = tree.get_roots();
    assert_eq!(roots.len(), 1);
    assert_eq!(tree.get_tree_entry(roots[0]).unwrap().id, TreeId::Int(0));

    let children = tree.get_children(roots[0]);
    assert_eq!(children.len(), 2);
    assert_eq!(main_of(&tree, children[0]), "C1");
    assert_eq!(main_of(&tree, children[1]), "C2");
}

#[test]
fn test_root_depth_is_zero_and_children_add_one() {
    let data = vec![
        TreeEntry::new("a").with_children(["b", "c"]),
        TreeEntry::new("b").child("d"),
        TreeEntry::new("c"),
        TreeEntry::new("d"),
    ];
    let tree = build(data, &[TreeId::from("a")]);

    for (_node, parent, depth) in walk(&tree) {
        match parent {
            None => assert_eq!(depth, 0),
            Some(parent) => assert_eq!(depth, tree.get_depth(parent).unwrap() + 1),
        }
    }
}

#[test]
fn test_root_has_no_parent() {
    let tree = build(sample_data(), &[TreeId::Int(0)]);
    let root = tree.get_roots()[0];
    assert_eq!(tree.get_parent(root), None);
    let child = tree.get_children(root)[0];
    assert_eq!(tree.get_parent(child), Some(root));
}

#[test]
fn test_children_are_lazy() {
    let tree = build(sample_data(), &[TreeId::Int(0)]);
    assert_eq!(tree.len(), 1);

    let root = tree.get_roots()[0];
    assert!(tree.has_children(root));
    assert_eq!(tree.len(), 1, "has_children must not materialize children");

    tree.get_children(root);
    assert_eq!(tree.len(), 3);
}

#[test]
fn test_get_children_is_memoized() {
    let tree = build(sample_data(), &[TreeId::Int(0)]);
    let root = tree.get_roots()[0];

    let first = tree.get_children(root);
    let second = tree.get_children(root);
    assert_eq!(first, second);
    assert_eq!(tree.len(), 3);
}

#[test]
fn test_unknown_index_is_empty() {
    let tree = build(sample_data(), &[TreeId::Int(0)]);
    let foreign = NodeIndex::new(99);

    assert!(tree.get_display_data(foreign).is_none());
    assert!(tree.get_children(foreign).is_empty());
    assert!(!tree.has_children(foreign));
    assert_eq!(tree.get_parent(foreign), None);
    assert_eq!(tree.get_depth(foreign), None);
    assert!(tree.get_tree_entry(foreign).is_none());
}

// =============================================================================
// Determinism and structural sharing
// =============================================================================

#[test]
fn test_identical_builds_number_identically() {
    let data = vec![
        TreeEntry::new(0).with_children([1, 2]),
        TreeEntry::new(1).with_children([3]),
        TreeEntry::new(2).with_children([3]),
        TreeEntry::new(3),
    ];
    let first = build(data.clone(), &[TreeId::Int(0)]);
    let second = build(data, &[TreeId::Int(0)]);

    assert_eq!(walk(&first), walk(&second));
}

#[test]
fn test_shared_child_gets_one_index_per_parent() {
    let data = vec![
        TreeEntry::new(0).with_children([1, 2]),
        TreeEntry::new(1).with_children([3]),
        TreeEntry::new(2).with_children([3]),
        TreeEntry::new(3).set("main", "shared"),
    ];
    let tree = build(data, &[TreeId::Int(0)]);
    let root = tree.get_roots()[0];
    let children = tree.get_children(root);

    let via_one = tree.get_children(children[0])[0];
    let via_two = tree.get_children(children[1])[0];
    assert_ne!(via_one, via_two);
    assert_eq!(tree.get_tree_entry(via_one), tree.get_tree_entry(via_two));
}

#[test]
fn test_repeated_child_under_same_parent_collapses() {
    let data = vec![TreeEntry::new(0).with_children([1, 1]), TreeEntry::new(1)];
    let tree = build(data, &[TreeId::Int(0)]);
    let root = tree.get_roots()[0];

    let children = tree.get_children(root);
    assert_eq!(children.len(), 2);
    assert_eq!(children[0], children[1]);
}

#[test]
fn test_duplicate_explicit_roots_share_index() {
    let tree = build(sample_data(), &[TreeId::Int(1), TreeId::Int(1)]);
    let roots = tree.get_roots();
    assert_eq!(roots.len(), 2);
    assert_eq!(roots[0], roots[1]);
}

#[test]
fn test_duplicate_ids_first_entry_wins() {
    let data = vec![
        TreeEntry::new(0).child(1),
        TreeEntry::new(1).set("main", "first"),
        TreeEntry::new(1).set("main", "second"),
    ];
    let tree = build(data, &[TreeId::Int(0)]);
    let child = tree.get_children(tree.get_roots()[0])[0];
    assert_eq!(main_of(&tree, child), "first");
}

// =============================================================================
// Cycles
// =============================================================================

#[test]
fn test_self_reference_is_materialized_once() {
    let data = vec![TreeEntry::new("a").child("a")];
    let tree = build(data, &[TreeId::from("a")]);
    let root = tree.get_roots()[0];

    assert!(tree.has_children(root));
    let children = tree.get_children(root);
    assert_eq!(children.len(), 1);

    let repeat = children[0];
    assert!(tree.is_cycle(repeat));
    assert!(!tree.has_children(repeat));
    assert!(tree.get_children(repeat).is_empty());
    assert_eq!(tree.len(), 2);
}

#[test]
fn test_longer_cycle_truncates_on_repeat() {
    let data = vec![
        TreeEntry::new(1).child(2),
        TreeEntry::new(2).child(3),
        TreeEntry::new(3).child(1),
    ];
    let tree = build(data, &[TreeId::Int(1)]);
    let nodes = walk(&tree);

    let ids: Vec<_> = nodes
        .iter()
        .map(|(node, _, _)| tree.get_tree_entry(*node).unwrap().id.clone())
        .collect();
    assert_eq!(ids, vec![TreeId::Int(1), TreeId::Int(2), TreeId::Int(3), TreeId::Int(1)]);

    let (last, _, depth) = nodes[3];
    assert_eq!(depth, 3);
    assert!(!tree.has_children(last));
}

#[test]
fn test_sibling_branches_revisit_without_cycle() {
    // 2 appears in two branches; neither is on the other's path.
    let data = vec![
        TreeEntry::new(0).with_children([1, 3]),
        TreeEntry::new(1).child(2),
        TreeEntry::new(3).child(2),
        TreeEntry::new(2).child(4),
        TreeEntry::new(4),
    ];
    let tree = build(data, &[TreeId::Int(0)]);
    for (node, _, _) in walk(&tree) {
        assert!(!tree.is_cycle(node));
    }
    assert_eq!(walk(&tree).len(), 7);
}

#[test]
fn test_all_descendants_terminates_on_cycle() {
    let data = vec![
        TreeEntry::new(1).with_children([2, 1]),
        TreeEntry::new(2).child(1),
    ];
    let tree = build(data, &[TreeId::Int(1)]);
    let root = tree.get_roots()[0];

    let descendants = tree.get_all_descendants(root);
    // 2, 2 -> 1 (cycle), 1 (cycle)
    assert_eq!(descendants.len(), 3);
    assert!(!descendants.contains(&root));
    assert_eq!(TreeSource::all_descendants(&tree, root).unwrap(), descendants);
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn test_missing_child_fails_build() {
    let data = vec![TreeEntry::new(0).with_children([1, 7]), TreeEntry::new(1)];
    let error = IndexedTree::build(data, "main", &[TreeId::Int(0)], None, None).unwrap_err();
    assert_eq!(error, TreeError::malformed(7, Some(TreeId::Int(0))));
}

#[test]
fn test_missing_deep_child_fails_build() {
    let data = vec![
        TreeEntry::new(0).child(1),
        TreeEntry::new(1).child(2),
        TreeEntry::new(2).child("gone"),
    ];
    let result = IndexedTree::build(data, "main", &[TreeId::Int(0)], None, None);
    assert!(matches!(
        result,
        Err(TreeError::MalformedTree { id: TreeId::Str(ref id), .. }) if id == "gone"
    ));
}

#[test]
fn test_missing_root_fails_build() {
    let error = IndexedTree::build(sample_data(), "main", &[TreeId::Int(5)], None, None)
        .unwrap_err();
    assert_eq!(error, TreeError::malformed(5, None));
}

#[test]
fn test_unreachable_dangling_child_is_ignored() {
    let mut data = sample_data();
    data.push(TreeEntry::new(9).child(404));
    assert!(IndexedTree::build(data, "main", &[TreeId::Int(0)], None, None).is_ok());
}

#[test]
fn test_default_all_descendants_is_unsupported() {
    struct Empty;

    impl TreeSource for Empty {
        fn roots(&self) -> Vec<NodeIndex> {
            Vec::new()
        }
        fn children(&self, _: NodeIndex) -> Vec<NodeIndex> {
            Vec::new()
        }
        fn has_children(&self, _: NodeIndex) -> bool {
            false
        }
        fn parent(&self, _: NodeIndex) -> Option<NodeIndex> {
            None
        }
        fn depth(&self, _: NodeIndex) -> Option<usize> {
            None
        }
        fn display_data(&self, _: NodeIndex) -> Option<treetable_lib::DisplayData<'_>> {
            None
        }
        fn tree_entry(&self, _: NodeIndex) -> Option<&TreeEntry> {
            None
        }
    }

    assert_eq!(
        Empty.all_descendants(NodeIndex::new(0)),
        Err(TreeError::UnsupportedOperation("all_descendants"))
    );
}

// =============================================================================
// Data mapping
// =============================================================================

#[test]
fn test_without_mapper_display_data_is_raw_row() {
    let tree = build(sample_data(), &[TreeId::Int(0)]);
    let root = tree.get_roots()[0];
    let display = tree.get_display_data(root).unwrap();
    assert!(!display.is_mapped());
    assert!(std::ptr::eq(&*display, &tree.get_tree_entry(root).unwrap().data));
}

#[test]
fn test_mapper_sees_partial_row_and_path() {
    let data = vec![
        TreeEntry::new(0).set("main", "root").set("size", 2).child(1),
        TreeEntry::new(1).set("main", "leaf").set("size", 5),
    ];
    let mapper = DataMapper::new()
        .column("size", |value, _, _| (value.as_i64().unwrap_or(0) * 10).into())
        .column("summary", |raw, row, path| {
            assert!(raw.is_null());
            let trail: Vec<String> = path.iter().map(|e| e.data["main"].to_string()).collect();
            format!("{} @ {}", row["size"], trail.join("/")).into()
        });
    let tree = IndexedTree::build(data, "main", &[TreeId::Int(0)], Some(mapper), None).unwrap();

    let root = tree.get_roots()[0];
    let leaf = tree.get_children(root)[0];

    let display = tree.get_display_data(leaf).unwrap();
    assert!(display.is_mapped());
    assert_eq!(display["main"], "leaf".into());
    assert_eq!(display["size"], DisplayValue::Int(50));
    assert_eq!(display["summary"], "50 @ root/leaf".into());

    // The raw entry is untouched.
    assert_eq!(tree.get_tree_entry(leaf).unwrap().data["size"], DisplayValue::Int(5));
}

#[test]
fn test_empty_mapper_leaves_rows_raw() {
    let tree =
        IndexedTree::build(sample_data(), "main", &[TreeId::Int(0)], Some(DataMapper::new()), None)
            .unwrap();
    assert!(!tree.get_display_data(tree.get_roots()[0]).unwrap().is_mapped());
}

// =============================================================================
// Sorting
// =============================================================================

#[test]
fn test_sorter_orders_siblings() {
    let data = vec![
        TreeEntry::new(0).with_children([1, 2, 3]),
        TreeEntry::new(1).set("main", "b"),
        TreeEntry::new(2).set("main", "c"),
        TreeEntry::new(3).set("main", "a"),
    ];
    let tree = IndexedTree::build(
        data,
        "main",
        &[TreeId::Int(0)],
        None,
        Some(Sorter::by_column("main")),
    )
    .unwrap();

    let children = tree.get_children(tree.get_roots()[0]);
    let names: Vec<_> = children.iter().map(|&c| main_of(&tree, c)).collect();
    assert_eq!(names, vec!["a", "b", "c"]);
}

#[test]
fn test_sort_is_stable_for_equal_keys() {
    let data = vec![
        TreeEntry::new(0).with_children([1, 2, 3, 4]),
        TreeEntry::new(1).set("rank", 1).set("main", "x"),
        TreeEntry::new(2).set("rank", 0).set("main", "first"),
        TreeEntry::new(3).set("rank", 0).set("main", "second"),
        TreeEntry::new(4).set("rank", 0).set("main", "third"),
    ];
    let tree = IndexedTree::build(
        data,
        "main",
        &[TreeId::Int(0)],
        None,
        Some(Sorter::by_column("rank")),
    )
    .unwrap();

    let children = tree.get_children(tree.get_roots()[0]);
    let names: Vec<_> = children.iter().map(|&c| main_of(&tree, c)).collect();
    assert_eq!(names, vec!["first", "second", "third", "x"]);
}

#[test]
fn test_sorter_compares_mapped_rows() {
    let data = vec![
        TreeEntry::new(0).with_children([1, 2]),
        TreeEntry::new(1).set("main", "one").set("weight", 1),
        TreeEntry::new(2).set("main", "two").set("weight", 2),
    ];
    let mapper = DataMapper::new().column("weight", |value, _, _| {
        (-value.as_i64().unwrap_or(0)).into()
    });
    let tree = IndexedTree::build(
        data,
        "main",
        &[TreeId::Int(0)],
        Some(mapper),
        Some(Sorter::by_column("weight")),
    )
    .unwrap();

    let children = tree.get_children(tree.get_roots()[0]);
    assert_eq!(main_of(&tree, children[0]), "two");
}

#[test]
fn test_sorter_does_not_reorder_roots() {
    let data = vec![TreeEntry::new(0).set("main", "z"), TreeEntry::new(1).set("main", "a")];
    let tree = IndexedTree::build(
        data,
        "main",
        &[TreeId::Int(0), TreeId::Int(1)],
        None,
        Some(Sorter::new(|a, b| a["main"].compare(&b["main"]))),
    )
    .unwrap();

    let names: Vec<_> = tree.get_roots().iter().map(|&r| main_of(&tree, r)).collect();
    assert_eq!(names, vec!["z", "a"]);
}

#[test]
fn test_reversed_sorter() {
    let sorter = Sorter::by_column("n").reversed();
    let low = TreeEntry::new(0).set("n", 1);
    let high = TreeEntry::new(1).set("n", 2);
    assert_eq!(sorter.compare(&low.data, &high.data), Ordering::Greater);
}

// =============================================================================
// Sharing and deep trees
// =============================================================================

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn test_threads_resolve_identical_children() {
    assert_send_sync::<IndexedTree>();

    // 200 children, each pointing back at the root.
    let mut root = TreeEntry::new(0).set("main", "root");
    let mut data = Vec::new();
    for i in 1..=200i64 {
        root = root.child(i);
        data.push(TreeEntry::new(i).set("main", i).child(0));
    }
    data.insert(0, root);
    let tree = Arc::new(build(data, &[TreeId::Int(0)]));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let tree = Arc::clone(&tree);
            thread::spawn(move || {
                let root = tree.get_roots()[0];
                let children = tree.get_children(root);
                let grandchildren: Vec<Vec<NodeIndex>> =
                    children.iter().map(|&c| tree.get_children(c)).collect();
                (children, grandchildren)
            })
        })
        .collect();
    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    for result in &results[1..] {
        assert_eq!(result, &results[0]);
    }
    assert_eq!(tree.len(), 401);
    for grandchildren in &results[0].1 {
        assert_eq!(grandchildren.len(), 1);
        assert!(tree.is_cycle(grandchildren[0]));
    }
}

#[test]
fn test_deep_chain_paths() {
    const DEPTH: i64 = 5000;
    let data: Vec<TreeEntry> = (0..DEPTH)
        .map(|i| {
            let entry = TreeEntry::new(i).set("main", i);
            if i + 1 < DEPTH { entry.child(i + 1) } else { entry }
        })
        .collect();
    let tree = build(data, &[TreeId::Int(0)]);

    let mut node = tree.get_roots()[0];
    while let Some(&child) = tree.get_children(node).first() {
        node = child;
    }
    assert_eq!(tree.get_depth(node), Some(DEPTH as usize - 1));
    assert_eq!(tree.len(), DEPTH as usize);

    let path = tree.get_path(node);
    assert_eq!(path.len(), DEPTH as usize);
    assert_eq!(path[0].id, TreeId::Int(0));
    assert_eq!(path[path.len() - 1].id, TreeId::Int(DEPTH - 1));
    assert!(!tree.is_cycle(node));
}

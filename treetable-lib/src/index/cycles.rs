//! Entries that can repeat on their own root path.

use std::collections::HashMap;

use crate::model::{TreeEntry, TreeId};

const UNVISITED: usize = usize::MAX;

/// Marks every entry position that lies on a cycle of the child graph.
///
/// An id can only show up twice on one root path if it reaches itself, so
/// these are the only ids the per-branch seen sets need to carry. Children
/// without an entry are skipped.
pub(super) fn cyclic_entries(entries: &[TreeEntry], lookup: &HashMap<TreeId, usize>) -> Vec<bool> {
    let n = entries.len();
    let mut order = vec![UNVISITED; n];
    let mut low = vec![0; n];
    let mut on_stack = vec![false; n];
    let mut stack = Vec::new();
    let mut cyclic = vec![false; n];
    let mut next = 0;

    // Tarjan's strongly connected components, with an explicit call stack of
    // (entry, next child to visit).
    for start in 0..n {
        if order[start] != UNVISITED {
            continue;
        }
        order[start] = next;
        low[start] = next;
        next += 1;
        stack.push(start);
        on_stack[start] = true;
        let mut calls = vec![(start, 0usize)];

        while let Some(frame) = calls.last_mut() {
            let v = frame.0;
            if let Some(child_id) = entries[v].children.get(frame.1) {
                frame.1 += 1;
                let Some(&w) = lookup.get(child_id) else {
                    continue;
                };
                if w == v {
                    cyclic[v] = true;
                }
                if order[w] == UNVISITED {
                    order[w] = next;
                    low[w] = next;
                    next += 1;
                    stack.push(w);
                    on_stack[w] = true;
                    calls.push((w, 0));
                } else if on_stack[w] {
                    low[v] = low[v].min(order[w]);
                }
                continue;
            }

            calls.pop();
            if let Some(&(parent, _)) = calls.last() {
                low[parent] = low[parent].min(low[v]);
            }
            if low[v] == order[v] {
                let mut component = Vec::new();
                while let Some(w) = stack.pop() {
                    on_stack[w] = false;
                    component.push(w);
                    if w == v {
                        break;
                    }
                }
                if component.len() > 1 {
                    for w in component {
                        cyclic[w] = true;
                    }
                }
            }
        }
    }
    cyclic
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(entries: &[TreeEntry]) -> HashMap<TreeId, usize> {
        entries
            .iter()
            .enumerate()
            .map(|(position, entry)| (entry.id.clone(), position))
            .collect()
    }

    #[test]
    fn test_chain_has_no_cycles() {
        let data = vec![
            TreeEntry::new(1).child(2),
            TreeEntry::new(2).child(3),
            TreeEntry::new(3),
        ];
        assert_eq!(cyclic_entries(&data, &lookup(&data)), [false, false, false]);
    }

    #[test]
    fn test_loop_and_self_reference() {
        let data = vec![
            TreeEntry::new("a").child("b"),
            TreeEntry::new("b").with_children(["c", "a"]),
            TreeEntry::new("c"),
            TreeEntry::new("d").child("d"),
            TreeEntry::new("e").child("missing"),
        ];
        assert_eq!(
            cyclic_entries(&data, &lookup(&data)),
            [true, true, false, true, false]
        );
    }

    #[test]
    fn test_shared_child_is_not_a_cycle() {
        let data = vec![
            TreeEntry::new(1).with_children([2, 3]),
            TreeEntry::new(2).child(4),
            TreeEntry::new(3).child(4),
            TreeEntry::new(4),
        ];
        assert!(cyclic_entries(&data, &lookup(&data)).iter().all(|c| !c));
    }
}

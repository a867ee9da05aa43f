//! Chain queries used to draw the heap
//!
//! - [`build_chain`]: follow `next` links from one address, stopping on null,
//!   a missing node, or a revisit (tagged as [`ChainLink::Cycle`])
//! - [`find_head`]: guess which stack-referenced node starts the list
//! - [`variables_at`]: every variable aliasing a given address
//! - [`heap_layout`]: split the whole heap into chains so every node is drawn once
//!
//! Head inference is a heuristic. A node with no incoming `next` is taken as
//! a head; when every referenced node sits on a cycle, or there are several
//! disjoint lists, the result is simply the first candidate in declaration
//! order and may not be the list the author had in mind.

use crate::memory::{heap::Heap, stack::Stack, Address};
use crate::snapshot::MemorySnapshot;
use rustc_hash::FxHashSet;
use serde::Serialize;

/// One element of a linearized chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "address", rename_all = "camelCase")]
pub enum ChainLink {
    Node(Address),
    /// Link back to a node already on this chain
    Cycle(Address),
    /// Link into a node already drawn on an earlier chain
    Joins(Address),
}

impl ChainLink {
    pub fn address(self) -> Address {
        match self {
            ChainLink::Node(addr) | ChainLink::Cycle(addr) | ChainLink::Joins(addr) => addr,
        }
    }
}

/// Walk `next` links starting at `start`
///
/// Terminates after at most `heap.len() + 1` links even on a fully cyclic heap.
pub fn build_chain(heap: &Heap, start: Address) -> Vec<ChainLink> {
    walk(heap, start, &mut FxHashSet::default(), &FxHashSet::default())
}

/// Walk from `start`, marking nodes in `visited`; stop on revisits and on
/// nodes listed in `placed` (drawn by an earlier chain).
fn walk(
    heap: &Heap,
    start: Address,
    visited: &mut FxHashSet<Address>,
    placed: &FxHashSet<Address>,
) -> Vec<ChainLink> {
    let mut chain = Vec::new();
    let mut current = Some(start);

    while let Some(addr) = current {
        let Some(node) = heap.get(addr) else {
            break;
        };
        if placed.contains(&addr) {
            chain.push(ChainLink::Joins(addr));
            break;
        }
        if !visited.insert(addr) {
            chain.push(ChainLink::Cycle(addr));
            break;
        }
        chain.push(ChainLink::Node(addr));
        current = node.next;
    }

    chain
}

/// Infer the list head among the addresses held by stack variables
pub fn find_head(state: &MemorySnapshot) -> Option<Address> {
    let referenced: Vec<Address> = state.stack.iter().filter_map(|(_, addr)| addr).collect();

    referenced
        .iter()
        .copied()
        .find(|addr| !state.heap.has_incoming(*addr))
        .or_else(|| referenced.first().copied())
}

/// Variables bound to `address`, in declaration order
pub fn variables_at(stack: &Stack, address: Address) -> Vec<&str> {
    stack
        .iter()
        .filter(|(_, addr)| *addr == Some(address))
        .map(|(name, _)| name)
        .collect()
}

/// Partition the heap into chains for display
///
/// Order: the inferred head's chain, then chains from the remaining
/// stack-referenced nodes, then nodes nothing on the stack reaches (entry
/// points without incoming links first, then leftover cycles). Each node
/// appears as [`ChainLink::Node`] exactly once across the layout.
pub fn heap_layout(state: &MemorySnapshot) -> Vec<Vec<ChainLink>> {
    let mut roots: Vec<Address> = Vec::new();
    roots.extend(find_head(state));
    roots.extend(state.stack.iter().filter_map(|(_, addr)| addr));

    let mut unreferenced: Vec<Address> = state.heap.iter().map(|(addr, _)| addr).collect();
    // Stable partition: heads of stale chains before nodes only reachable via cycles
    unreferenced.sort_by_key(|addr| state.heap.has_incoming(*addr));
    roots.extend(unreferenced);

    let mut placed = FxHashSet::default();
    let mut layout = Vec::new();

    for root in roots {
        if placed.contains(&root) || !state.heap.contains(root) {
            continue;
        }
        let mut visited = FxHashSet::default();
        let chain = walk(&state.heap, root, &mut visited, &placed);
        placed.extend(visited);
        layout.push(chain);
    }

    layout
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::heap::HeapNode;

    fn linked(heap: &mut Heap, from: Address, to: Option<Address>, value: i32) {
        heap.insert(from, HeapNode { value, next: to });
    }

    #[test]
    fn test_build_chain_straight() {
        let (a, b, c) = (Address::minted(0), Address::minted(1), Address::minted(2));
        let mut heap = Heap::new();
        linked(&mut heap, a, Some(b), 1);
        linked(&mut heap, b, Some(c), 2);
        linked(&mut heap, c, None, 3);

        assert_eq!(
            build_chain(&heap, a),
            vec![ChainLink::Node(a), ChainLink::Node(b), ChainLink::Node(c)]
        );
    }

    #[test]
    fn test_build_chain_two_cycle() {
        let (a, b) = (Address::minted(0), Address::minted(1));
        let mut heap = Heap::new();
        linked(&mut heap, a, Some(b), 1);
        linked(&mut heap, b, Some(a), 2);

        let chain = build_chain(&heap, a);
        assert_eq!(
            chain,
            vec![ChainLink::Node(a), ChainLink::Node(b), ChainLink::Cycle(a)]
        );
        assert!(chain.len() <= heap.len() + 1);
    }

    #[test]
    fn test_build_chain_self_loop() {
        let a = Address::minted(0);
        let mut heap = Heap::new();
        linked(&mut heap, a, Some(a), 1);

        assert_eq!(build_chain(&heap, a), vec![ChainLink::Node(a), ChainLink::Cycle(a)]);
    }

    #[test]
    fn test_build_chain_from_missing_address() {
        assert!(build_chain(&Heap::new(), Address::minted(7)).is_empty());
    }

    #[test]
    fn test_find_head_skips_pointed_into_nodes() {
        let (a, b) = (Address::minted(0), Address::minted(1));
        let mut state = MemorySnapshot::empty();
        linked(&mut state.heap, a, Some(b), 1);
        linked(&mut state.heap, b, None, 2);
        state.stack.bind("tail", Some(b));
        state.stack.bind("head", Some(a));

        assert_eq!(find_head(&state), Some(a));
    }

    #[test]
    fn test_find_head_falls_back_on_cycle() {
        let (a, b) = (Address::minted(0), Address::minted(1));
        let mut state = MemorySnapshot::empty();
        linked(&mut state.heap, a, Some(b), 1);
        linked(&mut state.heap, b, Some(a), 2);
        state.stack.bind("second", Some(b));
        state.stack.bind("first", Some(a));

        assert_eq!(find_head(&state), Some(b));
    }

    #[test]
    fn test_find_head_empty() {
        let mut state = MemorySnapshot::empty();
        assert_eq!(find_head(&state), None);

        state.stack.bind("n", None);
        assert_eq!(find_head(&state), None);
    }

    #[test]
    fn test_variables_at_in_declaration_order() {
        let (a, b) = (Address::minted(0), Address::minted(1));
        let mut stack = Stack::new();
        stack.bind("head", Some(a));
        stack.bind("other", Some(b));
        stack.bind("first", Some(a));

        assert_eq!(variables_at(&stack, a), vec!["head", "first"]);
        assert!(variables_at(&stack, Address::minted(9)).is_empty());
    }

    #[test]
    fn test_layout_places_every_node_once() {
        let (a, b, c, d) = (
            Address::minted(0),
            Address::minted(1),
            Address::minted(2),
            Address::minted(3),
        );
        let mut state = MemorySnapshot::empty();
        linked(&mut state.heap, a, Some(b), 1);
        linked(&mut state.heap, b, None, 2);
        linked(&mut state.heap, c, Some(b), 3); // joins a's chain
        linked(&mut state.heap, d, None, 4); // stale
        state.stack.bind("head", Some(a));
        state.stack.bind("side", Some(c));

        let layout = heap_layout(&state);
        assert_eq!(
            layout,
            vec![
                vec![ChainLink::Node(a), ChainLink::Node(b)],
                vec![ChainLink::Node(c), ChainLink::Joins(b)],
                vec![ChainLink::Node(d)],
            ]
        );
    }

    #[test]
    fn test_layout_includes_unreachable_cycle() {
        let (a, b) = (Address::minted(0), Address::minted(1));
        let mut state = MemorySnapshot::empty();
        linked(&mut state.heap, a, Some(b), 1);
        linked(&mut state.heap, b, Some(a), 2);

        let layout = heap_layout(&state);
        assert_eq!(
            layout,
            vec![vec![ChainLink::Node(a), ChainLink::Node(b), ChainLink::Cycle(a)]]
        );
    }
}

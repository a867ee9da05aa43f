//! Heap of list nodes
//!
//! Every node is created by exactly one `CreateNode` step and is never
//! removed. There is no `free` and no collection: a node whose last
//! reference goes away stays in the heap as a stale entry.

use super::Address;
use rustc_hash::FxHashMap;
use serde::{ser::SerializeMap, Serialize, Serializer};

/// A single `Node` object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HeapNode {
    #[serde(rename = "integerValue")]
    pub value: i32,
    #[serde(rename = "nextAddress")]
    pub next: Option<Address>,
}

impl HeapNode {
    pub fn new(value: i32) -> Self {
        HeapNode { value, next: None }
    }
}

/// The heap
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Heap {
    nodes: FxHashMap<Address, HeapNode>,
}

impl Heap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a freshly minted node
    pub fn insert(&mut self, addr: Address, node: HeapNode) {
        self.nodes.insert(addr, node);
    }

    /// Get a node by address
    pub fn get(&self, addr: Address) -> Option<&HeapNode> {
        self.nodes.get(&addr)
    }

    /// Get a mutable node by address
    pub fn get_mut(&mut self, addr: Address) -> Option<&mut HeapNode> {
        self.nodes.get_mut(&addr)
    }

    pub fn contains(&self, addr: Address) -> bool {
        self.nodes.contains_key(&addr)
    }

    /// Number of nodes ever created
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes in mint order (for UI display)
    pub fn iter(&self) -> impl Iterator<Item = (Address, &HeapNode)> {
        let mut entries: Vec<_> = self.nodes.iter().map(|(addr, node)| (*addr, node)).collect();
        entries.sort_by_key(|(addr, _)| *addr);
        entries.into_iter()
    }

    /// Whether some node's `next` points at `addr`
    pub fn has_incoming(&self, addr: Address) -> bool {
        self.nodes.values().any(|node| node.next == Some(addr))
    }
}

impl Serialize for Heap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.nodes.len()))?;
        for (addr, node) in self.iter() {
            map.serialize_entry(&addr, node)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iter_is_in_mint_order() {
        let mut heap = Heap::new();
        for counter in (0..5).rev() {
            heap.insert(Address::minted(counter), HeapNode::new(counter as i32));
        }

        let values: Vec<i32> = heap.iter().map(|(_, node)| node.value).collect();
        assert_eq!(values, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_has_incoming() {
        let mut heap = Heap::new();
        let a = Address::minted(0);
        let b = Address::minted(1);
        heap.insert(a, HeapNode { value: 1, next: Some(b) });
        heap.insert(b, HeapNode::new(2));

        assert!(heap.has_incoming(b));
        assert!(!heap.has_incoming(a));
    }
}

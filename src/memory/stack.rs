//! Variable slots
//!
//! The visualized programs have a single frame, so the stack is one flat
//! set of `Node` variables. Each slot holds an [`Address`] or null.
//! Declaration order is tracked so aliases and head inference are
//! deterministic.

use super::Address;
use rustc_hash::FxHashMap;
use serde::{ser::SerializeMap, Serialize, Serializer};

/// The variable slots of the program
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stack {
    slots: FxHashMap<String, Option<Address>>,
    insertion_order: Vec<String>, // Track order of first binding
}

impl Stack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind or rebind a variable
    ///
    /// Rebinding keeps the variable's original position in declaration order.
    pub fn bind(&mut self, name: &str, addr: Option<Address>) {
        match self.slots.get_mut(name) {
            Some(slot) => *slot = addr,
            None => {
                self.insertion_order.push(name.to_string());
                self.slots.insert(name.to_string(), addr);
            }
        }
    }

    /// The address a variable holds; `None` when unbound or null
    pub fn address_of(&self, name: &str) -> Option<Address> {
        self.slots.get(name).copied().flatten()
    }

    /// Whether the variable has ever been bound (even to null)
    pub fn is_bound(&self, name: &str) -> bool {
        self.slots.contains_key(name)
    }

    /// Variables and their slots in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<Address>)> {
        self.insertion_order
            .iter()
            .map(|name| (name.as_str(), self.slots.get(name).copied().flatten()))
    }

    pub fn len(&self) -> usize {
        self.insertion_order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.insertion_order.is_empty()
    }
}

impl Serialize for Stack {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (name, addr) in self.iter() {
            map.serialize_entry(name, &addr)?;
        }
        map.end()
    }
}

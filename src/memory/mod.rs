//! Memory model for the list visualizer
//!
//! This module provides the core memory abstractions:
//! - [`Address`]: Opaque label identifying one heap node
//! - [`stack`]: Variable slots holding an address or null
//! - [`heap`]: Nodes keyed by address, each with an `int` value and a `next` link
//!
//! # Addresses
//!
//! Addresses are minted from a monotonically increasing counter and never
//! reused, even when a node becomes unreachable. Nothing is garbage
//! collected, so the UI can keep showing stale nodes.
//!
//! ```text
//! counter 0 → 0x1000
//! counter 1 → 0x1010
//! counter n → 0x1000 + n * 0x10
//! ```

pub mod heap;
pub mod stack;

use crate::interpreter::constants::{HEAP_ADDRESS_START, NODE_ADDRESS_STRIDE};
use serde::{Serialize, Serializer};
use std::fmt;

/// Heap node address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address(u64);

impl Address {
    /// The address minted when the counter reads `counter`
    pub fn minted(counter: u64) -> Self {
        Address(HEAP_ADDRESS_START + counter * NODE_ADDRESS_STRIDE)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:04x}", self.0)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

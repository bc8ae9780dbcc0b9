//! Node identifiers.
//!
//! This module provides the [`NodeId`] type used to reference nodes inside a
//! [`Tree`](crate::tree::Tree) and the [`IdAllocator`] that hands them out.
//!
//! Nodes never hold references to each other; parents, children and history
//! entries all store ids, which stay valid across undo and redo.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identifier of a diagram node.
///
/// Ids are assigned when a node is created and are never handed out again,
/// even after the node is deleted. A node brought back by undo keeps the id it
/// had before.
///
/// # Examples
///
/// ```
/// use arbor_core::identifier::NodeId;
///
/// let id = NodeId::new(7);
/// assert_eq!(id.value(), 7);
/// assert_eq!(id.to_string(), "#7");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(u64);

impl NodeId {
    /// Creates an id from its raw numeric value.
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw numeric value of the id.
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u64> for NodeId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// Monotonic source of fresh [`NodeId`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    /// Creates an allocator whose first id is `#0`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the next unused id and advances the allocator.
    pub fn allocate(&mut self) -> NodeId {
        let id = NodeId(self.next);
        self.next += 1;
        id
    }

    /// Makes sure `id` will never be returned by [`allocate`](Self::allocate).
    pub fn reserve(&mut self, id: NodeId) {
        self.next = self.next.max(id.0 + 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocator_is_monotonic() {
        let mut ids = IdAllocator::new();
        let a = ids.allocate();
        let b = ids.allocate();
        assert_eq!(a, NodeId::new(0));
        assert_eq!(b, NodeId::new(1));
        assert!(a < b);
    }

    #[test]
    fn test_allocator_reserve() {
        let mut ids = IdAllocator::new();
        ids.reserve(NodeId::new(41));
        assert_eq!(ids.allocate(), NodeId::new(42));

        // Reserving an id below the watermark changes nothing
        ids.reserve(NodeId::new(3));
        assert_eq!(ids.allocate(), NodeId::new(43));
    }

    #[test]
    fn test_node_id_display() {
        assert_eq!(NodeId::from(12).to_string(), "#12");
    }
}

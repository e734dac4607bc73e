//! Index handles, adjacency direction, and id hashing.

use std::fmt;
use std::hash::Hasher;

use rustc_hash::FxHasher;

/// Position of a graph within its [`Library`](crate::Library).
///
/// Indices are short-lived handles: deleting a graph shifts every later
/// graph down by one, invalidating indices obtained earlier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GraphIdx(pub(crate) u32);

impl GraphIdx {
    pub fn new(idx: u32) -> Self {
        GraphIdx(idx)
    }

    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for GraphIdx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GraphIdx({})", self.0)
    }
}

impl From<u32> for GraphIdx {
    fn from(idx: u32) -> Self {
        GraphIdx(idx)
    }
}

/// Position of a node within its [`Graph`](crate::Graph).
///
/// Node deletion renumbers every later node, so a held index is only valid
/// until the next structural mutation of the same graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIdx(pub(crate) u32);

impl NodeIdx {
    pub fn new(idx: u32) -> Self {
        NodeIdx(idx)
    }

    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeIdx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeIdx({})", self.0)
    }
}

impl From<u32> for NodeIdx {
    fn from(idx: u32) -> Self {
        NodeIdx(idx)
    }
}

/// Position of an edge within its [`Graph`](crate::Graph).
///
/// Same invalidation rules as [`NodeIdx`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeIdx(pub(crate) u32);

impl EdgeIdx {
    pub fn new(idx: u32) -> Self {
        EdgeIdx(idx)
    }

    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for EdgeIdx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EdgeIdx({})", self.0)
    }
}

impl From<u32> for EdgeIdx {
    fn from(idx: u32) -> Self {
        EdgeIdx(idx)
    }
}

/// Which side of a node's adjacency to look at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dir {
    /// Incoming edges only.
    In,
    /// Outgoing edges only.
    Out,
    /// Incoming then outgoing.
    Any,
}

/// Hash an id or metadata key.
///
/// Lookups compare the stored hash first and fall back to full string
/// equality, so a collision costs one extra comparison, never a wrong match.
pub(crate) fn id_hash(text: &str) -> u64 {
    let mut hasher = FxHasher::default();
    hasher.write(text.as_bytes());
    hasher.finish()
}

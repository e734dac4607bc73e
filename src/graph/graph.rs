//! A single named directed graph and its mutation engine.
//!
//! All structural changes go through [`Graph`] methods so that id
//! uniqueness and the adjacency caches are maintained atomically. Deletion
//! compacts the node/edge arrays in place, which renumbers every later
//! position — both the caches and edge endpoints are repaired as part of
//! the same call.

use std::any::Any;

use super::edge::Edge;
use super::metadata::MetaStore;
use super::node::Node;
use super::types::{id_hash, EdgeIdx, NodeIdx};

/// A named directed graph: nodes, edges, and graph-level metadata.
#[derive(Debug)]
pub struct Graph {
    pub(crate) id: String,
    pub(crate) id_hash: u64,
    pub(crate) nodes: Vec<Node>,
    pub(crate) edges: Vec<Edge>,

    /// Metadata for the graph itself.
    pub data: MetaStore,
}

impl Graph {
    pub(crate) fn new(id: &str) -> Self {
        Graph {
            id: id.to_string(),
            id_hash: id_hash(id),
            nodes: Vec::new(),
            edges: Vec::new(),
            data: MetaStore::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    // ── Nodes ──────────────────────────────────────────

    /// Append a new node with the given id.
    ///
    /// # Panics
    ///
    /// The id must not already exist in this graph. Check
    /// [`find_node`](Self::find_node) first when uniqueness is not already
    /// guaranteed by construction.
    pub fn add_node(&mut self, id: &str) -> NodeIdx {
        assert!(
            self.find_node(id).is_none(),
            "duplicate node id {id:?} in graph {:?}",
            self.id
        );
        self.nodes.push(Node::new(id));
        NodeIdx((self.nodes.len() - 1) as u32)
    }

    /// Position of the node with this id, or `None`.
    pub fn find_node(&self, id: &str) -> Option<NodeIdx> {
        let hash = id_hash(id);
        self.nodes
            .iter()
            .position(|n| n.id_hash == hash && n.id == id)
            .map(|i| NodeIdx(i as u32))
    }

    /// Node with this id, or `None`.
    pub fn get_node(&self, id: &str) -> Option<&Node> {
        self.find_node(id).map(|idx| &self.nodes[idx.as_usize()])
    }

    pub fn get_node_mut(&mut self, id: &str) -> Option<&mut Node> {
        self.find_node(id)
            .map(|idx| &mut self.nodes[idx.as_usize()])
    }

    pub fn node(&self, idx: NodeIdx) -> &Node {
        &self.nodes[idx.as_usize()]
    }

    pub fn node_mut(&mut self, idx: NodeIdx) -> &mut Node {
        &mut self.nodes[idx.as_usize()]
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// All nodes in position order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Remove a node and every edge touching it.
    ///
    /// Node positions after `idx` shift down by one, and the edge array is
    /// compacted as touching edges are removed; any index held across this
    /// call is invalidated.
    ///
    /// # Panics
    ///
    /// `idx` must be in range.
    pub fn delete_node(&mut self, idx: NodeIdx) {
        assert!(
            idx.as_usize() < self.nodes.len(),
            "node index out of range: {idx}"
        );

        // Edges touching the node go away entirely (fixing the surviving
        // endpoint's cache); the rest are renumbered for the compaction
        // below. Deleting edge e shifts the array, so e is re-examined.
        let mut e = 0;
        while e < self.edges.len() {
            if self.edges[e].start == idx || self.edges[e].end == idx {
                self.delete_edge(EdgeIdx(e as u32));
            } else {
                if self.edges[e].start > idx {
                    self.edges[e].start.0 -= 1;
                }
                if self.edges[e].end > idx {
                    self.edges[e].end.0 -= 1;
                }
                e += 1;
            }
        }

        self.nodes.remove(idx.as_usize());
    }

    /// [`delete_node`](Self::delete_node) by id. Returns false when the id
    /// is unknown.
    pub fn delete_node_by_id(&mut self, id: &str) -> bool {
        match self.find_node(id) {
            Some(idx) => {
                self.delete_node(idx);
                true
            }
            None => false,
        }
    }

    // ── Edges ──────────────────────────────────────────

    /// Append a directed edge and register it in both endpoints' adjacency
    /// caches. Parallel edges between the same pair are allowed.
    ///
    /// # Panics
    ///
    /// Both endpoints must be in range and distinct (no self-loops).
    pub fn add_edge(&mut self, start: NodeIdx, end: NodeIdx) -> EdgeIdx {
        assert!(
            start.as_usize() < self.nodes.len() && end.as_usize() < self.nodes.len(),
            "edge endpoint out of range: {start} -> {end}"
        );
        assert!(start != end, "self-loop rejected on node {start}");

        self.edges.push(Edge::new(start, end));
        let idx = EdgeIdx((self.edges.len() - 1) as u32);

        self.nodes[start.as_usize()].out_edges.push(idx);
        self.nodes[end.as_usize()].in_edges.push(idx);
        idx
    }

    pub fn edge(&self, idx: EdgeIdx) -> &Edge {
        &self.edges[idx.as_usize()]
    }

    pub fn edge_mut(&mut self, idx: EdgeIdx) -> &mut Edge {
        &mut self.edges[idx.as_usize()]
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// All edges in position order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Remove an edge and scrub it from both endpoints' adjacency caches.
    ///
    /// Edge positions after `idx` shift down by one; cached indices past it
    /// are decremented to match.
    ///
    /// # Panics
    ///
    /// `idx` must be in range.
    pub fn delete_edge(&mut self, idx: EdgeIdx) {
        assert!(
            idx.as_usize() < self.edges.len(),
            "edge index out of range: {idx}"
        );
        self.edges.remove(idx.as_usize());

        for node in &mut self.nodes {
            node.in_edges.retain_mut(|e| {
                if *e == idx {
                    return false;
                }
                if *e > idx {
                    e.0 -= 1;
                }
                true
            });
            node.out_edges.retain_mut(|e| {
                if *e == idx {
                    return false;
                }
                if *e > idx {
                    e.0 -= 1;
                }
                true
            });
        }
    }

    // ── Typed payloads ─────────────────────────────────

    /// Typed payload for a node, created with `T::default()` on first
    /// access.
    pub fn node_payload<T: Default + Any>(&mut self, idx: NodeIdx) -> &mut T {
        self.nodes[idx.as_usize()].data.payload_or_default::<T>()
    }

    /// Typed payload for the node with this id, or `None` when the id is
    /// unknown.
    pub fn node_payload_by_id<T: Default + Any>(&mut self, id: &str) -> Option<&mut T> {
        let idx = self.find_node(id)?;
        Some(self.node_payload(idx))
    }

    /// Typed payload for an edge, created with `T::default()` on first
    /// access.
    pub fn edge_payload<T: Default + Any>(&mut self, idx: EdgeIdx) -> &mut T {
        self.edges[idx.as_usize()].data.payload_or_default::<T>()
    }
}

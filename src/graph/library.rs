//! Top-level container: an ordered collection of named graphs.

use super::graph::Graph;
use super::metadata::MetaStore;
use super::types::{id_hash, GraphIdx};

/// An ordered collection of named [`Graph`]s plus library-level metadata.
///
/// The library is the unit of load/save for a whole file. Graph order is
/// insertion order and carries no meaning, but it is preserved by the
/// codec.
#[derive(Debug, Default)]
pub struct Library {
    graphs: Vec<Graph>,

    /// Metadata for the library itself (pairs before any graph marker in
    /// the file).
    pub data: MetaStore,
}

impl Library {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new empty graph with the given id.
    ///
    /// # Panics
    ///
    /// The id must not already exist in this library. Check
    /// [`find_graph`](Self::find_graph) first when uniqueness is not
    /// already guaranteed by construction.
    pub fn add_graph(&mut self, id: &str) -> GraphIdx {
        assert!(
            self.find_graph(id).is_none(),
            "duplicate graph id {id:?} in library"
        );
        self.graphs.push(Graph::new(id));
        GraphIdx((self.graphs.len() - 1) as u32)
    }

    /// Position of the graph with this id, or `None`.
    pub fn find_graph(&self, id: &str) -> Option<GraphIdx> {
        let hash = id_hash(id);
        self.graphs
            .iter()
            .position(|g| g.id_hash == hash && g.id == id)
            .map(|i| GraphIdx(i as u32))
    }

    /// Graph with this id, or `None`.
    pub fn get(&self, id: &str) -> Option<&Graph> {
        self.find_graph(id).map(|idx| &self.graphs[idx.as_usize()])
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Graph> {
        self.find_graph(id)
            .map(|idx| &mut self.graphs[idx.as_usize()])
    }

    pub fn graph(&self, idx: GraphIdx) -> &Graph {
        &self.graphs[idx.as_usize()]
    }

    pub fn graph_mut(&mut self, idx: GraphIdx) -> &mut Graph {
        &mut self.graphs[idx.as_usize()]
    }

    pub fn graph_count(&self) -> usize {
        self.graphs.len()
    }

    /// All graphs in position order.
    pub fn graphs(&self) -> &[Graph] {
        &self.graphs
    }

    pub fn graphs_mut(&mut self) -> &mut [Graph] {
        &mut self.graphs
    }

    /// Remove a graph and everything it owns.
    ///
    /// Graph positions after `idx` shift down by one.
    ///
    /// # Panics
    ///
    /// `idx` must be in range.
    pub fn delete_graph(&mut self, idx: GraphIdx) {
        assert!(
            idx.as_usize() < self.graphs.len(),
            "graph index out of range: {idx}"
        );
        self.graphs.remove(idx.as_usize());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_find_graph() {
        let mut lib = Library::new();
        let g = lib.add_graph("main");
        lib.add_graph("aux");

        assert_eq!(lib.find_graph("main"), Some(g));
        assert_eq!(lib.find_graph("missing"), None);
        assert_eq!(lib.graph(g).id(), "main");
        assert_eq!(lib.graph_count(), 2);
    }

    #[test]
    #[should_panic(expected = "duplicate graph id")]
    fn test_duplicate_graph_id_panics() {
        let mut lib = Library::new();
        lib.add_graph("main");
        lib.add_graph("main");
    }

    #[test]
    fn test_get_by_id() {
        let mut lib = Library::new();
        lib.add_graph("main");
        lib.get_mut("main").unwrap().add_node("a");

        assert_eq!(lib.get("main").unwrap().node_count(), 1);
        assert!(lib.get("other").is_none());
    }

    #[test]
    fn test_delete_graph_shifts_later_graphs() {
        let mut lib = Library::new();
        lib.add_graph("one");
        lib.add_graph("two");
        lib.add_graph("three");

        lib.delete_graph(GraphIdx::new(0));
        assert_eq!(lib.graph_count(), 2);
        assert_eq!(lib.find_graph("one"), None);
        assert_eq!(lib.find_graph("two"), Some(GraphIdx::new(0)));
        assert_eq!(lib.find_graph("three"), Some(GraphIdx::new(1)));
    }

    #[test]
    fn test_library_metadata() {
        let mut lib = Library::new();
        lib.data.add("version", "4");
        assert_eq!(lib.data.get("version"), Some("4"));
    }
}

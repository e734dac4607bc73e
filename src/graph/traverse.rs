//! Adjacency queries and connectivity walks.

use rustc_hash::FxHashSet;

use super::edge::Edge;
use super::graph::Graph;
use super::types::{Dir, NodeIdx};

impl Graph {
    /// Edges touching `idx` on the given side, in cache order.
    pub fn edges_of(&self, idx: NodeIdx, dir: Dir) -> impl Iterator<Item = &Edge> + '_ {
        let node = self.node(idx);
        let empty: &[_] = &[];
        let (first, second) = match dir {
            Dir::In => (node.in_edges(), empty),
            Dir::Out => (node.out_edges(), empty),
            Dir::Any => (node.in_edges(), node.out_edges()),
        };
        first.iter().chain(second.iter()).map(move |&e| self.edge(e))
    }

    /// Positions of nodes adjacent to `idx` on the given side. Parallel
    /// edges yield the same neighbor more than once.
    pub fn neighbors(&self, idx: NodeIdx, dir: Dir) -> Vec<NodeIdx> {
        let node = self.node(idx);
        let mut result = Vec::new();
        if matches!(dir, Dir::In | Dir::Any) {
            result.extend(node.in_edges().iter().map(|&e| self.edge(e).start()));
        }
        if matches!(dir, Dir::Out | Dir::Any) {
            result.extend(node.out_edges().iter().map(|&e| self.edge(e).end()));
        }
        result
    }

    /// Number of edges touching `idx` on the given side.
    pub fn degree(&self, idx: NodeIdx, dir: Dir) -> usize {
        let node = self.node(idx);
        match dir {
            Dir::In => node.in_edges().len(),
            Dir::Out => node.out_edges().len(),
            Dir::Any => node.in_edges().len() + node.out_edges().len(),
        }
    }

    /// Walk incoming edges upstream from the seed nodes and collect every
    /// root (node with no incoming edges) found.
    pub fn find_roots(&self, of: &[NodeIdx]) -> Vec<NodeIdx> {
        let mut pending: Vec<NodeIdx> = of.to_vec();
        let mut seen = FxHashSet::default();
        let mut result = Vec::new();

        while let Some(idx) = pending.pop() {
            if !seen.insert(idx) {
                continue;
            }
            let node = self.node(idx);
            if node.in_edges().is_empty() {
                result.push(idx);
            } else {
                pending.extend(node.in_edges().iter().map(|&e| self.edge(e).start()));
            }
        }
        result
    }

    /// Every node connected to the seed set through any chain of edges,
    /// ignoring direction. Includes the seeds themselves.
    pub fn find_connected(&self, to: &[NodeIdx]) -> Vec<NodeIdx> {
        let mut seen = FxHashSet::default();
        let mut result = Vec::new();
        for &idx in to {
            if seen.insert(idx) {
                result.push(idx);
            }
        }

        let mut i = 0;
        while i < result.len() {
            let node = self.node(result[i]);
            for &e in node.in_edges() {
                let start = self.edge(e).start();
                if seen.insert(start) {
                    result.push(start);
                }
            }
            for &e in node.out_edges() {
                let end = self.edge(e).end();
                if seen.insert(end) {
                    result.push(end);
                }
            }
            i += 1;
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> Graph {
        // a -> b -> c, plus isolated d
        let mut graph = Graph::new("g");
        let a = graph.add_node("a");
        let b = graph.add_node("b");
        let c = graph.add_node("c");
        graph.add_node("d");
        graph.add_edge(a, b);
        graph.add_edge(b, c);
        graph
    }

    #[test]
    fn test_edges_of_directions() {
        let graph = chain();
        let b = graph.find_node("b").unwrap();

        assert_eq!(graph.edges_of(b, Dir::In).count(), 1);
        assert_eq!(graph.edges_of(b, Dir::Out).count(), 1);
        assert_eq!(graph.edges_of(b, Dir::Any).count(), 2);
    }

    #[test]
    fn test_neighbors() {
        let graph = chain();
        let a = graph.find_node("a").unwrap();
        let b = graph.find_node("b").unwrap();
        let c = graph.find_node("c").unwrap();

        assert_eq!(graph.neighbors(b, Dir::In), vec![a]);
        assert_eq!(graph.neighbors(b, Dir::Out), vec![c]);
        assert_eq!(graph.neighbors(b, Dir::Any), vec![a, c]);
        assert!(graph.neighbors(c, Dir::Out).is_empty());
    }

    #[test]
    fn test_degree() {
        let graph = chain();
        let b = graph.find_node("b").unwrap();
        let d = graph.find_node("d").unwrap();

        assert_eq!(graph.degree(b, Dir::Any), 2);
        assert_eq!(graph.degree(d, Dir::Any), 0);
    }

    #[test]
    fn test_find_roots() {
        let graph = chain();
        let a = graph.find_node("a").unwrap();
        let c = graph.find_node("c").unwrap();

        assert_eq!(graph.find_roots(&[c]), vec![a]);
        // A root is its own root
        assert_eq!(graph.find_roots(&[a]), vec![a]);
    }

    #[test]
    fn test_find_roots_terminates_on_cycle() {
        let mut graph = Graph::new("g");
        let a = graph.add_node("a");
        let b = graph.add_node("b");
        graph.add_edge(a, b);
        graph.add_edge(b, a);

        // A pure cycle has no roots
        assert!(graph.find_roots(&[a]).is_empty());
    }

    #[test]
    fn test_find_connected() {
        let graph = chain();
        let a = graph.find_node("a").unwrap();
        let d = graph.find_node("d").unwrap();

        let component = graph.find_connected(&[a]);
        assert_eq!(component.len(), 3);
        assert!(!component.contains(&d));

        assert_eq!(graph.find_connected(&[d]), vec![d]);
    }
}

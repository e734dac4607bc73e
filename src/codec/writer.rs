//! Model → text serialization.

use std::fmt::Write as _;
use std::path::Path;

use tracing::{debug, info};

use super::text::escape;
use super::CodecResult;
use crate::fields::{FieldScope, MetaCodec, Tables};
use crate::graph::{EdgeIdx, Graph, Library, MetaStore, NodeIdx};

/// Serialize a whole library: library metadata first, then every graph in
/// order. `tables` supplies optional field tables whose values are written
/// ahead of the remaining raw pairs.
pub fn save(lib: &Library, tables: &Tables) -> String {
    let mut out = String::new();

    for pair in lib.data.pairs() {
        let _ = writeln!(out, "{} {}", pair.key(), escape(pair.value()));
    }
    out.push('\n');

    for graph in lib.graphs() {
        write_graph(&mut out, graph, tables);
    }

    debug!(graphs = lib.graph_count(), bytes = out.len(), "saved library to text");
    out
}

/// Serialize a single graph block.
pub fn save_graph(graph: &Graph, tables: &Tables) -> String {
    let mut out = String::new();
    write_graph(&mut out, graph, tables);
    out
}

/// [`save`] straight to a file.
pub fn save_file(lib: &Library, path: impl AsRef<Path>, tables: &Tables) -> CodecResult<()> {
    let path = path.as_ref();
    let text = save(lib, tables);
    std::fs::write(path, &text)?;
    info!(path = %path.display(), bytes = text.len(), "saved library file");
    Ok(())
}

/// [`save_graph`] straight to a file.
pub fn save_graph_file(graph: &Graph, path: impl AsRef<Path>, tables: &Tables) -> CodecResult<()> {
    let path = path.as_ref();
    let text = save_graph(graph, tables);
    std::fs::write(path, &text)?;
    info!(path = %path.display(), bytes = text.len(), "saved graph file");
    Ok(())
}

fn write_graph(out: &mut String, graph: &Graph, tables: &Tables) {
    let _ = writeln!(out, "-g {}", graph.id());
    write_store(out, &graph.data, tables.graph, &FieldScope::graph(graph));

    out.push('\n');
    for (n, node) in graph.nodes().iter().enumerate() {
        let _ = writeln!(out, "-n {}", node.id());
        let scope = FieldScope::node(graph, NodeIdx::new(n as u32));
        write_store(out, &node.data, tables.node, &scope);
    }

    out.push('\n');
    for (e, edge) in graph.edges().iter().enumerate() {
        let _ = writeln!(
            out,
            "-e {}, {}",
            graph.node(edge.start()).id(),
            graph.node(edge.end()).id()
        );
        let scope = FieldScope::edge(graph, EdgeIdx::new(e as u32));
        write_store(out, &edge.data, tables.edge, &scope);
    }
}

/// Typed field values first (raw pairs for consumed keys no longer exist),
/// then whatever is still raw.
fn write_store(out: &mut String, store: &MetaStore, codec: Option<&dyn MetaCodec>, scope: &FieldScope) {
    if let Some(codec) = codec {
        codec.write_values(scope, store, &mut |key, value| {
            let _ = writeln!(out, "\t{} {}", key, escape(value));
        });
    }
    for pair in store.pairs() {
        let _ = writeln!(out, "\t{} {}", pair.key(), escape(pair.value()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_layout() {
        let mut lib = Library::new();
        lib.data.add("title", "demo");
        let g = lib.add_graph("main");
        let graph = lib.graph_mut(g);
        graph.data.add("kind", "flow");
        let a = graph.add_node("a");
        let b = graph.add_node("b");
        graph.node_mut(b).data.add("color", "red");
        let e = graph.add_edge(a, b);
        graph.edge_mut(e).data.add("weight", "2");

        let text = save(&lib, &Tables::default());
        assert_eq!(
            text,
            "title demo\n\
             \n\
             -g main\n\
             \tkind flow\n\
             \n\
             -n a\n\
             -n b\n\
             \tcolor red\n\
             \n\
             -e a, b\n\
             \tweight 2\n"
        );
    }

    #[test]
    fn test_save_escapes_values() {
        let mut lib = Library::new();
        lib.data.add("note", "two\nlines");

        let text = save(&lib, &Tables::default());
        assert!(text.starts_with("note \"two\nlines\"\n"));
    }

    #[test]
    fn test_save_graph_only() {
        let mut lib = Library::new();
        let g = lib.add_graph("solo");
        lib.graph_mut(g).add_node("a");

        let text = save_graph(lib.graph(g), &Tables::default());
        assert!(text.starts_with("-g solo\n"));
        assert!(text.contains("-n a\n"));
        assert!(!text.contains("title"));
    }
}

//! End-to-end round-trip coverage: build a library through the mutation
//! API, push it through the text codec, and make sure everything that went
//! in comes back out.

use graphfile::{codec, Dir, Library, NodeIdx, Tables};
use pretty_assertions::assert_eq;

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn demo_library() -> Library {
    let mut lib = Library::new();
    lib.data.add("title", "demo file");
    lib.data.add("revision", "3");

    let g = lib.add_graph("G");
    let graph = lib.graph_mut(g);
    let a = graph.add_node("A");
    let b = graph.add_node("B");
    let c = graph.add_node("C");
    graph.add_edge(a, b);
    graph.add_edge(a, c);
    graph.node_mut(b).data.add("note", "hello\nworld");
    lib
}

#[test]
fn round_trip_preserves_structure_and_metadata() {
    init_tracing();
    let lib = demo_library();
    let text = codec::save(&lib, &Tables::default());

    let mut reloaded = Library::new();
    let report = codec::load(&mut reloaded, &text);
    assert!(report.is_clean(), "{:?}", report.issues);

    assert_eq!(reloaded.data.get("title"), Some("demo file"));
    assert_eq!(reloaded.data.get("revision"), Some("3"));

    let graph = reloaded.get("G").expect("graph G survives");
    assert_eq!(graph.node_count(), 3);
    assert_eq!(graph.edge_count(), 2);

    let endpoints: Vec<(&str, &str)> = graph
        .edges()
        .iter()
        .map(|e| (graph.node(e.start()).id(), graph.node(e.end()).id()))
        .collect();
    assert_eq!(endpoints, vec![("A", "B"), ("A", "C")]);

    let b = graph.get_node("B").unwrap();
    assert_eq!(b.data.get("note"), Some("hello\nworld"));
}

#[test]
fn round_trip_is_stable_after_first_pass() {
    // save -> load -> save must reproduce the text exactly
    let lib = demo_library();
    let text = codec::save(&lib, &Tables::default());

    let mut reloaded = Library::new();
    codec::load(&mut reloaded, &text);
    let text2 = codec::save(&reloaded, &Tables::default());

    assert_eq!(text, text2);
}

#[test]
fn round_trip_hostile_metadata_values() {
    let mut lib = Library::new();
    let cases = [
        ("empty", ""),
        ("quotes", "she said \"no\""),
        ("backslash", "C:\\graph\\files"),
        ("both", "a \\ then \" then \n newline"),
        ("multiline", "one\ntwo\nthree"),
        ("leading_ws", "  indented"),
        ("crlf", "top\r\nbottom"),
    ];
    for (key, value) in cases {
        lib.data.add(key, value);
    }

    let text = codec::save(&lib, &Tables::default());
    let mut reloaded = Library::new();
    assert!(codec::load(&mut reloaded, &text).is_clean());

    for (key, value) in cases {
        assert_eq!(reloaded.data.get(key), Some(value), "key {key}");
    }
}

#[test]
fn deleting_a_node_renumbers_survivors() {
    let mut lib = demo_library();
    let graph = lib.get_mut("G").unwrap();

    // B sits at index 1 of 3; deleting it must drop A->B and pull C down
    let b = graph.find_node("B").unwrap();
    assert_eq!(b, NodeIdx::new(1));
    graph.delete_node(b);

    assert_eq!(graph.node_count(), 2);
    assert_eq!(graph.edge_count(), 1);
    assert_eq!(graph.find_node("C"), Some(NodeIdx::new(1)));

    let edge = &graph.edges()[0];
    assert_eq!(graph.node(edge.start()).id(), "A");
    assert_eq!(graph.node(edge.end()).id(), "C");

    // The adjacency caches agree with the renumbered arrays
    let a = graph.find_node("A").unwrap();
    let c = graph.find_node("C").unwrap();
    assert_eq!(graph.degree(a, Dir::Out), 1);
    assert_eq!(graph.degree(c, Dir::In), 1);
    assert_eq!(graph.neighbors(a, Dir::Out), vec![c]);

    // And the survivor still round-trips
    let text = codec::save(&lib, &Tables::default());
    let mut reloaded = Library::new();
    assert!(codec::load(&mut reloaded, &text).is_clean());
    assert_eq!(reloaded.get("G").unwrap().node_count(), 2);
}

#[test]
fn file_round_trip() {
    init_tracing();
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("demo.graph");

    let lib = demo_library();
    codec::save_file(&lib, &path, &Tables::default()).unwrap();

    let mut reloaded = Library::new();
    let report = codec::load_file(&mut reloaded, &path).unwrap();
    assert!(report.is_clean());
    assert_eq!(reloaded.get("G").unwrap().node_count(), 3);
}

#[test]
fn graph_file_round_trip() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("solo.graph");

    let lib = demo_library();
    codec::save_graph_file(lib.get("G").unwrap(), &path, &Tables::default()).unwrap();

    let mut reloaded = Library::new();
    assert!(codec::load_file(&mut reloaded, &path).unwrap().is_clean());
    // The graph block loads as a one-graph library with no library pairs
    assert_eq!(reloaded.graph_count(), 1);
    assert!(reloaded.data.is_empty());
    assert_eq!(reloaded.get("G").unwrap().edge_count(), 2);
}

#[test]
fn load_missing_file_is_an_error() {
    let mut lib = Library::new();
    assert!(codec::load_file(&mut lib, "/no/such/file.graph").is_err());
    assert_eq!(lib.graph_count(), 0);
}

#[test]
fn malformed_lines_do_not_stop_the_load() {
    let text = "-g main\n\
                -q mystery\n\
                -n a\n\
                -n b\n\
                -e a, missing\n\
                -e a, b\n";
    let mut lib = Library::new();
    let report = codec::load(&mut lib, text);

    assert_eq!(report.issues.len(), 2);
    let graph = lib.get("main").unwrap();
    assert_eq!(graph.node_count(), 2);
    assert_eq!(graph.edge_count(), 1);
}

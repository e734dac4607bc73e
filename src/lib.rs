//! # graphfile
//!
//! An embeddable store for named directed graphs.
//!
//! A [`Library`] owns any number of named [`Graph`]s; graphs own [`Node`]s
//! and directed [`Edge`]s. Every entity — the library included — carries an
//! ordered key/value metadata store ([`MetaStore`]). The whole collection
//! round-trips through a compact, human-readable text format
//! ([`codec::save`] / [`codec::load`]), and a [`FieldTable`] can project the
//! raw metadata onto a caller-defined record type field by field, so
//! application code works with typed data while unknown keys survive
//! save/load cycles untouched.
//!
//! Nodes and edges are addressed by position ([`NodeIdx`] / [`EdgeIdx`]).
//! Positions are short-lived handles: deleting a node or edge renumbers
//! everything after it, so treat any index held across a structural
//! mutation as invalidated.
//!
//! ## Example
//!
//! ```rust
//! use graphfile::{codec, Library, Tables};
//!
//! let mut lib = Library::new();
//! let g = lib.add_graph("deps");
//! let graph = lib.graph_mut(g);
//! let parser = graph.add_node("parser");
//! let lexer = graph.add_node("lexer");
//! graph.add_edge(parser, lexer);
//! graph.node_mut(lexer).data.add("note", "hand-rolled");
//!
//! let text = codec::save(&lib, &Tables::default());
//!
//! let mut reloaded = Library::new();
//! assert!(codec::load(&mut reloaded, &text).is_clean());
//! let graph = reloaded.get("deps").unwrap();
//! assert_eq!(graph.node_count(), 2);
//! assert_eq!(graph.get_node("lexer").unwrap().data.get("note"), Some("hand-rolled"));
//! ```

#![warn(clippy::all)]

pub mod codec;
pub mod fields;
pub mod graph;

// Re-export main types for convenience
pub use codec::{CodecError, IssueKind, LoadIssue, LoadReport};
pub use fields::{FieldScope, FieldTable, MetaCodec, Tables};
pub use graph::{Dir, Edge, EdgeIdx, Graph, GraphIdx, Library, MetaStore, Node, NodeIdx, Pair};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//! Text → model loading.
//!
//! Loading is best-effort: malformed lines are recorded in the returned
//! [`LoadReport`] and skipped, and everything that can be understood still
//! lands in the library. Callers that want strict validation check
//! [`LoadReport::is_clean`].

use std::path::Path;

use tracing::{debug, info, warn};

use super::text::{logical_lines, split_key_value, unescape};
use super::CodecResult;
use crate::graph::{EdgeIdx, GraphIdx, Library, NodeIdx};

/// What went wrong on one line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueKind {
    /// Marker type letter other than `g`/`n`/`e`.
    UnknownMarker(char),
    /// Marker line missing the space/tab separator after the type letter.
    BadSeparator,
    /// `-n`/`-e` marker before any `-g`.
    MarkerOutsideGraph,
    /// `-g` id already present; pairs merge into the existing graph.
    DuplicateGraph(String),
    /// `-n` id already present; pairs merge into the existing node.
    DuplicateNode(String),
    /// `-e` marker without the `start, end` comma form.
    MalformedEdge,
    /// Edge endpoint id with no matching node in the current graph.
    UnknownEndpoint(String),
    /// Edge with identical endpoints.
    SelfLoopEdge(String),
}

/// One recorded problem: 1-based source line plus what was wrong there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadIssue {
    pub line: usize,
    pub kind: IssueKind,
}

/// Outcome of a best-effort load.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub issues: Vec<LoadIssue>,
}

impl LoadReport {
    /// True when every line of the input was understood.
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    fn record(&mut self, line: usize, kind: IssueKind) {
        warn!(line, kind = ?kind, "skipping malformed input line");
        self.issues.push(LoadIssue { line, kind });
    }
}

/// Where key/value lines currently attach.
enum Target {
    /// Before any `-g` marker: library-level metadata.
    Library,
    Graph(GraphIdx),
    Node(GraphIdx, NodeIdx),
    Edge(GraphIdx, EdgeIdx),
    /// After a skipped marker: pairs belong to nothing and are dropped.
    Dropped,
}

/// Parse `text` into `lib`, appending to whatever it already holds.
pub fn load(lib: &mut Library, text: &str) -> LoadReport {
    let mut report = LoadReport::default();
    let mut curr_graph: Option<GraphIdx> = None;
    let mut target = Target::Library;

    for (line_no, line) in logical_lines(text) {
        if let Some(marker) = line.strip_prefix('-') {
            target = read_marker(lib, marker, line_no, &mut curr_graph, &mut report);
        } else if line.starts_with('#') {
            // comment
        } else {
            let (key, raw) = split_key_value(line);
            let value = unescape(raw);
            match target {
                Target::Library => lib.data.add(key, value),
                Target::Graph(g) => lib.graph_mut(g).data.add(key, value),
                Target::Node(g, n) => lib.graph_mut(g).node_mut(n).data.add(key, value),
                Target::Edge(g, e) => lib.graph_mut(g).edge_mut(e).data.add(key, value),
                Target::Dropped => {}
            }
        }
    }

    debug!(
        graphs = lib.graph_count(),
        issues = report.issues.len(),
        "loaded library from text"
    );
    report
}

/// Read a `-g`/`-n`/`-e` line (sans the leading `-`) and return the new
/// attach target. Any malformation records an issue and yields `Dropped`.
fn read_marker(
    lib: &mut Library,
    marker: &str,
    line_no: usize,
    curr_graph: &mut Option<GraphIdx>,
    report: &mut LoadReport,
) -> Target {
    let mut chars = marker.chars();
    let letter = chars.next();
    let separator = chars.next();
    let payload = chars.as_str().trim_matches([' ', '\t']);

    let Some(letter) = letter else {
        report.record(line_no, IssueKind::BadSeparator);
        return Target::Dropped;
    };
    if !matches!(separator, Some(' ') | Some('\t')) {
        report.record(line_no, IssueKind::BadSeparator);
        return Target::Dropped;
    }

    match letter {
        'g' => {
            let idx = match lib.find_graph(payload) {
                Some(existing) => {
                    report.record(line_no, IssueKind::DuplicateGraph(payload.to_string()));
                    existing
                }
                None => lib.add_graph(payload),
            };
            *curr_graph = Some(idx);
            Target::Graph(idx)
        }
        'n' => {
            let Some(g) = *curr_graph else {
                report.record(line_no, IssueKind::MarkerOutsideGraph);
                return Target::Dropped;
            };
            let graph = lib.graph_mut(g);
            let idx = match graph.find_node(payload) {
                Some(existing) => {
                    report.record(line_no, IssueKind::DuplicateNode(payload.to_string()));
                    existing
                }
                None => graph.add_node(payload),
            };
            Target::Node(g, idx)
        }
        'e' => {
            let Some(g) = *curr_graph else {
                report.record(line_no, IssueKind::MarkerOutsideGraph);
                return Target::Dropped;
            };
            let Some((start_id, end_id)) = payload.split_once(',') else {
                report.record(line_no, IssueKind::MalformedEdge);
                return Target::Dropped;
            };
            let start_id = start_id.trim_matches([' ', '\t']);
            let end_id = end_id.trim_matches([' ', '\t']);

            let graph = lib.graph_mut(g);
            let start = graph.find_node(start_id);
            let end = graph.find_node(end_id);
            if start.is_none() {
                report.record(line_no, IssueKind::UnknownEndpoint(start_id.to_string()));
            }
            if end.is_none() {
                report.record(line_no, IssueKind::UnknownEndpoint(end_id.to_string()));
            }
            let (Some(start), Some(end)) = (start, end) else {
                return Target::Dropped;
            };
            if start == end {
                report.record(line_no, IssueKind::SelfLoopEdge(start_id.to_string()));
                return Target::Dropped;
            }
            Target::Edge(g, graph.add_edge(start, end))
        }
        other => {
            report.record(line_no, IssueKind::UnknownMarker(other));
            Target::Dropped
        }
    }
}

/// Read a whole file and [`load`] it.
///
/// The library is untouched when the file cannot be read.
pub fn load_file(lib: &mut Library, path: impl AsRef<Path>) -> CodecResult<LoadReport> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    info!(path = %path.display(), bytes = text.len(), "loading library file");
    Ok(load(lib, &text))
}

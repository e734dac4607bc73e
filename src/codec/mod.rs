//! Line-oriented text codec.
//!
//! The format is UTF-8 text. `-g`/`-n`/`-e` marker lines introduce a graph,
//! node, or edge; every following `key value` line attaches metadata to the
//! entity the last marker introduced (or to the library itself before the
//! first marker). Blank lines and `#` comments are ignored. Values that
//! need it are quoted and escaped so arbitrary text — embedded newlines and
//! quotes included — survives a round trip.

mod reader;
mod text;
mod writer;

pub use reader::{load, load_file, IssueKind, LoadIssue, LoadReport};
pub use text::{escape, unescape};
pub use writer::{save, save_file, save_graph, save_graph_file};

use thiserror::Error;

/// Failures from the file-level entry points.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The file could not be read or written.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

pub type CodecResult<T> = Result<T, CodecError>;

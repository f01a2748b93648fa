//! Edge-list graph files.
//!
//! One entry per line, fields separated by whitespace:
//!
//! ```text
//! # comments run to the end of the line
//! A B 2.5   # edge A-B of length 2.5
//! B C       # edge B-C of the engine's default length
//! D         # isolated node
//! ```
//!
//! Nodes are created in order of first mention, edges in line order.

use std::io::{self, BufRead};
use std::num::ParseFloatError;

use spanforest_core::{EngineError, ForestEngine, NodeId};
use thiserror::Error;
use tracing::{Span, field, instrument};

/// Errors raised while reading an edge-list file.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum GraphFileError {
    /// The underlying reader failed.
    #[error("failed to read graph: {source}")]
    Read {
        /// I/O failure reported by the reader.
        #[source]
        source: io::Error,
    },
    /// A line had more fields than `FIRST SECOND LENGTH`.
    #[error("line {line}: expected at most 3 fields, found {fields}")]
    Malformed {
        /// One-based line number.
        line: usize,
        /// Number of fields found.
        fields: usize,
    },
    /// The length field was not a number.
    #[error("line {line}: `{raw}` is not a valid length")]
    InvalidNumber {
        /// One-based line number.
        line: usize,
        /// The offending field.
        raw: String,
        /// Parse failure.
        #[source]
        source: ParseFloatError,
    },
    /// The engine rejected the node or edge described by a line.
    #[error("line {line}: {source}")]
    Engine {
        /// One-based line number.
        line: usize,
        /// Error returned by the engine.
        #[source]
        source: EngineError,
    },
}

/// Adds every node and edge listed in `reader` to `engine`.
///
/// # Errors
/// Returns [`GraphFileError`] on the first unreadable or invalid line. Lines
/// before it have already been applied.
///
/// # Examples
/// ```
/// use spanforest_cli::cli::load_graph;
/// use spanforest_core::EngineBuilder;
///
/// let mut engine = EngineBuilder::new().build()?;
/// load_graph(&mut engine, "A B\nB C 2\n# done\n".as_bytes())?;
/// assert_eq!(engine.graph().node_count(), 3);
/// assert_eq!(engine.graph().edge_count(), 2);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[instrument(
    name = "cli.load_graph",
    err,
    skip_all,
    fields(nodes = field::Empty, edges = field::Empty),
)]
pub fn load_graph(engine: &mut ForestEngine, reader: impl BufRead) -> Result<(), GraphFileError> {
    for (index, line) in reader.lines().enumerate() {
        let line_no = index + 1;
        let line = line.map_err(|source| GraphFileError::Read { source })?;
        let content = line.split('#').next().unwrap_or_default();
        let fields: Vec<&str> = content.split_whitespace().collect();
        apply_line(engine, line_no, &fields)?;
    }
    let span = Span::current();
    span.record("nodes", engine.graph().node_count());
    span.record("edges", engine.graph().edge_count());
    Ok(())
}

fn apply_line(engine: &mut ForestEngine, line: usize, fields: &[&str]) -> Result<(), GraphFileError> {
    let engine_err = |source: EngineError| GraphFileError::Engine { line, source };
    match *fields {
        [] => Ok(()),
        [label] => node_for(engine, label).map(drop).map_err(engine_err),
        [first, second] => {
            let (first, second) = endpoints(engine, first, second).map_err(engine_err)?;
            engine
                .add_default_edge(first, second)
                .map(drop)
                .map_err(engine_err)
        }
        [first, second, raw] => {
            let length: f64 = raw.parse().map_err(|source| GraphFileError::InvalidNumber {
                line,
                raw: raw.to_owned(),
                source,
            })?;
            let (first, second) = endpoints(engine, first, second).map_err(engine_err)?;
            engine
                .add_edge(first, second, length)
                .map(drop)
                .map_err(engine_err)
        }
        _ => Err(GraphFileError::Malformed {
            line,
            fields: fields.len(),
        }),
    }
}

fn endpoints(
    engine: &mut ForestEngine,
    first: &str,
    second: &str,
) -> Result<(NodeId, NodeId), EngineError> {
    Ok((node_for(engine, first)?, node_for(engine, second)?))
}

fn node_for(engine: &mut ForestEngine, label: &str) -> Result<NodeId, EngineError> {
    match engine.graph().find_node(label) {
        Some(id) => Ok(id),
        None => engine.add_node(label),
    }
}

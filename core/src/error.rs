use thiserror::Error;

use crate::dispatch::Algorithm;
use crate::graph::{EdgeId, VertexId};

/// Errors raised by graph operations and algorithm engines.
///
/// "No path" and "no cycle" are not errors; they are ordinary values
/// (`Outcome::NoPath`, an empty cycle list).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphError {
    #[error("vertex {0} is not in the graph")]
    UnknownVertex(VertexId),

    #[error("edge {0} is not in the graph")]
    UnknownEdge(EdgeId),

    /// An engine was handed an index outside `0..len`.
    #[error("vertex index {index} is not between 0 and {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// A reached vertex whose parent chain does not lead back to the start.
    #[error("parent chain from vertex index {index} does not reach the start")]
    BrokenPath { index: usize },

    #[error("unsupported algorithm '{0}': use 'BFS', 'DFS' or 'Dijkstra'")]
    UnsupportedAlgorithm(String),

    #[error("{algorithm} requires a {endpoint} vertex")]
    MissingEndpoint {
        algorithm: Algorithm,
        endpoint: &'static str,
    },

    #[error("edge {edge} has weight {weight}; weighted search requires finite non-negative weights")]
    InvalidWeight { edge: EdgeId, weight: f64 },

    #[error("invalid vertex label '{label}': {reason}")]
    InvalidLabel { label: String, reason: String },

    #[error("invalid config value for {field}: {reason}")]
    InvalidConfig { field: &'static str, reason: String },
}

pub type Result<T> = std::result::Result<T, GraphError>;

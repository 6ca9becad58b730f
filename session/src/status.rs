use serde::Serialize;

use crate::error::Result;
use crate::state::SharedGraph;

/// Snapshot of the session for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Status {
    pub directed: bool,
    pub vertex_count: usize,
    pub edge_count: usize,
    pub memory_bytes: usize,
    pub generation: u64,
}

pub fn status(shared: &SharedGraph) -> Result<Status> {
    shared.with_graph(|gs| Status {
        directed: gs.graph.is_directed(),
        vertex_count: gs.graph.vertex_count(),
        edge_count: gs.graph.edge_count(),
        memory_bytes: gs.graph.memory_usage(),
        generation: gs.generation,
    })
}

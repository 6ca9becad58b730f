//! graph-walk-core: editable in-memory graph and its traversal engines.
//!
//! A host (canvas, CLI, service) builds a [`Graph`] through entity
//! operations, then asks for an [`Algorithm`] by name: fewest-edges path
//! (BFS), simple cycle enumeration (DFS) or lightest path (Dijkstra).
//! Every run maps the graph onto dense `0..V` indices with a fresh
//! [`IndexMapper`], so the engines work on plain arrays.
//!
//! Engines never mutate the graph and emit `tracing` events instead of
//! printing; install a subscriber to see them.

mod bfs;
mod config;
mod cycles;
mod dijkstra;
mod dispatch;
mod error;
mod graph;
mod index;

pub use bfs::{hop_distances, BreadthFirstPaths};
pub use config::{
    GraphConfig, LabelPolicy, DEFAULT_EDGE_WEIGHT, DEFAULT_VERTEX_RADIUS, MAX_VERTEX_RADIUS,
};
pub use cycles::{find_cycles, Cycle, CycleDetector, MIN_CYCLE_LEN};
pub use dijkstra::{distances, DijkstraPaths};
pub use dispatch::{run_algorithm, Algorithm, Distance, Outcome, Path};
pub use error::{GraphError, Result};
pub use graph::{Edge, EdgeId, Graph, Vertex, VertexId};
pub use index::{IndexMapper, Neighbor};

/// Fewest-edges path between two vertices.
pub fn shortest_path_unweighted(graph: &Graph, start: VertexId, end: VertexId) -> Result<Option<Path>> {
    bfs::shortest_path(graph, start, end)
}

/// Lightest path between two vertices.
pub fn shortest_path_weighted(graph: &Graph, start: VertexId, end: VertexId) -> Result<Option<Path>> {
    dijkstra::shortest_path(graph, start, end)
}

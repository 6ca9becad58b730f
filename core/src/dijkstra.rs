use std::cmp::Ordering;
use std::collections::BinaryHeap;

use tracing::{debug, trace};

use crate::dispatch::{Distance, Path};
use crate::error::{GraphError, Result};
use crate::graph::{Graph, VertexId};
use crate::index::{reconstruct, IndexMapper};

/// Heap entry ordered so that `BinaryHeap` pops the smallest distance first,
/// then the lowest index.
#[derive(Debug, Clone, Copy)]
struct QueueEntry {
    dist: f64,
    vertex: usize,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueueEntry {}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .dist
            .total_cmp(&self.dist)
            .then_with(|| other.vertex.cmp(&self.vertex))
    }
}

/// Single-source shortest paths by total edge weight.
///
/// Decrease-key is done lazily: an improved vertex is pushed again and stale
/// heap entries are skipped on extraction by the `visited` guard.
#[derive(Debug, Clone)]
pub struct DijkstraPaths {
    start: usize,
    dist_to: Vec<f64>,
    edge_to: Vec<Option<usize>>,
}

impl DijkstraPaths {
    /// Run Dijkstra from `start`. Fails with `InvalidWeight` if any edge in the
    /// graph has a negative, NaN or infinite weight.
    pub fn search(mapper: &IndexMapper<'_>, start: usize) -> Result<Self> {
        mapper.check_index(start)?;
        check_weights(mapper.graph())?;

        let n = mapper.len();
        let mut dist_to = vec![f64::INFINITY; n];
        let mut edge_to: Vec<Option<usize>> = vec![None; n];
        let mut visited = vec![false; n];
        let mut heap = BinaryHeap::new();

        dist_to[start] = 0.0;
        heap.push(QueueEntry {
            dist: 0.0,
            vertex: start,
        });

        while let Some(QueueEntry { vertex: v, .. }) = heap.pop() {
            if visited[v] {
                continue;
            }
            visited[v] = true;

            for neighbor in mapper.neighbors(v)? {
                let w = neighbor.index;
                let candidate = dist_to[v] + neighbor.weight;
                if candidate < dist_to[w] {
                    trace!(from = v, to = w, old = dist_to[w], new = candidate, "dijkstra: relax");
                    dist_to[w] = candidate;
                    edge_to[w] = Some(v);
                    heap.push(QueueEntry {
                        dist: candidate,
                        vertex: w,
                    });
                }
            }
        }

        Ok(Self {
            start,
            dist_to,
            edge_to,
        })
    }

    /// Total weight of the lightest path to `v`; `+∞` if unreachable.
    pub fn distance_to(&self, v: usize) -> Result<f64> {
        self.dist_to
            .get(v)
            .copied()
            .ok_or(GraphError::IndexOutOfRange {
                index: v,
                len: self.dist_to.len(),
            })
    }

    pub fn has_path_to(&self, v: usize) -> Result<bool> {
        Ok(self.distance_to(v)?.is_finite())
    }

    /// Indices from start to `v` inclusive, `None` if `v` is unreachable.
    pub fn path_to(&self, v: usize) -> Result<Option<Vec<usize>>> {
        if !self.has_path_to(v)? {
            return Ok(None);
        }
        reconstruct(&self.edge_to, self.start, v)
            .map(Some)
            .ok_or(GraphError::BrokenPath { index: v })
    }
}

/// Weighted search is only defined for finite, non-negative weights.
/// Every edge is checked, reachable from the start or not, and `+∞` is
/// rejected along with negative and NaN weights: an infinite edge cannot be
/// told apart from "unreachable" in `dist_to`.
fn check_weights(graph: &Graph) -> Result<()> {
    match graph
        .edges()
        .find(|(_, e)| !(e.weight.is_finite() && e.weight >= 0.0))
    {
        Some((edge, e)) => Err(GraphError::InvalidWeight {
            edge,
            weight: e.weight,
        }),
        None => Ok(()),
    }
}

/// Lightest path from `start` to `end`, or `None` if `end` is unreachable.
pub fn shortest_path(graph: &Graph, start: VertexId, end: VertexId) -> Result<Option<Path>> {
    let mapper = IndexMapper::build(graph)?;
    let s = mapper.index_of(start)?;
    let e = mapper.index_of(end)?;

    let search = DijkstraPaths::search(&mapper, s)?;
    let Some(indices) = search.path_to(e)? else {
        debug!(%start, %end, "dijkstra: no path");
        return Ok(None);
    };

    let weight = search.distance_to(e)?;
    debug!(%start, %end, weight, hops = indices.len() - 1, "dijkstra: path found");

    Ok(Some(Path {
        vertices: mapper.to_vertices(&indices)?,
        distance: Distance::Weight(weight),
    }))
}

/// Lightest-path distance from `start` to every vertex, in graph vertex order.
/// Unreachable vertices map to `f64::INFINITY`.
pub fn distances(graph: &Graph, start: VertexId) -> Result<Vec<(VertexId, f64)>> {
    let mapper = IndexMapper::build(graph)?;
    let s = mapper.index_of(start)?;
    let search = DijkstraPaths::search(&mapper, s)?;

    (0..mapper.len())
        .map(|i| Ok((mapper.vertex_id(i)?, search.distance_to(i)?)))
        .collect()
}

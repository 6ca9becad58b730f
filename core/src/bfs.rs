use std::collections::VecDeque;

use tracing::debug;

use crate::dispatch::{Distance, Path};
use crate::error::{GraphError, Result};
use crate::graph::{Graph, VertexId};
use crate::index::{reconstruct, IndexMapper};

/// Breadth-first search state from a single start index.
///
/// `edge_to[w]` records the vertex that first discovered `w`, so among
/// equal-length routes the one found first (adjacency order) wins.
#[derive(Debug, Clone)]
pub struct BreadthFirstPaths {
    start: usize,
    marked: Vec<bool>,
    edge_to: Vec<Option<usize>>,
    dist_to: Vec<Option<u32>>,
}

impl BreadthFirstPaths {
    /// Run BFS from `start`. With a `target`, expansion stops once the target
    /// is marked; distances of vertices not yet reached stay `None`.
    pub fn search(mapper: &IndexMapper<'_>, start: usize, target: Option<usize>) -> Result<Self> {
        mapper.check_index(start)?;
        if let Some(t) = target {
            mapper.check_index(t)?;
        }

        let len = mapper.len();
        let mut marked = vec![false; len];
        let mut edge_to = vec![None; len];
        let mut dist_to = vec![None; len];
        let mut queue: VecDeque<usize> = VecDeque::new();

        marked[start] = true;
        dist_to[start] = Some(0);
        queue.push_back(start);

        let reached = |marked: &[bool]| target.is_some_and(|t| marked[t]);

        while !reached(&marked) {
            let Some(v) = queue.pop_front() else { break };
            let next = dist_to[v].map_or(1, |d| d + 1);

            for neighbor in mapper.neighbors(v)? {
                let w = neighbor.index;
                if !marked[w] {
                    marked[w] = true;
                    edge_to[w] = Some(v);
                    dist_to[w] = Some(next);
                    queue.push_back(w);
                }
            }
        }

        Ok(Self {
            start,
            marked,
            edge_to,
            dist_to,
        })
    }

    fn check(&self, v: usize) -> Result<()> {
        if v < self.marked.len() {
            Ok(())
        } else {
            Err(GraphError::IndexOutOfRange {
                index: v,
                len: self.marked.len(),
            })
        }
    }

    pub fn has_path_to(&self, v: usize) -> Result<bool> {
        self.check(v)?;
        Ok(self.marked[v])
    }

    /// Hop count of the shortest path to `v`, `None` if `v` was not reached.
    pub fn dist_to(&self, v: usize) -> Result<Option<u32>> {
        self.check(v)?;
        Ok(self.dist_to[v])
    }

    /// Indices from start to `v` inclusive, `None` if `v` was not reached.
    pub fn path_to(&self, v: usize) -> Result<Option<Vec<usize>>> {
        if !self.has_path_to(v)? {
            return Ok(None);
        }
        reconstruct(&self.edge_to, self.start, v)
            .map(Some)
            .ok_or(GraphError::BrokenPath { index: v })
    }

    /// Number of vertices marked during the search.
    pub fn nodes_visited(&self) -> usize {
        self.marked.iter().filter(|&&m| m).count()
    }
}

/// Fewest-edges path from `start` to `end`, or `None` if `end` is unreachable.
pub fn shortest_path(graph: &Graph, start: VertexId, end: VertexId) -> Result<Option<Path>> {
    let mapper = IndexMapper::build(graph)?;
    let s = mapper.index_of(start)?;
    let e = mapper.index_of(end)?;

    let search = BreadthFirstPaths::search(&mapper, s, Some(e))?;
    let Some(indices) = search.path_to(e)? else {
        debug!(%start, %end, visited = search.nodes_visited(), "bfs: no path");
        return Ok(None);
    };

    let hops = search.dist_to(e)?.unwrap_or_default();
    debug!(%start, %end, hops, visited = search.nodes_visited(), "bfs: path found");

    Ok(Some(Path {
        vertices: mapper.to_vertices(&indices)?,
        distance: Distance::Hops(hops),
    }))
}

/// Hop distance from `start` to every vertex, in graph vertex order.
/// Unreachable vertices map to `None`.
pub fn hop_distances(graph: &Graph, start: VertexId) -> Result<Vec<(VertexId, Option<u32>)>> {
    let mapper = IndexMapper::build(graph)?;
    let s = mapper.index_of(start)?;
    let search = BreadthFirstPaths::search(&mapper, s, None)?;

    (0..mapper.len())
        .map(|i| Ok((mapper.vertex_id(i)?, search.dist_to(i)?)))
        .collect()
}

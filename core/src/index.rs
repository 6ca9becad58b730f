use std::collections::{HashMap, HashSet};

use crate::error::{GraphError, Result};
use crate::graph::{Graph, VertexId};

/// One adjacency entry: the neighbour's dense index and the weight of the
/// edge that leads there.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub index: usize,
    pub weight: f64,
}

/// Dense `0..V` view of a graph for a single algorithm call.
///
/// Indices follow the graph's vertex order. Adjacency lists follow edge
/// insertion order and are direction-aware: a directed graph lists `to` under
/// `from`, an undirected graph lists each endpoint under the other (so a
/// mirrored pair shows up twice, exactly as `Graph::adjacent_vertices` does).
///
/// The mapper borrows the graph, which keeps the graph frozen for as long as
/// the indices are in use. Build a fresh one per call.
#[derive(Debug)]
pub struct IndexMapper<'g> {
    graph: &'g Graph,
    ids: Vec<VertexId>,
    positions: HashMap<VertexId, usize>,
    adjacency: Vec<Vec<Neighbor>>,
    edge_pairs: HashSet<(usize, usize)>,
}

impl<'g> IndexMapper<'g> {
    pub fn build(graph: &'g Graph) -> Result<Self> {
        let ids: Vec<VertexId> = graph.vertex_ids().collect();
        let positions: HashMap<VertexId, usize> =
            ids.iter().enumerate().map(|(i, &id)| (id, i)).collect();

        let mut adjacency: Vec<Vec<Neighbor>> = (0..ids.len()).map(|_| Vec::new()).collect();
        let mut edge_pairs = HashSet::with_capacity(graph.edge_count());
        let directed = graph.is_directed();

        for (_, e) in graph.edges() {
            let from = *positions
                .get(&e.from)
                .ok_or(GraphError::UnknownVertex(e.from))?;
            let to = *positions.get(&e.to).ok_or(GraphError::UnknownVertex(e.to))?;

            adjacency[from].push(Neighbor {
                index: to,
                weight: e.weight,
            });
            if !directed && from != to {
                adjacency[to].push(Neighbor {
                    index: from,
                    weight: e.weight,
                });
            }
            edge_pairs.insert((from, to));
        }

        Ok(Self {
            graph,
            ids,
            positions,
            adjacency,
            edge_pairs,
        })
    }

    pub fn graph(&self) -> &'g Graph {
        self.graph
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn index_of(&self, id: VertexId) -> Result<usize> {
        self.positions
            .get(&id)
            .copied()
            .ok_or(GraphError::UnknownVertex(id))
    }

    pub fn vertex_id(&self, index: usize) -> Result<VertexId> {
        self.ids.get(index).copied().ok_or(GraphError::IndexOutOfRange {
            index,
            len: self.ids.len(),
        })
    }

    /// Fail with `IndexOutOfRange` unless `index < len`.
    pub fn check_index(&self, index: usize) -> Result<()> {
        if index < self.ids.len() {
            Ok(())
        } else {
            Err(GraphError::IndexOutOfRange {
                index,
                len: self.ids.len(),
            })
        }
    }

    pub fn neighbors(&self, index: usize) -> Result<&[Neighbor]> {
        self.check_index(index)?;
        Ok(&self.adjacency[index])
    }

    /// Whether an edge goes exactly `from → to`.
    pub fn has_edge(&self, from: usize, to: usize) -> Result<bool> {
        self.check_index(from)?;
        self.check_index(to)?;
        Ok(self.edge_pairs.contains(&(from, to)))
    }

    pub fn label(&self, index: usize) -> Result<&'g str> {
        let id = self.vertex_id(index)?;
        self.graph
            .vertex(id)
            .map(|v| v.label.as_str())
            .ok_or(GraphError::UnknownVertex(id))
    }

    /// Translate a sequence of indices back to vertex ids.
    pub fn to_vertices(&self, indices: &[usize]) -> Result<Vec<VertexId>> {
        indices.iter().map(|&i| self.vertex_id(i)).collect()
    }
}

/// Walk `edge_to` back from `end` to `start`, returning the path in
/// start-to-end order. None if the chain breaks or loops.
pub(crate) fn reconstruct(edge_to: &[Option<usize>], start: usize, end: usize) -> Option<Vec<usize>> {
    let mut path = vec![end];
    let mut current = end;

    while current != start {
        current = (*edge_to.get(current)?)?;
        path.push(current);
        if path.len() > edge_to.len() {
            return None;
        }
    }

    path.reverse();
    Some(path)
}

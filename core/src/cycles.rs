use std::collections::BTreeSet;

use tracing::{debug, trace};

use crate::error::{GraphError, Result};
use crate::graph::{Graph, VertexId};
use crate::index::IndexMapper;

/// Shortest cycle worth reporting. A two-vertex back-and-forth (one edge and
/// its undirected mirror) is not a cycle.
pub const MIN_CYCLE_LEN: usize = 3;

/// A cycle as a vertex sequence in traversal order; the edge from the last
/// vertex back to the first closes it and is not repeated.
pub type Cycle = Vec<VertexId>;

/// One level of the explicit DFS stack: a vertex and the position of the next
/// neighbour to examine.
#[derive(Debug, Clone, Copy)]
struct Frame {
    vertex: usize,
    next: usize,
}

/// Simple cycles found by a depth-first search launched from every unvisited
/// vertex, in discovery order.
///
/// A cycle is recorded at each back edge (an edge to a vertex still on the
/// active path). Candidates are dropped when shorter than [`MIN_CYCLE_LEN`],
/// when any consecutive pair (closing pair included) is not an edge of the
/// graph, or when an earlier cycle has the same length and the same set of
/// vertex labels. The last rule folds distinct cycles over the same labels
/// into one.
#[derive(Debug, Clone, Default)]
pub struct CycleDetector {
    cycles: Vec<Vec<usize>>,
}

impl CycleDetector {
    pub fn search(mapper: &IndexMapper<'_>) -> Result<Self> {
        let n = mapper.len();
        let mut visited = vec![false; n];
        let mut on_path = vec![false; n];
        let mut parent: Vec<Option<usize>> = vec![None; n];

        let mut cycles: Vec<Vec<usize>> = Vec::new();
        let mut label_sets: Vec<BTreeSet<&str>> = Vec::new();
        let mut stack: Vec<Frame> = Vec::new();

        for root in 0..n {
            if visited[root] {
                continue;
            }
            visited[root] = true;
            on_path[root] = true;
            stack.push(Frame {
                vertex: root,
                next: 0,
            });

            while let Some(frame) = stack.last_mut() {
                let v = frame.vertex;
                let Some(neighbor) = mapper.neighbors(v)?.get(frame.next) else {
                    on_path[v] = false;
                    stack.pop();
                    continue;
                };
                frame.next += 1;
                let w = neighbor.index;

                if !visited[w] {
                    parent[w] = Some(v);
                    visited[w] = true;
                    on_path[w] = true;
                    stack.push(Frame { vertex: w, next: 0 });
                } else if on_path[w] {
                    let Some(cycle) = back_edge_cycle(mapper, &parent, v, w)? else {
                        continue;
                    };
                    let labels = label_set(mapper, &cycle)?;
                    let duplicate = cycles
                        .iter()
                        .zip(&label_sets)
                        .any(|(c, l)| c.len() == cycle.len() && *l == labels);
                    if duplicate {
                        trace!(length = cycle.len(), "dfs: duplicate cycle skipped");
                        continue;
                    }

                    debug!(length = cycle.len(), labels = ?labels, "dfs: cycle found");
                    cycles.push(cycle);
                    label_sets.push(labels);
                }
            }
        }

        Ok(Self { cycles })
    }

    /// Cycles as index sequences, in discovery order.
    pub fn cycles(&self) -> &[Vec<usize>] {
        &self.cycles
    }

    pub fn has_cycle(&self) -> bool {
        !self.cycles.is_empty()
    }
}

/// Build the candidate for back edge `v → w`: parents from `v` up to `w`,
/// reversed into traversal order `[w, …, v]`. None if it is too short or if
/// an edge along it (closing edge included) is missing in that direction.
/// A parent chain that never reaches `w` is a `BrokenPath` error.
fn back_edge_cycle(
    mapper: &IndexMapper<'_>,
    parent: &[Option<usize>],
    v: usize,
    w: usize,
) -> Result<Option<Vec<usize>>> {
    let mut cycle = Vec::new();
    let mut x = v;
    while x != w {
        cycle.push(x);
        match parent.get(x).copied().flatten() {
            Some(p) if cycle.len() <= parent.len() => x = p,
            _ => return Err(GraphError::BrokenPath { index: v }),
        }
    }
    cycle.push(w);

    if cycle.len() < MIN_CYCLE_LEN {
        return Ok(None);
    }
    cycle.reverse();

    let closing = (cycle[cycle.len() - 1], cycle[0]);
    let steps = cycle.windows(2).map(|p| (p[0], p[1])).chain(std::iter::once(closing));
    for (from, to) in steps {
        if !mapper.has_edge(from, to)? {
            trace!(length = cycle.len(), from, to, "dfs: candidate missing an edge");
            return Ok(None);
        }
    }

    Ok(Some(cycle))
}

fn label_set<'g>(mapper: &IndexMapper<'g>, cycle: &[usize]) -> Result<BTreeSet<&'g str>> {
    cycle.iter().map(|&i| mapper.label(i)).collect()
}

/// Every distinct simple cycle in the graph, as vertex id sequences.
pub fn find_cycles(graph: &Graph) -> Result<Vec<Cycle>> {
    let mapper = IndexMapper::build(graph)?;
    let detector = CycleDetector::search(&mapper)?;
    debug!(cycles = detector.cycles().len(), "dfs: search complete");

    detector
        .cycles()
        .iter()
        .map(|c| mapper.to_vertices(c))
        .collect()
}

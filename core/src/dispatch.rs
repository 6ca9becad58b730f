use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug_span;

use crate::cycles::Cycle;
use crate::error::{GraphError, Result};
use crate::graph::{Graph, VertexId};

/// The algorithms a host can request by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Algorithm {
    /// Fewest-edges path between two vertices.
    #[serde(rename = "BFS")]
    Bfs,
    /// Enumerate simple cycles; takes no endpoints.
    #[serde(rename = "DFS")]
    Dfs,
    /// Lightest path between two vertices.
    Dijkstra,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [Algorithm::Bfs, Algorithm::Dfs, Algorithm::Dijkstra];

    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Bfs => "BFS",
            Algorithm::Dfs => "DFS",
            Algorithm::Dijkstra => "Dijkstra",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = GraphError;

    /// Accepts "BFS", "DFS" and "Dijkstra" (case-insensitive).
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        Algorithm::ALL
            .into_iter()
            .find(|a| a.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| GraphError::UnsupportedAlgorithm(trimmed.to_string()))
    }
}

/// Length of a path, in the unit of the algorithm that found it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Distance {
    Hops(u32),
    Weight(f64),
}

impl Distance {
    pub fn as_f64(self) -> f64 {
        match self {
            Distance::Hops(h) => f64::from(h),
            Distance::Weight(w) => w,
        }
    }
}

/// A path from start to end, both inclusive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Path {
    pub vertices: Vec<VertexId>,
    pub distance: Distance,
}

impl Path {
    /// Number of edges traversed.
    pub fn hops(&self) -> usize {
        self.vertices.len().saturating_sub(1)
    }
}

/// Normalized result of an algorithm run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    Path(Path),
    /// The end vertex is unreachable from the start vertex.
    NoPath,
    Cycles { cycles: Vec<Cycle> },
}

impl Outcome {
    pub fn path(&self) -> Option<&Path> {
        match self {
            Outcome::Path(p) => Some(p),
            _ => None,
        }
    }

    pub fn cycles(&self) -> &[Cycle] {
        match self {
            Outcome::Cycles { cycles } => cycles,
            _ => &[],
        }
    }

    pub fn is_no_path(&self) -> bool {
        matches!(self, Outcome::NoPath)
    }

    /// Every vertex the outcome mentions, in order, for highlighting.
    pub fn vertices(&self) -> Vec<VertexId> {
        match self {
            Outcome::Path(p) => p.vertices.clone(),
            Outcome::NoPath => Vec::new(),
            Outcome::Cycles { cycles } => cycles.iter().flatten().copied().collect(),
        }
    }
}

fn require(algorithm: Algorithm, endpoint: &'static str, v: Option<VertexId>) -> Result<VertexId> {
    v.ok_or(GraphError::MissingEndpoint {
        algorithm,
        endpoint,
    })
}

/// Run `algorithm` over `graph`. Path algorithms need both endpoints;
/// cycle enumeration ignores them.
pub fn run_algorithm(
    graph: &Graph,
    algorithm: Algorithm,
    start: Option<VertexId>,
    end: Option<VertexId>,
) -> Result<Outcome> {
    let _span = debug_span!("run_algorithm", %algorithm).entered();

    let path = match algorithm {
        Algorithm::Dfs => {
            let cycles = crate::cycles::find_cycles(graph)?;
            return Ok(Outcome::Cycles { cycles });
        }
        Algorithm::Bfs => {
            let s = require(algorithm, "start", start)?;
            let e = require(algorithm, "end", end)?;
            crate::bfs::shortest_path(graph, s, e)?
        }
        Algorithm::Dijkstra => {
            let s = require(algorithm, "start", start)?;
            let e = require(algorithm, "end", end)?;
            crate::dijkstra::shortest_path(graph, s, e)?
        }
    };

    Ok(path.map_or(Outcome::NoPath, Outcome::Path))
}

impl Graph {
    /// Run an algorithm chosen by name ("BFS", "DFS" or "Dijkstra").
    pub fn run_algorithm(
        &self,
        name: &str,
        start: Option<VertexId>,
        end: Option<VertexId>,
    ) -> Result<Outcome> {
        let algorithm: Algorithm = name.parse()?;
        run_algorithm(self, algorithm, start, end)
    }
}

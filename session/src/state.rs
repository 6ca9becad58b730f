use std::sync::{Arc, RwLock};

use graph_walk_core::Graph;
use tracing::warn;

use crate::error::{Result, SessionError};

/// The graph plus the generation it is at.
#[derive(Debug)]
pub struct GraphState {
    pub graph: Graph,
    /// Bumped on every write access. 0 = never mutated.
    pub generation: u64,
}

/// Shared handle to a graph.
///
/// Readers (algorithm runs, status) hold the read lock for the whole call,
/// so an index snapshot can never observe a half-applied mutation. Writers
/// take the write lock and bump the generation.
#[derive(Debug, Clone)]
pub struct SharedGraph {
    inner: Arc<RwLock<GraphState>>,
}

impl SharedGraph {
    pub fn new(graph: Graph) -> Self {
        Self {
            inner: Arc::new(RwLock::new(GraphState {
                graph,
                generation: 0,
            })),
        }
    }

    /// Execute a closure with a read reference to the graph state.
    pub fn with_graph<R, F: FnOnce(&GraphState) -> R>(&self, f: F) -> Result<R> {
        let guard = self.inner.read().map_err(|_| {
            warn!("graph lock poisoned on read");
            SessionError::LockPoisoned
        })?;
        Ok(f(&guard))
    }

    /// Execute a closure with a write reference to the graph. The generation
    /// is bumped whether or not the closure changed anything.
    pub fn with_graph_mut<R, F: FnOnce(&mut Graph) -> R>(&self, f: F) -> Result<R> {
        let mut guard = self.inner.write().map_err(|_| {
            warn!("graph lock poisoned on write");
            SessionError::LockPoisoned
        })?;
        guard.generation += 1;
        Ok(f(&mut guard.graph))
    }

    pub fn generation(&self) -> Result<u64> {
        self.with_graph(|gs| gs.generation)
    }
}

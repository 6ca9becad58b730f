//! Generation-based staleness for algorithm results.
//!
//! Every write to the shared graph bumps a monotonic counter. A result keeps
//! the generation it was computed at; once the counter moves on, the host
//! knows the highlighted path or cycles may no longer match the graph and
//! should clear or recompute them.

use graph_walk_core::{Algorithm, Outcome};
use serde::Serialize;

/// An algorithm result tagged with the graph generation it was computed at.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Highlight {
    pub algorithm: Algorithm,
    pub outcome: Outcome,
    pub generation: u64,
}

impl Highlight {
    /// True once the graph has been written to since this result was made.
    pub fn is_stale_at(&self, current_generation: u64) -> bool {
        self.generation < current_generation
    }
}

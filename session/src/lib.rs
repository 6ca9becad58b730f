//! graph-walk-session: the in-process boundary a host talks to.
//!
//! Wraps graph-walk-core with a lock-protected shared graph, bounded named
//! settings, parsing of user-typed labels and weights, and generation
//! counters so a host can tell when a highlighted result has gone stale.

mod error;
mod generation;
mod settings;
mod state;
mod status;
mod util;

use graph_walk_core::{run_algorithm, Algorithm, EdgeId, Graph, VertexId};
use tracing::{debug, info};

pub use error::{Result, SessionError};
pub use generation::Highlight;
pub use settings::{lookup, SettingDef, SettingKind, Settings, REGISTRY};
pub use state::{GraphState, SharedGraph};
pub use status::Status;
pub use util::{normalize_label, parse_bool, parse_weight};

/// A graph being edited by one host, plus its settings.
#[derive(Debug)]
pub struct Session {
    shared: SharedGraph,
    settings: Settings,
}

impl Session {
    pub fn new(settings: Settings) -> Result<Self> {
        let graph = Graph::with_config(settings.config().clone())?;
        Ok(Self {
            shared: SharedGraph::new(graph),
            settings,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// A handle other threads can use to reach the same graph.
    pub fn shared(&self) -> SharedGraph {
        self.shared.clone()
    }

    /// Change one setting and apply it to the live graph.
    pub fn set(&mut self, name: &str, value: &str) -> Result<()> {
        let mut next = self.settings.clone();
        next.set(name, value)?;
        self.apply_settings(next)?;
        info!(setting = name, value, "setting changed");
        Ok(())
    }

    /// Replace all settings. Directedness changes apply to existing edges'
    /// traversal semantics; no mirrors are added or removed.
    pub fn apply_settings(&mut self, settings: Settings) -> Result<()> {
        let config = settings.config().clone();
        self.shared.with_graph_mut(|g| g.set_config(config))??;
        self.settings = settings;
        Ok(())
    }

    pub fn with_graph<R, F: FnOnce(&Graph) -> R>(&self, f: F) -> Result<R> {
        self.shared.with_graph(|gs| f(&gs.graph))
    }

    pub fn with_graph_mut<R, F: FnOnce(&mut Graph) -> R>(&self, f: F) -> Result<R> {
        self.shared.with_graph_mut(f)
    }

    pub fn generation(&self) -> Result<u64> {
        self.shared.generation()
    }

    /// Add a vertex from a typed label and the point where it was placed.
    pub fn add_vertex_from_input(&self, label: &str, x: f64, y: f64) -> Result<VertexId> {
        let label = normalize_label(label)?;
        let id = self
            .shared
            .with_graph_mut(|g| g.create_vertex(label, x, y))??;
        debug!(%id, x, y, "vertex added");
        Ok(id)
    }

    /// Add an edge from a typed weight; blank input takes the default weight.
    pub fn add_edge_from_input(
        &self,
        from: VertexId,
        to: VertexId,
        weight_text: &str,
    ) -> Result<EdgeId> {
        let weight = parse_weight(weight_text, self.settings.config().default_weight)?;
        let id = self
            .shared
            .with_graph_mut(|g| g.add_edge(from, to, weight))??;
        debug!(%id, %from, %to, weight, "edge added");
        Ok(id)
    }

    /// Run an algorithm by name under the read lock.
    pub fn run(
        &self,
        name: &str,
        start: Option<VertexId>,
        end: Option<VertexId>,
    ) -> Result<Highlight> {
        let algorithm: Algorithm = name.parse()?;
        let (outcome, generation) = self.shared.with_graph(|gs| {
            run_algorithm(&gs.graph, algorithm, start, end).map(|o| (o, gs.generation))
        })??;
        info!(%algorithm, generation, vertices = outcome.vertices().len(), "algorithm finished");
        Ok(Highlight {
            algorithm,
            outcome,
            generation,
        })
    }

    /// Whether the graph has changed since `highlight` was computed.
    pub fn is_stale(&self, highlight: &Highlight) -> Result<bool> {
        Ok(highlight.is_stale_at(self.generation()?))
    }

    pub fn status(&self) -> Result<Status> {
        status::status(&self.shared)
    }

    /// Remove every vertex and edge; settings are kept.
    pub fn reset(&self) -> Result<()> {
        self.shared.with_graph_mut(|g| g.clear())?;
        info!("graph cleared");
        Ok(())
    }
}

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::config::{GraphConfig, DEFAULT_VERTEX_RADIUS};
use crate::error::{GraphError, Result};

/// Stable vertex identifier. Assigned by the graph, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VertexId(pub u64);

/// Stable edge identifier. Assigned by the graph, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeId(pub u64);

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.0)
    }
}

/// A vertex: label plus the geometry a canvas needs for drawing and hit tests.
/// Algorithms never read `x`, `y` or `radius`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub label: String,
    pub x: f64,
    pub y: f64,
    pub radius: f64,
}

impl Vertex {
    pub fn new(label: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            label: label.into(),
            x,
            y,
            radius: DEFAULT_VERTEX_RADIUS,
        }
    }

    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    /// Squared distance from the vertex centre to `(x, y)`.
    fn distance_sq(&self, x: f64, y: f64) -> f64 {
        let dx = x - self.x;
        let dy = y - self.y;
        dx * dx + dy * dy
    }

    /// True if `(x, y)` falls inside the hit-test circle.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        self.distance_sq(x, y) <= self.radius * self.radius
    }
}

/// A directed edge. Undirected graphs store a mirrored pair whose members
/// name each other through `reverse`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub from: VertexId,
    pub to: VertexId,
    pub weight: f64,
    /// Mirror edge of an undirected pair, if any.
    pub reverse: Option<EdgeId>,
}

impl Edge {
    pub fn touches(&self, v: VertexId) -> bool {
        self.from == v || self.to == v
    }
}

/// Editable in-memory graph.
///
/// Vertices and edges live in insertion-ordered arenas keyed by id.
/// Insertion order is significant: it is the neighbour order every
/// traversal follows, and therefore the tie-break between equal paths.
#[derive(Debug, Clone)]
pub struct Graph {
    vertices: IndexMap<VertexId, Vertex>,
    edges: IndexMap<EdgeId, Edge>,
    config: GraphConfig,
    next_vertex: u64,
    next_edge: u64,
}

impl Graph {
    /// Empty graph with default settings and the given directedness.
    pub fn new(directed: bool) -> Self {
        Self::from_parts(GraphConfig {
            directed,
            ..GraphConfig::default()
        })
    }

    /// Empty graph using a validated config.
    pub fn with_config(config: GraphConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_parts(config))
    }

    /// Pre-allocate for a known graph size.
    pub fn with_capacity(directed: bool, vertex_count: usize, edge_count: usize) -> Self {
        let mut graph = Self::new(directed);
        graph.vertices.reserve(vertex_count);
        graph.edges.reserve(edge_count);
        graph
    }

    fn from_parts(config: GraphConfig) -> Self {
        Self {
            vertices: IndexMap::new(),
            edges: IndexMap::new(),
            config,
            next_vertex: 0,
            next_edge: 0,
        }
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    pub fn is_directed(&self) -> bool {
        self.config.directed
    }

    /// Switch directedness. Existing edges are kept as they are: no mirrors
    /// are created or removed, only adjacency semantics change.
    pub fn set_directed(&mut self, directed: bool) {
        self.config.directed = directed;
    }

    /// Replace the defaults used by `create_vertex` and `connect`.
    /// Directedness follows `config.directed`.
    pub fn set_config(&mut self, config: GraphConfig) -> Result<()> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Vertices
    // -----------------------------------------------------------------------

    /// Append a vertex. Labels are not required to be unique.
    pub fn add_vertex(&mut self, vertex: Vertex) -> Result<VertexId> {
        self.config.label_policy.check(&vertex.label)?;
        let id = VertexId(self.next_vertex);
        self.next_vertex += 1;
        self.vertices.insert(id, vertex);
        Ok(id)
    }

    /// Append a vertex with the configured radius.
    pub fn create_vertex(&mut self, label: impl Into<String>, x: f64, y: f64) -> Result<VertexId> {
        let radius = self.config.vertex_radius;
        self.add_vertex(Vertex::new(label, x, y).with_radius(radius))
    }

    /// Remove a vertex and every edge touching it.
    pub fn remove_vertex(&mut self, id: VertexId) -> Option<Vertex> {
        if !self.vertices.contains_key(&id) {
            return None;
        }
        self.edges.retain(|_, e| !e.touches(id));
        self.vertices.shift_remove(&id)
    }

    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.get(&id)
    }

    /// Rename a vertex, subject to the label policy.
    pub fn set_label(&mut self, id: VertexId, label: impl Into<String>) -> Result<()> {
        let label = label.into();
        self.config.label_policy.check(&label)?;
        let vertex = self
            .vertices
            .get_mut(&id)
            .ok_or(GraphError::UnknownVertex(id))?;
        vertex.label = label;
        Ok(())
    }

    /// Vertices in insertion order.
    pub fn vertices(&self) -> impl Iterator<Item = (VertexId, &Vertex)> {
        self.vertices.iter().map(|(&id, v)| (id, v))
    }

    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.vertices.keys().copied()
    }

    /// First vertex with the given label, in insertion order.
    pub fn find_vertex_by_label(&self, label: &str) -> Option<VertexId> {
        self.vertices
            .iter()
            .find(|(_, v)| v.label == label)
            .map(|(&id, _)| id)
    }

    /// Hit test: the vertex whose centre is nearest to `(x, y)` among those
    /// whose radius covers the point. Ties go to the earlier vertex.
    pub fn vertex_at(&self, x: f64, y: f64) -> Option<VertexId> {
        let mut best: Option<(VertexId, f64)> = None;
        for (&id, v) in &self.vertices {
            if !v.contains(x, y) {
                continue;
            }
            let d = v.distance_sq(x, y);
            if best.map_or(true, |(_, bd)| d < bd) {
                best = Some((id, d));
            }
        }
        best.map(|(id, _)| id)
    }

    // -----------------------------------------------------------------------
    // Edges
    // -----------------------------------------------------------------------

    fn push_edge(&mut self, edge: Edge) -> EdgeId {
        let id = EdgeId(self.next_edge);
        self.next_edge += 1;
        self.edges.insert(id, edge);
        id
    }

    /// Add an edge `from → to`. In an undirected graph the mirror `to → from`
    /// is added right after it and the two are linked as reverse partners.
    /// Returns the id of the `from → to` edge.
    pub fn add_edge(&mut self, from: VertexId, to: VertexId, weight: f64) -> Result<EdgeId> {
        for v in [from, to] {
            if !self.vertices.contains_key(&v) {
                return Err(GraphError::UnknownVertex(v));
            }
        }

        let id = self.push_edge(Edge {
            from,
            to,
            weight,
            reverse: None,
        });

        if !self.config.directed {
            let mirror = self.push_edge(Edge {
                from: to,
                to: from,
                weight,
                reverse: Some(id),
            });
            if let Some(e) = self.edges.get_mut(&id) {
                e.reverse = Some(mirror);
            }
        }

        Ok(id)
    }

    /// Add an edge with the configured default weight.
    pub fn connect(&mut self, from: VertexId, to: VertexId) -> Result<EdgeId> {
        self.add_edge(from, to, self.config.default_weight)
    }

    /// Remove an edge. In an undirected graph the opposite-direction edge goes
    /// too: the linked partner if there is one, otherwise the first edge with
    /// swapped endpoints.
    pub fn remove_edge(&mut self, id: EdgeId) -> Option<Edge> {
        let edge = self.edges.shift_remove(&id)?;

        if self.config.directed {
            // The partner survives on its own; drop its dangling link.
            if let Some(partner) = edge.reverse.and_then(|r| self.edges.get_mut(&r)) {
                partner.reverse = None;
            }
            return Some(edge);
        }

        let mirror = edge
            .reverse
            .filter(|r| self.edges.contains_key(r))
            .or_else(|| self.find_edge(edge.to, edge.from));
        if let Some(mirror) = mirror {
            self.edges.shift_remove(&mirror);
        }
        Some(edge)
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(&id)
    }

    /// Set an edge's weight, keeping an undirected partner in sync.
    pub fn set_weight(&mut self, id: EdgeId, weight: f64) -> Result<()> {
        let edge = self.edges.get_mut(&id).ok_or(GraphError::UnknownEdge(id))?;
        edge.weight = weight;
        let reverse = edge.reverse;
        if let Some(partner) = reverse.and_then(|r| self.edges.get_mut(&r)) {
            partner.weight = weight;
        }
        Ok(())
    }

    /// Edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &Edge)> {
        self.edges.iter().map(|(&id, e)| (id, e))
    }

    /// First edge going exactly `from → to`. Direction is never ignored.
    pub fn find_edge(&self, from: VertexId, to: VertexId) -> Option<EdgeId> {
        self.edges
            .iter()
            .find(|(_, e)| e.from == from && e.to == to)
            .map(|(&id, _)| id)
    }

    /// Every edge with `v` as either endpoint.
    pub fn connected_edges(&self, v: VertexId) -> Vec<EdgeId> {
        self.edges
            .iter()
            .filter(|(_, e)| e.touches(v))
            .map(|(&id, _)| id)
            .collect()
    }

    /// Neighbours of `v` in edge insertion order. Directed graphs follow
    /// outgoing edges only; undirected graphs follow both directions, so a
    /// mirrored pair lists the neighbour twice.
    pub fn adjacent_vertices(&self, v: VertexId) -> Vec<VertexId> {
        let directed = self.config.directed;
        self.edges
            .values()
            .filter_map(|e| {
                if e.from == v {
                    Some(e.to)
                } else if !directed && e.to == v {
                    Some(e.from)
                } else {
                    None
                }
            })
            .collect()
    }

    /// Remove every vertex and edge. Ids are not reused afterwards.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.edges.clear();
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Approximate memory usage in bytes.
    pub fn memory_usage(&self) -> usize {
        use std::mem::size_of;

        let vertex_mem: usize = self
            .vertices
            .values()
            .map(|v| size_of::<VertexId>() + size_of::<Vertex>() + v.label.capacity())
            .sum();
        let edge_mem = self.edges.len() * (size_of::<EdgeId>() + size_of::<Edge>());

        vertex_mem + edge_mem
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LabelPolicy;

    fn abc(directed: bool) -> (Graph, VertexId, VertexId, VertexId) {
        let mut g = Graph::new(directed);
        let a = g.add_vertex(Vertex::new("A", 0.0, 0.0)).unwrap();
        let b = g.add_vertex(Vertex::new("B", 100.0, 0.0)).unwrap();
        let c = g.add_vertex(Vertex::new("C", 0.0, 100.0)).unwrap();
        (g, a, b, c)
    }

    #[test]
    fn test_vertices_keep_insertion_order() {
        let (g, a, b, c) = abc(false);
        let ids: Vec<_> = g.vertex_ids().collect();
        assert_eq!(ids, vec![a, b, c]);
    }

    #[test]
    fn test_duplicate_labels_allowed() {
        let mut g = Graph::new(false);
        let x = g.add_vertex(Vertex::new("X", 0.0, 0.0)).unwrap();
        let y = g.add_vertex(Vertex::new("X", 5.0, 5.0)).unwrap();
        assert_ne!(x, y);
        assert_eq!(g.vertex_count(), 2);
    }

    #[test]
    fn test_undirected_edge_is_mirrored() {
        let (mut g, a, b, _) = abc(false);
        let ab = g.add_edge(a, b, 2.5).unwrap();
        assert_eq!(g.edge_count(), 2);

        let ba = g.find_edge(b, a).unwrap();
        assert_eq!(g.edge(ab).unwrap().reverse, Some(ba));
        assert_eq!(g.edge(ba).unwrap().reverse, Some(ab));
        assert_eq!(g.edge(ba).unwrap().weight, 2.5);
    }

    #[test]
    fn test_directed_edge_not_mirrored() {
        let (mut g, a, b, _) = abc(true);
        g.add_edge(a, b, 1.0).unwrap();
        assert_eq!(g.edge_count(), 1);
        assert!(g.find_edge(b, a).is_none());
    }

    #[test]
    fn test_add_edge_unknown_vertex() {
        let (mut g, a, _, _) = abc(false);
        let ghost = VertexId(999);
        assert_eq!(g.add_edge(a, ghost, 1.0), Err(GraphError::UnknownVertex(ghost)));
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn test_set_weight_updates_partner() {
        let (mut g, a, b, _) = abc(false);
        let ab = g.add_edge(a, b, 1.0).unwrap();
        g.set_weight(ab, 7.0).unwrap();
        let ba = g.find_edge(b, a).unwrap();
        assert_eq!(g.edge(ba).unwrap().weight, 7.0);

        g.set_weight(ba, 3.0).unwrap();
        assert_eq!(g.edge(ab).unwrap().weight, 3.0);
    }

    #[test]
    fn test_set_weight_unknown_edge() {
        let (mut g, _, _, _) = abc(false);
        assert_eq!(g.set_weight(EdgeId(5), 1.0), Err(GraphError::UnknownEdge(EdgeId(5))));
    }

    #[test]
    fn test_remove_vertex_cascades() {
        let (mut g, a, b, c) = abc(false);
        g.add_edge(a, b, 1.0).unwrap();
        g.add_edge(b, c, 1.0).unwrap();
        g.add_edge(c, a, 1.0).unwrap();

        let removed = g.remove_vertex(b).unwrap();
        assert_eq!(removed.label, "B");
        assert_eq!(g.edge_count(), 2);
        assert!(g.edges().all(|(_, e)| !e.touches(b)));
        assert!(g.connected_edges(a).iter().all(|&id| !g.edge(id).unwrap().touches(b)));
        assert!(g.remove_vertex(b).is_none());
    }

    #[test]
    fn test_remove_undirected_edge_removes_mirror() {
        let (mut g, a, b, c) = abc(false);
        let ab = g.add_edge(a, b, 1.0).unwrap();
        g.add_edge(b, c, 1.0).unwrap();
        g.remove_edge(ab).unwrap();
        assert!(g.find_edge(a, b).is_none());
        assert!(g.find_edge(b, a).is_none());
        assert_eq!(g.edge_count(), 2);
    }

    #[test]
    fn test_remove_directed_edge_keeps_reverse() {
        let (mut g, a, b, _) = abc(true);
        let ab = g.add_edge(a, b, 1.0).unwrap();
        g.add_edge(b, a, 1.0).unwrap();
        g.remove_edge(ab).unwrap();
        assert!(g.find_edge(b, a).is_some());
    }

    #[test]
    fn test_remove_after_toggling_directed_clears_link() {
        let (mut g, a, b, _) = abc(false);
        let ab = g.add_edge(a, b, 1.0).unwrap();
        g.set_directed(true);
        g.remove_edge(ab).unwrap();
        let ba = g.find_edge(b, a).unwrap();
        assert_eq!(g.edge(ba).unwrap().reverse, None);
    }

    #[test]
    fn test_adjacency_direction_aware() {
        let (mut g, a, b, c) = abc(true);
        g.add_edge(a, b, 1.0).unwrap();
        g.add_edge(c, a, 1.0).unwrap();
        assert_eq!(g.adjacent_vertices(a), vec![b]);

        g.set_directed(false);
        assert_eq!(g.adjacent_vertices(a), vec![b, c]);
    }

    #[test]
    fn test_undirected_adjacency_lists_mirror_twice() {
        let (mut g, a, b, _) = abc(false);
        g.add_edge(a, b, 1.0).unwrap();
        assert_eq!(g.adjacent_vertices(a), vec![b, b]);
    }

    #[test]
    fn test_self_loop_listed_once_per_edge() {
        let (mut g, a, _, _) = abc(true);
        g.add_edge(a, a, 1.0).unwrap();
        g.set_directed(false);
        assert_eq!(g.adjacent_vertices(a), vec![a]);
    }

    #[test]
    fn test_find_edge_is_directed() {
        let (mut g, a, b, _) = abc(true);
        let ab = g.add_edge(a, b, 1.0).unwrap();
        assert_eq!(g.find_edge(a, b), Some(ab));
        assert_eq!(g.find_edge(b, a), None);
    }

    #[test]
    fn test_vertex_at_picks_nearest() {
        let mut g = Graph::new(false);
        let near = g.add_vertex(Vertex::new("1", 10.0, 10.0)).unwrap();
        let far = g.add_vertex(Vertex::new("2", 20.0, 10.0)).unwrap();
        assert_eq!(g.vertex_at(18.0, 10.0), Some(far));
        assert_eq!(g.vertex_at(11.0, 10.0), Some(near));
        assert_eq!(g.vertex_at(500.0, 500.0), None);
    }

    #[test]
    fn test_clear_does_not_reuse_ids() {
        let (mut g, _, _, c) = abc(false);
        g.clear();
        assert!(g.is_empty());
        assert_eq!(g.edge_count(), 0);
        let d = g.add_vertex(Vertex::new("D", 0.0, 0.0)).unwrap();
        assert!(d > c);
    }

    #[test]
    fn test_integer_label_policy_enforced() {
        let mut g = Graph::with_config(GraphConfig {
            label_policy: LabelPolicy::Integer,
            ..GraphConfig::default()
        })
        .unwrap();
        assert!(g.add_vertex(Vertex::new("12", 0.0, 0.0)).is_ok());
        let err = g.add_vertex(Vertex::new("twelve", 0.0, 0.0)).unwrap_err();
        assert!(matches!(err, GraphError::InvalidLabel { .. }));
        assert_eq!(g.vertex_count(), 1);
    }

    #[test]
    fn test_set_label_respects_policy() {
        let mut g = Graph::with_config(GraphConfig {
            label_policy: LabelPolicy::Integer,
            ..GraphConfig::default()
        })
        .unwrap();
        let v = g.create_vertex("3", 0.0, 0.0).unwrap();

        assert!(matches!(
            g.set_label(v, "x"),
            Err(GraphError::InvalidLabel { .. })
        ));
        assert_eq!(g.vertex(v).unwrap().label, "3");

        g.set_label(v, "4").unwrap();
        assert_eq!(g.vertex(v).unwrap().label, "4");
        assert_eq!(g.set_label(VertexId(50), "5"), Err(GraphError::UnknownVertex(VertexId(50))));
    }

    #[test]
    fn test_find_vertex_by_label_takes_first() {
        let mut g = Graph::new(false);
        let first = g.create_vertex("X", 0.0, 0.0).unwrap();
        g.create_vertex("X", 1.0, 1.0).unwrap();
        assert_eq!(g.find_vertex_by_label("X"), Some(first));
        assert_eq!(g.find_vertex_by_label("Y"), None);
    }

    #[test]
    fn test_remove_unlinked_pair_after_toggling_undirected() {
        // Two one-way edges are not reverse partners; removing either in
        // undirected mode still takes the opposite edge with it.
        let (mut g, a, b, _) = abc(true);
        let ab = g.add_edge(a, b, 1.0).unwrap();
        g.add_edge(b, a, 1.0).unwrap();
        assert_eq!(g.edge(ab).unwrap().reverse, None);

        g.set_directed(false);
        g.remove_edge(ab).unwrap();
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn test_connect_uses_default_weight() {
        let mut g = Graph::with_config(GraphConfig {
            default_weight: 4.0,
            ..GraphConfig::default()
        })
        .unwrap();
        let a = g.create_vertex("A", 0.0, 0.0).unwrap();
        let b = g.create_vertex("B", 1.0, 1.0).unwrap();
        let ab = g.connect(a, b).unwrap();
        assert_eq!(g.edge(ab).unwrap().weight, 4.0);
    }

    #[test]
    fn test_memory_usage_nonzero() {
        let (g, _, _, _) = abc(false);
        assert!(g.memory_usage() > 0);
    }
}

//! Graph - Core graph data structure.
//!
//! The Graph owns the ordered vertex and edge collections plus the bounding
//! box every layout must respect. Vertex order is insertion order and doubles
//! as the implicit index used by the layout algorithms.

use glam::DVec3;
use petgraph::graph::UnGraph;

use super::bounds::BoundingBox;
use super::edge::{Edge, EdgeIndex};
use super::vertex::{Vertex, VertexId, VertexIndex};

/// The core graph.
///
/// This struct manages:
/// - Vertices (ids, positions, degrees, communities) in insertion order
/// - Edges as pairs of vertex handles
/// - The layout bounding box
///
/// Layouts reposition vertices but never add or remove them. Vertices and
/// edges are created by generators, loaders and `add_edge`, and destroyed
/// only by `clear`.
#[derive(Debug, Clone)]
pub struct Graph {
    /// Ordered vertex collection.
    pub(crate) vertices: Vec<Vertex>,

    /// Ordered edge collection.
    pub(crate) edges: Vec<Edge>,

    /// Hard position constraint for all layouts.
    bounds: BoundingBox,
}

impl Graph {
    /// Create a new empty graph inside `bounds`.
    pub fn new(bounds: BoundingBox) -> Self {
        Self {
            vertices: Vec::new(),
            edges: Vec::new(),
            bounds,
        }
    }

    // =========================================================================
    // Vertex Operations
    // =========================================================================

    /// Append a vertex at `position`.
    pub fn add_vertex(&mut self, id: VertexId, position: DVec3) -> VertexIndex {
        let index = VertexIndex(self.vertices.len() as u32);
        self.vertices.push(Vertex::new(id, position));
        index
    }

    /// Get the number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// All vertices in insertion order.
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Get a vertex by handle.
    pub fn vertex(&self, index: VertexIndex) -> Option<&Vertex> {
        self.vertices.get(index.index())
    }

    /// Resolve an external id against every vertex. First match wins.
    pub fn resolve(&self, id: &VertexId) -> Option<VertexIndex> {
        self.vertices
            .iter()
            .position(|v| &v.id == id)
            .map(|i| VertexIndex(i as u32))
    }

    /// Resolve an id given in its rendered form (see [`VertexId::matches_key`]).
    pub fn resolve_key(&self, key: &str) -> Option<VertexIndex> {
        self.vertices
            .iter()
            .position(|v| v.id.matches_key(key))
            .map(|i| VertexIndex(i as u32))
    }

    /// Resolve an id against a candidate subset, in candidate order.
    fn resolve_in(&self, id: &VertexId, candidates: &[VertexIndex]) -> Option<VertexIndex> {
        candidates
            .iter()
            .copied()
            .find(|c| self.vertex(*c).is_some_and(|v| &v.id == id))
    }

    /// Get a vertex's position by external id.
    pub fn position_of(&self, id: &VertexId) -> Option<DVec3> {
        self.resolve(id).map(|i| self.vertices[i.index()].position)
    }

    /// Get a vertex's degree by external id.
    pub fn degree_of(&self, id: &VertexId) -> Option<u32> {
        self.resolve(id).map(|i| self.vertices[i.index()].degree)
    }

    /// Get a vertex's community label by external id.
    pub fn community_of(&self, id: &VertexId) -> Option<u32> {
        self.resolve(id).map(|i| self.vertices[i.index()].community)
    }

    /// Move a vertex, clamped into the bounding box.
    ///
    /// Returns false if the id is unknown.
    pub fn set_position(&mut self, id: &VertexId, position: DVec3) -> bool {
        match self.resolve(id) {
            Some(index) => {
                let clamped = self.bounds.clamp_with_margin(position, DVec3::ZERO);
                self.vertices[index.index()].position = clamped;
                true
            }
            None => false,
        }
    }

    /// Get the handles of all vertices adjacent to `index`.
    pub fn neighbors(&self, index: VertexIndex) -> Vec<VertexIndex> {
        self.edges.iter().filter_map(|e| e.other(index)).collect()
    }

    // =========================================================================
    // Edge Operations
    // =========================================================================

    /// Add an edge between two vertices given by handle (direct mode).
    ///
    /// Increments the degree of both endpoints. Returns None and attaches
    /// nothing if either handle is out of range or both are the same vertex.
    pub fn add_edge(
        &mut self,
        source: VertexIndex,
        target: VertexIndex,
        weight: f64,
        label: impl Into<String>,
    ) -> Option<EdgeIndex> {
        let n = self.vertices.len();
        if source.index() >= n || target.index() >= n {
            tracing::trace!(%source, %target, "edge endpoint out of range, ignored");
            return None;
        }
        if source == target {
            tracing::trace!(%source, "self-loop ignored");
            return None;
        }

        let index = EdgeIndex(self.edges.len() as u32);
        self.edges.push(Edge::new(source, target, weight, label.into()));
        self.vertices[source.index()].degree += 1;
        self.vertices[target.index()].degree += 1;
        Some(index)
    }

    /// Add an edge between two vertices given by external id (lookup mode).
    ///
    /// Ids are resolved against `lookup` (every vertex when None), first
    /// match wins. Unresolved ids attach nothing.
    pub fn add_edge_by_id(
        &mut self,
        source: &VertexId,
        target: &VertexId,
        weight: f64,
        label: impl Into<String>,
        lookup: Option<&[VertexIndex]>,
    ) -> Option<EdgeIndex> {
        let (s, t) = match lookup {
            Some(candidates) => (
                self.resolve_in(source, candidates),
                self.resolve_in(target, candidates),
            ),
            None => (self.resolve(source), self.resolve(target)),
        };
        match (s, t) {
            (Some(s), Some(t)) => self.add_edge(s, t, weight, label),
            _ => {
                tracing::trace!(%source, %target, "unresolved edge endpoint, ignored");
                None
            }
        }
    }

    /// Get the number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// All edges in insertion order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Get an edge by handle.
    pub fn edge(&self, index: EdgeIndex) -> Option<&Edge> {
        self.edges.get(index.0 as usize)
    }

    /// Display name of an edge: its label, or `"source|target"` when the
    /// label is empty.
    pub fn edge_display_name(&self, edge: &Edge) -> String {
        if !edge.label.is_empty() {
            return edge.label.clone();
        }
        match (self.vertex(edge.source), self.vertex(edge.target)) {
            (Some(s), Some(t)) => format!("{}|{}", s.id, t.id),
            _ => String::new(),
        }
    }

    // =========================================================================
    // Buffer Access
    // =========================================================================

    /// Positions as `[x0, y0, z0, x1, y1, z1, ...]` for GPU upload.
    pub fn positions_flat(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.vertices.len() * 3);
        for v in &self.vertices {
            out.extend_from_slice(&v.position.as_vec3().to_array());
        }
        out
    }

    /// Edge endpoints as `[s0, t0, s1, t1, ...]`.
    pub fn edge_pairs(&self) -> Vec<u32> {
        let mut out = Vec::with_capacity(self.edges.len() * 2);
        for e in &self.edges {
            out.push(e.source.raw());
            out.push(e.target.raw());
        }
        out
    }

    /// Degree of every vertex in insertion order.
    pub fn degrees(&self) -> Vec<u32> {
        self.vertices.iter().map(|v| v.degree).collect()
    }

    /// Community label of every vertex in insertion order.
    pub fn communities(&self) -> Vec<u32> {
        self.vertices.iter().map(|v| v.community).collect()
    }

    /// Sum of all vertex degrees (always `2 * edge_count`).
    pub fn total_degree(&self) -> u64 {
        self.vertices.iter().map(|v| u64::from(v.degree)).sum()
    }

    /// Undirected petgraph view of the topology, node weights are the vertex
    /// positions in the ordered collection.
    pub fn topology(&self) -> UnGraph<u32, ()> {
        let mut graph = UnGraph::with_capacity(self.vertices.len(), self.edges.len());
        for i in 0..self.vertices.len() {
            graph.add_node(i as u32);
        }
        graph.extend_with_edges(self.edges.iter().map(|e| (e.source.raw(), e.target.raw())));
        graph
    }

    // =========================================================================
    // Utilities
    // =========================================================================

    /// Get the bounding box.
    pub fn bounds(&self) -> BoundingBox {
        self.bounds
    }

    /// Clear all vertices and edges. The bounding box is kept.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.edges.clear();
    }
}

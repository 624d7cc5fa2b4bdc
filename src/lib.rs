//! NetViz Layout - WASM Module
//!
//! Graph engine and layout algorithms for network-traffic visualization.
//! Compiled to WebAssembly and exposed to the renderer through wasm-bindgen.
//!
//! # Architecture
//!
//! - `graph`: Ordered vertex/edge storage, ids, bounding box
//! - `layout`: Fruchterman-Reingold and Kamada-Kawai placement
//! - `generators`: Random, community and power-law graphs, record loading
//! - `error`: Error type surfaced to callers

use js_sys::Float32Array;
use rand::SeedableRng;
use rand::rngs::StdRng;
use wasm_bindgen::prelude::*;

pub mod error;
pub mod generators;
pub mod graph;
pub mod layout;

use error::LayoutError;
use generators::{EdgeRecord, VertexRecord};
use glam::DVec3;
use graph::{BoundingBox, Graph};
use layout::FruchtermanReingoldConfig;

/// Initialize the WASM module.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Main entry point for the layout engine.
///
/// Owns the graph and the random source used by generators.
#[wasm_bindgen]
pub struct NetVizWasm {
    graph: Graph,
    rng: StdRng,
}

impl NetVizWasm {
    fn build(bounds: BoundingBox, rng: StdRng) -> Self {
        Self {
            graph: Graph::new(bounds),
            rng,
        }
    }

    /// Borrow the underlying graph.
    pub fn graph(&self) -> &Graph {
        &self.graph
    }
}

#[wasm_bindgen]
impl NetVizWasm {
    /// Create an empty engine bounded by the given box.
    ///
    /// Fails if any axis has min > max or a non-finite limit.
    #[wasm_bindgen(constructor)]
    pub fn new(
        min_x: f64,
        max_x: f64,
        min_y: f64,
        max_y: f64,
        min_z: f64,
        max_z: f64,
    ) -> Result<NetVizWasm, JsError> {
        let bounds = BoundingBox::new(min_x, max_x, min_y, max_y, min_z, max_z)?;
        Ok(Self::build(bounds, StdRng::from_entropy()))
    }

    /// Create an engine whose generators are reproducible from `seed`.
    #[wasm_bindgen(js_name = withSeed)]
    #[allow(clippy::too_many_arguments)]
    pub fn with_seed(
        min_x: f64,
        max_x: f64,
        min_y: f64,
        max_y: f64,
        min_z: f64,
        max_z: f64,
        seed: u64,
    ) -> Result<NetVizWasm, JsError> {
        let bounds = BoundingBox::new(min_x, max_x, min_y, max_y, min_z, max_z)?;
        Ok(Self::build(bounds, StdRng::seed_from_u64(seed)))
    }

    // =========================================================================
    // Generators
    // =========================================================================

    /// Replace the graph with `n` vertices and `m` uniformly random edges.
    ///
    /// Returns the number of edges added.
    #[wasm_bindgen(js_name = initRandomGraph)]
    pub fn init_random_graph(&mut self, n: u32, m: u32) -> u32 {
        self.graph.init_random_graph(n, m as usize, &mut self.rng) as u32
    }

    /// Replace the graph with a community (stochastic block model) graph.
    ///
    /// Returns the number of edges added.
    #[wasm_bindgen(js_name = initCommunityGraph)]
    pub fn init_community_graph(&mut self, n: u32, groups: u32, within_p: f64, between_p: f64) -> u32 {
        self.graph
            .init_community_graph(n, groups, within_p, between_p, &mut self.rng) as u32
    }

    /// Replace the graph with a preferential-attachment graph.
    #[wasm_bindgen(js_name = initPowerLawGraph)]
    pub fn init_power_law_graph(&mut self, n: u32) {
        self.graph.init_power_law_graph(n, &mut self.rng);
    }

    /// Replace the graph with hosts and flows parsed by the network layer.
    ///
    /// `vertices` is an array of `{ IP }`, `edges` an array of
    /// `{ Source, Destination, Protocol, Bytes }`. Returns the number of
    /// edges attached.
    #[wasm_bindgen(js_name = loadFromRecords)]
    pub fn load_from_records(&mut self, vertices: JsValue, edges: JsValue) -> Result<u32, JsError> {
        let vertices: Vec<VertexRecord> =
            serde_wasm_bindgen::from_value(vertices).map_err(LayoutError::from)?;
        let edges: Vec<EdgeRecord> = serde_wasm_bindgen::from_value(edges).map_err(LayoutError::from)?;
        let summary = self.graph.load_from_records(&vertices, &edges, &mut self.rng);
        Ok(summary.edges_attached as u32)
    }

    // =========================================================================
    // Layout
    // =========================================================================

    /// Run Fruchterman-Reingold. Returns the final temperature.
    #[wasm_bindgen(js_name = applyLayout)]
    pub fn apply_layout(&mut self, iterations: u32, scale: f64, gravity: f64) -> f64 {
        self.graph.apply_layout(iterations, scale, gravity)
    }

    /// Run Fruchterman-Reingold with a config object.
    ///
    /// Missing fields fall back to their defaults.
    #[wasm_bindgen(js_name = applyLayoutWith)]
    pub fn apply_layout_with(&mut self, config: JsValue) -> Result<f64, JsError> {
        let config: FruchtermanReingoldConfig =
            serde_wasm_bindgen::from_value(config).map_err(LayoutError::from)?;
        Ok(self.graph.apply_layout_with(&config))
    }

    /// Run Kamada-Kawai. Returns the largest remaining gradient norm.
    ///
    /// Fails on graphs with fewer than two vertices.
    #[wasm_bindgen(js_name = applyKKLayout)]
    pub fn apply_kk_layout(&mut self, kappa: f64, descent_rate: f64) -> Result<f64, JsError> {
        let report = self.graph.apply_kk_layout(kappa, descent_rate)?;
        Ok(report.max_gradient)
    }

    // =========================================================================
    // Edge Operations
    // =========================================================================

    /// Connect two vertices by id.
    ///
    /// Returns false, attaching nothing, if either id is unknown or both
    /// name the same vertex.
    #[wasm_bindgen(js_name = addEdge)]
    pub fn add_edge(&mut self, source_id: &str, target_id: &str, weight: f64, label: String) -> bool {
        match (self.graph.resolve_key(source_id), self.graph.resolve_key(target_id)) {
            (Some(s), Some(t)) => self.graph.add_edge(s, t, weight, label).is_some(),
            _ => false,
        }
    }

    /// Get the number of vertices.
    #[wasm_bindgen(js_name = vertexCount)]
    pub fn vertex_count(&self) -> u32 {
        self.graph.vertex_count() as u32
    }

    /// Get the number of edges.
    #[wasm_bindgen(js_name = edgeCount)]
    pub fn edge_count(&self) -> u32 {
        self.graph.edge_count() as u32
    }

    // =========================================================================
    // Buffer Access
    // =========================================================================

    /// Positions as `[x0, y0, z0, x1, ...]`, copied into a new array.
    #[wasm_bindgen(js_name = positions)]
    pub fn positions(&self) -> Float32Array {
        Float32Array::from(self.graph.positions_flat().as_slice())
    }

    /// Edge endpoints as `[s0, t0, s1, t1, ...]` vertex indices.
    #[wasm_bindgen(js_name = edgePairs)]
    pub fn edge_pairs(&self) -> Vec<u32> {
        self.graph.edge_pairs()
    }

    /// Degree of every vertex.
    #[wasm_bindgen(js_name = degrees)]
    pub fn degrees(&self) -> Vec<u32> {
        self.graph.degrees()
    }

    /// Community label of every vertex.
    #[wasm_bindgen(js_name = communities)]
    pub fn communities(&self) -> Vec<u32> {
        self.graph.communities()
    }

    /// External id of every vertex, rendered as a string.
    #[wasm_bindgen(js_name = vertexIds)]
    pub fn vertex_ids(&self) -> Vec<String> {
        self.graph.vertices().iter().map(|v| v.id.to_string()).collect()
    }

    /// Display name of every edge.
    #[wasm_bindgen(js_name = edgeLabels)]
    pub fn edge_labels(&self) -> Vec<String> {
        self.graph
            .edges()
            .iter()
            .map(|e| self.graph.edge_display_name(e))
            .collect()
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Position of a vertex as `[x, y, z]`, or undefined if unknown.
    #[wasm_bindgen(js_name = positionOf)]
    pub fn position_of(&self, id: &str) -> Option<Box<[f64]>> {
        let index = self.graph.resolve_key(id)?;
        let p = self.graph.vertex(index)?.position;
        Some(Box::new(p.to_array()))
    }

    /// Degree of a vertex, or undefined if unknown.
    #[wasm_bindgen(js_name = degreeOf)]
    pub fn degree_of(&self, id: &str) -> Option<u32> {
        let index = self.graph.resolve_key(id)?;
        self.graph.vertex(index).map(|v| v.degree())
    }

    /// Move a vertex; the position is clamped into the bounding box.
    ///
    /// Returns false if the id is unknown.
    #[wasm_bindgen(js_name = setPosition)]
    pub fn set_position(&mut self, id: &str, x: f64, y: f64, z: f64) -> bool {
        let Some(index) = self.graph.resolve_key(id) else {
            return false;
        };
        let vid = self.graph.vertices()[index.index()].id.clone();
        self.graph.set_position(&vid, DVec3::new(x, y, z))
    }

    /// Remove all vertices and edges. Bounds and random state are kept.
    #[wasm_bindgen(js_name = clear)]
    pub fn clear(&mut self) {
        self.graph.clear();
    }
}

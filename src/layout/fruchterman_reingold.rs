//! Fruchterman-Reingold force-directed layout.
//!
//! Simulated annealing over three forces, then a temperature-limited move.
//!
//! # Algorithm Overview
//!
//! With `n` vertices the ideal edge length is `k = (scale * n^2 / n + 1)^(1/3)`.
//! Each round:
//! 1. **Repulsion:** every ordered pair `(v, u)` pushes `v` away from `u`
//!    with magnitude `k^2 / d`.
//! 2. **Attraction:** every edge pulls its endpoints together with magnitude
//!    `d^2 / k`.
//! 3. **Gravity:** every vertex is pulled toward the origin with magnitude
//!    `0.1 * k * gravity * |pos|`.
//! 4. **Move:** each axis moves by at most the temperature `t`, then the
//!    position is clamped into the bounding box shrunk by 10% per side.
//! 5. **Cool:** `t` starts at `sqrt(n)` and drops by `t / (iterations + 1)`.
//!
//! Distances are floored at `epsilon` so coincident vertices never divide by zero.
//! The pass runs exactly `iterations` rounds and draws no random numbers.
//!
//! # References
//!
//! - Fruchterman & Reingold, "Graph Drawing by Force-directed Placement" (1991)

use glam::DVec3;
use serde::Deserialize;

use crate::graph::Graph;

/// Configuration for the Fruchterman-Reingold layout.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FruchtermanReingoldConfig {
    /// Number of annealing rounds (default: 40).
    pub iterations: u32,
    /// Area scale used to derive the ideal edge length (default: 25.0).
    pub scale: f64,
    /// Strength of the pull toward the origin (default: 1.0).
    pub gravity: f64,
    /// Floor for pairwise distances (default: 0.05). Non-positive values
    /// fall back to `f64::EPSILON`.
    pub epsilon: f64,
    /// Fraction of each axis range kept clear at both ends (default: 0.1),
    /// limited to `[0, 0.5]`.
    pub margin_fraction: f64,
}

impl Default for FruchtermanReingoldConfig {
    fn default() -> Self {
        Self {
            iterations: 40,
            scale: 25.0,
            gravity: 1.0,
            epsilon: 0.05,
            margin_fraction: 0.1,
        }
    }
}

impl FruchtermanReingoldConfig {
    /// Config with the three caller-facing parameters, defaults elsewhere.
    pub fn new(iterations: u32, scale: f64, gravity: f64) -> Self {
        Self {
            iterations,
            scale,
            gravity,
            ..Default::default()
        }
    }

    /// Distance floor used by the pass: `epsilon`, or `f64::EPSILON` when
    /// `epsilon` is not a positive finite number.
    pub fn distance_floor(&self) -> f64 {
        if self.epsilon.is_finite() && self.epsilon > 0.0 {
            self.epsilon
        } else {
            f64::EPSILON
        }
    }

    /// Margin fraction limited to `[0, 0.5]`; NaN counts as 0.
    pub fn effective_margin_fraction(&self) -> f64 {
        if self.margin_fraction.is_nan() {
            0.0
        } else {
            self.margin_fraction.clamp(0.0, 0.5)
        }
    }

    /// Ideal edge length for a graph of `n` vertices.
    pub fn ideal_length(&self, n: usize) -> f64 {
        let n = n as f64;
        let area = self.scale * n * n;
        (area / n + 1.0).cbrt()
    }
}

/// Run the layout in place. Returns the final temperature.
///
/// An empty graph or zero iterations leaves every position untouched.
pub fn apply(graph: &mut Graph, config: &FruchtermanReingoldConfig) -> f64 {
    let n = graph.vertices.len();
    if n == 0 || config.iterations == 0 {
        return 0.0;
    }

    let k = config.ideal_length(n);
    let eps = config.distance_floor();
    let bounds = graph.bounds();
    let margin = bounds.range() * config.effective_margin_fraction();

    let mut t = (n as f64).sqrt();
    let dt = t / (f64::from(config.iterations) + 1.0);

    tracing::debug!(
        vertices = n,
        edges = graph.edges.len(),
        iterations = config.iterations,
        k,
        "fruchterman-reingold start"
    );

    for _ in 0..config.iterations {
        apply_repulsion(graph, k, eps);
        apply_attraction(graph, k, eps);
        apply_gravity(graph, k, config.gravity, eps);

        for v in &mut graph.vertices {
            let disp = v.displacement;
            let disp_mag = disp.length();
            if disp_mag > 0.0 {
                let step = (disp / disp_mag) * disp.abs().min(DVec3::splat(t));
                v.position += step;
            }
            v.position = bounds.clamp_with_margin(v.position, margin);
        }

        t -= dt;
    }

    tracing::debug!(temperature = t, "fruchterman-reingold done");
    t
}

/// Reset every displacement and accumulate pairwise repulsion.
fn apply_repulsion(graph: &mut Graph, k: f64, eps: f64) {
    let positions: Vec<DVec3> = graph.vertices.iter().map(|v| v.position).collect();

    for (i, v) in graph.vertices.iter_mut().enumerate() {
        let mut disp = DVec3::ZERO;
        for (j, &other) in positions.iter().enumerate() {
            if i == j {
                continue;
            }
            let delta = positions[i] - other;
            let dist = delta.length().max(eps);
            disp += (delta / dist) * (k * k / dist);
        }
        v.displacement = disp;
    }
}

/// Pull the endpoints of every edge toward each other.
fn apply_attraction(graph: &mut Graph, k: f64, eps: f64) {
    for e in 0..graph.edges.len() {
        let (s, t) = (graph.edges[e].source.index(), graph.edges[e].target.index());
        let delta = graph.vertices[s].position - graph.vertices[t].position;
        let dist = delta.length().max(eps);
        let force = (delta / dist) * (dist * dist / k);

        graph.vertices[s].displacement -= force;
        graph.vertices[t].displacement += force;
    }
}

/// Pull every vertex toward the coordinate origin.
fn apply_gravity(graph: &mut Graph, k: f64, gravity: f64, eps: f64) {
    for v in &mut graph.vertices {
        let dist = v.position.length().max(eps);
        let pull = 0.1 * k * gravity * dist;
        v.displacement -= (v.position / dist) * pull;
    }
}

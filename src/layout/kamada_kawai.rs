//! Kamada-Kawai stress layout.
//!
//! Places vertices so Euclidean distances approach graph-theoretic
//! distances, relaxing the most stressed vertex first.
//!
//! # Algorithm Overview
//!
//! 1. **Distances:** hop counts `d[i][j]` from [`DistanceMatrix`].
//! 2. **Ideal lengths:** `l[i][j] = L0 * d[i][j] / n^(1/3)`; unreachable pairs
//!    use the disconnected distance.
//! 3. **Spring coefficients:** `kappa / d[i][j]^(1/3)` for reachable pairs,
//!    `kappa / n` otherwise.
//! 4. **Descent:** `3n` rounds. Each round picks the vertex with the largest
//!    stress gradient and moves it by `-descent_rate * grad` until the gradient
//!    magnitude drops to the tolerance or `3n` moves are spent.
//! 5. **Clamp:** final positions are clamped into the bounding box shrunk by
//!    `range / n` per side.
//!
//! # References
//!
//! - Kamada & Kawai, "An algorithm for drawing general undirected graphs" (1989)

use glam::DVec3;
use serde::Deserialize;

use super::distance::DistanceMatrix;
use crate::error::LayoutError;
use crate::graph::Graph;

/// Configuration for the Kamada-Kawai layout.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct KamadaKawaiConfig {
    /// Spring stiffness scale (default: 0.1).
    pub kappa: f64,
    /// Step size of the single-vertex descent (default: 0.1).
    pub descent_rate: f64,
    /// Length of a one-hop spring before the `n^(1/3)` scaling (default: 150.0).
    pub ideal_length: f64,
    /// Gradient magnitude at which a vertex counts as relaxed (default: 1.0).
    pub tolerance: f64,
}

impl Default for KamadaKawaiConfig {
    fn default() -> Self {
        Self {
            kappa: 0.1,
            descent_rate: 0.1,
            ideal_length: 150.0,
            tolerance: 1.0,
        }
    }
}

impl KamadaKawaiConfig {
    /// Config with the two caller-facing parameters, defaults elsewhere.
    pub fn new(kappa: f64, descent_rate: f64) -> Self {
        Self {
            kappa,
            descent_rate,
            ..Default::default()
        }
    }
}

/// Summary of a finished run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KamadaKawaiReport {
    /// Outer rounds executed (always `3n`).
    pub rounds: usize,
    /// Single-vertex moves applied across all rounds.
    pub moves: usize,
    /// Largest gradient magnitude left before clamping.
    pub max_gradient: f64,
}

/// Precomputed ideal lengths and spring coefficients.
#[derive(Debug, Clone)]
pub struct StressModel {
    n: usize,
    ideal: Vec<f64>,
    coefficient: Vec<f64>,
}

impl StressModel {
    /// Build the model from hop distances.
    ///
    /// Self pairs get zero length and zero stiffness.
    pub fn new(distances: &DistanceMatrix, config: &KamadaKawaiConfig) -> Self {
        let n = distances.len();
        let nf = n as f64;
        let scale = config.ideal_length / nf.cbrt();
        let disconnected = f64::from(distances.disconnected_distance());
        let mut ideal = vec![0.0; n * n];
        let mut coefficient = vec![0.0; n * n];

        for i in 0..n {
            for j in 0..n {
                if i == j {
                    continue;
                }
                let cell = i * n + j;
                (ideal[cell], coefficient[cell]) = match distances.get(i, j) {
                    Some(d) => (scale * f64::from(d), config.kappa / f64::from(d).cbrt()),
                    None => (scale * disconnected, config.kappa / nf),
                };
            }
        }

        Self {
            n,
            ideal,
            coefficient,
        }
    }

    /// Number of vertices covered.
    pub fn len(&self) -> usize {
        self.n
    }

    /// True when the model covers no vertices.
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Target Euclidean distance between `i` and `j`.
    pub fn ideal_length(&self, i: usize, j: usize) -> f64 {
        self.ideal[i * self.n + j]
    }

    /// Spring stiffness between `i` and `j`.
    pub fn coefficient(&self, i: usize, j: usize) -> f64 {
        self.coefficient[i * self.n + j]
    }

    /// Partial derivatives of the stress energy with respect to vertex `a`.
    ///
    /// Pairs at zero separation contribute nothing. Positions beyond the
    /// model's vertex count are ignored.
    pub fn gradient(&self, positions: &[DVec3], a: usize) -> DVec3 {
        let mut grad = DVec3::ZERO;
        for (b, &other) in positions.iter().enumerate().take(self.n) {
            if b == a {
                continue;
            }
            let delta = positions[a] - other;
            let len = delta.length();
            if len != 0.0 {
                grad += self.coefficient(a, b) * (delta - self.ideal_length(a, b) * delta / len);
            }
        }
        grad
    }

    /// Total stress `sum_{i<j} coef * (|p_i - p_j| - l)^2 / 2`.
    pub fn energy(&self, positions: &[DVec3]) -> f64 {
        let mut energy = 0.0;
        for i in 0..self.n {
            for j in i + 1..self.n {
                let stretch = positions[i].distance(positions[j]) - self.ideal_length(i, j);
                energy += 0.5 * self.coefficient(i, j) * stretch * stretch;
            }
        }
        energy
    }
}

/// Run the single-vertex descent on `positions` (no clamping).
///
/// Only the first `min(model.len(), positions.len())` positions take part;
/// the rest are left untouched.
pub fn relax(
    model: &StressModel,
    positions: &mut [DVec3],
    config: &KamadaKawaiConfig,
) -> KamadaKawaiReport {
    let n = model.len().min(positions.len());
    let positions = &mut positions[..n];
    let budget = 3 * n;
    let mut moves = 0;

    for _ in 0..budget {
        let mut worst = 0;
        let mut worst_magnitude = 0.0;
        for a in 0..n {
            let magnitude = model.gradient(positions, a).length();
            if magnitude > worst_magnitude {
                worst = a;
                worst_magnitude = magnitude;
            }
        }

        let mut inner = 0;
        while inner < budget {
            let grad = model.gradient(positions, worst);
            if grad.length() <= config.tolerance {
                break;
            }
            positions[worst] -= config.descent_rate * grad;
            inner += 1;
        }
        moves += inner;
    }

    let max_gradient = (0..n)
        .map(|a| model.gradient(positions, a).length())
        .fold(0.0, f64::max);

    KamadaKawaiReport {
        rounds: budget,
        moves,
        max_gradient,
    }
}

/// Run the layout in place.
///
/// Fails on graphs with fewer than two vertices, where the ideal lengths are
/// undefined.
pub fn apply(graph: &mut Graph, config: &KamadaKawaiConfig) -> Result<KamadaKawaiReport, LayoutError> {
    let n = graph.vertices.len();
    if n < 2 {
        return Err(LayoutError::TooFewVertices {
            required: 2,
            actual: n,
        });
    }

    tracing::debug!(
        vertices = n,
        edges = graph.edges.len(),
        kappa = config.kappa,
        descent_rate = config.descent_rate,
        "kamada-kawai start"
    );

    let distances = DistanceMatrix::compute(graph);
    let model = StressModel::new(&distances, config);
    let mut positions: Vec<DVec3> = graph.vertices.iter().map(|v| v.position).collect();

    let report = relax(&model, &mut positions, config);

    let bounds = graph.bounds();
    let margin = bounds.range() / n as f64;
    for (v, p) in graph.vertices.iter_mut().zip(positions) {
        v.position = bounds.clamp_with_margin(p, margin);
    }

    tracing::debug!(
        moves = report.moves,
        max_gradient = report.max_gradient,
        "kamada-kawai done"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{BoundingBox, VertexId, VertexIndex};

    fn pair_model(config: &KamadaKawaiConfig) -> StressModel {
        let mut g = Graph::new(BoundingBox::cube(1000.0).unwrap());
        let a = g.add_vertex(VertexId::Index(0), DVec3::ZERO);
        let b = g.add_vertex(VertexId::Index(1), DVec3::ZERO);
        g.add_edge(a, b, 1.0, "");
        StressModel::new(&DistanceMatrix::compute(&g), config)
    }

    #[test]
    fn test_model_coefficients() {
        let mut g = Graph::new(BoundingBox::cube(10.0).unwrap());
        for i in 0..4 {
            g.add_vertex(VertexId::Index(i), DVec3::ZERO);
        }
        g.add_edge(VertexIndex(0), VertexIndex(1), 1.0, "");
        g.add_edge(VertexIndex(1), VertexIndex(2), 1.0, "");
        // vertex 3 is isolated

        let config = KamadaKawaiConfig::new(0.8, 0.1);
        let model = StressModel::new(&DistanceMatrix::compute(&g), &config);
        let scale = 150.0 / 4.0_f64.cbrt();

        assert_eq!(model.ideal_length(0, 0), 0.0);
        assert_eq!(model.coefficient(2, 2), 0.0);
        assert!((model.ideal_length(0, 1) - scale).abs() < 1e-9);
        assert!((model.ideal_length(0, 2) - 2.0 * scale).abs() < 1e-9);
        assert!((model.coefficient(0, 2) - 0.8 / 2.0_f64.cbrt()).abs() < 1e-12);
        // diameter 2 -> disconnected distance 5
        assert!((model.ideal_length(0, 3) - 5.0 * scale).abs() < 1e-9);
        assert!((model.coefficient(3, 0) - 0.8 / 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_gradient_zero_at_ideal_separation() {
        let config = KamadaKawaiConfig::default();
        let model = pair_model(&config);
        let l = model.ideal_length(0, 1);
        let positions = [DVec3::ZERO, DVec3::new(l, 0.0, 0.0)];

        assert!(model.gradient(&positions, 0).length() < 1e-9);
        assert!(model.energy(&positions) < 1e-12);
    }

    #[test]
    fn test_gradient_ignores_coincident_pairs() {
        let config = KamadaKawaiConfig::default();
        let model = pair_model(&config);
        let positions = [DVec3::ONE, DVec3::ONE];
        assert_eq!(model.gradient(&positions, 0), DVec3::ZERO);
    }

    #[test]
    fn test_two_vertices_move_toward_ideal_length() {
        let config = KamadaKawaiConfig::new(0.1, 0.1);
        let model = pair_model(&config);
        let l = 150.0 / 2.0_f64.cbrt();
        let mut positions = [DVec3::ZERO, DVec3::new(100.0, 0.0, 0.0)];
        let before = (100.0 - l).abs();

        let report = relax(&model, &mut positions, &config);

        let after = (positions[0].distance(positions[1]) - l).abs();
        assert!(after < before, "deviation {after} should shrink from {before}");
        assert_eq!(report.rounds, 6);
        assert!(report.moves > 0);
    }

    #[test]
    fn test_two_vertices_converge_within_tolerance() {
        // With a larger step, each move halves the deviation.
        let config = KamadaKawaiConfig::new(0.1, 5.0);
        let model = pair_model(&config);
        let l = 150.0 / 2.0_f64.cbrt();
        let mut positions = [DVec3::ZERO, DVec3::new(50.0, 0.0, 0.0)];

        let report = relax(&model, &mut positions, &config);

        // Relaxed means |grad| = coef * |sep - l| <= tolerance.
        let separation = positions[0].distance(positions[1]);
        assert!((separation - l).abs() <= config.tolerance / model.coefficient(0, 1) + 1e-9);
        assert!(report.max_gradient <= config.tolerance + 1e-9);
    }

    #[test]
    fn test_relax_ignores_positions_beyond_model() {
        let config = KamadaKawaiConfig::new(0.1, 0.1);
        let model = pair_model(&config);
        let stray = DVec3::new(-500.0, 20.0, 3.0);
        let mut extended = [DVec3::ZERO, DVec3::new(100.0, 0.0, 0.0), stray];
        let mut exact = [DVec3::ZERO, DVec3::new(100.0, 0.0, 0.0)];

        let report = relax(&model, &mut extended, &config);
        let expected = relax(&model, &mut exact, &config);

        assert_eq!(extended[2], stray);
        assert_eq!(&extended[..2], &exact[..]);
        assert_eq!(report, expected);
    }

    #[test]
    fn test_relax_lowers_stress_on_path() {
        let mut g = Graph::new(BoundingBox::cube(1000.0).unwrap());
        for i in 0..3 {
            g.add_vertex(VertexId::Index(i), DVec3::new(f64::from(i), 0.0, 0.0));
        }
        g.add_edge(VertexIndex(0), VertexIndex(1), 1.0, "");
        g.add_edge(VertexIndex(1), VertexIndex(2), 1.0, "");

        let config = KamadaKawaiConfig::default();
        let model = StressModel::new(&DistanceMatrix::compute(&g), &config);
        let mut positions: Vec<DVec3> = g.vertices().iter().map(|v| v.position).collect();
        let before = model.energy(&positions);

        relax(&model, &mut positions, &config);

        assert!(model.energy(&positions) < before);
    }

    #[test]
    fn test_apply_clamps_into_margin() {
        let mut g = Graph::new(BoundingBox::cube(100.0).unwrap());
        for i in 0..5 {
            g.add_vertex(VertexId::Index(i), DVec3::new(f64::from(i), -f64::from(i), 0.5));
        }
        for i in 1..5 {
            g.add_edge(VertexIndex(i - 1), VertexIndex(i), 1.0, "");
        }

        let report = apply(&mut g, &KamadaKawaiConfig::default()).unwrap();
        assert_eq!(report.rounds, 15);

        let margin = g.bounds().range() / 5.0;
        for v in g.vertices() {
            assert!(v.position.is_finite());
            assert!(g.bounds().contains_with_margin(v.position, margin));
        }
    }

    #[test]
    fn test_apply_rejects_tiny_graphs() {
        let mut g = Graph::new(BoundingBox::cube(10.0).unwrap());
        assert_eq!(
            apply(&mut g, &KamadaKawaiConfig::default()),
            Err(LayoutError::TooFewVertices {
                required: 2,
                actual: 0
            })
        );

        g.add_vertex(VertexId::Index(0), DVec3::ZERO);
        assert!(matches!(
            apply(&mut g, &KamadaKawaiConfig::default()),
            Err(LayoutError::TooFewVertices { actual: 1, .. })
        ));
        assert_eq!(g.vertices()[0].position, DVec3::ZERO);
    }
}

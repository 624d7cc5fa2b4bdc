//! Stochastic block model.
//!
//! Each vertex joins a uniformly random community; every unordered pair is
//! connected with `within_p` when the communities match and `between_p`
//! otherwise.

use rand::Rng;
use serde::Deserialize;

use crate::graph::{Graph, VertexId, VertexIndex};

/// Configuration for the community generator.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CommunityConfig {
    /// Number of communities (default: 4). Zero is treated as one.
    pub groups: u32,
    /// Edge probability inside a community (default: 0.35).
    pub within_p: f64,
    /// Edge probability across communities (default: 0.005).
    pub between_p: f64,
}

impl Default for CommunityConfig {
    fn default() -> Self {
        Self {
            groups: 4,
            within_p: 0.35,
            between_p: 0.005,
        }
    }
}

impl CommunityConfig {
    /// Config from explicit values.
    pub fn new(groups: u32, within_p: f64, between_p: f64) -> Self {
        Self {
            groups,
            within_p,
            between_p,
        }
    }
}

/// Clamp a probability into `[0, 1]`; NaN counts as 0.
fn probability(p: f64) -> f64 {
    if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) }
}

/// Clear `graph` and fill it with `n` vertices in random communities.
///
/// Returns the number of edges added.
pub fn populate<R: Rng + ?Sized>(
    graph: &mut Graph,
    n: u32,
    config: &CommunityConfig,
    rng: &mut R,
) -> usize {
    graph.clear();
    let bounds = graph.bounds();
    let groups = config.groups.max(1);
    let within_p = probability(config.within_p);
    let between_p = probability(config.between_p);

    for i in 0..n {
        let index = graph.add_vertex(VertexId::Index(i), bounds.jittered_center(rng));
        graph.vertices[index.index()].community = rng.gen_range(0..groups);
    }

    for i in 0..n {
        for j in i + 1..n {
            let same = graph.vertices[i as usize].community == graph.vertices[j as usize].community;
            let p = if same { within_p } else { between_p };
            if rng.r#gen::<f64>() < p {
                graph.add_edge(VertexIndex(i), VertexIndex(j), 1.0, "");
            }
        }
    }

    tracing::debug!(
        vertices = n,
        edges = graph.edge_count(),
        groups,
        "community graph generated"
    );
    graph.edge_count()
}

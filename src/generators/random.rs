//! Uniform random graph, G(n, m).
//!
//! Every unordered vertex pair is listed, shuffled, and the first `m` become
//! edges, so edges are drawn uniformly without replacement.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::graph::{Graph, VertexId, VertexIndex};

/// Largest edge count a simple graph on `n` vertices can hold.
///
/// Computed in `u64`, which holds `C(n, 2)` for every `u32` n even where
/// `usize` is 32 bits.
pub fn max_edges(n: u32) -> u64 {
    let n = u64::from(n);
    n * n.saturating_sub(1) / 2
}

/// Clear `graph` and fill it with `n` vertices and `m` random edges.
///
/// `m` is clamped to `C(n, 2)`. Returns the number of edges added.
pub fn populate<R: Rng + ?Sized>(graph: &mut Graph, n: u32, m: usize, rng: &mut R) -> usize {
    graph.clear();
    let bounds = graph.bounds();

    for i in 0..n {
        graph.add_vertex(VertexId::Index(i), bounds.jittered_center(rng));
    }

    // every pair is listed; skip the hint when the count exceeds usize
    let mut pairs = Vec::with_capacity(usize::try_from(max_edges(n)).unwrap_or(0));
    for i in 0..n {
        for j in i + 1..n {
            pairs.push((VertexIndex(i), VertexIndex(j)));
        }
    }
    pairs.shuffle(rng);
    pairs.truncate(m);

    for &(s, t) in &pairs {
        graph.add_edge(s, t, 1.0, "");
    }

    tracing::debug!(vertices = n, edges = pairs.len(), requested = m, "random graph generated");
    pairs.len()
}

//! Preferential attachment (Barabási–Albert with one edge per step).
//!
//! A four-vertex star seeds the graph; every later vertex attaches one edge
//! to an existing vertex chosen with probability proportional to its degree.
//! The result has `n - 1` edges and a heavy-tailed degree distribution.

use rand::Rng;

use crate::graph::{Graph, VertexId, VertexIndex};

/// Size of the seed star (center plus three leaves).
pub const SEED_VERTICES: u32 = 4;

/// Clear `graph` and grow a preferential-attachment graph of `n` vertices.
///
/// `n` below [`SEED_VERTICES`] still yields the seed star.
pub fn populate<R: Rng + ?Sized>(graph: &mut Graph, n: u32, rng: &mut R) {
    graph.clear();
    let bounds = graph.bounds();

    for i in 0..SEED_VERTICES {
        graph.add_vertex(VertexId::Index(i), bounds.jittered_center(rng));
    }
    for leaf in 1..SEED_VERTICES {
        graph.add_edge(VertexIndex(0), VertexIndex(leaf), 1.0, "");
    }

    for i in SEED_VERTICES..n {
        let target = pick_attachment_target(graph, rng);
        let vertex = graph.add_vertex(VertexId::Index(i), bounds.jittered_center(rng));
        if let Some(target) = target {
            graph.add_edge(vertex, target, 1.0, "");
        }
    }

    tracing::debug!(
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        "power-law graph generated"
    );
}

/// Draw an existing vertex with probability `degree / total_degree`.
///
/// Refreshes every vertex's attachment probability, orders vertices by it
/// (ascending, stable) and returns the first whose cumulative probability
/// exceeds a uniform draw. Returns None when no vertex has an edge.
pub fn pick_attachment_target<R: Rng + ?Sized>(graph: &mut Graph, rng: &mut R) -> Option<VertexIndex> {
    let total = graph.total_degree();
    if total == 0 {
        return None;
    }

    for v in &mut graph.vertices {
        v.attachment_probability = f64::from(v.degree) / total as f64;
    }

    let mut order: Vec<usize> = (0..graph.vertices.len()).collect();
    order.sort_by(|&a, &b| {
        graph.vertices[a]
            .attachment_probability
            .total_cmp(&graph.vertices[b].attachment_probability)
    });

    let draw = rng.r#gen::<f64>();
    let mut cumulative = 0.0;
    for &i in &order {
        cumulative += graph.vertices[i].attachment_probability;
        if draw < cumulative {
            return Some(VertexIndex(i as u32));
        }
    }

    // rounding left the last bucket just short of 1
    order.last().map(|&i| VertexIndex(i as u32))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::BoundingBox;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn graph() -> Graph {
        Graph::new(BoundingBox::cube(100.0).unwrap())
    }

    #[test]
    fn test_edge_count_and_degree_sum() {
        let mut rng = StdRng::seed_from_u64(21);
        for n in [4, 5, 10, 100, 250] {
            let mut g = graph();
            populate(&mut g, n, &mut rng);

            assert_eq!(g.vertex_count(), n as usize);
            assert_eq!(g.edge_count(), n as usize - 1);
            assert_eq!(g.total_degree(), 2 * g.edge_count() as u64);
        }
    }

    #[test]
    fn test_small_n_builds_seed_star() {
        let mut rng = StdRng::seed_from_u64(22);
        let mut g = graph();
        populate(&mut g, 2, &mut rng);

        assert_eq!(g.vertex_count(), 4);
        assert_eq!(g.degrees(), vec![3, 1, 1, 1]);
    }

    #[test]
    fn test_every_new_vertex_has_degree_one_when_added() {
        let mut rng = StdRng::seed_from_u64(23);
        let mut g = graph();
        populate(&mut g, 60, &mut rng);

        // new vertex i is always the source of edge i - 1
        for (k, e) in g.edges().iter().enumerate().skip(3) {
            assert_eq!(e.source.index(), k + 1);
            assert!(e.target.index() < e.source.index());
        }
        assert!(g.vertices().iter().all(|v| v.degree() >= 1));
    }

    #[test]
    fn test_attachment_prefers_high_degree() {
        let mut rng = StdRng::seed_from_u64(24);
        let mut g = graph();
        populate(&mut g, 4, &mut rng);

        // center has degree 3 of 6, each leaf 1 of 6
        let mut hits = [0usize; 4];
        for _ in 0..3000 {
            let target = pick_attachment_target(&mut g, &mut rng).unwrap();
            hits[target.index()] += 1;
        }
        assert!((1350..=1650).contains(&hits[0]), "center picked {} times", hits[0]);
        for leaf in 1..4 {
            assert!((350..=650).contains(&hits[leaf]), "leaf picked {} times", hits[leaf]);
        }
    }

    #[test]
    fn test_attachment_probabilities_recorded() {
        let mut rng = StdRng::seed_from_u64(25);
        let mut g = graph();
        populate(&mut g, 4, &mut rng);
        pick_attachment_target(&mut g, &mut rng);

        let probabilities: Vec<f64> = g.vertices().iter().map(|v| v.attachment_probability()).collect();
        assert!((probabilities[0] - 0.5).abs() < 1e-12);
        assert!((probabilities[1] - 1.0 / 6.0).abs() < 1e-12);
        assert!((probabilities.iter().sum::<f64>() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_no_edges_no_target() {
        let mut rng = StdRng::seed_from_u64(26);
        let mut g = graph();
        g.add_vertex(VertexId::Index(0), glam::DVec3::ZERO);
        assert_eq!(pick_attachment_target(&mut g, &mut rng), None);
    }

    #[test]
    fn test_hubs_emerge() {
        let mut rng = StdRng::seed_from_u64(27);
        let mut g = graph();
        populate(&mut g, 500, &mut rng);

        let max_degree = g.degrees().into_iter().max().unwrap();
        assert!(max_degree >= 15, "largest hub only has degree {max_degree}");
    }
}

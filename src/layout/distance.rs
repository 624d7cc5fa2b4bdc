//! All-pairs graph-theoretic distance.
//!
//! One breadth-first search per source vertex over the undirected topology,
//! O(n * (n + m)) overall. Unreachable pairs stay `None`; callers that need a
//! number use [`DistanceMatrix::disconnected_distance`].

use std::collections::VecDeque;

use petgraph::graph::NodeIndex;

use crate::graph::Graph;

/// Square matrix of hop counts between every pair of vertices.
///
/// Rows and columns follow the graph's vertex order. The diagonal is 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceMatrix {
    n: usize,
    cells: Vec<Option<u32>>,
}

impl DistanceMatrix {
    /// Compute shortest-path hop counts for every vertex pair.
    pub fn compute(graph: &Graph) -> Self {
        let topology = graph.topology();
        let n = topology.node_count();
        let mut cells = vec![None; n * n];
        let mut queue = VecDeque::with_capacity(n);

        for source in 0..n {
            let row = &mut cells[source * n..(source + 1) * n];
            row[source] = Some(0);
            queue.push_back(source);

            while let Some(current) = queue.pop_front() {
                let next = row[current].map_or(0, |d| d + 1);
                for neighbor in topology.neighbors(NodeIndex::new(current)) {
                    let j = neighbor.index();
                    if row[j].is_none() {
                        row[j] = Some(next);
                        queue.push_back(j);
                    }
                }
            }
        }

        Self { n, cells }
    }

    /// Number of rows (and columns).
    pub fn len(&self) -> usize {
        self.n
    }

    /// True for the matrix of an empty graph.
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Hop count from `i` to `j`, None if unreachable or out of range.
    pub fn get(&self, i: usize, j: usize) -> Option<u32> {
        if i >= self.n || j >= self.n {
            return None;
        }
        self.cells[i * self.n + j]
    }

    /// Hop count with unreachable pairs mapped to the disconnected distance.
    pub fn get_or_disconnected(&self, i: usize, j: usize) -> u32 {
        self.get(i, j)
            .unwrap_or_else(|| self.disconnected_distance())
    }

    /// Check `d[i][j] == d[j][i]` for every pair.
    pub fn is_symmetric(&self) -> bool {
        (0..self.n).all(|i| (i + 1..self.n).all(|j| self.get(i, j) == self.get(j, i)))
    }

    /// Largest finite hop count between two vertices (0 when no pair is
    /// connected).
    pub fn diameter(&self) -> u32 {
        self.cells.iter().flatten().copied().max().unwrap_or(0)
    }

    /// Distance assigned to unreachable pairs.
    ///
    /// A hop-by-hop closure starting its counter at 2 stops one pass after the
    /// longest path, leaving the counter at `max(diameter, 1) + 2`;
    /// unreachable pairs sit one step beyond that.
    pub fn disconnected_distance(&self) -> u32 {
        self.diameter().max(1) + 3
    }

    /// True when every pair is reachable.
    pub fn is_connected(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{BoundingBox, VertexId, VertexIndex};
    use glam::DVec3;

    fn path(n: u32) -> Graph {
        let mut g = Graph::new(BoundingBox::cube(10.0).unwrap());
        for i in 0..n {
            g.add_vertex(VertexId::Index(i), DVec3::ZERO);
        }
        for i in 1..n {
            g.add_edge(VertexIndex(i - 1), VertexIndex(i), 1.0, "");
        }
        g
    }

    #[test]
    fn test_path_distances() {
        let d = DistanceMatrix::compute(&path(5));
        assert_eq!(d.len(), 5);
        assert_eq!(d.get(0, 0), Some(0));
        assert_eq!(d.get(0, 1), Some(1));
        assert_eq!(d.get(0, 4), Some(4));
        assert_eq!(d.get(1, 3), Some(2));
        assert_eq!(d.diameter(), 4);
        assert!(d.is_connected());
        assert!(d.is_symmetric());
    }

    #[test]
    fn test_cycle_takes_short_way_round() {
        let mut g = path(6);
        g.add_edge(VertexIndex(5), VertexIndex(0), 1.0, "");
        let d = DistanceMatrix::compute(&g);
        assert_eq!(d.get(0, 5), Some(1));
        assert_eq!(d.get(0, 3), Some(3));
        assert_eq!(d.get(1, 5), Some(2));
    }

    #[test]
    fn test_disconnected_components() {
        let mut g = path(3);
        g.add_vertex(VertexId::Index(3), DVec3::ZERO);
        g.add_vertex(VertexId::Index(4), DVec3::ZERO);
        g.add_edge(VertexIndex(3), VertexIndex(4), 1.0, "");

        let d = DistanceMatrix::compute(&g);
        assert_eq!(d.get(0, 3), None);
        assert_eq!(d.get(4, 2), None);
        assert!(!d.is_connected());
        assert!(d.is_symmetric());
        assert_eq!(d.diameter(), 2);
        assert_eq!(d.disconnected_distance(), 5);
        assert_eq!(d.get_or_disconnected(0, 4), 5);
        assert_eq!(d.get_or_disconnected(0, 2), 2);
    }

    #[test]
    fn test_no_edges() {
        let d = DistanceMatrix::compute(&path(1));
        assert_eq!(d.diameter(), 0);
        assert_eq!(d.disconnected_distance(), 4);

        let mut g = path(0);
        g.add_vertex(VertexId::Index(0), DVec3::ZERO);
        g.add_vertex(VertexId::Index(1), DVec3::ZERO);
        let d = DistanceMatrix::compute(&g);
        assert_eq!(d.get(0, 1), None);
        assert_eq!(d.get(1, 1), Some(0));
    }

    #[test]
    fn test_empty_graph() {
        let d = DistanceMatrix::compute(&path(0));
        assert!(d.is_empty());
        assert_eq!(d.get(0, 0), None);
    }

    #[test]
    fn test_out_of_range() {
        let d = DistanceMatrix::compute(&path(2));
        assert_eq!(d.get(0, 2), None);
    }
}

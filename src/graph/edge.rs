//! Edge type and related structures.
//!
//! Edges are the connections between vertices. Each edge has:
//! - Source and target vertex handles (never ownership)
//! - Weight, a cosmetic strength hint
//! - Display label composed by the caller

use std::fmt;

use super::vertex::VertexIndex;

/// Positional edge handle into the graph's ordered edge collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeIndex(pub u32);

impl EdgeIndex {
    /// Create a new EdgeIndex from a raw u32.
    #[inline]
    pub fn new(index: u32) -> Self {
        Self(index)
    }

    /// Get the raw u32 value.
    #[inline]
    pub fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for EdgeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Edge({})", self.0)
    }
}

impl From<u32> for EdgeIndex {
    #[inline]
    fn from(index: u32) -> Self {
        Self(index)
    }
}

/// An unordered connection between two distinct vertices of the same graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    /// First endpoint.
    pub source: VertexIndex,
    /// Second endpoint.
    pub target: VertexIndex,
    /// Non-negative strength hint (default 1).
    pub weight: f64,
    /// Caller-composed label, e.g. `"source|target|protocol|bytes"`.
    pub label: String,
}

impl Edge {
    pub(crate) fn new(source: VertexIndex, target: VertexIndex, weight: f64, label: String) -> Self {
        let weight = if weight.is_finite() { weight.max(0.0) } else { 1.0 };
        Self {
            source,
            target,
            weight,
            label,
        }
    }

    /// Check whether `vertex` is one of this edge's endpoints.
    #[inline]
    pub fn touches(&self, vertex: VertexIndex) -> bool {
        self.source == vertex || self.target == vertex
    }

    /// The endpoint opposite `vertex`, if `vertex` is an endpoint.
    pub fn other(&self, vertex: VertexIndex) -> Option<VertexIndex> {
        if self.source == vertex {
            Some(self.target)
        } else if self.target == vertex {
            Some(self.source)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_index() {
        let index = EdgeIndex::new(42);
        assert_eq!(index.raw(), 42);
        assert_eq!(format!("{}", index), "Edge(42)");
    }

    #[test]
    fn test_edge_weight_sanitized() {
        let a = VertexIndex(0);
        let b = VertexIndex(1);
        assert_eq!(Edge::new(a, b, -3.0, String::new()).weight, 0.0);
        assert_eq!(Edge::new(a, b, f64::NAN, String::new()).weight, 1.0);
        assert_eq!(Edge::new(a, b, 512.0, String::new()).weight, 512.0);
    }

    #[test]
    fn test_edge_endpoints() {
        let edge = Edge::new(VertexIndex(2), VertexIndex(5), 1.0, String::new());
        assert!(edge.touches(VertexIndex(2)));
        assert!(edge.touches(VertexIndex(5)));
        assert!(!edge.touches(VertexIndex(3)));
        assert_eq!(edge.other(VertexIndex(2)), Some(VertexIndex(5)));
        assert_eq!(edge.other(VertexIndex(5)), Some(VertexIndex(2)));
        assert_eq!(edge.other(VertexIndex(3)), None);
    }
}

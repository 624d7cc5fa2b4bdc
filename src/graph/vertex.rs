//! Vertex type and related identifiers.
//!
//! Vertices are the points of the graph. Each vertex has:
//! - An external identifier (join key for edges and display label)
//! - Position in layout space
//! - Displacement scratch vector owned by the running layout
//! - Community label, degree and attachment probability

use std::fmt;

use glam::DVec3;

/// Positional vertex handle.
///
/// Indexes the graph's ordered vertex collection (insertion order). Handles
/// are invalidated when the graph is cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexIndex(pub u32);

impl VertexIndex {
    /// Create a new VertexIndex from a raw u32.
    #[inline]
    pub fn new(index: u32) -> Self {
        Self(index)
    }

    /// Get the raw u32 value.
    #[inline]
    pub fn raw(self) -> u32 {
        self.0
    }

    /// Get the index as a usize for slice access.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for VertexIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vertex({})", self.0)
    }
}

impl From<u32> for VertexIndex {
    #[inline]
    fn from(index: u32) -> Self {
        Self(index)
    }
}

impl From<VertexIndex> for u32 {
    #[inline]
    fn from(index: VertexIndex) -> Self {
        index.0
    }
}

/// External vertex identifier.
///
/// Generated vertices are numbered, vertices loaded from network records are
/// keyed by address. Displays as the bare number or string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum VertexId {
    /// Sequential id assigned by a generator.
    Index(u32),
    /// Free-form id supplied by a collaborator (e.g. an IP address).
    Name(String),
}

impl VertexId {
    /// Check whether this id renders as `key`.
    ///
    /// Lets string-only callers (the JS facade) address numbered vertices.
    pub fn matches_key(&self, key: &str) -> bool {
        match self {
            Self::Index(i) => key.parse::<u32>().is_ok_and(|k| k == *i),
            Self::Name(name) => name == key,
        }
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(i) => write!(f, "{i}"),
            Self::Name(name) => f.write_str(name),
        }
    }
}

impl From<u32> for VertexId {
    fn from(i: u32) -> Self {
        Self::Index(i)
    }
}

impl From<&str> for VertexId {
    fn from(name: &str) -> Self {
        Self::Name(name.to_owned())
    }
}

impl From<String> for VertexId {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

/// A labeled point in layout space.
#[derive(Debug, Clone)]
pub struct Vertex {
    /// External identifier.
    pub id: VertexId,
    /// Current position.
    pub position: DVec3,
    /// Pending displacement. Recomputed every layout round, meaningless
    /// between runs.
    pub(crate) displacement: DVec3,
    /// Community label, set only by the community generator.
    pub community: u32,
    /// Number of incident edge endpoints.
    pub(crate) degree: u32,
    /// Preferential attachment probability from the last power-law draw.
    pub(crate) attachment_probability: f64,
}

impl Vertex {
    /// Create a vertex at `position` with no incident edges.
    pub fn new(id: VertexId, position: DVec3) -> Self {
        Self {
            id,
            position,
            displacement: DVec3::ZERO,
            community: 0,
            degree: 0,
            attachment_probability: 0.0,
        }
    }

    /// Number of edges incident to this vertex.
    #[inline]
    pub fn degree(&self) -> u32 {
        self.degree
    }

    /// Displacement left by the last layout round.
    #[inline]
    pub fn displacement(&self) -> DVec3 {
        self.displacement
    }

    /// Attachment probability from the last preferential attachment draw.
    #[inline]
    pub fn attachment_probability(&self) -> f64 {
        self.attachment_probability
    }
}

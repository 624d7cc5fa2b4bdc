//! Graph data structures and operations.
//!
//! This module provides the in-memory graph model: ordered vertex and edge
//! collections, the bounding box that constrains every layout, and the
//! queries a renderer uses to read positions back.

mod bounds;
mod edge;
mod engine;
mod vertex;

pub use bounds::BoundingBox;
pub use edge::{Edge, EdgeIndex};
pub use engine::Graph;
pub use vertex::{Vertex, VertexId, VertexIndex};

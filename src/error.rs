//! Error type shared by the graph engine, layouts and loaders.

use thiserror::Error;

/// Errors returned where a precondition of the engine can fail.
///
/// Most engine operations never fail: unresolved edge endpoints are dropped
/// and degenerate geometry is floored at a small epsilon. Only the cases
/// below are surfaced to the caller.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    /// A bounding box axis has min > max or a non-finite limit.
    #[error("invalid bounds on {axis} axis: min {min} > max {max} or not finite")]
    InvalidBounds {
        /// Axis name ("x", "y" or "z").
        axis: &'static str,
        /// Lower limit supplied.
        min: f64,
        /// Upper limit supplied.
        max: f64,
    },

    /// The layout needs more vertices than the graph has.
    #[error("layout requires at least {required} vertices, graph has {actual}")]
    TooFewVertices {
        /// Minimum vertex count for the algorithm.
        required: usize,
        /// Vertex count of the graph.
        actual: usize,
    },

    /// Collaborator records could not be deserialized.
    #[error("invalid records: {0}")]
    InvalidRecords(String),
}

impl From<serde_wasm_bindgen::Error> for LayoutError {
    fn from(err: serde_wasm_bindgen::Error) -> Self {
        Self::InvalidRecords(err.to_string())
    }
}

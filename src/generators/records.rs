//! Graphs built from already-parsed network records.
//!
//! The network collaborator fetches and parses two collections: hosts
//! (`{"IP": ...}`) and flows (`{"Source", "Destination", "Protocol",
//! "Bytes"}`). This module only consumes the parsed records.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::graph::{Graph, VertexId};

/// A host record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VertexRecord {
    /// Host address, used as the vertex id.
    #[serde(rename = "IP", alias = "id")]
    pub ip: String,
}

/// A flow record between two hosts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    /// Source host address. Records with an empty source are skipped.
    #[serde(rename = "Source", default)]
    pub source: String,
    /// Destination host address.
    #[serde(rename = "Destination", default)]
    pub destination: String,
    /// Protocol name, only used in the label.
    #[serde(rename = "Protocol", default)]
    pub protocol: String,
    /// Bytes transferred, used as the edge weight.
    #[serde(rename = "Bytes", default)]
    pub bytes: f64,
}

impl EdgeRecord {
    /// Label in the form `source|destination|protocol|bytes`.
    pub fn label(&self) -> String {
        format!(
            "{}|{}|{}|{}",
            self.source, self.destination, self.protocol, self.bytes
        )
    }
}

/// Outcome of [`load`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    /// Vertices created.
    pub vertices: usize,
    /// Flow records that became edges.
    pub edges_attached: usize,
    /// Flow records dropped (empty source or unresolved host).
    pub edges_skipped: usize,
}

/// Clear `graph` and rebuild it from host and flow records.
pub fn load<R: Rng + ?Sized>(
    graph: &mut Graph,
    vertices: &[VertexRecord],
    edges: &[EdgeRecord],
    rng: &mut R,
) -> LoadSummary {
    graph.clear();
    let bounds = graph.bounds();
    let mut summary = LoadSummary::default();

    for record in vertices {
        graph.add_vertex(VertexId::Name(record.ip.clone()), bounds.jittered_center(rng));
        summary.vertices += 1;
    }

    for record in edges {
        if record.source.is_empty() {
            tracing::trace!(destination = %record.destination, "flow without source skipped");
            summary.edges_skipped += 1;
            continue;
        }
        let source = VertexId::Name(record.source.clone());
        let target = VertexId::Name(record.destination.clone());
        match graph.add_edge_by_id(&source, &target, record.bytes, record.label(), None) {
            Some(_) => summary.edges_attached += 1,
            None => summary.edges_skipped += 1,
        }
    }

    tracing::debug!(
        vertices = summary.vertices,
        edges = summary.edges_attached,
        skipped = summary.edges_skipped,
        "graph loaded from records"
    );
    summary
}

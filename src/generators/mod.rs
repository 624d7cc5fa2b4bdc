//! Graph generators.
//!
//! Every generator clears the graph first, then places vertices near the
//! center of the bounding box with a small random jitter and adds edges.

pub mod community;
pub mod power_law;
pub mod random;
pub mod records;

pub use community::CommunityConfig;
pub use records::{EdgeRecord, LoadSummary, VertexRecord};

use rand::Rng;

use crate::graph::Graph;

impl Graph {
    /// Replace contents with a uniform random graph of `n` vertices and `m` edges.
    pub fn init_random_graph<R: Rng + ?Sized>(&mut self, n: u32, m: usize, rng: &mut R) -> usize {
        random::populate(self, n, m, rng)
    }

    /// Replace contents with a stochastic block model graph.
    pub fn init_community_graph<R: Rng + ?Sized>(
        &mut self,
        n: u32,
        groups: u32,
        within_p: f64,
        between_p: f64,
        rng: &mut R,
    ) -> usize {
        community::populate(self, n, &CommunityConfig::new(groups, within_p, between_p), rng)
    }

    /// Replace contents with a preferential-attachment graph.
    pub fn init_power_law_graph<R: Rng + ?Sized>(&mut self, n: u32, rng: &mut R) {
        power_law::populate(self, n, rng)
    }

    /// Replace contents with hosts and flows from parsed records.
    pub fn load_from_records<R: Rng + ?Sized>(
        &mut self,
        vertices: &[VertexRecord],
        edges: &[EdgeRecord],
        rng: &mut R,
    ) -> LoadSummary {
        records::load(self, vertices, edges, rng)
    }
}

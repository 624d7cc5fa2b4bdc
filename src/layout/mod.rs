//! Layout algorithms for graph visualization.
//!
//! This module provides CPU-side layout algorithms that reposition vertices
//! in place. Both run synchronously to completion and never add or remove
//! vertices; the renderer reads positions back afterwards.

pub mod distance;
pub mod fruchterman_reingold;
pub mod kamada_kawai;

pub use distance::DistanceMatrix;
pub use fruchterman_reingold::FruchtermanReingoldConfig;
pub use kamada_kawai::{KamadaKawaiConfig, KamadaKawaiReport, StressModel};

use crate::error::LayoutError;
use crate::graph::Graph;

impl Graph {
    /// Apply the Fruchterman-Reingold layout. Returns the final temperature.
    pub fn apply_layout(&mut self, iterations: u32, scale: f64, gravity: f64) -> f64 {
        self.apply_layout_with(&FruchtermanReingoldConfig::new(iterations, scale, gravity))
    }

    /// Apply the Fruchterman-Reingold layout with a full config.
    pub fn apply_layout_with(&mut self, config: &FruchtermanReingoldConfig) -> f64 {
        fruchterman_reingold::apply(self, config)
    }

    /// Apply the Kamada-Kawai layout.
    pub fn apply_kk_layout(
        &mut self,
        kappa: f64,
        descent_rate: f64,
    ) -> Result<KamadaKawaiReport, LayoutError> {
        self.apply_kk_layout_with(&KamadaKawaiConfig::new(kappa, descent_rate))
    }

    /// Apply the Kamada-Kawai layout with a full config.
    pub fn apply_kk_layout_with(
        &mut self,
        config: &KamadaKawaiConfig,
    ) -> Result<KamadaKawaiReport, LayoutError> {
        kamada_kawai::apply(self, config)
    }
}

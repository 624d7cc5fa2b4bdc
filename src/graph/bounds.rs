//! Axis-aligned bounding box for layout space.
//!
//! Every layout treats the box as a hard constraint: after a pass, each
//! vertex is clamped into the box shrunk by a per-algorithm margin.

use glam::DVec3;
use rand::Rng;

use crate::error::LayoutError;

/// Axis-aligned box `[min, max]` on all three axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    min: DVec3,
    max: DVec3,
}

impl BoundingBox {
    /// Create a box from per-axis limits.
    ///
    /// Fails when a limit is not finite or min > max on any axis. A zero
    /// extent is allowed and pins that axis to a single value.
    pub fn new(
        min_x: f64,
        max_x: f64,
        min_y: f64,
        max_y: f64,
        min_z: f64,
        max_z: f64,
    ) -> Result<Self, LayoutError> {
        for (axis, min, max) in [("x", min_x, max_x), ("y", min_y, max_y), ("z", min_z, max_z)] {
            if !min.is_finite() || !max.is_finite() || min > max {
                return Err(LayoutError::InvalidBounds { axis, min, max });
            }
        }
        Ok(Self {
            min: DVec3::new(min_x, min_y, min_z),
            max: DVec3::new(max_x, max_y, max_z),
        })
    }

    /// Create a 2-D box: z is pinned to 0.
    pub fn planar(min_x: f64, max_x: f64, min_y: f64, max_y: f64) -> Result<Self, LayoutError> {
        Self::new(min_x, max_x, min_y, max_y, 0.0, 0.0)
    }

    /// Create a cube centered on the origin.
    pub fn cube(half_extent: f64) -> Result<Self, LayoutError> {
        let h = half_extent.abs();
        Self::new(-h, h, -h, h, -h, h)
    }

    /// Lower corner.
    #[inline]
    pub fn min(&self) -> DVec3 {
        self.min
    }

    /// Upper corner.
    #[inline]
    pub fn max(&self) -> DVec3 {
        self.max
    }

    /// Extent per axis (`max - min`).
    #[inline]
    pub fn range(&self) -> DVec3 {
        self.max - self.min
    }

    /// Center of the box.
    #[inline]
    pub fn midpoint(&self) -> DVec3 {
        (self.min + self.max) * 0.5
    }

    /// Random starting position near the center.
    ///
    /// Each axis is the midpoint perturbed by up to 10% of the axis range,
    /// with a random sign per axis.
    pub fn jittered_center<R: Rng + ?Sized>(&self, rng: &mut R) -> DVec3 {
        let mid = self.midpoint();
        let range = self.range();
        let mut jitter = |mid: f64, range: f64| {
            let sign = if rng.r#gen::<f64>() > 0.5 { -1.0 } else { 1.0 };
            mid + rng.r#gen::<f64>() * sign * range / 10.0
        };
        DVec3::new(
            jitter(mid.x, range.x),
            jitter(mid.y, range.y),
            jitter(mid.z, range.z),
        )
    }

    /// Clamp `position` into `[min + margin, max - margin]` per axis.
    ///
    /// The margin is limited to `[0, range / 2]` per axis (NaN counts as 0),
    /// so the result never leaves the box; a margin of half the range or
    /// more collapses that axis to the midpoint.
    pub fn clamp_with_margin(&self, position: DVec3, margin: DVec3) -> DVec3 {
        let margin = self.limit_margin(margin);
        position.max(self.min + margin).min(self.max - margin)
    }

    /// Check whether `position` lies inside the margin-shrunk box.
    ///
    /// The margin is limited as in [`BoundingBox::clamp_with_margin`].
    pub fn contains_with_margin(&self, position: DVec3, margin: DVec3) -> bool {
        let margin = self.limit_margin(margin);
        let lo = self.min + margin;
        let hi = self.max - margin;
        position.cmpge(lo).all() && position.cmple(hi).all()
    }

    fn limit_margin(&self, margin: DVec3) -> DVec3 {
        margin.max(DVec3::ZERO).min(self.range() * 0.5)
    }
}

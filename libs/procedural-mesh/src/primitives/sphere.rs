//! # Sphere Primitive
//!
//! Generates spheres, hemispheres and capsules using latitude/longitude
//! tessellation.
//!
//! ## Algorithm
//!
//! - Ring `i` sits at polar angle `phi = PI * i / rings` (0 = +Y pole)
//! - Every ring carries `segments + 1` vertices so the UV seam is split
//! - Pole rows emit a single triangle per column

use super::require_positive;
use crate::error::MeshError;
use crate::mesh::MeshBuilder;
use crate::transform::Transformable;
use config::constants::{clamp_rings, clamp_segments};
use glam::{DQuat, DVec3};
use std::f64::consts::{FRAC_PI_2, PI};

impl MeshBuilder {
    /// Adds a UV sphere centered at the local origin.
    ///
    /// # Example
    ///
    /// ```rust
    /// use procedural_mesh::MeshBuilder;
    ///
    /// let mut builder = MeshBuilder::new();
    /// builder.add_sphere(1.0, 16, 8).unwrap();
    /// assert_eq!(builder.triangle_count(), 2 * 16 * (8 - 1));
    /// ```
    pub fn add_sphere(&mut self, radius: f64, segments: u32, rings: u32) -> Result<(), MeshError> {
        require_positive("Sphere radius", radius)?;
        let segments = clamp_segments(segments);
        let rings = clamp_rings(rings);
        self.emit_lattice(radius, 0.0, PI, segments, rings);
        Ok(())
    }

    /// Adds the upper half of a sphere, its flat side at y = 0.
    ///
    /// With `cap`, the flat side is closed by a downward-facing disc.
    pub fn add_hemisphere(
        &mut self,
        radius: f64,
        segments: u32,
        rings: u32,
        cap: bool,
    ) -> Result<(), MeshError> {
        require_positive("Hemisphere radius", radius)?;
        let segments = clamp_segments(segments);
        let rings = clamp_rings(rings);
        self.emit_lattice(radius, 0.0, FRAC_PI_2, segments, rings);
        if cap {
            self.emit_cap(0.0, radius, segments, false);
        }
        Ok(())
    }

    /// Adds a capsule along Y centered at the local origin.
    ///
    /// `height` is the total height including both hemispheres; when it is
    /// below `2 * radius` the cylindrical body vanishes. `rings` applies to
    /// each hemisphere.
    pub fn add_capsule(
        &mut self,
        radius: f64,
        height: f64,
        segments: u32,
        rings: u32,
    ) -> Result<(), MeshError> {
        require_positive("Capsule radius", radius)?;
        require_positive("Capsule height", height)?;
        let segments = clamp_segments(segments);
        let body = (height - 2.0 * radius).max(0.0);
        let half = body / 2.0;

        {
            let mut top = self.scope()?;
            top.transform_stack_mut().translate(DVec3::new(0.0, half, 0.0));
            top.add_hemisphere(radius, segments, rings, false)?;
        }
        {
            let mut bottom = self.scope()?;
            let stack = bottom.transform_stack_mut();
            stack.translate(DVec3::new(0.0, -half, 0.0));
            stack.rotate(DQuat::from_rotation_x(PI));
            bottom.add_hemisphere(radius, segments, rings, false)?;
        }
        if body > 0.0 {
            self.emit_side(radius, radius, -half, half, segments);
        }
        Ok(())
    }
}

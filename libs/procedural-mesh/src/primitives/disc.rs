//! # Disc and Arc Primitives
//!
//! Flat round shapes in the XZ plane facing +Y.

use super::{require_non_negative, require_positive};
use crate::error::MeshError;
use crate::mesh::MeshBuilder;
use config::constants::clamp_segments;
use glam::{DVec2, DVec3};
use std::f64::consts::TAU;

impl MeshBuilder {
    /// Adds a filled disc facing +Y with centered polar UVs.
    pub fn add_disc(&mut self, radius: f64, segments: u32) -> Result<(), MeshError> {
        require_positive("Disc radius", radius)?;
        self.emit_cap(0.0, radius, clamp_segments(segments), true);
        Ok(())
    }

    /// Adds a flat ring sector facing +Y.
    ///
    /// Angles are in radians, measured from +X towards +Z; the sweep is
    /// limited to one full turn and reversed angle pairs are swapped. An
    /// `inner_radius` of zero produces a pie slice.
    ///
    /// # Example
    ///
    /// ```rust
    /// use procedural_mesh::MeshBuilder;
    /// use std::f64::consts::PI;
    ///
    /// let mut builder = MeshBuilder::new();
    /// builder.add_arc(1.0, 2.0, 0.0, PI, 8).unwrap();
    /// assert_eq!(builder.triangle_count(), 16);
    /// ```
    pub fn add_arc(
        &mut self,
        inner_radius: f64,
        outer_radius: f64,
        start_angle: f64,
        end_angle: f64,
        segments: u32,
    ) -> Result<(), MeshError> {
        require_non_negative("Arc inner radius", inner_radius)?;
        require_positive("Arc outer radius", outer_radius)?;
        if inner_radius >= outer_radius {
            return Err(MeshError::degenerate(format!(
                "Arc inner radius {inner_radius} must be below outer radius {outer_radius}"
            )));
        }
        let (start, end) = if end_angle < start_angle {
            (end_angle, start_angle)
        } else {
            (start_angle, end_angle)
        };
        let sweep = (end - start).min(TAU);
        require_positive("Arc sweep", sweep)?;

        let segments = clamp_segments(segments);
        let mut inner = Vec::with_capacity(segments as usize + 1);
        let mut outer = Vec::with_capacity(segments as usize + 1);
        let polar_uv = |radius: f64, c: f64, s: f64| {
            let r = 0.5 * radius / outer_radius;
            DVec2::new(0.5 + r * c, 0.5 + r * s)
        };

        for k in 0..=segments {
            let angle = start + sweep * f64::from(k) / f64::from(segments);
            let (s, c) = angle.sin_cos();
            inner.push(self.emit_vertex(
                DVec3::new(inner_radius * c, 0.0, inner_radius * s),
                DVec3::Y,
                polar_uv(inner_radius, c, s),
            ));
            outer.push(self.emit_vertex(
                DVec3::new(outer_radius * c, 0.0, outer_radius * s),
                DVec3::Y,
                polar_uv(outer_radius, c, s),
            ));
        }

        for k in 0..segments as usize {
            if inner_radius > 0.0 {
                self.emit_triangle(inner[k], inner[k + 1], outer[k + 1]);
            }
            self.emit_triangle(inner[k], outer[k + 1], outer[k]);
        }
        Ok(())
    }
}

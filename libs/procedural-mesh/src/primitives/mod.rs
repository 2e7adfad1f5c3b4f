//! # Primitives
//!
//! Parametric solids generated into a [`MeshBuilder`] through its transform
//! stack. Round solids are built around the Y axis and centered at the
//! local origin.
//!
//! Resolution arguments are clamped (segments to
//! `MIN_SEGMENTS..=MAX_SEGMENTS`, rings to `MIN_RINGS..=MAX_RINGS`);
//! invalid dimensions are rejected with `DegenerateGeometry`.

pub mod cube;
pub mod cylinder;
pub mod disc;
pub mod sphere;

pub use cube::BoxFaces;

use crate::error::MeshError;
use crate::mesh::MeshBuilder;
use config::constants::{approx_equal, approx_zero};
use glam::{DVec2, DVec3};
use std::f64::consts::{PI, TAU};

/// Unit direction `(cos θ, sin θ)` of ring step `step` out of `segments`.
pub(crate) fn ring_direction(step: u32, segments: u32) -> (f64, f64) {
    let theta = TAU * f64::from(step) / f64::from(segments);
    (theta.cos(), theta.sin())
}

/// Rejects non-positive (or non-finite) dimensions.
pub(crate) fn require_positive(what: &str, value: f64) -> Result<(), MeshError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(MeshError::degenerate(format!("{what} must be positive: {value}")))
    }
}

/// Rejects negative (or non-finite) dimensions.
pub(crate) fn require_non_negative(what: &str, value: f64) -> Result<(), MeshError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(MeshError::degenerate(format!("{what} must be non-negative: {value}")))
    }
}

impl MeshBuilder {
    /// Emits a flat fan cap at height `y`, facing up or down.
    ///
    /// UVs are centered polar coordinates.
    pub(crate) fn emit_cap(&mut self, y: f64, radius: f64, segments: u32, up: bool) {
        let normal = if up { DVec3::Y } else { DVec3::NEG_Y };
        let center = self.emit_vertex(DVec3::new(0.0, y, 0.0), normal, DVec2::splat(0.5));
        let ring: Vec<u32> = (0..segments)
            .map(|j| {
                let (c, s) = ring_direction(j, segments);
                self.emit_vertex(
                    DVec3::new(radius * c, y, radius * s),
                    normal,
                    DVec2::new(0.5 + 0.5 * c, 0.5 + 0.5 * s),
                )
            })
            .collect();

        for j in 0..segments as usize {
            let a = ring[j];
            let b = ring[(j + 1) % ring.len()];
            if up {
                self.emit_triangle(center, b, a);
            } else {
                self.emit_triangle(center, a, b);
            }
        }
    }

    /// Emits the side wall between two rings, with a UV seam column.
    ///
    /// Normals tilt by `(radius_bottom - radius_top) / height` so tapered
    /// walls shade correctly. A zero radius collapses its ring to an apex and
    /// the degenerate half of each quad is skipped.
    pub(crate) fn emit_side(
        &mut self,
        radius_bottom: f64,
        radius_top: f64,
        y_bottom: f64,
        y_top: f64,
        segments: u32,
    ) {
        let slope = (radius_bottom - radius_top) / (y_top - y_bottom);
        let mut bottom = Vec::with_capacity(segments as usize + 1);
        let mut top = Vec::with_capacity(segments as usize + 1);

        for j in 0..=segments {
            let (c, s) = ring_direction(j, segments);
            let normal = DVec3::new(c, slope, s).normalize();
            let u = f64::from(j) / f64::from(segments);
            bottom.push(self.emit_vertex(
                DVec3::new(radius_bottom * c, y_bottom, radius_bottom * s),
                normal,
                DVec2::new(u, 0.0),
            ));
            top.push(self.emit_vertex(
                DVec3::new(radius_top * c, y_top, radius_top * s),
                normal,
                DVec2::new(u, 1.0),
            ));
        }

        for j in 0..segments as usize {
            let (b0, b1, t0, t1) = (bottom[j], bottom[j + 1], top[j], top[j + 1]);
            if radius_top > 0.0 {
                self.emit_triangle(b0, t0, t1);
            }
            if radius_bottom > 0.0 {
                self.emit_triangle(b0, t1, b1);
            }
        }
    }

    /// Emits a latitude/longitude lattice between polar angles `phi_start`
    /// and `phi_end` (0 = +Y pole, π = -Y pole).
    ///
    /// Rows touching a pole emit one triangle per column instead of two.
    pub(crate) fn emit_lattice(
        &mut self,
        radius: f64,
        phi_start: f64,
        phi_end: f64,
        segments: u32,
        rings: u32,
    ) {
        let columns = segments as usize + 1;
        let mut grid = Vec::with_capacity(columns * (rings as usize + 1));

        for i in 0..=rings {
            let t = f64::from(i) / f64::from(rings);
            let phi = phi_start + (phi_end - phi_start) * t;
            let (sin_phi, cos_phi) = phi.sin_cos();
            for j in 0..=segments {
                let (c, s) = ring_direction(j, segments);
                let direction = DVec3::new(sin_phi * c, cos_phi, sin_phi * s);
                let uv = DVec2::new(f64::from(j) / f64::from(segments), 1.0 - t);
                grid.push(self.emit_vertex(direction * radius, direction, uv));
            }
        }

        let top_pole = approx_zero(phi_start);
        let bottom_pole = approx_equal(phi_end, PI);

        for i in 0..rings as usize {
            for j in 0..segments as usize {
                let u0 = grid[i * columns + j];
                let u1 = grid[i * columns + j + 1];
                let l0 = grid[(i + 1) * columns + j];
                let l1 = grid[(i + 1) * columns + j + 1];
                if !(top_pole && i == 0) {
                    self.emit_triangle(l0, u0, u1);
                }
                if !(bottom_pole && i + 1 == rings as usize) {
                    self.emit_triangle(l0, u1, l1);
                }
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::mesh::MeshBuilder;

    /// Asserts every triangle winds towards the stored normals of its corners.
    pub fn assert_winding_follows_normals(builder: &MeshBuilder) {
        for triangle in builder.triangles() {
            let winding = builder.winding_normal(triangle);
            assert!(winding.length() > 0.5, "degenerate triangle {triangle:?}");
            let stored: glam::DVec3 = triangle
                .iter()
                .map(|&i| builder.normals()[i as usize])
                .sum();
            assert!(
                winding.dot(stored) > 0.0,
                "triangle {triangle:?} winds against its normals"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_ring_direction_closes() {
        let (c, s) = ring_direction(8, 8);
        assert_relative_eq!(c, 1.0, epsilon = 1e-12);
        assert_relative_eq!(s, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_require_positive() {
        assert!(require_positive("radius", 1.0).is_ok());
        assert!(require_positive("radius", 0.0).is_err());
        assert!(require_positive("radius", f64::NAN).is_err());
        assert!(require_non_negative("radius", 0.0).is_ok());
        assert!(require_non_negative("radius", -0.1).is_err());
    }
}

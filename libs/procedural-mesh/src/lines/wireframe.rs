//! # Wireframes
//!
//! Line counterparts of the solid primitives. The rings are the same as
//! the triangle generators use; points are connected instead of
//! triangulated, and rings carry no duplicated seam vertex.

use super::LineBuilder;
use crate::error::MeshError;
use crate::face::FaceDirection;
use crate::primitives::{require_non_negative, require_positive, ring_direction};
use config::constants::{clamp_rings, clamp_segments};
use glam::DVec3;
use std::f64::consts::PI;

impl LineBuilder {
    /// Adds the 12 edges of a box centered at the local origin.
    pub fn add_wire_box(&mut self, size: DVec3) -> Result<(), MeshError> {
        require_positive("Box width", size.x)?;
        require_positive("Box height", size.y)?;
        require_positive("Box depth", size.z)?;

        let half = size / 2.0;
        let base = self.vertex_count() as u32;
        // Corner i has bit 0 = +x, bit 1 = +y, bit 2 = +z.
        for i in 0..8u32 {
            let select = |bit: u32, h: f64| if i & bit != 0 { h } else { -h };
            self.emit_point(DVec3::new(
                select(1, half.x),
                select(2, half.y),
                select(4, half.z),
            ));
        }
        for a in 0..8u32 {
            for bit in [1, 2, 4] {
                if a & bit == 0 {
                    self.emit_edge(base + a, base + (a | bit));
                }
            }
        }
        Ok(())
    }

    /// Adds a closed circle in the XZ plane.
    pub fn add_circle(&mut self, radius: f64, segments: u32) -> Result<(), MeshError> {
        require_positive("Circle radius", radius)?;
        self.emit_ring(radius, 0.0, clamp_segments(segments));
        Ok(())
    }

    /// Adds a cylinder wireframe: two rings plus one vertical strut per
    /// segment. A zero radius collapses its ring to a single apex point.
    pub fn add_wire_cylinder(
        &mut self,
        radius_bottom: f64,
        radius_top: f64,
        height: f64,
        segments: u32,
    ) -> Result<(), MeshError> {
        require_positive("Cylinder height", height)?;
        require_non_negative("Cylinder bottom radius", radius_bottom)?;
        require_non_negative("Cylinder top radius", radius_top)?;
        if radius_bottom == 0.0 && radius_top == 0.0 {
            return Err(MeshError::degenerate(
                "Cylinder must have at least one non-zero radius",
            ));
        }

        let segments = clamp_segments(segments);
        let half = height / 2.0;
        let bottom = self.emit_ring_or_apex(radius_bottom, -half, segments);
        let top = self.emit_ring_or_apex(radius_top, half, segments);

        for j in 0..segments as usize {
            let b = bottom[j % bottom.len()];
            let t = top[j % top.len()];
            self.emit_edge(b, t);
        }
        Ok(())
    }

    /// Adds a cone wireframe: base ring plus struts to the apex.
    pub fn add_wire_cone(
        &mut self,
        radius: f64,
        height: f64,
        segments: u32,
    ) -> Result<(), MeshError> {
        require_positive("Cone radius", radius)?;
        self.add_wire_cylinder(radius, 0.0, height, segments)
    }

    /// Adds a sphere wireframe: `rings - 1` latitude circles and `segments`
    /// meridians running pole to pole.
    pub fn add_wire_sphere(
        &mut self,
        radius: f64,
        segments: u32,
        rings: u32,
    ) -> Result<(), MeshError> {
        require_positive("Sphere radius", radius)?;
        let segments = clamp_segments(segments);
        let rings = clamp_rings(rings);

        let north = self.emit_point(DVec3::new(0.0, radius, 0.0));
        let latitudes: Vec<Vec<u32>> = (1..rings)
            .map(|i| {
                let phi = PI * f64::from(i) / f64::from(rings);
                let (sin_phi, cos_phi) = phi.sin_cos();
                self.emit_ring(radius * sin_phi, radius * cos_phi, segments)
            })
            .collect();
        let south = self.emit_point(DVec3::new(0.0, -radius, 0.0));

        for j in 0..segments as usize {
            let mut previous = north;
            for ring in &latitudes {
                self.emit_edge(previous, ring[j]);
                previous = ring[j];
            }
            self.emit_edge(previous, south);
        }
        Ok(())
    }

    /// Adds the outline of one unit-cube face, scaled and offset.
    ///
    /// Used for highlighting voxel or box faces.
    pub fn add_face_outline(&mut self, direction: FaceDirection, origin: DVec3, size: DVec3) {
        let corners = direction.unit_corners().map(|c| origin + c * size);
        self.add_polyline(&corners, true);
    }

    /// Emits a closed ring at height `y`; returns its vertex indices.
    fn emit_ring(&mut self, radius: f64, y: f64, segments: u32) -> Vec<u32> {
        let ring: Vec<u32> = (0..segments)
            .map(|j| {
                let (c, s) = ring_direction(j, segments);
                self.emit_point(DVec3::new(radius * c, y, radius * s))
            })
            .collect();
        for j in 0..ring.len() {
            self.emit_edge(ring[j], ring[(j + 1) % ring.len()]);
        }
        ring
    }

    fn emit_ring_or_apex(&mut self, radius: f64, y: f64, segments: u32) -> Vec<u32> {
        if radius > 0.0 {
            self.emit_ring(radius, y, segments)
        } else {
            vec![self.emit_point(DVec3::new(0.0, y, 0.0))]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::collections::HashSet;

    fn unique_edges(lines: &LineBuilder) -> usize {
        lines
            .edges()
            .map(|[a, b]| (a.min(b), a.max(b)))
            .collect::<HashSet<_>>()
            .len()
    }

    #[test]
    fn test_wire_box() {
        let mut lines = LineBuilder::new();
        lines.add_wire_box(DVec3::new(2.0, 2.0, 2.0)).unwrap();
        assert_eq!(lines.vertex_count(), 8);
        assert_eq!(lines.edge_count(), 12);
        assert_eq!(unique_edges(&lines), 12);
        for [a, b] in lines.edges() {
            let d = lines.positions()[a as usize] - lines.positions()[b as usize];
            assert_relative_eq!(d.length(), 2.0);
        }
    }

    #[test]
    fn test_circle() {
        let mut lines = LineBuilder::new();
        lines.add_circle(3.0, 12).unwrap();
        assert_eq!(lines.vertex_count(), 12);
        assert_eq!(lines.edge_count(), 12);
        for p in lines.positions() {
            assert_relative_eq!(p.length(), 3.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_wire_cylinder() {
        let mut lines = LineBuilder::new();
        lines.add_wire_cylinder(1.0, 1.0, 2.0, 8).unwrap();
        assert_eq!(lines.vertex_count(), 16);
        assert_eq!(lines.edge_count(), 8 + 8 + 8);
        assert!(lines.validate().is_ok());
    }

    #[test]
    fn test_wire_cone_struts_meet_at_apex() {
        let mut lines = LineBuilder::new();
        lines.add_wire_cone(1.0, 2.0, 6).unwrap();
        assert_eq!(lines.vertex_count(), 7);
        assert_eq!(lines.edge_count(), 12);
        let apex = 6;
        let struts = lines.edges().filter(|e| e.contains(&apex)).count();
        assert_eq!(struts, 6);
    }

    #[test]
    fn test_wire_sphere() {
        let mut lines = LineBuilder::new();
        lines.add_wire_sphere(1.0, 8, 4).unwrap();
        // poles + 3 latitude rings of 8
        assert_eq!(lines.vertex_count(), 2 + 24);
        // 3 rings of 8 edges + 8 meridians of 4 edges
        assert_eq!(lines.edge_count(), 24 + 32);
        assert_eq!(unique_edges(&lines), lines.edge_count());
    }

    #[test]
    fn test_face_outline() {
        let mut lines = LineBuilder::new();
        lines.add_face_outline(FaceDirection::PosY, DVec3::ZERO, DVec3::ONE);
        assert_eq!(lines.edge_count(), 4);
        assert!(lines.positions().iter().all(|p| p.y == 1.0));
    }

    #[test]
    fn test_wire_invalid_inputs() {
        let mut lines = LineBuilder::new();
        assert!(lines.add_wire_box(DVec3::ZERO).is_err());
        assert!(lines.add_circle(-1.0, 8).is_err());
        assert!(lines.add_wire_cylinder(0.0, 0.0, 1.0, 8).is_err());
        assert!(lines.is_empty());
    }
}

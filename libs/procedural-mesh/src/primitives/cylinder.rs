//! # Cylinder Primitive
//!
//! Generates cylinders, frustums and cones along the Y axis.

use super::{require_non_negative, require_positive};
use crate::error::MeshError;
use crate::mesh::MeshBuilder;
use config::constants::clamp_segments;

impl MeshBuilder {
    /// Adds a cylinder or frustum centered at the local origin.
    ///
    /// # Arguments
    ///
    /// * `radius_bottom` - Radius at y = -height/2
    /// * `radius_top` - Radius at y = height/2 (0 for a cone)
    /// * `height` - Extent along Y
    /// * `segments` - Segments around the circumference (clamped)
    /// * `caps` - Whether to close the non-degenerate ends
    ///
    /// # Example
    ///
    /// ```rust
    /// use procedural_mesh::MeshBuilder;
    ///
    /// let mut builder = MeshBuilder::new();
    /// builder.add_cylinder(1.0, 1.0, 2.0, 16, true).unwrap();
    /// assert_eq!(builder.triangle_count(), 16 * 2 + 16 * 2);
    /// ```
    pub fn add_cylinder(
        &mut self,
        radius_bottom: f64,
        radius_top: f64,
        height: f64,
        segments: u32,
        caps: bool,
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

        self.emit_side(radius_bottom, radius_top, -half, half, segments);
        if caps && radius_bottom > 0.0 {
            self.emit_cap(-half, radius_bottom, segments, false);
        }
        if caps && radius_top > 0.0 {
            self.emit_cap(half, radius_top, segments, true);
        }
        Ok(())
    }

    /// Adds a cone with its base at y = -height/2 and apex at y = height/2.
    pub fn add_cone(
        &mut self,
        radius: f64,
        height: f64,
        segments: u32,
        cap: bool,
    ) -> Result<(), MeshError> {
        require_positive("Cone radius", radius)?;
        self.add_cylinder(radius, 0.0, height, segments, cap)
    }
}

#[cfg(test)]
mod tests {
    use crate::mesh::MeshBuilder;
    use crate::primitives::test_support::assert_winding_follows_normals;
    use approx::assert_relative_eq;
    use glam::DVec3;

    #[test]
    fn test_cylinder_counts() {
        let mut builder = MeshBuilder::new();
        builder.add_cylinder(1.0, 1.0, 2.0, 8, true).unwrap();
        // side: 2 * 9 seam vertices; caps: 2 * (1 + 8)
        assert_eq!(builder.vertex_count(), 18 + 18);
        assert_eq!(builder.triangle_count(), 16 + 16);
        assert!(builder.validate().is_ok());
        assert_winding_follows_normals(&builder);
    }

    #[test]
    fn test_cylinder_is_centered() {
        let mut builder = MeshBuilder::new();
        builder.add_cylinder(1.0, 1.0, 4.0, 32, false).unwrap();
        let (min, max) = builder.bounding_box();
        assert_relative_eq!(min.y, -2.0);
        assert_relative_eq!(max.y, 2.0);
        assert_relative_eq!(max.x, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_straight_side_normals_are_radial() {
        let mut builder = MeshBuilder::new();
        builder.add_cylinder(2.0, 2.0, 1.0, 4, false).unwrap();
        assert_relative_eq!(builder.normals()[0].x, 1.0);
        assert_relative_eq!(builder.normals()[0].y, 0.0);
    }

    #[test]
    fn test_tapered_side_normals_tilt() {
        let mut builder = MeshBuilder::new();
        builder.add_cylinder(2.0, 1.0, 1.0, 4, false).unwrap();
        let n = builder.normals()[0];
        let expected = DVec3::new(1.0, 1.0, 0.0).normalize();
        assert_relative_eq!(n.x, expected.x, epsilon = 1e-12);
        assert_relative_eq!(n.y, expected.y, epsilon = 1e-12);
        assert_winding_follows_normals(&builder);
    }

    #[test]
    fn test_side_uvs_are_cylindrical() {
        let mut builder = MeshBuilder::new();
        builder.add_cylinder(1.0, 1.0, 1.0, 4, false).unwrap();
        let uvs = builder.uvs();
        assert_eq!(uvs[0], glam::DVec2::new(0.0, 0.0));
        assert_eq!(uvs[1], glam::DVec2::new(0.0, 1.0));
        assert_eq!(uvs[8], glam::DVec2::new(1.0, 0.0));
    }

    #[test]
    fn test_cone_skips_degenerate_triangles() {
        let mut builder = MeshBuilder::new();
        builder.add_cone(1.0, 2.0, 12, true).unwrap();
        assert_eq!(builder.triangle_count(), 12 + 12);
        assert_winding_follows_normals(&builder);
    }

    #[test]
    fn test_inverted_cone() {
        let mut builder = MeshBuilder::new();
        builder.add_cylinder(0.0, 1.0, 2.0, 12, true).unwrap();
        assert_eq!(builder.triangle_count(), 24);
        assert_winding_follows_normals(&builder);
    }

    #[test]
    fn test_resolution_is_clamped() {
        let mut builder = MeshBuilder::new();
        builder.add_cylinder(1.0, 1.0, 1.0, 1, false).unwrap();
        assert_eq!(builder.triangle_count(), 6);
    }

    #[test]
    fn test_cylinder_invalid_inputs() {
        let mut builder = MeshBuilder::new();
        assert!(builder.add_cylinder(1.0, 1.0, 0.0, 8, true).is_err());
        assert!(builder.add_cylinder(0.0, 0.0, 1.0, 8, true).is_err());
        assert!(builder.add_cylinder(-1.0, 1.0, 1.0, 8, true).is_err());
        assert!(builder.add_cone(0.0, 1.0, 8, true).is_err());
        assert!(builder.is_empty());
    }
}

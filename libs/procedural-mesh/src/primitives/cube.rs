//! # Box and Plane Primitives
//!
//! Generates boxes with selectable faces and subdivided planes.

use super::require_positive;
use crate::error::MeshError;
use crate::face::{FaceDirection, UNIT_FACE_UVS};
use crate::mesh::MeshBuilder;
use bitflags::bitflags;
use config::constants::MAX_SEGMENTS;
use glam::{DVec2, DVec3};

bitflags! {
    /// Which faces of a box to generate.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct BoxFaces: u8 {
        const POS_X = 1 << 0;
        const NEG_X = 1 << 1;
        const POS_Y = 1 << 2;
        const NEG_Y = 1 << 3;
        const POS_Z = 1 << 4;
        const NEG_Z = 1 << 5;
        const ALL = Self::POS_X.bits()
            | Self::NEG_X.bits()
            | Self::POS_Y.bits()
            | Self::NEG_Y.bits()
            | Self::POS_Z.bits()
            | Self::NEG_Z.bits();
    }
}

impl From<FaceDirection> for BoxFaces {
    fn from(direction: FaceDirection) -> Self {
        match direction {
            FaceDirection::PosX => Self::POS_X,
            FaceDirection::NegX => Self::NEG_X,
            FaceDirection::PosY => Self::POS_Y,
            FaceDirection::NegY => Self::NEG_Y,
            FaceDirection::PosZ => Self::POS_Z,
            FaceDirection::NegZ => Self::NEG_Z,
        }
    }
}

impl MeshBuilder {
    /// Adds a box centered at the local origin.
    ///
    /// Each enabled face is an independent quad (4 vertices, 2 triangles),
    /// so a full box has 24 vertices and 12 triangles.
    ///
    /// # Example
    ///
    /// ```rust
    /// use procedural_mesh::{BoxFaces, MeshBuilder};
    /// use glam::DVec3;
    ///
    /// let mut builder = MeshBuilder::new();
    /// builder.add_box(DVec3::splat(2.0), BoxFaces::POS_Y | BoxFaces::NEG_Y).unwrap();
    /// assert_eq!(builder.triangle_count(), 4);
    /// ```
    pub fn add_box(&mut self, size: DVec3, faces: BoxFaces) -> Result<(), MeshError> {
        require_positive("Box width", size.x)?;
        require_positive("Box height", size.y)?;
        require_positive("Box depth", size.z)?;

        let half = size / 2.0;
        let enabled = FaceDirection::ALL
            .into_iter()
            .filter(|&dir| faces.contains(BoxFaces::from(dir)));
        for dir in enabled {
            let corners = dir.unit_corners().map(|c| c * size - half);
            self.add_quad(corners, dir.normal(), UNIT_FACE_UVS);
        }
        Ok(())
    }

    /// Adds a subdivided plane in the XZ plane facing +Y, centered at the
    /// local origin.
    ///
    /// Subdivisions are clamped to `1..=MAX_SEGMENTS` per axis. Vertices are
    /// shared across cells; UVs span `[0, 1]` over the whole plane.
    pub fn add_plane(
        &mut self,
        size: DVec2,
        subdivisions_x: u32,
        subdivisions_z: u32,
    ) -> Result<(), MeshError> {
        require_positive("Plane width", size.x)?;
        require_positive("Plane depth", size.y)?;

        let nx = subdivisions_x.clamp(1, MAX_SEGMENTS);
        let nz = subdivisions_z.clamp(1, MAX_SEGMENTS);
        let columns = nz as usize + 1;
        self.reserve(
            (nx as usize + 1) * columns,
            nx as usize * nz as usize * 6,
        );

        let mut grid = Vec::with_capacity((nx as usize + 1) * columns);
        for i in 0..=nx {
            let u = f64::from(i) / f64::from(nx);
            for j in 0..=nz {
                let v = f64::from(j) / f64::from(nz);
                let position = DVec3::new((u - 0.5) * size.x, 0.0, (v - 0.5) * size.y);
                grid.push(self.emit_vertex(position, DVec3::Y, DVec2::new(u, v)));
            }
        }

        for i in 0..nx as usize {
            for j in 0..nz as usize {
                let v00 = grid[i * columns + j];
                let v01 = grid[i * columns + j + 1];
                let v10 = grid[(i + 1) * columns + j];
                let v11 = grid[(i + 1) * columns + j + 1];
                self.emit_triangle(v00, v01, v11);
                self.emit_triangle(v00, v11, v10);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::test_support::assert_winding_follows_normals;

    #[test]
    fn test_box_full() {
        let mut builder = MeshBuilder::new();
        builder.add_box(DVec3::ONE, BoxFaces::ALL).unwrap();
        assert_eq!(builder.vertex_count(), 24);
        assert_eq!(builder.triangle_count(), 12);
        assert!(builder.validate().is_ok());
        assert_winding_follows_normals(&builder);
    }

    #[test]
    fn test_box_scales_with_face_flags() {
        let mut flags = BoxFaces::empty();
        for (n, dir) in FaceDirection::ALL.into_iter().enumerate() {
            flags |= BoxFaces::from(dir);
            let mut builder = MeshBuilder::new();
            builder.add_box(DVec3::ONE, flags).unwrap();
            assert_eq!(builder.triangle_count(), 2 * (n + 1));
            assert_eq!(builder.vertex_count(), 4 * (n + 1));
        }
    }

    #[test]
    fn test_box_is_centered() {
        let mut builder = MeshBuilder::new();
        builder.add_box(DVec3::new(2.0, 4.0, 6.0), BoxFaces::ALL).unwrap();
        let (min, max) = builder.bounding_box();
        assert_eq!(min, DVec3::new(-1.0, -2.0, -3.0));
        assert_eq!(max, DVec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_box_rejects_zero_size() {
        let mut builder = MeshBuilder::new();
        assert!(builder.add_box(DVec3::new(1.0, 0.0, 1.0), BoxFaces::ALL).is_err());
        assert!(builder.is_empty());
    }

    #[test]
    fn test_box_reversed_faces_inward() {
        let mut builder = MeshBuilder::new();
        builder.set_reversed(true);
        builder.add_box(DVec3::ONE, BoxFaces::POS_Y).unwrap();
        assert_eq!(builder.normals()[0], DVec3::NEG_Y);
        assert_winding_follows_normals(&builder);
    }

    #[test]
    fn test_plane_counts() {
        let mut builder = MeshBuilder::new();
        builder.add_plane(DVec2::new(4.0, 2.0), 4, 2).unwrap();
        assert_eq!(builder.vertex_count(), 15);
        assert_eq!(builder.triangle_count(), 16);
        assert!(builder.validate().is_ok());
        assert_winding_follows_normals(&builder);

        let (min, max) = builder.bounding_box();
        assert_eq!(min, DVec3::new(-2.0, 0.0, -1.0));
        assert_eq!(max, DVec3::new(2.0, 0.0, 1.0));
    }

    #[test]
    fn test_plane_clamps_subdivisions() {
        let mut builder = MeshBuilder::new();
        builder.add_plane(DVec2::ONE, 0, 0).unwrap();
        assert_eq!(builder.vertex_count(), 4);
        assert_eq!(builder.triangle_count(), 2);
    }
}

//! # Mesh Sink
//!
//! Boundary between the builders and a renderable mesh resource. Builders
//! keep `f64` geometry internally; conversion to `f32` attributes and a
//! compact index width happens only here.

use config::constants::U16_INDEX_LIMIT;
use glam::{DVec2, DVec3};
use serde::{Deserialize, Serialize};

/// Primitive interpretation of an index list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Topology {
    /// Consecutive triples form one triangle.
    Triangles,
    /// Consecutive quadruples form one quad.
    Quads,
    /// Consecutive pairs form one edge.
    Lines,
    /// Every index is one point.
    Points,
}

impl Topology {
    /// Number of indices per primitive.
    pub fn stride(self) -> usize {
        match self {
            Self::Triangles => 3,
            Self::Quads => 4,
            Self::Lines => 2,
            Self::Points => 1,
        }
    }
}

/// Width of the stored indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IndexFormat {
    U16,
    U32,
}

impl IndexFormat {
    /// Picks the narrowest width able to address `vertex_count` vertices.
    ///
    /// # Example
    ///
    /// ```rust
    /// use procedural_mesh::IndexFormat;
    ///
    /// assert_eq!(IndexFormat::for_vertex_count(24), IndexFormat::U16);
    /// assert_eq!(IndexFormat::for_vertex_count(70_000), IndexFormat::U32);
    /// ```
    pub fn for_vertex_count(vertex_count: usize) -> Self {
        if vertex_count <= U16_INDEX_LIMIT {
            Self::U16
        } else {
            Self::U32
        }
    }
}

/// Index list stored at the width chosen by [`IndexFormat::for_vertex_count`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexBuffer {
    U16(Vec<u16>),
    U32(Vec<u32>),
}

impl IndexBuffer {
    /// Packs indices for a mesh with `vertex_count` vertices.
    ///
    /// An index too large for `u16` keeps the whole list at `u32` instead of
    /// wrapping, so out-of-range indices survive for validation.
    pub fn from_indices(indices: &[u32], vertex_count: usize) -> Self {
        if IndexFormat::for_vertex_count(vertex_count) == IndexFormat::U16 {
            let narrow: Result<Vec<u16>, _> = indices.iter().map(|&i| u16::try_from(i)).collect();
            if let Ok(narrow) = narrow {
                return Self::U16(narrow);
            }
        }
        Self::U32(indices.to_vec())
    }

    /// Returns the stored width.
    pub fn format(&self) -> IndexFormat {
        match self {
            Self::U16(_) => IndexFormat::U16,
            Self::U32(_) => IndexFormat::U32,
        }
    }

    /// Returns the number of indices.
    pub fn len(&self) -> usize {
        match self {
            Self::U16(indices) => indices.len(),
            Self::U32(indices) => indices.len(),
        }
    }

    /// Returns true if no index is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Widens the indices to `u32`.
    pub fn to_u32(&self) -> Vec<u32> {
        match self {
            Self::U16(indices) => indices.iter().map(|&i| u32::from(i)).collect(),
            Self::U32(indices) => indices.clone(),
        }
    }
}

/// Receiver of materialized geometry.
///
/// Builders call `clear` first, then the attribute setters (omitting
/// attributes they do not carry), then one `add_submesh` per index list.
pub trait MeshSink {
    /// Drops any previously written data.
    fn clear(&mut self);

    /// Writes vertex positions.
    fn set_positions(&mut self, positions: Vec<[f32; 3]>);

    /// Writes vertex normals.
    fn set_normals(&mut self, normals: Vec<[f32; 3]>);

    /// Writes texture coordinates.
    fn set_uvs(&mut self, uvs: Vec<[f32; 2]>);

    /// Writes vertex colors.
    fn set_colors(&mut self, colors: Vec<[f32; 4]>);

    /// Appends one topology-tagged index list.
    fn add_submesh(&mut self, topology: Topology, indices: IndexBuffer);
}

/// One topology-tagged index list of a [`RenderMesh`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubMesh {
    pub topology: Topology,
    pub indices: IndexBuffer,
}

/// In-memory renderable mesh.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderMesh {
    positions: Vec<[f32; 3]>,
    normals: Vec<[f32; 3]>,
    uvs: Vec<[f32; 2]>,
    colors: Vec<[f32; 4]>,
    submeshes: Vec<SubMesh>,
}

impl RenderMesh {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    #[inline]
    pub fn normals(&self) -> &[[f32; 3]] {
        &self.normals
    }

    #[inline]
    pub fn uvs(&self) -> &[[f32; 2]] {
        &self.uvs
    }

    #[inline]
    pub fn colors(&self) -> &[[f32; 4]] {
        &self.colors
    }

    #[inline]
    pub fn submeshes(&self) -> &[SubMesh] {
        &self.submeshes
    }

    /// Returns the indices of a submesh widened to `u32`.
    pub fn indices_u32(&self, submesh: usize) -> Option<Vec<u32>> {
        self.submeshes.get(submesh).map(|s| s.indices.to_u32())
    }

    /// Copies the vertex attributes into another sink.
    pub(crate) fn write_attributes(&self, sink: &mut impl MeshSink) {
        sink.set_positions(self.positions.clone());
        if !self.normals.is_empty() {
            sink.set_normals(self.normals.clone());
        }
        if !self.uvs.is_empty() {
            sink.set_uvs(self.uvs.clone());
        }
        if !self.colors.is_empty() {
            sink.set_colors(self.colors.clone());
        }
    }
}

impl MeshSink for RenderMesh {
    fn clear(&mut self) {
        *self = Self::default();
    }

    fn set_positions(&mut self, positions: Vec<[f32; 3]>) {
        self.positions = positions;
    }

    fn set_normals(&mut self, normals: Vec<[f32; 3]>) {
        self.normals = normals;
    }

    fn set_uvs(&mut self, uvs: Vec<[f32; 2]>) {
        self.uvs = uvs;
    }

    fn set_colors(&mut self, colors: Vec<[f32; 4]>) {
        self.colors = colors;
    }

    fn add_submesh(&mut self, topology: Topology, indices: IndexBuffer) {
        self.submeshes.push(SubMesh { topology, indices });
    }
}

// =============================================================================
// F32 EXPORT
// =============================================================================

pub(crate) fn vec3_f32(values: &[DVec3]) -> Vec<[f32; 3]> {
    values.iter().map(|v| v.as_vec3().to_array()).collect()
}

pub(crate) fn vec2_f32(values: &[DVec2]) -> Vec<[f32; 2]> {
    values.iter().map(|v| v.as_vec2().to_array()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_format_threshold() {
        assert_eq!(IndexFormat::for_vertex_count(0), IndexFormat::U16);
        assert_eq!(IndexFormat::for_vertex_count(U16_INDEX_LIMIT), IndexFormat::U16);
        assert_eq!(
            IndexFormat::for_vertex_count(U16_INDEX_LIMIT + 1),
            IndexFormat::U32
        );
    }

    #[test]
    fn test_index_buffer_widening() {
        let buffer = IndexBuffer::from_indices(&[0, 1, 2, 65_535], 65_536);
        assert_eq!(buffer.format(), IndexFormat::U16);
        assert_eq!(buffer.to_u32(), vec![0, 1, 2, 65_535]);

        let wide = IndexBuffer::from_indices(&[70_000], 70_001);
        assert_eq!(wide.format(), IndexFormat::U32);
        assert_eq!(wide.len(), 1);
    }

    #[test]
    fn test_oversized_index_is_not_truncated() {
        let buffer = IndexBuffer::from_indices(&[0, 1, 65_536], 3);
        assert_eq!(buffer.format(), IndexFormat::U32);
        assert_eq!(buffer.to_u32(), vec![0, 1, 65_536]);
    }

    #[test]
    fn test_render_mesh_clear() {
        let mut mesh = RenderMesh::new();
        mesh.set_positions(vec![[0.0; 3]; 3]);
        mesh.add_submesh(Topology::Triangles, IndexBuffer::U16(vec![0, 1, 2]));
        assert_eq!(mesh.indices_u32(0), Some(vec![0, 1, 2]));

        MeshSink::clear(&mut mesh);
        assert_eq!(mesh.vertex_count(), 0);
        assert!(mesh.submeshes().is_empty());
        assert_eq!(mesh.indices_u32(0), None);
    }

    #[test]
    fn test_topology_stride() {
        assert_eq!(Topology::Triangles.stride(), 3);
        assert_eq!(Topology::Quads.stride(), 4);
        assert_eq!(Topology::Lines.stride(), 2);
        assert_eq!(Topology::Points.stride(), 1);
    }
}

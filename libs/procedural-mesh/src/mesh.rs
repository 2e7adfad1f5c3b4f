//! # Primitive Mesh Builder
//!
//! Triangle accumulator with per-vertex normals, UVs and optional colors.
//! Geometry is placed through the builder's transform stack; parametric
//! solids live in [`crate::primitives`].
//!
//! ## Winding
//!
//! Front faces are counter-clockwise seen from the side their normal points
//! to. With `reversed` set, every new triangle swaps its last two indices and
//! every new normal is negated, turning the geometry inside out.

use crate::buffer::GeometryBuffer;
use crate::error::{MeshError, ValidationReport};
use crate::sink::{vec2_f32, vec3_f32, IndexBuffer, MeshSink, RenderMesh, Topology};
use crate::transform::{TransformStack, Transformable};
use config::BuilderConfig;
use glam::{DMat4, DVec2, DVec3};

/// Stateful triangle mesh builder.
///
/// All geometry calculations use f64 internally. Export to f32 only
/// happens when writing to a [`MeshSink`].
///
/// # Example
///
/// ```rust
/// use procedural_mesh::{BoxFaces, MeshBuilder};
/// use glam::DVec3;
///
/// let mut builder = MeshBuilder::new();
/// builder.add_box(DVec3::ONE, BoxFaces::ALL).unwrap();
/// assert_eq!(builder.vertex_count(), 24);
/// assert_eq!(builder.triangle_count(), 12);
/// assert!(builder.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MeshBuilder {
    buffer: GeometryBuffer,
    normals: Vec<DVec3>,
    uvs: Vec<DVec2>,
    indices: Vec<u32>,
    reversed: bool,
}

impl MeshBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty builder with a custom transform stack.
    pub fn with_transform(transform: TransformStack) -> Self {
        Self {
            buffer: GeometryBuffer::with_transform(transform),
            ..Self::default()
        }
    }

    /// Creates an empty builder honoring the configured stack depth.
    pub fn with_config(config: &BuilderConfig) -> Self {
        Self::with_transform(TransformStack::with_capacity_limit(config.max_transform_depth))
    }

    // =========================================================================
    // STATE
    // =========================================================================

    /// Sets the global winding reversal flag for subsequent geometry.
    pub fn set_reversed(&mut self, reversed: bool) {
        self.reversed = reversed;
    }

    #[inline]
    pub fn is_reversed(&self) -> bool {
        self.reversed
    }

    /// Sets the color applied to subsequently added vertices.
    pub fn set_color(&mut self, color: Option<[f32; 4]>) {
        self.buffer.set_color(color);
    }

    /// Reserves space for additional vertices and indices.
    pub fn reserve(&mut self, vertices: usize, indices: usize) {
        self.buffer.reserve(vertices);
        self.normals.reserve(vertices);
        self.uvs.reserve(vertices);
        self.indices.reserve(indices);
    }

    // =========================================================================
    // ACCESSORS
    // =========================================================================

    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.buffer.len()
    }

    /// Returns the number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Returns true if no vertex was added.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    #[inline]
    pub fn positions(&self) -> &[DVec3] {
        self.buffer.positions()
    }

    #[inline]
    pub fn normals(&self) -> &[DVec3] {
        &self.normals
    }

    #[inline]
    pub fn uvs(&self) -> &[DVec2] {
        &self.uvs
    }

    #[inline]
    pub fn colors(&self) -> Option<&[[f32; 4]]> {
        self.buffer.colors()
    }

    #[inline]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Iterates over the triangles as index triples.
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// Returns the underlying geometry buffer.
    #[inline]
    pub fn buffer(&self) -> &GeometryBuffer {
        &self.buffer
    }

    /// Computes the axis-aligned bounding box.
    pub fn bounding_box(&self) -> (DVec3, DVec3) {
        self.buffer.bounding_box()
    }

    /// Returns the unit normal implied by a triangle's winding.
    ///
    /// Zero for degenerate triangles.
    pub fn winding_normal(&self, triangle: [u32; 3]) -> DVec3 {
        let p = self.buffer.positions();
        let [a, b, c] = triangle.map(|i| p[i as usize]);
        (b - a).cross(c - a).normalize_or_zero()
    }

    // =========================================================================
    // MUTATION
    // =========================================================================

    /// Appends a raw, already transformed vertex.
    ///
    /// Only the color array is kept in sync; normals and UVs are left to the
    /// caller, and `validate()` reports any resulting mismatch.
    pub fn add_vertex(&mut self, position: DVec3) -> u32 {
        self.buffer.push_position(position)
    }

    /// Appends one flat triangle.
    ///
    /// Points and normal go through the transform stack; the normal is
    /// repeated on all three new vertices. Returns the first vertex index.
    pub fn add_triangle(
        &mut self,
        a: DVec3,
        b: DVec3,
        c: DVec3,
        normal: DVec3,
        uv_a: DVec2,
        uv_b: DVec2,
        uv_c: DVec2,
    ) -> u32 {
        let i0 = self.emit_vertex(a, normal, uv_a);
        let i1 = self.emit_vertex(b, normal, uv_b);
        let i2 = self.emit_vertex(c, normal, uv_c);
        self.emit_triangle(i0, i1, i2);
        i0
    }

    /// Appends one flat quad as two triangles sharing the `0-2` diagonal.
    ///
    /// Four vertices are added; corners are expected counter-clockwise
    /// around `normal`. Returns the first vertex index.
    pub fn add_quad(&mut self, corners: [DVec3; 4], normal: DVec3, uvs: [DVec2; 4]) -> u32 {
        let i0 = self.emit_vertex(corners[0], normal, uvs[0]);
        let i1 = self.emit_vertex(corners[1], normal, uvs[1]);
        let i2 = self.emit_vertex(corners[2], normal, uvs[2]);
        let i3 = self.emit_vertex(corners[3], normal, uvs[3]);
        self.emit_triangle(i0, i1, i2);
        self.emit_triangle(i0, i2, i3);
        i0
    }

    /// Appends indexed geometry from parallel tables.
    ///
    /// `positions`, `normals` and `uvs` must have equal lengths and every
    /// index must address them; nothing is added otherwise.
    pub fn add_indexed(
        &mut self,
        positions: &[DVec3],
        normals: &[DVec3],
        uvs: &[DVec2],
        indices: &[u32],
    ) -> Result<(), MeshError> {
        if normals.len() != positions.len() {
            return Err(MeshError::length_mismatch("normals", positions.len(), normals.len()));
        }
        if uvs.len() != positions.len() {
            return Err(MeshError::length_mismatch("uvs", positions.len(), uvs.len()));
        }
        if indices.len() % 3 != 0 {
            return Err(MeshError::length_mismatch(
                "indices",
                indices.len().next_multiple_of(3),
                indices.len(),
            ));
        }
        if let Some(&index) = indices.iter().find(|&&i| i as usize >= positions.len()) {
            return Err(MeshError::IndexOutOfRange {
                index,
                count: positions.len(),
            });
        }

        let base = self.vertex_count() as u32;
        for ((&p, &n), &uv) in positions.iter().zip(normals).zip(uvs) {
            self.emit_vertex(p, n, uv);
        }
        for t in indices.chunks_exact(3) {
            self.emit_triangle(base + t[0], base + t[1], base + t[2]);
        }
        Ok(())
    }

    /// Merges another builder's geometry.
    ///
    /// Positions go through the current transform followed by `matrix`
    /// (applied first, in the other mesh's local space). Normals use the
    /// inverse transpose. Missing attributes on either side are zero-filled
    /// so all arrays stay parallel.
    pub fn add_mesh(&mut self, other: &MeshBuilder, matrix: Option<DMat4>) {
        let transform = self.buffer.transform().current() * matrix.unwrap_or(DMat4::IDENTITY);
        let normal_matrix = transform.inverse().transpose();
        let flip = if self.reversed { -1.0 } else { 1.0 };

        let base = self.vertex_count();
        let added = other.vertex_count();
        self.buffer
            .extend_from(&other.buffer, |p| transform.transform_point3(p));

        let mapped_normals: Vec<DVec3> = other
            .normals
            .iter()
            .map(|&n| normal_matrix.transform_vector3(n).normalize_or_zero() * flip)
            .collect();
        merge_attribute(&mut self.normals, base, &mapped_normals, added, DVec3::ZERO);
        merge_attribute(&mut self.uvs, base, &other.uvs, added, DVec2::ZERO);

        let offset = base as u32;
        for [a, b, c] in other.triangles() {
            self.emit_triangle(a + offset, b + offset, c + offset);
        }
    }

    /// Recomputes smooth normals from triangle winding.
    ///
    /// Each vertex receives the area-weighted sum of its triangles' normals.
    pub fn compute_normals_from_winding(&mut self) {
        let positions = self.buffer.positions();
        let mut normals = vec![DVec3::ZERO; positions.len()];

        for t in self.indices.chunks_exact(3) {
            let v0 = positions[t[0] as usize];
            let v1 = positions[t[1] as usize];
            let v2 = positions[t[2] as usize];
            let normal = (v1 - v0).cross(v2 - v0);
            for &i in t {
                normals[i as usize] += normal;
            }
        }

        for normal in &mut normals {
            *normal = normal.normalize_or_zero();
        }
        self.normals = normals;
    }

    /// Re-splits a mesh into independent per-triangle vertices.
    ///
    /// Every triangle gets three fresh vertices carrying the source UVs and
    /// colors, and one normal derived from its winding.
    pub fn flat_shaded(source: &MeshBuilder) -> MeshBuilder {
        let mut flat = MeshBuilder::new();
        flat.reserve(source.indices.len(), source.indices.len());
        let has_uvs = source.uvs.len() == source.vertex_count();
        let colors = source.colors();

        for triangle in source.triangles() {
            let normal = source.winding_normal(triangle);
            for i in triangle {
                if let Some(colors) = colors {
                    flat.buffer.set_color(Some(colors[i as usize]));
                }
                let index = flat.buffer.push_position(source.positions()[i as usize]);
                flat.normals.push(normal);
                flat.uvs.push(if has_uvs { source.uvs[i as usize] } else { DVec2::ZERO });
                flat.indices.push(index);
            }
        }
        flat.buffer.set_color(None);
        flat
    }

    /// Checks that populated attribute arrays match the vertex count and
    /// that indices form complete, in-range triangles.
    pub fn validate(&self) -> ValidationReport {
        let vertices = self.vertex_count();
        let mut report = ValidationReport::new();
        report.check_attribute("normals", self.normals.len(), vertices);
        report.check_attribute("uvs", self.uvs.len(), vertices);
        if let Some(colors) = self.colors() {
            report.check_attribute("colors", colors.len(), vertices);
        }
        report.check_indices(&self.indices, 3, vertices);
        report
    }

    // =========================================================================
    // MATERIALIZATION
    // =========================================================================

    /// Writes the accumulated geometry into a sink as one triangle submesh.
    pub fn build_mesh(&self, sink: &mut impl MeshSink) {
        let vertex_count = self.vertex_count();
        let indices = IndexBuffer::from_indices(&self.indices, vertex_count);
        log::debug!(
            "materializing {} vertices, {} triangles as {:?} indices",
            vertex_count,
            self.triangle_count(),
            indices.format()
        );

        sink.clear();
        sink.set_positions(vec3_f32(self.positions()));
        if !self.normals.is_empty() {
            sink.set_normals(vec3_f32(&self.normals));
        }
        if !self.uvs.is_empty() {
            sink.set_uvs(vec2_f32(&self.uvs));
        }
        if let Some(colors) = self.colors() {
            sink.set_colors(colors.to_vec());
        }
        sink.add_submesh(Topology::Triangles, indices);
    }

    /// Materializes into a new [`RenderMesh`].
    pub fn create_mesh(&self) -> RenderMesh {
        let mut mesh = RenderMesh::new();
        self.build_mesh(&mut mesh);
        mesh
    }

    /// Empties all data and resets the transform stack and reversal flag.
    pub fn clear(&mut self) {
        self.clear_geometry();
        self.buffer.clear();
        self.reversed = false;
    }

    /// Empties the vertex and index data only. The transform stack, the
    /// current color and the reversal flag are kept.
    pub fn clear_geometry(&mut self) {
        self.buffer.clear_geometry();
        self.normals.clear();
        self.uvs.clear();
        self.indices.clear();
    }

    // =========================================================================
    // INTERNAL EMITTERS
    // =========================================================================

    /// Appends one vertex given in local space.
    pub(crate) fn emit_vertex(&mut self, position: DVec3, normal: DVec3, uv: DVec2) -> u32 {
        let transform = self.buffer.transform();
        let position = transform.transform_point(position);
        let mut normal = transform.transform_normal(normal);
        if self.reversed {
            normal = -normal;
        }
        let index = self.buffer.push_position(position);
        self.normals.push(normal);
        self.uvs.push(uv);
        index
    }

    /// Appends one triangle honoring the reversal flag.
    pub(crate) fn emit_triangle(&mut self, a: u32, b: u32, c: u32) {
        if self.reversed {
            self.indices.extend_from_slice(&[a, c, b]);
        } else {
            self.indices.extend_from_slice(&[a, b, c]);
        }
    }
}

impl Transformable for MeshBuilder {
    fn transform_stack(&self) -> &TransformStack {
        self.buffer.transform()
    }

    fn transform_stack_mut(&mut self) -> &mut TransformStack {
        self.buffer.transform_mut()
    }
}

/// Appends `added` values of an optional attribute, keeping `dst` parallel
/// to the vertex array when either side carries the attribute.
fn merge_attribute<T: Copy>(dst: &mut Vec<T>, base: usize, src: &[T], added: usize, fill: T) {
    if dst.is_empty() && src.is_empty() {
        return;
    }
    dst.resize(base, fill);
    if src.len() == added {
        dst.extend_from_slice(src);
    } else {
        dst.resize(base + added, fill);
    }
}
